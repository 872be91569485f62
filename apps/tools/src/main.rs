use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use server_api::{normalize_email, password::hash_password};
use storage::Storage;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
struct Cli {
    #[arg(long, default_value = "sqlite://./data/auth.db")]
    database_url: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Ping the database and print its clock.
    CheckDb,
    CreateUser {
        name: String,
        email: String,
        password: String,
    },
    FindUser {
        email: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();
    let cli = Cli::parse();

    let storage = match Storage::new(&cli.database_url).await {
        Ok(storage) => storage,
        Err(err) => {
            eprintln!("FAILURE: could not open database '{}'", cli.database_url);
            return Err(err);
        }
    };

    match cli.command {
        Command::CheckDb => {
            storage.health_check().await?;
            let now = storage.database_time().await?;
            let users = storage.count_users().await?;
            println!("SUCCESS: connection verified");
            println!("database time: {now}");
            println!("users: {users}");
        }
        Command::CreateUser {
            name,
            email,
            password,
        } => {
            let email = normalize_email(&email);
            let name = name.trim();
            if name.is_empty() || email.is_empty() || password.is_empty() {
                bail!("name, email and password are required");
            }
            let hash = hash_password(&password)?;
            match storage.create_user(name, &email, &hash).await? {
                Some(user_id) => println!("created user_id={user_id}"),
                None => bail!("email '{email}' is already registered"),
            }
        }
        Command::FindUser { email } => match storage.user_by_email(&normalize_email(&email)).await? {
            Some(user) => {
                let summary = user.summary();
                println!(
                    "user_id={} name={} email={} created_at={}",
                    summary.user_id, summary.name, summary.email, summary.created_at
                );
            }
            None => bail!("no user with email '{email}'"),
        },
    }

    Ok(())
}
