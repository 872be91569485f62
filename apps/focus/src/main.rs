use anyhow::Result;
use clap::{Parser, Subcommand};
use timer::{
    config::{CUSTOM_DEFAULT_MINUTES, DEFAULT_BLOCKS},
    format_countdown, DurationPreset, SessionConfiguration,
};
use tokio::io::BufReader;
use tracing::warn;
use tracing_subscriber::EnvFilter;

mod account;
mod render;
mod session;

use session::{run_session, SessionEnd, SessionOptions, TICK_PERIOD};

#[derive(Parser, Debug)]
#[command(name = "focus", about = "Focus session timer with Pomodoro and custom modes")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Focus blocks separated by breaks.
    Pomodoro {
        #[arg(long, default_value = "25min", value_parser = parse_preset)]
        duration: DurationPreset,
        /// Clamped to 1..=8.
        #[arg(long, default_value_t = i64::from(DEFAULT_BLOCKS), allow_negative_numbers = true)]
        blocks: i64,
        #[arg(long, default_value_t = 60)]
        render_every: u32,
    },
    /// A single focus block without breaks.
    Custom {
        /// Clamped to 25..=120.
        #[arg(long, default_value_t = CUSTOM_DEFAULT_MINUTES)]
        minutes: u32,
        #[arg(long, default_value_t = 60)]
        render_every: u32,
    },
    /// Register or sign in against the auth server.
    Account {
        #[arg(long, default_value = "http://127.0.0.1:8000")]
        server_url: String,
        #[command(subcommand)]
        action: AccountAction,
    },
}

#[derive(Subcommand, Debug)]
enum AccountAction {
    Register {
        name: String,
        email: String,
        password: String,
    },
    Login {
        email: String,
        password: String,
    },
}

fn parse_preset(raw: &str) -> Result<DurationPreset, String> {
    let preset = DurationPreset::from_label(raw);
    if raw.parse::<DurationPreset>().is_err() {
        warn!(duration = raw, fallback = preset.label(), "unknown duration preset");
    }
    Ok(preset)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    match cli.command {
        Command::Pomodoro {
            duration,
            blocks,
            render_every,
        } => run(SessionConfiguration::pomodoro(duration, blocks), render_every).await,
        Command::Custom {
            minutes,
            render_every,
        } => run(SessionConfiguration::custom(minutes), render_every).await,
        Command::Account { server_url, action } => match action {
            AccountAction::Register {
                name,
                email,
                password,
            } => account::register(&server_url, &name, &email, &password).await,
            AccountAction::Login { email, password } => {
                account::login(&server_url, &email, &password).await
            }
        },
    }
}

async fn run(config: SessionConfiguration, render_every: u32) -> Result<()> {
    config.validate()?;
    println!(
        "{:?} session: {} blocks, {} focus, {} break",
        config.kind,
        config.total_blocks,
        format_countdown(config.focus_duration_seconds),
        format_countdown(config.break_duration_seconds),
    );

    let mut stdout = std::io::stdout();
    let report = run_session(
        config,
        BufReader::new(tokio::io::stdin()),
        &mut stdout,
        SessionOptions {
            tick_period: TICK_PERIOD,
            render_every,
        },
    )
    .await?;

    match report.end {
        SessionEnd::Completed => println!("All {} blocks finished.", config.total_blocks),
        SessionEnd::Quit => println!("Session discarded."),
        SessionEnd::InputClosed => println!("Input closed; session discarded."),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_flag_falls_back_to_long_preset() {
        assert_eq!(parse_preset("25min"), Ok(DurationPreset::Short));
        assert_eq!(parse_preset("50min"), Ok(DurationPreset::Long));
        assert_eq!(parse_preset("45min"), Ok(DurationPreset::Long));
    }

    #[test]
    fn pomodoro_command_accepts_unknown_duration() {
        let cli = Cli::try_parse_from(["focus", "pomodoro", "--duration", "bogus", "--blocks", "2"])
            .expect("parse");
        match cli.command {
            Command::Pomodoro {
                duration, blocks, ..
            } => {
                assert_eq!(duration, DurationPreset::Long);
                assert_eq!(blocks, 2);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
