use anyhow::{Context, Result};
use client_core::{AuthClient, AuthClientError};

pub async fn register(server_url: &str, name: &str, email: &str, password: &str) -> Result<()> {
    let client = AuthClient::new(server_url)?;
    let res = client
        .register(name, email, password)
        .await
        .map_err(explain)
        .context("registration failed")?;
    println!("{} (user_id={})", res.message, res.user_id);
    Ok(())
}

pub async fn login(server_url: &str, email: &str, password: &str) -> Result<()> {
    let client = AuthClient::new(server_url)?;
    let res = client
        .login(email, password)
        .await
        .map_err(explain)
        .context("login failed")?;
    println!("{}", res.message);
    Ok(())
}

/// Prefer the server's own message over the status-code wrapper.
fn explain(err: AuthClientError) -> anyhow::Error {
    match err.api_error() {
        Some(api) => anyhow::anyhow!("{}", api.message),
        None => err.into(),
    }
}
