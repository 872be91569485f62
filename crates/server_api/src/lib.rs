use shared::{
    error::{ApiError, ErrorCode},
    protocol::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse},
};
use storage::Storage;
use tracing::{error, info, warn};

pub mod password;

use password::{hash_password, verify_password};

#[derive(Clone)]
pub struct ApiContext {
    pub storage: Storage,
}

const MISSING_FIELDS: &str = "Missing fields.";
const REGISTRATION_FAILED: &str = "Registration failed.";
const LOGIN_FAILED: &str = "Login failed.";

pub async fn register(ctx: &ApiContext, req: RegisterRequest) -> Result<RegisterResponse, ApiError> {
    let name = req.name.trim();
    let email = normalize_email(&req.email);
    if name.is_empty() || email.is_empty() || req.password.is_empty() {
        return Err(ApiError::new(ErrorCode::Validation, MISSING_FIELDS));
    }

    // Cheap pre-check so a duplicate does not pay for a hash; the insert below
    // still decides races.
    let existing = ctx
        .storage
        .user_by_email(&email)
        .await
        .map_err(|e| internal(REGISTRATION_FAILED, e))?;
    if existing.is_some() {
        return Err(duplicate_email(&email));
    }

    let password_hash = hash_off_thread(req.password)
        .await
        .map_err(|e| internal(REGISTRATION_FAILED, e))?;

    let user_id = ctx
        .storage
        .create_user(name, &email, &password_hash)
        .await
        .map_err(|e| internal(REGISTRATION_FAILED, e))?
        .ok_or_else(|| duplicate_email(&email))?;

    info!(%user_id, %email, "account registered");
    Ok(RegisterResponse {
        success: true,
        message: "Account created successfully.".to_string(),
        user_id,
    })
}

pub async fn login(ctx: &ApiContext, req: LoginRequest) -> Result<LoginResponse, ApiError> {
    let email = normalize_email(&req.email);
    if email.is_empty() || req.password.is_empty() {
        return Err(ApiError::new(ErrorCode::Validation, MISSING_FIELDS));
    }

    let user = ctx
        .storage
        .user_by_email(&email)
        .await
        .map_err(|e| internal(LOGIN_FAILED, e))?
        .ok_or_else(|| ApiError::new(ErrorCode::UnknownAccount, "Email not found."))?;

    let valid = verify_off_thread(req.password, user.password_hash.clone())
        .await
        .map_err(|e| internal(LOGIN_FAILED, e))?;
    if !valid {
        warn!(user_id = %user.user_id, "login rejected: incorrect password");
        return Err(ApiError::new(ErrorCode::Unauthorized, "Incorrect password."));
    }

    info!(user_id = %user.user_id, "login succeeded");
    Ok(LoginResponse {
        success: true,
        message: "Login successful.".to_string(),
    })
}

pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_ascii_lowercase()
}

async fn hash_off_thread(password: String) -> anyhow::Result<String> {
    let hash = tokio::task::spawn_blocking(move || hash_password(&password)).await??;
    Ok(hash)
}

async fn verify_off_thread(password: String, stored_hash: String) -> anyhow::Result<bool> {
    let valid =
        tokio::task::spawn_blocking(move || verify_password(&password, &stored_hash)).await??;
    Ok(valid)
}

fn duplicate_email(email: &str) -> ApiError {
    info!(%email, "registration rejected: email already registered");
    ApiError::new(ErrorCode::Conflict, "Email already registered.")
}

fn internal(message: &str, err: anyhow::Error) -> ApiError {
    error!(error = %format!("{err:#}"), "{message}");
    ApiError::new(ErrorCode::Internal, message)
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
