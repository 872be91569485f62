use reqwest::{Client, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use shared::{
    error::ApiError,
    protocol::{
        login_route, register_route, LoginRequest, LoginResponse, RegisterRequest,
        RegisterResponse,
    },
};
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

#[derive(Debug, Error)]
pub enum AuthClientError {
    #[error("invalid server url '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server rejected request ({status}): {}", .error.message)]
    Rejected { status: StatusCode, error: ApiError },
    #[error("unexpected response ({status}): {body}")]
    UnexpectedResponse { status: StatusCode, body: String },
}

impl AuthClientError {
    /// The server's structured error, when it sent one.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Rejected { error, .. } => Some(error),
            _ => None,
        }
    }
}

#[derive(Clone)]
pub struct AuthClient {
    http: Client,
    server_url: String,
}

impl AuthClient {
    pub fn new(server_url: &str) -> Result<Self, AuthClientError> {
        let trimmed = server_url.trim().trim_end_matches('/');
        Url::parse(trimmed).map_err(|source| AuthClientError::InvalidUrl {
            url: server_url.to_string(),
            source,
        })?;
        Ok(Self {
            http: Client::new(),
            server_url: trimmed.to_string(),
        })
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<RegisterResponse, AuthClientError> {
        self.post(
            register_route(),
            &RegisterRequest {
                name: name.to_string(),
                email: email.to_string(),
                password: password.to_string(),
            },
        )
        .await
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, AuthClientError> {
        self.post(
            login_route(),
            &LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            },
        )
        .await
    }

    async fn post<Req, Resp>(&self, route: &str, body: &Req) -> Result<Resp, AuthClientError>
    where
        Req: Serialize,
        Resp: DeserializeOwned,
    {
        let url = format!("{}{}", self.server_url, route);
        debug!(%url, "auth request");
        let res = self.http.post(&url).json(body).send().await?;
        let status = res.status();
        let text = res.text().await?;

        if status.is_success() {
            return serde_json::from_str(&text)
                .map_err(|_| AuthClientError::UnexpectedResponse { status, body: text });
        }

        match serde_json::from_str::<ApiError>(&text) {
            Ok(error) => {
                warn!(%status, code = ?error.code, message = %error.message, "auth request rejected");
                Err(AuthClientError::Rejected { status, error })
            }
            Err(_) => Err(AuthClientError::UnexpectedResponse { status, body: text }),
        }
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
