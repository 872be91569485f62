use super::*;
use anyhow::Result;
use axum::{http::StatusCode as HttpStatus, routing::post, Json, Router};
use shared::{domain::UserId, error::ErrorCode};
use tokio::net::TcpListener;

async fn stub_register(Json(req): Json<RegisterRequest>) -> (HttpStatus, Json<serde_json::Value>) {
    if req.email == "taken@example.com" {
        return (
            HttpStatus::CONFLICT,
            Json(serde_json::to_value(ApiError::new(
                ErrorCode::Conflict,
                "Email already registered.",
            ))
            .expect("json")),
        );
    }
    (
        HttpStatus::CREATED,
        Json(
            serde_json::to_value(RegisterResponse {
                success: true,
                message: "Account created successfully.".into(),
                user_id: UserId(42),
            })
            .expect("json"),
        ),
    )
}

async fn stub_login(Json(req): Json<LoginRequest>) -> (HttpStatus, String) {
    match req.password.as_str() {
        "right" => (
            HttpStatus::OK,
            serde_json::json!({ "success": true, "message": "Login successful." }).to_string(),
        ),
        "crash" => (HttpStatus::BAD_GATEWAY, "<html>upstream down</html>".into()),
        _ => (
            HttpStatus::UNAUTHORIZED,
            serde_json::to_string(&ApiError::new(ErrorCode::Unauthorized, "Incorrect password."))
                .expect("json"),
        ),
    }
}

async fn spawn_auth_server() -> Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let app = Router::new()
        .route("/api/register", post(stub_register))
        .route("/api/login", post(stub_login));
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(format!("http://{addr}/"))
}

#[test]
fn rejects_invalid_server_url() {
    let err = AuthClient::new("not a url").err().expect("invalid");
    assert!(matches!(err, AuthClientError::InvalidUrl { .. }));
}

#[test]
fn trims_trailing_slash() {
    let client = AuthClient::new("http://localhost:8000/").expect("client");
    assert_eq!(client.server_url(), "http://localhost:8000");
}

#[tokio::test]
async fn register_returns_created_account() {
    let url = spawn_auth_server().await.expect("server");
    let client = AuthClient::new(&url).expect("client");
    let res = client
        .register("Asma", "asma@example.com", "pw")
        .await
        .expect("register");
    assert!(res.success);
    assert_eq!(res.user_id, UserId(42));
}

#[tokio::test]
async fn register_conflict_surfaces_api_error() {
    let url = spawn_auth_server().await.expect("server");
    let client = AuthClient::new(&url).expect("client");
    let err = client
        .register("Asma", "taken@example.com", "pw")
        .await
        .expect_err("conflict");
    let api = err.api_error().expect("structured error");
    assert_eq!(api.code, ErrorCode::Conflict);
    assert!(matches!(
        err,
        AuthClientError::Rejected { status, .. } if status == StatusCode::CONFLICT
    ));
}

#[tokio::test]
async fn login_maps_success_and_failures() {
    let url = spawn_auth_server().await.expect("server");
    let client = AuthClient::new(&url).expect("client");

    let ok = client.login("a@example.com", "right").await.expect("login");
    assert_eq!(ok.message, "Login successful.");

    let wrong = client
        .login("a@example.com", "wrong")
        .await
        .expect_err("unauthorized");
    assert_eq!(
        wrong.api_error().map(|e| e.code),
        Some(ErrorCode::Unauthorized)
    );

    let crash = client
        .login("a@example.com", "crash")
        .await
        .expect_err("bad gateway");
    assert!(matches!(crash, AuthClientError::UnexpectedResponse { .. }));
}
