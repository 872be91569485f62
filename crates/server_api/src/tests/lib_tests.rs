use super::*;

async fn setup() -> ApiContext {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    ApiContext { storage }
}

fn register_request(name: &str, email: &str, password: &str) -> RegisterRequest {
    RegisterRequest {
        name: name.into(),
        email: email.into(),
        password: password.into(),
    }
}

fn login_request(email: &str, password: &str) -> LoginRequest {
    LoginRequest {
        email: email.into(),
        password: password.into(),
    }
}

#[tokio::test]
async fn register_then_login_succeeds() {
    let ctx = setup().await;
    let registered = register(&ctx, register_request("Noura", "noura@example.com", "s3cret"))
        .await
        .expect("register");
    assert!(registered.success);
    assert!(registered.user_id.0 > 0);

    let logged_in = login(&ctx, login_request("noura@example.com", "s3cret"))
        .await
        .expect("login");
    assert!(logged_in.success);
    assert_eq!(logged_in.message, "Login successful.");
}

#[tokio::test]
async fn register_rejects_missing_fields() {
    let ctx = setup().await;
    for req in [
        register_request("", "a@example.com", "pw"),
        register_request("A", "   ", "pw"),
        register_request("A", "a@example.com", ""),
    ] {
        let err = register(&ctx, req).await.expect_err("should fail");
        assert_eq!(err.code, ErrorCode::Validation);
        assert_eq!(err.message, "Missing fields.");
    }
    assert_eq!(ctx.storage.count_users().await.expect("count"), 0);
}

#[tokio::test]
async fn duplicate_email_conflicts_and_keeps_single_row() {
    let ctx = setup().await;
    register(&ctx, register_request("One", "same@example.com", "pw-1"))
        .await
        .expect("first");

    let err = register(&ctx, register_request("Two", " SAME@example.com ", "pw-2"))
        .await
        .expect_err("duplicate");
    assert_eq!(err.code, ErrorCode::Conflict);
    assert!(!err.success);
    assert_eq!(ctx.storage.count_users().await.expect("count"), 1);

    login(&ctx, login_request("same@example.com", "pw-1"))
        .await
        .expect("original password still valid");
}

#[tokio::test]
async fn login_distinguishes_unknown_email_and_bad_password() {
    let ctx = setup().await;
    register(&ctx, register_request("Lama", "lama@example.com", "right"))
        .await
        .expect("register");

    let unknown = login(&ctx, login_request("ghost@example.com", "right"))
        .await
        .expect_err("unknown");
    assert_eq!(unknown.code, ErrorCode::UnknownAccount);

    let wrong = login(&ctx, login_request("lama@example.com", "wrong"))
        .await
        .expect_err("wrong password");
    assert_eq!(wrong.code, ErrorCode::Unauthorized);
    assert_eq!(wrong.message, "Incorrect password.");
}

#[tokio::test]
async fn login_rejects_missing_fields() {
    let ctx = setup().await;
    let err = login(&ctx, login_request("", "pw"))
        .await
        .expect_err("missing email");
    assert_eq!(err.code, ErrorCode::Validation);
}

#[tokio::test]
async fn password_is_stored_hashed() {
    let ctx = setup().await;
    register(&ctx, register_request("Hind", "hind@example.com", "plain-text"))
        .await
        .expect("register");
    let user = ctx
        .storage
        .user_by_email("hind@example.com")
        .await
        .expect("lookup")
        .expect("user");
    assert_ne!(user.password_hash, "plain-text");
    assert!(verify_password("plain-text", &user.password_hash).expect("verify"));
}

#[test]
fn email_normalization_trims_and_lowercases() {
    assert_eq!(normalize_email("  Foo@Example.COM "), "foo@example.com");
}

#[tokio::test]
async fn only_empty_password_counts_as_missing() {
    let ctx = setup().await;
    register(&ctx, register_request("Lina", "lina@example.com", "   "))
        .await
        .expect("blank but non-empty password is accepted");
    login(&ctx, login_request("lina@example.com", "   "))
        .await
        .expect("same password logs in");

    let err = login(&ctx, login_request("lina@example.com", ""))
        .await
        .expect_err("empty password");
    assert_eq!(err.code, ErrorCode::Validation);
}
