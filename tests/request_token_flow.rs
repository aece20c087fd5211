mod common;

use actix_web::{http::StatusCode, test};
use chrono::{Duration, Utc};
use common::{client::TestClient, TestContext};
use lantern_auth::types::error::AppError;
use lantern_auth::types::token::TokenPurpose;
use lantern_auth::utils::token::construct_client_token;
use sea_orm::EntityTrait;

#[tokio::test]
async fn test_consume_is_one_shot() {
    println!("\n\n[+] Running test: test_consume_is_one_shot");
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let user = client.create_test_user(None).await.expect("create user");
    let t0 = Utc::now();

    let (token_id, secret) = ctx
        .db
        .issue_request_token(user.id, TokenPurpose::PasswordReset, Some(Duration::hours(1)), t0)
        .await
        .expect("issue");
    println!("[<] Request token issued: {}", token_id);

    println!("[>] First consume.");
    let first = ctx
        .db
        .consume_request_token(&token_id, &secret, TokenPurpose::PasswordReset, t0)
        .await;
    assert!(first.is_ok());

    println!("[>] Second consume of the same token.");
    let second = ctx
        .db
        .consume_request_token(&token_id, &secret, TokenPurpose::PasswordReset, t0)
        .await;
    assert!(matches!(second, Err(AppError::Invalid)));
    println!("[/] Test passed: a consumed token cannot be replayed.");
}

#[tokio::test]
async fn test_consume_with_deleted_owner_is_invalid() {
    println!("\n\n[+] Running test: test_consume_with_deleted_owner_is_invalid");
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let user = client.create_test_user(None).await.expect("create user");
    let t0 = Utc::now();

    let (token_id, secret) = ctx
        .db
        .issue_request_token(user.id, TokenPurpose::PasswordReset, Some(Duration::hours(1)), t0)
        .await
        .expect("issue");

    println!("[>] Removing owner {} out from under the token.", user.id);
    entity::user::Entity::delete_by_id(user.id)
        .exec(ctx.db.connection())
        .await
        .expect("delete owner row");

    let orphaned = ctx
        .db
        .consume_request_token(&token_id, &secret, TokenPurpose::PasswordReset, t0)
        .await;
    println!("[<] Consume result: {:?}", orphaned);
    assert!(matches!(orphaned, Err(AppError::Invalid)));
    println!("[/] Test passed: a token whose owner is gone is Invalid, not a storage error.");
}

#[tokio::test]
async fn test_concurrent_consume_single_winner() {
    println!("\n\n[+] Running test: test_concurrent_consume_single_winner");
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let user = client.create_test_user(None).await.expect("create user");
    let t0 = Utc::now();

    let (token_id, secret) = ctx
        .db
        .issue_request_token(user.id, TokenPurpose::PasswordReset, Some(Duration::hours(1)), t0)
        .await
        .expect("issue");

    println!("[>] Racing two consumers on token {}", token_id);
    let (a, b) = tokio::join!(
        ctx.db
            .consume_request_token(&token_id, &secret, TokenPurpose::PasswordReset, t0),
        ctx.db
            .consume_request_token(&token_id, &secret, TokenPurpose::PasswordReset, t0),
    );

    let successes = [a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count();
    println!("[<] Winners: {}", successes);
    assert_eq!(successes, 1);
    println!("[/] Test passed: exactly one concurrent consumer succeeds.");
}

#[tokio::test]
async fn test_new_issue_invalidates_prior_token() {
    println!("\n\n[+] Running test: test_new_issue_invalidates_prior_token");
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let user = client.create_test_user(None).await.expect("create user");
    let t0 = Utc::now();

    let (first_id, first_secret) = ctx
        .db
        .issue_request_token(user.id, TokenPurpose::PasswordReset, Some(Duration::hours(1)), t0)
        .await
        .expect("issue first");
    println!("[<] First token issued: {}", first_id);

    let (second_id, second_secret) = ctx
        .db
        .issue_request_token(user.id, TokenPurpose::PasswordReset, Some(Duration::hours(1)), t0)
        .await
        .expect("issue second");
    println!("[<] Second token issued: {}", second_id);

    println!("[>] Validating the stale first token.");
    let stale = ctx
        .db
        .validate_request_token(&first_id, &first_secret, TokenPurpose::PasswordReset, t0)
        .await;
    assert!(matches!(stale, Err(AppError::Invalid)));

    println!("[>] Validating the fresh second token.");
    let fresh = ctx
        .db
        .validate_request_token(&second_id, &second_secret, TokenPurpose::PasswordReset, t0)
        .await;
    assert!(fresh.is_ok());
    println!("[/] Test passed: reissuing a purpose sweeps the older link.");
}

#[tokio::test]
async fn test_purpose_mismatch_is_invalid() {
    println!("\n\n[+] Running test: test_purpose_mismatch_is_invalid");
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let user = client.create_test_user(None).await.expect("create user");
    let t0 = Utc::now();

    let (token_id, secret) = ctx
        .db
        .issue_request_token(user.id, TokenPurpose::PasswordReset, Some(Duration::hours(1)), t0)
        .await
        .expect("issue");

    println!("[>] Presenting a password-reset token as email-verify.");
    let result = ctx
        .db
        .validate_request_token(&token_id, &secret, TokenPurpose::EmailVerify, t0)
        .await;
    assert!(matches!(result, Err(AppError::Invalid)));
    println!("[/] Test passed: purpose scoping is enforced.");
}

#[tokio::test]
async fn test_expiry_window_and_non_expiring_tokens() {
    println!("\n\n[+] Running test: test_expiry_window_and_non_expiring_tokens");
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let user = client.create_test_user(None).await.expect("create user");
    let t0 = Utc::now();

    let (expiring_id, expiring_secret) = ctx
        .db
        .issue_request_token(user.id, TokenPurpose::PasswordReset, Some(Duration::hours(1)), t0)
        .await
        .expect("issue expiring");
    let (eternal_id, eternal_secret) = ctx
        .db
        .issue_request_token(user.id, TokenPurpose::EmailVerify, None, t0)
        .await
        .expect("issue eternal");

    println!("[>] Validating expiring token at t0+61m.");
    let late = ctx
        .db
        .validate_request_token(
            &expiring_id,
            &expiring_secret,
            TokenPurpose::PasswordReset,
            t0 + Duration::minutes(61),
        )
        .await;
    assert!(matches!(late, Err(AppError::Invalid)));

    println!("[>] Validating no-expiry token far in the future.");
    let eternal = ctx
        .db
        .validate_request_token(
            &eternal_id,
            &eternal_secret,
            TokenPurpose::EmailVerify,
            t0 + Duration::days(3650),
        )
        .await;
    assert!(eternal.is_ok());

    println!("[>] Purging expired request tokens.");
    let purged = ctx
        .db
        .purge_request_tokens_expired(t0 + Duration::hours(2))
        .await
        .expect("purge");
    assert_eq!(purged, 1);
    println!("[/] Test passed: NULL valid_until means no expiry, purge skips it.");
}

#[tokio::test]
async fn test_password_reset_route_flow() {
    println!("\n\n[+] Running test: test_password_reset_route_flow");
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;
    let user = client.create_test_user(None).await.expect("create user");

    let (token_id, secret) = ctx
        .db
        .issue_request_token(
            user.id,
            TokenPurpose::PasswordReset,
            Some(Duration::minutes(60)),
            Utc::now(),
        )
        .await
        .expect("issue");
    let reset_token = construct_client_token(&token_id, &secret);

    println!("[>] Resetting password with the mailed token.");
    let req = test::TestRequest::post()
        .uri("/password/reset")
        .set_json(serde_json::json!({
            "token": reset_token,
            "new_password": "brand-new-password",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    println!("[<] Received response with status: {}", resp.status());
    assert_eq!(resp.status(), StatusCode::OK);

    println!("[>] Old password must be dead now.");
    let req = test::TestRequest::post()
        .uri("/session/signin")
        .set_json(serde_json::json!({
            "identifier": user.email,
            "password": user.password,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    println!("[>] New password signs in.");
    let req = test::TestRequest::post()
        .uri("/session/signin")
        .set_json(serde_json::json!({
            "identifier": user.email,
            "password": "brand-new-password",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    println!("[>] Replaying the reset token.");
    let req = test::TestRequest::post()
        .uri("/password/reset")
        .set_json(serde_json::json!({
            "token": reset_token,
            "new_password": "yet-another-password",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    println!("[/] Test passed: reset consumes the token and swaps the hash.");
}

#[tokio::test]
async fn test_forgot_password_never_reveals_accounts() {
    println!("\n\n[+] Running test: test_forgot_password_never_reveals_accounts");
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;
    let user = client.create_test_user(None).await.expect("create user");

    for identifier in [user.email.clone(), "ghost@test.com".to_string()] {
        println!("[>] Requesting reset for: {}", identifier);
        let req = test::TestRequest::post()
            .uri("/password/forgot")
            .set_json(serde_json::json!({ "identifier": identifier }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        println!("[<] Received response with status: {}", resp.status());
        assert_eq!(resp.status(), StatusCode::ACCEPTED);
    }
    println!("[/] Test passed: known and unknown identifiers answer alike.");
}

#[tokio::test]
async fn test_email_confirm_route_flow() {
    println!("\n\n[+] Running test: test_email_confirm_route_flow");
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;
    let user = client.create_test_user(None).await.expect("create user");

    let (token_id, secret) = ctx
        .db
        .issue_request_token(user.id, TokenPurpose::EmailVerify, None, Utc::now())
        .await
        .expect("issue");
    let verify_token = construct_client_token(&token_id, &secret);

    println!("[>] Confirming email with the mailed token.");
    let req = test::TestRequest::post()
        .uri("/email/confirm")
        .set_json(serde_json::json!({ "token": verify_token }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let refreshed = ctx.db.get_user_by_id(&user.id).await.expect("get user");
    assert!(refreshed.email_verified);
    println!("[/] Test passed: confirmation consumes the token and flips the flag.");
}
