use actix_web::http::StatusCode;
use actix_web::test::TestRequest;
use backend::repos::users;
use backend::verify_access_token;
use backend_test_support::envelope::{assert_failure, assert_no_key, assert_success};
use backend_test_support::unique_helpers::unique_email;
use serde_json::json;

use crate::common::send;
use crate::support::create_test_app;
use crate::support::test_state::{build_test_state, test_security};

#[actix_web::test]
async fn register_returns_user_and_token_without_password() -> Result<(), Box<dyn std::error::Error>>
{
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await;

    let email = unique_email("reg");
    let req = TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(json!({
            "email": email.to_uppercase(),
            "password": "secret1",
            "name": "Ann Example"
        }))
        .to_request();
    let reply = send(&app, req).await;

    let data = assert_success(reply.status, &reply.body, StatusCode::CREATED);
    let body: serde_json::Value = serde_json::from_slice(&reply.body)?;
    assert_eq!(body["message"], "User registered successfully");

    assert_eq!(data["user"]["email"], email.as_str());
    assert_eq!(data["user"]["name"], "Ann Example");
    assert_no_key(&data, "password");
    assert_no_key(&data, "passwordHash");
    assert_no_key(&data, "password_hash");

    let token = data["token"].as_str().expect("token");
    let claims = verify_access_token(token, &test_security())?;
    assert_eq!(claims.sub, data["user"]["id"].as_str().unwrap());
    assert_eq!(claims.email, email);
    Ok(())
}

#[actix_web::test]
async fn duplicate_email_is_rejected_case_insensitively() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = state.db().expect("db").clone();
    let app = create_test_app(state).with_prod_routes().build().await;

    let email = unique_email("dup");
    let first = TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(json!({"email": email, "password": "secret1"}))
        .to_request();
    assert_eq!(send(&app, first).await.status, StatusCode::CREATED);

    let second = TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(json!({"email": format!("  {}  ", email.to_uppercase()), "password": "other12"}))
        .to_request();
    let reply = send(&app, second).await;
    assert_failure(
        reply.status,
        &reply.headers,
        &reply.body,
        StatusCode::BAD_REQUEST,
        "Duplicate field value entered",
    );

    assert_eq!(users::count_users(&db, None).await?, 1);
    Ok(())
}

#[actix_web::test]
async fn every_violation_is_reported() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(json!({"email": "not-an-email", "password": "123", "name": "x"}))
        .to_request();
    let reply = send(&app, req).await;

    let error = assert_failure(
        reply.status,
        &reply.headers,
        &reply.body,
        StatusCode::BAD_REQUEST,
        "Validation failed",
    );
    assert_eq!(
        error.as_deref(),
        Some(
            "Please provide a valid email address, \
             Password must be at least 6 characters long, \
             Name must be at least 2 characters long"
        )
    );
    Ok(())
}

#[actix_web::test]
async fn unknown_fields_cannot_set_identity() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await;

    let forged_id = "01ARZ3NDEKTSV4RRFFQ69G5FAV";
    let req = TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(json!({
            "email": unique_email("extra"),
            "password": "secret1",
            "id": forged_id,
            "passwordHash": "$2b$04$abcdefghijklmnopqrstuuABCDEFGHIJKLMNOPQRSTUVWXYZ01234"
        }))
        .to_request();
    let reply = send(&app, req).await;

    let data = assert_success(reply.status, &reply.body, StatusCode::CREATED);
    assert_ne!(data["user"]["id"], forged_id);
    assert!(data["user"]["name"].is_null());
    Ok(())
}
