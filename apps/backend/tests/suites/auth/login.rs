use actix_web::http::StatusCode;
use actix_web::test::TestRequest;
use backend::verify_access_token;
use backend_test_support::envelope::{assert_failure, assert_no_key, assert_success};
use backend_test_support::unique_helpers::unique_email;
use serde_json::json;

use crate::common::send;
use crate::support::create_test_app;
use crate::support::test_state::{build_test_state, test_security};

fn register(email: &str, password: &str) -> actix_http::Request {
    TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(json!({"email": email, "password": password}))
        .to_request()
}

fn login(email: &str, password: &str) -> actix_http::Request {
    TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({"email": email, "password": password}))
        .to_request()
}

#[actix_web::test]
async fn register_then_login_yields_same_subject() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await;
    let sec = test_security();

    let email = unique_email("login");
    let reg = send(&app, register(&email, "secret1")).await;
    let reg_data = assert_success(reg.status, &reg.body, StatusCode::CREATED);

    let reply = send(&app, login(&email.to_uppercase(), "secret1")).await;
    let data = assert_success(reply.status, &reply.body, StatusCode::OK);
    let body: serde_json::Value = serde_json::from_slice(&reply.body)?;
    assert_eq!(body["message"], "Login successful");
    assert_no_key(&data, "passwordHash");

    let first = verify_access_token(reg_data["token"].as_str().unwrap(), &sec)?;
    let second = verify_access_token(data["token"].as_str().unwrap(), &sec)?;
    assert_eq!(first.sub, second.sub);
    assert_eq!(data["user"]["id"].as_str(), Some(second.sub.as_str()));
    Ok(())
}

#[actix_web::test]
async fn wrong_password_and_unknown_email_look_the_same() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await;

    let email = unique_email("wrong");
    send(&app, register(&email, "secret1")).await;

    let wrong = send(&app, login(&email, "wrong-password")).await;
    assert_failure(
        wrong.status,
        &wrong.headers,
        &wrong.body,
        StatusCode::UNAUTHORIZED,
        "Invalid credentials",
    );

    let unknown = send(&app, login(&unique_email("ghost"), "secret1")).await;
    assert_failure(
        unknown.status,
        &unknown.headers,
        &unknown.body,
        StatusCode::UNAUTHORIZED,
        "Invalid credentials",
    );

    assert_eq!(wrong.body, unknown.body);
    Ok(())
}

#[actix_web::test]
async fn missing_fields_are_validation_failures() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({"email": "a@example.com"}))
        .to_request();
    let reply = send(&app, req).await;
    let error = assert_failure(
        reply.status,
        &reply.headers,
        &reply.body,
        StatusCode::BAD_REQUEST,
        "Validation failed",
    );
    assert_eq!(error.as_deref(), Some("Password is required"));

    let req = TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({"email": "a@example.com", "password": ""}))
        .to_request();
    let reply = send(&app, req).await;
    let error = assert_failure(
        reply.status,
        &reply.headers,
        &reply.body,
        StatusCode::BAD_REQUEST,
        "Validation failed",
    );
    assert_eq!(error.as_deref(), Some("\"password\" is not allowed to be empty"));
    Ok(())
}
