use actix_web::http::header::CONTENT_TYPE;
use actix_web::http::StatusCode;
use actix_web::test::TestRequest;
use backend_test_support::envelope::assert_failure;

use crate::common::send;
use crate::support::create_test_app;
use crate::support::test_state::build_test_state_without_db;

fn register_raw(body: &'static str) -> actix_http::Request {
    TestRequest::post()
        .uri("/api/v1/auth/register")
        .insert_header((CONTENT_TYPE, "application/json"))
        .set_payload(body)
        .to_request()
}

// Every case here fails before persistence; the state has no database.

#[actix_web::test]
async fn malformed_json_is_a_validation_failure() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state_without_db().await?)
        .with_prod_routes()
        .build()
        .await;

    let reply = send(&app, register_raw("{\"email\": ")).await;
    let error = assert_failure(
        reply.status,
        &reply.headers,
        &reply.body,
        StatusCode::BAD_REQUEST,
        "Validation failed",
    );
    assert!(error.unwrap().starts_with("Invalid JSON"));
    Ok(())
}

#[actix_web::test]
async fn non_object_body_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state_without_db().await?)
        .with_prod_routes()
        .build()
        .await;

    let reply = send(&app, register_raw("[\"a@example.com\", \"secret1\"]")).await;
    let error = assert_failure(
        reply.status,
        &reply.headers,
        &reply.body,
        StatusCode::BAD_REQUEST,
        "Validation failed",
    );
    assert_eq!(error.as_deref(), Some("\"value\" must be of type object"));
    Ok(())
}

#[actix_web::test]
async fn empty_body_lists_required_fields() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state_without_db().await?)
        .with_prod_routes()
        .build()
        .await;

    let reply = send(&app, register_raw("")).await;
    let error = assert_failure(
        reply.status,
        &reply.headers,
        &reply.body,
        StatusCode::BAD_REQUEST,
        "Validation failed",
    );
    assert_eq!(
        error.as_deref(),
        Some("Email is required, Password is required")
    );
    Ok(())
}

#[actix_web::test]
async fn wrong_types_are_named() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state_without_db().await?)
        .with_prod_routes()
        .build()
        .await;

    let reply = send(
        &app,
        register_raw(r#"{"email": ["a@example.com"], "password": 123456}"#),
    )
    .await;
    let error = assert_failure(
        reply.status,
        &reply.headers,
        &reply.body,
        StatusCode::BAD_REQUEST,
        "Validation failed",
    );
    assert_eq!(
        error.as_deref(),
        Some("\"email\" must be a string, \"password\" must be a string")
    );
    Ok(())
}

#[actix_web::test]
async fn internal_detail_is_hidden_outside_development() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state_without_db().await?)
        .with_prod_routes()
        .build()
        .await;

    // Valid body, but there is no database behind it.
    let reply = send(
        &app,
        register_raw(r#"{"email": "a@example.com", "password": "secret1"}"#),
    )
    .await;
    let error = assert_failure(
        reply.status,
        &reply.headers,
        &reply.body,
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error",
    );
    assert_eq!(error, None);
    Ok(())
}
