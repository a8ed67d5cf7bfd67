use std::time::Duration;

use actix_web::http::header::AUTHORIZATION;
use actix_web::http::StatusCode;
use actix_web::test::TestRequest;
use backend::state::security_config::SecurityConfig;
use backend_test_support::envelope::{assert_failure, assert_success};
use backend_test_support::unique_helpers::unique_email;
use ulid::Ulid;

use crate::common::send;
use crate::support::auth::{bearer_header, mint_expired_token, mint_test_token};
use crate::support::create_test_app;
use crate::support::factory::create_user;
use crate::support::test_state::{build_test_state, test_security};

fn profile(auth: Option<&str>) -> actix_http::Request {
    let mut req = TestRequest::get().uri("/api/v1/auth/profile");
    if let Some(value) = auth {
        req = req.insert_header((AUTHORIZATION, value.to_string()));
    }
    req.to_request()
}

#[actix_web::test]
async fn profile_returns_attached_identity() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let user = create_user(state.db().unwrap(), &unique_email("me"), Some("Me Myself")).await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let header = bearer_header(&user.id, &user.email, &test_security());
    let reply = send(&app, profile(Some(&header))).await;

    let data = assert_success(reply.status, &reply.body, StatusCode::OK);
    assert_eq!(data["user"]["id"], user.id.as_str());
    assert_eq!(data["user"]["email"], user.email.as_str());
    assert_eq!(data["user"]["name"], "Me Myself");
    assert!(data["user"]["createdAt"].is_string());
    assert!(data["user"].get("passwordHash").is_none());
    Ok(())
}

#[actix_web::test]
async fn strict_identity_failures_are_distinct_401s() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let user = create_user(state.db().unwrap(), &unique_email("strict"), None).await;
    let app = create_test_app(state).with_prod_routes().build().await;
    let sec = test_security();

    // Expired moments ago.
    let expired = format!(
        "Bearer {}",
        mint_expired_token(&user.id, &user.email, &sec, Duration::from_secs(5))
    );
    let forged = format!(
        "Bearer {}",
        mint_test_token(&user.id, &user.email, &SecurityConfig::new("another-secret"))
    );
    let ghost = bearer_header(&Ulid::new().to_string(), "ghost@example.com", &sec);

    let cases: [(Option<&str>, &str); 6] = [
        (None, "Access token required"),
        (Some("Basic dXNlcjpwYXNz"), "Access token required"),
        (Some("Bearer not.a.jwt"), "Invalid token"),
        (Some(forged.as_str()), "Invalid token"),
        (Some(expired.as_str()), "Token expired"),
        (Some(ghost.as_str()), "Invalid token - user not found"),
    ];

    for (auth, message) in cases {
        let reply = send(&app, profile(auth)).await;
        assert_failure(
            reply.status,
            &reply.headers,
            &reply.body,
            StatusCode::UNAUTHORIZED,
            message,
        );
    }
    Ok(())
}

#[actix_web::test]
async fn optional_identity_never_blocks() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let user = create_user(state.db().unwrap(), &unique_email("opt"), None).await;
    let app = create_test_app(state).with_prod_routes().build().await;
    let sec = test_security();

    let expired = format!(
        "Bearer {}",
        mint_expired_token(&user.id, &user.email, &sec, Duration::from_secs(3600))
    );
    let valid = bearer_header(&user.id, &user.email, &sec);

    for auth in [None, Some("Bearer garbage"), Some(expired.as_str()), Some(valid.as_str())] {
        let mut req = TestRequest::get().uri("/api/v1/users");
        if let Some(value) = auth {
            req = req.insert_header((AUTHORIZATION, value.to_string()));
        }
        let reply = send(&app, req.to_request()).await;
        let data = assert_success(reply.status, &reply.body, StatusCode::OK);
        assert_eq!(data["pagination"]["total"], 1);
    }
    Ok(())
}

#[actix_web::test]
async fn deleted_account_token_stops_working() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let user = create_user(state.db().unwrap(), &unique_email("gone"), None).await;
    let app = create_test_app(state).with_prod_routes().build().await;
    let header = bearer_header(&user.id, &user.email, &test_security());

    let req = TestRequest::delete()
        .uri("/api/v1/users/account")
        .insert_header((AUTHORIZATION, header.clone()))
        .to_request();
    let reply = send(&app, req).await;
    assert_success(reply.status, &reply.body, StatusCode::OK);

    let reply = send(&app, profile(Some(&header))).await;
    assert_failure(
        reply.status,
        &reply.headers,
        &reply.body,
        StatusCode::UNAUTHORIZED,
        "Invalid token - user not found",
    );
    Ok(())
}
