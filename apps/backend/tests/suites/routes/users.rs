use std::time::Duration;

use actix_web::http::header::AUTHORIZATION;
use actix_web::http::StatusCode;
use actix_web::test::TestRequest;
use backend_test_support::envelope::{assert_failure, assert_no_key, assert_success};
use backend_test_support::unique_helpers::unique_email;
use serde_json::{json, Value};
use ulid::Ulid;

use crate::common::send;
use crate::support::auth::bearer_header;
use crate::support::create_test_app;
use crate::support::factory::create_user;
use crate::support::test_state::{build_test_state, build_test_state_without_db, test_security};

fn ids(data: &Value) -> Vec<String> {
    data["users"]
        .as_array()
        .expect("users array")
        .iter()
        .map(|u| u["id"].as_str().unwrap().to_string())
        .collect()
}

#[actix_web::test]
async fn list_paginates_newest_first() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = state.db().unwrap().clone();
    let mut created = Vec::new();
    for i in 0..3 {
        let user = create_user(&db, &unique_email(&format!("page{i}")), None).await;
        created.push(user.id);
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = TestRequest::get()
        .uri("/api/v1/users?page=1&limit=2")
        .to_request();
    let reply = send(&app, req).await;
    let data = assert_success(reply.status, &reply.body, StatusCode::OK);

    assert_eq!(
        data["pagination"],
        json!({"page": 1, "limit": 2, "total": 3, "pages": 2})
    );
    assert_eq!(ids(&data), vec![created[2].clone(), created[1].clone()]);
    assert_no_key(&data, "passwordHash");

    let req = TestRequest::get()
        .uri("/api/v1/users?page=2&limit=2")
        .to_request();
    let reply = send(&app, req).await;
    let data = assert_success(reply.status, &reply.body, StatusCode::OK);
    assert_eq!(ids(&data), vec![created[0].clone()]);
    Ok(())
}

#[actix_web::test]
async fn bad_paging_values_fall_back() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await;

    let cases = [
        ("/api/v1/users?page=abc&limit=-5", 1, 10),
        ("/api/v1/users?page=0&limit=0", 1, 1),
        ("/api/v1/users?limit=1000", 1, 100),
        ("/api/v1/users", 1, 10),
    ];
    for (uri, page, limit) in cases {
        let reply = send(&app, TestRequest::get().uri(uri).to_request()).await;
        let data = assert_success(reply.status, &reply.body, StatusCode::OK);
        assert_eq!(data["pagination"]["page"], page, "{uri}");
        assert_eq!(data["pagination"]["limit"], limit, "{uri}");
        assert_eq!(data["pagination"]["total"], 0, "{uri}");
        assert_eq!(data["pagination"]["pages"], 0, "{uri}");
    }
    Ok(())
}

#[actix_web::test]
async fn search_matches_email_or_name_ignoring_case() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = state.db().unwrap().clone();
    create_user(&db, "alice@example.com", Some("Alice Smith")).await;
    create_user(&db, "bob@example.com", Some("Robert")).await;
    create_user(&db, "carol@smith.io", None).await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let total_for = |data: &Value| data["pagination"]["total"].as_u64().unwrap();

    let reply = send(&app, TestRequest::get().uri("/api/v1/users?search=SMITH").to_request()).await;
    assert_eq!(total_for(&assert_success(reply.status, &reply.body, StatusCode::OK)), 2);

    let reply = send(&app, TestRequest::get().uri("/api/v1/users?search=bob%40").to_request()).await;
    assert_eq!(total_for(&assert_success(reply.status, &reply.body, StatusCode::OK)), 1);

    let reply = send(&app, TestRequest::get().uri("/api/v1/users?search=%25").to_request()).await;
    assert_eq!(total_for(&assert_success(reply.status, &reply.body, StatusCode::OK)), 0);
    Ok(())
}

#[actix_web::test]
async fn get_by_id_found_and_missing() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let user = create_user(state.db().unwrap(), &unique_email("one"), Some("Only One")).await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = TestRequest::get()
        .uri(&format!("/api/v1/users/{}", user.id))
        .to_request();
    let reply = send(&app, req).await;
    let data = assert_success(reply.status, &reply.body, StatusCode::OK);
    assert_eq!(data["user"]["id"], user.id.as_str());
    assert!(data["user"]["updatedAt"].is_string());

    // Ids are case-insensitive on the way in.
    let req = TestRequest::get()
        .uri(&format!("/api/v1/users/{}", user.id.to_lowercase()))
        .to_request();
    let reply = send(&app, req).await;
    let data = assert_success(reply.status, &reply.body, StatusCode::OK);
    assert_eq!(data["user"]["id"], user.id.as_str());

    let req = TestRequest::get()
        .uri(&format!("/api/v1/users/{}", Ulid::new()))
        .to_request();
    let reply = send(&app, req).await;
    assert_failure(
        reply.status,
        &reply.headers,
        &reply.body,
        StatusCode::NOT_FOUND,
        "User not found",
    );
    Ok(())
}

#[actix_web::test]
async fn malformed_id_is_rejected_before_persistence() -> Result<(), Box<dyn std::error::Error>> {
    // No database: reaching the lookup would answer 500.
    let state = build_test_state_without_db().await?;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = TestRequest::get()
        .uri("/api/v1/users/not-a-valid-id")
        .to_request();
    let reply = send(&app, req).await;
    let error = assert_failure(
        reply.status,
        &reply.headers,
        &reply.body,
        StatusCode::BAD_REQUEST,
        "Validation failed",
    );
    assert_eq!(error.as_deref(), Some("Invalid ID format"));
    Ok(())
}

#[actix_web::test]
async fn update_profile_changes_name_only() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let user = create_user(state.db().unwrap(), &unique_email("upd"), Some("Old Name")).await;
    let app = create_test_app(state).with_prod_routes().build().await;
    let header = bearer_header(&user.id, &user.email, &test_security());

    let req = TestRequest::put()
        .uri("/api/v1/users/profile")
        .insert_header((AUTHORIZATION, header.clone()))
        .set_json(json!({"name": "New Name", "email": "hijack@example.com"}))
        .to_request();
    let reply = send(&app, req).await;
    let data = assert_success(reply.status, &reply.body, StatusCode::OK);
    let body: Value = serde_json::from_slice(&reply.body)?;
    assert_eq!(body["message"], "Profile updated successfully");
    assert_eq!(data["user"]["name"], "New Name");
    assert_eq!(data["user"]["email"], user.email.as_str());

    let req = TestRequest::put()
        .uri("/api/v1/users/profile")
        .insert_header((AUTHORIZATION, header))
        .set_json(json!({"name": "x".repeat(51)}))
        .to_request();
    let reply = send(&app, req).await;
    let error = assert_failure(
        reply.status,
        &reply.headers,
        &reply.body,
        StatusCode::BAD_REQUEST,
        "Validation failed",
    );
    assert_eq!(error.as_deref(), Some("Name cannot exceed 50 characters"));
    Ok(())
}

#[actix_web::test]
async fn profile_mutations_require_a_token() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await;

    let requests = [
        TestRequest::put()
            .uri("/api/v1/users/profile")
            .set_json(json!({"name": "Nobody"}))
            .to_request(),
        TestRequest::delete().uri("/api/v1/users/account").to_request(),
    ];
    for req in requests {
        let reply = send(&app, req).await;
        assert_failure(
            reply.status,
            &reply.headers,
            &reply.body,
            StatusCode::UNAUTHORIZED,
            "Access token required",
        );
    }
    Ok(())
}

#[actix_web::test]
async fn delete_account_removes_the_user() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let user = create_user(state.db().unwrap(), &unique_email("del"), None).await;
    let app = create_test_app(state).with_prod_routes().build().await;
    let header = bearer_header(&user.id, &user.email, &test_security());

    let req = TestRequest::delete()
        .uri("/api/v1/users/account")
        .insert_header((AUTHORIZATION, header))
        .to_request();
    let reply = send(&app, req).await;
    let data = assert_success(reply.status, &reply.body, StatusCode::OK);
    assert!(data.is_null());
    let body: Value = serde_json::from_slice(&reply.body)?;
    assert_eq!(body["message"], "Account deleted successfully");

    let req = TestRequest::get()
        .uri(&format!("/api/v1/users/{}", user.id))
        .to_request();
    let reply = send(&app, req).await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    Ok(())
}
