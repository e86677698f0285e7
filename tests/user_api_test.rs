//! Integration tests for the `/users` endpoints.
//!
//! The routes run against the in-process storage, so no MongoDB instance is needed.

use std::sync::Arc;
use std::time::Duration;

use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_governor::Governor;
use actix_web::{middleware, test, web, App};
use async_trait::async_trait;
use serde_json::{json, Value};

use user_rest_api::config::RateLimitConfig;
use user_rest_api::core::context::OperationContext;
use user_rest_api::core::errors::AppResult;
use user_rest_api::domain::entities::users::User;
use user_rest_api::handlers::AppState;
use user_rest_api::middlewares;
use user_rest_api::repositories::users::{MemoryUserRepository, UserStorage};
use user_rest_api::routes::configure_all_routes;
use user_rest_api::services::users::UserService;

const ABSENT: &str = "507f1f77bcf86cd799439011";

// =============================================================================
// Test fixtures
// =============================================================================

fn memory_state() -> web::Data<AppState> {
    let service = UserService::new(Arc::new(MemoryUserRepository::new()), 4);
    web::Data::new(AppState::new(service, Duration::from_secs(5)))
}

/// Storage whose calls never complete
struct StalledStorage;

#[async_trait]
impl UserStorage for StalledStorage {
    async fn create(&self, ctx: &OperationContext, _user: &User) -> AppResult<String> {
        ctx.run("create user", std::future::pending()).await
    }

    async fn find_all(&self, ctx: &OperationContext) -> AppResult<Vec<User>> {
        ctx.run("find all users", std::future::pending()).await
    }

    async fn find_one(&self, ctx: &OperationContext, _id: &str) -> AppResult<User> {
        ctx.run("find user", std::future::pending()).await
    }

    async fn update(&self, ctx: &OperationContext, _user: &User) -> AppResult<()> {
        ctx.run("update user", std::future::pending()).await
    }

    async fn delete(&self, ctx: &OperationContext, _id: &str) -> AppResult<()> {
        ctx.run("delete user", std::future::pending()).await
    }
}

macro_rules! app {
    ($state:expr) => {
        test::init_service(App::new().app_data($state).configure(configure_all_routes)).await
    };
}

fn alice() -> Value {
    json!({"username": "alice", "password": "pw1", "email": "a@x.com"})
}

// =============================================================================
// Tests
// =============================================================================

#[actix_web::test]
async fn test_health_check() {
    let app = app!(memory_state());

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
}

#[actix_web::test]
async fn test_list_is_empty_initially() {
    let app = app!(memory_state());

    let resp = test::call_service(&app, test::TestRequest::get().uri("/users").to_request()).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!([]));
}

#[actix_web::test]
async fn test_crud_flow() {
    let app = app!(memory_state());

    // create
    let req = test::TestRequest::post().uri("/users").set_json(alice()).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(id.len(), 24);
    assert_eq!(created["username"], "alice");
    assert_eq!(created["email"], "a@x.com");

    // read
    let req = test::TestRequest::get().uri(&format!("/users/{}", id)).to_request();
    let found: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(found, created);

    // replace
    let req = test::TestRequest::put()
        .uri(&format!("/users/{}", id))
        .set_json(json!({"username": "alice2", "password": "pw2", "email": "a2@x.com"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let replaced: Value = test::read_body_json(resp).await;
    assert_eq!(replaced["username"], "alice2");
    assert_eq!(replaced["id"], id.as_str());

    // list
    let req = test::TestRequest::get().uri("/users").to_request();
    let users: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(users.as_array().unwrap().len(), 1);
    assert_eq!(users[0]["email"], "a2@x.com");

    // delete
    let req = test::TestRequest::delete().uri(&format!("/users/{}", id)).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get().uri(&format!("/users/{}", id)).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_patch_leaves_other_fields() {
    let app = app!(memory_state());

    let req = test::TestRequest::post().uri("/users").set_json(alice()).to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let id = created["id"].as_str().unwrap();

    let req = test::TestRequest::patch()
        .uri(&format!("/users/{}", id))
        .set_json(json!({"email": "new@x.com"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri(&format!("/users/{}", id)).to_request();
    let found: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(found["username"], "alice");
    assert_eq!(found["email"], "new@x.com");
}

#[actix_web::test]
async fn test_bodies_never_contain_password() {
    let app = app!(memory_state());

    let req = test::TestRequest::post().uri("/users").set_json(alice()).to_request();
    let created = test::call_and_read_body(&app, req).await;
    let text = String::from_utf8(created.to_vec()).unwrap();
    assert!(!text.contains("password"));
    assert!(!text.contains("pw1"));

    let req = test::TestRequest::get().uri("/users").to_request();
    let listed = test::call_and_read_body(&app, req).await;
    assert!(!String::from_utf8(listed.to_vec()).unwrap().contains("password"));
}

#[actix_web::test]
async fn test_absent_id_is_404() {
    let app = app!(memory_state());

    for req in [
        test::TestRequest::get().uri(&format!("/users/{}", ABSENT)).to_request(),
        test::TestRequest::delete().uri(&format!("/users/{}", ABSENT)).to_request(),
        test::TestRequest::patch()
            .uri(&format!("/users/{}", ABSENT))
            .set_json(json!({"email": "x@x.com"}))
            .to_request(),
        test::TestRequest::put()
            .uri(&format!("/users/{}", ABSENT))
            .set_json(alice())
            .to_request(),
    ] {
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["kind"], "not_found");
    }
}

#[actix_web::test]
async fn test_malformed_id_is_400() {
    let app = app!(memory_state());

    let req = test::TestRequest::get().uri("/users/not-an-id").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["kind"], "malformed_identifier");
    assert!(body["error"].as_str().unwrap().contains("not-an-id"));
}

#[actix_web::test]
async fn test_malformed_json_is_400() {
    let app = app!(memory_state());

    let req = test::TestRequest::post()
        .uri("/users")
        .insert_header(ContentType::json())
        .set_payload("{\"username\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["kind"], "validation_error");
}

#[actix_web::test]
async fn test_request_deadline_is_504() {
    let service = UserService::new(Arc::new(StalledStorage), 4);
    let state = web::Data::new(AppState::new(service, Duration::from_millis(50)));
    let app = app!(state);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/users").to_request()).await;

    assert_eq!(resp.status(), StatusCode::GATEWAY_TIMEOUT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["kind"], "deadline_exceeded");
}

#[actix_web::test]
async fn test_middleware_stack_limits_per_peer() {
    let governor_conf = middlewares::governor_config(&RateLimitConfig { per_second: 1, burst_size: 2 }).unwrap();
    let app = test::init_service(
        App::new()
            .app_data(memory_state())
            .wrap(Governor::new(&governor_conf))
            .wrap(middlewares::cors())
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(configure_all_routes),
    )
    .await;

    // No peer address, as on the unix socket listener
    let resp = test::call_service(&app, test::TestRequest::get().uri("/users/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key("x-ratelimit-remaining"));
    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);

    // A TCP peer gets its own bucket
    let peer = "10.0.0.7:5123".parse().unwrap();
    let req = test::TestRequest::get().uri("/users").peer_addr(peer).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}
