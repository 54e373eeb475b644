//! Integration tests for administrator session endpoints

mod common;

use actix_web::{http::StatusCode, test};
use serde_json::Value;
use solar_core::domain::entities::user::Role;

use common::{bearer, TestContext};

#[actix_web::test]
async fn test_non_admin_is_forbidden() {
    let ctx = TestContext::new();
    let credentials = ctx.register("dealer@example.com", Role::Dealer).await;
    let app = test::init_service(ctx.app()).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/admin/sessions/purge")
        .insert_header(bearer(&credentials.access_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "forbidden");
}

#[actix_web::test]
async fn test_admin_endpoints_require_authentication() {
    let ctx = TestContext::new();
    let app = test::init_service(ctx.app()).await;

    let req = test::TestRequest::post().uri("/api/v1/admin/sessions/purge").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_admin_counts_active_sessions() {
    let ctx = TestContext::new();
    ctx.register("owner@example.com", Role::User).await;
    let owner_id = ctx.tokens.all().await[0].user_id;
    ctx.state
        .auth_service
        .login("owner@example.com", common::PASSWORD)
        .await
        .unwrap();
    let admin = ctx.admin().await;
    let app = test::init_service(ctx.app()).await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/admin/users/{owner_id}/sessions"))
        .insert_header(bearer(&admin.access_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["userId"], owner_id.to_string());
    assert_eq!(body["activeSessions"], 2);
}

#[actix_web::test]
async fn test_admin_purges_expired_sessions() {
    let ctx = TestContext::new();
    ctx.register("owner@example.com", Role::User).await;
    let owner_id = ctx.tokens.all().await[0].user_id;
    ctx.tokens.expire_user_tokens(owner_id).await;
    let admin = ctx.admin().await;
    let app = test::init_service(ctx.app()).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/admin/sessions/purge")
        .insert_header(bearer(&admin.access_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["purged"], 1);
    // The administrator's own session survives
    assert_eq!(ctx.tokens.len().await, 1);
}
