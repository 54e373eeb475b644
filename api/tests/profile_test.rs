//! Integration tests for profile endpoints

mod common;

use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};
use solar_core::domain::entities::user::Role;

use common::{bearer, TestContext};

#[actix_web::test]
async fn test_get_profile_after_registration() {
    let ctx = TestContext::new();
    let credentials = ctx.register("dealer@example.com", Role::Dealer).await;
    let app = test::init_service(ctx.app()).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/profile")
        .insert_header(bearer(&credentials.access_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["displayName"], "Test Account");
    assert_eq!(body["companyName"], "Bright Panels Pty Ltd");
    assert!(body["phone"].is_null());
}

#[actix_web::test]
async fn test_update_profile_partial() {
    let ctx = TestContext::new();
    let credentials = ctx.register("owner@example.com", Role::User).await;
    let app = test::init_service(ctx.app()).await;

    let req = test::TestRequest::put()
        .uri("/api/v1/profile")
        .insert_header(bearer(&credentials.access_token))
        .set_json(json!({ "phone": "+61 400 123 456", "address": "1 Sun Street" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["displayName"], "Test Account");
    assert_eq!(body["phone"], "+61 400 123 456");
    assert_eq!(body["address"], "1 Sun Street");
}

#[actix_web::test]
async fn test_company_name_only_for_dealers() {
    let ctx = TestContext::new();
    let credentials = ctx.register("owner@example.com", Role::User).await;
    let app = test::init_service(ctx.app()).await;

    let req = test::TestRequest::put()
        .uri("/api/v1/profile")
        .insert_header(bearer(&credentials.access_token))
        .set_json(json!({ "companyName": "Not A Dealer Ltd" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "validation_error");
    assert!(body["details"]["companyName"].is_array());
}

#[actix_web::test]
async fn test_invalid_phone_rejected() {
    let ctx = TestContext::new();
    let credentials = ctx.register("owner@example.com", Role::User).await;
    let app = test::init_service(ctx.app()).await;

    let req = test::TestRequest::put()
        .uri("/api/v1/profile")
        .insert_header(bearer(&credentials.access_token))
        .set_json(json!({ "phone": "call me maybe" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_admin_has_no_profile() {
    let ctx = TestContext::new();
    let admin = ctx.admin().await;
    let app = test::init_service(ctx.app()).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/profile")
        .insert_header(bearer(&admin.access_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_profile_requires_authentication() {
    let ctx = TestContext::new();
    let app = test::init_service(ctx.app()).await;

    let req = test::TestRequest::get().uri("/api/v1/profile").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
