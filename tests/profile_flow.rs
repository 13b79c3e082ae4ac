mod common;

use actix_web::{
    http::{header, StatusCode},
    test,
};
use common::{client::TestClient, TestContext};
use hospital_backend::accounts::check_password;
use serde_json::json;

const ME_URL: &str = "/users/me";

#[actix_web::test]
async fn test_retrieve_user_unauthorized() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(&ctx);
    let app = test::init_service(client.create_app()).await;

    let req = test::TestRequest::get().uri(ME_URL).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body = test::read_body(resp).await;
    assert!(body.is_empty());
}

#[actix_web::test]
async fn test_unknown_token_is_unauthorized() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(&ctx);
    let app = test::init_service(client.create_app()).await;

    let req = test::TestRequest::get()
        .uri(ME_URL)
        .insert_header(("Authorization", "Bearer tok_doesnotexist"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    assert_eq!(
        resp.headers().get(header::WWW_AUTHENTICATE).and_then(|v| v.to_str().ok()),
        Some("Bearer")
    );

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "UNAUTHORIZED");
    assert!(body.get("email").is_none());
}

#[actix_web::test]
async fn test_retrieve_profile_success() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(&ctx);
    let app = test::init_service(client.create_app()).await;

    let (_user, token) = client.create_logged_in_user(&app, "test@example.com").await;

    let req = test::TestRequest::get()
        .uri(ME_URL)
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "email": "test@example.com", "name": "Test user" }));
}

#[actix_web::test]
async fn test_post_me_not_allowed() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(&ctx);
    let app = test::init_service(client.create_app()).await;

    let (_user, token) = client.create_logged_in_user(&app, "test@example.com").await;

    let req = test::TestRequest::post()
        .uri(ME_URL)
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[actix_web::test]
async fn test_update_user_profile() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(&ctx);
    let app = test::init_service(client.create_app()).await;

    let (user, token) = client.create_logged_in_user(&app, "test@example.com").await;

    let req = test::TestRequest::patch()
        .uri(ME_URL)
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({ "name": "Updated name", "password": "newpass" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "email": "test@example.com", "name": "Updated name" }));

    let reloaded = ctx.db.get_user_by_id(&user.id).await.unwrap();
    assert_eq!(reloaded.name, "Updated name");
    assert!(check_password(ctx.auth.hasher.as_ref(), &reloaded, "newpass"));
    assert!(!check_password(ctx.auth.hasher.as_ref(), &reloaded, "pasword221"));
}

#[actix_web::test]
async fn test_partial_update_leaves_other_fields() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(&ctx);
    let app = test::init_service(client.create_app()).await;

    let (user, token) = client.create_logged_in_user(&app, "test@example.com").await;

    // email and flags are not writable through this path
    let req = test::TestRequest::patch()
        .uri(ME_URL)
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({ "password": "newpass", "email": "other@example.com", "is_superuser": true }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let reloaded = ctx.db.get_user_by_id(&user.id).await.unwrap();
    assert_eq!(reloaded.email, "test@example.com");
    assert_eq!(reloaded.name, "Test user");
    assert!(!reloaded.is_superuser);
    assert!(check_password(ctx.auth.hasher.as_ref(), &reloaded, "newpass"));
}

#[actix_web::test]
async fn test_update_with_short_password_rejected() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(&ctx);
    let app = test::init_service(client.create_app()).await;

    let (user, token) = client.create_logged_in_user(&app, "test@example.com").await;

    let req = test::TestRequest::patch()
        .uri(ME_URL)
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({ "password": "123" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let reloaded = ctx.db.get_user_by_id(&user.id).await.unwrap();
    assert!(check_password(ctx.auth.hasher.as_ref(), &reloaded, "pasword221"));
}

#[actix_web::test]
async fn test_update_with_oversized_name_rejected() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(&ctx);
    let app = test::init_service(client.create_app()).await;

    let (user, token) = client.create_logged_in_user(&app, "test@example.com").await;

    let req = test::TestRequest::patch()
        .uri(ME_URL)
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({ "name": "n".repeat(256), "password": "newpass" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["field"], "name");

    let reloaded = ctx.db.get_user_by_id(&user.id).await.unwrap();
    assert_eq!(reloaded.name, "Test user");
    assert!(check_password(ctx.auth.hasher.as_ref(), &reloaded, "pasword221"));
}
