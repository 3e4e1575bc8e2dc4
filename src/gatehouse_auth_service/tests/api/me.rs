use serde_json::Value;

use crate::helpers::{TestApp, token};

#[tokio::test]
async fn should_return_the_callers_profile() {
    let app = TestApp::spawn().await;
    let registered = app.register("alice@example.com").await;

    let response = app
        .get_authorized("/me", &token(&registered, "access_token"))
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let profile: Value = response.json().await.unwrap();
    assert_eq!(profile, registered["user"]);
}

#[tokio::test]
async fn should_return_401_for_garbage_token() {
    let app = TestApp::spawn().await;

    let response = app.get_authorized("/me", "not-a-token").await;

    assert_eq!(response.status().as_u16(), 401);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn should_return_401_for_refresh_token() {
    let app = TestApp::spawn().await;
    let registered = app.register("alice@example.com").await;

    let response = app
        .get_authorized("/me", &token(&registered, "refresh_token"))
        .await;

    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn should_return_401_once_the_token_expires() {
    let app = TestApp::builder().access_token_ttl(1).spawn().await;
    let registered = app.register("alice@example.com").await;
    let access_token = token(&registered, "access_token");

    tokio::time::sleep(std::time::Duration::from_millis(2100)).await;
    let response = app.get_authorized("/me", &access_token).await;

    assert_eq!(response.status().as_u16(), 401);
}
