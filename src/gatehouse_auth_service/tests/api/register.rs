use serde_json::{Value, json};

use crate::helpers::{PASSWORD, TestApp, register_body};

#[tokio::test]
async fn should_return_201_with_profile_and_tokens() {
    let app = TestApp::spawn().await;

    let response = app
        .post_register(&register_body("alice@example.com", PASSWORD))
        .await;
    assert_eq!(response.status().as_u16(), 201);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["user"]["email"], "alice@example.com");
    assert_eq!(body["user"]["name"], "Alice");
    assert!(body["user"]["id"].is_string());
    assert!(body["user"].get("password").is_none());
    assert!(body["user"].get("password_hash").is_none());
    assert!(body["access_token"].is_string());
    assert!(body["refresh_token"].is_string());
}

#[tokio::test]
async fn should_return_409_if_email_already_exists() {
    let app = TestApp::spawn().await;
    app.register("alice@example.com").await;

    let response = app
        .post_register(&register_body("alice@example.com", PASSWORD))
        .await;

    assert_eq!(response.status().as_u16(), 409);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "User already exists");
}

#[tokio::test]
async fn should_return_409_if_user_name_is_taken() {
    let app = TestApp::spawn().await;
    let mut first = register_body("alice@example.com", PASSWORD);
    first["user_name"] = json!("alice");
    let mut second = register_body("other@example.com", PASSWORD);
    second["user_name"] = json!("alice");

    assert_eq!(app.post_register(&first).await.status().as_u16(), 201);
    assert_eq!(app.post_register(&second).await.status().as_u16(), 409);
}

#[tokio::test]
async fn should_return_400_if_invalid_input() {
    let app = TestApp::spawn().await;

    let test_cases = [
        register_body("not-an-email", PASSWORD),
        register_body("", PASSWORD),
        register_body("alice@example.com", "short"),
        json!({
            "name": "Alice",
            "email": "alice@example.com",
            "password": PASSWORD,
            "confirm_password": "Secret124!",
        }),
        json!({
            "name": "   ",
            "email": "alice@example.com",
            "password": PASSWORD,
            "confirm_password": PASSWORD,
        }),
        json!({
            "name": "Alice",
            "user_name": "a b",
            "email": "alice@example.com",
            "password": PASSWORD,
            "confirm_password": PASSWORD,
        }),
    ];

    for test_case in test_cases.iter() {
        let response = app.post_register(test_case).await;
        assert_eq!(
            response.status().as_u16(),
            400,
            "Failed for input: {:?}",
            test_case
        );
        let body: Value = response.json().await.unwrap();
        assert!(body["error"].is_string());
    }
}

#[tokio::test]
async fn should_return_400_if_malformed_body() {
    let app = TestApp::spawn().await;

    let test_cases = [
        json!({ "email": "alice@example.com" }),
        json!({ "name": "Alice", "password": PASSWORD, "confirm_password": PASSWORD }),
        json!({ "name": true, "email": 1, "password": [], "confirm_password": {} }),
    ];

    for test_case in test_cases.iter() {
        let response = app.post_register(test_case).await;
        assert_eq!(
            response.status().as_u16(),
            400,
            "Failed for input: {:?}",
            test_case
        );
    }
}
