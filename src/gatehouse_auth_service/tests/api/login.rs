use serde_json::{Value, json};

use crate::helpers::{PASSWORD, TestApp, login_body, register_body};

#[tokio::test]
async fn should_return_200_with_tokens_for_valid_credentials() {
    let app = TestApp::spawn().await;
    app.register("alice@example.com").await;

    let response = app
        .post_login(&login_body("alice@example.com", PASSWORD))
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["user"]["email"], "alice@example.com");
    assert!(body["access_token"].is_string());
    assert!(body["refresh_token"].is_string());
}

#[tokio::test]
async fn should_accept_user_name_as_identifier() {
    let app = TestApp::spawn().await;
    let mut body = register_body("alice@example.com", PASSWORD);
    body["user_name"] = json!("alice");
    assert_eq!(app.post_register(&body).await.status().as_u16(), 201);

    let response = app.post_login(&login_body("alice", PASSWORD)).await;
    assert_eq!(response.status().as_u16(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["user"]["user_name"], "alice");
    assert_eq!(body["user"]["email"], "alice@example.com");
}

#[tokio::test]
async fn should_return_401_for_wrong_password() {
    let app = TestApp::spawn().await;
    app.register("alice@example.com").await;

    let response = app
        .post_login(&login_body("alice@example.com", "Wrong123!"))
        .await;

    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn should_return_401_for_unknown_user() {
    let app = TestApp::spawn().await;

    let response = app
        .post_login(&login_body("ghost@example.com", PASSWORD))
        .await;

    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn should_return_400_for_missing_fields() {
    let app = TestApp::spawn().await;

    let test_cases = [
        json!({ "identifier": "alice@example.com" }),
        json!({ "password": PASSWORD }),
        json!({ "identifier": "alice@example.com", "password": "" }),
    ];

    for test_case in test_cases.iter() {
        let response = app.post_login(test_case).await;
        assert_eq!(
            response.status().as_u16(),
            400,
            "Failed for input: {:?}",
            test_case
        );
    }
}
