use crate::helpers::{TestApp, token};

#[tokio::test]
async fn should_return_204_and_revoke_the_token() {
    let app = TestApp::spawn().await;
    let body = app.register("alice@example.com").await;
    let access_token = token(&body, "access_token");

    let response = app.post_logout(&access_token).await;
    assert_eq!(response.status().as_u16(), 204);

    let response = app.get_authorized("/me", &access_token).await;
    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn should_return_401_on_second_logout() {
    let app = TestApp::spawn().await;
    let body = app.register("alice@example.com").await;
    let access_token = token(&body, "access_token");

    assert_eq!(app.post_logout(&access_token).await.status().as_u16(), 204);
    assert_eq!(app.post_logout(&access_token).await.status().as_u16(), 401);
}

#[tokio::test]
async fn should_return_401_without_bearer_token() {
    let app = TestApp::spawn().await;

    let response = app
        .http_client
        .post(format!("{}/logout", app.address))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn should_return_401_for_malformed_authorization_header() {
    let app = TestApp::spawn().await;
    let body = app.register("alice@example.com").await;
    let access_token = token(&body, "access_token");

    let response = app
        .http_client
        .post(format!("{}/logout", app.address))
        .header("Authorization", format!("Token {access_token}"))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn should_leave_other_sessions_alone() {
    let app = TestApp::spawn().await;
    let registered = app.register("alice@example.com").await;
    let first = token(&registered, "access_token");
    let refreshed: serde_json::Value = app
        .post_refresh(&token(&registered, "refresh_token"))
        .await
        .json()
        .await
        .unwrap();
    let second = token(&refreshed, "access_token");

    assert_eq!(app.post_logout(&first).await.status().as_u16(), 204);

    assert_eq!(app.get_authorized("/me", &second).await.status().as_u16(), 200);
}

#[tokio::test]
async fn should_revoke_the_refresh_token_sent_in_the_body() {
    let app = TestApp::spawn().await;
    let body = app.register("alice@example.com").await;
    let access_token = token(&body, "access_token");
    let refresh_token = token(&body, "refresh_token");

    let response = app
        .post_logout_with_refresh(&access_token, &refresh_token)
        .await;
    assert_eq!(response.status().as_u16(), 204);

    assert_eq!(app.post_refresh(&refresh_token).await.status().as_u16(), 401);
    assert_eq!(
        app.get_authorized("/me", &access_token).await.status().as_u16(),
        401
    );
}

#[tokio::test]
async fn should_return_401_for_another_users_refresh_token() {
    let app = TestApp::spawn().await;
    let alice = app.register("alice@example.com").await;
    let bob = app.register("bob@example.com").await;
    let access_token = token(&alice, "access_token");
    let bobs_refresh_token = token(&bob, "refresh_token");

    let response = app
        .post_logout_with_refresh(&access_token, &bobs_refresh_token)
        .await;
    assert_eq!(response.status().as_u16(), 401);

    assert_eq!(
        app.get_authorized("/me", &access_token).await.status().as_u16(),
        200
    );
    assert_eq!(app.post_refresh(&bobs_refresh_token).await.status().as_u16(), 200);
}

#[tokio::test]
async fn should_return_400_for_malformed_body() {
    let app = TestApp::spawn().await;
    let body = app.register("alice@example.com").await;
    let access_token = token(&body, "access_token");

    let response = app
        .http_client
        .post(format!("{}/logout", app.address))
        .bearer_auth(&access_token)
        .header("Content-Type", "application/json")
        .body("{ not json")
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(response.status().as_u16(), 400);
}
