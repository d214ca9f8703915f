//! Integration tests for the HTTP surface.

mod helpers;

use axum::http::StatusCode;

use helpers::TestApp;

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;

    let response = app.get("/api/health", &[]).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ok");

    let detailed = app.get("/api/health/detailed", &[]).await;
    assert_eq!(detailed.status, StatusCode::OK);
    assert_eq!(detailed.body["data"]["database"], "connected");
    assert_eq!(detailed.body["data"]["online_users"], 0);
}

#[tokio::test]
async fn test_ws_rejects_unknown_session_before_upgrade() {
    let app = TestApp::new().await;

    let missing = app.get("/ws", &[]).await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);

    let unknown = app.get("/ws?token=nope", &[]).await;
    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.body["error"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_users_lists_everyone_but_caller() {
    let app = TestApp::new().await;
    let (_carol, _) = app.create_user("carol").await;
    let (_alice, alice_token) = app.create_user("alice").await;
    let (_bob, _) = app.create_user("bob").await;

    let unauthorized = app.get("/api/users", &[]).await;
    assert_eq!(unauthorized.status, StatusCode::UNAUTHORIZED);

    let response = app
        .get("/api/users", &[("x-session-token", alice_token.as_str())])
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let names: Vec<&str> = response.body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["nickname"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["bob", "carol"]);
}

#[tokio::test]
async fn test_session_cookie_and_fallthrough() {
    let app = TestApp::new().await;
    let (_alice, alice_token) = app.create_user("alice").await;
    app.create_user("bob").await;

    let cookie = format!("session_token={alice_token}");
    let via_cookie = app.get("/api/users", &[("cookie", cookie.as_str())]).await;
    assert_eq!(via_cookie.status, StatusCode::OK);

    // A stale header token falls through to the next source.
    let fallthrough = app
        .get(
            &format!("/api/users?token={alice_token}"),
            &[("x-session-token", "stale")],
        )
        .await;
    assert_eq!(fallthrough.status, StatusCode::OK);
}

#[tokio::test]
async fn test_conversation_history() {
    let app = TestApp::new().await;
    let (alice, token) = app.create_user("alice").await;
    let (bob, _) = app.create_user("bob").await;

    for i in 0..12 {
        let (from, to) = if i % 2 == 0 { (alice, bob) } else { (bob, alice) };
        app.store_message(from, to, &format!("m{i}")).await;
    }

    let auth = [("x-session-token", token.as_str())];

    let missing = app.get("/api/messages", &auth).await;
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);

    let bad = app.get("/api/messages?with=bob", &auth).await;
    assert_eq!(bad.status, StatusCode::BAD_REQUEST);

    let latest = app.get(&format!("/api/messages?with={bob}"), &auth).await;
    assert_eq!(latest.status, StatusCode::OK);
    let page = latest.body["data"].as_array().unwrap();
    assert_eq!(page.len(), 10);
    assert_eq!(page.first().unwrap()["content"], "m2");
    assert_eq!(page.last().unwrap()["content"], "m11");
    assert_eq!(page.last().unwrap()["sender_name"], "bob");

    let older = app
        .get(&format!("/api/messages?with={bob}&offset=10"), &auth)
        .await;
    let page = older.body["data"].as_array().unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(page[0]["content"], "m0");

    let unauthorized = app.get(&format!("/api/messages?with={bob}"), &[]).await;
    assert_eq!(unauthorized.status, StatusCode::UNAUTHORIZED);
}
