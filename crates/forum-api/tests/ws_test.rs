//! WebSocket upgrade and transport over a real socket.

mod helpers;

use std::net::SocketAddr;
use std::time::Duration;

use futures::{SinkExt, StreamExt};
use serde_json::{Value, json};
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

use forum_core::types::UserId;
use helpers::TestApp;

type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

async fn serve(app: &TestApp) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let router = app.router.clone();
    tokio::spawn(async move { axum::serve(listener, router).await });
    addr
}

async fn open(addr: SocketAddr, token: &str) -> Client {
    let (socket, _) = connect_async(format!("ws://{addr}/ws?token={token}"))
        .await
        .expect("websocket upgrade");
    socket
}

/// Next text frame, parsed; control frames are skipped.
async fn next_json(socket: &mut Client) -> Value {
    loop {
        let message = tokio::time::timeout(Duration::from_secs(5), socket.next())
            .await
            .expect("timed out waiting for a frame")
            .expect("socket closed")
            .expect("socket error");
        if let Message::Text(text) = message {
            return serde_json::from_str(text.as_str()).expect("frame is JSON");
        }
    }
}

async fn wait_offline(app: &TestApp, user: UserId) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while app.state.realtime.connections.is_online(&user) {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("user was never unregistered");
}

#[tokio::test]
async fn test_ws_session_round_trip() {
    let app = TestApp::new().await;
    let (alice, token) = app.create_user("alice").await;
    let (bob, _) = app.create_user("bob").await;
    let addr = serve(&app).await;

    let mut socket = open(addr, &token).await;

    let roster = next_json(&mut socket).await;
    assert_eq!(roster["type"], "user_list");
    assert_eq!(roster["payload"][0]["id"], bob.to_string());
    assert_eq!(roster["payload"][0]["online"], false);
    assert!(app.state.realtime.connections.is_online(&alice));

    // Control and binary frames do not end the session.
    socket
        .send(Message::Ping(vec![1u8].into()))
        .await
        .expect("ping");
    socket
        .send(Message::binary(vec![0u8, 1, 2]))
        .await
        .expect("binary");

    let frame = json!({
        "type": "send_message",
        "payload": { "receiver_id": bob.to_string(), "content": "over the wire" }
    });
    socket
        .send(Message::text(frame.to_string()))
        .await
        .expect("send_message");

    let echoed = loop {
        let frame = next_json(&mut socket).await;
        if frame["type"] == "new_message" {
            break frame;
        }
    };
    assert_eq!(echoed["payload"]["content"], "over the wire");
    assert_eq!(echoed["payload"]["sender_id"], alice.to_string());

    socket.close(None).await.expect("close");
    wait_offline(&app, alice).await;
}

#[tokio::test]
async fn test_ws_dropped_socket_unregisters_user() {
    let app = TestApp::new().await;
    let (alice, token) = app.create_user("alice").await;
    let addr = serve(&app).await;

    let mut socket = open(addr, &token).await;
    assert_eq!(next_json(&mut socket).await["type"], "user_list");

    drop(socket);
    wait_offline(&app, alice).await;
}

#[tokio::test]
async fn test_ws_shutdown_closes_socket() {
    let app = TestApp::new().await;
    let (_alice, token) = app.create_user("alice").await;
    let addr = serve(&app).await;

    let mut socket = open(addr, &token).await;
    assert_eq!(next_json(&mut socket).await["type"], "user_list");

    app.state.realtime.shutdown();

    let ended = tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            match socket.next().await {
                Some(Ok(Message::Close(_))) | None | Some(Err(_)) => break,
                Some(Ok(_)) => continue,
            }
        }
    })
    .await;
    assert!(ended.is_ok(), "server never closed the socket");
}
