// Admin channel over a real socket.

use std::time::Duration;

use crate::support::build_test_state;
use crate::support::websocket::{admin_url, start_test_server};
use crate::support::websocket_client::WebSocketClient;

#[actix_web::test]
async fn admin_ping_gets_pong() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state(1).await?;
    let (server_handle, addr, server_join) = start_test_server(state).await?;

    let mut admin = WebSocketClient::connect_retry(&admin_url(addr), Duration::from_secs(1)).await?;
    admin.send("ping").await?;
    assert_eq!(admin.recv_json().await?, serde_json::json!({"msg_type": "pong"}));

    admin.close().await?;
    server_handle.stop(true).await;
    let _ = server_join.await;
    Ok(())
}

#[actix_web::test]
async fn status_creates_session_once_and_gamelink_returns_raw_link(
) -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state(1).await?;
    let registry = state.registry();
    let (server_handle, addr, server_join) = start_test_server(state).await?;

    let mut admin = WebSocketClient::connect_retry(&admin_url(addr), Duration::from_secs(1)).await?;
    admin.send("status/ABC123").await?;
    admin.send("status/ABC123").await?;
    admin.send("gamelink/ABC123").await?;

    // status has no reply, so the first frame is the link
    assert_eq!(admin.recv_text().await?, "http://localhost:8080/players/ABC123");
    assert_eq!(registry.len(), 1);
    assert!(registry.contains("ABC123"));

    admin.close().await?;
    server_handle.stop(true).await;
    let _ = server_join.await;
    Ok(())
}

#[actix_web::test]
async fn malformed_admin_command_closes_connection() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state(1).await?;
    let (server_handle, addr, server_join) = start_test_server(state).await?;

    let mut admin = WebSocketClient::connect_retry(&admin_url(addr), Duration::from_secs(1)).await?;
    admin.send("status").await?;
    assert!(admin.expect_closed().await?);

    // the server keeps serving other connections
    let mut other = WebSocketClient::connect_retry(&admin_url(addr), Duration::from_secs(1)).await?;
    other.send("ping").await?;
    assert_eq!(other.recv_json().await?["msg_type"], "pong");

    other.close().await?;
    server_handle.stop(true).await;
    let _ = server_join.await;
    Ok(())
}

#[actix_web::test]
async fn draw_for_unknown_session_closes_connection() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state(1).await?;
    let (server_handle, addr, server_join) = start_test_server(state).await?;

    let mut admin = WebSocketClient::connect_retry(&admin_url(addr), Duration::from_secs(1)).await?;
    admin.send("drawnumber/NOPE").await?;
    assert!(admin.expect_closed().await?);

    server_handle.stop(true).await;
    let _ = server_join.await;
    Ok(())
}
