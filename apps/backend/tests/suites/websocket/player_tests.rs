// Player channel over a real socket.

use std::time::Duration;

use crate::support::build_test_state;
use crate::support::websocket::{admin_url, player_url, start_test_server};
use crate::support::websocket_client::WebSocketClient;

#[actix_web::test]
async fn player_ping_gets_pong() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state(1).await?;
    let (server_handle, addr, server_join) = start_test_server(state).await?;

    let mut player =
        WebSocketClient::connect_retry(&player_url(addr), Duration::from_secs(1)).await?;
    player.send("ping").await?;
    assert_eq!(player.recv_json().await?, serde_json::json!({"msg_type": "pong"}));

    player.close().await?;
    server_handle.stop(true).await;
    let _ = server_join.await;
    Ok(())
}

#[actix_web::test]
async fn add_returns_sheet_with_wildcard_center() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state(2).await?;
    let (server_handle, addr, server_join) = start_test_server(state).await?;

    let mut admin = WebSocketClient::connect_retry(&admin_url(addr), Duration::from_secs(1)).await?;
    admin.send("status/S1").await?;
    admin.send("ping").await?;
    admin.recv_json().await?; // status processed once pong arrives

    let mut player =
        WebSocketClient::connect_retry(&player_url(addr), Duration::from_secs(1)).await?;
    player.send("add/S1/Alice").await?;
    let msg = player.recv_json().await?;
    assert_eq!(msg["msg_type"], "player_sheet");

    let grid = msg["player_sheet"].as_array().expect("grid is an array");
    assert_eq!(grid.len(), 5);
    assert_eq!(grid[2][2], -1);
    for (col, column) in grid.iter().enumerate() {
        let column = column.as_array().expect("column is an array");
        assert_eq!(column.len(), 5);
        let low = (col as i64 * 15).max(1);
        for value in column.iter().filter_map(|v| v.as_i64()).filter(|v| *v != -1) {
            assert!((low..col as i64 * 15 + 15).contains(&value));
        }
    }

    player.close().await?;
    admin.close().await?;
    server_handle.stop(true).await;
    let _ = server_join.await;
    Ok(())
}

#[actix_web::test]
async fn add_to_unknown_session_closes_connection() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state(1).await?;
    let (server_handle, addr, server_join) = start_test_server(state).await?;

    let mut player =
        WebSocketClient::connect_retry(&player_url(addr), Duration::from_secs(1)).await?;
    player.send("add/GHOST/Alice").await?;
    assert!(player.expect_closed().await?);

    server_handle.stop(true).await;
    let _ = server_join.await;
    Ok(())
}

#[actix_web::test]
async fn malformed_add_closes_connection() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state(1).await?;
    let (server_handle, addr, server_join) = start_test_server(state).await?;

    let mut player =
        WebSocketClient::connect_retry(&player_url(addr), Duration::from_secs(1)).await?;
    player.send("add/S1").await?;
    assert!(player.expect_closed().await?);

    server_handle.stop(true).await;
    let _ = server_join.await;
    Ok(())
}
