// Admin and players together: join notices, draws and the winner.

use std::time::Duration;

use crate::support::build_test_state;
use crate::support::state_helpers::{build_test_state_with, center_only_config};
use crate::support::websocket::{admin_url, player_url, start_test_server};
use crate::support::websocket_client::WebSocketClient;

#[actix_web::test]
async fn join_then_draw_reaches_both_sides() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state(42).await?;
    let (server_handle, addr, server_join) = start_test_server(state).await?;

    let mut admin = WebSocketClient::connect_retry(&admin_url(addr), Duration::from_secs(1)).await?;
    admin.send("status/GAME").await?;
    admin.send("ping").await?;
    assert_eq!(admin.recv_json().await?["msg_type"], "pong");

    let mut player =
        WebSocketClient::connect_retry(&player_url(addr), Duration::from_secs(1)).await?;
    player.send("add/GAME/Alice").await?;
    let sheet = player.recv_json().await?;
    assert_eq!(sheet["msg_type"], "player_sheet");

    let notice = admin.recv_json().await?;
    assert_eq!(
        notice,
        serde_json::json!({"msg_type": "new_player", "new_player": "Alice", "winner": false})
    );

    admin.send("drawnumber/GAME").await?;
    let admin_draw = admin.recv_json().await?;
    assert_eq!(admin_draw["msg_type"], "draw_number");
    let number = admin_draw["draw_number"].as_i64().expect("draw_number is a number");
    assert!((1..=75).contains(&number));

    let player_draw = player.recv_json().await?;
    assert_eq!(player_draw["msg_type"], "draw_number");
    assert_eq!(player_draw["draw_number"], number);
    assert_eq!(player_draw["winner"], false);
    assert_eq!(player_draw["new_player"], "");

    // match flag agrees with the sheet the player was given
    let on_sheet = sheet["player_sheet"]
        .as_array()
        .unwrap()
        .iter()
        .flat_map(|col| col.as_array().unwrap().iter())
        .any(|v| v.as_i64() == Some(number));
    assert_eq!(player_draw["match"], on_sheet);
    if on_sheet {
        let col = player_draw["col"].as_u64().unwrap() as usize;
        let row = player_draw["row"].as_u64().unwrap() as usize;
        assert_eq!(sheet["player_sheet"][col][row], number);
    }

    player.close().await?;
    admin.close().await?;
    server_handle.stop(true).await;
    let _ = server_join.await;
    Ok(())
}

#[actix_web::test]
async fn game_runs_to_a_winner() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state(7).await?;
    let registry = state.registry();
    let (server_handle, addr, server_join) = start_test_server(state).await?;

    let mut admin = WebSocketClient::connect_retry(&admin_url(addr), Duration::from_secs(1)).await?;
    admin.send("status/WIN").await?;
    admin.send("ping").await?;
    assert_eq!(admin.recv_json().await?["msg_type"], "pong");

    let mut player =
        WebSocketClient::connect_retry(&player_url(addr), Duration::from_secs(1)).await?;
    player.send("add/WIN/Solo").await?;
    assert_eq!(player.recv_json().await?["msg_type"], "player_sheet");
    assert_eq!(admin.recv_json().await?["msg_type"], "new_player");

    let mut winner = None;
    for _ in 0..75 {
        admin.send("next/WIN").await?;
        let draw = admin.recv_json().await?;
        assert_eq!(draw["msg_type"], "draw_number");

        let player_draw = player.recv_json().await?;
        assert_eq!(player_draw["draw_number"], draw["draw_number"]);

        if player_draw["winner"] == true {
            assert_eq!(player_draw["new_player"], "Solo");
            winner = Some(admin.recv_json().await?);
            break;
        }
    }

    let winner = winner.expect("a lone player always wins within 75 draws");
    assert_eq!(
        winner,
        serde_json::json!({
            "msg_type": "winner",
            "new_player": "Solo",
            "winner": true,
            "all_winners": ["Solo"]
        })
    );
    assert!(!registry.contains("WIN"));

    player.close().await?;
    admin.close().await?;
    server_handle.stop(true).await;
    let _ = server_join.await;
    Ok(())
}

#[actix_web::test]
async fn sheet_precedes_draws_when_join_races_draws() -> Result<(), Box<dyn std::error::Error>> {
    // center-only sheets need 24 numbers, so 11 draws can never end the game
    let state = build_test_state_with(23, center_only_config()).await?;
    let (server_handle, addr, server_join) = start_test_server(state).await?;

    let mut admin = WebSocketClient::connect_retry(&admin_url(addr), Duration::from_secs(1)).await?;
    admin.send("status/RACE").await?;
    admin.send("ping").await?;
    assert_eq!(admin.recv_json().await?["msg_type"], "pong");

    let mut player =
        WebSocketClient::connect_retry(&player_url(addr), Duration::from_secs(1)).await?;

    // pipeline draws without waiting and join in the middle of them
    for i in 0..10 {
        if i == 3 {
            player.send("add/RACE/Racer").await?;
        }
        admin.send("next/RACE").await?;
    }

    let mut drawn = Vec::new();
    let mut joined = false;
    while drawn.len() < 10 || !joined {
        let frame = admin.recv_json().await?;
        match frame["msg_type"].as_str() {
            Some("draw_number") => drawn.push(frame["draw_number"].as_i64().unwrap_or(-1)),
            Some("new_player") => joined = true,
            other => panic!("unexpected admin frame {other:?}"),
        }
    }

    // the join is committed now, so this draw must reach the player
    admin.send("next/RACE").await?;
    let closing = admin.recv_json().await?["draw_number"].as_i64().unwrap_or(-1);
    drawn.push(closing);

    let first = player.recv_json().await?;
    assert_eq!(first["msg_type"], "player_sheet", "sheet must be the first frame");

    let mut delivered = Vec::new();
    loop {
        let frame = player.recv_json().await?;
        assert_eq!(frame["msg_type"], "draw_number");
        let number = frame["draw_number"].as_i64().unwrap_or(-1);
        delivered.push(number);
        if number == closing {
            break;
        }
    }

    // exactly the draws after the commit point, in draw order
    let commit = drawn.len() - delivered.len();
    assert_eq!(&drawn[commit..], delivered.as_slice());

    player.close().await?;
    admin.close().await?;
    server_handle.stop(true).await;
    let _ = server_join.await;
    Ok(())
}
