//! Player connection actor: joins, sheets and per-draw results.

use std::time::{Duration, Instant};

use actix::prelude::*;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::errors::DomainError;
use crate::services::game_flow;
use crate::state::app_state::AppState;
use crate::ws::events::PlayerEvent;
use crate::ws::protocol::{PlayerCommand, PlayerMsg};

pub async fn upgrade(
    req: HttpRequest,
    stream: web::Payload,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    ws::start(PlayerWsSession::new(app_state), &req, stream)
}

pub struct PlayerWsSession {
    conn_id: Uuid,
    app_state: web::Data<AppState>,
    heartbeat_interval: Duration,
    client_timeout: Duration,
    last_heartbeat: Instant,
    /// `(session_id, name)` once joined.
    joined: Option<(String, String)>,
}

impl PlayerWsSession {
    fn new(app_state: web::Data<AppState>) -> Self {
        let config = app_state.config();
        Self {
            conn_id: Uuid::new_v4(),
            heartbeat_interval: config.heartbeat_interval,
            client_timeout: config.client_timeout,
            app_state,
            last_heartbeat: Instant::now(),
            joined: None,
        }
    }

    fn send_json(ctx: &mut ws::WebsocketContext<Self>, msg: &PlayerMsg) {
        match serde_json::to_string(msg) {
            Ok(payload) => ctx.text(payload),
            Err(err) => warn!(error = %err, "[WS PLAYER] failed to serialize outbound message"),
        }
    }

    fn close(ctx: &mut ws::WebsocketContext<Self>, code: ws::CloseCode) {
        ctx.close(Some(ws::CloseReason::from(code)));
        ctx.stop();
    }

    fn start_heartbeat(&self, ctx: &mut ws::WebsocketContext<Self>) {
        let timeout = self.client_timeout;
        ctx.run_interval(self.heartbeat_interval, move |actor, ctx| {
            if Instant::now().duration_since(actor.last_heartbeat) > timeout {
                warn!(conn_id = %actor.conn_id, "[WS PLAYER] heartbeat timed out");
                Self::close(ctx, ws::CloseCode::Normal);
                return;
            }
            ctx.ping(b"keepalive");
        });
    }

    fn handle_command(&mut self, cmd: PlayerCommand, ctx: &mut ws::WebsocketContext<Self>) {
        match cmd {
            PlayerCommand::Ping => Self::send_json(ctx, &PlayerMsg::Pong),

            PlayerCommand::Add { session_id, name } => {
                let app_state = self.app_state.clone();
                let connection = ctx.address().recipient::<PlayerEvent>().downgrade();

                // Blocks the mailbox so the sheet goes out before any draw
                // that was queued after the commit.
                ctx.wait(
                    async move {
                        let res =
                            game_flow::join_player(&app_state, &session_id, &name, Some(connection))
                                .await;
                        (session_id, name, res)
                    }
                    .into_actor(self)
                    .map(|(session_id, name, res), actor, ctx| match res {
                        Ok(sheet) => {
                            info!(
                                conn_id = %actor.conn_id,
                                session_id = %session_id,
                                player = %name,
                                sheet_id = sheet.id(),
                                required = sheet.required_matches(),
                                "[WS PLAYER] sheet issued"
                            );
                            actor.joined = Some((session_id, name));
                            Self::send_json(
                                ctx,
                                &PlayerMsg::PlayerSheet {
                                    player_sheet: *sheet.columns(),
                                },
                            );
                        }
                        Err(err) => {
                            match &err {
                                DomainError::Infra(..) => error!(
                                    conn_id = %actor.conn_id,
                                    session_id = %session_id,
                                    error = %err,
                                    "[WS PLAYER] join failed"
                                ),
                                _ => warn!(
                                    conn_id = %actor.conn_id,
                                    session_id = %session_id,
                                    player = %name,
                                    error = %err,
                                    "[WS PLAYER] join rejected"
                                ),
                            }
                            Self::close(ctx, ws::CloseCode::Policy);
                        }
                    }),
                );
            }
        }
    }
}

impl Actor for PlayerWsSession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!(conn_id = %self.conn_id, "[WS PLAYER] started");
        self.start_heartbeat(ctx);
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        match &self.joined {
            Some((session_id, name)) => info!(
                conn_id = %self.conn_id,
                session_id = %session_id,
                player = %name,
                "[WS PLAYER] stopped"
            ),
            None => info!(conn_id = %self.conn_id, "[WS PLAYER] stopped"),
        }
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for PlayerWsSession {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(payload)) => {
                self.last_heartbeat = Instant::now();
                ctx.pong(&payload);
            }
            Ok(ws::Message::Pong(_)) => {
                self.last_heartbeat = Instant::now();
            }
            Ok(ws::Message::Text(text)) => {
                self.last_heartbeat = Instant::now();
                match text.parse::<PlayerCommand>() {
                    Ok(cmd) => self.handle_command(cmd, ctx),
                    Err(err) => {
                        warn!(conn_id = %self.conn_id, error = %err, "[WS PLAYER] malformed command");
                        Self::close(ctx, ws::CloseCode::Policy);
                    }
                }
            }
            Ok(ws::Message::Binary(_)) => {
                warn!(conn_id = %self.conn_id, "[WS PLAYER] binary frames not supported");
                Self::close(ctx, ws::CloseCode::Unsupported);
            }
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Ok(ws::Message::Continuation(_)) | Ok(ws::Message::Nop) => {
                self.last_heartbeat = Instant::now();
            }
            Err(err) => {
                warn!(conn_id = %self.conn_id, error = %err, "[WS PLAYER] protocol error");
                Self::close(ctx, ws::CloseCode::Error);
            }
        }
    }
}

impl Handler<PlayerEvent> for PlayerWsSession {
    type Result = ();

    fn handle(&mut self, msg: PlayerEvent, ctx: &mut Self::Context) -> Self::Result {
        let (col, row) = msg.matched.unwrap_or((0, 0));
        if msg.matched.is_some() {
            debug!(
                conn_id = %self.conn_id,
                session_id = %msg.session_id,
                draw = msg.number,
                col,
                row,
                "[WS PLAYER] match"
            );
        }
        Self::send_json(
            ctx,
            &PlayerMsg::DrawNumber {
                draw_number: msg.number,
                matched: msg.matched.is_some(),
                col,
                row,
                winner: msg.winner.is_some(),
                new_player: msg.winner.unwrap_or_default(),
            },
        );
    }
}
