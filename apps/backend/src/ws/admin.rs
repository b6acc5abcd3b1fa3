//! Admin connection actor: session lifecycle and draws.

use std::time::{Duration, Instant};

use actix::prelude::*;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::errors::DomainError;
use crate::services::game_flow::{self, DrawOutcome};
use crate::state::app_state::AppState;
use crate::ws::events::AdminEvent;
use crate::ws::protocol::{AdminCommand, AdminMsg};

pub async fn upgrade(
    req: HttpRequest,
    stream: web::Payload,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    ws::start(AdminWsSession::new(app_state), &req, stream)
}

pub struct AdminWsSession {
    conn_id: Uuid,
    app_state: web::Data<AppState>,
    heartbeat_interval: Duration,
    client_timeout: Duration,
    last_heartbeat: Instant,
}

impl AdminWsSession {
    fn new(app_state: web::Data<AppState>) -> Self {
        let config = app_state.config();
        Self {
            conn_id: Uuid::new_v4(),
            heartbeat_interval: config.heartbeat_interval,
            client_timeout: config.client_timeout,
            app_state,
            last_heartbeat: Instant::now(),
        }
    }

    fn send_json(ctx: &mut ws::WebsocketContext<Self>, msg: &AdminMsg) {
        match serde_json::to_string(msg) {
            Ok(payload) => ctx.text(payload),
            Err(err) => warn!(error = %err, "[WS ADMIN] failed to serialize outbound message"),
        }
    }

    fn close(ctx: &mut ws::WebsocketContext<Self>, code: ws::CloseCode) {
        ctx.close(Some(ws::CloseReason::from(code)));
        ctx.stop();
    }

    fn close_on_error(&self, ctx: &mut ws::WebsocketContext<Self>, err: &DomainError) {
        match err {
            DomainError::Infra(..) => {
                error!(conn_id = %self.conn_id, error = %err, "[WS ADMIN] command failed")
            }
            _ => warn!(conn_id = %self.conn_id, error = %err, "[WS ADMIN] command rejected"),
        }
        Self::close(ctx, ws::CloseCode::Policy);
    }

    fn start_heartbeat(&self, ctx: &mut ws::WebsocketContext<Self>) {
        let timeout = self.client_timeout;
        ctx.run_interval(self.heartbeat_interval, move |actor, ctx| {
            if Instant::now().duration_since(actor.last_heartbeat) > timeout {
                warn!(conn_id = %actor.conn_id, "[WS ADMIN] heartbeat timed out");
                Self::close(ctx, ws::CloseCode::Normal);
                return;
            }
            ctx.ping(b"keepalive");
        });
    }

    fn handle_command(&mut self, cmd: AdminCommand, ctx: &mut ws::WebsocketContext<Self>) {
        let app_state = self.app_state.clone();
        let conn_id = self.conn_id;

        match cmd {
            AdminCommand::Ping => Self::send_json(ctx, &AdminMsg::Pong),

            AdminCommand::Status { session_id } => {
                let watcher = ctx.address().recipient::<AdminEvent>().downgrade();
                ctx.wait(
                    async move {
                        game_flow::open_session(&app_state, &session_id, conn_id, watcher).await
                    }
                    .into_actor(self)
                    .map(|res, actor, ctx| {
                        if let Err(err) = res {
                            actor.close_on_error(ctx, &err);
                        }
                    }),
                );
            }

            AdminCommand::GameLink { session_id } => {
                match game_flow::game_link(&app_state, &session_id) {
                    Ok(link) => ctx.text(link),
                    Err(err) => self.close_on_error(ctx, &err),
                }
            }

            AdminCommand::Draw { token, session_id } => {
                ctx.wait(
                    async move {
                        let outcome =
                            game_flow::draw_next(&app_state, &session_id, Some(conn_id)).await;
                        (session_id, token, outcome)
                    }
                    .into_actor(self)
                    .map(|(session_id, token, res), actor, ctx| match res {
                        Ok(DrawOutcome::Drawn { number, winner }) => {
                            info!(
                                conn_id = %actor.conn_id,
                                session_id = %session_id,
                                token = %token,
                                draw = number,
                                "[WS ADMIN] number drawn"
                            );
                            Self::send_json(ctx, &AdminMsg::DrawNumber { draw_number: number });
                            if let Some(audit) = winner {
                                Self::send_json(
                                    ctx,
                                    &AdminMsg::Winner {
                                        new_player: audit.declared,
                                        winner: true,
                                        all_winners: audit.qualifying,
                                    },
                                );
                            }
                        }
                        Ok(DrawOutcome::Exhausted) => {}
                        Err(err) => actor.close_on_error(ctx, &err),
                    }),
                );
            }
        }
    }
}

impl Actor for AdminWsSession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!(conn_id = %self.conn_id, "[WS ADMIN] started");
        self.start_heartbeat(ctx);
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        info!(conn_id = %self.conn_id, "[WS ADMIN] stopped");
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for AdminWsSession {
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
                match text.parse::<AdminCommand>() {
                    Ok(cmd) => self.handle_command(cmd, ctx),
                    Err(err) => {
                        warn!(conn_id = %self.conn_id, error = %err, "[WS ADMIN] malformed command");
                        Self::close(ctx, ws::CloseCode::Policy);
                    }
                }
            }
            Ok(ws::Message::Binary(_)) => {
                warn!(conn_id = %self.conn_id, "[WS ADMIN] binary frames not supported");
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
                warn!(conn_id = %self.conn_id, error = %err, "[WS ADMIN] protocol error");
                Self::close(ctx, ws::CloseCode::Error);
            }
        }
    }
}

impl Handler<AdminEvent> for AdminWsSession {
    type Result = ();

    fn handle(&mut self, msg: AdminEvent, ctx: &mut Self::Context) -> Self::Result {
        match msg {
            AdminEvent::NewPlayer { name, .. } => Self::send_json(
                ctx,
                &AdminMsg::NewPlayer {
                    new_player: name,
                    winner: false,
                },
            ),
            AdminEvent::Winner {
                name, all_winners, ..
            } => Self::send_json(
                ctx,
                &AdminMsg::Winner {
                    new_player: name,
                    winner: true,
                    all_winners,
                },
            ),
        }
    }
}
