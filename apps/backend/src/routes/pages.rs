//! Static pages served from the configured html directory.

use std::io::ErrorKind;

use actix_web::{web, HttpRequest, HttpResponse};
use tracing::warn;

use crate::error::AppError;
use crate::errors::{DomainError, ErrorCode};
use crate::state::app_state::AppState;

const LANDING_PAGE: &str = "index.html";
const PLAYER_PAGE: &str = "players.html";

async fn read_page(app_state: &AppState, file: &str) -> Result<HttpResponse, AppError> {
    let path = app_state.config.html_dir.join(file);
    let body = tokio::fs::read_to_string(&path).await.map_err(|err| {
        warn!(path = %path.display(), error = %err, "Page not readable");
        match err.kind() {
            ErrorKind::NotFound => {
                AppError::not_found(ErrorCode::PageNotFound, format!("page '{file}' not found"))
            }
            _ => AppError::internal(ErrorCode::Internal, format!("page '{file}' unreadable")),
        }
    })?;
    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body))
}

async fn landing(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    read_page(&app_state, LANDING_PAGE).await
}

async fn player_page(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let session_id = path.into_inner();
    if !app_state.registry.contains(&session_id) {
        return Err(DomainError::session_not_found(&session_id).into());
    }
    read_page(&app_state, PLAYER_PAGE).await
}

/// Fallback for every unrouted path.
pub async fn unmatched(req: HttpRequest) -> Result<HttpResponse, AppError> {
    Err(AppError::not_found(
        ErrorCode::NotFound,
        format!("no route for {} {}", req.method(), req.path()),
    ))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(landing))
        .route("/players/{session_id}", web::get().to(player_page));
}
