use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::error::AppError;

#[derive(Debug, Serialize)]
struct StatusResponse {
    status: bool,
}

async fn status() -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(StatusResponse { status: true }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/status", web::get().to(status));
}
