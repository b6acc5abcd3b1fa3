use actix_web::web;

use crate::ws::{admin, player};

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/gamelink", web::get().to(admin::upgrade))
        .route("/playersdraw", web::get().to(player::upgrade));
}
