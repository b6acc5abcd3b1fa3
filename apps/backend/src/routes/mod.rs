use actix_web::web;

pub mod health;
pub mod pages;
pub mod realtime;

/// Register every route. Used by `main.rs` and by tests that spin up an
/// `App` directly.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure_routes)
        .configure(realtime::configure_routes)
        .configure(pages::configure_routes)
        .default_service(web::to(pages::unmatched));
}
