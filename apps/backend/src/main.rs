use actix_web::{web, App, HttpServer};
use bingo_backend::config::ServerConfig;
use bingo_backend::infra::state::build_state;
use bingo_backend::middleware::structured_logger::StructuredLogger;
use bingo_backend::routes;
use bingo_backend::services::reaper::spawn_reaper;
use bingo_backend::telemetry::{self, LogFormat};
use tracing::info;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing(LogFormat::from_env());

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Invalid configuration: {e}");
            std::process::exit(1);
        }
    };
    let host = config.host.clone();
    let port = config.port;

    let app_state = match build_state().with_config(config).build().await {
        Ok(state) => state,
        Err(e) => {
            eprintln!("❌ Failed to build application state: {e}");
            std::process::exit(1);
        }
    };

    let reaper = spawn_reaper(
        app_state.registry(),
        app_state.config().session_idle,
        app_state.config().reaper_interval,
    );

    info!(
        host = %host,
        port,
        rng_workers = app_state.config().rng_workers,
        wildcard_policy = %app_state.config().wildcard_policy,
        "Starting bingo backend"
    );

    // Wrap AppState with web::Data before passing to HttpServer
    let data = web::Data::new(app_state);
    let server_data = data.clone();

    let result = HttpServer::new(move || {
        App::new()
            .wrap(StructuredLogger)
            .app_data(server_data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await;

    reaper.abort();
    data.shutdown().await;
    info!("Bingo backend stopped");

    result
}
