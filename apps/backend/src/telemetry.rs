//! Process-wide tracing setup for the server binary.

use std::str::FromStr;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "info,actix_web=info,actix_server=warn";

/// Output shape, picked with `BINGO_LOG_FORMAT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" | "text" => Ok(LogFormat::Pretty),
            other => Err(format!("unknown log format '{other}'")),
        }
    }
}

impl LogFormat {
    /// Unknown values fall back to JSON; logging is not up yet to say so.
    pub fn from_env() -> Self {
        std::env::var("BINGO_LOG_FORMAT")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_default()
    }
}

pub fn init_tracing(format: LogFormat) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let base = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_ansi(false);

    let registry = tracing_subscriber::registry().with(env_filter);
    match format {
        LogFormat::Json => registry.with(base.json()).init(),
        LogFormat::Pretty => registry.with(base.pretty()).init(),
    }
}
