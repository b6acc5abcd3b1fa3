//! Server configuration read from `BINGO_*` environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::domain::WildcardPolicy;
use crate::error::AppError;
use crate::rng::DEFAULT_WORKERS;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Base URL used to build player join links.
    pub public_url: String,
    pub html_dir: PathBuf,
    pub rng_workers: usize,
    pub wildcard_policy: WildcardPolicy,
    pub session_idle: Duration,
    pub reaper_interval: Duration,
    pub heartbeat_interval: Duration,
    pub client_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            public_url: "http://localhost:8080".to_string(),
            html_dir: PathBuf::from("html"),
            rng_workers: DEFAULT_WORKERS,
            wildcard_policy: WildcardPolicy::Scattered,
            session_idle: Duration::from_secs(3600),
            reaper_interval: Duration::from_secs(60),
            heartbeat_interval: Duration::from_secs(20),
            client_timeout: Duration::from_secs(40),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup; unset variables keep their
    /// defaults, set but invalid ones are a config error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let rng_workers = parse_or(&lookup, "BINGO_RNG_WORKERS", defaults.rng_workers)?;
        if rng_workers == 0 {
            return Err(AppError::config(
                "BINGO_RNG_WORKERS must be at least 1".to_string(),
            ));
        }

        let wildcard_policy = match lookup("BINGO_WILDCARD_POLICY") {
            Some(raw) => raw
                .parse::<WildcardPolicy>()
                .map_err(|e| AppError::config(format!("BINGO_WILDCARD_POLICY: {e}")))?,
            None => defaults.wildcard_policy,
        };

        Ok(Self {
            host: lookup("BINGO_HOST").unwrap_or(defaults.host),
            port: parse_or(&lookup, "BINGO_PORT", defaults.port)?,
            public_url: lookup("BINGO_PUBLIC_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.public_url),
            html_dir: lookup("BINGO_HTML_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.html_dir),
            rng_workers,
            wildcard_policy,
            session_idle: secs_or(&lookup, "BINGO_SESSION_IDLE_SECS", defaults.session_idle)?,
            reaper_interval: secs_or(
                &lookup,
                "BINGO_REAPER_INTERVAL_SECS",
                defaults.reaper_interval,
            )?,
            heartbeat_interval: secs_or(
                &lookup,
                "BINGO_HEARTBEAT_SECS",
                defaults.heartbeat_interval,
            )?,
            client_timeout: secs_or(&lookup, "BINGO_CLIENT_TIMEOUT_SECS", defaults.client_timeout)?,
        })
    }

    pub fn join_link(&self, session_id: &str) -> String {
        format!("{}/players/{session_id}", self.public_url)
    }
}

fn parse_or<F, T>(lookup: &F, name: &str, default: T) -> Result<T, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| AppError::config(format!("{name} is invalid ({raw}): {e}"))),
        None => Ok(default),
    }
}

fn secs_or<F>(lookup: &F, name: &str, default: Duration) -> Result<Duration, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    let secs: u64 = parse_or(lookup, name, default.as_secs())?;
    if secs == 0 {
        return Err(AppError::config(format!("{name} must be greater than zero")));
    }
    Ok(Duration::from_secs(secs))
}
