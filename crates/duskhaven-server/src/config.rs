//! Server configuration read from the environment.

use std::fmt::Display;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use duskhaven_core::ids::LocationId;
use duskhaven_engine::domain::config::EngineConfig;

use crate::error::AppError;

/// Everything the server needs to start.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Interface both listeners bind to.
    pub host: String,
    /// Port of the line (telnet-style) listener.
    pub port: u16,
    /// Port of the HTTP status listener.
    pub http_port: u16,
    /// PostgreSQL URL. Without one, records live in memory.
    pub database_url: Option<String>,
    /// Content pack to build the world from.
    pub content_path: PathBuf,
    /// Seed for a reproducible world. Without one, the RNG is seeded from the OS.
    pub rng_seed: Option<u64>,
    /// How often the engine advances game time.
    pub tick_ms: u64,
    /// Gameplay settings.
    pub engine: EngineConfig,
}

impl ServerConfig {
    /// Reads the configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is present but malformed.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable name
    /// to its value.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is present but malformed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let present = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let mut engine = EngineConfig::default();
        if let Some(start) = present("START_LOCATION") {
            engine.start_location = LocationId::new(start);
        }
        if let Some(safe) = present("SAFE_LOCATION") {
            engine.safe_location = LocationId::new(safe);
        }

        Ok(Self {
            host: present("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(present("PORT"), "PORT", 4000)?,
            http_port: parse_or(present("HTTP_PORT"), "HTTP_PORT", 3000)?,
            database_url: present("DATABASE_URL"),
            content_path: present("CONTENT_PATH")
                .map_or_else(|| PathBuf::from("content/world.yaml"), PathBuf::from),
            rng_seed: present("RNG_SEED")
                .map(|raw| parse("RNG_SEED", &raw))
                .transpose()?,
            tick_ms: parse_or(present("TICK_MS"), "TICK_MS", 100)?,
            engine,
        })
    }

    /// Address of the line listener.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` for an unparseable host.
    pub fn line_addr(&self) -> Result<SocketAddr, AppError> {
        socket_addr(&self.host, self.port)
    }

    /// Address of the HTTP listener.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` for an unparseable host.
    pub fn http_addr(&self) -> Result<SocketAddr, AppError> {
        socket_addr(&self.host, self.http_port)
    }
}

fn parse<T>(key: &str, raw: &str) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: Display,
{
    raw.trim()
        .parse()
        .map_err(|e| AppError::Config(format!("{key} is invalid: {e}")))
}

fn parse_or<T>(raw: Option<String>, key: &str, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: Display,
{
    raw.map_or(Ok(default), |raw| parse(key, &raw))
}

fn socket_addr(host: &str, port: u16) -> Result<SocketAddr, AppError> {
    format!("{host}:{port}")
        .parse()
        .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
}
