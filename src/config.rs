use std::{env, fmt::Display, str::FromStr};

use anyhow::{anyhow, Context, Result};
use tracing::{info, warn};

pub const DEFAULT_AUTH_CALLBACK_URL: &str = "http://localhost:3000/api/auth/callback";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    /// Frontend page the browser is sent to after a successful login.
    pub auth_callback_url: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            max_connections: try_load("DATABASE_MAX_CONNECTIONS", "5")?,
            auth_callback_url: try_load("AUTH_CALLBACK_URL", DEFAULT_AUTH_CALLBACK_URL)?,
        })
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T>
where
    T::Err: Display,
{
    let raw = env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    raw.parse().map_err(|e| {
        warn!("Invalid {key} value: {e}");
        anyhow!("invalid {key} value {raw:?}: {e}")
    })
}
