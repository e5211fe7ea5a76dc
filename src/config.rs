use std::env;
use std::fmt::Display;
use std::str::FromStr;

use chrono_tz::Tz;

use crate::error::ConfigError;
use crate::scheduler::CutoverMode;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub server_addr: String,
    /// Shared secret the external scheduler presents on every trigger.
    pub cron_secret: String,

    pub business_timezone: Tz,
    pub cutover_mode: CutoverMode,

    // Rate limiting
    pub rate_cron_per_min: u32,

    pub api_prefix: String,
    pub log_dir: String,
    pub log_level: tracing::Level,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            server_addr: required(&lookup, "SERVER_ADDR")?,
            database_url: required(&lookup, "DATABASE_URL")?,
            cron_secret: required(&lookup, "CRON_SECRET")?,
            business_timezone: parsed(&lookup, "BUSINESS_TIMEZONE", "Asia/Tokyo")?,
            cutover_mode: parsed(&lookup, "CUTOVER_MODE", "catch_up")?,
            rate_cron_per_min: parsed(&lookup, "RATE_CRON_PER_MIN", "60")?,
            api_prefix: lookup("API_PREFIX").unwrap_or_else(|| "/api".to_string()),
            log_dir: lookup("LOG_DIR").unwrap_or_else(|| "logs".to_string()),
            log_level: parsed(&lookup, "LOG_LEVEL", "debug")?,
        })
    }
}

fn required(lookup: &impl Fn(&str) -> Option<String>, key: &'static str) -> Result<String, ConfigError> {
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::Missing(key))
}

fn parsed<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: &str,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    let raw = lookup(key).unwrap_or_else(|| default.to_string());
    raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        reason: format!("{raw:?}: {e}"),
    })
}
