use std::{net::SocketAddr, str::FromStr, time::Duration};

use anyhow::{bail, Context};
use ratekeeper_core::constants::{
    CURRENCY_CODE_LENGTH, DEFAULT_BASE_CURRENCY, DEFAULT_SYNC_INTERVAL_SECS,
};
use ratekeeper_core::validation::normalize_code;
use ratekeeper_market_data::provider::cbr_daily::DEFAULT_FEED_URL;

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub feed_url: String,
    pub base_currency: String,
    pub sync_interval: Duration,
    pub sync_enabled: bool,
    pub pool_size: u32,
    pub pool_timeout: Duration,
    pub request_timeout: Duration,
    pub feed_timeout: Duration,
    pub cors_allow: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            db_path: "./db/app.db".into(),
            feed_url: DEFAULT_FEED_URL.into(),
            base_currency: DEFAULT_BASE_CURRENCY.into(),
            sync_interval: Duration::from_secs(DEFAULT_SYNC_INTERVAL_SECS),
            sync_enabled: true,
            pool_size: 8,
            pool_timeout: Duration::from_millis(5000),
            request_timeout: Duration::from_millis(30000),
            feed_timeout: Duration::from_millis(30000),
            cors_allow: vec!["*".into()],
        }
    }
}

impl Config {
    /// Reads `RK_*` variables from the environment (and `.env`, if present).
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup. Unset values fall back to defaults; malformed ones fail.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let listen_addr = match lookup("RK_LISTEN_ADDR") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("Invalid RK_LISTEN_ADDR '{}'", raw))?,
            None => defaults.listen_addr,
        };

        let base_currency = match lookup("RK_BASE_CURRENCY") {
            Some(raw) => {
                let code = normalize_code(&raw);
                if code.len() != CURRENCY_CODE_LENGTH
                    || !code.chars().all(|c| c.is_ascii_alphabetic())
                {
                    bail!("Invalid RK_BASE_CURRENCY '{}': expected a 3-letter code", raw);
                }
                code
            }
            None => defaults.base_currency,
        };

        let sync_interval = match parse_positive::<u64>(&lookup, "RK_SYNC_INTERVAL_SECS")? {
            Some(secs) => Duration::from_secs(secs),
            None => defaults.sync_interval,
        };

        let sync_enabled = match lookup("RK_SYNC_ENABLED") {
            Some(raw) => match raw.trim().to_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => true,
                "false" | "0" | "no" | "off" => false,
                _ => bail!("Invalid RK_SYNC_ENABLED '{}': expected true or false", raw),
            },
            None => defaults.sync_enabled,
        };

        let pool_size =
            parse_positive::<u32>(&lookup, "RK_POOL_SIZE")?.unwrap_or(defaults.pool_size);

        let millis = |key: &str, default: Duration| -> anyhow::Result<Duration> {
            Ok(parse_positive::<u64>(&lookup, key)?
                .map(Duration::from_millis)
                .unwrap_or(default))
        };
        let pool_timeout = millis("RK_POOL_TIMEOUT_MS", defaults.pool_timeout)?;
        let request_timeout = millis("RK_REQUEST_TIMEOUT_MS", defaults.request_timeout)?;
        let feed_timeout = millis("RK_FEED_TIMEOUT_MS", defaults.feed_timeout)?;

        let cors_allow = lookup("RK_CORS_ALLOW_ORIGINS")
            .map(|v| {
                v.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or(defaults.cors_allow);

        Ok(Self {
            listen_addr,
            db_path: lookup("RK_DB_PATH").unwrap_or(defaults.db_path),
            feed_url: lookup("RK_FEED_URL").unwrap_or(defaults.feed_url),
            base_currency,
            sync_interval,
            sync_enabled,
            pool_size,
            pool_timeout,
            request_timeout,
            feed_timeout,
            cors_allow,
        })
    }
}

/// Reads a positive integer. Unset is `None`; anything unparseable or zero is an error.
fn parse_positive<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> anyhow::Result<Option<T>>
where
    T: FromStr + PartialOrd + Default,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    match raw.trim().parse::<T>() {
        Ok(value) if value > T::default() => Ok(Some(value)),
        _ => bail!("Invalid {} '{}': expected a positive integer", key, raw),
    }
}
