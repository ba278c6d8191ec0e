// ABOUTME: Runtime configuration loaded from environment variables
// ABOUTME: Every value has a default; malformed values are errors rather than silently ignored

use std::env;
use std::num::ParseIntError;
use std::time::Duration;

use shopx_catalog::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use shopx_core::{DEFAULT_LOW_STOCK_THRESHOLD, DEFAULT_MAX_IMAGES};
use thiserror::Error;
use tracing::debug;

use crate::constants::*;

const DEFAULT_ADMIN_USERNAME: &str = "admin";
const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {source}")]
    InvalidNumber {
        name: &'static str,
        #[source]
        source: ParseIntError,
    },
    #[error("{name} is out of range ({min}-{max}): {value}")]
    OutOfRange {
        name: &'static str,
        value: u64,
        min: u64,
        max: u64,
    },
    #[error("Invalid boolean for {name}: {value}")]
    InvalidBool { name: &'static str, value: String },
    #[error("{0} cannot be empty")]
    Empty(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub page_size: u32,
    pub low_stock_threshold: u32,
    pub max_images: usize,
    /// Artificial delay applied to every backend call
    pub latency: Duration,
    pub seed_demo_data: bool,
    pub admin_username: String,
    pub admin_password: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE as u32,
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
            max_images: DEFAULT_MAX_IMAGES,
            latency: Duration::ZERO,
            seed_demo_data: true,
            admin_username: DEFAULT_ADMIN_USERNAME.to_string(),
            admin_password: DEFAULT_ADMIN_PASSWORD.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from any name -> value source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        let var = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let page_size = match var(SHOPX_PAGE_SIZE) {
            Some(raw) => parse_bounded(SHOPX_PAGE_SIZE, &raw, 1, MAX_PAGE_SIZE as u64)? as u32,
            None => defaults.page_size,
        };

        let low_stock_threshold = match var(SHOPX_LOW_STOCK_THRESHOLD) {
            Some(raw) => parse_bounded(SHOPX_LOW_STOCK_THRESHOLD, &raw, 0, 10_000)? as u32,
            None => defaults.low_stock_threshold,
        };

        let max_images = match var(SHOPX_MAX_IMAGES) {
            Some(raw) => parse_bounded(SHOPX_MAX_IMAGES, &raw, 1, 50)? as usize,
            None => defaults.max_images,
        };

        let latency = match var(SHOPX_LATENCY_MS) {
            Some(raw) => Duration::from_millis(parse_bounded(SHOPX_LATENCY_MS, &raw, 0, 60_000)?),
            None => defaults.latency,
        };

        let seed_demo_data = match var(SHOPX_SEED_DEMO_DATA) {
            Some(raw) => parse_bool(SHOPX_SEED_DEMO_DATA, &raw)?,
            None => defaults.seed_demo_data,
        };

        let admin_username = match lookup(SHOPX_ADMIN_USERNAME) {
            Some(v) if v.trim().is_empty() => return Err(ConfigError::Empty(SHOPX_ADMIN_USERNAME)),
            Some(v) => v.trim().to_string(),
            None => defaults.admin_username,
        };

        // Passwords are taken verbatim
        let admin_password = match lookup(SHOPX_ADMIN_PASSWORD) {
            Some(v) if v.is_empty() => return Err(ConfigError::Empty(SHOPX_ADMIN_PASSWORD)),
            Some(v) => v,
            None => defaults.admin_password,
        };

        let config = Config {
            page_size,
            low_stock_threshold,
            max_images,
            latency,
            seed_demo_data,
            admin_username,
            admin_password,
        };
        debug!(
            page_size = config.page_size,
            low_stock_threshold = config.low_stock_threshold,
            latency_ms = config.latency.as_millis() as u64,
            "Loaded configuration"
        );
        Ok(config)
    }
}

fn parse_bounded(name: &'static str, raw: &str, min: u64, max: u64) -> Result<u64, ConfigError> {
    let value = raw
        .parse::<u64>()
        .map_err(|source| ConfigError::InvalidNumber { name, source })?;

    if value < min || value > max {
        return Err(ConfigError::OutOfRange {
            name,
            value,
            min,
            max,
        });
    }
    Ok(value)
}

fn parse_bool(name: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            name,
            value: raw.to_string(),
        }),
    }
}
