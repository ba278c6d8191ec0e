// ABOUTME: Configuration package for ShopX
// ABOUTME: Environment variable names and the typed runtime config built from them

pub mod config;
pub mod constants;

pub use config::{Config, ConfigError};
