//! # Classroll Config
//!
//! Configuration types loaded from environment variables:
//!
//! - [`client`]: Remote Data API client settings used by the stores
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`database`]: PostgreSQL connection settings
//! - [`server`]: Bind address of the API server
//!
//! # Example
//!
//! ```ignore
//! use classroll_config::{CorsConfig, DatabaseConfig, ServerConfig};
//!
//! let cors_config = CorsConfig::from_env();
//! let database_config = DatabaseConfig::from_env();
//! let server_config = ServerConfig::from_env();
//! ```

pub mod client;
pub mod cors;
pub mod database;
pub mod server;

pub use client::ApiClientConfig;
pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use server::ServerConfig;

/// Reads `key` through `lookup` and parses it, falling back to `default`
/// when the variable is missing or malformed.
pub(crate) fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

pub(crate) fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}
