//! Database connection settings.
//!
//! # Environment Variables
//!
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `DATABASE_MAX_CONNECTIONS`: pool size (default: 5)

use crate::{env_lookup, parse_or};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub max_connections: u32,
}

impl DatabaseConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            url: lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()),
            max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 5),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_env() {
        let config = DatabaseConfig::from_lookup(|_| None);
        assert_eq!(config.url, None);
        assert_eq!(config.max_connections, 5);
    }

    #[test]
    fn test_reads_url_and_pool_size() {
        let config = DatabaseConfig::from_lookup(|key| match key {
            "DATABASE_URL" => Some("postgres://u:p@localhost/classroll".into()),
            "DATABASE_MAX_CONNECTIONS" => Some("12".into()),
            _ => None,
        });
        assert_eq!(
            config.url.as_deref(),
            Some("postgres://u:p@localhost/classroll")
        );
        assert_eq!(config.max_connections, 12);
    }

    #[test]
    fn test_blank_url_is_treated_as_missing() {
        let config = DatabaseConfig::from_lookup(|key| (key == "DATABASE_URL").then(|| "  ".into()));
        assert_eq!(config.url, None);
    }
}
