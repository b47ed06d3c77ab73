use axum::http::HeaderValue;
use std::env;
use thiserror::Error;
use time::UtcOffset;

use crate::constants::*;
use crate::month::parse_utc_offset;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: String,
    pub data_path: String,
    pub cors_allowed_origin: HeaderValue,
    pub business_offset: UtcOffset,
    pub log_level: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid port number: {0}")]
    InvalidPort(String),
    #[error("Invalid CORS origin: {0}")]
    InvalidCorsOrigin(String),
    #[error("Invalid business UTC offset '{0}', expected ±HH:MM")]
    InvalidUtcOffset(String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset keys take their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let host = var("SERVER_HOST", DEFAULT_HOST);
        let port = var("SERVER_PORT", DEFAULT_PORT);
        let data_path = var("DATABASE_PATH", DEFAULT_DATA_PATH);
        let log_level = var("LOG_LEVEL", DEFAULT_LOG_LEVEL);

        // Validate port is a valid number
        if port.parse::<u16>().is_err() {
            return Err(ConfigError::InvalidPort(port));
        }

        let origin = var("CORS_ALLOWED_ORIGIN", DEFAULT_CORS_ALLOWED_ORIGIN);
        let cors_allowed_origin =
            HeaderValue::from_str(&origin).map_err(|_| ConfigError::InvalidCorsOrigin(origin))?;

        let offset = var("BUSINESS_UTC_OFFSET", DEFAULT_BUSINESS_UTC_OFFSET);
        let business_offset =
            parse_utc_offset(&offset).ok_or(ConfigError::InvalidUtcOffset(offset))?;

        Ok(Config {
            host,
            port,
            data_path,
            cors_allowed_origin,
            business_offset,
            log_level,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
        assert_eq!(config.data_path, "data");
        assert_eq!(config.business_offset.whole_hours(), -5);
        assert_eq!(config.cors_allowed_origin, "http://localhost:4200");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn rejects_bad_port() {
        let err = config_from(&[("SERVER_PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort(_)));
    }

    #[test]
    fn rejects_bad_offset() {
        let err = config_from(&[("BUSINESS_UTC_OFFSET", "America/Bogota")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUtcOffset(_)));
    }

    #[test]
    fn overrides_are_honoured() {
        let config = config_from(&[
            ("SERVER_HOST", "127.0.0.1"),
            ("SERVER_PORT", "3000"),
            ("BUSINESS_UTC_OFFSET", "+01:00"),
        ])
        .unwrap();
        assert_eq!(config.bind_address(), "127.0.0.1:3000");
        assert_eq!(config.business_offset.whole_hours(), 1);
    }
}
