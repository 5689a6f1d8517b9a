//! API configuration

use serde::Deserialize;

/// Selects where revoked token identifiers live
///
/// `Memory` is process-local and suits a single instance; `Postgres`
/// shares the revocation set across instances through the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RevocationBackend {
    Memory,
    Postgres,
}

impl std::str::FromStr for RevocationBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "memory" => Ok(RevocationBackend::Memory),
            "postgres" => Ok(RevocationBackend::Postgres),
            other => Err(format!("unknown revocation backend '{}'", other)),
        }
    }
}

/// API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// JWT secret for authentication
    pub jwt_secret: String,
    /// JWT expiration in seconds
    pub jwt_expiration_secs: u64,
    /// Database URL
    pub database_url: String,
    /// Log level
    pub log_level: String,
    /// Directory where uploaded images and visualizations are stored
    pub upload_dir: String,
    /// Exchange rate applied when currency conversion is requested
    pub exchange_rate: f64,
    /// Pixel-to-length scale for the geometric measurer
    pub pixels_per_foot: f64,
    /// Token revocation backend
    pub revocation_backend: RevocationBackend,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            jwt_secret: "change-me-in-production".to_string(),
            jwt_expiration_secs: 3600,
            database_url: "postgres://localhost/claims_intake".to_string(),
            log_level: "info".to_string(),
            upload_dir: "uploads".to_string(),
            exchange_rate: 88.0,
            pixels_per_foot: 120.0,
            revocation_backend: RevocationBackend::Memory,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from `API_`-prefixed environment variables
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("API"))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_addr() {
        let config = ApiConfig::default();
        assert_eq!(config.server_addr(), "0.0.0.0:8080");
        assert_eq!(config.revocation_backend, RevocationBackend::Memory);
    }

    #[test]
    fn test_revocation_backend_parses_from_env_strings() {
        assert_eq!(
            "postgres".parse::<RevocationBackend>().unwrap(),
            RevocationBackend::Postgres
        );
        assert_eq!(
            "Memory".parse::<RevocationBackend>().unwrap(),
            RevocationBackend::Memory
        );
        assert!("redis".parse::<RevocationBackend>().is_err());
    }
}
