//! API configuration

use std::time::Duration;

use serde::Deserialize;

/// API configuration
///
/// Every field can be set through an `API_`-prefixed environment variable,
/// e.g. `API_INVOICE_NUMBER_WIDTH=5`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
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
    pub db_max_connections: u32,
    /// Upper bound on a single store call before it fails as a persistence error
    pub persistence_timeout_ms: u64,
    /// Zero-padding applied to invoice numbers (1 means no padding)
    pub invoice_number_width: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            jwt_secret: "change-me-in-production".to_string(),
            jwt_expiration_secs: 3600,
            database_url: "postgres://localhost/billbook".to_string(),
            log_level: "info".to_string(),
            db_max_connections: 10,
            persistence_timeout_ms: 5_000,
            invoice_number_width: 1,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from environment
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let config: Self = config::Config::builder()
            .add_source(config::Environment::with_prefix("API"))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), config::ConfigError> {
        if !(1..=12).contains(&self.invoice_number_width) {
            return Err(config::ConfigError::Message(format!(
                "invoice_number_width must be between 1 and 12, got {}",
                self.invoice_number_width
            )));
        }
        if self.persistence_timeout_ms == 0 {
            return Err(config::ConfigError::Message(
                "persistence_timeout_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn persistence_timeout(&self) -> Duration {
        Duration::from_millis(self.persistence_timeout_ms)
    }
}
