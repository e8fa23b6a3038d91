//! Application configuration loaded from environment variables.

use common::ServiceId;

/// Server configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST` — bind address (default: `"0.0.0.0"`)
/// - `PORT` — listen port (default: `8001`); the first positional
///   command-line argument, when present, takes precedence
/// - `BROKER_URL` — broker publish endpoint
///   (default: `"http://localhost:4000/publish"`)
/// - `DATABASE_URL` — order store connection string
///   (default: `"postgres://localhost:5432/food_delivery"`)
/// - `RUST_LOG` — tracing filter directive (default: `"info"`)
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub broker_url: String,
    pub database_url: String,
    pub log_level: String,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8001),
            broker_url: std::env::var("BROKER_URL")
                .unwrap_or_else(|_| "http://localhost:4000/publish".to_string()),
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgres://localhost:5432/food_delivery".to_string()),
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        }
    }

    /// Applies the positional port argument the deployment scripts pass,
    /// e.g. `api 8002`. Non-numeric or absent arguments leave the port as is.
    pub fn with_port_override(mut self, arg: Option<String>) -> Self {
        if let Some(port) = arg.and_then(|a| a.parse().ok()) {
            self.port = port;
        }
        self
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Handling-service identifier of this instance, derived from the port.
    pub fn service_id(&self) -> ServiceId {
        ServiceId::from_port(self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8001,
            broker_url: "http://localhost:4000/publish".to_string(),
            database_url: "postgres://localhost:5432/food_delivery".to_string(),
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8001);
        assert_eq!(config.broker_url, "http://localhost:4000/publish");
        assert_eq!(config.database_url, "postgres://localhost:5432/food_delivery");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_addr_formatting() {
        let config = Config {
            host: "127.0.0.1".to_string(),
            port: 8080,
            ..Config::default()
        };
        assert_eq!(config.addr(), "127.0.0.1:8080");
    }

    #[test]
    fn test_port_override_applies() {
        let config = Config::default().with_port_override(Some("8002".to_string()));
        assert_eq!(config.port, 8002);
        assert_eq!(config.service_id().as_str(), "OrderService-8002");
    }

    #[test]
    fn test_port_override_ignores_garbage() {
        let config = Config::default().with_port_override(Some("not-a-port".to_string()));
        assert_eq!(config.port, 8001);

        let config = Config::default().with_port_override(None);
        assert_eq!(config.port, 8001);
    }

    #[test]
    fn test_service_id_from_default_port() {
        let config = Config::default();
        assert_eq!(config.service_id().as_str(), "OrderService-8001");
    }
}
