//! Server configuration.

use std::env;
use std::net::SocketAddr;

use anyhow::{Context, Result};

/// Runtime configuration for the REST server, loaded from the environment.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub db_path: String,
    pub static_dir: String,
}

impl ServerConfig {
    /// Load configuration from the environment (a `.env` file is honored),
    /// falling back to defaults for anything unset.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        let host = env::var("CLINIC_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = match env::var("CLINIC_PORT") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("CLINIC_PORT must be a port number, got {raw:?}"))?,
            Err(_) => 8082,
        };
        let db_path = env::var("CLINIC_DB").unwrap_or_else(|_| "clinic.db".to_string());
        let static_dir = env::var("CLINIC_STATIC_DIR")
            .unwrap_or_else(|_| "crates/clinic-server/static".to_string());

        Ok(ServerConfig {
            host,
            port,
            db_path,
            static_dir,
        })
    }

    /// The socket address to bind.
    pub fn addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid bind address {}:{}", self.host, self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_addr_parses() {
        let config = ServerConfig {
            host: "127.0.0.1".into(),
            port: 9000,
            db_path: "clinic.db".into(),
            static_dir: "static".into(),
        };
        assert_eq!(config.addr().unwrap().port(), 9000);
    }

    #[test]
    fn test_addr_rejects_bad_host() {
        let config = ServerConfig {
            host: "not a host".into(),
            port: 9000,
            db_path: "clinic.db".into(),
            static_dir: "static".into(),
        };
        assert!(config.addr().is_err());
    }
}
