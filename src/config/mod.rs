//! Configuration module for the globe backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;

/// Application configuration loaded from environment variables.
///
/// Built once at process start and handed to every component that needs it;
/// there is no global configuration singleton.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port the HTTP listener binds to
    pub port: u16,
    /// Connection string for the SQLite database
    pub database_url: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let port = env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .expect("Invalid PORT format");

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite:./data/globe.sqlite?mode=rwc".to_string());

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Self {
            port,
            database_url,
            log_level,
        }
    }

    /// Address for the HTTP listener.
    pub fn bind_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}
