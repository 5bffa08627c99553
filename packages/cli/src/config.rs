use std::env;
use std::net::{IpAddr, SocketAddr};
use std::num::ParseIntError;
use std::path::PathBuf;
use thiserror::Error;

use calculator_config::constants;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid port number: {0}")]
    InvalidPort(#[from] ParseIntError),
    #[error("Port {0} is out of valid range (1-65535)")]
    PortOutOfRange(u16),
    #[error("Invalid host address: {0}")]
    InvalidHost(String),
    #[error("Invalid database connection limit: {0}")]
    InvalidMaxConnections(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub port: u16,
    pub host: IpAddr,
    pub cors_origin: String,
    pub database_path: PathBuf,
    pub db_max_connections: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup(constants::CALCULATOR_PORT).or_else(|| lookup(constants::PORT)) {
            Some(value) => parse_port(&value)?,
            None => constants::DEFAULT_PORT,
        };

        let host = match lookup(constants::CALCULATOR_HOST) {
            Some(value) => parse_host(&value)?,
            None => parse_host(constants::DEFAULT_HOST)?,
        };

        let cors_origin = lookup(constants::CALCULATOR_CORS_ORIGIN)
            .unwrap_or_else(|| constants::DEFAULT_CORS_ORIGIN.to_string());

        let database_path = lookup(constants::CALCULATOR_DATABASE_PATH)
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(calculator_core::default_database_path);

        let db_max_connections = match lookup(constants::CALCULATOR_DB_MAX_CONNECTIONS) {
            Some(value) => match value.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => return Err(ConfigError::InvalidMaxConnections(value)),
            },
            None => constants::DEFAULT_DB_MAX_CONNECTIONS,
        };

        Ok(Config {
            port,
            host,
            cors_origin,
            database_path,
            db_max_connections,
        })
    }

    /// Apply command line flags, which take precedence over the environment
    pub fn with_overrides(
        mut self,
        port: Option<u16>,
        host: Option<&str>,
        database_path: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        if let Some(port) = port {
            if port == 0 {
                return Err(ConfigError::PortOutOfRange(port));
            }
            self.port = port;
        }
        if let Some(host) = host {
            self.host = parse_host(host)?;
        }
        if let Some(path) = database_path {
            self.database_path = path;
        }
        Ok(self)
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_port(value: &str) -> Result<u16, ConfigError> {
    let port = value.trim().parse::<u16>()?;

    // Validate port is in valid range
    if port == 0 {
        return Err(ConfigError::PortOutOfRange(port));
    }
    Ok(port)
}

fn parse_host(value: &str) -> Result<IpAddr, ConfigError> {
    value
        .trim()
        .parse::<IpAddr>()
        .map_err(|_| ConfigError::InvalidHost(value.to_string()))
}
