//! Configuration loading from the process environment.

use thiserror::Error;

use crate::config::schema::RelayConfig;

/// Environment variable naming the listen port.
pub const PORT_ENV: &str = "PORT";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// PORT was set but is not a valid port number.
    #[error("invalid PORT value '{value}': {source}")]
    InvalidPort {
        value: String,
        source: std::num::ParseIntError,
    },
}

/// Build the configuration from defaults plus the `PORT` variable.
pub fn load_from_env() -> Result<RelayConfig, ConfigError> {
    apply_port(RelayConfig::default(), std::env::var(PORT_ENV).ok())
}

/// Apply an optional PORT value to a base configuration.
///
/// An empty value counts as unset; hosting platforms may export PORT=""
/// when no port is assigned yet.
fn apply_port(mut config: RelayConfig, port: Option<String>) -> Result<RelayConfig, ConfigError> {
    if let Some(value) = port.filter(|v| !v.is_empty()) {
        let port: u16 = value.parse().map_err(|source| ConfigError::InvalidPort {
            value: value.clone(),
            source,
        })?;
        config.listener.bind_address = format!("0.0.0.0:{port}");
    }
    Ok(config)
}
