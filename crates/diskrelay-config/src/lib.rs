//! Configuration loading for the diskrelay gateway.
//!
//! Reads a TOML file once at startup, applies environment-variable
//! overrides for the secrets, and validates required fields. The resulting
//! [`Config`] is immutable and passed by reference to every component.

pub mod error;
pub mod types;

pub use error::{ConfigError, Result};
pub use types::{Config, DiskSection, OauthConfig, ServerSection};

use std::path::Path;

/// Environment variable carrying the OAuth client secret.
pub const ENV_CLIENT_SECRET: &str = "DISKRELAY_CLIENT_SECRET";

/// Environment variable carrying the cookie-signing secret.
pub const ENV_SECRET_KEY: &str = "DISKRELAY_SECRET_KEY";

/// Load a config file, apply env overrides, and validate it.
pub fn load_config(path: &Path) -> Result<Config> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.display().to_string(),
        source,
    })?;

    let mut config = Config::from_toml(&contents)?;
    apply_env_overrides(&mut config);
    config.validate()?;
    Ok(config)
}

/// Overlay secrets from the environment onto the parsed config.
///
/// Env values win over file values so that secrets can stay out of the
/// config file entirely.
pub fn apply_env_overrides(config: &mut Config) {
    if let Ok(secret) = std::env::var(ENV_CLIENT_SECRET) {
        if !secret.is_empty() {
            config.oauth.client_secret = secret;
        }
    }
    if let Ok(key) = std::env::var(ENV_SECRET_KEY) {
        if !key.is_empty() {
            config.server.secret_key = key;
        }
    }
}
