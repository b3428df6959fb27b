//! Configuration types mapping to the TOML schema.
//!
//! Top-level config:
//! ```toml
//! [oauth]                  # provider credentials
//! [server]                 # bind address, cookie secret
//! [disk]                   # remote storage API settings
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Default Yandex OAuth authorize endpoint.
pub const DEFAULT_AUTHORIZE_URL: &str = "https://oauth.yandex.ru/authorize";

/// Default Yandex OAuth token endpoint.
pub const DEFAULT_TOKEN_URL: &str = "https://oauth.yandex.ru/token";

/// Default Yandex Disk API base URL.
pub const DEFAULT_DISK_API_BASE: &str = "https://cloud-api.yandex.net";

/// Root configuration structure.
///
/// All sections are optional at parse time so that partial files load;
/// `validate` enforces the required fields before the server starts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// OAuth provider credentials.
    pub oauth: OauthConfig,

    /// HTTP server settings.
    pub server: ServerSection,

    /// Remote storage API settings.
    pub disk: DiskSection,
}

/// OAuth credentials and provider endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OauthConfig {
    /// Application client id registered with the provider.
    pub client_id: String,

    /// Application client secret. Also resolvable from
    /// `DISKRELAY_CLIENT_SECRET`.
    pub client_secret: String,

    /// Redirect URI registered with the provider, pointing at this
    /// gateway's `/oauth/callback` route.
    pub redirect_uri: String,

    /// Provider authorize endpoint.
    pub authorize_url: String,

    /// Provider token endpoint.
    pub token_url: String,
}

impl Default for OauthConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            redirect_uri: String::new(),
            authorize_url: DEFAULT_AUTHORIZE_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    /// Address to bind the server to.
    pub bind: String,

    /// Secret for session cookie signing. Reserved for signed-cookie
    /// session stores; the in-memory store keys by opaque id. Also
    /// resolvable from `DISKRELAY_SECRET_KEY`.
    pub secret_key: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8080".to_string(),
            secret_key: String::new(),
        }
    }
}

/// Remote storage API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiskSection {
    /// Base URL of the Disk API. Overridable for tests.
    pub api_base: String,
}

impl Default for DiskSection {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_DISK_API_BASE.to_string(),
        }
    }
}

impl Config {
    /// Parse from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Check that every required field is present.
    pub fn validate(&self) -> Result<()> {
        if self.oauth.client_id.is_empty() {
            return Err(ConfigError::MissingField {
                field: "client_id",
                context: "[oauth]",
            });
        }
        if self.oauth.client_secret.is_empty() {
            return Err(ConfigError::MissingField {
                field: "client_secret",
                context: "[oauth]",
            });
        }
        if self.oauth.redirect_uri.is_empty() {
            return Err(ConfigError::MissingField {
                field: "redirect_uri",
                context: "[oauth]",
            });
        }
        if self.server.secret_key.is_empty() {
            return Err(ConfigError::MissingField {
                field: "secret_key",
                context: "[server]",
            });
        }
        Ok(())
    }
}
