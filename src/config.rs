//! Configuration loading and validation.
//!
//! Settings live in a TOML file under the platform config directory and
//! can be overridden per invocation through `ATLASCTL_*` environment
//! variables. The API token is never part of the file; it comes from the
//! environment or the OS keyring (see [`crate::api::auth`]).

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable overriding the site URL.
pub const SITE_URL_ENV_VAR: &str = "ATLASCTL_SITE_URL";
/// Environment variable overriding the account email.
pub const EMAIL_ENV_VAR: &str = "ATLASCTL_EMAIL";
/// Environment variable overriding the request timeout.
pub const TIMEOUT_ENV_VAR: &str = "ATLASCTL_TIMEOUT_SECS";

/// Errors from configuration handling.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine the configuration directory")]
    NoConfigDir,

    #[error("no configuration found at {0}; run 'atlasctl config init'")]
    NotFound(PathBuf),

    #[error("could not read configuration: {0}")]
    Read(#[source] std::io::Error),

    #[error("could not write configuration: {0}")]
    Write(#[source] std::io::Error),

    #[error("configuration file is invalid: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("could not serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("configuration error: {0}")]
    Validation(String),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

fn default_timeout_secs() -> u64 {
    30
}

fn default_page_size() -> u32 {
    25
}

/// Connection settings for one Atlassian Cloud site.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// The site URL, e.g. `https://company.atlassian.net`.
    pub site_url: String,
    /// The account email used for Basic Auth.
    pub email: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Default page size for listings and searches.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Config {
    /// The configuration file location.
    pub fn default_path() -> Result<PathBuf> {
        let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(base.join("atlasctl").join("config.toml"))
    }

    /// Load from the default location, apply environment overrides, and
    /// validate.
    ///
    /// When the file is absent but both `ATLASCTL_SITE_URL` and
    /// `ATLASCTL_EMAIL` are set, an environment-only configuration is
    /// accepted.
    pub fn load() -> Result<Self> {
        Self::load_from(Self::default_path()?)
    }

    /// Load from an explicit path; see [`Config::load`].
    pub fn load_from(path: PathBuf) -> Result<Self> {
        let mut config = if path.exists() {
            let raw = std::fs::read_to_string(&path).map_err(ConfigError::Read)?;
            toml::from_str(&raw)?
        } else if let (Ok(site_url), Ok(email)) =
            (std::env::var(SITE_URL_ENV_VAR), std::env::var(EMAIL_ENV_VAR))
        {
            Config {
                site_url,
                email,
                timeout_secs: default_timeout_secs(),
                page_size: default_page_size(),
            }
        } else {
            return Err(ConfigError::NotFound(path));
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Write to the default location, creating parent directories.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::default_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Write to an explicit path.
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        self.validate()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::Write)?;
        }
        let raw = toml::to_string_pretty(self)?;
        std::fs::write(path, raw).map_err(ConfigError::Write)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(site_url) = std::env::var(SITE_URL_ENV_VAR) {
            self.site_url = site_url;
        }
        if let Ok(email) = std::env::var(EMAIL_ENV_VAR) {
            self.email = email;
        }
        if let Ok(timeout) = std::env::var(TIMEOUT_ENV_VAR) {
            if let Ok(secs) = timeout.parse() {
                self.timeout_secs = secs;
            }
        }
    }

    /// Check the settings before any client is built.
    pub fn validate(&self) -> Result<()> {
        if self.site_url.is_empty() {
            return Err(ConfigError::Validation("site URL cannot be empty".into()));
        }
        if !self.site_url.starts_with("https://") && !self.site_url.starts_with("http://") {
            return Err(ConfigError::Validation(format!(
                "site URL '{}' must start with http:// or https://",
                self.site_url
            )));
        }
        if self.email.is_empty() {
            return Err(ConfigError::Validation("email cannot be empty".into()));
        }
        if !self.email.contains('@') {
            return Err(ConfigError::Validation(format!(
                "'{}' does not look like an email address",
                self.email
            )));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "timeout must be at least one second".into(),
            ));
        }
        Ok(())
    }

    /// The per-request timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
