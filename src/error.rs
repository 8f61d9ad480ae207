//! Top-level error type for the console application.
//!
//! Aggregates the per-layer errors and turns them into messages fit for
//! the terminal. Remote-call failures stay values all the way up; the
//! only thing that ends the process is `main` printing one of these and
//! exiting nonzero.

use thiserror::Error;

use crate::api::ApiError;
use crate::config::ConfigError;

/// The application error type.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Api(#[from] ApiError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

/// Result type for application operations.
pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    pub fn other(msg: impl Into<String>) -> Self {
        AppError::Other(msg.into())
    }

    /// A message suitable for showing to the user, without stack traces
    /// or wire-level details.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Config(e) => e.to_string(),
            AppError::Api(e) => match e {
                ApiError::Timeout => {
                    "The request timed out. The site may be slow or unreachable.".to_string()
                }
                ApiError::Transport(_) => {
                    "Connection failed. Check your network and site URL.".to_string()
                }
                ApiError::Http { status, .. } => match status.as_u16() {
                    401 => "Authentication failed. Check your email and API token.".to_string(),
                    403 => "Access denied. You don't have permission for this resource.".to_string(),
                    404 => format!("Not found ({}).", e),
                    429 => "Too many requests. Wait a moment and try again.".to_string(),
                    500..=599 => format!("The server reported an error ({}).", e),
                    _ => e.to_string(),
                },
                ApiError::Decode { .. } => {
                    "Unexpected response from the server. Try again, and check the log for the raw body."
                        .to_string()
                }
                ApiError::Keyring(_) => e.to_string(),
            },
            AppError::Io(e) => format!("A file operation failed: {}", e),
            AppError::Other(msg) => msg.clone(),
        }
    }

    /// A follow-up hint for the user, when one exists.
    pub fn suggested_action(&self) -> Option<&'static str> {
        match self {
            AppError::Config(ConfigError::NotFound(_)) => {
                Some("Run 'atlasctl config init --site-url <url> --email <email>' first.")
            }
            AppError::Api(ApiError::Keyring(_)) => {
                Some("Run 'atlasctl auth login' to store your API token, or set ATLASCTL_TOKEN.")
            }
            AppError::Api(e) if e.is_auth_error() => Some(
                "Check your API token at https://id.atlassian.com/manage-profile/security/api-tokens",
            ),
            AppError::Api(ApiError::Transport(_)) | AppError::Api(ApiError::Timeout) => {
                Some("Check your internet connection and the configured site URL.")
            }
            _ => None,
        }
    }
}
