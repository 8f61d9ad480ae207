//! Basic-Auth credentials and API token storage.
//!
//! Atlassian Cloud authenticates with `base64(email:api_token)` on every
//! request. The header value is computed once at construction; the raw
//! token is not kept around afterwards. Tokens at rest live in the OS
//! keyring, keyed by account email, with an environment-variable override
//! for scripted use.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

use super::error::{ApiError, Result};

/// The keyring service name for atlasctl tokens.
const KEYRING_SERVICE: &str = "atlasctl";

/// Environment variable that overrides the keyring token.
pub const TOKEN_ENV_VAR: &str = "ATLASCTL_TOKEN";

/// Authentication credentials for the Atlassian REST APIs.
#[derive(Debug, Clone)]
pub struct Auth {
    /// The account email address.
    email: String,
    /// The precomputed "Basic ..." authorization header value.
    auth_header: String,
}

impl Auth {
    /// Build credentials from an email and API token.
    ///
    /// The token is encoded immediately and not stored in clear.
    pub fn new(email: &str, token: &str) -> Self {
        let credentials = format!("{}:{}", email, token);
        let auth_header = format!("Basic {}", BASE64.encode(credentials.as_bytes()));
        Self {
            email: email.to_string(),
            auth_header,
        }
    }

    /// The complete Authorization header value.
    pub fn header_value(&self) -> &str {
        &self.auth_header
    }

    /// The account email these credentials belong to.
    pub fn email(&self) -> &str {
        &self.email
    }
}

/// Resolve the API token for an account.
///
/// Checks the `ATLASCTL_TOKEN` environment variable first, then the OS
/// keyring entry for the email.
pub fn resolve_token(email: &str) -> Result<String> {
    if let Ok(token) = std::env::var(TOKEN_ENV_VAR) {
        if !token.is_empty() {
            return Ok(token);
        }
    }
    get_token(email)
}

/// Store an API token in the OS keyring for an account email.
pub fn store_token(email: &str, token: &str) -> Result<()> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, email)
        .map_err(|e| ApiError::Keyring(format!("failed to create keyring entry: {}", e)))?;

    entry
        .set_password(token)
        .map_err(|e| ApiError::Keyring(format!("failed to store token: {}", e)))
}

/// Retrieve an API token from the OS keyring.
pub fn get_token(email: &str) -> Result<String> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, email)
        .map_err(|e| ApiError::Keyring(format!("failed to access keyring: {}", e)))?;

    entry
        .get_password()
        .map_err(|e| ApiError::Keyring(format!("failed to retrieve token: {}", e)))
}

/// Remove a stored API token.
pub fn delete_token(email: &str) -> Result<()> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, email)
        .map_err(|e| ApiError::Keyring(format!("failed to access keyring: {}", e)))?;

    entry
        .delete_password()
        .map_err(|e| ApiError::Keyring(format!("failed to delete token: {}", e)))
}

/// Whether a token is stored for the given account email.
pub fn has_token(email: &str) -> bool {
    get_token(email).is_ok()
}
