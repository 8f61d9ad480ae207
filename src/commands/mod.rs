//! Console command handlers.
//!
//! Each submodule maps one subcommand group to service calls and prints
//! the result. Handlers never talk HTTP themselves; everything goes
//! through the clients in [`crate::api`].

pub mod auth;
pub mod comments;
pub mod config;
pub mod confluence;
pub mod issues;
pub mod report;
pub mod search;

use crate::api::{auth::resolve_token, ConfluenceClient, JiraClient};
use crate::config::Config;
use crate::error::Result;

/// Build a Jira client from the configuration and the resolved token.
pub fn jira_client(config: &Config) -> Result<JiraClient> {
    let token = resolve_token(&config.email)?;
    Ok(JiraClient::new(
        &config.site_url,
        &config.email,
        &token,
        config.timeout(),
    )?)
}

/// Build a Confluence client for the same site.
pub fn confluence_client(config: &Config) -> Result<ConfluenceClient> {
    let token = resolve_token(&config.email)?;
    Ok(ConfluenceClient::new(
        &config.site_url,
        &config.email,
        &token,
        config.timeout(),
    )?)
}
