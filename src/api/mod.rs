//! Clients for the Atlassian Cloud REST APIs.
//!
//! One shared request layer ([`http::ApiClient`]) carries authentication,
//! status interpretation, and body decoding; the Jira and Confluence
//! clients are thin path-assembly wrappers on top of it.

pub mod adf;
pub mod auth;
pub mod confluence;
pub mod error;
pub mod http;
pub mod jira;
pub mod types;

pub use confluence::ConfluenceClient;
pub use error::{ApiError, Result};
pub use jira::JiraClient;
