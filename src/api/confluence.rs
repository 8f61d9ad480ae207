//! Confluence service built on the shared HTTP contract layer.
//!
//! Targets the `/wiki` REST surface of the same Atlassian site. Page
//! bodies come back as storage-format markup; they are shown as-is, no
//! rendering is attempted.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::error::Result;
use super::http::ApiClient;

/// A Confluence space.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Space {
    #[serde(default)]
    pub id: Option<i64>,
    pub key: String,
    pub name: String,
    #[serde(default, rename = "type")]
    pub space_type: Option<String>,
}

impl fmt::Display for Space {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.key)
    }
}

/// A page or other content entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub version: Option<PageVersion>,
    #[serde(default)]
    pub body: Option<PageBody>,
}

impl Page {
    /// The storage-format body markup, when the page was fetched with the
    /// body expanded.
    pub fn storage_body(&self) -> Option<&str> {
        self.body
            .as_ref()
            .and_then(|body| body.storage.as_ref())
            .map(|storage| storage.value.as_str())
    }

    pub fn version_number(&self) -> Option<u32> {
        self.version.as_ref().map(|version| version.number)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageVersion {
    pub number: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageBody {
    #[serde(default)]
    pub storage: Option<PageBodyStorage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageBodyStorage {
    pub value: String,
    #[serde(default)]
    pub representation: Option<String>,
}

/// Envelope shared by the space and content listing endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultsPage<T> {
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    #[serde(default)]
    pub size: Option<u32>,
}

/// Client for the Confluence Cloud REST API.
#[derive(Debug)]
pub struct ConfluenceClient {
    api: ApiClient,
}

impl ConfluenceClient {
    /// Build a client for a site; `site_url` is the bare site, the `/wiki`
    /// prefix is added per request.
    pub fn new(site_url: &str, email: &str, token: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            api: ApiClient::new(site_url, email, token, timeout)?,
        })
    }

    /// List spaces visible to the authenticated user.
    #[instrument(skip(self))]
    pub async fn spaces(&self, limit: u32) -> Result<Vec<Space>> {
        let path = format!("/wiki/rest/api/space?limit={}", limit);
        let page: ResultsPage<Space> = self.api.get(&path).await?;
        Ok(page.results)
    }

    /// List pages in a space, most recently created first.
    #[instrument(skip(self))]
    pub async fn pages_in_space(&self, space_key: &str, limit: u32) -> Result<Vec<Page>> {
        let path = format!(
            "/wiki/rest/api/content?spaceKey={}&type=page&limit={}&expand=version",
            urlencoding::encode(space_key),
            limit
        );
        let page: ResultsPage<Page> = self.api.get(&path).await?;
        Ok(page.results)
    }

    /// Fetch one page with its body and version expanded.
    #[instrument(skip(self))]
    pub async fn get_page(&self, id: &str) -> Result<Page> {
        let path = format!(
            "/wiki/rest/api/content/{}?expand=body.storage,version",
            id
        );
        self.api.get(&path).await
    }

    /// Search content with a CQL query.
    #[instrument(skip(self), fields(cql = %cql))]
    pub async fn search(&self, cql: &str, limit: u32) -> Result<Vec<Page>> {
        let path = format!(
            "/wiki/rest/api/content/search?cql={}&limit={}",
            urlencoding::encode(cql),
            limit
        );
        let page: ResultsPage<Page> = self.api.get(&path).await?;
        Ok(page.results)
    }
}
