//! Jira service built on the shared HTTP contract layer.
//!
//! Each method maps one REST operation: assemble the path (query values
//! percent-encoded), delegate to [`ApiClient`], return the typed result.
//! No method re-implements transport, decoding, or error handling.

use std::time::Duration;

use tracing::{debug, instrument};

use super::error::Result;
use super::http::ApiClient;
use super::types::{
    AssignRequest, Comment, CommentRequest, CommentsResponse, CreateIssueRequest, CreatedIssue,
    CurrentUser, Issue, IssueUpdate, Priority, Project, ProjectsResponse, SearchResult,
    Transition, TransitionRequest, TransitionsResponse, User,
};

/// Jira caps search pages at 100 results.
const MAX_SEARCH_PAGE: u32 = 100;

/// Client for the Jira Cloud REST API v3.
#[derive(Debug)]
pub struct JiraClient {
    api: ApiClient,
}

impl JiraClient {
    /// Build a client for a site.
    pub fn new(site_url: &str, email: &str, token: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            api: ApiClient::new(site_url, email, token, timeout)?,
        })
    }

    /// The authenticated user, from `GET /rest/api/3/myself`.
    ///
    /// Doubles as a connection check: a 401 here means the email/token
    /// pair is wrong.
    #[instrument(skip(self))]
    pub async fn current_user(&self) -> Result<CurrentUser> {
        self.api.get("/rest/api/3/myself").await
    }

    /// Search issues with a JQL query.
    #[instrument(skip(self), fields(jql = %jql))]
    pub async fn search_issues(&self, jql: &str, max_results: u32) -> Result<SearchResult> {
        let path = format!(
            "/rest/api/3/search?jql={}&maxResults={}",
            urlencoding::encode(jql),
            max_results.min(MAX_SEARCH_PAGE)
        );
        let result: SearchResult = self.api.get(&path).await?;
        debug!(found = result.issues.len(), total = result.total, "search completed");
        Ok(result)
    }

    /// Fetch a single issue by key.
    #[instrument(skip(self))]
    pub async fn get_issue(&self, key: &str) -> Result<Issue> {
        let path = format!("/rest/api/3/issue/{}", key);
        self.api.get(&path).await
    }

    /// Create an issue and return the key receipt.
    #[instrument(skip(self, request))]
    pub async fn create_issue(&self, request: &CreateIssueRequest) -> Result<CreatedIssue> {
        self.api.post("/rest/api/3/issue", request).await
    }

    /// Apply a partial field update to an issue.
    ///
    /// The endpoint answers `204 No Content` on success.
    #[instrument(skip(self, update))]
    pub async fn update_issue(&self, key: &str, update: &IssueUpdate) -> Result<bool> {
        let path = format!("/rest/api/3/issue/{}", key);
        self.api.put(&path, update).await
    }

    /// Assign an issue to an account, or unassign with `None`.
    #[instrument(skip(self))]
    pub async fn assign_issue(&self, key: &str, account_id: Option<String>) -> Result<bool> {
        let path = format!("/rest/api/3/issue/{}/assignee", key);
        self.api.put(&path, &AssignRequest { account_id }).await
    }

    /// List the workflow transitions currently available on an issue.
    #[instrument(skip(self))]
    pub async fn transitions(&self, key: &str) -> Result<Vec<Transition>> {
        let path = format!("/rest/api/3/issue/{}/transitions", key);
        let listing: TransitionsResponse = self.api.get(&path).await?;
        Ok(listing.transitions)
    }

    /// Execute a workflow transition by id.
    ///
    /// Replies `204 No Content`, so this goes through the status-only
    /// request path; routing it through a decoding path would misreport
    /// every successful transition as a failure.
    #[instrument(skip(self))]
    pub async fn transition_issue(&self, key: &str, transition_id: &str) -> Result<bool> {
        let path = format!("/rest/api/3/issue/{}/transitions", key);
        self.api
            .post_no_content(&path, &TransitionRequest::new(transition_id))
            .await
    }

    /// List comments on an issue, oldest first.
    #[instrument(skip(self))]
    pub async fn comments(&self, key: &str, max_results: u32) -> Result<CommentsResponse> {
        let path = format!(
            "/rest/api/3/issue/{}/comment?maxResults={}",
            key, max_results
        );
        self.api.get(&path).await
    }

    /// Add a plain-text comment (wrapped into an ADF body) to an issue.
    #[instrument(skip(self, text))]
    pub async fn add_comment(&self, key: &str, text: &str) -> Result<Comment> {
        let path = format!("/rest/api/3/issue/{}/comment", key);
        self.api.post(&path, &CommentRequest::from_text(text)).await
    }

    /// Delete a comment from an issue.
    #[instrument(skip(self))]
    pub async fn delete_comment(&self, key: &str, comment_id: &str) -> Result<bool> {
        let path = format!("/rest/api/3/issue/{}/comment/{}", key, comment_id);
        self.api.delete(&path).await
    }

    /// List projects visible to the authenticated user.
    #[instrument(skip(self))]
    pub async fn projects(&self, max_results: u32) -> Result<Vec<Project>> {
        let path = format!("/rest/api/3/project/search?maxResults={}", max_results);
        let page: ProjectsResponse = self.api.get(&path).await?;
        Ok(page.values)
    }

    /// List the priorities configured on the site.
    #[instrument(skip(self))]
    pub async fn priorities(&self) -> Result<Vec<Priority>> {
        self.api.get("/rest/api/3/priority").await
    }

    /// Find users matching a display name or email query.
    #[instrument(skip(self))]
    pub async fn find_users(&self, query: &str) -> Result<Vec<User>> {
        let path = format!(
            "/rest/api/3/user/search?query={}",
            urlencoding::encode(query)
        );
        self.api.get(&path).await
    }

    /// The browser URL for an issue.
    pub fn browse_url(&self, key: &str) -> String {
        format!("{}/browse/{}", self.api.base_url(), key)
    }
}
