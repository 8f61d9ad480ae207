//! Jira REST API v3 request and response types.
//!
//! Optional upstream fields are modeled as `Option` or defaulted; field
//! presence is never assumed. Rich-text fields stay untyped JSON until a
//! caller materializes them through [`crate::api::adf`].

use std::fmt;

use serde::{Deserialize, Serialize};

use super::adf::{self, AtlassianDoc};

/// The authenticated user, from `GET /rest/api/3/myself`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    pub account_id: String,
    pub display_name: String,
    /// May be empty when the user hides their email.
    #[serde(default)]
    pub email_address: String,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub time_zone: Option<String>,
}

fn default_true() -> bool {
    true
}

/// Any other Jira user, as embedded in issues and returned by user search.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub account_id: String,
    pub display_name: String,
    #[serde(default)]
    pub email_address: Option<String>,
    #[serde(default = "default_true")]
    pub active: bool,
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name)
    }
}

/// A Jira project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub key: String,
    pub name: String,
}

/// One page of projects, from `GET /rest/api/3/project/search`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectsResponse {
    #[serde(default)]
    pub values: Vec<Project>,
    #[serde(default)]
    pub is_last: bool,
}

/// A project component.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Component {
    pub id: String,
    pub name: String,
}

/// Issue status.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub status_category: Option<StatusCategory>,
}

impl Status {
    /// Whether this status sits in the "done" category.
    ///
    /// Falls back to the status name when the category is absent from the
    /// payload.
    pub fn is_done(&self) -> bool {
        match &self.status_category {
            Some(category) => category.key == "done",
            None => self.name.eq_ignore_ascii_case("done"),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Status category: groups statuses into to-do, in-progress, done.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCategory {
    pub id: u32,
    pub key: String,
    pub name: String,
}

/// Issue type: Bug, Story, Task, Epic, …
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueType {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub subtask: bool,
}

/// Issue priority.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Priority {
    pub id: String,
    pub name: String,
}

/// A Jira issue, from `GET /rest/api/3/issue/{key}` or search results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub id: String,
    pub key: String,
    #[serde(rename = "self")]
    pub self_url: String,
    pub fields: IssueFields,
}

impl Issue {
    pub fn summary(&self) -> &str {
        &self.fields.summary
    }

    pub fn status(&self) -> &str {
        &self.fields.status.name
    }

    pub fn issue_type(&self) -> &str {
        &self.fields.issuetype.name
    }

    pub fn assignee_name(&self) -> &str {
        self.fields
            .assignee
            .as_ref()
            .map(|user| user.display_name.as_str())
            .unwrap_or("Unassigned")
    }

    pub fn priority_name(&self) -> &str {
        self.fields
            .priority
            .as_ref()
            .map(|priority| priority.name.as_str())
            .unwrap_or("None")
    }

    /// The description flattened to plain text.
    ///
    /// Handles both legacy plain-string descriptions and ADF documents;
    /// absent or malformed values yield the empty string.
    pub fn description_text(&self) -> String {
        self.fields
            .description
            .as_ref()
            .map(adf::decode_rich_text)
            .unwrap_or_default()
    }

    /// Story points from the estimation field, when the project tracks them.
    pub fn story_points(&self) -> Option<f64> {
        self.fields.story_points
    }

    pub fn is_done(&self) -> bool {
        self.fields.status.is_done()
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.fields.summary)
    }
}

/// Issue fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueFields {
    pub summary: String,
    /// Plain string on legacy issues, ADF document otherwise.
    #[serde(default)]
    pub description: Option<serde_json::Value>,
    pub status: Status,
    pub issuetype: IssueType,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub assignee: Option<User>,
    #[serde(default)]
    pub reporter: Option<User>,
    #[serde(default)]
    pub project: Option<Project>,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub components: Vec<Component>,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub updated: Option<String>,
    #[serde(default)]
    pub duedate: Option<String>,
    /// The default story-point estimate field on Jira Cloud.
    #[serde(default, rename = "customfield_10016")]
    pub story_points: Option<f64>,
}

/// One page of JQL search results, from `GET /rest/api/3/search`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub start_at: u32,
    pub max_results: u32,
    pub total: u32,
    #[serde(default)]
    pub issues: Vec<Issue>,
}

impl SearchResult {
    pub fn has_more(&self) -> bool {
        self.start_at + (self.issues.len() as u32) < self.total
    }
}

/// A workflow transition available on an issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transition {
    pub id: String,
    pub name: String,
    /// The status the issue lands in after this transition.
    #[serde(default)]
    pub to: Option<Status>,
}

/// Listing from `GET /rest/api/3/issue/{key}/transitions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionsResponse {
    #[serde(default)]
    pub transitions: Vec<Transition>,
}

/// Body for `POST /rest/api/3/issue/{key}/transitions`.
///
/// The endpoint replies `204 No Content`; it must be issued through the
/// status-only request path.
#[derive(Debug, Serialize)]
pub struct TransitionRequest {
    pub transition: TransitionTarget,
}

#[derive(Debug, Serialize)]
pub struct TransitionTarget {
    pub id: String,
}

impl TransitionRequest {
    pub fn new(transition_id: &str) -> Self {
        Self {
            transition: TransitionTarget {
                id: transition_id.to_string(),
            },
        }
    }
}

/// A comment on an issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    /// The body in Atlassian Document Format.
    pub body: AtlassianDoc,
    pub author: User,
    pub created: String,
    pub updated: String,
}

impl Comment {
    pub fn body_text(&self) -> String {
        self.body.to_plain_text()
    }
}

/// One page of comments, from `GET /rest/api/3/issue/{key}/comment`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentsResponse {
    pub start_at: u32,
    pub max_results: u32,
    pub total: u32,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

/// Body for `POST /rest/api/3/issue/{key}/comment`.
#[derive(Debug, Serialize)]
pub struct CommentRequest {
    pub body: AtlassianDoc,
}

impl CommentRequest {
    pub fn from_text(text: &str) -> Self {
        Self {
            body: AtlassianDoc::from_text(text),
        }
    }
}

/// Receipt from `POST /rest/api/3/issue`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedIssue {
    pub id: String,
    pub key: String,
    #[serde(rename = "self")]
    pub self_url: String,
}

/// Reference to a project by key, for outbound payloads.
#[derive(Debug, Serialize)]
pub struct ProjectRef {
    pub key: String,
}

/// Reference to an entity by name (issue type, priority).
#[derive(Debug, Serialize)]
pub struct NamedRef {
    pub name: String,
}

/// Reference to a user by account id, for outbound payloads.
#[derive(Debug, Serialize)]
pub struct AccountRef {
    pub id: String,
}

/// Body for `POST /rest/api/3/issue`.
#[derive(Debug, Serialize)]
pub struct CreateIssueRequest {
    pub fields: CreateIssueFields,
}

#[derive(Debug, Serialize)]
pub struct CreateIssueFields {
    pub project: ProjectRef,
    pub summary: String,
    pub issuetype: NamedRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<AtlassianDoc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<NamedRef>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<AccountRef>,
}

impl CreateIssueRequest {
    pub fn new(project_key: &str, summary: &str, issue_type: &str) -> Self {
        Self {
            fields: CreateIssueFields {
                project: ProjectRef {
                    key: project_key.to_string(),
                },
                summary: summary.to_string(),
                issuetype: NamedRef {
                    name: issue_type.to_string(),
                },
                description: None,
                priority: None,
                labels: Vec::new(),
                assignee: None,
            },
        }
    }

    pub fn description(mut self, text: &str) -> Self {
        self.fields.description = Some(AtlassianDoc::from_text(text));
        self
    }

    pub fn priority(mut self, name: &str) -> Self {
        self.fields.priority = Some(NamedRef {
            name: name.to_string(),
        });
        self
    }

    pub fn labels(mut self, labels: Vec<String>) -> Self {
        self.fields.labels = labels;
        self
    }

    pub fn assignee(mut self, account_id: &str) -> Self {
        self.fields.assignee = Some(AccountRef {
            id: account_id.to_string(),
        });
        self
    }
}

/// Body for `PUT /rest/api/3/issue/{key}`.
///
/// Only the fields explicitly set are serialized; the endpoint leaves the
/// rest of the issue untouched.
#[derive(Debug, Default, Serialize)]
pub struct IssueUpdate {
    fields: UpdateFields,
}

#[derive(Debug, Default, Serialize)]
struct UpdateFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<AtlassianDoc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    priority: Option<NamedRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    labels: Option<Vec<String>>,
}

impl IssueUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn summary(mut self, summary: &str) -> Self {
        self.fields.summary = Some(summary.to_string());
        self
    }

    pub fn description(mut self, text: &str) -> Self {
        self.fields.description = Some(AtlassianDoc::from_text(text));
        self
    }

    pub fn priority(mut self, name: &str) -> Self {
        self.fields.priority = Some(NamedRef {
            name: name.to_string(),
        });
        self
    }

    pub fn labels(mut self, labels: Vec<String>) -> Self {
        self.fields.labels = Some(labels);
        self
    }

    /// True when no field has been set; the service rejects empty updates
    /// before issuing a request.
    pub fn is_empty(&self) -> bool {
        self.fields.summary.is_none()
            && self.fields.description.is_none()
            && self.fields.priority.is_none()
            && self.fields.labels.is_none()
    }
}

/// Body for `PUT /rest/api/3/issue/{key}/assignee`.
///
/// A `null` account id unassigns the issue.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignRequest {
    pub account_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_issue() {
        let json = r#"{
            "id": "10001",
            "key": "PROJ-123",
            "self": "https://company.atlassian.net/rest/api/3/issue/10001",
            "fields": {
                "summary": "Test issue",
                "status": {"id": "1", "name": "To Do"},
                "issuetype": {"id": "10001", "name": "Bug"}
            }
        }"#;

        let issue: Issue = serde_json::from_str(json).unwrap();
        assert_eq!(issue.key, "PROJ-123");
        assert_eq!(issue.summary(), "Test issue");
        assert_eq!(issue.status(), "To Do");
        assert_eq!(issue.issue_type(), "Bug");
        assert_eq!(issue.assignee_name(), "Unassigned");
        assert_eq!(issue.priority_name(), "None");
        assert_eq!(issue.description_text(), "");
    }

    #[test]
    fn parse_full_issue() {
        let json = r#"{
            "id": "10001",
            "key": "PROJ-123",
            "self": "https://company.atlassian.net/rest/api/3/issue/10001",
            "fields": {
                "summary": "Full issue",
                "status": {
                    "id": "3",
                    "name": "In Progress",
                    "statusCategory": {"id": 4, "key": "indeterminate", "name": "In Progress"}
                },
                "issuetype": {"id": "10001", "name": "Story", "subtask": false},
                "priority": {"id": "2", "name": "High"},
                "assignee": {"accountId": "abc123", "displayName": "John Doe", "active": true},
                "reporter": {"accountId": "def456", "displayName": "Jane Smith", "active": true},
                "project": {"id": "10000", "key": "PROJ", "name": "My Project"},
                "labels": ["frontend", "urgent"],
                "components": [{"id": "10001", "name": "UI"}],
                "created": "2024-01-15T10:00:00.000+0000",
                "updated": "2024-01-16T14:30:00.000+0000",
                "customfield_10016": 5.0
            }
        }"#;

        let issue: Issue = serde_json::from_str(json).unwrap();
        assert_eq!(issue.priority_name(), "High");
        assert_eq!(issue.assignee_name(), "John Doe");
        assert_eq!(issue.fields.labels, vec!["frontend", "urgent"]);
        assert_eq!(issue.story_points(), Some(5.0));
        assert!(!issue.is_done());
    }

    #[test]
    fn issue_with_adf_description() {
        let json = r#"{
            "id": "10001",
            "key": "PROJ-123",
            "self": "https://example.com",
            "fields": {
                "summary": "Test issue",
                "description": {
                    "type": "doc",
                    "version": 1,
                    "content": [
                        {"type": "paragraph", "content": [{"type": "text", "text": "The details."}]}
                    ]
                },
                "status": {"id": "1", "name": "Open"},
                "issuetype": {"id": "1", "name": "Bug"}
            }
        }"#;

        let issue: Issue = serde_json::from_str(json).unwrap();
        assert_eq!(issue.description_text(), "The details.");
    }

    #[test]
    fn issue_with_legacy_string_description() {
        let json = r#"{
            "id": "10001",
            "key": "PROJ-123",
            "self": "https://example.com",
            "fields": {
                "summary": "Test issue",
                "description": "plain old text",
                "status": {"id": "1", "name": "Open"},
                "issuetype": {"id": "1", "name": "Bug"}
            }
        }"#;

        let issue: Issue = serde_json::from_str(json).unwrap();
        assert_eq!(issue.description_text(), "plain old text");
    }

    #[test]
    fn status_done_detection_prefers_category() {
        let done: Status = serde_json::from_str(
            r#"{"id": "5", "name": "Closed", "statusCategory": {"id": 3, "key": "done", "name": "Done"}}"#,
        )
        .unwrap();
        assert!(done.is_done());

        let no_category: Status =
            serde_json::from_str(r#"{"id": "5", "name": "Done"}"#).unwrap();
        assert!(no_category.is_done());

        let open: Status = serde_json::from_str(r#"{"id": "1", "name": "Open"}"#).unwrap();
        assert!(!open.is_done());
    }

    #[test]
    fn parse_search_result_and_paging() {
        let json = r#"{
            "startAt": 0,
            "maxResults": 50,
            "total": 2,
            "issues": [
                {
                    "id": "10001", "key": "PROJ-1",
                    "self": "https://example.com/10001",
                    "fields": {
                        "summary": "First",
                        "status": {"id": "1", "name": "Open"},
                        "issuetype": {"id": "1", "name": "Bug"}
                    }
                },
                {
                    "id": "10002", "key": "PROJ-2",
                    "self": "https://example.com/10002",
                    "fields": {
                        "summary": "Second",
                        "status": {"id": "2", "name": "Done"},
                        "issuetype": {"id": "2", "name": "Task"}
                    }
                }
            ]
        }"#;

        let result: SearchResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.total, 2);
        assert_eq!(result.issues.len(), 2);
        assert!(!result.has_more());
    }

    #[test]
    fn search_result_has_more_pages() {
        let json = r#"{"startAt": 0, "maxResults": 1, "total": 3, "issues": []}"#;
        let mut result: SearchResult = serde_json::from_str(json).unwrap();
        assert!(result.has_more());
        result.start_at = 3;
        assert!(!result.has_more());
    }

    #[test]
    fn parse_transitions_listing() {
        let json = r#"{
            "transitions": [
                {"id": "11", "name": "To Do", "to": {"id": "1", "name": "To Do"}},
                {"id": "31", "name": "Done", "to": {"id": "5", "name": "Done"}}
            ]
        }"#;

        let listing: TransitionsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(listing.transitions.len(), 2);
        assert_eq!(listing.transitions[1].id, "31");
        assert_eq!(listing.transitions[1].to.as_ref().unwrap().name, "Done");
    }

    #[test]
    fn transition_request_serializes_the_id_only() {
        let request = TransitionRequest::new("31");
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value, serde_json::json!({"transition": {"id": "31"}}));
    }

    #[test]
    fn parse_comment_and_flatten_body() {
        let json = r#"{
            "id": "10001",
            "body": {
                "type": "doc",
                "version": 1,
                "content": [
                    {"type": "paragraph", "content": [{"type": "text", "text": "A comment."}]}
                ]
            },
            "author": {"accountId": "abc123", "displayName": "John Doe", "active": true},
            "created": "2024-01-15T10:00:00.000+0000",
            "updated": "2024-01-15T10:00:00.000+0000"
        }"#;

        let comment: Comment = serde_json::from_str(json).unwrap();
        assert_eq!(comment.body_text(), "A comment.");
        assert_eq!(comment.author.display_name, "John Doe");
    }

    #[test]
    fn comment_request_builds_an_adf_body() {
        let request = CommentRequest::from_text("looks good");
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["body"]["type"], "doc");
        assert_eq!(
            value["body"]["content"][0]["content"][0]["text"],
            "looks good"
        );
    }

    #[test]
    fn create_issue_request_skips_unset_fields() {
        let request = CreateIssueRequest::new("PROJ", "New thing", "Task");
        let value = serde_json::to_value(&request).unwrap();
        let fields = value.get("fields").unwrap();
        assert_eq!(fields["project"]["key"], "PROJ");
        assert_eq!(fields["issuetype"]["name"], "Task");
        assert!(fields.get("description").is_none());
        assert!(fields.get("priority").is_none());
        assert!(fields.get("labels").is_none());
        assert!(fields.get("assignee").is_none());
    }

    #[test]
    fn create_issue_request_with_everything_set() {
        let request = CreateIssueRequest::new("PROJ", "New thing", "Bug")
            .description("broken on save")
            .priority("High")
            .labels(vec!["backend".to_string()])
            .assignee("abc123");
        let value = serde_json::to_value(&request).unwrap();
        let fields = value.get("fields").unwrap();
        assert_eq!(fields["priority"]["name"], "High");
        assert_eq!(fields["labels"][0], "backend");
        assert_eq!(fields["assignee"]["id"], "abc123");
        assert_eq!(fields["description"]["type"], "doc");
    }

    #[test]
    fn issue_update_tracks_emptiness() {
        assert!(IssueUpdate::new().is_empty());

        let update = IssueUpdate::new().summary("renamed");
        assert!(!update.is_empty());
        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(value["fields"]["summary"], "renamed");
        assert!(value["fields"].get("priority").is_none());
    }

    #[test]
    fn assign_request_serializes_null_for_unassign() {
        let unassign = AssignRequest { account_id: None };
        let value = serde_json::to_value(&unassign).unwrap();
        assert_eq!(value, serde_json::json!({"accountId": null}));
    }

    #[test]
    fn parse_created_issue_receipt() {
        let json = r#"{"id": "10042", "key": "PROJ-42", "self": "https://example.com/10042"}"#;
        let created: CreatedIssue = serde_json::from_str(json).unwrap();
        assert_eq!(created.key, "PROJ-42");
    }

    #[test]
    fn parse_current_user() {
        let json = r#"{
            "accountId": "abc123",
            "displayName": "Test User",
            "emailAddress": "test@example.com",
            "active": true,
            "timeZone": "Europe/Berlin"
        }"#;

        let user: CurrentUser = serde_json::from_str(json).unwrap();
        assert_eq!(user.account_id, "abc123");
        assert_eq!(user.display_name, "Test User");
        assert!(user.active);
    }

    #[test]
    fn issue_display_shows_key_and_summary() {
        let json = r#"{
            "id": "1", "key": "T-1", "self": "u",
            "fields": {
                "summary": "Short",
                "status": {"id": "1", "name": "Open"},
                "issuetype": {"id": "1", "name": "Bug"}
            }
        }"#;
        let issue: Issue = serde_json::from_str(json).unwrap();
        assert_eq!(issue.to_string(), "T-1: Short");
    }
}
