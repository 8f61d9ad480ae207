//! JQL assembly by clause concatenation.
//!
//! The builder produces a query string; it does not validate JQL
//! semantics. Values are quoted with embedded quotes escaped, so a
//! project name like `Release "X"` survives intact.

/// Accumulates `field = "value"` clauses joined with ` AND `.
#[derive(Debug, Clone, Default)]
pub struct JqlBuilder {
    clauses: Vec<String>,
    order_by: Option<String>,
}

impl JqlBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn project(mut self, key: &str) -> Self {
        self.clauses.push(format!("project = {}", quote(key)));
        self
    }

    pub fn assignee(mut self, account: &str) -> Self {
        self.clauses.push(format!("assignee = {}", quote(account)));
        self
    }

    /// Filter to issues assigned to the calling user.
    pub fn assigned_to_me(mut self) -> Self {
        self.clauses.push("assignee = currentUser()".to_string());
        self
    }

    pub fn status(mut self, name: &str) -> Self {
        self.clauses.push(format!("status = {}", quote(name)));
        self
    }

    pub fn issue_type(mut self, name: &str) -> Self {
        self.clauses.push(format!("issuetype = {}", quote(name)));
        self
    }

    pub fn label(mut self, label: &str) -> Self {
        self.clauses.push(format!("labels = {}", quote(label)));
        self
    }

    /// Free-text match over summary and description.
    pub fn text(mut self, needle: &str) -> Self {
        self.clauses.push(format!("text ~ {}", quote(needle)));
        self
    }

    /// Issues in any open sprint of the filtered projects.
    pub fn open_sprints(mut self) -> Self {
        self.clauses.push("sprint in openSprints()".to_string());
        self
    }

    /// Append a clause verbatim, for anything the named methods don't cover.
    pub fn raw(mut self, clause: &str) -> Self {
        self.clauses.push(clause.to_string());
        self
    }

    pub fn order_by(mut self, field: &str, descending: bool) -> Self {
        let direction = if descending { "DESC" } else { "ASC" };
        self.order_by = Some(format!("{} {}", field, direction));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn build(self) -> String {
        let mut jql = self.clauses.join(" AND ");
        if let Some(order) = self.order_by {
            if jql.is_empty() {
                jql = format!("ORDER BY {}", order);
            } else {
                jql = format!("{} ORDER BY {}", jql, order);
            }
        }
        jql
    }
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}
