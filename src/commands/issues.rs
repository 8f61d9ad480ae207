//! Issue workflow commands.

use crate::api::types::{CreateIssueRequest, Issue, IssueUpdate, SearchResult};
use crate::api::JiraClient;
use crate::cli::{IssueCommand, IssueFilters};
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::jql::JqlBuilder;

pub async fn run(command: IssueCommand, jira: &JiraClient, config: &Config) -> Result<()> {
    match command {
        IssueCommand::View { key } => {
            let issue = jira.get_issue(&key).await?;
            print_issue(&issue);
        }
        IssueCommand::Search { filters } => {
            let limit = filters.limit.unwrap_or(config.page_size);
            let jql = build_jql(&filters);
            if jql.is_empty() {
                return Err(AppError::other(
                    "give at least one filter, or --jql for a raw query",
                ));
            }
            let result = jira.search_issues(&jql, limit).await?;
            print_issue_table(&result);
        }
        IssueCommand::Create {
            project,
            summary,
            issue_type,
            description,
            priority,
            label,
            assignee,
        } => {
            let mut request = CreateIssueRequest::new(&project, &summary, &issue_type);
            if let Some(text) = &description {
                request = request.description(text);
            }
            if let Some(name) = &priority {
                request = request.priority(name);
            }
            if !label.is_empty() {
                request = request.labels(label);
            }
            if let Some(assignee) = &assignee {
                let account_id = resolve_account(jira, assignee).await?;
                match account_id {
                    Some(id) => request = request.assignee(&id),
                    None => return Err(AppError::other("cannot create an issue assigned to nobody")),
                }
            }

            let created = jira.create_issue(&request).await?;
            println!("Created {}", created.key);
            println!("{}", jira.browse_url(&created.key));
        }
        IssueCommand::Edit {
            key,
            summary,
            description,
            priority,
            label,
        } => {
            let mut update = IssueUpdate::new();
            if let Some(summary) = &summary {
                update = update.summary(summary);
            }
            if let Some(text) = &description {
                update = update.description(text);
            }
            if let Some(name) = &priority {
                update = update.priority(name);
            }
            if !label.is_empty() {
                update = update.labels(label);
            }
            if update.is_empty() {
                return Err(AppError::other("nothing to update; give at least one field flag"));
            }

            jira.update_issue(&key, &update).await?;
            println!("Updated {}.", key);
        }
        IssueCommand::Assign { key, assignee } => {
            let account_id = resolve_account(jira, &assignee).await?;
            jira.assign_issue(&key, account_id.clone()).await?;
            match account_id {
                Some(_) => println!("{} assigned to {}.", key, assignee),
                None => println!("{} unassigned.", key),
            }
        }
        IssueCommand::Transition { key, to } => match to {
            None => {
                let transitions = jira.transitions(&key).await?;
                if transitions.is_empty() {
                    println!("No transitions available on {}.", key);
                    return Ok(());
                }
                println!("Transitions for {}:", key);
                for transition in &transitions {
                    let target = transition
                        .to
                        .as_ref()
                        .map(|status| status.name.as_str())
                        .unwrap_or("?");
                    println!("  [{}] {} -> {}", transition.id, transition.name, target);
                }
            }
            Some(wanted) => {
                let transitions = jira.transitions(&key).await?;
                let chosen = transitions.iter().find(|transition| {
                    transition.id == wanted || transition.name.eq_ignore_ascii_case(&wanted)
                });
                let chosen = chosen.ok_or_else(|| {
                    let names: Vec<&str> =
                        transitions.iter().map(|t| t.name.as_str()).collect();
                    AppError::other(format!(
                        "no transition '{}' on {}; available: {}",
                        wanted,
                        key,
                        names.join(", ")
                    ))
                })?;

                jira.transition_issue(&key, &chosen.id).await?;
                println!("{} moved via '{}'.", key, chosen.name);
            }
        },
        IssueCommand::Open { key } => {
            let url = jira.browse_url(&key);
            open::that(&url)?;
            println!("Opened {}", url);
        }
    }
    Ok(())
}

/// List projects visible to the user.
pub async fn projects(jira: &JiraClient, limit: u32) -> Result<()> {
    let projects = jira.projects(limit).await?;
    if projects.is_empty() {
        println!("No projects visible.");
        return Ok(());
    }
    for project in &projects {
        println!("{:<12} {}", project.key, project.name);
    }
    Ok(())
}

/// List the priorities configured on the site.
pub async fn priorities(jira: &JiraClient) -> Result<()> {
    for priority in jira.priorities().await? {
        println!("{}", priority.name);
    }
    Ok(())
}

/// Turn the filter flags into a JQL query.
fn build_jql(filters: &IssueFilters) -> String {
    let mut builder = JqlBuilder::new();
    if let Some(jql) = &filters.jql {
        builder = builder.raw(jql);
    }
    if let Some(project) = &filters.project {
        builder = builder.project(project);
    }
    if let Some(assignee) = &filters.assignee {
        builder = builder.assignee(assignee);
    }
    if filters.mine {
        builder = builder.assigned_to_me();
    }
    if let Some(status) = &filters.status {
        builder = builder.status(status);
    }
    if let Some(issue_type) = &filters.issue_type {
        builder = builder.issue_type(issue_type);
    }
    if let Some(label) = &filters.label {
        builder = builder.label(label);
    }
    if let Some(text) = &filters.text {
        builder = builder.text(text);
    }
    builder.order_by("updated", true).build()
}

/// Map an assignee argument to an account id.
///
/// "me" resolves through `/myself`, "none" unassigns, anything else is
/// looked up via user search and must match exactly one account.
async fn resolve_account(jira: &JiraClient, assignee: &str) -> Result<Option<String>> {
    match assignee {
        "none" => Ok(None),
        "me" => Ok(Some(jira.current_user().await?.account_id)),
        query => {
            let users = jira.find_users(query).await?;
            match users.len() {
                0 => Err(AppError::other(format!("no user matches '{}'", query))),
                1 => Ok(Some(users[0].account_id.clone())),
                _ => {
                    let names: Vec<&str> =
                        users.iter().map(|u| u.display_name.as_str()).collect();
                    Err(AppError::other(format!(
                        "'{}' is ambiguous: {}",
                        query,
                        names.join(", ")
                    )))
                }
            }
        }
    }
}

fn print_issue(issue: &Issue) {
    println!("{}  {}", issue.key, issue.summary());
    println!("Type:     {}", issue.issue_type());
    println!("Status:   {}", issue.status());
    println!("Priority: {}", issue.priority_name());
    println!("Assignee: {}", issue.assignee_name());
    if let Some(reporter) = &issue.fields.reporter {
        println!("Reporter: {}", reporter.display_name);
    }
    if !issue.fields.labels.is_empty() {
        println!("Labels:   {}", issue.fields.labels.join(", "));
    }
    if let Some(points) = issue.story_points() {
        println!("Points:   {}", points);
    }
    if let Some(updated) = &issue.fields.updated {
        println!("Updated:  {}", updated);
    }

    let description = issue.description_text();
    if !description.is_empty() {
        println!();
        println!("{}", description);
    }
}

pub(crate) fn print_issue_table(result: &SearchResult) {
    if result.issues.is_empty() {
        println!("No issues matched.");
        return;
    }

    println!(
        "{:<12} {:<14} {:<10} {:<20} {}",
        "KEY", "STATUS", "TYPE", "ASSIGNEE", "SUMMARY"
    );
    for issue in &result.issues {
        println!(
            "{:<12} {:<14} {:<10} {:<20} {}",
            issue.key,
            issue.status(),
            issue.issue_type(),
            issue.assignee_name(),
            issue.summary()
        );
    }
    println!();
    println!("Showing {} of {} issues.", result.issues.len(), result.total);
    if result.has_more() {
        println!("Narrow the query or raise --limit to see more.");
    }
}
