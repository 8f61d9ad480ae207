//! Reporting commands.
//!
//! Reports are arithmetic over one fetched page of issues; when a
//! project exceeds the search cap the report says so instead of
//! pretending to be complete.

use std::path::PathBuf;

use crate::api::JiraClient;
use crate::cli::ReportCommand;
use crate::error::Result;
use crate::jql::JqlBuilder;
use crate::report::{project_summary, render};

/// The most issues one search page can return.
const REPORT_FETCH_LIMIT: u32 = 100;

pub async fn run(command: ReportCommand, jira: &JiraClient) -> Result<()> {
    match command {
        ReportCommand::Sprint { project, out } => {
            let jql = JqlBuilder::new()
                .project(&project)
                .open_sprints()
                .order_by("updated", true)
                .build();
            let text = build_report(jira, &jql, &format!("Sprint report: {}", project)).await?;
            deliver(out, text)
        }
        ReportCommand::Project { project, out } => {
            let jql = JqlBuilder::new()
                .project(&project)
                .order_by("updated", true)
                .build();
            let text = build_report(jira, &jql, &format!("Project report: {}", project)).await?;
            deliver(out, text)
        }
        ReportCommand::Summary { project, out } => {
            let all = JqlBuilder::new()
                .project(&project)
                .order_by("updated", true)
                .build();
            let mut text =
                build_report(jira, &all, &format!("Executive summary: {}", project)).await?;

            let recent = JqlBuilder::new()
                .project(&project)
                .raw("updated >= -30d")
                .build();
            let recent = jira.search_issues(&recent, 1).await?;
            text.push_str(&format!("\nUpdated in the last 30 days: {}\n", recent.total));

            deliver(out, text)
        }
    }
}

async fn build_report(jira: &JiraClient, jql: &str, title: &str) -> Result<String> {
    let result = jira.search_issues(jql, REPORT_FETCH_LIMIT).await?;
    let report = project_summary(&result.issues);
    let mut text = render(title, &report);
    if result.has_more() {
        text.push_str(&format!(
            "\nNote: covers the {} most recently updated of {} issues.\n",
            result.issues.len(),
            result.total
        ));
    }
    Ok(text)
}

fn deliver(out: Option<PathBuf>, text: String) -> Result<()> {
    match out {
        Some(path) => {
            std::fs::write(&path, &text)?;
            println!("Report written to {}.", path.display());
        }
        None => print!("{}", text),
    }
    Ok(())
}
