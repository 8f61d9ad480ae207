//! Command-line interface definition.
//!
//! Every workflow is a subcommand; the handlers live in [`crate::commands`].

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Drive Jira and Confluence Cloud from the console.
#[derive(Debug, Parser)]
#[command(name = "atlasctl", version, about)]
pub struct Cli {
    /// Also print log output to stderr.
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage the stored API token.
    Auth {
        #[command(subcommand)]
        command: AuthCommand,
    },
    /// Show the authenticated user.
    Me,
    /// View, create, search, and transition issues.
    Issue {
        #[command(subcommand)]
        command: IssueCommand,
    },
    /// Read and write issue comments.
    Comment {
        #[command(subcommand)]
        command: CommentCommand,
    },
    /// Run and manage saved searches.
    Search {
        #[command(subcommand)]
        command: SearchCommand,
    },
    /// Browse Confluence spaces and pages.
    Confluence {
        #[command(subcommand)]
        command: ConfluenceCommand,
    },
    /// Summarize project activity.
    Report {
        #[command(subcommand)]
        command: ReportCommand,
    },
    /// Inspect or initialize configuration.
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
    /// List projects visible to you.
    Projects {
        #[arg(long)]
        limit: Option<u32>,
    },
    /// List the priorities configured on the site.
    Priorities,
}

#[derive(Debug, Subcommand)]
pub enum AuthCommand {
    /// Store an API token in the OS keyring.
    Login {
        /// The token; prompted for when omitted.
        #[arg(long)]
        token: Option<String>,
    },
    /// Remove the stored API token.
    Logout,
    /// Show where the token comes from.
    Status,
}

#[derive(Debug, Subcommand)]
pub enum IssueCommand {
    /// Show one issue in full.
    View { key: String },
    /// Search issues by filters or raw JQL.
    Search {
        #[command(flatten)]
        filters: IssueFilters,
    },
    /// Create an issue.
    Create {
        #[arg(long)]
        project: String,
        #[arg(long)]
        summary: String,
        #[arg(long = "type", default_value = "Task")]
        issue_type: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        priority: Option<String>,
        /// May be given multiple times.
        #[arg(long)]
        label: Vec<String>,
        /// Account id, or "me".
        #[arg(long)]
        assignee: Option<String>,
    },
    /// Update fields on an issue.
    Edit {
        key: String,
        #[arg(long)]
        summary: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        priority: Option<String>,
        /// Replaces the full label set; may be given multiple times.
        #[arg(long)]
        label: Vec<String>,
    },
    /// Assign an issue to a user ("me" for yourself, "none" to unassign).
    Assign { key: String, assignee: String },
    /// List available transitions, or execute one with --to.
    Transition {
        key: String,
        /// Transition name or id.
        #[arg(long)]
        to: Option<String>,
    },
    /// Open an issue in the browser.
    Open { key: String },
}

/// Filter flags assembled into a JQL query.
#[derive(Debug, Args)]
pub struct IssueFilters {
    /// Raw JQL, combined with the flag filters.
    #[arg(long)]
    pub jql: Option<String>,
    #[arg(long)]
    pub project: Option<String>,
    /// Assignee account id or display name.
    #[arg(long)]
    pub assignee: Option<String>,
    /// Only issues assigned to you.
    #[arg(long)]
    pub mine: bool,
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long = "type")]
    pub issue_type: Option<String>,
    #[arg(long)]
    pub label: Option<String>,
    /// Free-text match over summary and description.
    #[arg(long)]
    pub text: Option<String>,
    #[arg(long)]
    pub limit: Option<u32>,
}

#[derive(Debug, Subcommand)]
pub enum CommentCommand {
    /// List comments on an issue.
    List { key: String },
    /// Add a comment.
    Add { key: String, text: String },
    /// Delete a comment by id.
    Delete { key: String, id: String },
}

#[derive(Debug, Subcommand)]
pub enum SearchCommand {
    /// Run a saved search.
    Run {
        name: String,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// List saved searches.
    List,
    /// Save a JQL query under a name.
    Save { name: String, jql: String },
    /// Remove a saved search.
    Remove { name: String },
}

#[derive(Debug, Subcommand)]
pub enum ConfluenceCommand {
    /// List spaces.
    Spaces {
        #[arg(long)]
        limit: Option<u32>,
    },
    /// List pages in a space.
    Pages {
        space: String,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Show one page with its body.
    Page { id: String },
    /// Search content with CQL.
    Search {
        cql: String,
        #[arg(long)]
        limit: Option<u32>,
    },
}

#[derive(Debug, Subcommand)]
pub enum ReportCommand {
    /// Issues in the project's open sprints.
    Sprint {
        #[arg(long)]
        project: String,
        /// Write the report to a file instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// All issues in a project.
    Project {
        #[arg(long)]
        project: String,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Project totals plus recent activity.
    Summary {
        #[arg(long)]
        project: String,
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Write a configuration file.
    Init {
        #[arg(long)]
        site_url: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        timeout_secs: Option<u64>,
    },
    /// Print the effective configuration.
    Show,
    /// Print the configuration file location.
    Path,
}
