//! atlasctl - drive Jira and Confluence Cloud from the console.

mod api;
mod cli;
mod commands;
mod config;
mod error;
mod jql;
mod logging;
mod report;
mod store;

use clap::Parser;

use cli::{Cli, Command};
use config::Config;
use error::Result;
use store::SearchStore;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("warning: could not initialize logging: {}", e);
    }

    let outcome = run(cli.command).await;
    logging::shutdown();

    if let Err(e) = outcome {
        tracing::error!(error = %e, "command failed");
        eprintln!("error: {}", e.user_message());
        if let Some(hint) = e.suggested_action() {
            eprintln!("hint: {}", hint);
        }
        std::process::exit(1);
    }
}

async fn run(command: Command) -> Result<()> {
    match command {
        Command::Config { command } => commands::config::run(command),
        Command::Auth { command } => {
            let config = Config::load()?;
            commands::auth::run(command, &config).await
        }
        Command::Me => {
            let config = Config::load()?;
            let jira = commands::jira_client(&config)?;
            commands::auth::whoami(&jira).await
        }
        Command::Issue { command } => {
            let config = Config::load()?;
            let jira = commands::jira_client(&config)?;
            commands::issues::run(command, &jira, &config).await
        }
        Command::Comment { command } => {
            let config = Config::load()?;
            let jira = commands::jira_client(&config)?;
            commands::comments::run(command, &jira, &config).await
        }
        Command::Search { command } => {
            let config = Config::load()?;
            let jira = commands::jira_client(&config)?;
            let mut store = SearchStore::open(SearchStore::default_path()?)?;
            commands::search::run(command, &jira, &mut store, &config).await
        }
        Command::Confluence { command } => {
            let config = Config::load()?;
            let confluence = commands::confluence_client(&config)?;
            commands::confluence::run(command, &confluence, &config).await
        }
        Command::Report { command } => {
            let config = Config::load()?;
            let jira = commands::jira_client(&config)?;
            commands::report::run(command, &jira).await
        }
        Command::Projects { limit } => {
            let config = Config::load()?;
            let jira = commands::jira_client(&config)?;
            commands::issues::projects(&jira, limit.unwrap_or(config.page_size)).await
        }
        Command::Priorities => {
            let config = Config::load()?;
            let jira = commands::jira_client(&config)?;
            commands::issues::priorities(&jira).await
        }
    }
}
