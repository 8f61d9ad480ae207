//! Saved search commands.

use crate::api::JiraClient;
use crate::cli::SearchCommand;
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::store::SearchStore;

use super::issues::print_issue_table;

pub async fn run(
    command: SearchCommand,
    jira: &JiraClient,
    store: &mut SearchStore,
    config: &Config,
) -> Result<()> {
    match command {
        SearchCommand::Save { name, jql } => {
            store.add(&name, &jql)?;
            println!("Saved '{}' to {}.", name, store.path().display());
        }
        SearchCommand::List => {
            if store.is_empty() {
                println!("No saved searches. Add one with 'atlasctl search save <name> <jql>'.");
                return Ok(());
            }
            for saved in store.iter() {
                println!("{:<20} {}", saved.name, saved.jql);
            }
        }
        SearchCommand::Remove { name } => {
            if store.remove(&name)? {
                println!("Removed '{}'.", name);
            } else {
                return Err(AppError::other(format!("no saved search named '{}'", name)));
            }
        }
        SearchCommand::Run { name, limit } => {
            let saved = store
                .get(&name)
                .ok_or_else(|| AppError::other(format!("no saved search named '{}'", name)))?;
            let result = jira
                .search_issues(&saved.jql, limit.unwrap_or(config.page_size))
                .await?;
            print_issue_table(&result);
        }
    }
    Ok(())
}
