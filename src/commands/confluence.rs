//! Confluence browsing commands.

use crate::api::ConfluenceClient;
use crate::cli::ConfluenceCommand;
use crate::config::Config;
use crate::error::Result;

pub async fn run(
    command: ConfluenceCommand,
    confluence: &ConfluenceClient,
    config: &Config,
) -> Result<()> {
    match command {
        ConfluenceCommand::Spaces { limit } => {
            let spaces = confluence.spaces(limit.unwrap_or(config.page_size)).await?;
            if spaces.is_empty() {
                println!("No spaces visible.");
                return Ok(());
            }
            for space in &spaces {
                let kind = space.space_type.as_deref().unwrap_or("space");
                println!("{:<12} {:<10} {}", space.key, kind, space.name);
            }
        }
        ConfluenceCommand::Pages { space, limit } => {
            let pages = confluence
                .pages_in_space(&space, limit.unwrap_or(config.page_size))
                .await?;
            if pages.is_empty() {
                println!("No pages in {}.", space);
                return Ok(());
            }
            for page in &pages {
                let version = page
                    .version_number()
                    .map(|n| format!("v{}", n))
                    .unwrap_or_default();
                println!("{:<12} {:<6} {}", page.id, version, page.title);
            }
        }
        ConfluenceCommand::Page { id } => {
            let page = confluence.get_page(&id).await?;
            println!("{}", page.title);
            if let Some(version) = page.version_number() {
                println!("Version: {}", version);
            }
            if let Some(status) = &page.status {
                println!("Status:  {}", status);
            }
            if let Some(body) = page.storage_body() {
                println!();
                println!("{}", body);
            }
        }
        ConfluenceCommand::Search { cql, limit } => {
            let pages = confluence
                .search(&cql, limit.unwrap_or(config.page_size))
                .await?;
            if pages.is_empty() {
                println!("No content matched.");
                return Ok(());
            }
            for page in &pages {
                println!("{:<12} {}", page.id, page.title);
            }
        }
    }
    Ok(())
}
