//! Comment commands.

use crate::api::JiraClient;
use crate::cli::CommentCommand;
use crate::config::Config;
use crate::error::Result;

pub async fn run(command: CommentCommand, jira: &JiraClient, config: &Config) -> Result<()> {
    match command {
        CommentCommand::List { key } => {
            let page = jira.comments(&key, config.page_size).await?;
            if page.comments.is_empty() {
                println!("No comments on {}.", key);
                return Ok(());
            }
            for comment in &page.comments {
                println!(
                    "[{}] {} on {}",
                    comment.id, comment.author.display_name, comment.created
                );
                println!("{}", comment.body_text());
                println!();
            }
            println!(
                "Showing {} of {} comments.",
                page.comments.len(),
                page.total
            );
        }
        CommentCommand::Add { key, text } => {
            let comment = jira.add_comment(&key, &text).await?;
            println!("Comment {} added to {}.", comment.id, key);
        }
        CommentCommand::Delete { key, id } => {
            jira.delete_comment(&key, &id).await?;
            println!("Comment {} deleted from {}.", id, key);
        }
    }
    Ok(())
}
