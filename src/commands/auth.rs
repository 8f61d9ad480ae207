//! Token management and identity commands.

use std::io::{BufRead, Write};

use crate::api::{auth, JiraClient};
use crate::cli::AuthCommand;
use crate::config::Config;
use crate::error::Result;

pub async fn run(command: AuthCommand, config: &Config) -> Result<()> {
    match command {
        AuthCommand::Login { token } => {
            let token = match token {
                Some(token) => token,
                None => prompt_token()?,
            };
            let token = token.trim();
            if token.is_empty() {
                return Err(crate::error::AppError::other("no token given"));
            }
            auth::store_token(&config.email, token)?;
            println!("Token stored in the OS keyring for {}.", config.email);
        }
        AuthCommand::Logout => {
            auth::delete_token(&config.email)?;
            println!("Token removed for {}.", config.email);
        }
        AuthCommand::Status => {
            if std::env::var(auth::TOKEN_ENV_VAR).map(|t| !t.is_empty()).unwrap_or(false) {
                println!("Using the token from {}.", auth::TOKEN_ENV_VAR);
            } else if auth::has_token(&config.email) {
                println!("Token stored in the OS keyring for {}.", config.email);
            } else {
                println!("No token configured. Run 'atlasctl auth login'.");
            }
        }
    }
    Ok(())
}

/// Show the authenticated user, which doubles as a connection check.
pub async fn whoami(jira: &JiraClient) -> Result<()> {
    let user = jira.current_user().await?;
    println!("{}", user.display_name);
    if !user.email_address.is_empty() {
        println!("Email:      {}", user.email_address);
    }
    println!("Account id: {}", user.account_id);
    if let Some(zone) = &user.time_zone {
        println!("Time zone:  {}", zone);
    }
    Ok(())
}

fn prompt_token() -> Result<String> {
    eprint!("API token: ");
    std::io::stderr().flush()?;
    let mut token = String::new();
    std::io::stdin().lock().read_line(&mut token)?;
    Ok(token)
}
