//! Configuration commands.

use crate::cli::ConfigCommand;
use crate::config::Config;
use crate::error::Result;

pub fn run(command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Init {
            site_url,
            email,
            timeout_secs,
        } => {
            let mut config = Config {
                site_url,
                email,
                timeout_secs: 30,
                page_size: 25,
            };
            if let Some(secs) = timeout_secs {
                config.timeout_secs = secs;
            }
            let path = config.save()?;
            println!("Configuration written to {}.", path.display());
            println!("Next: 'atlasctl auth login' to store your API token.");
        }
        ConfigCommand::Show => {
            let config = Config::load()?;
            println!("Site URL:  {}", config.site_url);
            println!("Email:     {}", config.email);
            println!("Timeout:   {}s", config.timeout_secs);
            println!("Page size: {}", config.page_size);
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_path()?.display());
        }
    }
    Ok(())
}
