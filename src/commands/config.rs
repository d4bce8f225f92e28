use std::path::Path;

use anyhow::Result;

use crate::cli::{Cli, ConfigCommand};
use crate::commands::load_config;
use crate::config::{Config, FILE_NAME};

pub fn run(cli: &Cli, cmd: &ConfigCommand) -> Result<()> {
	match cmd {
		ConfigCommand::Show => {
			let config = load_config(cli)?;
			print!("{}", config.to_toml()?);
			Ok(())
		}
		ConfigCommand::Init { force } => {
			let path = cli.config.as_deref().unwrap_or(Path::new(FILE_NAME));
			if path.exists() && !force {
				anyhow::bail!("{} already exists. Pass --force to overwrite.", path.display());
			}
			Config::default().save_to(path)?;
			println!("Wrote default config to {}", path.display());
			Ok(())
		}
	}
}
