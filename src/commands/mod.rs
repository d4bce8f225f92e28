pub mod config;
pub mod find;
pub mod networks;
pub mod selector;

use anyhow::Result;

use crate::cli::Cli;
use crate::config::Config;

/// Load config from `--config` if given, otherwise the default lookup.
pub fn load_config(cli: &Cli) -> Result<Config> {
	match &cli.config {
		Some(path) => Config::load_from(path),
		None => Config::load(),
	}
}
