use anyhow::Result;

use crate::cli::Cli;
use crate::commands::load_config;
use crate::config::mask_key;

pub fn run(cli: &Cli) -> Result<()> {
	let config = load_config(cli)?;

	if config.networks.is_empty() {
		println!("No networks configured.");
		return Ok(());
	}

	for (name, network) in &config.networks {
		let marker = if *name == config.default_network { "*" } else { " " };
		println!("{marker} {name}");
		println!("    URL:      {}", network.url);
		match config.resolve_accounts(name) {
			Ok(keys) if keys.is_empty() => println!("    Accounts: none"),
			Ok(keys) => {
				let masked: Vec<String> = keys.iter().map(|k| mask_key(k)).collect();
				println!("    Accounts: {}", masked.join(", "));
			}
			Err(e) => println!("    Accounts: unavailable ({e})"),
		}
	}

	if config.network(&config.default_network).is_none() {
		tracing::warn!(network = %config.default_network, "default network is not configured");
	}
	Ok(())
}
