use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use selector_finder::cli::{Cli, Command};
use selector_finder::commands;

fn main() -> Result<()> {
	let cli = Cli::parse();
	init_tracing(cli.verbose);
	dotenv::dotenv().ok();

	match &cli.command {
		Command::Selector { signatures } => commands::selector::run(signatures),
		Command::Find(args) => commands::find::run(&cli, args),
		Command::Config { command } => commands::config::run(&cli, command),
		Command::Networks => commands::networks::run(&cli),
	}
}

/// Logs go to stderr so command output stays pipeable.
fn init_tracing(verbose: u8) {
	let level = match verbose {
		0 => "warn",
		1 => "info",
		2 => "debug",
		_ => "trace",
	};
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.init();
}
