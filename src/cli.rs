use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser)]
#[command(
	name = "selector-finder",
	about = "Recover custom-error names from 4-byte revert selectors.",
	version
)]
pub struct Cli {
	/// Read configuration from this file instead of the default lookup.
	#[arg(long, global = true)]
	pub config: Option<PathBuf>,

	/// Increase log verbosity (-v info, -vv debug, -vvv trace).  RUST_LOG
	/// overrides.
	#[arg(short, long, action = ArgAction::Count, global = true)]
	pub verbose: u8,

	#[command(subcommand)]
	pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
	/// Print the selector of one or more error signatures.
	Selector {
		/// Canonical signatures, e.g. "UnauthorizedAccess()".
		#[arg(required = true)]
		signatures: Vec<String>,
	},

	/// Search candidate signatures for one matching a target selector.
	Find(FindArgs),

	/// Inspect or create the project configuration.
	Config {
		#[command(subcommand)]
		command: ConfigCommand,
	},

	/// List configured networks and their account status.
	Networks,
}

#[derive(clap::Args)]
pub struct FindArgs {
	/// Selector to explain (0x-prefixed, 8 hex digits).  Defaults to
	/// `search.target` from the config.
	#[arg(long)]
	pub target: Option<String>,

	/// Candidate signature; repeatable.  Defaults to `search.errors`.
	#[arg(long = "error", value_name = "SIGNATURE")]
	pub errors: Vec<String>,

	/// Also scan `paths.sources` for error declarations.
	#[arg(long)]
	pub scan: bool,

	/// Scan this directory for error declarations.
	#[arg(long, value_name = "DIR")]
	pub sources: Option<PathBuf>,

	/// Append well-known Solidity and OpenZeppelin errors.
	#[arg(long)]
	pub known: bool,

	/// Hash candidates across all cores.
	#[arg(long)]
	pub parallel: bool,

	/// Print the result as JSON.
	#[arg(long)]
	pub json: bool,
}

// -- Config subcommands --

#[derive(Subcommand)]
pub enum ConfigCommand {
	/// Print the effective configuration as TOML.
	Show,

	/// Write the default configuration to ./selector-finder.toml.
	Init {
		/// Overwrite an existing file.
		#[arg(long)]
		force: bool,
	},
}

#[cfg(test)]
mod tests {
	use super::*;
	use clap::CommandFactory;

	#[test]
	fn cli_is_well_formed() {
		Cli::command().debug_assert();
	}

	#[test]
	fn parses_find_flags() {
		let cli = Cli::try_parse_from([
			"selector-finder",
			"-vv",
			"find",
			"--target",
			"0xe2517d3f",
			"--error",
			"A()",
			"--error",
			"B(uint256)",
			"--known",
			"--json",
		])
		.unwrap();
		assert_eq!(cli.verbose, 2);
		let Command::Find(args) = cli.command else {
			panic!("expected find");
		};
		assert_eq!(args.target.as_deref(), Some("0xe2517d3f"));
		assert_eq!(args.errors, vec!["A()", "B(uint256)"]);
		assert!(args.known && args.json && !args.scan && !args.parallel);
	}

	#[test]
	fn selector_requires_a_signature() {
		assert!(Cli::try_parse_from(["selector-finder", "selector"]).is_err());
	}
}
