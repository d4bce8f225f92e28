use std::collections::HashSet;

use anyhow::{Context, Result};

use crate::cli::{Cli, FindArgs};
use crate::commands::load_config;
use crate::config::Config;
use crate::finder::{MatchResult, SelectorFinder};
use crate::known::KNOWN_ERRORS;
use crate::sources::scan_sources;

pub fn run(cli: &Cli, args: &FindArgs) -> Result<()> {
	let config = load_config(cli)?;

	let target = args
		.target
		.clone()
		.or_else(|| config.search.target.clone())
		.ok_or_else(|| {
			anyhow::anyhow!("No target selector. Pass --target or set search.target in the config.")
		})?;

	let candidates = gather_candidates(args, &config)?;
	tracing::info!(candidates = candidates.len(), %target, "searching");

	let finder: SelectorFinder = SelectorFinder::default();
	let result = if args.parallel {
		finder.find_match_parallel(&candidates, &target)?
	} else {
		finder.find_match(&candidates, &target)?
	};

	if args.json {
		let report = serde_json::json!({
			"target": target,
			"candidates": candidates.len(),
			"result": result,
		});
		println!("{}", serde_json::to_string_pretty(&report)?);
		return Ok(());
	}

	match &result {
		MatchResult::Found {
			signature,
			selector,
			..
		} => println!("Match -> {signature} ({selector})"),
		MatchResult::NoMatch => println!(
			"No match for {target} among {} candidate(s)",
			candidates.len()
		),
	}
	Ok(())
}

/// Assemble candidates in precedence order: explicit `--error` values (or
/// the config's list), scanned sources, then well-known errors.  Repeats
/// keep their first position.
pub fn gather_candidates(args: &FindArgs, config: &Config) -> Result<Vec<String>> {
	let mut seen = HashSet::new();
	let mut out = Vec::new();
	let mut push = |sig: String| {
		if seen.insert(sig.clone()) {
			out.push(sig);
		}
	};

	let explicit = if args.errors.is_empty() {
		&config.search.errors
	} else {
		&args.errors
	};
	explicit.iter().cloned().for_each(&mut push);

	let dir = args
		.sources
		.clone()
		.or_else(|| args.scan.then(|| config.paths.sources.clone()));
	if let Some(dir) = dir {
		let scanned = scan_sources(&dir)
			.with_context(|| format!("scanning Solidity sources in {}", dir.display()))?;
		tracing::debug!(dir = %dir.display(), errors = scanned.len(), "collected declarations");
		scanned.into_iter().for_each(&mut push);
	}

	if args.known {
		KNOWN_ERRORS.iter().map(|s| s.to_string()).for_each(&mut push);
	}

	Ok(out)
}
