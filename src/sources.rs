//! Harvest candidate error signatures from Solidity sources.
//!
//! This is a lexical scan, not a parser: it finds `error Name(...);`
//! declarations and rewrites them into the canonical ABI form used for
//! selector hashing.  Parameters of user-defined types are kept by name,
//! which the ABI never does: structs encode as tuples, contracts and
//! interfaces as `address`, enums as `uint8`.  Resolving those needs a
//! real compiler, so such signatures are logged at debug level and will
//! not match a real revert.

use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};

/// Keywords that may follow a parameter type but never belong in the
/// canonical signature.
const MODIFIERS: &[&str] = &["memory", "calldata", "storage", "indexed", "payable"];

/// Recursively collect canonical error signatures from every `.sol` file
/// under `dir`.  Files are visited in sorted path order and duplicates keep
/// their first position.
pub fn scan_sources(dir: &Path) -> io::Result<Vec<String>> {
	let mut files = Vec::new();
	collect_sol_files(dir, &mut files)?;
	files.sort();

	let mut seen = HashSet::new();
	let mut out = Vec::new();
	for file in &files {
		let content = std::fs::read_to_string(file)?;
		let found = extract_errors(&content);
		tracing::debug!(path = %file.display(), errors = found.len(), "scanned source");
		for sig in found {
			if seen.insert(sig.clone()) {
				out.push(sig);
			}
		}
	}
	Ok(out)
}

fn collect_sol_files(dir: &Path, out: &mut Vec<PathBuf>) -> io::Result<()> {
	for entry in std::fs::read_dir(dir)? {
		let path = entry?.path();
		if path.is_dir() {
			collect_sol_files(&path, out)?;
		} else if path.extension().is_some_and(|ext| ext == "sol") {
			out.push(path);
		}
	}
	Ok(())
}

/// Extract every error declaration from a single source text, in order of
/// appearance.
pub fn extract_errors(source: &str) -> Vec<String> {
	let code = mask_comments_and_strings(source);
	let bytes = code.as_bytes();
	let mut out = Vec::new();
	let mut pos = 0;

	while let Some(offset) = code[pos..].find("error") {
		let start = pos + offset;
		let after = start + "error".len();
		pos = after;

		let boundary_before = start == 0 || !is_ident_byte(bytes[start - 1]);
		let boundary_after = bytes.get(after).is_some_and(|b| b.is_ascii_whitespace());
		if !boundary_before || !boundary_after {
			continue;
		}

		let Some(semi) = code[after..].find(';') else {
			break;
		};
		let decl = &code[start..after + semi + 1];
		if let Some(sig) = canonicalize_declaration(decl) {
			out.push(sig);
			pos = after + semi + 1;
		}
	}
	out
}

/// Canonicalize one declaration such as
/// `error Denied(address who, uint amount);` into `Denied(address,uint256)`.
/// The leading `error` keyword and trailing `;` are optional.
pub fn canonicalize_declaration(text: &str) -> Option<String> {
	let text = text.trim().trim_end_matches(';').trim_end();
	let text = match text.strip_prefix("error") {
		Some(rest) if rest.starts_with(char::is_whitespace) => rest.trim_start(),
		_ => text,
	};

	let open = text.find('(')?;
	let name = text[..open].trim();
	if !is_identifier(name) {
		return None;
	}

	let params = text[open..].strip_prefix('(')?.strip_suffix(')')?;
	let mut types = Vec::new();
	for param in split_top_level(params) {
		let param = param.trim();
		if param.is_empty() {
			if types.is_empty() && params.trim().is_empty() {
				break;
			}
			return None;
		}
		types.push(canonical_type(param)?);
	}

	Some(format!("{name}({})", types.join(",")))
}

fn canonical_type(param: &str) -> Option<String> {
	let ty = param
		.split_whitespace()
		.find(|tok| !MODIFIERS.contains(tok))?;
	let ty = expand_alias(ty);
	if !is_elementary(&ty) {
		tracing::debug!(%ty, "user-defined parameter type kept by name");
	}
	Some(ty)
}

/// Whether `ty` (arrays included) is a built-in ABI type.
fn is_elementary(ty: &str) -> bool {
	let base = ty.split('[').next().unwrap_or(ty);
	let sized = |prefix: &str| {
		base.strip_prefix(prefix)
			.is_some_and(|n| {
				n.starts_with(|c: char| c.is_ascii_digit())
					&& n.bytes().all(|b| b.is_ascii_digit() || b == b'x')
			})
	};
	matches!(base, "address" | "bool" | "string" | "bytes" | "function")
		|| sized("uint")
		|| sized("int")
		|| sized("bytes")
		|| sized("ufixed")
		|| sized("fixed")
}

/// `uint`, `int`, `fixed` and `ufixed` are aliases for their full forms,
/// including inside array types like `uint[]`.  Names that merely start
/// with an alias (`uints`, `interval`) are left alone.
fn expand_alias(ty: &str) -> String {
	const ALIASES: [(&str, &str); 4] = [
		("uint", "uint256"),
		("int", "int256"),
		("ufixed", "ufixed128x18"),
		("fixed", "fixed128x18"),
	];
	for (alias, full) in ALIASES {
		if let Some(rest) = ty.strip_prefix(alias) {
			if rest.is_empty() || rest.starts_with('[') {
				return format!("{full}{rest}");
			}
		}
	}
	ty.to_owned()
}

fn split_top_level(params: &str) -> Vec<&str> {
	let mut parts = Vec::new();
	let mut depth = 0usize;
	let mut start = 0;
	for (i, c) in params.char_indices() {
		match c {
			'(' | '[' => depth += 1,
			')' | ']' => depth = depth.saturating_sub(1),
			',' if depth == 0 => {
				parts.push(&params[start..i]);
				start = i + 1;
			}
			_ => {}
		}
	}
	parts.push(&params[start..]);
	parts
}

/// Drop `//` and `/* */` comments and blank out string literal contents,
/// so neither can produce a false declaration.
fn mask_comments_and_strings(source: &str) -> String {
	let mut out = String::with_capacity(source.len());
	let mut chars = source.chars().peekable();
	let mut quote: Option<char> = None;

	while let Some(c) = chars.next() {
		if let Some(q) = quote {
			if c == '\\' {
				chars.next();
				out.push_str("  ");
			} else if c == q {
				quote = None;
				out.push(c);
			} else {
				out.push(if c == '\n' { '\n' } else { ' ' });
			}
			continue;
		}

		let next = chars.peek().copied();
		match (c, next) {
			('"' | '\'', _) => {
				quote = Some(c);
				out.push(c);
			}
			('/', Some('/')) => {
				for skipped in chars.by_ref() {
					if skipped == '\n' {
						out.push('\n');
						break;
					}
				}
			}
			('/', Some('*')) => {
				chars.next();
				let mut prev = '\0';
				for skipped in chars.by_ref() {
					if prev == '*' && skipped == '/' {
						break;
					}
					prev = skipped;
				}
				out.push(' ');
			}
			_ => out.push(c),
		}
	}
	out
}

fn is_ident_byte(b: u8) -> bool {
	b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
}

fn is_identifier(name: &str) -> bool {
	let mut bytes = name.bytes();
	matches!(bytes.next(), Some(b) if b.is_ascii_alphabetic() || b == b'_' || b == b'$')
		&& bytes.all(is_ident_byte)
}
