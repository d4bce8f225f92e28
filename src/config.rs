use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};

/// Project-local config file, looked up in the working directory.
pub const FILE_NAME: &str = "selector-finder.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
	pub default_network: String,
	pub networks: BTreeMap<String, NetworkConfig>,
	pub solidity: SolidityConfig,
	pub paths: PathsConfig,
	pub test: TestConfig,
	pub search: SearchConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
	pub url: String,
	/// Names of environment variables holding hex private keys.  Keys
	/// themselves never live in the config file.
	#[serde(default)]
	pub accounts: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolidityConfig {
	pub version: String,
	pub optimizer: OptimizerConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
	pub enabled: bool,
	pub runs: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
	pub sources: PathBuf,
	pub tests: PathBuf,
	pub cache: PathBuf,
	pub artifacts: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TestConfig {
	pub timeout_ms: u64,
}

/// Default candidates and target for `find`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
	pub errors: Vec<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub target: Option<String>,
}

impl Default for Config {
	fn default() -> Self {
		let mut networks = BTreeMap::new();
		networks.insert(
			"crossFi".to_owned(),
			NetworkConfig {
				url: "https://rpc.testnet.ms".into(),
				accounts: vec!["CROSSFI_PRIVATE_KEY".into()],
			},
		);
		Self {
			default_network: "crossFi".into(),
			networks,
			solidity: SolidityConfig::default(),
			paths: PathsConfig::default(),
			test: TestConfig::default(),
			search: SearchConfig {
				errors: vec!["UnauthorizedAccess()".into(), "NotPatientOwner()".into()],
				target: Some("0xe2517d3f".into()),
			},
		}
	}
}

impl Default for SolidityConfig {
	fn default() -> Self {
		Self {
			version: "0.8.24".into(),
			optimizer: OptimizerConfig::default(),
		}
	}
}

impl Default for OptimizerConfig {
	fn default() -> Self {
		Self {
			enabled: true,
			runs: 200,
		}
	}
}

impl Default for PathsConfig {
	fn default() -> Self {
		Self {
			sources: "./contracts".into(),
			tests: "./test".into(),
			cache: "./cache".into(),
			artifacts: "./artifacts".into(),
		}
	}
}

impl Default for TestConfig {
	fn default() -> Self {
		Self { timeout_ms: 40_000 }
	}
}

impl Config {
	/// Per-user fallback directory (~/.selector-finder/).
	pub fn user_dir() -> Option<PathBuf> {
		dirs::home_dir().map(|home| home.join(".selector-finder"))
	}

	/// Load `selector-finder.toml` from the working directory, then the
	/// per-user config, falling back to defaults if neither exists.
	pub fn load() -> anyhow::Result<Self> {
		let local = PathBuf::from(FILE_NAME);
		if local.exists() {
			return Self::load_from(&local);
		}
		if let Some(user) = Self::user_dir().map(|dir| dir.join("config.toml")) {
			if user.exists() {
				return Self::load_from(&user);
			}
		}
		tracing::debug!("no config file found, using defaults");
		Ok(Self::default())
	}

	pub fn load_from(path: &Path) -> anyhow::Result<Self> {
		let content = std::fs::read_to_string(path)
			.with_context(|| format!("reading config {}", path.display()))?;
		let config = toml::from_str(&content)
			.with_context(|| format!("parsing config {}", path.display()))?;
		tracing::debug!(path = %path.display(), "loaded config");
		Ok(config)
	}

	/// Persist the config, creating parent directories if needed.
	pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
		if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
			std::fs::create_dir_all(parent)?;
		}
		std::fs::write(path, self.to_toml()?)
			.with_context(|| format!("writing config {}", path.display()))?;
		Ok(())
	}

	pub fn to_toml(&self) -> anyhow::Result<String> {
		Ok(toml::to_string_pretty(self)?)
	}

	pub fn network(&self, name: &str) -> Option<&NetworkConfig> {
		self.networks.get(name)
	}

	/// Read the private keys for a network from the environment, each
	/// normalized to carry a `0x` prefix.
	pub fn resolve_accounts(&self, name: &str) -> anyhow::Result<Vec<String>> {
		let Some(network) = self.network(name) else {
			bail!("unknown network {name:?}");
		};
		network
			.accounts
			.iter()
			.map(|var| {
				let key = std::env::var(var)
					.with_context(|| format!("environment variable {var} is not set"))?;
				Ok(normalize_key(key.trim()))
			})
			.collect()
	}
}

fn normalize_key(key: &str) -> String {
	if key.starts_with("0x") {
		key.to_owned()
	} else {
		format!("0x{key}")
	}
}

/// Shorten a private key for display: `0x1234…cdef`.
pub fn mask_key(key: &str) -> String {
	let digits = key.strip_prefix("0x").unwrap_or(key);
	if digits.len() <= 8 || !digits.is_ascii() {
		return "0x****".into();
	}
	format!("0x{}…{}", &digits[..4], &digits[digits.len() - 4..])
}
