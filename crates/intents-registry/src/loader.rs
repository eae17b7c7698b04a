//! Configuration loading from files.

use crate::types::RegistryConfig;
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

/// Registry configuration loader.
pub struct ConfigLoader;

impl ConfigLoader {
	/// Load configuration from file, dispatching on the extension.
	pub fn from_file<P: AsRef<Path>>(path: P) -> Result<RegistryConfig> {
		let path = path.as_ref();
		info!("Loading registry configuration from {:?}", path);

		let contents = std::fs::read_to_string(path)
			.with_context(|| format!("Failed to read config file: {:?}", path))?;

		let config = match path.extension().and_then(|s| s.to_str()) {
			Some("toml") => Self::from_toml(&contents)?,
			Some("json") => Self::from_json(&contents)?,
			Some("yaml") | Some("yml") => Self::from_yaml(&contents)?,
			_ => anyhow::bail!("Unsupported config format: {:?}", path),
		};

		Self::validate_config(&config)?;
		Ok(config)
	}

	/// Load from TOML string.
	pub fn from_toml(contents: &str) -> Result<RegistryConfig> {
		let config: RegistryConfig =
			toml::from_str(contents).map_err(|e| anyhow::anyhow!("Failed to parse TOML: {}", e))?;
		Self::validate_config(&config)?;
		Ok(config)
	}

	/// Load from JSON string.
	pub fn from_json(contents: &str) -> Result<RegistryConfig> {
		let config: RegistryConfig =
			serde_json::from_str(contents).context("Failed to parse JSON")?;
		Self::validate_config(&config)?;
		Ok(config)
	}

	/// Load from YAML string.
	pub fn from_yaml(contents: &str) -> Result<RegistryConfig> {
		let config: RegistryConfig =
			serde_yaml::from_str(contents).context("Failed to parse YAML")?;
		Self::validate_config(&config)?;
		Ok(config)
	}

	/// Validate cross-field invariants the type system cannot express.
	fn validate_config(config: &RegistryConfig) -> Result<()> {
		// The hub must not also appear in the spoke table.
		if config.chains.contains_key(&config.hub.chain_id) {
			anyhow::bail!(
				"Hub chain {} must not appear in the spoke chain table",
				config.hub.chain_id
			);
		}

		// Relay chain ids must be unique across hub and spokes; duplicates
		// would make packets ambiguous.
		let mut relay_ids = HashSet::new();
		relay_ids.insert(config.hub.relay_chain_id);
		for (chain_id, chain) in &config.chains {
			if !relay_ids.insert(chain.relay_chain_id) {
				anyhow::bail!(
					"Chain {} reuses relay chain id {}",
					chain_id,
					chain.relay_chain_id
				);
			}
		}

		// Every asset entry must reference a configured chain, and a given
		// (chain, original) pair must map to at most one hub asset.
		let mut seen = HashSet::new();
		for entry in &config.assets {
			if entry.chain_id != config.hub.chain_id && !config.chains.contains_key(&entry.chain_id)
			{
				anyhow::bail!(
					"Asset {} references unconfigured chain {}",
					entry.original,
					entry.chain_id
				);
			}
			let key = (entry.chain_id, entry.original.to_lowercase());
			if !seen.insert(key) {
				anyhow::bail!(
					"Duplicate hub asset entry for ({}, {})",
					entry.chain_id,
					entry.original
				);
			}
		}

		Ok(())
	}
}
