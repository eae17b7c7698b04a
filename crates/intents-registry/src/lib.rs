//! Immutable chain and asset registry.
//!
//! Constructed once at startup from a validated [`RegistryConfig`] and passed
//! by reference into every service; never mutated at runtime. Lookups answer
//! the three questions the pipeline asks before constructing an intent: which
//! hub asset an original token maps to, which relay chain id addresses a
//! chain, and whether a chain id is a registered spoke.

pub mod loader;
pub mod serde_helpers;
pub mod types;

pub use loader::ConfigLoader;
pub use types::*;

use intents_types::{Address, ChainFamily, ChainId, HubAssetInfo, RelayChainId};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
	#[error("chain {0} is not a registered spoke chain")]
	UnknownChain(ChainId),
	#[error("no hub asset registered for token {original} on chain {chain_id}")]
	UnknownAsset { chain_id: ChainId, original: String },
	#[error("migration flows are not configured")]
	MigrationNotConfigured,
}

/// Read-only view over the configured chains, assets, and migration tokens.
pub struct AssetRegistry {
	hub: HubConfig,
	chains: HashMap<ChainId, ChainConfig>,
	/// Keyed by (chain id, lowercased original address).
	assets: HashMap<(ChainId, String), HubAssetInfo>,
	migration: Option<MigrationConfig>,
}

impl AssetRegistry {
	pub fn new(config: RegistryConfig) -> Self {
		let assets = config
			.assets
			.iter()
			.map(|entry| {
				(
					(entry.chain_id, entry.original.to_lowercase()),
					HubAssetInfo {
						asset: entry.asset,
						decimal: entry.decimal,
						vault: entry.vault,
					},
				)
			})
			.collect();

		Self {
			hub: config.hub,
			chains: config.chains,
			assets,
			migration: config.migration,
		}
	}

	pub fn hub_chain_id(&self) -> ChainId {
		self.hub.chain_id
	}

	/// Settlement contract intents are created against.
	pub fn intents_contract(&self) -> Address {
		self.hub.intents_contract
	}

	/// Asset manager for hub-originated deposits.
	pub fn hub_asset_manager(&self) -> Address {
		self.hub.asset_manager
	}

	pub fn is_valid_spoke_chain(&self, chain_id: ChainId) -> bool {
		self.chains.contains_key(&chain_id)
	}

	/// Whether the chain is the hub or a registered spoke.
	pub fn is_supported_chain(&self, chain_id: ChainId) -> bool {
		chain_id == self.hub.chain_id || self.is_valid_spoke_chain(chain_id)
	}

	pub fn chain_family(&self, chain_id: ChainId) -> Result<ChainFamily, RegistryError> {
		if chain_id == self.hub.chain_id {
			return Ok(ChainFamily::Evm);
		}
		self.chains
			.get(&chain_id)
			.map(|c| c.family)
			.ok_or(RegistryError::UnknownChain(chain_id))
	}

	/// Asset manager address on a spoke chain, chain-native encoding.
	pub fn asset_manager(&self, chain_id: ChainId) -> Result<String, RegistryError> {
		if chain_id == self.hub.chain_id {
			return Ok(format!("{}", self.hub.asset_manager));
		}
		self.chains
			.get(&chain_id)
			.map(|c| c.asset_manager.clone())
			.ok_or(RegistryError::UnknownChain(chain_id))
	}

	/// Relay-network id for a chain. Total over supported chains; never
	/// inferred.
	pub fn relay_chain_id(&self, chain_id: ChainId) -> Result<RelayChainId, RegistryError> {
		if chain_id == self.hub.chain_id {
			return Ok(self.hub.relay_chain_id);
		}
		self.chains
			.get(&chain_id)
			.map(|c| c.relay_chain_id)
			.ok_or(RegistryError::UnknownChain(chain_id))
	}

	/// Canonical hub asset for an original spoke token, or `None`.
	///
	/// Address comparison is case-insensitive.
	pub fn hub_asset_info(&self, chain_id: ChainId, original: &str) -> Option<HubAssetInfo> {
		self.assets
			.get(&(chain_id, original.to_lowercase()))
			.copied()
	}

	/// Same lookup as [`hub_asset_info`](Self::hub_asset_info), as a
	/// `Result` for pipeline call sites.
	pub fn require_hub_asset(
		&self,
		chain_id: ChainId,
		original: &str,
	) -> Result<HubAssetInfo, RegistryError> {
		self.hub_asset_info(chain_id, original)
			.ok_or_else(|| RegistryError::UnknownAsset {
				chain_id,
				original: original.to_string(),
			})
	}

	pub fn migration(&self) -> Result<&MigrationConfig, RegistryError> {
		self.migration
			.as_ref()
			.ok_or(RegistryError::MigrationNotConfigured)
	}
}
