//! Configuration types for the chain and asset registry.

use intents_types::{Address, ChainFamily, ChainId, RelayChainId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Top-level registry configuration, deserialized from TOML/JSON/YAML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
	pub hub: HubConfig,
	/// Spoke chain table keyed by chain id.
	#[serde(
		deserialize_with = "crate::serde_helpers::deserialize_chain_id_map",
		serialize_with = "crate::serde_helpers::serialize_chain_id_map"
	)]
	pub chains: HashMap<ChainId, ChainConfig>,
	/// Hub-asset entries for original spoke assets.
	#[serde(default)]
	pub assets: Vec<HubAssetEntry>,
	/// Token addresses driving the fixed migration flows.
	#[serde(default)]
	pub migration: Option<MigrationConfig>,
}

/// The single settlement chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HubConfig {
	pub chain_id: ChainId,
	pub relay_chain_id: RelayChainId,
	/// Settlement contract intents are created against.
	pub intents_contract: Address,
	/// Asset manager receiving hub-originated deposits.
	pub asset_manager: Address,
}

/// One spoke chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainConfig {
	pub name: String,
	pub family: ChainFamily,
	pub relay_chain_id: RelayChainId,
	/// Asset manager contract on this chain, chain-native encoding.
	pub asset_manager: String,
}

/// Maps one original spoke asset to its canonical hub representation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HubAssetEntry {
	pub chain_id: ChainId,
	/// Original asset address on the spoke chain, compared case-insensitively.
	pub original: String,
	pub asset: Address,
	pub decimal: u8,
	pub vault: Address,
}

/// Token sets for the fixed migration flows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationConfig {
	/// The chain ICX and BALN natively live on.
	pub icon_chain_id: ChainId,
	/// ICX representation accepted by the migration pool.
	pub icx_token: String,
	/// SODA token on the hub chain.
	pub soda_token: Address,
	/// BALN token address on its origin chain.
	pub baln_token: String,
	/// Legacy bnUSD representations, any chain.
	#[serde(default)]
	pub bnusd_legacy: Vec<String>,
	/// New bnUSD representations, any chain.
	#[serde(default)]
	pub bnusd_new: Vec<String>,
}
