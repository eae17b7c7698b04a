//! Common types used throughout the intent SDK.

use serde::{Deserialize, Serialize};
use std::fmt;

// Re-export the hub-chain primitive types.
pub use alloy::primitives::{Address, Bytes, B256, U256};

/// Identifier of a chain as this SDK addresses it.
///
/// Chain ids are opaque and assigned at configuration time. The registry
/// decides which id is the hub and which ids are valid spoke chains; the
/// `SpokeChainId` / `HubChainId` aliases document intent at call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainId(pub u64);

/// A chain id known to be a spoke chain.
pub type SpokeChainId = ChainId;

/// A chain id known to be the hub chain.
pub type HubChainId = ChainId;

impl fmt::Display for ChainId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// Identifier of a chain in the relay network's own numbering space.
///
/// This is a separate namespace from [`ChainId`]; every supported chain maps
/// to exactly one relay chain id and the registry loader rejects
/// configurations where the mapping is not total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RelayChainId(pub u64);

impl fmt::Display for RelayChainId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// The chain families this SDK can originate intents from.
///
/// Allowance dispatch and deposit construction branch on the family, never on
/// a concrete chain, so adding a chain of an existing family is configuration
/// only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainFamily {
	Evm,
	Cosmos,
	Solana,
	Sui,
	Stellar,
	Icon,
}

impl fmt::Display for ChainFamily {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			ChainFamily::Evm => "evm",
			ChainFamily::Cosmos => "cosmos",
			ChainFamily::Solana => "solana",
			ChainFamily::Sui => "sui",
			ChainFamily::Stellar => "stellar",
			ChainFamily::Icon => "icon",
		};
		f.write_str(name)
	}
}

/// Blockchain transaction hash in its chain-native string form.
///
/// The relay network addresses transactions by their original string
/// encoding (0x-hex, base58, ...), so the SDK never normalizes hashes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionHash(pub String);

impl TransactionHash {
	/// Shortened form for log lines.
	pub fn truncated(&self) -> String {
		if self.0.len() <= 10 {
			self.0.clone()
		} else {
			format!("{}..", &self.0[..10])
		}
	}
}

impl fmt::Display for TransactionHash {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for TransactionHash {
	fn from(value: &str) -> Self {
		Self(value.to_string())
	}
}

/// An unsent transaction built by a spoke chain adapter.
///
/// `from` and `to` stay in the originating chain's native string encoding;
/// `data` is the opaque payload produced by the intent codec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTransaction {
	/// Chain the transaction targets.
	pub chain_id: ChainId,
	/// Sender address, chain-native encoding.
	pub from: String,
	/// Recipient contract address, chain-native encoding.
	pub to: String,
	/// Native value carried by the transaction.
	pub value: U256,
	/// Opaque call payload.
	pub data: Vec<u8>,
}

/// Hub-chain representation of an asset that natively lives on a spoke chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HubAssetInfo {
	/// Canonical asset address on the hub chain.
	pub asset: Address,
	/// Decimals of the hub-side representation.
	pub decimal: u8,
	/// Vault holding the spoke-side deposits backing this asset.
	pub vault: Address,
}
