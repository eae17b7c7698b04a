//! Spoke chain capability interface and the closed provider union.
//!
//! The orchestration layer never depends on a concrete chain, only on
//! [`SpokeChainAdapter`] plus the [`SpokeProvider`] family tag. Signing and
//! RPC access live behind the adapter, outside this workspace.

use crate::common::{ChainFamily, ChainId, RawTransaction, TransactionHash, U256};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Errors surfaced by spoke adapters and hub providers.
#[derive(Debug, Error)]
pub enum ProviderError {
	#[error("network error: {0}")]
	Network(String),
	#[error("invalid address: {0}")]
	InvalidAddress(String),
	#[error("transaction rejected: {0}")]
	Rejected(String),
	#[error("operation not supported on this chain: {0}")]
	Unsupported(String),
	#[error(transparent)]
	Other(#[from] anyhow::Error),
}

/// A deposit to be built by a spoke chain adapter.
///
/// The `data` payload is produced by the intent codec and carried opaquely;
/// the adapter decides how the deposit is expressed on its chain (EVM call,
/// Solana instruction, Cosmos message, Stellar operation, Icon call).
#[derive(Debug, Clone)]
pub struct DepositRequest {
	pub from: String,
	/// Asset manager (or intents contract, on the hub) receiving the deposit.
	pub to: String,
	/// Original token address on the spoke chain.
	pub token: String,
	/// Amount to deposit, input plus partner fee.
	pub amount: U256,
	/// Opaque intent payload.
	pub data: Vec<u8>,
}

/// Per-chain capability consumed by the SDK.
///
/// One implementation per chain family exists outside this workspace; the
/// SDK only ever calls through this interface.
#[async_trait]
pub trait SpokeChainAdapter: Send + Sync {
	/// The chain this adapter is connected to.
	fn chain_id(&self) -> ChainId;

	/// The wallet address this adapter signs for, chain-native encoding.
	async fn wallet_address(&self) -> Result<String, ProviderError>;

	/// The wallet address as raw bytes, as the hub contract expects it.
	async fn wallet_address_bytes(&self) -> Result<Vec<u8>, ProviderError>;

	/// Builds the chain-specific deposit transaction without sending it.
	async fn build_deposit(&self, request: DepositRequest)
		-> Result<RawTransaction, ProviderError>;

	/// Broadcasts a previously built transaction.
	async fn send_transaction(&self, tx: &RawTransaction)
		-> Result<TransactionHash, ProviderError>;

	/// Whether the transaction is observable on the origin chain yet.
	///
	/// Some RPC nodes acknowledge a broadcast before the transaction is
	/// indexed; relaying an unindexed hash wastes a full relay round-trip.
	async fn verify_transaction(&self, hash: &TransactionHash) -> Result<bool, ProviderError>;

	/// Whether `owner` has granted `spender` at least `amount` of `token`.
	///
	/// On Stellar this checks the trustline limit rather than an allowance.
	async fn is_allowance_valid(
		&self,
		token: &str,
		amount: U256,
		owner: &str,
		spender: &str,
	) -> Result<bool, ProviderError>;

	/// Requests an allowance (or trustline) of `amount` for `spender`.
	async fn approve(
		&self,
		token: &str,
		amount: U256,
		spender: &str,
	) -> Result<TransactionHash, ProviderError>;
}

/// A spoke adapter tagged with its chain family.
///
/// Closed union: dispatch that differs per family (allowance semantics,
/// deposit shape) matches on the variant, so a silently-defaulted branch for
/// a family with real allowance semantics cannot compile.
#[derive(Clone)]
pub enum SpokeProvider {
	Evm(Arc<dyn SpokeChainAdapter>),
	Cosmos(Arc<dyn SpokeChainAdapter>),
	Solana(Arc<dyn SpokeChainAdapter>),
	Sui(Arc<dyn SpokeChainAdapter>),
	Stellar(Arc<dyn SpokeChainAdapter>),
	Icon(Arc<dyn SpokeChainAdapter>),
}

impl SpokeProvider {
	pub fn family(&self) -> ChainFamily {
		match self {
			SpokeProvider::Evm(_) => ChainFamily::Evm,
			SpokeProvider::Cosmos(_) => ChainFamily::Cosmos,
			SpokeProvider::Solana(_) => ChainFamily::Solana,
			SpokeProvider::Sui(_) => ChainFamily::Sui,
			SpokeProvider::Stellar(_) => ChainFamily::Stellar,
			SpokeProvider::Icon(_) => ChainFamily::Icon,
		}
	}

	pub fn adapter(&self) -> &dyn SpokeChainAdapter {
		match self {
			SpokeProvider::Evm(a)
			| SpokeProvider::Cosmos(a)
			| SpokeProvider::Solana(a)
			| SpokeProvider::Sui(a)
			| SpokeProvider::Stellar(a)
			| SpokeProvider::Icon(a) => a.as_ref(),
		}
	}

	pub fn chain_id(&self) -> ChainId {
		self.adapter().chain_id()
	}
}

impl std::fmt::Debug for SpokeProvider {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SpokeProvider")
			.field("family", &self.family())
			.field("chain_id", &self.chain_id())
			.finish()
	}
}
