//! Hub chain read interface.

use crate::common::{Address, ChainId, TransactionHash, B256, U256};
use crate::intent::IntentState;
use crate::spoke::ProviderError;
use async_trait::async_trait;

/// Read access to the hub chain, consumed by the services and the codec.
///
/// Implementations live outside this workspace (RPC, indexer, test double);
/// nothing here writes to the hub directly.
#[async_trait]
pub trait HubChainProvider: Send + Sync {
	/// Timestamp of the latest hub block.
	async fn block_timestamp(&self) -> Result<u64, ProviderError>;

	/// Derives the stable hub wallet for a user's original-chain address.
	///
	/// One hub address per external owner, independent of which spoke chain
	/// initiated the call.
	async fn derive_wallet_address(
		&self,
		spoke_chain: ChainId,
		address: &str,
	) -> Result<Address, ProviderError>;

	/// Dry-runs an encoded intent payload against the settlement contract.
	async fn simulate_intent(&self, payload: &[u8]) -> Result<(), ProviderError>;

	/// The intent payload bytes carried by a hub or deposit transaction.
	async fn intent_payload(&self, tx_hash: &TransactionHash) -> Result<Vec<u8>, ProviderError>;

	/// Current fill state of an intent.
	async fn intent_state(&self, intent_id: B256) -> Result<IntentState, ProviderError>;

	/// Remaining liquidity in the pre-funded ICX migration pool.
	async fn available_migration_liquidity(&self) -> Result<U256, ProviderError>;

	/// The per-user router contract acting as spender for revert migrations.
	async fn user_router(&self, user: Address) -> Result<Address, ProviderError>;
}
