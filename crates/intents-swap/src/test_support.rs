//! Shared fixtures for the service tests.

use intents_registry::{AssetRegistry, ConfigLoader};
use intents_types::{
	Address, ChainId, DepositRequest, HubChainProvider, IntentState, ProviderError,
	RawTransaction, SpokeChainAdapter, TransactionHash, B256, U256,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

pub const REGISTRY_TOML: &str = r#"
[hub]
chain_id = 146
relay_chain_id = 23
intents_contract = "0x00000000000000000000000000000000000000A1"
asset_manager = "0x00000000000000000000000000000000000000A2"

[chains.56]
name = "BSC"
family = "evm"
relay_chain_id = 4
asset_manager = "0x00000000000000000000000000000000000000B1"

[chains.42161]
name = "Arbitrum"
family = "evm"
relay_chain_id = 5
asset_manager = "0x00000000000000000000000000000000000000B2"

[chains.99]
name = "Stellar"
family = "stellar"
relay_chain_id = 6
asset_manager = "GMANAGER"

[chains.101]
name = "Solana"
family = "solana"
relay_chain_id = 7
asset_manager = "SoLManager111"

[[assets]]
chain_id = 56
original = "0x2170Ed0880ac9A755fd29B2688956BD959F933F8"
asset = "0x00000000000000000000000000000000000000C1"
decimal = 18
vault = "0x00000000000000000000000000000000000000D1"

[[assets]]
chain_id = 42161
original = "0x2f2a2543B76A4166549F7aaB2e75Bef0aefC5B0f"
asset = "0x00000000000000000000000000000000000000C2"
decimal = 8
vault = "0x00000000000000000000000000000000000000D2"

[[assets]]
chain_id = 146
original = "0x00000000000000000000000000000000000000C3"
asset = "0x00000000000000000000000000000000000000C3"
decimal = 18
vault = "0x00000000000000000000000000000000000000D3"

[[assets]]
chain_id = 146
original = "0x00000000000000000000000000000000000000C4"
asset = "0x00000000000000000000000000000000000000C4"
decimal = 18
vault = "0x00000000000000000000000000000000000000D4"
"#;

pub const BSC_ETH: &str = "0x2170Ed0880ac9A755fd29B2688956BD959F933F8";
pub const ARB_WBTC: &str = "0x2f2a2543B76A4166549F7aaB2e75Bef0aefC5B0f";

pub fn registry() -> Arc<AssetRegistry> {
	Arc::new(AssetRegistry::new(
		ConfigLoader::from_toml(REGISTRY_TOML).unwrap(),
	))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowanceCall {
	pub token: String,
	pub amount: U256,
	pub owner: String,
	pub spender: String,
}

/// Configurable in-memory spoke adapter.
pub struct MockAdapter {
	pub chain_id: ChainId,
	pub wallet: String,
	pub send_hash: TransactionHash,
	pub allowance_result: bool,
	/// Panic on any allowance/approve call; proves a path made no network
	/// call.
	pub forbid_allowance_calls: bool,
	pub allowance_calls: Mutex<Vec<AllowanceCall>>,
	pub sent: Mutex<Vec<RawTransaction>>,
	pub send_attempted: AtomicBool,
}

impl MockAdapter {
	pub fn new(chain_id: ChainId, wallet: &str) -> Self {
		Self {
			chain_id,
			wallet: wallet.to_string(),
			send_hash: TransactionHash::from("0xspoke"),
			allowance_result: true,
			forbid_allowance_calls: false,
			allowance_calls: Mutex::new(Vec::new()),
			sent: Mutex::new(Vec::new()),
			send_attempted: AtomicBool::new(false),
		}
	}
}

#[async_trait::async_trait]
impl SpokeChainAdapter for MockAdapter {
	fn chain_id(&self) -> ChainId {
		self.chain_id
	}

	async fn wallet_address(&self) -> Result<String, ProviderError> {
		Ok(self.wallet.clone())
	}

	async fn wallet_address_bytes(&self) -> Result<Vec<u8>, ProviderError> {
		Ok(intents_codec::spoke_address_bytes(&self.wallet))
	}

	async fn build_deposit(&self, request: DepositRequest) -> Result<RawTransaction, ProviderError> {
		Ok(RawTransaction {
			chain_id: self.chain_id,
			from: request.from,
			to: request.to,
			value: U256::ZERO,
			data: request.data,
		})
	}

	async fn send_transaction(&self, tx: &RawTransaction) -> Result<TransactionHash, ProviderError> {
		self.send_attempted.store(true, Ordering::SeqCst);
		self.sent.lock().unwrap().push(tx.clone());
		Ok(self.send_hash.clone())
	}

	async fn verify_transaction(&self, _hash: &TransactionHash) -> Result<bool, ProviderError> {
		Ok(true)
	}

	async fn is_allowance_valid(
		&self,
		token: &str,
		amount: U256,
		owner: &str,
		spender: &str,
	) -> Result<bool, ProviderError> {
		assert!(
			!self.forbid_allowance_calls,
			"allowance must not be queried for this chain family"
		);
		self.allowance_calls.lock().unwrap().push(AllowanceCall {
			token: token.to_string(),
			amount,
			owner: owner.to_string(),
			spender: spender.to_string(),
		});
		Ok(self.allowance_result)
	}

	async fn approve(
		&self,
		token: &str,
		amount: U256,
		spender: &str,
	) -> Result<TransactionHash, ProviderError> {
		assert!(
			!self.forbid_allowance_calls,
			"approve must not be called for this chain family"
		);
		self.allowance_calls.lock().unwrap().push(AllowanceCall {
			token: token.to_string(),
			amount,
			owner: String::new(),
			spender: spender.to_string(),
		});
		Ok(TransactionHash::from("0xapprove"))
	}
}

/// Configurable in-memory hub provider.
pub struct MockHub {
	pub timestamp: u64,
	pub creator: Address,
	pub liquidity: U256,
	pub router: Address,
	pub simulate_ok: bool,
	pub payload: Mutex<Vec<u8>>,
	pub state: Mutex<IntentState>,
}

impl Default for MockHub {
	fn default() -> Self {
		Self {
			timestamp: 1_700_000_000,
			creator: Address::repeat_byte(0xEE),
			liquidity: U256::MAX,
			router: Address::repeat_byte(0xF0),
			simulate_ok: true,
			payload: Mutex::new(Vec::new()),
			state: Mutex::new(IntentState {
				exists: true,
				remaining_input: U256::ZERO,
				received_output: U256::ZERO,
				pending_payment: false,
			}),
		}
	}
}

#[async_trait::async_trait]
impl HubChainProvider for MockHub {
	async fn block_timestamp(&self) -> Result<u64, ProviderError> {
		Ok(self.timestamp)
	}

	async fn derive_wallet_address(
		&self,
		_spoke_chain: ChainId,
		_address: &str,
	) -> Result<Address, ProviderError> {
		Ok(self.creator)
	}

	async fn simulate_intent(&self, _payload: &[u8]) -> Result<(), ProviderError> {
		if self.simulate_ok {
			Ok(())
		} else {
			Err(ProviderError::Rejected("simulation reverted".into()))
		}
	}

	async fn intent_payload(&self, _tx_hash: &TransactionHash) -> Result<Vec<u8>, ProviderError> {
		Ok(self.payload.lock().unwrap().clone())
	}

	async fn intent_state(&self, _intent_id: B256) -> Result<IntentState, ProviderError> {
		Ok(self.state.lock().unwrap().clone())
	}

	async fn available_migration_liquidity(&self) -> Result<U256, ProviderError> {
		Ok(self.liquidity)
	}

	async fn user_router(&self, _user: Address) -> Result<Address, ProviderError> {
		Ok(self.router)
	}
}
