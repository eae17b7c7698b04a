//! Fixed-flow token migrations.
//!
//! The same commit → relay → confirm pipeline as the swap service, but over
//! a small closed set of flows instead of arbitrary token pairs: ICX → SODA
//! against a capped pre-funded pool, the hub-only revert back to ICX, the
//! legacy ↔ new bnUSD bridge, and the BALN → SODA swap with lockup options.
//! Flow-specific preconditions run before anything touches the network.

use intents_deposit::DepositSubmitter;
use intents_registry::AssetRegistry;
use intents_relay::{RelayClient, RelayError, WaitParams};
use intents_solver::{ExecutionRequest, ExecutionResponse, SolverApiClient};
use intents_types::{
	CreatedIntent, DepositRequest, HubChainProvider, Intent, IntentError, MigrationParams,
	ProviderError, RelaySubmitInfo, SpokeProvider, TransactionHash, B256, U256,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

mod flows;

use flows::FlowRoute;

/// Options for a full migration run.
#[derive(Debug, Clone)]
pub struct MigrationOptions {
	/// Budget for the relay-wait step.
	pub timeout: Duration,
}

impl Default for MigrationOptions {
	fn default() -> Self {
		Self {
			timeout: Duration::from_secs(60),
		}
	}
}

/// Everything a completed migration produced.
#[derive(Debug, Clone)]
pub struct MigrationResult {
	pub intent: Intent,
	pub spoke_tx_hash: TransactionHash,
	pub hub_tx_hash: TransactionHash,
	pub solver_ack: ExecutionResponse,
}

/// Orchestrates the fixed migration flows.
pub struct MigrationService {
	registry: Arc<AssetRegistry>,
	hub: Arc<dyn HubChainProvider>,
	deposit: DepositSubmitter,
	relay: RelayClient,
	solver: SolverApiClient,
}

impl MigrationService {
	pub fn new(
		registry: Arc<AssetRegistry>,
		hub: Arc<dyn HubChainProvider>,
		relay: RelayClient,
		solver: SolverApiClient,
	) -> Self {
		Self {
			registry,
			hub,
			deposit: DepositSubmitter::default(),
			relay,
			solver,
		}
	}

	pub fn with_deposit_submitter(mut self, deposit: DepositSubmitter) -> Self {
		self.deposit = deposit;
		self
	}

	/// Constructs a migration intent and submits (or returns) its deposit.
	///
	/// Every flow precondition runs here, before any transaction is sent:
	/// pool liquidity for ICX → SODA, the hub-only origin for reverts, and
	/// the legacy/new pairing for bnUSD.
	pub async fn create_migration_intent(
		&self,
		params: &MigrationParams,
		provider: &SpokeProvider,
		raw: bool,
	) -> Result<CreatedIntent, IntentError> {
		let fail = |reason: String| IntentError::CreateMigrationIntentFailed {
			params: Box::new(params.clone()),
			reason,
		};

		if params.amount().is_zero() {
			return Err(fail("amount must be greater than zero".into()));
		}

		let route = self.resolve_route(params).map_err(&fail)?;

		// The ICX pool is pre-funded and capped; a shortfall is a terminal
		// precondition failure, not something the solver can price around.
		if let MigrationParams::IcxToSoda { amount, .. } = params {
			let available = self
				.hub
				.available_migration_liquidity()
				.await
				.map_err(|e| fail(e.to_string()))?;
			if available < *amount {
				return Err(fail(format!(
					"migration pool holds {} but {} was requested",
					available, amount
				)));
			}
		}

		if provider.chain_id() != route.src_chain {
			return Err(fail(format!(
				"flow originates on chain {} but the provider is connected to {}",
				route.src_chain,
				provider.chain_id()
			)));
		}

		let adapter = provider.adapter();
		let wallet = adapter
			.wallet_address()
			.await
			.map_err(|e| fail(e.to_string()))?;
		let creator = self
			.hub
			.derive_wallet_address(route.src_chain, &wallet)
			.await
			.map_err(|e| fail(e.to_string()))?;
		let src_address_bytes = adapter
			.wallet_address_bytes()
			.await
			.map_err(|e| fail(e.to_string()))?;

		let src_relay = self
			.registry
			.relay_chain_id(route.src_chain)
			.map_err(|e| fail(e.to_string()))?;
		let dst_relay = self
			.registry
			.relay_chain_id(route.dst_chain)
			.map_err(|e| fail(e.to_string()))?;

		let mut intent = Intent {
			intent_id: B256::ZERO,
			creator,
			input_token: route.input_hub,
			output_token: route.output_hub,
			input_amount: params.amount(),
			min_output_amount: route.min_output,
			deadline: 0,
			allow_partial_fill: false,
			src_chain: src_relay,
			dst_chain: dst_relay,
			src_address: src_address_bytes,
			dst_address: intents_codec::spoke_address_bytes(params.to()),
			solver: Default::default(),
			data: route.data,
		};
		intent.intent_id = intents_codec::compute_intent_id(&intent);
		let encoded_payload = intents_codec::encode_intent(&intent);

		let deposit_to = if route.src_chain == self.registry.hub_chain_id() {
			format!("{}", self.registry.intents_contract())
		} else {
			self.registry
				.asset_manager(route.src_chain)
				.map_err(|e| fail(e.to_string()))?
		};

		debug!(
			intent_id = %intent.intent_id,
			flow = ?params.action(),
			src = %route.src_chain,
			dst = %route.dst_chain,
			"Constructed migration intent"
		);

		let outcome = self
			.deposit
			.submit(
				DepositRequest {
					from: wallet,
					to: deposit_to,
					token: route.input_token,
					amount: params.amount(),
					data: encoded_payload.clone(),
				},
				provider,
				raw,
			)
			.await
			.map_err(|e| fail(e.to_string()))?;

		Ok(CreatedIntent {
			outcome,
			intent,
			fee_amount: U256::ZERO,
			encoded_payload,
		})
	}

	/// Runs a full migration: create → relay submit → await execution →
	/// notify solver. Relay and solver stages share the swap pipeline's
	/// error codes.
	pub async fn migrate(
		&self,
		params: &MigrationParams,
		provider: &SpokeProvider,
		options: MigrationOptions,
	) -> Result<MigrationResult, IntentError> {
		let created = self
			.create_migration_intent(params, provider, false)
			.await?;

		let spoke_tx_hash = created
			.outcome
			.tx_hash()
			.cloned()
			.ok_or_else(|| IntentError::Unknown {
				detail: "deposit returned no transaction hash".into(),
			})?;

		let route = self
			.resolve_route(params)
			.map_err(|reason| IntentError::Unknown { detail: reason })?;
		let src_relay = self
			.registry
			.relay_chain_id(route.src_chain)
			.map_err(|e| IntentError::Unknown {
				detail: e.to_string(),
			})?;

		let hub_tx_hash = if route.src_chain == self.registry.hub_chain_id() {
			debug!(tx_hash = %spoke_tx_hash.truncated(), "Hub-originated flow, skipping relay");
			spoke_tx_hash.clone()
		} else {
			let submit_info = RelaySubmitInfo {
				chain_id: src_relay.0,
				tx_hash: spoke_tx_hash.0.clone(),
				data: None,
			};

			let response = self
				.relay
				.submit_transaction(src_relay, &spoke_tx_hash, None)
				.await
				.map_err(|e| IntentError::SubmitTxFailed {
					payload: submit_info.clone(),
					message: e.to_string(),
				})?;
			if !response.success {
				return Err(IntentError::SubmitTxFailed {
					payload: submit_info,
					message: response.message,
				});
			}

			let packet = self
				.relay
				.wait_until_intent_executed(WaitParams {
					relay_chain_id: src_relay,
					spoke_tx_hash: spoke_tx_hash.clone(),
					timeout: options.timeout,
				})
				.await
				.map_err(|e| match e {
					RelayError::Timeout { payload } => IntentError::RelayTimeout { payload },
					other => IntentError::Unknown {
						detail: other.to_string(),
					},
				})?;

			TransactionHash(packet.dst_tx_hash.ok_or_else(|| IntentError::Unknown {
				detail: "executed packet is missing its destination hash".into(),
			})?)
		};

		let solver_ack = self
			.solver
			.post_execution(&ExecutionRequest {
				intent_tx_hash: hub_tx_hash.0.clone(),
			})
			.await
			.map_err(|e| IntentError::PostExecutionFailed {
				intent: Box::new(created.intent.clone()),
				dst_tx_hash: hub_tx_hash.0.clone(),
				detail: e.to_string(),
			})?;

		info!(
			intent_id = %created.intent.intent_id,
			hub_tx_hash = %hub_tx_hash.truncated(),
			"Migration pipeline complete"
		);

		Ok(MigrationResult {
			intent: created.intent,
			spoke_tx_hash,
			hub_tx_hash,
			solver_ack,
		})
	}

	/// Whether the connected wallet has granted enough spend for the flow.
	///
	/// Reverts use the per-user router as spender; every other flow uses
	/// the same asset-manager/intents-contract spender as swaps. Families
	/// without an allowance concept answer valid without a network call.
	pub async fn is_allowance_valid(
		&self,
		params: &MigrationParams,
		provider: &SpokeProvider,
	) -> Result<bool, ProviderError> {
		let route = self
			.resolve_route(params)
			.map_err(ProviderError::Rejected)?;

		match provider {
			SpokeProvider::Evm(adapter) | SpokeProvider::Stellar(adapter) => {
				let owner = adapter.wallet_address().await?;
				let spender = self.flow_spender(params, &route, &owner).await?;
				adapter
					.is_allowance_valid(&route.input_token, params.amount(), &owner, &spender)
					.await
			}
			SpokeProvider::Cosmos(_)
			| SpokeProvider::Solana(_)
			| SpokeProvider::Sui(_)
			| SpokeProvider::Icon(_) => Ok(true),
		}
	}

	/// Requests an allowance (or trustline) covering the flow, or `None`
	/// where no approval exists.
	pub async fn approve(
		&self,
		params: &MigrationParams,
		provider: &SpokeProvider,
	) -> Result<Option<TransactionHash>, ProviderError> {
		let route = self
			.resolve_route(params)
			.map_err(ProviderError::Rejected)?;

		match provider {
			SpokeProvider::Evm(adapter) | SpokeProvider::Stellar(adapter) => {
				let owner = adapter.wallet_address().await?;
				let spender = self.flow_spender(params, &route, &owner).await?;
				let tx_hash = adapter
					.approve(&route.input_token, params.amount(), &spender)
					.await?;
				Ok(Some(tx_hash))
			}
			SpokeProvider::Cosmos(_)
			| SpokeProvider::Solana(_)
			| SpokeProvider::Sui(_)
			| SpokeProvider::Icon(_) => Ok(None),
		}
	}

	/// The contract allowed to pull the flow's deposit.
	async fn flow_spender(
		&self,
		params: &MigrationParams,
		route: &FlowRoute,
		owner: &str,
	) -> Result<String, ProviderError> {
		if let MigrationParams::RevertSodaToIcx { .. } = params {
			// Reverts are pulled by the user's router contract, resolved
			// per user on the hub.
			let user = self
				.hub
				.derive_wallet_address(route.src_chain, owner)
				.await?;
			let router = self.hub.user_router(user).await?;
			return Ok(format!("{}", router));
		}

		if route.src_chain == self.registry.hub_chain_id() {
			return Ok(format!("{}", self.registry.intents_contract()));
		}
		self.registry
			.asset_manager(route.src_chain)
			.map_err(|e| ProviderError::Other(e.into()))
	}
}
