//! End-to-end swap orchestration.
//!
//! `SwapService` drives the whole commit → relay → confirm pipeline for one
//! intent: fee computation, payload encoding, deposit submission, relay
//! confirmation, and solver notification. Stages are strictly sequential
//! within one call and each stage's failure maps to exactly one
//! [`IntentError`] variant carrying the originating payload.

pub mod allowance;

use intents_codec::CodecError;
use intents_deposit::DepositSubmitter;
use intents_registry::AssetRegistry;
use intents_relay::{RelayClient, RelayError, WaitParams};
use intents_solver::{
	ExecutionRequest, ExecutionResponse, QuoteRequest, QuoteResponse, QuoteType,
	SolverApiClient, SolverErrorResponse,
};
use intents_types::{
	adjust_amount_by_fee, fee_amount, CreateIntentParams, CreatedIntent, DepositRequest,
	FeeDirection, HubChainProvider, Intent, IntentError, IntentState, PartnerFee, ProviderError,
	RelaySubmitInfo, SpokeProvider, TransactionHash, B256, U256,
};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum DeadlineError {
	#[error("deadline offset must be greater than zero")]
	InvalidOffset,
	#[error(transparent)]
	Provider(#[from] ProviderError),
}

/// Options for a full pipeline run.
#[derive(Debug, Clone)]
pub struct SwapOptions {
	/// Budget for the relay-wait step, the pipeline's only cancellation
	/// point.
	pub timeout: Duration,
	/// Skip the hub-side dry run before submitting the deposit.
	pub skip_simulation: bool,
}

impl Default for SwapOptions {
	fn default() -> Self {
		Self {
			timeout: Duration::from_secs(60),
			skip_simulation: false,
		}
	}
}

/// Everything a completed swap produced.
#[derive(Debug, Clone)]
pub struct SwapResult {
	pub intent: Intent,
	pub fee_amount: U256,
	/// Deposit transaction on the origin chain.
	pub spoke_tx_hash: TransactionHash,
	/// Execution transaction on the hub chain.
	pub hub_tx_hash: TransactionHash,
	/// The solver's acknowledgement of the execution.
	pub solver_ack: ExecutionResponse,
}

/// Orchestrates swap intents across the spoke adapters, the hub, the relay
/// network, and the solver.
///
/// Holds only immutable shared state; calls are independent and may run
/// concurrently.
pub struct SwapService {
	registry: Arc<AssetRegistry>,
	hub: Arc<dyn HubChainProvider>,
	deposit: DepositSubmitter,
	relay: RelayClient,
	solver: SolverApiClient,
}

impl SwapService {
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

	pub fn registry(&self) -> &AssetRegistry {
		&self.registry
	}

	/// Fill deadline for a swap: hub block timestamp plus `offset_secs`.
	pub async fn get_swap_deadline(&self, offset_secs: u64) -> Result<u64, DeadlineError> {
		if offset_secs == 0 {
			return Err(DeadlineError::InvalidOffset);
		}
		let now = self.hub.block_timestamp().await?;
		Ok(now + offset_secs)
	}

	/// Price discovery with the partner fee already applied.
	///
	/// Exact-input quotes are asked on the post-fee amount; exact-output
	/// quotes come back with the fee added onto the quoted input. Either
	/// way the quoted numbers match what settlement will move.
	pub async fn quote(
		&self,
		request: &QuoteRequest,
		fee: Option<&PartnerFee>,
	) -> Result<QuoteResponse, SolverErrorResponse> {
		let adjusted = match request.quote_type {
			QuoteType::ExactInput => QuoteRequest {
				amount: adjust_amount_by_fee(request.amount, fee, FeeDirection::ExactOutput)
					.map_err(|e| SolverErrorResponse::unknown(e.to_string()))?,
				..request.clone()
			},
			QuoteType::ExactOutput => request.clone(),
		};

		let mut response = self.solver.get_quote(&adjusted).await?;

		if request.quote_type == QuoteType::ExactOutput {
			response.quoted_amount =
				adjust_amount_by_fee(response.quoted_amount, fee, FeeDirection::ExactInput)
					.map_err(|e| SolverErrorResponse::unknown(e.to_string()))?;
		}
		Ok(response)
	}

	/// Constructs the intent and submits (or returns) its deposit.
	///
	/// Stops short of the relay and solver on purpose: callers may want
	/// validation or UI confirmation between construction and submission.
	pub async fn create_intent(
		&self,
		params: &CreateIntentParams,
		provider: &SpokeProvider,
		fee: Option<&PartnerFee>,
		raw: bool,
		skip_simulation: bool,
	) -> Result<CreatedIntent, IntentError> {
		let fail = |reason: String| IntentError::CreationFailed {
			params: Box::new(params.clone()),
			reason,
		};

		if provider.chain_id() != params.src_chain {
			return Err(fail(format!(
				"provider is connected to chain {} but the intent originates on {}",
				provider.chain_id(),
				params.src_chain
			)));
		}
		if !self.registry.is_supported_chain(params.src_chain) {
			return Err(fail(format!("unsupported source chain {}", params.src_chain)));
		}
		if !self.registry.is_supported_chain(params.dst_chain) {
			return Err(fail(format!(
				"unsupported destination chain {}",
				params.dst_chain
			)));
		}

		let input_asset = self
			.registry
			.require_hub_asset(params.src_chain, &params.input_token)
			.map_err(|e| fail(e.to_string()))?;
		let output_asset = self
			.registry
			.require_hub_asset(params.dst_chain, &params.output_token)
			.map_err(|e| fail(e.to_string()))?;

		let adapter = provider.adapter();
		let wallet = adapter
			.wallet_address()
			.await
			.map_err(|e| fail(e.to_string()))?;
		// An intent may only be constructed on behalf of the connected
		// wallet.
		if !wallet.eq_ignore_ascii_case(&params.src_address) {
			return Err(fail(format!(
				"src_address {} does not match the connected wallet {}",
				params.src_address, wallet
			)));
		}

		let creator = self
			.hub
			.derive_wallet_address(params.src_chain, &params.src_address)
			.await
			.map_err(|e| fail(e.to_string()))?;

		let fee_part = fee_amount(params.input_amount, fee).map_err(|e| fail(e.to_string()))?;
		let data = match fee {
			Some(f) if !fee_part.is_zero() => intents_codec::encode_fee(f.receiver(), fee_part),
			_ => Vec::new(),
		};

		let src_relay = self
			.registry
			.relay_chain_id(params.src_chain)
			.map_err(|e| fail(e.to_string()))?;
		let dst_relay = self
			.registry
			.relay_chain_id(params.dst_chain)
			.map_err(|e| fail(e.to_string()))?;

		let src_address_bytes = adapter
			.wallet_address_bytes()
			.await
			.map_err(|e| fail(e.to_string()))?;

		let mut intent = Intent {
			intent_id: B256::ZERO,
			creator,
			input_token: input_asset.asset,
			output_token: output_asset.asset,
			input_amount: params.input_amount,
			min_output_amount: params.min_output_amount,
			deadline: params.deadline,
			allow_partial_fill: params.allow_partial_fill,
			src_chain: src_relay,
			dst_chain: dst_relay,
			src_address: src_address_bytes,
			dst_address: intents_codec::spoke_address_bytes(&params.dst_address),
			solver: params.solver.unwrap_or_default(),
			data,
		};
		intent.intent_id = intents_codec::compute_intent_id(&intent);
		let encoded_payload = intents_codec::encode_intent(&intent);

		let total_amount = params
			.input_amount
			.checked_add(fee_part)
			.ok_or_else(|| fail("input amount plus fee overflows".into()))?;

		if !skip_simulation {
			self.hub
				.simulate_intent(&encoded_payload)
				.await
				.map_err(|e| fail(format!("simulation failed: {}", e)))?;
		}

		// Hub-originated intents go straight to the settlement contract; no
		// relay hop exists for them.
		let deposit_to = if params.src_chain == self.registry.hub_chain_id() {
			format!("{}", self.registry.intents_contract())
		} else {
			self.registry
				.asset_manager(params.src_chain)
				.map_err(|e| fail(e.to_string()))?
		};

		debug!(
			intent_id = %intent.intent_id,
			src = %params.src_chain,
			dst = %params.dst_chain,
			"Constructed intent"
		);

		let outcome = self
			.deposit
			.submit(
				DepositRequest {
					from: params.src_address.clone(),
					to: deposit_to,
					token: params.input_token.clone(),
					amount: total_amount,
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
			fee_amount: fee_part,
			encoded_payload,
		})
	}

	/// Runs the full pipeline: create → relay submit → await execution →
	/// notify solver.
	///
	/// Each stage's failure maps to its own error code with the original
	/// payload preserved; nothing escapes as a panic.
	#[doc(alias = "create_and_submit_intent")]
	pub async fn swap(
		&self,
		params: &CreateIntentParams,
		provider: &SpokeProvider,
		fee: Option<&PartnerFee>,
		options: SwapOptions,
	) -> Result<SwapResult, IntentError> {
		let created = self
			.create_intent(params, provider, fee, false, options.skip_simulation)
			.await?;

		let spoke_tx_hash = created
			.outcome
			.tx_hash()
			.cloned()
			.ok_or_else(|| IntentError::Unknown {
				detail: "deposit returned no transaction hash".into(),
			})?;

		let src_relay = self
			.registry
			.relay_chain_id(params.src_chain)
			.map_err(|e| IntentError::Unknown {
				detail: e.to_string(),
			})?;

		let hub_tx_hash = if params.src_chain == self.registry.hub_chain_id() {
			// Already executed on the hub; the deposit transaction is the
			// execution transaction.
			debug!(tx_hash = %spoke_tx_hash.truncated(), "Hub-originated intent, skipping relay");
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
			"Swap pipeline complete"
		);

		Ok(SwapResult {
			intent: created.intent,
			fee_amount: created.fee_amount,
			spoke_tx_hash,
			hub_tx_hash,
			solver_ack,
		})
	}

	/// Decodes the intent carried by a hub or deposit transaction.
	pub async fn get_intent(&self, tx_hash: &TransactionHash) -> Result<Intent, CodecError> {
		intents_codec::get_intent(self.hub.as_ref(), tx_hash).await
	}

	/// Decodes an intent together with its current fill state.
	pub async fn get_filled_intent(
		&self,
		tx_hash: &TransactionHash,
	) -> Result<(Intent, IntentState), CodecError> {
		intents_codec::get_filled_intent(self.hub.as_ref(), tx_hash).await
	}
}

#[cfg(test)]
pub(crate) mod test_support;
