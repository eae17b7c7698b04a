//! The intent and its on-chain state.

use crate::common::{Address, ChainId, RelayChainId, B256, U256};
use serde::{Deserialize, Serialize};

/// A cross-chain swap or migration intent.
///
/// Created once per attempt and immutable after construction. `intent_id` is
/// the keccak256 hash of the ABI-encoded payload fields (everything below
/// except the id itself), computed by the codec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
	/// Canonical identifier, derived from the remaining fields.
	pub intent_id: B256,
	/// Hub wallet of the user the intent settles for.
	pub creator: Address,
	/// Hub-chain address of the input asset.
	pub input_token: Address,
	/// Hub-chain address of the output asset.
	pub output_token: Address,
	/// Input amount, excluding the partner fee.
	pub input_amount: U256,
	/// Minimum acceptable output amount.
	pub min_output_amount: U256,
	/// Hub timestamp after which the intent can no longer be filled.
	pub deadline: u64,
	/// Whether solvers may fill the intent in parts.
	pub allow_partial_fill: bool,
	/// Source chain in relay numbering.
	pub src_chain: RelayChainId,
	/// Destination chain in relay numbering.
	pub dst_chain: RelayChainId,
	/// Source address in its original chain's byte form.
	pub src_address: Vec<u8>,
	/// Destination address in its original chain's byte form.
	pub dst_address: Vec<u8>,
	/// Pinned solver, or the zero address for open intents.
	pub solver: Address,
	/// Opaque payload data; carries the encoded fee metadata when present.
	pub data: Vec<u8>,
}

/// On-chain state of an intent, mutated by solver fills.
///
/// Read-only from the client's perspective.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentState {
	pub exists: bool,
	pub remaining_input: U256,
	pub received_output: U256,
	pub pending_payment: bool,
}

/// Caller-supplied parameters for constructing a swap intent.
///
/// Token and address fields are in the originating chains' native string
/// encodings; the service resolves them to hub assets and byte addresses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateIntentParams {
	/// Original address of the input token on `src_chain`.
	pub input_token: String,
	/// Original address of the output token on `dst_chain`.
	pub output_token: String,
	pub input_amount: U256,
	pub min_output_amount: U256,
	/// Fill deadline as a hub timestamp, zero for no deadline.
	pub deadline: u64,
	pub allow_partial_fill: bool,
	pub src_chain: ChainId,
	pub dst_chain: ChainId,
	/// Caller's address on `src_chain`; must match the adapter wallet.
	pub src_address: String,
	/// Recipient address on `dst_chain`.
	pub dst_address: String,
	/// Pinned solver hub address, if any.
	pub solver: Option<Address>,
}

/// Everything `create_intent` produced for one attempt.
#[derive(Debug, Clone)]
pub struct CreatedIntent {
	/// The deposit transaction, sent or raw.
	pub outcome: DepositOutcome,
	/// The constructed intent.
	pub intent: Intent,
	/// Partner fee charged on top of `input_amount`.
	pub fee_amount: U256,
	/// The exact payload bytes embedded in the deposit.
	pub encoded_payload: Vec<u8>,
}

/// Result of a deposit submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DepositOutcome {
	/// Transaction was broadcast and verified observable on the origin chain.
	Sent(crate::common::TransactionHash),
	/// Raw mode: the unsent transaction for custom signing/broadcast flows.
	Raw(crate::common::RawTransaction),
}

impl DepositOutcome {
	/// The transaction hash, if this outcome was broadcast.
	pub fn tx_hash(&self) -> Option<&crate::common::TransactionHash> {
		match self {
			DepositOutcome::Sent(hash) => Some(hash),
			DepositOutcome::Raw(_) => None,
		}
	}
}
