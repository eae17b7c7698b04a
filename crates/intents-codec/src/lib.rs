//! Intent payload codec.
//!
//! The encoder here is the one place where "what goes on-chain" is
//! authoritative: the byte layout must match what the hub settlement contract
//! decodes, field for field, or settlement silently breaks. The `sol!`
//! definitions below mirror the contract structs; everything else in the SDK
//! treats the encoded payload as opaque bytes.

use alloy::primitives::{keccak256, Bytes};
use alloy::sol;
use alloy::sol_types::SolValue;
use intents_types::{
	Address, HubChainProvider, Intent, IntentState, ProviderError, TransactionHash, B256,
	FEE_TYPE, U256,
};
use thiserror::Error;

sol! {
	/// Fee metadata embedded in the intent's data field. `feeType` is 1 for
	/// partner fees; other tags are reserved.
	struct FeeData {
		uint8 feeType;
		address receiver;
		uint256 amount;
	}

	/// Lockup options carried by BALN migration intents.
	struct BalnLockData {
		uint256 lockupPeriod;
		bool stake;
	}

	/// The intent exactly as the hub settlement contract decodes it.
	/// Field order is authoritative.
	struct IntentPayload {
		address creator;
		address inputToken;
		address outputToken;
		uint256 inputAmount;
		uint256 minOutputAmount;
		uint256 deadline;
		bool allowPartialFill;
		uint256 srcChain;
		uint256 dstChain;
		bytes srcAddress;
		bytes dstAddress;
		address solver;
		bytes data;
	}
}

#[derive(Debug, Error)]
pub enum CodecError {
	#[error("payload does not decode as an intent: {0}")]
	Abi(String),
	#[error("unrecognized fee metadata tag {0}")]
	InvalidFeeTag(u8),
	#[error("deadline {0} does not fit a hub timestamp")]
	DeadlineOverflow(U256),
	#[error(transparent)]
	Provider(#[from] ProviderError),
}

fn to_payload(intent: &Intent) -> IntentPayload {
	IntentPayload {
		creator: intent.creator,
		inputToken: intent.input_token,
		outputToken: intent.output_token,
		inputAmount: intent.input_amount,
		minOutputAmount: intent.min_output_amount,
		deadline: U256::from(intent.deadline),
		allowPartialFill: intent.allow_partial_fill,
		srcChain: U256::from(intent.src_chain.0),
		dstChain: U256::from(intent.dst_chain.0),
		srcAddress: Bytes::from(intent.src_address.clone()),
		dstAddress: Bytes::from(intent.dst_address.clone()),
		solver: intent.solver,
		data: Bytes::from(intent.data.clone()),
	}
}

/// Encodes an intent into the deposit payload the hub contract expects.
///
/// The `intent_id` field does not participate; it is derived from these
/// bytes.
pub fn encode_intent(intent: &Intent) -> Vec<u8> {
	to_payload(intent).abi_encode()
}

/// The canonical intent id: keccak256 over the encoded payload.
pub fn compute_intent_id(intent: &Intent) -> B256 {
	keccak256(encode_intent(intent))
}

/// Decodes a deposit payload back into an [`Intent`], recomputing its id.
pub fn decode_intent(payload: &[u8]) -> Result<Intent, CodecError> {
	let decoded = IntentPayload::abi_decode(payload).map_err(|e| CodecError::Abi(e.to_string()))?;

	let deadline: u64 = decoded
		.deadline
		.try_into()
		.map_err(|_| CodecError::DeadlineOverflow(decoded.deadline))?;

	let mut intent = Intent {
		intent_id: B256::ZERO,
		creator: decoded.creator,
		input_token: decoded.inputToken,
		output_token: decoded.outputToken,
		input_amount: decoded.inputAmount,
		min_output_amount: decoded.minOutputAmount,
		deadline,
		allow_partial_fill: decoded.allowPartialFill,
		src_chain: intents_types::RelayChainId(
			decoded
				.srcChain
				.try_into()
				.map_err(|_| CodecError::Abi("srcChain out of range".into()))?,
		),
		dst_chain: intents_types::RelayChainId(
			decoded
				.dstChain
				.try_into()
				.map_err(|_| CodecError::Abi("dstChain out of range".into()))?,
		),
		src_address: decoded.srcAddress.to_vec(),
		dst_address: decoded.dstAddress.to_vec(),
		solver: decoded.solver,
		data: decoded.data.to_vec(),
	};
	intent.intent_id = compute_intent_id(&intent);
	Ok(intent)
}

/// Byte form of an original-chain address for intent encoding.
///
/// `0x`-hex addresses decode to their raw bytes; every other encoding
/// (bech32, base58, G-/hx-addresses) passes through as UTF-8, which is the
/// form the hub contract expects for non-EVM spokes.
pub fn spoke_address_bytes(address: &str) -> Vec<u8> {
	if let Some(stripped) = address.strip_prefix("0x") {
		if let Ok(bytes) = hex::decode(stripped) {
			return bytes;
		}
	}
	address.as_bytes().to_vec()
}

/// Encodes partner fee metadata for the intent's data field.
pub fn encode_fee(receiver: Address, amount: U256) -> Vec<u8> {
	FeeData {
		feeType: FEE_TYPE,
		receiver,
		amount,
	}
	.abi_encode()
}

/// Encodes the lockup options of a BALN migration intent.
pub fn encode_baln_lock_data(lockup_period: u64, stake: bool) -> Vec<u8> {
	BalnLockData {
		lockupPeriod: U256::from(lockup_period),
		stake,
	}
	.abi_encode()
}

/// Decodes the lockup options of a BALN migration intent.
pub fn decode_baln_lock_data(data: &[u8]) -> Result<(u64, bool), CodecError> {
	let decoded = BalnLockData::abi_decode(data).map_err(|e| CodecError::Abi(e.to_string()))?;
	let lockup: u64 = decoded
		.lockupPeriod
		.try_into()
		.map_err(|_| CodecError::Abi("lockup period out of range".into()))?;
	Ok((lockup, decoded.stake))
}

/// Decodes fee metadata from an intent's data field.
///
/// Empty data means no fee. A present but unrecognized tag is an error
/// rather than a silently dropped fee.
pub fn decode_fee(data: &[u8]) -> Result<Option<(Address, U256)>, CodecError> {
	if data.is_empty() {
		return Ok(None);
	}
	let fee = FeeData::abi_decode(data).map_err(|e| CodecError::Abi(e.to_string()))?;
	if fee.feeType != FEE_TYPE {
		return Err(CodecError::InvalidFeeTag(fee.feeType));
	}
	Ok(Some((fee.receiver, fee.amount)))
}

/// Reads and decodes the intent carried by a hub or deposit transaction.
pub async fn get_intent(
	hub: &dyn HubChainProvider,
	tx_hash: &TransactionHash,
) -> Result<Intent, CodecError> {
	let payload = hub.intent_payload(tx_hash).await?;
	decode_intent(&payload)
}

/// Reads an intent together with its current fill state.
pub async fn get_filled_intent(
	hub: &dyn HubChainProvider,
	tx_hash: &TransactionHash,
) -> Result<(Intent, IntentState), CodecError> {
	let intent = get_intent(hub, tx_hash).await?;
	let state = hub.intent_state(intent.intent_id).await?;
	Ok((intent, state))
}
