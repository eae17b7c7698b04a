//! The error taxonomy every public pipeline operation returns.
//!
//! Errors are layered: transport-level failures (`SubmitTxFailed`,
//! `RelayTimeout`) are presumed transient and safe to retry with the same
//! payload; construction-level failures must not be retried without caller
//! intervention; `PostExecutionFailed` means funds have already moved on the
//! hub. Every variant carries its originating payload so a caller can retry
//! or escalate without re-deriving inputs.

use crate::intent::{CreateIntentParams, Intent};
use crate::migration::MigrationParams;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The payload originally posted to the relay network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelaySubmitInfo {
	/// Origin chain in relay numbering.
	pub chain_id: u64,
	pub tx_hash: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub data: Option<serde_json::Value>,
}

/// The parameters of a relay wait that timed out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayWaitInfo {
	pub relay_chain_id: u64,
	pub spoke_tx_hash: String,
	pub timeout_secs: u64,
	pub api_url: String,
}

/// Machine-readable code for each [`IntentError`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IntentErrorCode {
	CreationFailed,
	SubmitTxFailed,
	RelayTimeout,
	PostExecutionFailed,
	CreateMigrationIntentFailed,
	Unknown,
}

#[derive(Debug, Error)]
pub enum IntentError {
	/// The request was invalid or a precondition (allowance, verification)
	/// failed before anything reached the relay.
	#[error("intent creation failed: {reason}")]
	CreationFailed {
		params: Box<CreateIntentParams>,
		reason: String,
	},

	/// The relay network rejected the submission. The deposit is on-chain;
	/// resubmitting the same payload is safe.
	#[error("relay submission failed: {message}")]
	SubmitTxFailed {
		payload: RelaySubmitInfo,
		message: String,
	},

	/// The relay never reported execution before the deadline. The underlying
	/// relay may still complete later; polling again with the same
	/// parameters is safe.
	#[error("timed out waiting for relay execution of {}", payload.spoke_tx_hash)]
	RelayTimeout { payload: RelayWaitInfo },

	/// Hub execution happened but the solver never acknowledged it. Funds
	/// have moved; surface prominently instead of silently retrying.
	#[error("solver did not acknowledge executed intent: {detail}")]
	PostExecutionFailed {
		intent: Box<Intent>,
		dst_tx_hash: String,
		detail: String,
	},

	/// A migration precondition (liquidity, token pairing, origin chain)
	/// failed before any transaction was sent.
	#[error("migration intent creation failed: {reason}")]
	CreateMigrationIntentFailed {
		params: Box<MigrationParams>,
		reason: String,
	},

	/// Catch-all for anything not classified above.
	#[error("unexpected failure: {detail}")]
	Unknown { detail: String },
}

impl IntentError {
	pub fn code(&self) -> IntentErrorCode {
		match self {
			IntentError::CreationFailed { .. } => IntentErrorCode::CreationFailed,
			IntentError::SubmitTxFailed { .. } => IntentErrorCode::SubmitTxFailed,
			IntentError::RelayTimeout { .. } => IntentErrorCode::RelayTimeout,
			IntentError::PostExecutionFailed { .. } => IntentErrorCode::PostExecutionFailed,
			IntentError::CreateMigrationIntentFailed { .. } => {
				IntentErrorCode::CreateMigrationIntentFailed
			}
			IntentError::Unknown { .. } => IntentErrorCode::Unknown,
		}
	}

	/// Whether retrying the same step with the same payload is safe.
	pub fn is_retryable(&self) -> bool {
		matches!(
			self,
			IntentError::SubmitTxFailed { .. } | IntentError::RelayTimeout { .. }
		)
	}
}
