//! Wire types for the solver HTTP API.
//!
//! Amounts travel as decimal strings to preserve precision across JSON
//! implementations.

use intents_types::U256;
use serde::{Deserialize, Serialize};

/// Serde adapter: `U256` as a decimal string on the wire.
pub mod u256_decimal {
	use super::U256;
	use serde::{Deserialize, Deserializer, Serializer};

	pub fn serialize<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(&value.to_string())
	}

	pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
		let raw = String::deserialize(deserializer)?;
		raw.parse::<U256>()
			.map_err(|e| serde::de::Error::custom(format!("invalid amount {:?}: {}", raw, e)))
	}
}

/// Which side of the trade the caller fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteType {
	ExactInput,
	ExactOutput,
}

/// Body of `POST /quote`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteRequest {
	pub token_src: String,
	pub token_src_blockchain_id: u64,
	pub token_dst: String,
	pub token_dst_blockchain_id: u64,
	/// Fee-adjusted amount; quoting and settlement share one fee pass.
	#[serde(with = "u256_decimal")]
	pub amount: U256,
	pub quote_type: QuoteType,
}

/// Body of the `POST /quote` success response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteResponse {
	#[serde(with = "u256_decimal")]
	pub quoted_amount: U256,
	/// Solver-assigned id for tracking the quote.
	pub uuid: String,
}

/// Body of `POST /execute`; keyed by the relay's destination tx hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionRequest {
	pub intent_tx_hash: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResponse {
	pub answer: String,
	pub intent_hash: String,
}

/// Body of `POST /status`, same key as execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusRequest {
	pub intent_tx_hash: String,
}

/// Fill progress as the solver reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillStatus {
	NotFound,
	Pending,
	Started,
	Solved,
	Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
	pub status: FillStatus,
	#[serde(default)]
	pub fill_tx_hash: Option<String>,
}

/// Error codes the solver reports in its `detail` envelope.
///
/// Anything unrecognized — including transport failures folded in by the
/// client — lands on `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SolverErrorCode {
	NoPathFound,
	InsufficientLiquidity,
	QuoteNotFound,
	IntentNotFound,
	#[serde(other)]
	Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverErrorDetail {
	pub code: SolverErrorCode,
	pub message: String,
}

/// Error body of every solver endpoint: `{ detail: { code, message } }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverErrorResponse {
	pub detail: SolverErrorDetail,
}

impl SolverErrorResponse {
	/// Wraps an unclassifiable failure.
	pub fn unknown(message: impl Into<String>) -> Self {
		Self {
			detail: SolverErrorDetail {
				code: SolverErrorCode::Unknown,
				message: message.into(),
			},
		}
	}
}

impl std::fmt::Display for SolverErrorResponse {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{:?}: {}", self.detail.code, self.detail.message)
	}
}
