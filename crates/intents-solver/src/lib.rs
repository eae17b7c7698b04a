//! Client for the off-chain solver service.
//!
//! Three stateless request/response operations: price discovery, execution
//! notification, and fill-status polling. Every failure mode — transport
//! errors, non-2xx responses, unparsable bodies — folds into the solver's
//! own error envelope with an `Unknown` code, so callers handle exactly one
//! error shape and nothing escapes as a panic or raw transport error.

pub mod types;

pub use types::*;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

/// HTTP client for the solver API.
#[derive(Debug, Clone)]
pub struct SolverApiClient {
	http: reqwest::Client,
	api_url: String,
}

impl SolverApiClient {
	pub fn new(api_url: impl Into<String>) -> Self {
		Self {
			http: reqwest::Client::new(),
			api_url: api_url.into(),
		}
	}

	pub fn api_url(&self) -> &str {
		&self.api_url
	}

	/// Requests a price quote for a fee-adjusted amount.
	pub async fn get_quote(&self, request: &QuoteRequest) -> Result<QuoteResponse, SolverErrorResponse> {
		debug!(token_src = %request.token_src, token_dst = %request.token_dst, "Requesting quote");
		self.post("quote", request).await
	}

	/// Notifies the solver that a hub execution transaction exists.
	///
	/// This is what actually triggers fill and settlement, keyed by the
	/// relay's destination tx hash.
	pub async fn post_execution(
		&self,
		request: &ExecutionRequest,
	) -> Result<ExecutionResponse, SolverErrorResponse> {
		debug!(intent_tx_hash = %request.intent_tx_hash, "Posting execution");
		self.post("execute", request).await
	}

	/// Polls fill status for an executed intent.
	pub async fn get_status(
		&self,
		request: &StatusRequest,
	) -> Result<StatusResponse, SolverErrorResponse> {
		self.post("status", request).await
	}

	async fn post<B: Serialize, T: DeserializeOwned>(
		&self,
		endpoint: &str,
		body: &B,
	) -> Result<T, SolverErrorResponse> {
		let response = self
			.http
			.post(format!("{}/{}", self.api_url, endpoint))
			.json(body)
			.send()
			.await
			.map_err(|e| SolverErrorResponse::unknown(format!("request failed: {}", e)))?;

		let status = response.status();
		let text = response
			.text()
			.await
			.map_err(|e| SolverErrorResponse::unknown(format!("unreadable response: {}", e)))?;

		if !status.is_success() {
			// Prefer the solver's own error envelope; fall back to the raw
			// body when it cannot be parsed.
			return Err(serde_json::from_str::<SolverErrorResponse>(&text).unwrap_or_else(
				|_| SolverErrorResponse::unknown(format!("{}: {}", status, text)),
			));
		}

		serde_json::from_str(&text)
			.map_err(|e| SolverErrorResponse::unknown(format!("malformed body: {} ({})", e, text)))
	}
}
