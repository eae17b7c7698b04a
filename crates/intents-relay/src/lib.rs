//! Client for the off-chain relay network.
//!
//! Drives the relay half of the commit → relay → confirm state machine:
//! submit the origin-chain transaction hash, then poll until the relay
//! reports the destination-chain execution. Polling is idempotent; the only
//! state between polls is the elapsed-time counter, and the caller-supplied
//! timeout is the only cancellation mechanism.

pub mod types;

pub use types::*;

use intents_types::{RelayChainId, RelayWaitInfo, TransactionHash};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum RelayError {
	#[error("relay request failed: {0}")]
	Http(#[from] reqwest::Error),
	#[error("relay returned an unreadable response: {0}")]
	InvalidResponse(String),
	#[error("timed out waiting for packet execution of {}", payload.spoke_tx_hash)]
	Timeout { payload: RelayWaitInfo },
}

/// HTTP client for the relay network.
#[derive(Debug, Clone)]
pub struct RelayClient {
	http: reqwest::Client,
	api_url: String,
	poll_interval: Duration,
}

impl RelayClient {
	pub fn new(api_url: impl Into<String>) -> Self {
		Self {
			http: reqwest::Client::new(),
			api_url: api_url.into(),
			poll_interval: Duration::from_secs(2),
		}
	}

	pub fn with_poll_interval(mut self, interval: Duration) -> Self {
		self.poll_interval = interval;
		self
	}

	pub fn api_url(&self) -> &str {
		&self.api_url
	}

	/// Announces an origin-chain transaction to the relay network.
	///
	/// A `success = false` answer is returned as-is rather than raised; only
	/// transport failures are errors. Resubmitting the same payload is safe.
	pub async fn submit_transaction(
		&self,
		chain_id: RelayChainId,
		tx_hash: &TransactionHash,
		data: Option<serde_json::Value>,
	) -> Result<SubmitResponse, RelayError> {
		let request = SubmitRequest {
			chain_id: chain_id.0,
			tx_hash: tx_hash.0.clone(),
			data,
		};

		debug!(chain_id = %chain_id, tx_hash = %tx_hash.truncated(), "Submitting to relay");
		let response = self
			.http
			.post(format!("{}/submit", self.api_url))
			.json(&request)
			.send()
			.await?;

		let status = response.status();
		if !status.is_success() {
			let message = response.text().await.unwrap_or_default();
			warn!(%status, "Relay rejected submission");
			return Ok(SubmitResponse {
				success: false,
				message: format!("relay returned {}: {}", status, message),
			});
		}

		let parsed: SubmitResponse = response
			.json()
			.await
			.map_err(|e| RelayError::InvalidResponse(e.to_string()))?;
		Ok(parsed)
	}

	/// Fetches the relay packet for `(chain_id, tx_hash)`, if the relay has
	/// observed the transaction yet.
	pub async fn get_packet(
		&self,
		chain_id: RelayChainId,
		tx_hash: &TransactionHash,
	) -> Result<Option<RelayPacket>, RelayError> {
		let response = self
			.http
			.get(format!("{}/packet", self.api_url))
			.query(&[
				("chain_id", chain_id.0.to_string()),
				("tx_hash", tx_hash.0.clone()),
			])
			.send()
			.await?;

		if response.status() == reqwest::StatusCode::NOT_FOUND {
			return Ok(None);
		}
		if !response.status().is_success() {
			return Err(RelayError::InvalidResponse(format!(
				"packet query returned {}",
				response.status()
			)));
		}

		let packet: RelayPacket = response
			.json()
			.await
			.map_err(|e| RelayError::InvalidResponse(e.to_string()))?;
		Ok(Some(packet))
	}

	/// Polls until the packet reports `executed` with a destination hash.
	///
	/// Bounded loop on a fixed interval against a monotonic deadline; on
	/// timeout the error carries the full poll parameters so the caller can
	/// resume the identical wait later.
	pub async fn wait_until_intent_executed(
		&self,
		params: WaitParams,
	) -> Result<RelayPacket, RelayError> {
		let deadline = tokio::time::Instant::now() + params.timeout;
		info!(
			chain_id = %params.relay_chain_id,
			tx_hash = %params.spoke_tx_hash.truncated(),
			timeout_secs = params.timeout.as_secs(),
			"Waiting for relay execution"
		);

		loop {
			match self
				.get_packet(params.relay_chain_id, &params.spoke_tx_hash)
				.await
			{
				Ok(Some(packet)) if packet.is_executed() => {
					info!(
						tx_hash = %params.spoke_tx_hash.truncated(),
						dst_tx_hash = packet.dst_tx_hash.as_deref().unwrap_or(""),
						"Relay reported execution"
					);
					return Ok(packet);
				}
				Ok(Some(packet)) => {
					debug!(status = ?packet.status, "Packet not executed yet");
				}
				Ok(None) => {
					debug!("Packet not observed by relay yet");
				}
				// The relay is a shared external resource; transient read
				// failures inside the window do not abort the wait.
				Err(RelayError::Http(e)) => {
					warn!(error = %e, "Relay poll failed, retrying");
				}
				Err(e) => return Err(e),
			}

			if tokio::time::Instant::now() + self.poll_interval > deadline {
				return Err(RelayError::Timeout {
					payload: RelayWaitInfo {
						relay_chain_id: params.relay_chain_id.0,
						spoke_tx_hash: params.spoke_tx_hash.0.clone(),
						timeout_secs: params.timeout.as_secs(),
						api_url: self.api_url.clone(),
					},
				});
			}
			tokio::time::sleep(self.poll_interval).await;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use wiremock::matchers::{method, path, query_param};
	use wiremock::{Mock, MockServer, ResponseTemplate};

	fn executed_packet() -> serde_json::Value {
		serde_json::json!({
			"src_chain_id": 4,
			"src_tx_hash": "0xspoke",
			"dst_chain_id": 23,
			"dst_tx_hash": "0xhub",
			"status": "executed",
			"conn_sn": 17,
			"signatures": ["0xsig"],
			"payload": null
		})
	}

	#[tokio::test]
	async fn submit_returns_success_envelope() {
		let server = MockServer::start().await;
		Mock::given(method("POST"))
			.and(path("/submit"))
			.respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
				"success": true,
				"message": "ok"
			})))
			.mount(&server)
			.await;

		let client = RelayClient::new(server.uri());
		let response = client
			.submit_transaction(RelayChainId(4), &TransactionHash::from("0xspoke"), None)
			.await
			.unwrap();
		assert!(response.success);
	}

	#[tokio::test]
	async fn submit_failure_is_an_envelope_not_an_error() {
		let server = MockServer::start().await;
		Mock::given(method("POST"))
			.and(path("/submit"))
			.respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
				"success": false,
				"message": "unknown chain"
			})))
			.mount(&server)
			.await;

		let client = RelayClient::new(server.uri());
		let response = client
			.submit_transaction(RelayChainId(999), &TransactionHash::from("0xspoke"), None)
			.await
			.unwrap();
		assert!(!response.success);
		assert_eq!(response.message, "unknown chain");
	}

	#[tokio::test]
	async fn submit_http_failure_folds_into_envelope() {
		let server = MockServer::start().await;
		Mock::given(method("POST"))
			.and(path("/submit"))
			.respond_with(ResponseTemplate::new(500).set_body_string("boom"))
			.mount(&server)
			.await;

		let client = RelayClient::new(server.uri());
		let response = client
			.submit_transaction(RelayChainId(4), &TransactionHash::from("0xspoke"), None)
			.await
			.unwrap();
		assert!(!response.success);
		assert!(response.message.contains("500"));
	}

	#[tokio::test]
	async fn wait_polls_until_executed() {
		let server = MockServer::start().await;

		// First poll: packet exists but is still in flight.
		Mock::given(method("GET"))
			.and(path("/packet"))
			.and(query_param("tx_hash", "0xspoke"))
			.respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
				"src_chain_id": 4,
				"src_tx_hash": "0xspoke",
				"dst_chain_id": 23,
				"status": "relayed"
			})))
			.up_to_n_times(1)
			.mount(&server)
			.await;

		Mock::given(method("GET"))
			.and(path("/packet"))
			.respond_with(ResponseTemplate::new(200).set_body_json(executed_packet()))
			.mount(&server)
			.await;

		let client =
			RelayClient::new(server.uri()).with_poll_interval(Duration::from_millis(5));
		let packet = client
			.wait_until_intent_executed(WaitParams {
				relay_chain_id: RelayChainId(4),
				spoke_tx_hash: TransactionHash::from("0xspoke"),
				timeout: Duration::from_secs(5),
			})
			.await
			.unwrap();

		assert!(packet.is_executed());
		assert_eq!(packet.dst_tx_hash.as_deref(), Some("0xhub"));
	}

	#[tokio::test]
	async fn wait_timeout_carries_poll_parameters() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.and(path("/packet"))
			.respond_with(ResponseTemplate::new(404))
			.mount(&server)
			.await;

		let client =
			RelayClient::new(server.uri()).with_poll_interval(Duration::from_millis(5));
		let err = client
			.wait_until_intent_executed(WaitParams {
				relay_chain_id: RelayChainId(4),
				spoke_tx_hash: TransactionHash::from("0xspoke"),
				timeout: Duration::from_millis(20),
			})
			.await
			.unwrap_err();

		match err {
			RelayError::Timeout { payload } => {
				assert_eq!(payload.relay_chain_id, 4);
				assert_eq!(payload.spoke_tx_hash, "0xspoke");
				assert_eq!(payload.api_url, server.uri());
			}
			other => panic!("expected timeout, got {:?}", other),
		}
	}

	#[tokio::test]
	async fn unknown_packet_status_deserializes_as_other() {
		let packet: RelayPacket = serde_json::from_value(serde_json::json!({
			"src_chain_id": 4,
			"src_tx_hash": "0xspoke",
			"dst_chain_id": 23,
			"status": "quarantined"
		}))
		.unwrap();
		assert_eq!(packet.status, PacketStatus::Other);
		assert!(!packet.is_executed());
	}
}
