//! Wire types for the relay network HTTP API.

use intents_types::{RelayChainId, TransactionHash};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Lifecycle of a relay packet.
///
/// `Submitted` and `Relayed` are intermediate; `Executed` means the
/// destination-chain transaction has landed. Unrecognized states map to
/// `Other` so a relay-side addition never breaks polling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PacketStatus {
	Submitted,
	Relayed,
	Executed,
	#[serde(other)]
	Other,
}

/// The relay network's record of one relayed transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayPacket {
	pub src_chain_id: u64,
	pub src_tx_hash: String,
	pub dst_chain_id: u64,
	/// Populated once the destination transaction exists.
	#[serde(default)]
	pub dst_tx_hash: Option<String>,
	pub status: PacketStatus,
	/// Connection sequence number assigned by the relay.
	#[serde(default)]
	pub conn_sn: u64,
	#[serde(default)]
	pub signatures: Vec<String>,
	#[serde(default)]
	pub payload: Option<String>,
}

impl RelayPacket {
	/// Whether the packet has reached its terminal success state.
	pub fn is_executed(&self) -> bool {
		self.status == PacketStatus::Executed && self.dst_tx_hash.is_some()
	}
}

/// Body of `POST /submit`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitRequest {
	pub chain_id: u64,
	pub tx_hash: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub data: Option<serde_json::Value>,
}

/// Response envelope of `POST /submit`.
///
/// `success = false` is a protocol-level answer, not a transport failure;
/// the caller decides how to surface it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitResponse {
	pub success: bool,
	#[serde(default)]
	pub message: String,
}

/// Parameters of one execution wait.
#[derive(Debug, Clone)]
pub struct WaitParams {
	/// Origin chain in relay numbering.
	pub relay_chain_id: RelayChainId,
	pub spoke_tx_hash: TransactionHash,
	/// Total budget for the wait; the only cancellation mechanism.
	pub timeout: Duration,
}
