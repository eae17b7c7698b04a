//! Deposit construction and submission.
//!
//! Builds the chain-specific deposit through the spoke adapter, broadcasts
//! it, and then verifies the hash is actually observable on the origin chain
//! before the caller proceeds to relay submission. Verification exists
//! because some chains' RPC nodes acknowledge a broadcast before the
//! transaction is indexed, and relaying an unindexed hash wastes a full
//! relay round-trip.

use intents_types::{DepositOutcome, DepositRequest, ProviderError, SpokeProvider, TransactionHash};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum DepositError {
	#[error("failed to build deposit transaction: {0}")]
	Build(ProviderError),
	#[error("failed to broadcast deposit transaction: {0}")]
	Send(ProviderError),
	#[error("transaction {tx_hash} was not observable on chain after {attempts} checks")]
	Unverified {
		tx_hash: TransactionHash,
		attempts: u32,
	},
	#[error("verification query failed: {0}")]
	Verify(ProviderError),
}

/// Submits deposits through a spoke adapter and confirms observability.
///
/// Failure here is terminal for the attempt; resubmission could double-spend
/// state already mutated on-chain, so retry is the caller's decision.
#[derive(Debug, Clone)]
pub struct DepositSubmitter {
	verify_attempts: u32,
	verify_interval: Duration,
}

impl Default for DepositSubmitter {
	fn default() -> Self {
		Self {
			verify_attempts: 10,
			verify_interval: Duration::from_secs(3),
		}
	}
}

impl DepositSubmitter {
	pub fn new(verify_attempts: u32, verify_interval: Duration) -> Self {
		Self {
			verify_attempts,
			verify_interval,
		}
	}

	/// Builds and submits the deposit carrying the encoded intent payload.
	///
	/// With `raw = true` the unsent transaction is returned for custom
	/// signing/broadcast flows and nothing touches the network beyond the
	/// build itself.
	pub async fn submit(
		&self,
		request: DepositRequest,
		provider: &SpokeProvider,
		raw: bool,
	) -> Result<DepositOutcome, DepositError> {
		let adapter = provider.adapter();

		let tx = adapter
			.build_deposit(request)
			.await
			.map_err(DepositError::Build)?;

		if raw {
			debug!(chain = %provider.chain_id(), "Returning unsent deposit transaction");
			return Ok(DepositOutcome::Raw(tx));
		}

		let tx_hash = adapter
			.send_transaction(&tx)
			.await
			.map_err(DepositError::Send)?;
		info!(tx_hash = %tx_hash.truncated(), chain = %provider.chain_id(), "Submitted deposit");

		self.verify_tx_hash(provider, &tx_hash).await?;
		Ok(DepositOutcome::Sent(tx_hash))
	}

	/// Polls until the origin chain reports the transaction, or gives up.
	pub async fn verify_tx_hash(
		&self,
		provider: &SpokeProvider,
		tx_hash: &TransactionHash,
	) -> Result<(), DepositError> {
		let adapter = provider.adapter();

		for attempt in 1..=self.verify_attempts {
			match adapter.verify_transaction(tx_hash).await {
				Ok(true) => {
					debug!(
						tx_hash = %tx_hash.truncated(),
						attempt,
						"Deposit observable on origin chain"
					);
					return Ok(());
				}
				Ok(false) => {
					debug!(tx_hash = %tx_hash.truncated(), attempt, "Transaction not indexed yet");
				}
				Err(e) => return Err(DepositError::Verify(e)),
			}

			if attempt < self.verify_attempts {
				tokio::time::sleep(self.verify_interval).await;
			}
		}

		warn!(tx_hash = %tx_hash.truncated(), "Giving up waiting for transaction to be indexed");
		Err(DepositError::Unverified {
			tx_hash: tx_hash.clone(),
			attempts: self.verify_attempts,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use intents_types::{ChainId, RawTransaction, SpokeChainAdapter, U256};
	use std::sync::atomic::{AtomicU32, Ordering};
	use std::sync::Arc;

	/// Adapter whose verification succeeds only after `visible_after` polls.
	struct SlowIndexAdapter {
		visible_after: u32,
		verify_calls: AtomicU32,
		send_allowed: bool,
	}

	impl SlowIndexAdapter {
		fn provider(visible_after: u32, send_allowed: bool) -> SpokeProvider {
			SpokeProvider::Evm(Arc::new(Self {
				visible_after,
				verify_calls: AtomicU32::new(0),
				send_allowed,
			}))
		}
	}

	#[async_trait::async_trait]
	impl SpokeChainAdapter for SlowIndexAdapter {
		fn chain_id(&self) -> ChainId {
			ChainId(56)
		}

		async fn wallet_address(&self) -> Result<String, ProviderError> {
			Ok("0xwallet".into())
		}

		async fn wallet_address_bytes(&self) -> Result<Vec<u8>, ProviderError> {
			Ok(b"0xwallet".to_vec())
		}

		async fn build_deposit(
			&self,
			request: DepositRequest,
		) -> Result<RawTransaction, ProviderError> {
			Ok(RawTransaction {
				chain_id: ChainId(56),
				from: request.from,
				to: request.to,
				value: U256::ZERO,
				data: request.data,
			})
		}

		async fn send_transaction(
			&self,
			_tx: &RawTransaction,
		) -> Result<TransactionHash, ProviderError> {
			assert!(self.send_allowed, "raw mode must not broadcast");
			Ok(TransactionHash::from("0xdeposit"))
		}

		async fn verify_transaction(
			&self,
			_hash: &TransactionHash,
		) -> Result<bool, ProviderError> {
			let seen = self.verify_calls.fetch_add(1, Ordering::SeqCst) + 1;
			Ok(seen >= self.visible_after)
		}

		async fn is_allowance_valid(
			&self,
			_token: &str,
			_amount: U256,
			_owner: &str,
			_spender: &str,
		) -> Result<bool, ProviderError> {
			Ok(true)
		}

		async fn approve(
			&self,
			_token: &str,
			_amount: U256,
			_spender: &str,
		) -> Result<TransactionHash, ProviderError> {
			Ok(TransactionHash::from("0xapprove"))
		}
	}

	fn request() -> DepositRequest {
		DepositRequest {
			from: "0xwallet".into(),
			to: "0xassetmanager".into(),
			token: "0xtoken".into(),
			amount: U256::from(1000u64),
			data: vec![1, 2, 3],
		}
	}

	#[tokio::test]
	async fn submit_verifies_before_returning() {
		let provider = SlowIndexAdapter::provider(2, true);
		let submitter = DepositSubmitter::new(3, Duration::from_millis(1));

		let outcome = submitter.submit(request(), &provider, false).await.unwrap();
		assert_eq!(
			outcome,
			DepositOutcome::Sent(TransactionHash::from("0xdeposit"))
		);
	}

	#[tokio::test]
	async fn unverified_hash_is_terminal() {
		let provider = SlowIndexAdapter::provider(u32::MAX, true);
		let submitter = DepositSubmitter::new(2, Duration::from_millis(1));

		let err = submitter
			.submit(request(), &provider, false)
			.await
			.unwrap_err();
		assert!(matches!(
			err,
			DepositError::Unverified { attempts: 2, .. }
		));
	}

	#[tokio::test]
	async fn raw_mode_returns_unsent_transaction() {
		// send_allowed = false makes the adapter panic if broadcast happens.
		let provider = SlowIndexAdapter::provider(1, false);
		let submitter = DepositSubmitter::default();

		let outcome = submitter.submit(request(), &provider, true).await.unwrap();
		match outcome {
			DepositOutcome::Raw(tx) => {
				assert_eq!(tx.to, "0xassetmanager");
				assert_eq!(tx.data, vec![1, 2, 3]);
			}
			other => panic!("expected raw outcome, got {:?}", other),
		}
	}
}
