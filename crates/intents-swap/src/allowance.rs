//! Allowance and approval dispatch by chain family.
//!
//! EVM chains gate deposits on an ERC-20 allowance for the asset manager
//! (the intents contract when the source is the hub itself); Stellar gates
//! them on a trustline of sufficient limit. Every other family has no
//! allowance concept, and answers valid without a network call. The branch
//! is explicit per family: silently assuming "valid" for an EVM chain would
//! wave deposits through that the asset manager cannot pull.

use crate::SwapService;
use intents_types::{
	fee_amount, ChainId, CreateIntentParams, PartnerFee, ProviderError, SpokeProvider,
	TransactionHash, U256,
};
use tracing::debug;

impl SwapService {
	/// Whether the connected wallet has granted the pipeline enough spend.
	///
	/// The required amount is the input amount plus the partner fee, the
	/// same total the deposit will move.
	pub async fn is_allowance_valid(
		&self,
		params: &CreateIntentParams,
		fee: Option<&PartnerFee>,
		provider: &SpokeProvider,
	) -> Result<bool, ProviderError> {
		let required = self.required_allowance(params, fee)?;

		match provider {
			SpokeProvider::Evm(adapter) | SpokeProvider::Stellar(adapter) => {
				let spender = self.approval_spender(params.src_chain)?;
				adapter
					.is_allowance_valid(&params.input_token, required, &params.src_address, &spender)
					.await
			}
			SpokeProvider::Cosmos(_)
			| SpokeProvider::Solana(_)
			| SpokeProvider::Sui(_)
			| SpokeProvider::Icon(_) => {
				debug!(family = %provider.family(), "Chain family has no allowance concept");
				Ok(true)
			}
		}
	}

	/// Requests an allowance (or trustline) covering the deposit.
	///
	/// Returns the approval transaction hash, or `None` for families where
	/// no approval exists.
	pub async fn approve(
		&self,
		params: &CreateIntentParams,
		fee: Option<&PartnerFee>,
		provider: &SpokeProvider,
	) -> Result<Option<TransactionHash>, ProviderError> {
		let required = self.required_allowance(params, fee)?;

		match provider {
			SpokeProvider::Evm(adapter) | SpokeProvider::Stellar(adapter) => {
				let spender = self.approval_spender(params.src_chain)?;
				let tx_hash = adapter
					.approve(&params.input_token, required, &spender)
					.await?;
				Ok(Some(tx_hash))
			}
			SpokeProvider::Cosmos(_)
			| SpokeProvider::Solana(_)
			| SpokeProvider::Sui(_)
			| SpokeProvider::Icon(_) => Ok(None),
		}
	}

	fn required_allowance(
		&self,
		params: &CreateIntentParams,
		fee: Option<&PartnerFee>,
	) -> Result<U256, ProviderError> {
		let fee_part = fee_amount(params.input_amount, fee)
			.map_err(|e| ProviderError::Rejected(e.to_string()))?;
		params
			.input_amount
			.checked_add(fee_part)
			.ok_or_else(|| ProviderError::Rejected("allowance amount overflows".into()))
	}

	/// The contract allowed to pull the deposit on the source chain.
	pub(crate) fn approval_spender(&self, chain: ChainId) -> Result<String, ProviderError> {
		if chain == self.registry().hub_chain_id() {
			return Ok(format!("{}", self.registry().intents_contract()));
		}
		self.registry()
			.asset_manager(chain)
			.map_err(|e| ProviderError::Other(e.into()))
	}
}
