//! Route resolution for the closed set of migration flows.

use crate::MigrationService;
use intents_types::{Address, ChainId, MigrationParams, U256};

/// Where a flow runs and what it moves.
#[derive(Debug, Clone)]
pub(crate) struct FlowRoute {
	pub src_chain: ChainId,
	pub dst_chain: ChainId,
	/// Original token on the source chain, for deposits and allowances.
	pub input_token: String,
	/// Hub representation of the input token.
	pub input_hub: Address,
	/// Hub representation of the output token.
	pub output_hub: Address,
	pub min_output: U256,
	/// Flow-specific payload data.
	pub data: Vec<u8>,
}

impl MigrationService {
	/// Resolves a flow's route from configuration, rejecting invalid token
	/// pairings before any network call. Errors are human-readable reasons
	/// the caller wraps into the migration error variant.
	pub(crate) fn resolve_route(&self, params: &MigrationParams) -> Result<FlowRoute, String> {
		let registry = &self.registry;
		let cfg = registry.migration().map_err(|e| e.to_string())?;
		let hub_chain = registry.hub_chain_id();

		match params {
			MigrationParams::IcxToSoda { amount, .. } => {
				let input_hub = registry
					.require_hub_asset(cfg.icon_chain_id, &cfg.icx_token)
					.map_err(|e| e.to_string())?;
				Ok(FlowRoute {
					src_chain: cfg.icon_chain_id,
					dst_chain: hub_chain,
					input_token: cfg.icx_token.clone(),
					input_hub: input_hub.asset,
					output_hub: cfg.soda_token,
					// The pool redeems one-for-one.
					min_output: *amount,
					data: Vec::new(),
				})
			}

			MigrationParams::RevertSodaToIcx { amount, .. } => {
				let soda = format!("{}", cfg.soda_token);
				let icx_hub = registry
					.require_hub_asset(cfg.icon_chain_id, &cfg.icx_token)
					.map_err(|e| e.to_string())?;
				Ok(FlowRoute {
					src_chain: hub_chain,
					dst_chain: cfg.icon_chain_id,
					input_token: soda,
					input_hub: cfg.soda_token,
					output_hub: icx_hub.asset,
					min_output: *amount,
					data: Vec::new(),
				})
			}

			MigrationParams::UnifiedBnUsd {
				src_chain,
				dst_chain,
				src_bnusd,
				dst_bnusd,
				amount,
				..
			} => {
				let is_legacy = |token: &str| {
					cfg.bnusd_legacy
						.iter()
						.any(|t| t.eq_ignore_ascii_case(token))
				};
				let is_new = |token: &str| {
					cfg.bnusd_new.iter().any(|t| t.eq_ignore_ascii_case(token))
				};

				let src_legacy = is_legacy(src_bnusd);
				let dst_legacy = is_legacy(dst_bnusd);

				// Exactly one side must be legacy; the other must be a new
				// token. The check runs before any lookup so a bad pairing
				// never reaches the network.
				if src_legacy == dst_legacy {
					return Err(format!(
						"exactly one side must be a legacy bnUSD token (src legacy: {}, dst legacy: {})",
						src_legacy, dst_legacy
					));
				}
				if src_legacy && !is_new(dst_bnusd) {
					return Err(format!("{} is not a recognized new bnUSD token", dst_bnusd));
				}
				if dst_legacy && !is_new(src_bnusd) {
					return Err(format!("{} is not a recognized new bnUSD token", src_bnusd));
				}

				let input_hub = registry
					.require_hub_asset(*src_chain, src_bnusd)
					.map_err(|e| e.to_string())?;
				let output_hub = registry
					.require_hub_asset(*dst_chain, dst_bnusd)
					.map_err(|e| e.to_string())?;

				Ok(FlowRoute {
					src_chain: *src_chain,
					dst_chain: *dst_chain,
					input_token: src_bnusd.clone(),
					input_hub: input_hub.asset,
					output_hub: output_hub.asset,
					// Stablecoin bridge, one-for-one.
					min_output: *amount,
					data: Vec::new(),
				})
			}

			MigrationParams::BalnToSoda {
				lockup_period,
				stake,
				..
			} => {
				let input_hub = registry
					.require_hub_asset(cfg.icon_chain_id, &cfg.baln_token)
					.map_err(|e| e.to_string())?;
				Ok(FlowRoute {
					src_chain: cfg.icon_chain_id,
					dst_chain: hub_chain,
					input_token: cfg.baln_token.clone(),
					input_hub: input_hub.asset,
					output_hub: cfg.soda_token,
					// Pool-priced; the fill decides the rate.
					min_output: U256::ZERO,
					data: intents_codec::encode_baln_lock_data(*lockup_period, *stake),
				})
			}
		}
	}
}
