//! Parameters for the fixed migration flows.

use crate::common::U256;
use serde::{Deserialize, Serialize};

/// Whether a call moves a legacy representation forward or back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MigrationAction {
	Migrate,
	Revert,
}

/// One of the closed set of migration flows.
///
/// Exactly one variant is active per call; every variant carries the amount
/// and a chain-appropriate destination address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "flow")]
pub enum MigrationParams {
	/// ICX to SODA against the capped pre-funded pool.
	IcxToSoda { amount: U256, to: String },
	/// SODA back to ICX; only valid from the hub chain.
	RevertSodaToIcx { amount: U256, to: String },
	/// Legacy bnUSD to new bnUSD or back; direction inferred from which
	/// side holds the legacy token.
	UnifiedBnUsd {
		src_chain: crate::common::ChainId,
		dst_chain: crate::common::ChainId,
		src_bnusd: String,
		dst_bnusd: String,
		amount: U256,
		to: String,
	},
	/// BALN to SODA with lockup and stake options baked into the payload.
	BalnToSoda {
		amount: U256,
		to: String,
		lockup_period: u64,
		stake: bool,
	},
}

impl MigrationParams {
	pub fn amount(&self) -> U256 {
		match self {
			MigrationParams::IcxToSoda { amount, .. }
			| MigrationParams::RevertSodaToIcx { amount, .. }
			| MigrationParams::UnifiedBnUsd { amount, .. }
			| MigrationParams::BalnToSoda { amount, .. } => *amount,
		}
	}

	pub fn to(&self) -> &str {
		match self {
			MigrationParams::IcxToSoda { to, .. }
			| MigrationParams::RevertSodaToIcx { to, .. }
			| MigrationParams::UnifiedBnUsd { to, .. }
			| MigrationParams::BalnToSoda { to, .. } => to,
		}
	}

	/// The action this flow performs.
	pub fn action(&self) -> MigrationAction {
		match self {
			MigrationParams::RevertSodaToIcx { .. } => MigrationAction::Revert,
			_ => MigrationAction::Migrate,
		}
	}
}
