//! Partner fee policies and the arithmetic applied to intent amounts.
//!
//! The same functions back quoting and on-chain amount computation so the
//! quoted, approved, and settled amounts can never diverge. All arithmetic is
//! integer; percentage fees use basis points with floor division.

use crate::common::{Address, U256};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Basis points denominator: 100 bps = 1%.
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Fee metadata tag for fee entries embedded in the intent payload.
pub const FEE_TYPE: u8 = 1;

/// A partner fee applied once to the input amount at intent construction.
///
/// Percentage and fixed fees are mutually exclusive by construction; a
/// configuration cannot supply both shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum PartnerFee {
	/// Fee as integer basis points of the input amount (100 = 1%).
	Percentage {
		basis_points: u64,
		receiver: Address,
	},
	/// Fixed fee amount, independent of the input amount.
	Fixed { amount: U256, receiver: Address },
}

impl PartnerFee {
	pub fn receiver(&self) -> Address {
		match self {
			PartnerFee::Percentage { receiver, .. } => *receiver,
			PartnerFee::Fixed { receiver, .. } => *receiver,
		}
	}
}

/// Direction of a fee adjustment for quote requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeeDirection {
	/// The caller fixed the input; the fee is added on top.
	ExactInput,
	/// The caller fixed the output; the fee is deducted from the amount.
	ExactOutput,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FeeError {
	#[error("amount must be greater than zero")]
	InvalidAmount,
	#[error("fee basis points {0} exceed the denominator {BPS_DENOMINATOR}")]
	InvalidBasisPoints(u64),
	#[error("fixed fee {fee} exceeds amount {amount}")]
	FeeExceedsAmount { fee: U256, amount: U256 },
	#[error("amount overflow while applying fee")]
	Overflow,
}

/// Computes the partner fee for `amount` under `fee`.
///
/// Returns zero when no fee is configured. Percentage fees floor; fixed fees
/// return the configured amount unchanged regardless of `amount`, but the
/// `amount > 0` invariant still holds.
pub fn fee_amount(amount: U256, fee: Option<&PartnerFee>) -> Result<U256, FeeError> {
	if amount.is_zero() {
		return Err(FeeError::InvalidAmount);
	}
	match fee {
		None => Ok(U256::ZERO),
		Some(PartnerFee::Percentage { basis_points, .. }) => {
			if *basis_points > BPS_DENOMINATOR {
				return Err(FeeError::InvalidBasisPoints(*basis_points));
			}
			let scaled = amount
				.checked_mul(U256::from(*basis_points))
				.ok_or(FeeError::Overflow)?;
			Ok(scaled / U256::from(BPS_DENOMINATOR))
		}
		Some(PartnerFee::Fixed { amount: fixed, .. }) => Ok(*fixed),
	}
}

/// Adjusts `amount` by the partner fee for quote requests.
///
/// The exact-output direction deducts the fee so that
/// `adjust(amount) + fee_amount(amount) == amount`; the exact-input direction
/// adds it on so the quoted input covers amount plus fee.
pub fn adjust_amount_by_fee(
	amount: U256,
	fee: Option<&PartnerFee>,
	direction: FeeDirection,
) -> Result<U256, FeeError> {
	let fee_part = fee_amount(amount, fee)?;
	match direction {
		FeeDirection::ExactInput => amount.checked_add(fee_part).ok_or(FeeError::Overflow),
		FeeDirection::ExactOutput => {
			if fee_part > amount {
				return Err(FeeError::FeeExceedsAmount {
					fee: fee_part,
					amount,
				});
			}
			Ok(amount - fee_part)
		}
	}
}
