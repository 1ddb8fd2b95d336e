//! # Bancor AMM - Weighted Bonding-Curve Pricing Engine
//!
//! ## Purpose
//!
//! Pure pricing functions for two-reserve weighted pools following the Bancor
//! bonding curve `reserve_in^weight_in * reserve_out^weight_out = k`. Given
//! already-resolved reserves, weights and a fee, it answers three questions:
//!
//! - [`get_amount_out`]: output received for an exact input, net of fee
//! - [`get_amount_in`]: minimum input required for an exact output
//! - [`quote`]: fee-free weight-adjusted spot conversion
//!
//! ## Integration Points
//!
//! - **Input Sources**: reserve/weight/fee tuples from the registry adapter
//!   (`bancor-registry`), or any caller holding plain numbers
//! - **Output Destinations**: quoting services, liquidity-add ratio checks, price oracles
//! - **Fee Scale**: parts-per-million ([`FEE_SCALE`]); normalising other scales
//!   is the caller's job
//!
//! ## Architecture Role
//!
//! Stateless and side-effect free: no logging, no global configuration, no I/O.
//! The fee policy is an explicit [`FeeModel`] carried by [`WeightedMath`].
//!
//! ## Determinism
//!
//! - Balanced pools use exact 256-bit integer arithmetic
//! - Unbalanced pools use fixed-point `ln`/`exp` on `Decimal` with fixed
//!   iteration counts: no hardware floating point anywhere
//! - Identical inputs produce identical integers on every platform

pub mod error;
pub mod fee;
pub mod fixed_point;
pub mod pool_traits;
pub mod weighted_math;

pub use error::{PricingError, Result};
pub use fee::FeeModel;
pub use pool_traits::{AmmPool, WeightedPool, WeightedPoolState};
pub use weighted_math::WeightedMath;

/// Fee denominator: fees are expressed in parts-per-million
pub const FEE_SCALE: u64 = 1_000_000;

/// [`WeightedMath::get_amount_out`] under the default fee model
pub fn get_amount_out(
    amount_in: u64,
    reserve_in: u64,
    weight_in: u64,
    reserve_out: u64,
    weight_out: u64,
    fee: u64,
) -> Result<u64> {
    WeightedMath::default().get_amount_out(
        amount_in,
        reserve_in,
        weight_in,
        reserve_out,
        weight_out,
        fee,
    )
}

/// [`WeightedMath::get_amount_in`] under the default fee model
pub fn get_amount_in(
    amount_out: u64,
    reserve_in: u64,
    weight_in: u64,
    reserve_out: u64,
    weight_out: u64,
    fee: u64,
) -> Result<u64> {
    WeightedMath::default().get_amount_in(
        amount_out,
        reserve_in,
        weight_in,
        reserve_out,
        weight_out,
        fee,
    )
}

/// [`WeightedMath::quote`]
pub fn quote(
    amount_a: u64,
    reserve_a: u64,
    weight_a: u64,
    reserve_b: u64,
    weight_b: u64,
) -> Result<u64> {
    WeightedMath::quote(amount_a, reserve_a, weight_a, reserve_b, weight_b)
}
