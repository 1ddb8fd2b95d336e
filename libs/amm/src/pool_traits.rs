//! Pool trait definitions for a unified pricing interface

use crate::{Result, WeightedMath};
use serde::{Deserialize, Serialize};

/// Engine input for one swap direction: already-resolved reserves, weights and fee (ppm)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightedPoolState {
    pub reserve_in: u64,
    pub weight_in: u64,
    pub reserve_out: u64,
    pub weight_out: u64,
    pub fee: u64,
}

impl WeightedPoolState {
    /// Same pool, opposite direction
    pub fn reversed(&self) -> Self {
        Self {
            reserve_in: self.reserve_out,
            weight_in: self.weight_out,
            reserve_out: self.reserve_in,
            weight_out: self.weight_in,
            fee: self.fee,
        }
    }
}

/// Unified pool interface for swap pricing
pub trait AmmPool {
    /// Calculate output amount for given input
    fn get_amount_out(&self, amount_in: u64) -> Result<u64>;

    /// Calculate required input for desired output
    fn get_amount_in(&self, amount_out: u64) -> Result<u64>;

    /// Fee-free spot value of `amount_in` in the output asset
    fn quote(&self, amount_in: u64) -> Result<u64>;

    /// Get current reserves `(in, out)`
    fn get_liquidity(&self) -> (u64, u64);

    /// Get fee in ppm
    fn get_fee(&self) -> u64;
}

/// A resolved pool direction paired with the fee policy used to price it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightedPool {
    pub state: WeightedPoolState,
    pub math: WeightedMath,
}

impl WeightedPool {
    pub fn new(state: WeightedPoolState, math: WeightedMath) -> Self {
        Self { state, math }
    }
}

impl AmmPool for WeightedPool {
    fn get_amount_out(&self, amount_in: u64) -> Result<u64> {
        let s = &self.state;
        self.math.get_amount_out(
            amount_in,
            s.reserve_in,
            s.weight_in,
            s.reserve_out,
            s.weight_out,
            s.fee,
        )
    }

    fn get_amount_in(&self, amount_out: u64) -> Result<u64> {
        let s = &self.state;
        self.math.get_amount_in(
            amount_out,
            s.reserve_in,
            s.weight_in,
            s.reserve_out,
            s.weight_out,
            s.fee,
        )
    }

    fn quote(&self, amount_in: u64) -> Result<u64> {
        let s = &self.state;
        WeightedMath::quote(
            amount_in,
            s.reserve_in,
            s.weight_in,
            s.reserve_out,
            s.weight_out,
        )
    }

    fn get_liquidity(&self) -> (u64, u64) {
        (self.state.reserve_in, self.state.reserve_out)
    }

    fn get_fee(&self) -> u64 {
        self.state.fee
    }
}
