//! Fee-application policies
//!
//! Historically the converter contracts disagreed on where the trading fee is
//! charged. Each policy is reduced to two rational factors: one applied to the
//! input before it enters the curve, one applied to the raw curve output.

use crate::error::{PricingError, Result};
use crate::FEE_SCALE;
use serde::{Deserialize, Serialize};

/// Where and how often the fee is deducted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeModel {
    /// Fee taken from the input amount before the curve (Uniswap style)
    OnInput,
    /// Output scaled once by `(1 - fee)`
    SingleDeduction,
    /// Output scaled by `(1 - fee)^2`: trade fee and protocol fee both charged on the hop
    #[default]
    DoubleDeduction,
}

/// A `numerator / denominator` multiplier, both sides exact integers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Factor {
    pub numerator: u128,
    pub denominator: u128,
}

impl Factor {
    pub const ONE: Factor = Factor {
        numerator: 1,
        denominator: 1,
    };

    fn keep(fee: u64) -> Self {
        Self {
            numerator: u128::from(FEE_SCALE - fee),
            denominator: u128::from(FEE_SCALE),
        }
    }

    fn squared(self) -> Self {
        Self {
            numerator: self.numerator * self.numerator,
            denominator: self.denominator * self.denominator,
        }
    }
}

/// Integer coefficients of the balanced-weight swap
///
/// `amount_out = reserve_out * amount_in * n / (reserve_in * d + amount_in * m)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurveFactors {
    pub n: u128,
    pub d: u128,
    pub m: u128,
}

impl FeeModel {
    /// Multiplier applied to `amount_in` before it reaches the curve
    pub fn input_factor(self, fee: u64) -> Factor {
        match self {
            FeeModel::OnInput => Factor::keep(fee),
            FeeModel::SingleDeduction | FeeModel::DoubleDeduction => Factor::ONE,
        }
    }

    /// Multiplier applied to the raw curve output
    pub fn output_factor(self, fee: u64) -> Factor {
        match self {
            FeeModel::OnInput => Factor::ONE,
            FeeModel::SingleDeduction => Factor::keep(fee),
            FeeModel::DoubleDeduction => Factor::keep(fee).squared(),
        }
    }

    pub fn curve_factors(self, fee: u64) -> CurveFactors {
        let input = self.input_factor(fee);
        let output = self.output_factor(fee);
        CurveFactors {
            n: input.numerator * output.numerator,
            d: input.denominator * output.denominator,
            m: input.numerator * output.denominator,
        }
    }
}

/// Reject fees that would zero out (or invert) the trade
pub fn validate_fee(fee: u64) -> Result<()> {
    if fee >= FEE_SCALE {
        return Err(PricingError::InvalidFee {
            fee,
            scale: FEE_SCALE,
        });
    }
    Ok(())
}
