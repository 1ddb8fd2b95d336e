//! Bancor weighted bonding-curve math
//!
//! Invariant: `reserve_in^weight_in * reserve_out^weight_out = k`.
//!
//! Balanced pools (`weight_in == weight_out`) collapse to the constant-product
//! curve and are priced with exact 256-bit integer arithmetic. Unbalanced pools
//! go through the deterministic fixed-point power in [`crate::fixed_point`].
//! All results are floored; required inputs are rounded up.

use crate::error::{PricingError, Result};
use crate::fee::{validate_fee, FeeModel};
use crate::fixed_point;
use ethnum::U256;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Weighted pool math under one fee policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WeightedMath {
    fee_model: FeeModel,
}

impl WeightedMath {
    pub fn new(fee_model: FeeModel) -> Self {
        Self { fee_model }
    }

    pub fn fee_model(&self) -> FeeModel {
        self.fee_model
    }

    /// Maximum output for `amount_in`, net of fee
    ///
    /// # Arguments
    /// * `amount_in` - Input amount (smallest token unit)
    /// * `reserve_in` / `reserve_out` - Current pool balances
    /// * `weight_in` / `weight_out` - Relative reserve weights
    /// * `fee` - Trading fee in ppm
    pub fn get_amount_out(
        &self,
        amount_in: u64,
        reserve_in: u64,
        weight_in: u64,
        reserve_out: u64,
        weight_out: u64,
        fee: u64,
    ) -> Result<u64> {
        if amount_in == 0 {
            return Err(PricingError::InsufficientInputAmount);
        }
        if reserve_in == 0 || reserve_out == 0 {
            return Err(PricingError::InsufficientLiquidity);
        }
        if weight_in == 0 || weight_out == 0 {
            return Err(PricingError::InvalidWeight);
        }
        validate_fee(fee)?;

        if weight_in == weight_out {
            self.balanced_amount_out(amount_in, reserve_in, reserve_out, fee)
        } else {
            self.weighted_amount_out(amount_in, reserve_in, weight_in, reserve_out, weight_out, fee)
        }
    }

    /// Minimum input that yields at least `amount_out`
    ///
    /// Rounds up: the caller may be asked for one extra base unit, never one
    /// too few, so `get_amount_out(get_amount_in(y)) >= y` always holds.
    pub fn get_amount_in(
        &self,
        amount_out: u64,
        reserve_in: u64,
        weight_in: u64,
        reserve_out: u64,
        weight_out: u64,
        fee: u64,
    ) -> Result<u64> {
        if amount_out == 0 {
            return Err(PricingError::InsufficientOutputAmount);
        }
        if reserve_in == 0 || reserve_out == 0 || amount_out >= reserve_out {
            return Err(PricingError::InsufficientLiquidity);
        }
        if weight_in == 0 || weight_out == 0 {
            return Err(PricingError::InvalidWeight);
        }
        validate_fee(fee)?;

        if weight_in == weight_out {
            self.balanced_amount_in(amount_out, reserve_in, reserve_out, fee)
        } else {
            self.weighted_amount_in(amount_out, reserve_in, weight_in, reserve_out, weight_out, fee)
        }
    }

    /// Fee-free weight-adjusted spot conversion of `amount_a` into asset B
    ///
    /// `amount_a * (reserve_b / weight_b) / (reserve_a / weight_a)`, evaluated as a
    /// single rational in 256 bits so nothing truncates before the final division.
    pub fn quote(
        amount_a: u64,
        reserve_a: u64,
        weight_a: u64,
        reserve_b: u64,
        weight_b: u64,
    ) -> Result<u64> {
        if amount_a == 0 {
            return Err(PricingError::InsufficientAmount);
        }
        if reserve_a == 0 || reserve_b == 0 {
            return Err(PricingError::InsufficientLiquidity);
        }
        if weight_a == 0 || weight_b == 0 {
            return Err(PricingError::InvalidWeight);
        }

        let numerator = U256::from(amount_a) * U256::from(reserve_b) * U256::from(weight_a);
        let denominator = U256::from(reserve_a) * U256::from(weight_b);
        narrow(numerator / denominator)
    }

    fn balanced_amount_out(
        &self,
        amount_in: u64,
        reserve_in: u64,
        reserve_out: u64,
        fee: u64,
    ) -> Result<u64> {
        let f = self.fee_model.curve_factors(fee);

        // reserve_out * amount_in * n / (reserve_in * d + amount_in * m)
        let numerator = U256::from(reserve_out) * U256::from(amount_in) * U256::from(f.n);
        let denominator =
            U256::from(reserve_in) * U256::from(f.d) + U256::from(amount_in) * U256::from(f.m);

        narrow(numerator / denominator)
    }

    fn balanced_amount_in(
        &self,
        amount_out: u64,
        reserve_in: u64,
        reserve_out: u64,
        fee: u64,
    ) -> Result<u64> {
        let f = self.fee_model.curve_factors(fee);

        // amount_in * (reserve_out * n - amount_out * m) >= amount_out * reserve_in * d
        let reachable = U256::from(reserve_out) * U256::from(f.n);
        let claimed = U256::from(amount_out) * U256::from(f.m);
        if reachable <= claimed {
            return Err(PricingError::InsufficientLiquidity);
        }

        let numerator = U256::from(amount_out) * U256::from(reserve_in) * U256::from(f.d);
        let amount_in = numerator / (reachable - claimed) + U256::ONE;
        narrow(amount_in)
    }

    fn weighted_amount_out(
        &self,
        amount_in: u64,
        reserve_in: u64,
        weight_in: u64,
        reserve_out: u64,
        weight_out: u64,
        fee: u64,
    ) -> Result<u64> {
        let input = self.fee_model.input_factor(fee);
        let output = self.fee_model.output_factor(fee);

        // share = reserve_in / (reserve_in + amount_in * in_n / in_d)
        let share_num = u128::from(reserve_in) * input.denominator;
        let share_den = share_num + u128::from(amount_in) * input.numerator;

        let ln_share = fixed_point::ln_ratio(share_num, share_den).ok_or(PricingError::Overflow)?;
        let exponent = Decimal::from(weight_in)
            .checked_mul(ln_share)
            .and_then(|v| v.checked_div(Decimal::from(weight_out)))
            .ok_or(PricingError::Overflow)?;
        let retained = fixed_point::exp(exponent).ok_or(PricingError::Overflow)?;

        // gross <= reserve_out, so it always fits back into u64
        let gross = Decimal::from(reserve_out)
            .checked_mul(Decimal::ONE - retained)
            .and_then(|v| v.floor().to_u64())
            .ok_or(PricingError::Overflow)?;

        // floor(gross * out_n / out_d) in 256 bits, as on the balanced path
        let net = U256::from(gross) * U256::from(output.numerator) / U256::from(output.denominator);
        let amount_out = narrow(net)?;
        // 1 - share^r < 1 for any finite input, so the pool is never emptied
        Ok(amount_out.min(reserve_out - 1))
    }

    fn weighted_amount_in(
        &self,
        amount_out: u64,
        reserve_in: u64,
        weight_in: u64,
        reserve_out: u64,
        weight_out: u64,
        fee: u64,
    ) -> Result<u64> {
        let input = self.fee_model.input_factor(fee);
        let output = self.fee_model.output_factor(fee);

        // Gross curve output needed: amount_out * out_d / out_n.
        // reserve_out / (reserve_out - gross)
        //     = reserve_out * out_n / (reserve_out * out_n - amount_out * out_d)
        let reachable = u128::from(reserve_out) * output.numerator;
        let claimed = u128::from(amount_out) * output.denominator;
        if reachable <= claimed {
            return Err(PricingError::InsufficientLiquidity);
        }

        let ln_growth =
            fixed_point::ln_ratio(reachable, reachable - claimed).ok_or(PricingError::Overflow)?;
        let exponent = Decimal::from(weight_out)
            .checked_mul(ln_growth)
            .and_then(|v| v.checked_div(Decimal::from(weight_in)))
            .ok_or(PricingError::Overflow)?;

        // effective input = reserve_in * (growth - 1), then undo the input fee.
        // Anything past u64 starts the search at u64::MAX, which then decides
        // between a boundary answer and Overflow.
        let candidate = fixed_point::exp(exponent)
            .map(|growth| (growth - Decimal::ONE).max(Decimal::ZERO))
            .and_then(|excess| Decimal::from(reserve_in).checked_mul(excess))
            .and_then(|effective| scale_by(effective, input.denominator, input.numerator))
            .and_then(|gross_in| gross_in.floor().to_u64())
            .map_or(u64::MAX, |v| v.saturating_add(1));

        self.refine_amount_in(
            candidate, amount_out, reserve_in, weight_in, reserve_out, weight_out, fee,
        )
    }

    /// Walk `candidate` upward until the forward evaluation delivers `target`
    ///
    /// The closed form is normally already sufficient; this only absorbs the
    /// last-unit disagreement between the inverse and forward fixed-point paths.
    #[allow(clippy::too_many_arguments)]
    fn refine_amount_in(
        &self,
        candidate: u64,
        target: u64,
        reserve_in: u64,
        weight_in: u64,
        reserve_out: u64,
        weight_out: u64,
        fee: u64,
    ) -> Result<u64> {
        let delivers = |amount_in: u64| -> Result<bool> {
            let out = self.weighted_amount_out(
                amount_in, reserve_in, weight_in, reserve_out, weight_out, fee,
            )?;
            Ok(out >= target)
        };

        if delivers(candidate)? {
            return Ok(candidate);
        }

        // gallop upward; saturation bounds this to 65 rounds
        let mut short = candidate;
        let mut step: u64 = 1;
        let mut enough = loop {
            if short == u64::MAX {
                // even the largest representable input falls short
                return Err(PricingError::Overflow);
            }
            let next = short.saturating_add(step);
            if delivers(next)? {
                break next;
            }
            short = next;
            step = step.saturating_mul(2);
        };

        // short never delivers, enough always does
        while enough - short > 1 {
            let mid = short + (enough - short) / 2;
            if delivers(mid)? {
                enough = mid;
            } else {
                short = mid;
            }
        }

        Ok(enough)
    }
}

/// `value * numerator / denominator`, dividing first so large values keep headroom
fn scale_by(value: Decimal, numerator: u128, denominator: u128) -> Option<Decimal> {
    if numerator == denominator {
        return Some(value);
    }
    let numerator = Decimal::try_from_i128_with_scale(i128::try_from(numerator).ok()?, 0).ok()?;
    let denominator =
        Decimal::try_from_i128_with_scale(i128::try_from(denominator).ok()?, 0).ok()?;
    value.checked_mul(numerator.checked_div(denominator)?)
}

fn narrow(value: U256) -> Result<u64> {
    if value > U256::from(u64::MAX) {
        return Err(PricingError::Overflow);
    }
    Ok(value.as_u64())
}
