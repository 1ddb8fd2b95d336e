//! Deterministic fixed-point logarithm and exponential
//!
//! Weighted pools need `share^(w_in / w_out)` for arbitrary weights. Hardware
//! `f64::powf` is not guaranteed to round identically across targets, so the
//! power is evaluated as `exp(r * ln(share))` on `Decimal` with fixed range
//! reductions and a fixed number of series terms. Same inputs, same bits.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// ln(2) rounded to 28 decimal places
pub const LN_2: Decimal = dec!(0.6931471805599453094172321215);

/// Below this exponent `exp` is smaller than the Decimal resolution
const EXP_UNDERFLOW: Decimal = dec!(-70);

/// Above this exponent `exp` no longer fits a Decimal
const EXP_OVERFLOW: Decimal = dec!(66);

/// Width the ln operands are normalised to; the sum of two fits the 96-bit mantissa
const MANTISSA_BITS: u32 = 94;

/// Terms evaluated by both series; enough for |z| <= 1/3 and |t| < ln 2
const SERIES_TERMS: u32 = 32;

/// Natural log of `numerator / denominator`
///
/// Both operands are scaled to a common 94-bit mantissa, leaving a ratio in
/// (1/2, 2) times a power of two. The mantissa ratio goes through
/// `ln(m) = 2 * atanh((m - 1) / (m + 1))`, the power of two through `LN_2`.
///
/// Returns `None` when either operand is zero.
pub fn ln_ratio(numerator: u128, denominator: u128) -> Option<Decimal> {
    if numerator == 0 || denominator == 0 {
        return None;
    }

    let (m_num, bits_num) = normalize(numerator);
    let (m_den, bits_den) = normalize(denominator);

    let diff = Decimal::try_from_i128_with_scale(m_num - m_den, 0).ok()?;
    let sum = Decimal::try_from_i128_with_scale(m_num + m_den, 0).ok()?;
    let z = diff.checked_div(sum)?;

    let z2 = z * z;
    let mut term = z;
    let mut series = Decimal::ZERO;
    for k in 0..SERIES_TERMS {
        series += term / Decimal::from(2 * k + 1);
        term *= z2;
    }

    let binary_exponent = Decimal::from(i64::from(bits_num) - i64::from(bits_den));
    Some(series * Decimal::TWO + LN_2 * binary_exponent)
}

/// e^x
///
/// `x = k * ln 2 + t` with `t` in [0, ln 2); `e^t` by Taylor series, then
/// scaled by `2^k` one exact doubling/halving at a time.
///
/// Returns `None` when the result does not fit a Decimal.
pub fn exp(x: Decimal) -> Option<Decimal> {
    if x < EXP_UNDERFLOW {
        return Some(Decimal::ZERO);
    }
    if x > EXP_OVERFLOW {
        return None;
    }

    let k = (x / LN_2).floor().to_i64()?;
    let t = x - LN_2 * Decimal::from(k);

    let mut term = Decimal::ONE;
    let mut sum = Decimal::ONE;
    for n in 1..=SERIES_TERMS {
        term = term * t / Decimal::from(n);
        sum += term;
    }

    if k >= 0 {
        for _ in 0..k {
            sum = sum.checked_mul(Decimal::TWO)?;
        }
    } else {
        for _ in 0..k.unsigned_abs() {
            sum /= Decimal::TWO;
        }
    }

    Some(sum)
}

fn normalize(value: u128) -> (i128, u32) {
    let bits = u128::BITS - value.leading_zeros();
    let mantissa = if bits > MANTISSA_BITS {
        value >> (bits - MANTISSA_BITS)
    } else {
        value << (MANTISSA_BITS - bits)
    };
    // < 2^94, so the cast is lossless
    (mantissa as i128, bits)
}
