//! Error taxonomy for the pricing engine
//!
//! Every precondition violation maps to exactly one variant so callers can
//! tell an empty pool apart from a zero trade or a bad weight.

use thiserror::Error;

/// Errors returned by the weighted pricing operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PricingError {
    #[error("insufficient input amount")]
    InsufficientInputAmount,

    #[error("insufficient output amount")]
    InsufficientOutputAmount,

    /// Zero amount passed to the fee-free quote
    #[error("insufficient amount")]
    InsufficientAmount,

    #[error("insufficient liquidity")]
    InsufficientLiquidity,

    #[error("invalid reserve weight")]
    InvalidWeight,

    #[error("fee {fee} is outside [0, {scale})")]
    InvalidFee { fee: u64, scale: u64 },

    /// Result or fixed-point intermediate does not fit its target width
    #[error("arithmetic overflow")]
    Overflow,

    /// No deterministic answer could be produced within the fixed refinement budget
    #[error("unimplemented: {reason}")]
    Unimplemented { reason: &'static str },
}

pub type Result<T> = std::result::Result<T, PricingError>;
