//! Error types for reserve resolution

use crate::identifiers::{AccountName, PoolRef, SymbolCode};
use crate::resolver::FeeScale;
use bancor_amm::PricingError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while mapping a pool reference onto engine inputs
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("invalid account name '{input}': {reason}")]
    InvalidAccountName { input: String, reason: &'static str },

    #[error("invalid symbol code '{input}': {reason}")]
    InvalidSymbolCode { input: String, reason: &'static str },

    #[error("unknown converter account {0}")]
    UnknownConverter(AccountName),

    #[error("unknown multi-converter currency {0}")]
    UnknownCurrency(SymbolCode),

    #[error("converter {0} has no settings row")]
    MissingSettings(AccountName),

    #[error("pool {pool} has no reserve {symbol}")]
    UnknownReserve { pool: PoolRef, symbol: SymbolCode },

    #[error("pool {pool} has no weight for reserve {symbol}")]
    MissingWeight { pool: PoolRef, symbol: SymbolCode },

    #[error("no {symbol} balance on {contract} for {owner}")]
    MissingBalance {
        contract: AccountName,
        owner: AccountName,
        symbol: SymbolCode,
    },

    #[error("conversions are disabled on {0}")]
    ConversionsDisabled(PoolRef),

    #[error("reserve {symbol} is disabled on {pool}")]
    ReserveDisabled { pool: PoolRef, symbol: SymbolCode },

    #[error("cannot convert {0} into itself")]
    SameReserve(SymbolCode),

    #[error("pool {pool} fee {fee} ppm is outside [0, {scale})")]
    FeeOutOfRange { pool: PoolRef, fee: u64, scale: u64 },

    #[error("pool {pool} stored fee {stored} overflows converting from {scale:?} to ppm")]
    FeeScaleOverflow {
        pool: PoolRef,
        stored: u64,
        scale: FeeScale,
    },

    #[error("failed to read ledger snapshot {path}: {source}")]
    SnapshotIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed ledger snapshot: {0}")]
    SnapshotFormat(#[from] serde_json::Error),

    #[error(transparent)]
    Pricing(#[from] PricingError),
}

pub type Result<T> = std::result::Result<T, RegistryError>;
