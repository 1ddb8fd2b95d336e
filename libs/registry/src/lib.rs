//! # Bancor Registry - Reserve Resolution Adapter
//!
//! ## Purpose
//!
//! Maps a pool reference onto the engine's input tuple. Converters live in
//! two ledger layouts: legacy per-account converters whose reserve balances
//! sit in token-contract balance tables, and rows of the shared
//! multi-converter registry that carry weights and balances inline.
//!
//! ## Integration Points
//!
//! - **Input Sources**: a JSON [`LedgerSnapshot`] of the settings, reserves,
//!   converter and balance tables
//! - **Output Destinations**: [`bancor_amm::WeightedPoolState`] for the
//!   engine, [`SwapQuote`] for callers of [`PoolQuoter`]
//! - **Fee Scale**: stored fees are normalised to ppm per source ([`FeeScale`])
//!
//! ## Architecture Role
//!
//! Read-only: the snapshot is loaded once and never written back. Pool
//! references are parsed once into [`PoolRef`]; dispatch happens on the
//! variant, never on string prefixes.

pub mod error;
pub mod identifiers;
pub mod ledger;
pub mod quoter;
pub mod resolver;

pub use error::{RegistryError, Result};
pub use identifiers::{AccountName, PoolRef, SymbolCode};
pub use ledger::LedgerSnapshot;
pub use quoter::{PoolQuoter, SwapQuote};
pub use resolver::{FeeScale, LedgerResolver, Reserve, ReserveSource, ResolverSettings};
