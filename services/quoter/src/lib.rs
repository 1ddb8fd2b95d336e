//! # Bancor Quoter
//!
//! Operator CLI over the pricing engine: loads configuration, reads a ledger
//! snapshot, resolves the requested pool and prints the priced swap.
//!
//! ## Commands
//!
//! - `amount-out` / `amount-in` / `quote`: resolve `--pool` and price against it
//! - `curve`: run the engine on explicit reserves and weights
//! - `show-config`: print the effective configuration

pub mod cli;
pub mod commands;
pub mod logging;

pub use cli::{Args, Command};
pub use commands::{execute, Report};
