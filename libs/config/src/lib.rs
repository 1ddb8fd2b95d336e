//! # Bancor Quoter Configuration
//!
//! Configuration loading and defaults for the pricing services.
//!
//! ## Features
//!
//! - **Engine**: fee-application policy ([`bancor_amm::FeeModel`])
//! - **Ledger**: snapshot location and the fee scale of each converter layout
//! - **Logging**: `tracing` filter and output format
//!
//! ## Usage
//!
//! ```no_run
//! use bancor_config::load_config;
//!
//! let config = load_config(None)?;
//! let math = config.math();
//! let settings = config.ledger.resolver_settings();
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod defaults;
pub mod pricing_config;

pub use pricing_config::{load_config, EngineConfig, LedgerConfig, LoggingConfig, PricingConfig};
