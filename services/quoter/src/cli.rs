//! Command-line arguments

use anyhow::Result;
use bancor_amm::FeeModel;
use bancor_config::PricingConfig;
use bancor_registry::{PoolRef, SymbolCode};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bancor-quote", author, version, about, long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Ledger snapshot path, overrides `[ledger] snapshot`
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    /// Log filter, overrides `[logging] level`
    #[arg(long)]
    pub log_level: Option<String>,

    /// Fee policy, overrides `[engine] fee_model`
    #[arg(long, value_enum)]
    pub fee_model: Option<FeeModelArg>,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Output received for an exact input
    AmountOut(PoolArgs),
    /// Input required for an exact output
    AmountIn(PoolArgs),
    /// Fee-free spot value
    Quote(PoolArgs),
    /// Run the curve on explicit reserves, no ledger snapshot
    Curve(CurveArgs),
    /// Print the effective configuration as TOML
    ShowConfig,
}

#[derive(ClapArgs, Debug)]
pub struct PoolArgs {
    /// Pool reference: converter account or `<code>:<POOL TOKEN>`
    #[arg(long)]
    pub pool: PoolRef,

    /// Reserve symbol paid in
    #[arg(long)]
    pub from: SymbolCode,

    /// Reserve symbol paid out
    #[arg(long)]
    pub to: SymbolCode,

    /// Amount in raw units
    pub amount: u64,
}

#[derive(ClapArgs, Debug)]
pub struct CurveArgs {
    #[arg(value_enum)]
    pub direction: CurveDirection,

    #[arg(long)]
    pub amount: u64,

    #[arg(long)]
    pub reserve_in: u64,

    #[arg(long)]
    pub weight_in: u64,

    #[arg(long)]
    pub reserve_out: u64,

    #[arg(long)]
    pub weight_out: u64,

    /// Fee in ppm
    #[arg(long, default_value_t = 0)]
    pub fee: u64,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveDirection {
    Out,
    In,
    Quote,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeeModelArg {
    OnInput,
    SingleDeduction,
    DoubleDeduction,
}

impl From<FeeModelArg> for FeeModel {
    fn from(arg: FeeModelArg) -> Self {
        match arg {
            FeeModelArg::OnInput => FeeModel::OnInput,
            FeeModelArg::SingleDeduction => FeeModel::SingleDeduction,
            FeeModelArg::DoubleDeduction => FeeModel::DoubleDeduction,
        }
    }
}

impl Args {
    /// Command-line flags take precedence over file and environment
    ///
    /// Paths are expanded again afterwards, so a quoted `--snapshot '$DIR/ledger.json'`
    /// resolves the same way as one read from the file or environment.
    pub fn apply_overrides(&self, config: &mut PricingConfig) -> Result<()> {
        if let Some(snapshot) = &self.snapshot {
            config.ledger.snapshot = snapshot.clone();
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if let Some(model) = self.fee_model {
            config.engine.fee_model = model.into();
        }
        config.expand_env_vars()
    }
}
