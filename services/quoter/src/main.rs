//! `bancor-quote` entry point

use anyhow::Result;
use bancor_config::load_config;
use bancor_quoter::{execute, logging, Args};
use clap::Parser;
use tracing::debug;

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = load_config(args.config.as_deref())?;
    args.apply_overrides(&mut config)?;
    logging::init_tracing(&config.logging)?;

    debug!("Version: {}", env!("CARGO_PKG_VERSION"));
    debug!("Configuration loaded: {:?}", config);

    let report = execute(&args.command, &config)?;
    println!("{}", report.render(args.json)?);
    Ok(())
}
