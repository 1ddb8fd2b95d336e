//! Command execution and result rendering

use crate::cli::{Command, CurveArgs, CurveDirection, PoolArgs};
use anyhow::{Context, Result};
use bancor_amm::{FeeModel, WeightedMath};
use bancor_config::PricingConfig;
use bancor_registry::{LedgerResolver, LedgerSnapshot, PoolQuoter, SwapQuote};
use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SwapKind {
    ExactIn,
    ExactOut,
    Spot,
}

/// Engine result for explicit curve inputs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurveResult {
    pub direction: &'static str,
    pub amount: u64,
    pub result: u64,
    pub fee: u64,
    pub fee_model: FeeModel,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Report {
    Swap { kind: SwapKind, quote: SwapQuote },
    Curve(CurveResult),
    Config(String),
}

pub fn execute(command: &Command, config: &PricingConfig) -> Result<Report> {
    match command {
        Command::AmountOut(args) => swap(SwapKind::ExactIn, args, config),
        Command::AmountIn(args) => swap(SwapKind::ExactOut, args, config),
        Command::Quote(args) => swap(SwapKind::Spot, args, config),
        Command::Curve(args) => curve(args, config.math()).map(Report::Curve),
        Command::ShowConfig => config.to_toml().map(Report::Config),
    }
}

fn swap(kind: SwapKind, args: &PoolArgs, config: &PricingConfig) -> Result<Report> {
    let path = &config.ledger.snapshot;
    let snapshot = LedgerSnapshot::from_json_file(path)
        .with_context(|| format!("Failed to load ledger snapshot {:?}", path))?;
    let resolver = LedgerResolver::new(snapshot, config.ledger.resolver_settings());
    let quoter = PoolQuoter::new(resolver, config.math());

    let quote = match kind {
        SwapKind::ExactIn => quoter.amount_out(&args.pool, &args.from, &args.to, args.amount),
        SwapKind::ExactOut => quoter.amount_in(&args.pool, &args.from, &args.to, args.amount),
        SwapKind::Spot => quoter.quote(&args.pool, &args.from, &args.to, args.amount),
    }
    .with_context(|| format!("Failed to price {} {} -> {}", args.pool, args.from, args.to))?;

    info!(
        pool = %quote.pool,
        amount_in = quote.amount_in,
        amount_out = quote.amount_out,
        fee_model = ?config.engine.fee_model,
        "swap priced"
    );
    Ok(Report::Swap { kind, quote })
}

fn curve(args: &CurveArgs, math: WeightedMath) -> Result<CurveResult> {
    let (direction, result) = match args.direction {
        CurveDirection::Out => (
            "out",
            math.get_amount_out(
                args.amount,
                args.reserve_in,
                args.weight_in,
                args.reserve_out,
                args.weight_out,
                args.fee,
            ),
        ),
        CurveDirection::In => (
            "in",
            math.get_amount_in(
                args.amount,
                args.reserve_in,
                args.weight_in,
                args.reserve_out,
                args.weight_out,
                args.fee,
            ),
        ),
        CurveDirection::Quote => (
            "quote",
            WeightedMath::quote(
                args.amount,
                args.reserve_in,
                args.weight_in,
                args.reserve_out,
                args.weight_out,
            ),
        ),
    };
    let result = result.with_context(|| format!("Curve {} failed", direction))?;

    Ok(CurveResult {
        direction,
        amount: args.amount,
        result,
        fee: args.fee,
        fee_model: math.fee_model(),
    })
}

impl Report {
    pub fn render(&self, json: bool) -> Result<String> {
        if json {
            return match self {
                Report::Swap { kind, quote } => serde_json::to_string_pretty(&SwapOutput {
                    kind: *kind,
                    quote,
                }),
                Report::Curve(result) => serde_json::to_string_pretty(result),
                Report::Config(toml) => serde_json::to_string_pretty(toml),
            }
            .context("Failed to serialize result");
        }

        Ok(match self {
            Report::Swap { kind, quote } => {
                let label = match kind {
                    SwapKind::ExactIn | SwapKind::ExactOut => "swap",
                    SwapKind::Spot => "spot",
                };
                format!(
                    "{} {}: {} {} -> {} {} (fee {} ppm)",
                    quote.pool,
                    label,
                    quote.amount_in,
                    quote.symbol_in,
                    quote.amount_out,
                    quote.symbol_out,
                    quote.fee
                )
            }
            Report::Curve(result) => result.result.to_string(),
            Report::Config(toml) => toml.clone(),
        })
    }
}

#[derive(Serialize)]
struct SwapOutput<'a> {
    kind: SwapKind,
    #[serde(flatten)]
    quote: &'a SwapQuote,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curve_args(direction: CurveDirection, amount: u64, fee: u64) -> CurveArgs {
        CurveArgs {
            direction,
            amount,
            reserve_in: 45_851_931_234,
            weight_in: 50_000,
            reserve_out: 125_682_033_533,
            weight_out: 50_000,
            fee,
        }
    }

    #[test]
    fn test_curve_directions() {
        let math = WeightedMath::default();
        let out = curve(&curve_args(CurveDirection::Out, 10_000, 2000), math).unwrap();
        assert_eq!(out.result, 27_300);
        assert_eq!(out.direction, "out");

        let spot = curve(&curve_args(CurveDirection::Quote, 10_000, 2000), math).unwrap();
        assert_eq!(spot.result, 27_410);

        let back = curve(&curve_args(CurveDirection::In, 27_300, 2000), math).unwrap();
        assert_eq!(back.result, 10_000);
    }

    #[test]
    fn test_curve_error_has_context() {
        let err = curve(&curve_args(CurveDirection::Out, 0, 0), WeightedMath::default())
            .unwrap_err();
        assert!(format!("{:#}", err).contains("insufficient input amount"));
    }

    #[test]
    fn test_render_curve() {
        let report = Report::Curve(CurveResult {
            direction: "out",
            amount: 10_000,
            result: 27_300,
            fee: 2000,
            fee_model: FeeModel::DoubleDeduction,
        });
        assert_eq!(report.render(false).unwrap(), "27300");

        let json: serde_json::Value = serde_json::from_str(&report.render(true).unwrap()).unwrap();
        assert_eq!(json["result"], 27_300);
        assert_eq!(json["fee_model"], "double_deduction");
    }
}
