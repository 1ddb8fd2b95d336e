//! Pricing Engine Property Tests
//!
//! Mathematical properties that must hold for every valid pool, plus the
//! literal reference scenarios taken from live converter balances.

use bancor_amm::{get_amount_in, get_amount_out, quote, FeeModel, PricingError, WeightedMath};
use proptest::prelude::*;

const S: u128 = 1_000_000;

fn fee_model() -> impl Strategy<Value = FeeModel> {
    prop_oneof![
        Just(FeeModel::OnInput),
        Just(FeeModel::SingleDeduction),
        Just(FeeModel::DoubleDeduction),
    ]
}

/// Constant-product output with the fee model's factors, in plain u128
fn constant_product(
    model: FeeModel,
    amount_in: u64,
    reserve_in: u64,
    reserve_out: u64,
    fee: u64,
) -> u64 {
    let keep = S - fee as u128;
    let (a, ri, ro) = (amount_in as u128, reserve_in as u128, reserve_out as u128);
    let out = match model {
        FeeModel::OnInput => ro * a * keep / (ri * S + a * keep),
        FeeModel::SingleDeduction => ro * a * keep / ((ri + a) * S),
        FeeModel::DoubleDeduction => ro * a * keep * keep / ((ri + a) * S * S),
    };
    out as u64
}

#[test]
fn test_reference_scenarios() {
    assert_eq!(
        get_amount_out(
            1_000_000,
            578_125_412,
            500_000,
            2_170_087_186_740_517,
            500_000,
            2000
        )
        .unwrap(),
        3_732_206_312_408
    );
    assert_eq!(
        get_amount_out(10_000, 45_851_931_234, 50_000, 125_682_033_533, 50_000, 2000).unwrap(),
        27_300
    );
    assert_eq!(
        quote(10_000, 45_851_931_234, 50_000, 125_682_033_533, 50_000).unwrap(),
        27_410
    );
    assert_eq!(
        get_amount_out(100_000, 833_515_447, 20, 10_395_237_882, 80, 0).unwrap(),
        311_765
    );
    assert_eq!(
        WeightedMath::new(FeeModel::OnInput)
            .get_amount_out(100_000, 833_515_447, 20, 10_395_237_882, 80, 3000)
            .unwrap(),
        310_830
    );
}

#[test]
fn test_zero_inputs_rejected() {
    assert_eq!(get_amount_out(0, 10, 1, 10, 1, 0), Err(PricingError::InsufficientInputAmount));
    assert_eq!(get_amount_out(5, 0, 1, 10, 1, 0), Err(PricingError::InsufficientLiquidity));
    assert_eq!(get_amount_out(5, 10, 1, 0, 1, 0), Err(PricingError::InsufficientLiquidity));
    assert_eq!(get_amount_out(5, 10, 0, 10, 1, 0), Err(PricingError::InvalidWeight));
    assert_eq!(get_amount_out(5, 10, 1, 10, 0, 0), Err(PricingError::InvalidWeight));
    assert_eq!(get_amount_in(0, 10, 1, 10, 1, 0), Err(PricingError::InsufficientOutputAmount));
    assert_eq!(quote(0, 10, 1, 10, 1), Err(PricingError::InsufficientAmount));
}

#[test]
fn test_increasing_input_increases_output() {
    let math = WeightedMath::default();
    let mut last = 0;
    for amount_in in [1_000u64, 10_000, 100_000, 1_000_000, 10_000_000] {
        let out = math
            .get_amount_out(amount_in, 833_515_447, 20, 10_395_237_882, 80, 2000)
            .unwrap();
        assert!(out > last, "{} did not exceed {}", out, last);
        last = out;
    }
}

proptest! {
    #[test]
    fn balanced_matches_constant_product(
        model in fee_model(),
        amount_in in 1u64..10_000_000_000,
        reserve_in in 1u64..1_000_000_000_000_000,
        reserve_out in 1u64..1_000_000_000_000_000,
        weight in 1u64..1_000_000,
        fee in 0u64..100_000,
    ) {
        let out = WeightedMath::new(model)
            .get_amount_out(amount_in, reserve_in, weight, reserve_out, weight, fee)
            .unwrap();
        prop_assert_eq!(out, constant_product(model, amount_in, reserve_in, reserve_out, fee));
    }

    #[test]
    fn amount_in_never_under_delivers(
        model in fee_model(),
        reserve_in in 1u64..=u64::MAX,
        reserve_out in 2u64..=u64::MAX,
        weight_in in 1u64..1_000_000,
        weight_out in 1u64..1_000_000,
        fee in 0u64..100_000,
        target_share in 1u64..1_000,
    ) {
        let math = WeightedMath::new(model);
        let target = (reserve_out / 1_000 * target_share).clamp(1, reserve_out - 1);

        match math.get_amount_in(target, reserve_in, weight_in, reserve_out, weight_out, fee) {
            Ok(amount_in) => {
                let out = math
                    .get_amount_out(amount_in, reserve_in, weight_in, reserve_out, weight_out, fee)
                    .unwrap();
                prop_assert!(out >= target, "{} < {} for input {}", out, target, amount_in);
            }
            Err(err) => {
                // only acceptable when no u64 input reaches the target
                let max_out = math
                    .get_amount_out(u64::MAX, reserve_in, weight_in, reserve_out, weight_out, fee)
                    .unwrap();
                match err {
                    PricingError::Overflow => prop_assert!(
                        max_out < target,
                        "overflow although {} input yields {} >= {}",
                        u64::MAX,
                        max_out,
                        target
                    ),
                    PricingError::InsufficientLiquidity => prop_assert!(
                        max_out <= target,
                        "unreachable although {} input yields {} > {}",
                        u64::MAX,
                        max_out,
                        target
                    ),
                    other => prop_assert!(false, "unexpected {:?}", other),
                }
            }
        }
    }

    #[test]
    fn output_is_monotonic(
        model in fee_model(),
        amount_in in 1u64..1_000_000_000,
        extra in 1u64..1_000_000_000,
        reserve_in in 1_000u64..=u64::MAX,
        reserve_out in 1_000u64..=u64::MAX,
        weight_in in 1u64..100,
        weight_out in 1u64..100,
        fee in 0u64..50_000,
    ) {
        let math = WeightedMath::new(model);
        let small = math
            .get_amount_out(amount_in, reserve_in, weight_in, reserve_out, weight_out, fee)
            .unwrap();
        let large = math
            .get_amount_out(amount_in + extra, reserve_in, weight_in, reserve_out, weight_out, fee)
            .unwrap();
        prop_assert!(large >= small);
        prop_assert!(large < reserve_out);
    }

    #[test]
    fn quote_ignores_reserve_scale(
        amount in 1u64..1_000_000_000,
        reserve_a in 1u64..1_000_000_000,
        reserve_b in 1u64..1_000_000_000,
        weight_a in 1u64..1_000_000,
        weight_b in 1u64..1_000_000,
        k in 1u64..1_000,
    ) {
        let base = quote(amount, reserve_a, weight_a, reserve_b, weight_b);
        let scaled = quote(amount, reserve_a * k, weight_a, reserve_b * k, weight_b);
        prop_assert_eq!(base, scaled);
    }

    #[test]
    fn quote_is_linear_in_amount(
        amount in 1u64..1_000_000_000,
        reserve_a in 1u64..1_000_000_000,
        reserve_b in 1u64..1_000_000_000,
        weight_a in 1u64..1_000_000,
        weight_b in 1u64..1_000_000,
        k in 1u64..1_000,
    ) {
        let base = quote(amount, reserve_a, weight_a, reserve_b, weight_b);
        prop_assume!(base.is_ok());
        let base = base.unwrap() as u128;
        match quote(amount * k, reserve_a, weight_a, reserve_b, weight_b) {
            Ok(scaled) => {
                let scaled = scaled as u128;
                let k = k as u128;
                prop_assert!(scaled >= k * base);
                prop_assert!(scaled < k * (base + 1));
            }
            Err(err) => prop_assert_eq!(err, PricingError::Overflow),
        }
    }
}
