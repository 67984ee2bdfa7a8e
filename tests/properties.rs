//! Property tests for the tax, wage and severance calculations.
//!
//! Amounts are generated as whole cents so every case is an exact decimal.

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use wage_engine::calculation::{
    compute_severance, compute_tax, gross_from_net, net_from_gross, project_to_retirement,
    search_gross_from_net, DEFAULT_PRECISION,
};
use wage_engine::config::{ConfigLoader, LegalParameters};
use wage_engine::models::WageOptions;

fn params() -> LegalParameters {
    ConfigLoader::load("./config/cl")
        .expect("Failed to load config")
        .latest()
        .clone()
}

fn net(gross: Decimal, params: &LegalParameters) -> Decimal {
    net_from_gross(gross, params, &WageOptions::default())
        .unwrap()
        .net_pay
}

prop_compose! {
    fn arb_amount(min_pesos: i64, max_pesos: i64)(cents in (min_pesos * 100)..(max_pesos * 100)) -> Decimal {
        Decimal::new(cents, 2)
    }
}

prop_compose! {
    fn arb_years(max_years: i64)(hundredths in 0..(max_years * 100)) -> Decimal {
        Decimal::new(hundredths, 2)
    }
}

proptest! {
    #[test]
    fn tax_is_never_negative(base in arb_amount(-1_000_000, 100_000_000)) {
        let params = params();
        prop_assert!(compute_tax(base, &params.tax_brackets) >= Decimal::ZERO);
    }

    #[test]
    fn tax_is_continuous(base in arb_amount(0, 40_000_000)) {
        let params = params();
        let here = compute_tax(base, &params.tax_brackets);
        let next = compute_tax(base + dec!(0.01), &params.tax_brackets);
        // One cent at the top marginal rate moves the tax by at most 0.004
        prop_assert!((next - here).abs() <= dec!(0.01), "jump at {}: {} -> {}", base, here, next);
    }

    #[test]
    fn tax_is_monotonic(base in arb_amount(0, 40_000_000), delta in arb_amount(0, 5_000_000)) {
        let params = params();
        prop_assert!(
            compute_tax(base, &params.tax_brackets) <= compute_tax(base + delta, &params.tax_brackets)
        );
    }

    #[test]
    fn net_pay_is_monotonic(gross in arb_amount(300_000, 50_000_000), delta in arb_amount(0, 2_000_000)) {
        let params = params();
        prop_assert!(net(gross, &params) <= net(gross + delta, &params));
    }

    #[test]
    fn net_pay_never_exceeds_gross_pay(gross in arb_amount(0, 50_000_000)) {
        let params = params();
        let result = net_from_gross(gross, &params, &WageOptions::default()).unwrap();
        prop_assert!(result.net_pay <= result.total_gross_pay);
        prop_assert_eq!(result.total_gross_pay - result.total_deductions, result.net_pay);
    }

    #[test]
    fn non_positive_target_needs_no_wage(target in arb_amount(-1_000_000, 1)) {
        let target = target.min(Decimal::ZERO);
        let gross = gross_from_net(target, DEFAULT_PRECISION, &params(), &WageOptions::default()).unwrap();
        prop_assert_eq!(gross, Decimal::ZERO);
    }

    #[test]
    fn severance_requires_four_years(gross in arb_amount(0, 10_000_000), years in arb_years(4)) {
        let result = compute_severance(gross, years, false, &params()).unwrap();
        prop_assert!(!result.eligible);
        prop_assert_eq!(result.gross_severance, Decimal::ZERO);
    }

    #[test]
    fn severance_is_bounded(gross in arb_amount(0, 10_000_000), years in arb_years(60)) {
        let result = compute_severance(gross, years, false, &params()).unwrap();
        prop_assert!(result.gross_severance >= Decimal::ZERO);
        prop_assert!(result.net_severance <= result.gross_severance);
        prop_assert!(result.years_counted <= dec!(16));
        prop_assert!(result.gross_severance <= gross * years);
    }

    #[test]
    fn projection_never_lowers_severance(
        gross in arb_amount(0, 10_000_000),
        years in arb_years(40),
        age in arb_years(80),
    ) {
        let result = project_to_retirement(gross, years, age, false, &params()).unwrap();
        prop_assert!(result.gross_delta >= Decimal::ZERO);
        prop_assert_eq!(result.applicable, result.projected.is_some());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn gross_search_round_trips(target in arb_amount(300_000, 20_000_000)) {
        let params = params();
        let result = search_gross_from_net(target, DEFAULT_PRECISION, &params, &WageOptions::default()).unwrap();
        prop_assert!(
            (result.achieved.net_pay - target).abs() <= DEFAULT_PRECISION,
            "target {} achieved {} at gross {}",
            target,
            result.achieved.net_pay,
            result.gross_base_wage
        );
    }
}
