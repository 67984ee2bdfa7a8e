//! Severance pay calculation.
//!
//! This module computes the years-of-service indemnity owed on dismissal,
//! using tenure tiers that set both a monthly wage cap and a maximum number
//! of countable years.
//!
//! ## Tiers (default parameters)
//!
//! | Years of service | Tier | Wage cap | Max years |
//! |------------------|------|----------|-----------|
//! | < 4              | -    | not eligible | -     |
//! | [4, 20)          | A    | 90 UF    | 11        |
//! | [20, 25)         | B    | 90 UF    | 16        |
//! | ≥ 25             | C    | none with a non-compete clause, otherwise 90 UF | uncapped with a non-compete clause, otherwise 16 |
//!
//! `gross_severance = capped_wage * years_counted`, and the net amount
//! deducts the employer unemployment insurance rate once.

use rust_decimal::Decimal;

use crate::config::{LegalParameters, SeveranceParameters};
use crate::error::EngineResult;
use crate::models::{AuditTrace, SeveranceResult, SeveranceTier};

use super::limits::{check_bounded, MAX_AMOUNT, MAX_YEARS_OF_SERVICE};

/// Legal reference recorded on severance audit steps.
pub const SEVERANCE_LEGAL_REF: &str = "Código del Trabajo art. 163";

/// Returns the tier for `years_of_service`, or `None` if not eligible.
///
/// # Examples
///
/// ```
/// use wage_engine::calculation::severance_tier;
/// use wage_engine::config::SeveranceParameters;
/// use wage_engine::models::SeveranceTier;
/// use rust_decimal::Decimal;
///
/// let params = SeveranceParameters::default();
/// assert_eq!(severance_tier(Decimal::new(39, 1), &params), None);
/// assert_eq!(severance_tier(Decimal::from(4), &params), Some(SeveranceTier::A));
/// assert_eq!(severance_tier(Decimal::from(20), &params), Some(SeveranceTier::B));
/// assert_eq!(severance_tier(Decimal::from(25), &params), Some(SeveranceTier::C));
/// ```
pub fn severance_tier(
    years_of_service: Decimal,
    params: &SeveranceParameters,
) -> Option<SeveranceTier> {
    if years_of_service < params.minimum_years {
        None
    } else if years_of_service < params.tier_b_from_years {
        Some(SeveranceTier::A)
    } else if years_of_service < params.tier_c_from_years {
        Some(SeveranceTier::B)
    } else {
        Some(SeveranceTier::C)
    }
}

/// Computes severance pay from the gross base wage and tenure.
///
/// # Arguments
///
/// * `gross_base_wage` - Monthly gross base wage
/// * `years_of_service` - Fractional years of service
/// * `has_non_compete_clause` - Lifts the cap in tier C
/// * `params` - The legal parameter set in force
///
/// # Errors
///
/// Returns [`EngineError::InvalidArgument`](crate::error::EngineError::InvalidArgument)
/// if the wage is negative or above [`MAX_AMOUNT`], or the years of service
/// are negative or above [`MAX_YEARS_OF_SERVICE`].
///
/// # Examples
///
/// ```
/// use wage_engine::calculation::compute_severance;
/// use wage_engine::config::ConfigLoader;
/// use wage_engine::models::SeveranceTier;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("config/cl").unwrap();
///
/// let result = compute_severance(Decimal::from(1_000_000), Decimal::from(10), true, loader.latest()).unwrap();
///
/// assert!(result.eligible);
/// assert_eq!(result.tier, Some(SeveranceTier::A));
/// assert_eq!(result.years_counted, Decimal::from(10));
/// assert_eq!(result.gross_severance, Decimal::from(10_000_000));
/// ```
pub fn compute_severance(
    gross_base_wage: Decimal,
    years_of_service: Decimal,
    has_non_compete_clause: bool,
    params: &LegalParameters,
) -> EngineResult<SeveranceResult> {
    validate_severance_inputs(gross_base_wage, years_of_service)?;
    Ok(severance_for(
        gross_base_wage,
        years_of_service,
        has_non_compete_clause,
        params,
    ))
}

pub(crate) fn validate_severance_inputs(
    gross_base_wage: Decimal,
    years_of_service: Decimal,
) -> EngineResult<()> {
    check_bounded("gross_base_wage", gross_base_wage, MAX_AMOUNT)?;
    check_bounded("years_of_service", years_of_service, MAX_YEARS_OF_SERVICE)
}

/// Computes severance on validated inputs.
///
/// Tenure may exceed [`MAX_YEARS_OF_SERVICE`] here when a projection adds
/// years to an already validated tenure.
pub(crate) fn severance_for(
    gross_base_wage: Decimal,
    years_of_service: Decimal,
    has_non_compete_clause: bool,
    params: &LegalParameters,
) -> SeveranceResult {
    let mut audit_trace = AuditTrace::default();
    let severance = &params.severance;

    let Some(tier) = severance_tier(years_of_service, severance) else {
        audit_trace.record(
            "severance_eligibility",
            "Severance Eligibility",
            SEVERANCE_LEGAL_REF,
            serde_json::json!({
                "years_of_service": years_of_service.to_string(),
                "minimum_years": severance.minimum_years.to_string()
            }),
            serde_json::json!({ "eligible": false }),
            format!(
                "{} years of service is below the {} year minimum; no severance is owed",
                years_of_service.normalize(),
                severance.minimum_years.normalize()
            ),
        );
        return SeveranceResult {
            eligible: false,
            tier: None,
            years_of_service,
            wage_cap: None,
            capped_base_wage: Decimal::ZERO,
            years_counted: Decimal::ZERO,
            gross_severance: Decimal::ZERO,
            net_severance: Decimal::ZERO,
            audit_trace,
        };
    };

    let capped_cap = Some(params.severance_wage_cap());
    let (wage_cap, max_years) = match tier {
        SeveranceTier::A => (capped_cap, Some(severance.tier_a_max_years)),
        SeveranceTier::B => (capped_cap, Some(severance.tier_b_max_years)),
        SeveranceTier::C if has_non_compete_clause => (None, None),
        SeveranceTier::C => (capped_cap, Some(severance.tier_b_max_years)),
    };

    let capped_base_wage = wage_cap.map_or(gross_base_wage, |cap| gross_base_wage.min(cap));
    let years_counted = max_years.map_or(years_of_service, |max| years_of_service.min(max));

    audit_trace.record(
        "severance_tier",
        "Severance Tier",
        SEVERANCE_LEGAL_REF,
        serde_json::json!({
            "years_of_service": years_of_service.to_string(),
            "has_non_compete_clause": has_non_compete_clause
        }),
        serde_json::json!({
            "tier": tier,
            "wage_cap": wage_cap.map(|c| c.to_string()),
            "max_years": max_years.map(|m| m.to_string())
        }),
        match (wage_cap, max_years) {
            (Some(cap), Some(max)) => format!(
                "{} years of service is tier {:?}: wage capped at {} UF (${}), at most {} years counted",
                years_of_service.normalize(),
                tier,
                severance.wage_cap_uf.normalize(),
                cap.round_dp(2).normalize(),
                max.normalize()
            ),
            _ => format!(
                "{} years of service is tier {:?} with a non-compete clause: no wage cap, all years counted",
                years_of_service.normalize(),
                tier
            ),
        },
    );

    let gross_severance = capped_base_wage * years_counted;
    let employer_rate = params.unemployment_insurance.employer_rate;
    let net_severance = gross_severance * (Decimal::ONE - employer_rate);

    audit_trace.record(
        "severance_amount",
        "Severance Amount",
        SEVERANCE_LEGAL_REF,
        serde_json::json!({
            "capped_base_wage": capped_base_wage.to_string(),
            "years_counted": years_counted.to_string(),
            "employer_rate": employer_rate.normalize().to_string()
        }),
        serde_json::json!({
            "gross_severance": gross_severance.to_string(),
            "net_severance": net_severance.to_string()
        }),
        format!(
            "${} x {} years = ${} gross; less {}% unemployment insurance = ${} net",
            capped_base_wage.round_dp(2).normalize(),
            years_counted.normalize(),
            gross_severance.round_dp(2).normalize(),
            (employer_rate * Decimal::ONE_HUNDRED).normalize(),
            net_severance.round_dp(2).normalize()
        ),
    );

    SeveranceResult {
        eligible: true,
        tier: Some(tier),
        years_of_service,
        wage_cap,
        capped_base_wage,
        years_counted,
        gross_severance,
        net_severance,
        audit_trace,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::config::fixtures::august_2025;
    use rust_decimal_macros::dec;

    fn severance(gross: Decimal, years: Decimal, non_compete: bool) -> SeveranceResult {
        compute_severance(gross, years, non_compete, &august_2025()).unwrap()
    }

    fn cap() -> Decimal {
        dec!(90) * dec!(39179.01)
    }

    #[test]
    fn test_under_four_years_not_eligible() {
        let result = severance(dec!(1000000), dec!(3.9), false);

        assert!(!result.eligible);
        assert_eq!(result.tier, None);
        assert_eq!(result.gross_severance, Decimal::ZERO);
        assert_eq!(result.net_severance, Decimal::ZERO);
        assert_eq!(result.audit_trace.steps.len(), 1);
    }

    #[test]
    fn test_exactly_four_years_is_tier_a() {
        let result = severance(dec!(1000000), dec!(4), false);
        assert!(result.eligible);
        assert_eq!(result.tier, Some(SeveranceTier::A));
        assert_eq!(result.gross_severance, dec!(4000000));
    }

    #[test]
    fn test_tier_a_scenario() {
        let result = severance(dec!(1000000), dec!(10), true);

        assert_eq!(result.tier, Some(SeveranceTier::A));
        assert_eq!(result.wage_cap, Some(cap()));
        assert_eq!(result.capped_base_wage, dec!(1000000));
        assert_eq!(result.years_counted, dec!(10));
        assert_eq!(result.gross_severance, dec!(10000000));
        // 10,000,000 * (1 - 0.024)
        assert_eq!(result.net_severance, dec!(9760000));
    }

    #[test]
    fn test_tier_a_caps_years_at_eleven() {
        let result = severance(dec!(1000000), dec!(15), false);
        assert_eq!(result.tier, Some(SeveranceTier::A));
        assert_eq!(result.years_counted, dec!(11));
    }

    #[test]
    fn test_tier_a_caps_wage_at_90_uf() {
        let result = severance(dec!(5000000), dec!(10), false);
        assert_eq!(result.capped_base_wage, cap());
        assert_eq!(result.gross_severance, cap() * dec!(10));
    }

    #[test]
    fn test_fractional_years_counted_as_given() {
        let result = severance(dec!(1000000), dec!(7.5), false);
        assert_eq!(result.years_counted, dec!(7.5));
        assert_eq!(result.gross_severance, dec!(7500000));
    }

    #[test]
    fn test_tier_b_caps_years_at_sixteen() {
        let result = severance(dec!(2000000), dec!(22), false);
        assert_eq!(result.tier, Some(SeveranceTier::B));
        assert_eq!(result.years_counted, dec!(16));
        assert_eq!(result.gross_severance, dec!(32000000));
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(severance(dec!(1), dec!(19.99), false).tier, Some(SeveranceTier::A));
        assert_eq!(severance(dec!(1), dec!(20), false).tier, Some(SeveranceTier::B));
        assert_eq!(severance(dec!(1), dec!(24.99), false).tier, Some(SeveranceTier::B));
        assert_eq!(severance(dec!(1), dec!(25), false).tier, Some(SeveranceTier::C));
    }

    #[test]
    fn test_tier_c_with_non_compete_is_uncapped() {
        let result = severance(dec!(5000000), dec!(30), true);

        assert_eq!(result.tier, Some(SeveranceTier::C));
        assert_eq!(result.wage_cap, None);
        assert_eq!(result.capped_base_wage, dec!(5000000));
        assert_eq!(result.years_counted, dec!(30));
        assert_eq!(result.gross_severance, dec!(150000000));
    }

    #[test]
    fn test_tier_c_without_non_compete_is_capped_like_tier_b() {
        let result = severance(dec!(5000000), dec!(30), false);

        assert_eq!(result.tier, Some(SeveranceTier::C));
        assert_eq!(result.capped_base_wage, cap());
        assert_eq!(result.years_counted, dec!(16));
    }

    #[test]
    fn test_negative_years_rejected() {
        let result = compute_severance(dec!(1000000), dec!(-1), false, &august_2025());
        match result {
            Err(EngineError::InvalidArgument { field, .. }) => assert_eq!(field, "years_of_service"),
            other => panic!("Expected InvalidArgument, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_wage_rejected() {
        let result = compute_severance(dec!(-1), dec!(10), false, &august_2025());
        match result {
            Err(EngineError::InvalidArgument { field, .. }) => assert_eq!(field, "gross_base_wage"),
            other => panic!("Expected InvalidArgument, got {:?}", other),
        }
    }

    #[test]
    fn test_audit_trace_records_tier_and_amount() {
        let result = severance(dec!(1000000), dec!(10), false);
        let tier_step = result.audit_trace.step("severance_tier").unwrap();
        assert_eq!(tier_step.output["tier"], serde_json::json!("A"));
        assert!(result.audit_trace.step("severance_amount").is_some());
    }

    #[test]
    fn test_tenure_beyond_limit_rejected() {
        let result = compute_severance(dec!(1000000), dec!(100.01), false, &august_2025());
        match result {
            Err(EngineError::InvalidArgument { field, .. }) => assert_eq!(field, "years_of_service"),
            other => panic!("Expected InvalidArgument, got {:?}", other),
        }
    }

    #[test]
    fn test_huge_uncapped_wage_rejected_instead_of_overflowing() {
        let result = compute_severance(dec!(10000000000000000000000000000), dec!(30), true, &august_2025());
        match result {
            Err(EngineError::InvalidArgument { field, .. }) => assert_eq!(field, "gross_base_wage"),
            other => panic!("Expected InvalidArgument, got {:?}", other),
        }
    }

    #[test]
    fn test_largest_inputs_compute() {
        let result = compute_severance(MAX_AMOUNT, MAX_YEARS_OF_SERVICE, true, &august_2025()).unwrap();
        assert_eq!(result.gross_severance, MAX_AMOUNT * dec!(100));
    }
}
