//! Severance projection to retirement age.
//!
//! Projects what an employee's severance would be if they stayed until the
//! retirement age of the parameter set, and reports the difference against
//! severance owed today.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::LegalParameters;
use crate::error::{EngineError, EngineResult};
use crate::models::ProjectionResult;

use super::severance::{severance_for, validate_severance_inputs};

/// Projects severance to the retirement age.
///
/// If `current_age` is at or past the retirement age the projection is not
/// applicable: `projected` is `None` and both deltas are zero. Otherwise
/// `retirement_age - current_age` years are added to the tenure and the
/// severance is recomputed.
///
/// # Errors
///
/// Returns [`EngineError::InvalidArgument`] if the age is negative, or on
/// the same wage and tenure bounds as
/// [`compute_severance`](super::compute_severance).
///
/// # Examples
///
/// ```
/// use wage_engine::calculation::project_to_retirement;
/// use wage_engine::config::ConfigLoader;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("config/cl").unwrap();
///
/// let result = project_to_retirement(
///     Decimal::from(1_000_000),
///     Decimal::from(3),
///     Decimal::from(60),
///     false,
///     loader.latest(),
/// ).unwrap();
///
/// assert!(result.applicable);
/// assert_eq!(result.years_to_add, Decimal::from(4));
/// assert!(!result.current.eligible);
/// assert_eq!(result.gross_delta, Decimal::from(7_000_000));
/// ```
pub fn project_to_retirement(
    gross_base_wage: Decimal,
    years_of_service: Decimal,
    current_age: Decimal,
    has_non_compete_clause: bool,
    params: &LegalParameters,
) -> EngineResult<ProjectionResult> {
    if current_age < Decimal::ZERO {
        return Err(EngineError::invalid_argument(
            "current_age",
            format!("must not be negative, got {}", current_age),
        ));
    }

    validate_severance_inputs(gross_base_wage, years_of_service)?;

    let retirement_age = params.severance.retirement_age;
    let current = severance_for(
        gross_base_wage,
        years_of_service,
        has_non_compete_clause,
        params,
    );

    if current_age >= retirement_age {
        debug!(
            current_age = %current_age,
            retirement_age = %retirement_age,
            "Already at retirement age; projection not applicable"
        );
        return Ok(ProjectionResult {
            applicable: false,
            current_age,
            retirement_age,
            years_to_add: Decimal::ZERO,
            current,
            projected: None,
            gross_delta: Decimal::ZERO,
            net_delta: Decimal::ZERO,
        });
    }

    let years_to_add = retirement_age - current_age;
    let projected = severance_for(
        gross_base_wage,
        years_of_service + years_to_add,
        has_non_compete_clause,
        params,
    );

    let gross_delta = projected.gross_severance - current.gross_severance;
    let net_delta = projected.net_severance - current.net_severance;

    debug!(
        years_to_add = %years_to_add,
        gross_delta = %gross_delta,
        "Projected severance to retirement"
    );

    Ok(ProjectionResult {
        applicable: true,
        current_age,
        retirement_age,
        years_to_add,
        current,
        projected: Some(projected),
        gross_delta,
        net_delta,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::fixtures::august_2025;
    use crate::models::SeveranceTier;
    use rust_decimal_macros::dec;

    fn project(gross: Decimal, years: Decimal, age: Decimal, non_compete: bool) -> ProjectionResult {
        project_to_retirement(gross, years, age, non_compete, &august_2025()).unwrap()
    }

    #[test]
    fn test_at_retirement_age_not_applicable() {
        let result = project(dec!(1000000), dec!(10), dec!(64), false);

        assert!(!result.applicable);
        assert!(result.projected.is_none());
        assert_eq!(result.years_to_add, Decimal::ZERO);
        assert_eq!(result.gross_delta, Decimal::ZERO);
        assert_eq!(result.current.gross_severance, dec!(10000000));
    }

    #[test]
    fn test_past_retirement_age_not_applicable() {
        assert!(!project(dec!(1000000), dec!(10), dec!(70), false).applicable);
    }

    #[test]
    fn test_projection_moves_into_higher_tier() {
        // 18 years at 58 becomes 24 years at 64: tier A (11 years) -> tier B (16 years)
        let result = project(dec!(1000000), dec!(18), dec!(58), false);
        let projected = result.projected.unwrap();

        assert_eq!(result.years_to_add, dec!(6));
        assert_eq!(result.current.tier, Some(SeveranceTier::A));
        assert_eq!(projected.tier, Some(SeveranceTier::B));
        assert_eq!(result.current.gross_severance, dec!(11000000));
        assert_eq!(projected.gross_severance, dec!(16000000));
        assert_eq!(result.gross_delta, dec!(5000000));
        assert_eq!(result.net_delta, dec!(5000000) * dec!(0.976));
    }

    #[test]
    fn test_fractional_age() {
        let result = project(dec!(1000000), dec!(5), dec!(62.5), false);
        assert_eq!(result.years_to_add, dec!(1.5));
        assert_eq!(result.projected.unwrap().years_counted, dec!(6.5));
    }

    #[test]
    fn test_projection_already_at_max_years_has_zero_delta() {
        let result = project(dec!(1000000), dec!(21), dec!(60), false);
        assert!(result.applicable);
        assert_eq!(result.gross_delta, Decimal::ZERO);
    }

    #[test]
    fn test_negative_age_rejected() {
        let result = project_to_retirement(dec!(1000000), dec!(5), dec!(-1), false, &august_2025());
        match result {
            Err(EngineError::InvalidArgument { field, .. }) => assert_eq!(field, "current_age"),
            other => panic!("Expected InvalidArgument, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_tenure_rejected() {
        let result = project_to_retirement(dec!(1000000), dec!(-5), dec!(40), false, &august_2025());
        assert!(result.is_err());
    }

    #[test]
    fn test_projection_past_tenure_limit_still_computes() {
        // 99 years of service at age 10 projects 153 years
        let result = project(dec!(1000000), dec!(99), dec!(10), true);
        assert_eq!(result.projected.unwrap().years_counted, dec!(153));
    }

    #[test]
    fn test_huge_wage_rejected() {
        let result = project_to_retirement(Decimal::MAX, dec!(30), dec!(40), true, &august_2025());
        assert!(matches!(result, Err(EngineError::InvalidArgument { .. })));
    }
}
