//! Legal gratuity calculation.
//!
//! The monthly legal gratuity (gratificación legal, article 50 of the
//! Labour Code) is 25% of the base wage, capped at 4.75 minimum wages per
//! year paid in twelfths.

use rust_decimal::Decimal;

use crate::config::LegalParameters;
use crate::models::AuditStep;

/// Legal reference recorded on gratuity audit steps.
pub const GRATUITY_LEGAL_REF: &str = "Código del Trabajo art. 50";

/// The result of the gratuity calculation, including the audit step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GratuityResult {
    /// The monthly gratuity after the cap.
    pub gratuity: Decimal,
    /// The monthly ceiling that applied.
    pub monthly_cap: Decimal,
    /// Whether the ceiling bound the gratuity.
    pub capped: bool,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Computes the monthly legal gratuity for a gross base wage.
///
/// `gratuity = min(percentage * gross_base_wage, factor * minimum_wage / 12)`
///
/// # Examples
///
/// ```
/// use wage_engine::calculation::compute_gratuity;
/// use wage_engine::config::ConfigLoader;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("config/cl").unwrap();
/// let params = loader.latest();
///
/// // 25% of 600,000 is below the cap
/// let result = compute_gratuity(Decimal::from(600_000), params, 1);
/// assert_eq!(result.gratuity, Decimal::from(150_000));
/// assert!(!result.capped);
///
/// // 25% of 2,000,000 exceeds the cap
/// let result = compute_gratuity(Decimal::from(2_000_000), params, 1);
/// assert!(result.capped);
/// assert_eq!(result.gratuity, result.monthly_cap);
/// ```
pub fn compute_gratuity(
    gross_base_wage: Decimal,
    params: &LegalParameters,
    step_number: u32,
) -> GratuityResult {
    let uncapped = gross_base_wage * params.gratuity.percentage;
    let monthly_cap = params.gratuity_monthly_cap();
    let capped = uncapped > monthly_cap;
    let gratuity = uncapped.min(monthly_cap);

    let reasoning = if capped {
        format!(
            "{}% of ${} = ${} exceeds the monthly cap of {} minimum wages / 12 = ${}; gratuity is ${}",
            (params.gratuity.percentage * Decimal::ONE_HUNDRED).normalize(),
            gross_base_wage.normalize(),
            uncapped.normalize(),
            params.gratuity.factor.normalize(),
            monthly_cap.round_dp(2).normalize(),
            gratuity.round_dp(2).normalize()
        )
    } else {
        format!(
            "{}% of ${} = ${}, within the monthly cap of ${}",
            (params.gratuity.percentage * Decimal::ONE_HUNDRED).normalize(),
            gross_base_wage.normalize(),
            gratuity.normalize(),
            monthly_cap.round_dp(2).normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "legal_gratuity".to_string(),
        rule_name: "Legal Gratuity".to_string(),
        legal_ref: GRATUITY_LEGAL_REF.to_string(),
        input: serde_json::json!({
            "gross_base_wage": gross_base_wage.normalize().to_string(),
            "percentage": params.gratuity.percentage.normalize().to_string(),
            "factor": params.gratuity.factor.normalize().to_string(),
            "minimum_wage": params.minimum_wage.normalize().to_string()
        }),
        output: serde_json::json!({
            "monthly_cap": monthly_cap.to_string(),
            "capped": capped,
            "gratuity": gratuity.to_string()
        }),
        reasoning,
    };

    GratuityResult {
        gratuity,
        monthly_cap,
        capped,
        audit_step,
    }
}
