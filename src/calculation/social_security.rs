//! Social security contribution functionality.
//!
//! This module computes the worker's pension (AFP), health and unemployment
//! insurance contributions from taxable income. Contribution bases are
//! capped at amounts expressed in UF and converted to pesos with the
//! period's UF value.
//!
//! ## Health contribution
//!
//! - **Fonasa:** `health_rate` (7%) of the capped base.
//! - **Isapre:** the plan price in UF converted to pesos, regardless of
//!   income.

use rust_decimal::Decimal;

use crate::config::LegalParameters;
use crate::models::{AuditStep, HealthPlan};

/// The result of the contribution calculation, including audit steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialSecurityResult {
    /// Taxable income after the pension/health cap.
    pub capped_taxable_income: Decimal,
    /// Taxable income after the unemployment insurance cap.
    pub unemployment_insurance_base: Decimal,
    /// Pension contribution.
    pub pension: Decimal,
    /// Health contribution.
    pub health: Decimal,
    /// Worker's unemployment insurance contribution.
    pub unemployment_insurance: Decimal,
    /// One audit step per contribution.
    pub audit_steps: Vec<AuditStep>,
}

impl SocialSecurityResult {
    /// Sum of the three contributions.
    pub fn total(&self) -> Decimal {
        self.pension + self.health + self.unemployment_insurance
    }
}

/// Computes pension, health and unemployment insurance contributions.
///
/// # Arguments
///
/// * `taxable_income` - Total imposable income (base wage, gratuity and
///   other taxable allowances)
/// * `health_plan` - Fonasa (rate-based) or Isapre (fixed UF amount)
/// * `params` - The legal parameter set
/// * `step_number_start` - The first step number for audit trail sequencing
///
/// # Examples
///
/// ```
/// use wage_engine::calculation::compute_social_security;
/// use wage_engine::config::ConfigLoader;
/// use wage_engine::models::HealthPlan;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let loader = ConfigLoader::load("config/cl").unwrap();
/// let params = loader.latest();
///
/// let result = compute_social_security(Decimal::from(1_000_000), HealthPlan::Fonasa, params, 1);
/// assert_eq!(result.pension, Decimal::from_str("114400").unwrap());
/// assert_eq!(result.health, Decimal::from(70_000));
/// assert_eq!(result.unemployment_insurance, Decimal::from(6_000));
/// assert_eq!(result.audit_steps.len(), 3);
/// ```
pub fn compute_social_security(
    taxable_income: Decimal,
    health_plan: HealthPlan,
    params: &LegalParameters,
    step_number_start: u32,
) -> SocialSecurityResult {
    let mut audit_steps = Vec::with_capacity(3);
    let mut step_number = step_number_start;

    let pension_health_cap = params.pension_health_cap();
    let capped_taxable_income = taxable_income.min(pension_health_cap);
    let unemployment_cap = params.unemployment_insurance_cap();
    let unemployment_insurance_base = taxable_income.min(unemployment_cap);

    let pension = capped_taxable_income * params.afp_rate;
    audit_steps.push(AuditStep {
        step_number,
        rule_id: "pension_contribution".to_string(),
        rule_name: "Pension Contribution (AFP)".to_string(),
        legal_ref: "DL 3.500 art. 17".to_string(),
        input: serde_json::json!({
            "taxable_income": taxable_income.to_string(),
            "cap": pension_health_cap.to_string(),
            "afp_rate": params.afp_rate.normalize().to_string()
        }),
        output: serde_json::json!({
            "base": capped_taxable_income.to_string(),
            "pension": pension.to_string()
        }),
        reasoning: format!(
            "{}% of ${} (taxable income capped at {} UF = ${}) = ${}",
            (params.afp_rate * Decimal::ONE_HUNDRED).normalize(),
            capped_taxable_income.round_dp(2).normalize(),
            params.imposable_caps.pension_health_uf.normalize(),
            pension_health_cap.round_dp(2).normalize(),
            pension.round_dp(2).normalize()
        ),
    });
    step_number += 1;

    let (health, health_reasoning) = match health_plan {
        HealthPlan::Fonasa => {
            let health = capped_taxable_income * params.health_rate;
            (
                health,
                format!(
                    "Fonasa: {}% of ${} = ${}",
                    (params.health_rate * Decimal::ONE_HUNDRED).normalize(),
                    capped_taxable_income.round_dp(2).normalize(),
                    health.round_dp(2).normalize()
                ),
            )
        }
        HealthPlan::Isapre { plan_uf } => {
            let health = plan_uf * params.uf_value;
            (
                health,
                format!(
                    "Isapre plan: {} UF x ${} = ${}",
                    plan_uf.normalize(),
                    params.uf_value.normalize(),
                    health.round_dp(2).normalize()
                ),
            )
        }
    };
    audit_steps.push(AuditStep {
        step_number,
        rule_id: "health_contribution".to_string(),
        rule_name: "Health Contribution".to_string(),
        legal_ref: "Ley 18.469 art. 84".to_string(),
        input: serde_json::json!({
            "base": capped_taxable_income.to_string(),
            "health_plan": health_plan
        }),
        output: serde_json::json!({
            "health": health.to_string()
        }),
        reasoning: health_reasoning,
    });
    step_number += 1;

    let unemployment_insurance =
        unemployment_insurance_base * params.unemployment_insurance.worker_rate;
    audit_steps.push(AuditStep {
        step_number,
        rule_id: "unemployment_insurance".to_string(),
        rule_name: "Unemployment Insurance (Worker)".to_string(),
        legal_ref: "Ley 19.728 art. 5".to_string(),
        input: serde_json::json!({
            "taxable_income": taxable_income.to_string(),
            "cap": unemployment_cap.to_string(),
            "worker_rate": params.unemployment_insurance.worker_rate.normalize().to_string()
        }),
        output: serde_json::json!({
            "base": unemployment_insurance_base.to_string(),
            "unemployment_insurance": unemployment_insurance.to_string()
        }),
        reasoning: format!(
            "{}% of ${} = ${}",
            (params.unemployment_insurance.worker_rate * Decimal::ONE_HUNDRED).normalize(),
            unemployment_insurance_base.round_dp(2).normalize(),
            unemployment_insurance.round_dp(2).normalize()
        ),
    });

    SocialSecurityResult {
        capped_taxable_income,
        unemployment_insurance_base,
        pension,
        health,
        unemployment_insurance,
        audit_steps,
    }
}
