//! Gross-to-net wage conversion.
//!
//! This module runs the forward payroll pipeline for one month:
//!
//! 1. Legal gratuity, capped ([`compute_gratuity`])
//! 2. Taxable income = base wage + gratuity + other taxable allowances
//! 3. Pension, health and unemployment insurance on UF-capped bases
//!    ([`compute_social_security`])
//! 4. Tax base = taxable income - contributions; withholding tax from the
//!    bracket table ([`compute_tax`])
//! 5. Total gross pay = taxable income + non-taxable transportation allowance
//! 6. Net pay = total gross pay - contributions - income tax
//!
//! The order matters: every step reads the output of the previous ones.

use rust_decimal::Decimal;
use tracing::warn;

use crate::config::{LegalParameters, TaxBaseConvention};
use crate::error::EngineResult;
use crate::models::{AuditTrace, AuditWarning, HealthPlan, WageCalculationResult, WageOptions};

use super::gratuity::compute_gratuity;
use super::income_tax::{compute_tax, find_bracket};
use super::limits::{check_bounded, MAX_AMOUNT};
use super::social_security::compute_social_security;

/// Warning code raised when the base wage is below the legal minimum wage.
pub const BELOW_MINIMUM_WAGE: &str = "BELOW_MINIMUM_WAGE";

/// Computes net pay from a gross base wage.
///
/// # Arguments
///
/// * `gross_base_wage` - Monthly gross base wage (sueldo base)
/// * `params` - The legal parameter set in force
/// * `options` - Health plan and extra taxable allowances
///
/// # Returns
///
/// A [`WageCalculationResult`] with every line item and an audit trace.
/// A base wage below the minimum wage is accepted but flagged with a
/// [`BELOW_MINIMUM_WAGE`] warning.
///
/// # Errors
///
/// Returns [`EngineError::InvalidArgument`] if the base wage, the extra
/// allowances or an Isapre plan price is negative or above
/// [`MAX_AMOUNT`].
///
/// [`EngineError::InvalidArgument`]: crate::error::EngineError::InvalidArgument
///
/// # Examples
///
/// ```
/// use wage_engine::calculation::net_from_gross;
/// use wage_engine::config::ConfigLoader;
/// use wage_engine::models::WageOptions;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("config/cl").unwrap();
/// let params = loader.latest();
///
/// let result = net_from_gross(Decimal::from(2_500_000), params, &WageOptions::default()).unwrap();
///
/// assert!(result.net_pay > Decimal::from(2_100_000));
/// assert!(result.net_pay < Decimal::from(2_250_000));
/// assert_eq!(result.total_gross_pay - result.total_deductions, result.net_pay);
/// ```
pub fn net_from_gross(
    gross_base_wage: Decimal,
    params: &LegalParameters,
    options: &WageOptions,
) -> EngineResult<WageCalculationResult> {
    validate_wage_inputs(gross_base_wage, options)?;

    let result = calculate_net(gross_base_wage, params, options);

    if result.audit_trace.has_warning(BELOW_MINIMUM_WAGE) {
        warn!(
            gross_base_wage = %gross_base_wage,
            minimum_wage = %params.minimum_wage,
            "Gross base wage is below the minimum wage"
        );
    }

    Ok(result)
}

/// Rejects inputs the forward pipeline cannot give a meaningful result for.
pub(crate) fn validate_wage_inputs(
    gross_base_wage: Decimal,
    options: &WageOptions,
) -> EngineResult<()> {
    check_bounded("gross_base_wage", gross_base_wage, MAX_AMOUNT)?;
    check_bounded(
        "other_taxable_allowances",
        options.other_taxable_allowances,
        MAX_AMOUNT,
    )?;
    if let HealthPlan::Isapre { plan_uf } = options.health_plan {
        check_bounded("health_plan.plan_uf", plan_uf, MAX_AMOUNT)?;
    }
    Ok(())
}

/// Runs the forward pipeline on already-validated inputs without logging.
///
/// The inverse search calls this once per bisection iteration.
pub(crate) fn calculate_net(
    gross_base_wage: Decimal,
    params: &LegalParameters,
    options: &WageOptions,
) -> WageCalculationResult {
    let mut audit_trace = AuditTrace::default();

    if gross_base_wage < params.minimum_wage {
        audit_trace.warnings.push(AuditWarning {
            code: BELOW_MINIMUM_WAGE.to_string(),
            message: format!(
                "Gross base wage ${} is below the minimum wage of ${}",
                gross_base_wage.normalize(),
                params.minimum_wage.normalize()
            ),
            severity: "medium".to_string(),
        });
    }

    // Step 1: gratuity
    let gratuity_result = compute_gratuity(gross_base_wage, params, 1);
    let gratuity = gratuity_result.gratuity;
    audit_trace.steps.push(gratuity_result.audit_step);

    // Step 2: taxable income
    let other_taxable_allowances = options.other_taxable_allowances;
    let taxable_income = gross_base_wage + gratuity + other_taxable_allowances;
    audit_trace.record(
        "taxable_income",
        "Taxable Income",
        "Código del Trabajo art. 41",
        serde_json::json!({
            "gross_base_wage": gross_base_wage.to_string(),
            "gratuity": gratuity.to_string(),
            "other_taxable_allowances": other_taxable_allowances.to_string()
        }),
        serde_json::json!({ "taxable_income": taxable_income.to_string() }),
        format!(
            "${} base wage + ${} gratuity + ${} other taxable allowances = ${}",
            gross_base_wage.normalize(),
            gratuity.round_dp(2).normalize(),
            other_taxable_allowances.normalize(),
            taxable_income.round_dp(2).normalize()
        ),
    );

    // Steps 3-5: contributions
    let step_number = audit_trace.steps.len() as u32 + 1;
    let contributions =
        compute_social_security(taxable_income, options.health_plan, params, step_number);
    audit_trace.steps.extend(contributions.audit_steps.iter().cloned());
    let social_security_total = contributions.total();

    // Step 6: withholding tax
    let tax_income = match params.tax_base_convention {
        TaxBaseConvention::Uncapped => taxable_income,
        TaxBaseConvention::Capped => contributions.capped_taxable_income,
    };
    let tax_base = tax_income - social_security_total;
    let marginal_tax_rate = find_bracket(tax_base, &params.tax_brackets)
        .map(|b| b.marginal_rate)
        .unwrap_or(Decimal::ZERO);
    let income_tax = compute_tax(tax_base, &params.tax_brackets);
    audit_trace.record(
        "income_tax",
        "Withholding Income Tax",
        "Ley sobre Impuesto a la Renta art. 43",
        serde_json::json!({
            "tax_base_convention": params.tax_base_convention,
            "income": tax_income.to_string(),
            "social_security": social_security_total.to_string()
        }),
        serde_json::json!({
            "tax_base": tax_base.to_string(),
            "marginal_rate": marginal_tax_rate.normalize().to_string(),
            "income_tax": income_tax.to_string()
        }),
        format!(
            "Tax base ${} - ${} contributions = ${} falls in the {}% bracket; tax is ${}",
            tax_income.round_dp(2).normalize(),
            social_security_total.round_dp(2).normalize(),
            tax_base.round_dp(2).normalize(),
            (marginal_tax_rate * Decimal::ONE_HUNDRED).normalize(),
            income_tax.round_dp(2).normalize()
        ),
    );

    // Step 7: totals
    let total_deductions = social_security_total + income_tax;
    let non_taxable_income = params.transportation_allowance;
    let total_gross_pay = taxable_income + non_taxable_income;
    let net_pay = total_gross_pay - total_deductions;
    audit_trace.record(
        "net_pay",
        "Net Pay",
        "Código del Trabajo art. 54",
        serde_json::json!({
            "taxable_income": taxable_income.to_string(),
            "non_taxable_income": non_taxable_income.to_string(),
            "total_deductions": total_deductions.to_string()
        }),
        serde_json::json!({
            "total_gross_pay": total_gross_pay.to_string(),
            "net_pay": net_pay.to_string()
        }),
        format!(
            "${} gross pay (including ${} transportation) - ${} deductions = ${} net",
            total_gross_pay.round_dp(2).normalize(),
            non_taxable_income.normalize(),
            total_deductions.round_dp(2).normalize(),
            net_pay.round_dp(2).normalize()
        ),
    );

    WageCalculationResult {
        gross_base_wage,
        gratuity,
        other_taxable_allowances,
        taxable_income,
        capped_taxable_income: contributions.capped_taxable_income,
        non_taxable_income,
        pension: contributions.pension,
        health: contributions.health,
        unemployment_insurance: contributions.unemployment_insurance,
        tax_base,
        marginal_tax_rate,
        income_tax,
        total_deductions,
        total_gross_pay,
        net_pay,
        audit_trace,
    }
}
