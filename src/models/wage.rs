//! Wage calculation models.
//!
//! This module contains the inputs that vary per employee ([`WageOptions`],
//! [`HealthPlan`]) and the outputs of the gross/net conversion
//! ([`WageCalculationResult`], [`GrossSearchResult`]).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::AuditTrace;

/// The health insurance the employee contributes to.
///
/// # Example
///
/// ```
/// use wage_engine::models::HealthPlan;
/// use rust_decimal::Decimal;
///
/// let plan: HealthPlan = serde_json::from_str(r#"{"type":"isapre","plan_uf":"4.2"}"#).unwrap();
/// assert_eq!(plan, HealthPlan::Isapre { plan_uf: Decimal::new(42, 1) });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HealthPlan {
    /// Public health fund: a flat rate of capped imposable income.
    #[default]
    Fonasa,
    /// Private health plan priced in UF: a fixed peso amount.
    Isapre {
        /// Monthly plan price in UF.
        plan_uf: Decimal,
    },
}

/// Per-employee options for the gross/net conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WageOptions {
    /// Health contribution path.
    #[serde(default)]
    pub health_plan: HealthPlan,
    /// Additional taxable allowances (bonuses, commissions) added to the
    /// taxable income alongside the gratuity.
    #[serde(default)]
    pub other_taxable_allowances: Decimal,
}

/// The full breakdown of a gross-to-net wage conversion.
///
/// All amounts are monthly, in the currency of the parameter set, at full
/// `Decimal` precision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WageCalculationResult {
    /// Gross base wage (sueldo base).
    pub gross_base_wage: Decimal,
    /// Legal gratuity after the monthly cap.
    pub gratuity: Decimal,
    /// Extra taxable allowances from [`WageOptions`].
    pub other_taxable_allowances: Decimal,
    /// Total taxable (imposable) income.
    pub taxable_income: Decimal,
    /// Taxable income after the pension/health UF cap.
    pub capped_taxable_income: Decimal,
    /// Total non-taxable income (transportation allowance).
    pub non_taxable_income: Decimal,
    /// Pension (AFP) contribution.
    pub pension: Decimal,
    /// Health contribution.
    pub health: Decimal,
    /// Worker's unemployment insurance contribution.
    pub unemployment_insurance: Decimal,
    /// Base the withholding tax is computed on.
    pub tax_base: Decimal,
    /// Marginal rate of the bracket the tax base fell in.
    pub marginal_tax_rate: Decimal,
    /// Withholding income tax.
    pub income_tax: Decimal,
    /// Sum of contributions and income tax.
    pub total_deductions: Decimal,
    /// Taxable plus non-taxable income.
    pub total_gross_pay: Decimal,
    /// Take-home pay. May be negative for pathological inputs.
    pub net_pay: Decimal,
    /// Steps applied and advisory warnings.
    pub audit_trace: AuditTrace,
}

impl WageCalculationResult {
    /// Sum of the social security contributions (pension, health and
    /// unemployment insurance), excluding income tax.
    pub fn social_security_total(&self) -> Decimal {
        self.pension + self.health + self.unemployment_insurance
    }
}

/// The outcome of searching for the gross wage that yields a target net pay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrossSearchResult {
    /// The net pay that was requested.
    pub target_net_pay: Decimal,
    /// The bisection tolerance used.
    pub precision: Decimal,
    /// The gross base wage found, rounded to whole currency units.
    pub gross_base_wage: Decimal,
    /// Number of bisection iterations performed.
    pub iterations: u32,
    /// The forward calculation at the returned gross base wage.
    pub achieved: WageCalculationResult,
}
