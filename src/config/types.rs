//! Configuration types for wage, tax and severance calculations.
//!
//! This module contains the strongly-typed legal parameter structures that
//! are deserialized from YAML configuration files. A [`LegalParameters`]
//! value is immutable once loaded; a new value is loaded for each effective
//! date rather than patching an old one.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The largest gap allowed between one bracket's upper bound and the next
/// bracket's lower bound (one cent).
const MAX_BRACKET_GAP: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Metadata about the jurisdiction whose parameters are loaded.
#[derive(Debug, Clone, Deserialize)]
pub struct JurisdictionMetadata {
    /// Country code (e.g., "CL").
    pub code: String,
    /// Human-readable name of the parameter collection.
    pub name: String,
    /// Currency the monetary amounts are expressed in (e.g., "CLP").
    pub currency: String,
    /// URL to the official source of the tax table.
    pub source_url: String,
}

/// A single row of the progressive withholding tax table.
///
/// The upper bound is inclusive: an amount equal to `upper_bound` is taxed
/// in this bracket, not the next one. `upper_bound` is `None` only for the
/// last bracket, which is unbounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// The smallest taxable base in this bracket.
    pub lower_bound: Decimal,
    /// The largest taxable base in this bracket, or `None` for +∞.
    #[serde(default)]
    pub upper_bound: Option<Decimal>,
    /// The marginal rate applied to the whole taxable base.
    pub marginal_rate: Decimal,
    /// The amount subtracted after applying the marginal rate.
    pub rebate: Decimal,
}

impl TaxBracket {
    /// Returns true if `amount` does not exceed this bracket's upper bound.
    pub fn admits(&self, amount: Decimal) -> bool {
        self.upper_bound.is_none_or(|upper| amount <= upper)
    }
}

/// Unemployment insurance (seguro de cesantía) contribution rates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnemploymentInsuranceRates {
    /// Rate withheld from the worker's pay.
    pub worker_rate: Decimal,
    /// Rate paid by the employer; also the flat deduction applied to severance.
    pub employer_rate: Decimal,
}

/// Legal gratuity (gratificación) parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GratuityParameters {
    /// Share of the base wage paid as gratuity (0.25).
    pub percentage: Decimal,
    /// Number of minimum wages making up the annual ceiling (4.75).
    pub factor: Decimal,
}

/// Caps on imposable income, expressed in UF.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImposableCaps {
    /// Cap applied to the pension and health contribution base.
    pub pension_health_uf: Decimal,
    /// Separate cap for the unemployment insurance base. When absent the
    /// pension/health cap applies, which is what the shipped periods use.
    #[serde(default)]
    pub unemployment_insurance_uf: Option<Decimal>,
}

/// Which imposable income the withholding tax base starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxBaseConvention {
    /// Tax base is the full taxable income minus contributions.
    #[default]
    Uncapped,
    /// Tax base is the UF-capped taxable income minus contributions.
    Capped,
}

/// Tenure bands, caps and retirement threshold for severance pay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeveranceParameters {
    /// Monthly wage cap, in UF, for capped tiers.
    pub wage_cap_uf: Decimal,
    /// Minimum years of service to be eligible at all.
    pub minimum_years: Decimal,
    /// Years of service from which tier B applies.
    pub tier_b_from_years: Decimal,
    /// Years of service from which tier C applies.
    pub tier_c_from_years: Decimal,
    /// Maximum countable years in tier A.
    pub tier_a_max_years: Decimal,
    /// Maximum countable years in tiers B and capped C.
    pub tier_b_max_years: Decimal,
    /// Age at which the retirement projection stops adding years.
    pub retirement_age: Decimal,
}

impl Default for SeveranceParameters {
    fn default() -> Self {
        Self {
            wage_cap_uf: Decimal::from(90),
            minimum_years: Decimal::from(4),
            tier_b_from_years: Decimal::from(20),
            tier_c_from_years: Decimal::from(25),
            tier_a_max_years: Decimal::from(11),
            tier_b_max_years: Decimal::from(16),
            retirement_age: Decimal::from(64),
        }
    }
}

/// The full set of legal parameters for one effective date.
///
/// Every calculator takes a `&LegalParameters`; nothing in the engine holds
/// global rates, so parameter sets for different periods can be used side
/// by side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegalParameters {
    /// The first day these parameters apply.
    pub effective_date: NaiveDate,
    /// Monthly minimum wage (ingreso mínimo mensual).
    pub minimum_wage: Decimal,
    /// Pension (AFP) contribution rate, including the fund commission.
    pub afp_rate: Decimal,
    /// Flat health contribution rate (Fonasa).
    pub health_rate: Decimal,
    /// Unemployment insurance rates.
    pub unemployment_insurance: UnemploymentInsuranceRates,
    /// Legal gratuity parameters.
    pub gratuity: GratuityParameters,
    /// Flat non-taxable transportation allowance (movilización).
    pub transportation_allowance: Decimal,
    /// Peso value of one UF for the period.
    pub uf_value: Decimal,
    /// Peso value of one UTM for the period. Informational; the bracket
    /// table is already expressed in pesos.
    #[serde(default)]
    pub utm_value: Option<Decimal>,
    /// Imposable income caps.
    pub imposable_caps: ImposableCaps,
    /// Whether the tax base uses capped or uncapped imposable income.
    #[serde(default)]
    pub tax_base_convention: TaxBaseConvention,
    /// Severance tiers and retirement threshold.
    #[serde(default)]
    pub severance: SeveranceParameters,
    /// Progressive withholding tax table, ascending.
    pub tax_brackets: Vec<TaxBracket>,
}

impl LegalParameters {
    /// Monthly gratuity ceiling: `factor * minimum_wage / 12`.
    pub fn gratuity_monthly_cap(&self) -> Decimal {
        self.gratuity.factor * self.minimum_wage / Decimal::from(12)
    }

    /// Pension and health contribution cap in pesos.
    pub fn pension_health_cap(&self) -> Decimal {
        self.imposable_caps.pension_health_uf * self.uf_value
    }

    /// Unemployment insurance contribution cap in pesos.
    pub fn unemployment_insurance_cap(&self) -> Decimal {
        self.imposable_caps
            .unemployment_insurance_uf
            .unwrap_or(self.imposable_caps.pension_health_uf)
            * self.uf_value
    }

    /// Monthly wage cap for capped severance tiers, in pesos.
    pub fn severance_wage_cap(&self) -> Decimal {
        self.severance.wage_cap_uf * self.uf_value
    }

    /// Checks the invariants every parameter set must satisfy.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidParameters`] naming the first violated
    /// invariant. Besides the bracket table (contiguous, ascending, last one
    /// unbounded, rebates non-decreasing) this rejects rates outside
    /// `[0, 1)`, non-positive UF value, minimum wage or imposable caps,
    /// negative allowances, and severance thresholds out of order.
    pub fn validate(&self) -> EngineResult<()> {
        let invalid = |message: String| EngineError::InvalidParameters {
            effective_date: self.effective_date,
            message,
        };

        if self.minimum_wage <= Decimal::ZERO {
            return Err(invalid("minimum_wage must be positive".to_string()));
        }
        if self.uf_value <= Decimal::ZERO {
            return Err(invalid("uf_value must be positive".to_string()));
        }
        if self.imposable_caps.pension_health_uf <= Decimal::ZERO {
            return Err(invalid(
                "imposable_caps.pension_health_uf must be positive".to_string(),
            ));
        }
        match self.imposable_caps.unemployment_insurance_uf {
            Some(cap) if cap <= Decimal::ZERO => {
                return Err(invalid(format!(
                    "imposable_caps.unemployment_insurance_uf must be positive, got {}",
                    cap
                )));
            }
            _ => {}
        }
        if self.transportation_allowance < Decimal::ZERO {
            return Err(invalid("transportation_allowance is negative".to_string()));
        }
        if self.gratuity.factor < Decimal::ZERO {
            return Err(invalid("gratuity.factor is negative".to_string()));
        }
        self.validate_severance().map_err(invalid)?;

        let rates = [
            ("afp_rate", self.afp_rate),
            ("health_rate", self.health_rate),
            (
                "unemployment_insurance.worker_rate",
                self.unemployment_insurance.worker_rate,
            ),
            (
                "unemployment_insurance.employer_rate",
                self.unemployment_insurance.employer_rate,
            ),
            ("gratuity.percentage", self.gratuity.percentage),
        ];
        for (name, rate) in rates {
            if rate < Decimal::ZERO || rate >= Decimal::ONE {
                return Err(invalid(format!("{} must be in [0, 1), got {}", name, rate)));
            }
        }

        let Some(first) = self.tax_brackets.first() else {
            return Err(invalid("tax brackets are empty".to_string()));
        };
        if first.lower_bound != Decimal::ZERO {
            return Err(invalid(format!(
                "first tax bracket must start at 0, got {}",
                first.lower_bound
            )));
        }

        let last_index = self.tax_brackets.len() - 1;
        for (index, bracket) in self.tax_brackets.iter().enumerate() {
            if bracket.marginal_rate < Decimal::ZERO || bracket.marginal_rate >= Decimal::ONE {
                return Err(invalid(format!(
                    "bracket {} marginal rate must be in [0, 1), got {}",
                    index, bracket.marginal_rate
                )));
            }
            if bracket.rebate < Decimal::ZERO {
                return Err(invalid(format!("bracket {} rebate is negative", index)));
            }
            match (bracket.upper_bound, index == last_index) {
                (None, true) => {}
                (None, false) => {
                    return Err(invalid(format!(
                        "bracket {} is unbounded but is not the last bracket",
                        index
                    )));
                }
                (Some(_), true) => {
                    return Err(invalid("last tax bracket must be unbounded".to_string()));
                }
                (Some(upper), false) => {
                    if upper < bracket.lower_bound {
                        return Err(invalid(format!(
                            "bracket {} upper bound is below its lower bound",
                            index
                        )));
                    }
                    let next = &self.tax_brackets[index + 1];
                    let gap = next.lower_bound - upper;
                    if gap < Decimal::ZERO || gap > MAX_BRACKET_GAP {
                        return Err(invalid(format!(
                            "brackets {} and {} are not contiguous ({} -> {})",
                            index,
                            index + 1,
                            upper,
                            next.lower_bound
                        )));
                    }
                    if next.rebate < bracket.rebate {
                        return Err(invalid(format!(
                            "bracket {} rebate decreases from the previous bracket",
                            index + 1
                        )));
                    }
                }
            }
        }

        Ok(())
    }
}

impl LegalParameters {
    fn validate_severance(&self) -> Result<(), String> {
        let severance = &self.severance;
        let non_negative = [
            ("wage_cap_uf", severance.wage_cap_uf),
            ("minimum_years", severance.minimum_years),
            ("tier_a_max_years", severance.tier_a_max_years),
            ("tier_b_max_years", severance.tier_b_max_years),
        ];
        for (name, value) in non_negative {
            if value < Decimal::ZERO {
                return Err(format!("severance.{} is negative", name));
            }
        }
        if severance.retirement_age <= Decimal::ZERO {
            return Err("severance.retirement_age must be positive".to_string());
        }

        // minimum_years <= tier_b_from_years <= tier_c_from_years
        if severance.tier_b_from_years < severance.minimum_years {
            return Err(format!(
                "severance.tier_b_from_years ({}) is below minimum_years ({})",
                severance.tier_b_from_years, severance.minimum_years
            ));
        }
        if severance.tier_c_from_years < severance.tier_b_from_years {
            return Err(format!(
                "severance.tier_c_from_years ({}) is below tier_b_from_years ({})",
                severance.tier_c_from_years, severance.tier_b_from_years
            ));
        }
        if severance.tier_b_max_years < severance.tier_a_max_years {
            return Err(format!(
                "severance.tier_b_max_years ({}) is below tier_a_max_years ({})",
                severance.tier_b_max_years, severance.tier_a_max_years
            ));
        }
        Ok(())
    }
}
