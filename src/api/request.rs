//! Request types for the wage engine API.
//!
//! Every request may carry an `effective_date`; when absent, the latest
//! parameter set is used.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::DEFAULT_PRECISION;
use crate::models::{EmployeeRecord, HealthPlan, WageOptions};

fn default_precision() -> Decimal {
    DEFAULT_PRECISION
}

/// Request body for `POST /wage/net`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetWageRequest {
    /// Monthly gross base wage.
    pub gross_base_wage: Decimal,
    /// Health contribution path.
    #[serde(default)]
    pub health_plan: HealthPlan,
    /// Additional taxable allowances.
    #[serde(default)]
    pub other_taxable_allowances: Decimal,
    /// Date selecting the parameter set.
    #[serde(default)]
    pub effective_date: Option<NaiveDate>,
}

impl NetWageRequest {
    /// Returns the per-employee options carried by the request.
    pub fn options(&self) -> WageOptions {
        WageOptions {
            health_plan: self.health_plan,
            other_taxable_allowances: self.other_taxable_allowances,
        }
    }
}

/// Request body for `POST /wage/gross`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrossWageRequest {
    /// Desired monthly take-home pay.
    pub target_net_pay: Decimal,
    /// Bisection tolerance in currency units.
    #[serde(default = "default_precision")]
    pub precision: Decimal,
    /// Health contribution path.
    #[serde(default)]
    pub health_plan: HealthPlan,
    /// Additional taxable allowances.
    #[serde(default)]
    pub other_taxable_allowances: Decimal,
    /// Date selecting the parameter set.
    #[serde(default)]
    pub effective_date: Option<NaiveDate>,
}

impl GrossWageRequest {
    /// Returns the per-employee options carried by the request.
    pub fn options(&self) -> WageOptions {
        WageOptions {
            health_plan: self.health_plan,
            other_taxable_allowances: self.other_taxable_allowances,
        }
    }
}

/// Request body for `POST /severance`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeveranceRequest {
    /// Monthly gross base wage.
    pub gross_base_wage: Decimal,
    /// Fractional years of service.
    pub years_of_service: Decimal,
    /// Whether the contract carries a non-compete clause.
    #[serde(default)]
    pub has_non_compete_clause: bool,
    /// Date selecting the parameter set.
    #[serde(default)]
    pub effective_date: Option<NaiveDate>,
}

/// Request body for `POST /severance/projection`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionRequest {
    /// Monthly gross base wage.
    pub gross_base_wage: Decimal,
    /// Fractional years of service.
    pub years_of_service: Decimal,
    /// Age in years.
    pub current_age: Decimal,
    /// Whether the contract carries a non-compete clause.
    #[serde(default)]
    pub has_non_compete_clause: bool,
    /// Date selecting the parameter set.
    #[serde(default)]
    pub effective_date: Option<NaiveDate>,
}

/// Request body for `POST /batch`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchRequest {
    /// Date selecting the parameter set.
    #[serde(default)]
    pub effective_date: Option<NaiveDate>,
    /// The records to calculate.
    pub employees: Vec<EmployeeRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_gross_request_defaults() {
        let request: GrossWageRequest =
            serde_json::from_str(r#"{"target_net_pay": "1000000"}"#).unwrap();

        assert_eq!(request.precision, dec!(100));
        assert_eq!(request.health_plan, HealthPlan::Fonasa);
        assert_eq!(request.other_taxable_allowances, Decimal::ZERO);
        assert!(request.effective_date.is_none());
    }

    #[test]
    fn test_net_request_options() {
        let request: NetWageRequest = serde_json::from_str(
            r#"{
                "gross_base_wage": "2000000",
                "health_plan": {"type": "isapre", "plan_uf": "3.5"},
                "other_taxable_allowances": "50000",
                "effective_date": "2025-03-01"
            }"#,
        )
        .unwrap();

        let options = request.options();
        assert_eq!(options.health_plan, HealthPlan::Isapre { plan_uf: dec!(3.5) });
        assert_eq!(options.other_taxable_allowances, dec!(50000));
        assert_eq!(request.effective_date, NaiveDate::from_ymd_opt(2025, 3, 1));
    }

    #[test]
    fn test_projection_request_requires_age() {
        let result: Result<ProjectionRequest, _> = serde_json::from_str(
            r#"{"gross_base_wage": "1000000", "years_of_service": "5"}"#,
        );
        assert!(result.is_err());
    }
}
