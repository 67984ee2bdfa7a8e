//! Employee record model for batch calculations.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{HealthPlan, ProjectionResult, SeveranceResult, WageCalculationResult};

/// One employee's compensation data, as fed to a batch run.
///
/// # Example
///
/// ```
/// use wage_engine::models::EmployeeRecord;
///
/// let record: EmployeeRecord = serde_json::from_str(r#"{
///     "employee_id": "12345678-9",
///     "gross_base_wage": "1500000",
///     "years_of_service": "7.5"
/// }"#).unwrap();
/// assert!(record.current_age.is_none());
/// assert!(!record.has_non_compete_clause);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    /// Identifier of the employee (typically the RUT).
    pub employee_id: String,
    /// Monthly gross base wage.
    pub gross_base_wage: Decimal,
    /// Fractional years of service.
    pub years_of_service: Decimal,
    /// Age in years; enables the retirement projection when present.
    #[serde(default)]
    pub current_age: Option<Decimal>,
    /// Whether the contract carries a non-compete clause.
    #[serde(default)]
    pub has_non_compete_clause: bool,
    /// Health contribution path.
    #[serde(default)]
    pub health_plan: HealthPlan,
}

/// The result of a batch run for one employee record.
///
/// Either all of `wage` and `severance` are present, or `error` explains
/// why the record was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchEntry {
    /// Identifier copied from the record.
    pub employee_id: String,
    /// Net pay breakdown.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wage: Option<WageCalculationResult>,
    /// Severance as of today.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severance: Option<SeveranceResult>,
    /// Severance projected to retirement, when an age was given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projection: Option<ProjectionResult>,
    /// Why the record was rejected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BatchEntry {
    /// Returns true if the record was calculated successfully.
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}
