//! Severance models.
//!
//! This module contains the [`SeveranceResult`] produced by the severance
//! calculator and the [`ProjectionResult`] produced by the retirement
//! projection.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::AuditTrace;

/// Tenure band that determines the severance wage cap and countable years.
///
/// # Example
///
/// ```
/// use wage_engine::models::SeveranceTier;
///
/// assert_eq!(serde_json::to_string(&SeveranceTier::A).unwrap(), r#""A""#);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeveranceTier {
    /// From the eligibility threshold up to (excluding) tier B.
    A,
    /// From tier B's threshold up to (excluding) tier C.
    B,
    /// Tier C's threshold and beyond.
    C,
}

/// The outcome of a severance calculation for one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeveranceResult {
    /// Whether the employee has enough tenure for severance.
    pub eligible: bool,
    /// The tenure tier, or `None` when not eligible.
    pub tier: Option<SeveranceTier>,
    /// Years of service supplied.
    pub years_of_service: Decimal,
    /// Monthly wage cap applied, or `None` when uncapped.
    pub wage_cap: Option<Decimal>,
    /// Monthly wage after the cap.
    pub capped_base_wage: Decimal,
    /// Years counted after the tier's maximum.
    pub years_counted: Decimal,
    /// Severance before deductions.
    pub gross_severance: Decimal,
    /// Severance after the flat unemployment insurance deduction.
    pub net_severance: Decimal,
    /// Steps applied.
    pub audit_trace: AuditTrace,
}

/// The outcome of projecting severance to the retirement age.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// False when the employee is already at or past the retirement age.
    pub applicable: bool,
    /// Age supplied.
    pub current_age: Decimal,
    /// Retirement age from the parameter set.
    pub retirement_age: Decimal,
    /// Years of service added by the projection (zero if not applicable).
    pub years_to_add: Decimal,
    /// Severance as of today.
    pub current: SeveranceResult,
    /// Severance at retirement, when applicable.
    pub projected: Option<SeveranceResult>,
    /// Projected minus current gross severance.
    pub gross_delta: Decimal,
    /// Projected minus current net severance.
    pub net_delta: Decimal,
}
