//! Domain models for the wage engine.
//!
//! This module contains the value types produced and consumed by the
//! calculators. None of them is persisted; each is the pure output of a
//! single calculation.

mod audit;
mod employee_record;
mod severance;
mod wage;

pub use audit::{AuditStep, AuditTrace, AuditWarning};
pub use employee_record::{BatchEntry, EmployeeRecord};
pub use severance::{ProjectionResult, SeveranceResult, SeveranceTier};
pub use wage::{GrossSearchResult, HealthPlan, WageCalculationResult, WageOptions};
