//! Batch calculation over many employee records.
//!
//! Records are processed in parallel with rayon. Output order matches input
//! order, and a record that fails validation yields an entry with `error`
//! set instead of aborting the run.

use rayon::prelude::*;
use tracing::{info, warn};

use crate::config::LegalParameters;
use crate::error::EngineResult;
use crate::models::{BatchEntry, EmployeeRecord, WageOptions};

use super::net_wage::net_from_gross;
use super::retirement_projection::project_to_retirement;
use super::severance::compute_severance;

/// Runs the net wage, severance and (when an age is given) retirement
/// projection calculations for every record.
///
/// # Examples
///
/// ```
/// use wage_engine::calculation::calculate_batch;
/// use wage_engine::config::ConfigLoader;
/// use wage_engine::models::{EmployeeRecord, HealthPlan};
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("config/cl").unwrap();
/// let records = vec![EmployeeRecord {
///     employee_id: "1".to_string(),
///     gross_base_wage: Decimal::from(1_000_000),
///     years_of_service: Decimal::from(10),
///     current_age: None,
///     has_non_compete_clause: false,
///     health_plan: HealthPlan::Fonasa,
/// }];
///
/// let entries = calculate_batch(&records, loader.latest());
/// assert!(entries[0].is_ok());
/// assert!(entries[0].projection.is_none());
/// ```
pub fn calculate_batch(records: &[EmployeeRecord], params: &LegalParameters) -> Vec<BatchEntry> {
    let entries: Vec<BatchEntry> = records
        .par_iter()
        .map(|record| match calculate_record(record, params) {
            Ok(entry) => entry,
            Err(e) => {
                warn!(employee_id = %record.employee_id, error = %e, "Batch record rejected");
                BatchEntry {
                    employee_id: record.employee_id.clone(),
                    wage: None,
                    severance: None,
                    projection: None,
                    error: Some(e.to_string()),
                }
            }
        })
        .collect();

    let failed = entries.iter().filter(|e| !e.is_ok()).count();
    info!(records = records.len(), failed, "Batch calculated");

    entries
}

fn calculate_record(record: &EmployeeRecord, params: &LegalParameters) -> EngineResult<BatchEntry> {
    let options = WageOptions {
        health_plan: record.health_plan,
        ..WageOptions::default()
    };
    let wage = net_from_gross(record.gross_base_wage, params, &options)?;
    let severance = compute_severance(
        record.gross_base_wage,
        record.years_of_service,
        record.has_non_compete_clause,
        params,
    )?;
    let projection = record
        .current_age
        .map(|age| {
            project_to_retirement(
                record.gross_base_wage,
                record.years_of_service,
                age,
                record.has_non_compete_clause,
                params,
            )
        })
        .transpose()?;

    Ok(BatchEntry {
        employee_id: record.employee_id.clone(),
        wage: Some(wage),
        severance: Some(severance),
        projection,
        error: None,
    })
}
