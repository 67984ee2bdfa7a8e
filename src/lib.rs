//! Wage engine for Chilean payroll
//!
//! This crate converts monthly gross wages to net pay (and back, by
//! bisection), computes the progressive second-category withholding tax,
//! and calculates years-of-service severance with a projection to
//! retirement age. Legal parameters are loaded from YAML files, one set
//! per effective date.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
