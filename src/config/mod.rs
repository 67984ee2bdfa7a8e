//! Legal parameter configuration for the wage engine.
//!
//! This module provides functionality to load per-period legal parameter
//! sets (rates, caps, UF value and the withholding tax table) from YAML
//! files, so a new tax table or UF value is a configuration change rather
//! than a code change.
//!
//! # Example
//!
//! ```no_run
//! use wage_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/cl").unwrap();
//! println!("Loaded jurisdiction: {}", config.jurisdiction().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    GratuityParameters, ImposableCaps, JurisdictionMetadata, LegalParameters,
    SeveranceParameters, TaxBaseConvention, TaxBracket, UnemploymentInsuranceRates,
};

#[cfg(test)]
pub(crate) use types::fixtures;
