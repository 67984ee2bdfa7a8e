//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading legal
//! parameter sets from YAML files.

use chrono::NaiveDate;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::{JurisdictionMetadata, LegalParameters};

/// Loads and provides access to the legal parameter sets of a jurisdiction.
///
/// The `ConfigLoader` reads YAML configuration files from a directory,
/// validates every parameter set and selects the one in force on a date.
///
/// # Directory Structure
///
/// ```text
/// config/cl/
/// ├── jurisdiction.yaml    # Jurisdiction metadata
/// └── periods/
///     ├── 2025-01-01.yaml  # Parameters effective from this date
///     └── 2025-08-01.yaml
/// ```
///
/// # Example
///
/// ```no_run
/// use wage_engine::config::ConfigLoader;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config/cl").unwrap();
///
/// let date = NaiveDate::from_ymd_opt(2025, 9, 15).unwrap();
/// let params = loader.parameters_for(date).unwrap();
/// println!("UF value: {}", params.uf_value);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    metadata: JurisdictionMetadata,
    /// Sorted oldest first.
    periods: Vec<LegalParameters>,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/cl")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - Any parameter set fails [`LegalParameters::validate`]
    /// - Two parameter sets share an effective date
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<JurisdictionMetadata>(&path.join("jurisdiction.yaml"))?;
        let periods = Self::load_periods(&path.join("periods"))?;

        Self::from_parts(metadata, periods)
    }

    /// Builds a loader from already-constructed parameter sets.
    ///
    /// Every set is validated and the sets are sorted by effective date.
    /// At least one set is required, and no two may share an effective date.
    pub fn from_parts(
        metadata: JurisdictionMetadata,
        periods: Vec<LegalParameters>,
    ) -> EngineResult<Self> {
        if periods.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no parameter sets provided)", metadata.code),
            });
        }

        for params in &periods {
            params.validate()?;
        }

        let mut periods = periods;
        periods.sort_by(|a, b| a.effective_date.cmp(&b.effective_date));

        if let Some(pair) = periods
            .windows(2)
            .find(|pair| pair[0].effective_date == pair[1].effective_date)
        {
            return Err(EngineError::InvalidParameters {
                effective_date: pair[1].effective_date,
                message: "more than one parameter set has this effective date".to_string(),
            });
        }

        debug!(
            jurisdiction = %metadata.code,
            periods = periods.len(),
            "Loaded legal parameter sets"
        );

        Ok(Self { metadata, periods })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads all parameter files from the periods directory.
    fn load_periods(periods_dir: &Path) -> EngineResult<Vec<LegalParameters>> {
        let periods_dir_str = periods_dir.display().to_string();

        let entries = fs::read_dir(periods_dir).map_err(|_| EngineError::ConfigNotFound {
            path: periods_dir_str.clone(),
        })?;

        let mut periods = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: periods_dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                periods.push(Self::load_yaml::<LegalParameters>(&path)?);
            }
        }

        if periods.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no parameter files found)", periods_dir_str),
            });
        }

        Ok(periods)
    }

    /// Returns the jurisdiction metadata.
    pub fn jurisdiction(&self) -> &JurisdictionMetadata {
        &self.metadata
    }

    /// Returns every loaded parameter set, oldest first.
    pub fn periods(&self) -> &[LegalParameters] {
        &self.periods
    }

    /// Returns the parameter set in force on `date`.
    ///
    /// That is the most recent set whose effective date is on or before
    /// `date`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ParametersNotFound`] if `date` precedes every
    /// loaded set.
    pub fn parameters_for(&self, date: NaiveDate) -> EngineResult<&LegalParameters> {
        self.periods
            .iter()
            .rfind(|p| p.effective_date <= date)
            .ok_or(EngineError::ParametersNotFound { date })
    }

    /// Returns the newest parameter set.
    pub fn latest(&self) -> &LegalParameters {
        // non-empty, enforced by `from_parts`
        &self.periods[self.periods.len() - 1]
    }
}
