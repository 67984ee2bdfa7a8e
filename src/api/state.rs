//! Application state for the wage engine API.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::config::{ConfigLoader, LegalParameters};
use crate::error::EngineResult;

/// Shared application state.
///
/// Holds the loaded legal parameter history, shared read-only across all
/// request handlers.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the parameter set for `effective_date`, or the latest one.
    pub fn parameters(&self, effective_date: Option<NaiveDate>) -> EngineResult<&LegalParameters> {
        match effective_date {
            Some(date) => self.config.parameters_for(date),
            None => Ok(self.config.latest()),
        }
    }
}
