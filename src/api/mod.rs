//! HTTP API module for the wage engine.
//!
//! This module provides the REST endpoints for gross/net wage conversion,
//! severance and its retirement projection, and batch runs.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    BatchRequest, GrossWageRequest, NetWageRequest, ProjectionRequest, SeveranceRequest,
};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
