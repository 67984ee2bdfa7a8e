//! Calculation logic for the wage engine.
//!
//! This module contains the progressive income tax, the legal gratuity,
//! social security contributions, the gross-to-net pipeline and its inverse
//! bisection search, severance pay with its retirement projection, and the
//! parallel batch runner.

mod batch;
mod gratuity;
mod gross_search;
mod income_tax;
mod limits;
mod net_wage;
mod retirement_projection;
mod severance;
mod social_security;

pub use batch::calculate_batch;
pub use gratuity::{GRATUITY_LEGAL_REF, GratuityResult, compute_gratuity};
pub use gross_search::{
    DEFAULT_PRECISION, SEARCH_UPPER_MULTIPLIER, gross_from_net, search_gross_from_net,
};
pub use income_tax::{compute_tax, find_bracket};
pub use limits::{MAX_AMOUNT, MAX_YEARS_OF_SERVICE, MIN_PRECISION};
pub use net_wage::{BELOW_MINIMUM_WAGE, net_from_gross};
pub use retirement_projection::project_to_retirement;
pub use severance::{SEVERANCE_LEGAL_REF, compute_severance, severance_tier};
pub use social_security::{SocialSecurityResult, compute_social_security};
