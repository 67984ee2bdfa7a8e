//! Input bounds shared by the calculators.
//!
//! Every monetary input is capped well below the range where `Decimal`
//! arithmetic overflows, so the pipelines never panic on a valid request.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};

/// Largest monetary input accepted (10^15 currency units).
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

/// Largest tenure accepted, in years.
pub const MAX_YEARS_OF_SERVICE: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

/// Smallest bisection tolerance accepted (one cent).
pub const MIN_PRECISION: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Rejects `value` unless it lies in `[0, max]`.
pub(crate) fn check_bounded(field: &str, value: Decimal, max: Decimal) -> EngineResult<()> {
    if value < Decimal::ZERO {
        return Err(EngineError::invalid_argument(
            field,
            format!("must not be negative, got {}", value),
        ));
    }
    if value > max {
        return Err(EngineError::invalid_argument(
            field,
            format!("must not exceed {}, got {}", max, value),
        ));
    }
    Ok(())
}
