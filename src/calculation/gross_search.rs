//! Net-to-gross wage search.
//!
//! The forward pipeline is not invertible in closed form: the gratuity cap,
//! the UF caps and the bracket table all introduce kinks. Instead the gross
//! base wage is found by bisection over `[0, 3 * target_net_pay]`.
//!
//! ## Precondition
//!
//! Net pay must be non-decreasing in the gross base wage. This holds for a
//! validated parameter set (all rates are below 1 and the tax is continuous),
//! but it is assumed here, not checked. The upper end of the interval is
//! also assumed to yield at least the target net pay.

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

use crate::config::LegalParameters;
use crate::error::{EngineError, EngineResult};
use crate::models::{GrossSearchResult, WageOptions};

use super::limits::{MAX_AMOUNT, MIN_PRECISION};
use super::net_wage::{calculate_net, validate_wage_inputs};

/// Default bisection tolerance, in currency units.
pub const DEFAULT_PRECISION: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

/// Upper end of the search interval, as a multiple of the target net pay.
pub const SEARCH_UPPER_MULTIPLIER: Decimal = Decimal::from_parts(3, 0, 0, false, 0);

/// Finds the gross base wage that yields `target_net_pay`.
///
/// Bisection keeps an interval `[lower, upper]` with
/// `net(lower) < target <= net(upper)` and halves it until its width is at
/// most `precision`, then returns the midpoint rounded to whole currency
/// units (half away from zero). This takes
/// `ceil(log2(3 * target / precision))` iterations.
///
/// # Arguments
///
/// * `target_net_pay` - The desired monthly take-home pay
/// * `precision` - Maximum width of the final interval (see
///   [`DEFAULT_PRECISION`])
/// * `params` - The legal parameter set in force
/// * `options` - Health plan and extra taxable allowances
///
/// # Returns
///
/// A [`GrossSearchResult`] with the gross base wage, the iteration count and
/// the forward calculation at that wage. A target of zero or less returns a
/// gross base wage of zero without iterating.
///
/// # Errors
///
/// Returns [`EngineError::InvalidArgument`] if `precision` is below
/// [`MIN_PRECISION`], `target_net_pay` exceeds [`MAX_AMOUNT`], or the
/// options are invalid.
///
/// # Examples
///
/// ```
/// use wage_engine::calculation::{search_gross_from_net, DEFAULT_PRECISION};
/// use wage_engine::config::ConfigLoader;
/// use wage_engine::models::WageOptions;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("config/cl").unwrap();
/// let params = loader.latest();
/// let target = Decimal::from(1_000_000);
///
/// let result = search_gross_from_net(target, DEFAULT_PRECISION, params, &WageOptions::default()).unwrap();
///
/// assert!((result.achieved.net_pay - target).abs() <= DEFAULT_PRECISION);
/// assert_eq!(result.iterations, 15);
/// ```
pub fn search_gross_from_net(
    target_net_pay: Decimal,
    precision: Decimal,
    params: &LegalParameters,
    options: &WageOptions,
) -> EngineResult<GrossSearchResult> {
    if precision <= Decimal::ZERO {
        return Err(EngineError::invalid_argument(
            "precision",
            format!("must be greater than zero, got {}", precision),
        ));
    }
    if precision < MIN_PRECISION {
        return Err(EngineError::invalid_argument(
            "precision",
            format!("must be at least {}, got {}", MIN_PRECISION, precision),
        ));
    }
    if target_net_pay > MAX_AMOUNT {
        return Err(EngineError::invalid_argument(
            "target_net_pay",
            format!("must not exceed {}, got {}", MAX_AMOUNT, target_net_pay),
        ));
    }
    validate_wage_inputs(Decimal::ZERO, options)?;

    if target_net_pay <= Decimal::ZERO {
        return Ok(GrossSearchResult {
            target_net_pay,
            precision,
            gross_base_wage: Decimal::ZERO,
            iterations: 0,
            achieved: calculate_net(Decimal::ZERO, params, options),
        });
    }

    let mut lower = Decimal::ZERO;
    let mut upper = target_net_pay * SEARCH_UPPER_MULTIPLIER;
    let mut iterations: u32 = 0;

    while upper - lower > precision {
        let midpoint = (lower + upper) / Decimal::TWO;
        let net_pay = calculate_net(midpoint, params, options).net_pay;

        if net_pay < target_net_pay {
            lower = midpoint;
        } else {
            upper = midpoint;
        }
        iterations += 1;

        debug!(
            iteration = iterations,
            midpoint = %midpoint,
            net_pay = %net_pay,
            lower = %lower,
            upper = %upper,
            "Bisection step"
        );
    }

    let gross_base_wage = ((lower + upper) / Decimal::TWO)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let achieved = calculate_net(gross_base_wage, params, options);

    debug!(
        target_net_pay = %target_net_pay,
        gross_base_wage = %gross_base_wage,
        achieved_net_pay = %achieved.net_pay,
        iterations,
        "Gross base wage found"
    );

    Ok(GrossSearchResult {
        target_net_pay,
        precision,
        gross_base_wage,
        iterations,
        achieved,
    })
}

/// Returns only the gross base wage that yields `target_net_pay`.
///
/// See [`search_gross_from_net`] for the algorithm, preconditions and errors.
///
/// # Examples
///
/// ```
/// use wage_engine::calculation::{gross_from_net, DEFAULT_PRECISION};
/// use wage_engine::config::ConfigLoader;
/// use wage_engine::models::WageOptions;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("config/cl").unwrap();
/// let gross = gross_from_net(Decimal::ZERO, DEFAULT_PRECISION, loader.latest(), &WageOptions::default()).unwrap();
/// assert_eq!(gross, Decimal::ZERO);
/// ```
pub fn gross_from_net(
    target_net_pay: Decimal,
    precision: Decimal,
    params: &LegalParameters,
    options: &WageOptions,
) -> EngineResult<Decimal> {
    search_gross_from_net(target_net_pay, precision, params, options).map(|r| r.gross_base_wage)
}
