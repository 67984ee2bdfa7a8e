//! Progressive withholding tax functionality.
//!
//! This module maps a monthly taxable base to the second-category
//! withholding tax (impuesto único de segunda categoría) using the bracket
//! table of a [`LegalParameters`](crate::config::LegalParameters) set.
//!
//! ## Formula
//!
//! Within the bracket that admits the base:
//! `tax = taxable_base * marginal_rate - rebate`, floored at zero.
//!
//! Rebates are chosen so the tax is continuous at every bracket boundary,
//! so moving one cent across a boundary changes the tax by a cent-sized
//! amount, not by a jump.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::TaxBracket;

/// Returns the bracket that applies to `taxable_base`.
///
/// Brackets are scanned in ascending order and the first one whose inclusive
/// upper bound admits the base is returned, so an amount exactly on a
/// boundary belongs to the lower bracket. Returns `None` for a base below
/// the first bracket's lower bound (i.e., negative) or an empty table.
///
/// # Examples
///
/// ```
/// use wage_engine::calculation::find_bracket;
/// use wage_engine::config::ConfigLoader;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let loader = ConfigLoader::load("config/cl").unwrap();
/// let brackets = &loader.latest().tax_brackets;
///
/// let at_boundary = find_bracket(Decimal::from_str("2059410.00").unwrap(), brackets).unwrap();
/// assert_eq!(at_boundary.marginal_rate, Decimal::from_str("0.04").unwrap());
///
/// let above = find_bracket(Decimal::from_str("2059410.01").unwrap(), brackets).unwrap();
/// assert_eq!(above.marginal_rate, Decimal::from_str("0.08").unwrap());
/// ```
pub fn find_bracket(taxable_base: Decimal, brackets: &[TaxBracket]) -> Option<&TaxBracket> {
    let first = brackets.first()?;
    if taxable_base < first.lower_bound {
        return None;
    }
    brackets.iter().find(|b| b.admits(taxable_base))
}

/// Computes the withholding tax owed on `taxable_base`.
///
/// # Arguments
///
/// * `taxable_base` - The monthly taxable base, after social security
///   contributions
/// * `brackets` - The ascending bracket table
///
/// # Returns
///
/// `taxable_base * marginal_rate - rebate` for the admitting bracket,
/// floored at zero. If no bracket admits the base, which a validated table
/// makes impossible for non-negative input, the tax is zero.
///
/// # Examples
///
/// ```
/// use wage_engine::calculation::compute_tax;
/// use wage_engine::config::ConfigLoader;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let loader = ConfigLoader::load("config/cl").unwrap();
/// let brackets = &loader.latest().tax_brackets;
///
/// // Exempt bracket
/// assert_eq!(compute_tax(Decimal::from(800_000), brackets), Decimal::ZERO);
///
/// // 4% bracket: 1,500,000 * 0.04 - 37,069.38
/// assert_eq!(
///     compute_tax(Decimal::from(1_500_000), brackets),
///     Decimal::from_str("22930.62").unwrap()
/// );
/// ```
pub fn compute_tax(taxable_base: Decimal, brackets: &[TaxBracket]) -> Decimal {
    let Some(bracket) = find_bracket(taxable_base, brackets) else {
        debug!(taxable_base = %taxable_base, "No tax bracket admits the base; tax is zero");
        return Decimal::ZERO;
    };

    let tax = taxable_base * bracket.marginal_rate - bracket.rebate;

    debug!(
        taxable_base = %taxable_base,
        marginal_rate = %bracket.marginal_rate,
        rebate = %bracket.rebate,
        tax = %tax,
        "Applied withholding tax bracket"
    );

    tax.max(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::fixtures::august_2025_brackets;
    use rust_decimal_macros::dec;

    #[test]
    fn test_zero_base_has_zero_tax() {
        assert_eq!(compute_tax(Decimal::ZERO, &august_2025_brackets()), Decimal::ZERO);
    }

    #[test]
    fn test_exempt_bracket_upper_edge() {
        let brackets = august_2025_brackets();
        assert_eq!(compute_tax(dec!(926734.50), &brackets), Decimal::ZERO);
    }

    #[test]
    fn test_continuity_at_exempt_boundary() {
        let brackets = august_2025_brackets();
        let below = compute_tax(dec!(926734.50), &brackets);
        let above = compute_tax(dec!(926734.51), &brackets);

        // 926,734.51 * 0.04 - 37,069.38 = 0.0004
        assert_eq!(above, dec!(0.0004));
        assert!((above - below).abs() <= Decimal::ONE);
    }

    #[test]
    fn test_four_percent_bracket_upper_edge() {
        let brackets = august_2025_brackets();
        assert_eq!(
            compute_tax(dec!(2059410.00), &brackets),
            dec!(2059410.00) * dec!(0.04) - dec!(37069.38)
        );
    }

    #[test]
    fn test_eight_percent_bracket_lower_edge() {
        let brackets = august_2025_brackets();
        assert_eq!(
            compute_tax(dec!(2059410.01), &brackets),
            dec!(2059410.01) * dec!(0.08) - dec!(119445.78)
        );
    }

    #[test]
    fn test_continuity_at_every_boundary() {
        let brackets = august_2025_brackets();
        for bracket in brackets.iter().filter_map(|b| b.upper_bound) {
            let below = compute_tax(bracket, &brackets);
            let above = compute_tax(bracket + dec!(0.01), &brackets);
            assert!(
                (above - below).abs() <= Decimal::ONE,
                "tax jumps at {}: {} -> {}",
                bracket,
                below,
                above
            );
        }
    }

    #[test]
    fn test_top_bracket_is_unbounded() {
        let brackets = august_2025_brackets();
        let base = dec!(100000000);
        assert_eq!(
            compute_tax(base, &brackets),
            base * dec!(0.40) - dec!(2664876.54)
        );
    }

    #[test]
    fn test_negative_base_has_zero_tax() {
        assert_eq!(compute_tax(dec!(-1000), &august_2025_brackets()), Decimal::ZERO);
        assert!(find_bracket(dec!(-1000), &august_2025_brackets()).is_none());
    }

    #[test]
    fn test_empty_table_has_zero_tax() {
        assert_eq!(compute_tax(dec!(5000000), &[]), Decimal::ZERO);
    }

    #[test]
    fn test_rounding_artifact_floored_at_zero() {
        // A rebate slightly larger than rate * lower edge must not yield negative tax.
        let brackets = vec![TaxBracket {
            lower_bound: Decimal::ZERO,
            upper_bound: None,
            marginal_rate: dec!(0.04),
            rebate: dec!(10),
        }];
        assert_eq!(compute_tax(dec!(100), &brackets), Decimal::ZERO);
    }
}
