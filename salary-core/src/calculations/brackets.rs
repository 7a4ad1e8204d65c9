//! Piecewise-progressive accumulation over a [`BracketTable`].

use rust_decimal::Decimal;
use tracing::warn;

use crate::models::BracketTable;

/// Sums the levy on `amount` across the brackets of `table`.
///
/// Each bracket below the amount's own bracket contributes its full span
/// times its rate; the amount's bracket contributes the part of the amount
/// above the previous upper bound. An amount at or beyond the last upper
/// bound only collects the fully consumed brackets.
///
/// Negative amounts are not rejected: they fall into the first bracket and
/// produce a negative contribution.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use salary_core::calculations::accumulate;
/// use salary_core::tables::INCOME_TAX_TABLE;
///
/// assert_eq!(accumulate(dec!(1000), &INCOME_TAX_TABLE), dec!(90));
/// assert_eq!(accumulate(dec!(20000), &INCOME_TAX_TABLE), dec!(3100));
/// ```
pub fn accumulate(
    amount: Decimal,
    table: &BracketTable<'_>,
) -> Decimal {
    debug_assert!(table.is_well_formed(), "malformed bracket table");

    let mut total = Decimal::ZERO;
    let mut previous_bound = Decimal::ZERO;

    for bracket in table.brackets() {
        if amount < bracket.upper_bound {
            return total + (amount - previous_bound) * bracket.rate;
        }
        total += (bracket.upper_bound - previous_bound) * bracket.rate;
        previous_bound = bracket.upper_bound;
    }

    warn!(
        amount = %amount,
        ceiling = %previous_bound,
        "Amount reaches past the last bracket; excess is not levied"
    );
    total
}
