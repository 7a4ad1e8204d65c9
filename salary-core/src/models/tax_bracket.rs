use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One row of a progressive table: the rate applies to the part of an amount
/// between the previous row's upper bound (zero for the first row) and this
/// row's upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub upper_bound: Decimal,
    pub rate: Decimal,
}

impl TaxBracket {
    pub const fn new(
        upper_bound: Decimal,
        rate: Decimal,
    ) -> Self {
        Self { upper_bound, rate }
    }
}

/// An ordered sequence of [`TaxBracket`]s anchored at zero.
///
/// Upper bounds must be strictly increasing and the final bound acts as a
/// "no practical limit" sentinel. Tables are programming-time constants, so
/// this is a contract on the caller rather than something checked on every
/// calculation; [`BracketTable::is_well_formed`] exists for tests and debug
/// assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BracketTable<'a> {
    brackets: &'a [TaxBracket],
}

impl<'a> BracketTable<'a> {
    pub const fn new(brackets: &'a [TaxBracket]) -> Self {
        Self { brackets }
    }

    pub fn brackets(&self) -> &'a [TaxBracket] {
        self.brackets
    }

    /// Upper bound of the last bracket, if any.
    pub fn ceiling(&self) -> Option<Decimal> {
        self.brackets.last().map(|b| b.upper_bound)
    }

    /// Returns `true` when the table is non-empty, every upper bound is
    /// positive and strictly greater than the previous one, and every rate
    /// lies in `[0, 1]`.
    pub fn is_well_formed(&self) -> bool {
        if self.brackets.is_empty() {
            return false;
        }

        let mut previous = Decimal::ZERO;
        for bracket in self.brackets {
            if bracket.upper_bound <= previous {
                return false;
            }
            if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE {
                return false;
            }
            previous = bracket.upper_bound;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    const TWO_ROWS: [TaxBracket; 2] = [
        TaxBracket::new(dec!(100), dec!(0.1)),
        TaxBracket::new(dec!(200), dec!(0.2)),
    ];

    #[test]
    fn well_formed_table_is_accepted() {
        assert!(BracketTable::new(&TWO_ROWS).is_well_formed());
    }

    #[test]
    fn empty_table_is_rejected() {
        assert!(!BracketTable::new(&[]).is_well_formed());
    }

    #[test]
    fn non_increasing_bounds_are_rejected() {
        let rows = [
            TaxBracket::new(dec!(200), dec!(0.1)),
            TaxBracket::new(dec!(200), dec!(0.2)),
        ];

        assert!(!BracketTable::new(&rows).is_well_formed());
    }

    #[test]
    fn rate_above_one_is_rejected() {
        let rows = [TaxBracket::new(dec!(100), dec!(1.5))];

        assert!(!BracketTable::new(&rows).is_well_formed());
    }

    #[test]
    fn ceiling_is_last_upper_bound() {
        assert_eq!(BracketTable::new(&TWO_ROWS).ceiling(), Some(dec!(200)));
        assert_eq!(BracketTable::new(&[]).ceiling(), None);
    }
}
