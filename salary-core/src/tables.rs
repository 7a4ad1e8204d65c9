//! The fixed Greek table set used by the default calculators.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{BracketTable, ReductionTable, TaxBracket};

/// Upper bound of the last bracket in every table.
pub const NO_LIMIT: Decimal = dec!(100000000);

const INCOME_TAX_BRACKETS: [TaxBracket; 5] = [
    TaxBracket::new(dec!(10000), dec!(0.09)),
    TaxBracket::new(dec!(20000), dec!(0.22)),
    TaxBracket::new(dec!(30000), dec!(0.28)),
    TaxBracket::new(dec!(40000), dec!(0.36)),
    TaxBracket::new(NO_LIMIT, dec!(0.44)),
];

const EISFORA_BRACKETS: [TaxBracket; 7] = [
    TaxBracket::new(dec!(12000), dec!(0)),
    TaxBracket::new(dec!(20000), dec!(0.022)),
    TaxBracket::new(dec!(30000), dec!(0.05)),
    TaxBracket::new(dec!(40000), dec!(0.065)),
    TaxBracket::new(dec!(65000), dec!(0.075)),
    TaxBracket::new(dec!(220000), dec!(0.09)),
    TaxBracket::new(NO_LIMIT, dec!(0.1)),
];

const REDUCTION_PER_KIDS: [Decimal; 5] = [
    dec!(777),
    dec!(810),
    dec!(900),
    dec!(1120),
    dec!(1340),
];

/// Progressive income tax.
pub const INCOME_TAX_TABLE: BracketTable<'static> = BracketTable::new(&INCOME_TAX_BRACKETS);

/// Solidarity contribution.
pub const EISFORA_TABLE: BracketTable<'static> = BracketTable::new(&EISFORA_BRACKETS);

/// Reduction by number of children, phased out by 20 for every 1000 of
/// taxable salary above 12000 for families with fewer than five children.
pub const REDUCTION_TABLE: ReductionTable<'static> = ReductionTable {
    per_kids: &REDUCTION_PER_KIDS,
    per_extra_kid: dec!(220),
    phase_out_threshold: dec!(12000),
    phase_out_step: dec!(1000),
    phase_out_amount: dec!(20),
    phase_out_exempt_kids: 5,
};
