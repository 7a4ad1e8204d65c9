//! Child-count based tax reduction.

use rust_decimal::Decimal;

use crate::calculations::common::max;
use crate::models::ReductionTable;

/// Computes the reduction for a taxable salary and number of children.
///
/// The base amount comes from [`ReductionTable::base_reduction`]. When the
/// taxable salary is above the phase-out threshold and the family is not
/// exempt, the reduction drops by `phase_out_amount` per `phase_out_step`
/// of salary above the threshold (pro rata, not in whole steps). The
/// result never goes below zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use salary_core::calculations::reduction;
/// use salary_core::tables::REDUCTION_TABLE;
///
/// assert_eq!(reduction(dec!(1000), 0, &REDUCTION_TABLE), dec!(777));
/// assert_eq!(reduction(dec!(22000), 0, &REDUCTION_TABLE), dec!(577));
/// ```
pub fn reduction(
    taxable_salary: Decimal,
    kids: u32,
    table: &ReductionTable<'_>,
) -> Decimal {
    let mut amount = table.base_reduction(kids);

    if taxable_salary > table.phase_out_threshold && table.phases_out(kids) {
        let excess = taxable_salary - table.phase_out_threshold;
        amount -= excess / table.phase_out_step * table.phase_out_amount;
    }

    max(amount, Decimal::ZERO)
}
