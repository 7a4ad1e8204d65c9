//! Gross to net salary breakdown.
//!
//! # Computation
//!
//! | Step | Value |
//! |------|-------|
//! | 1    | Taxable salary: salary minus insurance |
//! | 2    | Initial tax: income tax table over taxable salary |
//! | 3    | Eisfora: solidarity table over taxable salary |
//! | 4    | Reduction: child-count reduction, phased out by taxable salary |
//! | 5    | Total tax: Step 2 - Step 4 + Step 3, rounded to cents |
//! | 6    | Net salary: salary minus Step 5 |
//!
//! No step is floored: insurance above the salary gives a negative taxable
//! salary, and a reduction larger than the tax gives a negative total tax.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use salary_core::calculations::SalaryCalculator;
//!
//! let parts = SalaryCalculator::greek().compute_parts(dec!(100000), dec!(2000), 0);
//!
//! assert_eq!(parts.taxable_salary, dec!(98000));
//! assert_eq!(parts.total_tax, dec!(41191));
//! assert_eq!(parts.net_salary, dec!(58809));
//! ```

use rust_decimal::Decimal;
use tracing::warn;

use crate::calculations::brackets::accumulate;
use crate::calculations::common::round_half_up;
use crate::calculations::reduction::reduction;
use crate::models::{BracketTable, ReductionTable, SalaryParts};
use crate::tables::{EISFORA_TABLE, INCOME_TAX_TABLE, REDUCTION_TABLE};

/// Calculator for [`SalaryParts`] over a fixed set of tables.
#[derive(Debug, Clone, Copy)]
pub struct SalaryCalculator<'a> {
    income_tax: BracketTable<'a>,
    eisfora: BracketTable<'a>,
    reductions: ReductionTable<'a>,
}

impl<'a> SalaryCalculator<'a> {
    pub fn new(
        income_tax: BracketTable<'a>,
        eisfora: BracketTable<'a>,
        reductions: ReductionTable<'a>,
    ) -> Self {
        Self {
            income_tax,
            eisfora,
            reductions,
        }
    }

    /// Breaks `salary` down into taxes and net pay.
    ///
    /// Logs a warning when `insurance` exceeds `salary`.
    pub fn compute_parts(
        &self,
        salary: Decimal,
        insurance: Decimal,
        kids: u32,
    ) -> SalaryParts {
        let parts = self.breakdown(salary, insurance, kids);
        if parts.taxable_salary < Decimal::ZERO {
            warn!(
                salary = %salary,
                insurance = %insurance,
                taxable = %parts.taxable_salary,
                "Insurance exceeds salary; taxable salary is negative"
            );
        }
        parts
    }

    /// [`Self::compute_parts`] without input warnings, for candidate salaries
    /// generated by a search rather than supplied by a caller.
    pub(crate) fn breakdown(
        &self,
        salary: Decimal,
        insurance: Decimal,
        kids: u32,
    ) -> SalaryParts {
        let taxable_salary = salary - insurance;
        let initial_tax = accumulate(taxable_salary, &self.income_tax);
        let eisfora = accumulate(taxable_salary, &self.eisfora);
        let reduction = reduction(taxable_salary, kids, &self.reductions);
        let total_tax = round_half_up(initial_tax - reduction + eisfora);

        SalaryParts {
            taxable_salary,
            initial_tax,
            eisfora,
            reduction,
            total_tax,
            net_salary: salary - total_tax,
        }
    }
}

impl SalaryCalculator<'static> {
    /// Calculator backed by the fixed tables in [`crate::tables`].
    pub const fn greek() -> Self {
        Self {
            income_tax: INCOME_TAX_TABLE,
            eisfora: EISFORA_TABLE,
            reductions: REDUCTION_TABLE,
        }
    }
}

impl Default for SalaryCalculator<'static> {
    fn default() -> Self {
        Self::greek()
    }
}

/// Computes [`SalaryParts`] with the fixed Greek tables.
pub fn compute_parts(
    salary: Decimal,
    insurance: Decimal,
    kids: u32,
) -> SalaryParts {
    SalaryCalculator::greek().compute_parts(salary, insurance, kids)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use tracing::Level;

    use super::*;
    use crate::models::TaxBracket;
    use crate::test_support::EventRecorder;

    #[test]
    fn eisfora_at_twenty_thousand_gross() {
        let parts = compute_parts(dec!(20000), dec!(0), 0);

        assert_eq!(parts.eisfora, dec!(176));
    }

    #[test]
    fn full_breakdown_with_insurance() {
        let parts = compute_parts(dec!(100000), dec!(2000), 0);

        assert_eq!(
            parts,
            SalaryParts {
                taxable_salary: dec!(98000),
                initial_tax: dec!(35020),
                eisfora: dec!(6171),
                reduction: dec!(0),
                total_tax: dec!(41191),
                net_salary: dec!(58809),
            }
        );
    }

    #[test]
    fn low_salary_reduction_exceeds_tax() {
        let parts = compute_parts(dec!(5000), dec!(0), 0);

        // 450 - 777
        assert_eq!(parts.total_tax, dec!(-327));
        assert_eq!(parts.net_salary, dec!(5327));
    }

    #[test]
    fn total_tax_is_rounded_to_cents() {
        // 900 + 157.69 * 0.22 - 777 = 157.6918
        let parts = compute_parts(dec!(10157.69), dec!(0), 0);

        assert_eq!(parts.initial_tax, dec!(934.6918));
        assert_eq!(parts.total_tax, dec!(157.69));
        assert_eq!(parts.net_salary, dec!(10000.00));
    }

    #[test]
    fn kids_phase_out_in_mid_range() {
        // taxable 25000: tax 900 + 2200 + 1400 = 4500, eisfora 176 + 250 = 426,
        // reduction 900 - 13 * 20 = 640
        let parts = compute_parts(dec!(27000), dec!(2000), 2);

        assert_eq!(parts.initial_tax, dec!(4500));
        assert_eq!(parts.eisfora, dec!(426));
        assert_eq!(parts.reduction, dec!(640));
        assert_eq!(parts.total_tax, dec!(4286));
        assert_eq!(parts.net_salary, dec!(22714));
    }

    #[test]
    fn insurance_above_salary_flows_through() {
        let recorder = EventRecorder::default();

        let parts = recorder.record(|| compute_parts(dec!(1000), dec!(3000), 0));

        assert_eq!(recorder.count(Level::WARN), 1);

        assert_eq!(parts.taxable_salary, dec!(-2000));
        assert_eq!(parts.initial_tax, dec!(-180));
        assert_eq!(parts.eisfora, dec!(0));
        assert_eq!(parts.reduction, dec!(777));
        assert_eq!(parts.total_tax, dec!(-957));
        assert_eq!(parts.net_salary, dec!(1957));
    }

    #[test]
    fn breakdown_matches_compute_parts_without_warning() {
        let calculator = SalaryCalculator::greek();
        let recorder = EventRecorder::default();

        let parts = recorder.record(|| calculator.breakdown(dec!(0), dec!(1500), 1));

        assert_eq!(parts, calculator.compute_parts(dec!(0), dec!(1500), 1));
        assert_eq!(recorder.count(Level::WARN), 0);
    }

    #[test]
    fn net_salary_increases_with_gross() {
        let calculator = SalaryCalculator::default();
        let mut previous = calculator.compute_parts(dec!(0), dec!(0), 1).net_salary;

        for step in 1..=300 {
            let gross = Decimal::from(step * 1000);
            let net = calculator.compute_parts(gross, dec!(0), 1).net_salary;
            assert!(net > previous, "net fell at gross {gross}");
            previous = net;
        }
    }

    #[test]
    fn custom_tables_are_honoured() {
        let flat = [TaxBracket::new(dec!(1000000), dec!(0.1))];
        let none = [TaxBracket::new(dec!(1000000), dec!(0))];
        let calculator = SalaryCalculator::new(
            BracketTable::new(&flat),
            BracketTable::new(&none),
            ReductionTable {
                per_kids: &[],
                ..REDUCTION_TABLE
            },
        );

        let parts = calculator.compute_parts(dec!(5000), dec!(1000), 3);

        assert_eq!(parts.total_tax, dec!(400));
        assert_eq!(parts.net_salary, dec!(4600));
    }
}
