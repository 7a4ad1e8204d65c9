use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Breakdown of a gross salary into taxes and net pay.
///
/// Every field is derived from `(salary, insurance, kids)`; the value is
/// recomputed on each call and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryParts {
    /// Gross salary minus insurance contributions.
    pub taxable_salary: Decimal,

    /// Income tax from the progressive tax table, before reductions.
    pub initial_tax: Decimal,

    /// Solidarity contribution from the eisfora table.
    pub eisfora: Decimal,

    /// Child-count based reduction, already phased out and floored at zero.
    pub reduction: Decimal,

    /// `initial_tax - reduction + eisfora`, rounded to cents.
    pub total_tax: Decimal,

    /// Gross salary minus total tax.
    pub net_salary: Decimal,
}
