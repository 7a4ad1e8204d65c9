//! JSON shapes printed by the binary. Amounts are written as JSON numbers.

use rust_decimal::Decimal;
use salary_core::calculations::{GrossForNetResult, SearchStatus};
use salary_core::SalaryParts;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartsReport {
    #[serde(with = "rust_decimal::serde::float")]
    pub salary: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub insurance: Decimal,
    pub kids: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub taxable_salary: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub initial_tax: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub eisfora: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub reduction: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_tax: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub net_salary: Decimal,
}

impl PartsReport {
    pub fn new(
        salary: Decimal,
        insurance: Decimal,
        kids: u32,
        parts: SalaryParts,
    ) -> Self {
        Self {
            salary,
            insurance,
            kids,
            taxable_salary: parts.taxable_salary,
            initial_tax: parts.initial_tax,
            eisfora: parts.eisfora,
            reduction: parts.reduction,
            total_tax: parts.total_tax,
            net_salary: parts.net_salary,
        }
    }
}

/// Gross-for-net answer. `salary` carries the gross salary exactly as found,
/// so `net_salary` and `residual` describe that same amount.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrossReport {
    #[serde(with = "rust_decimal::serde::float")]
    pub salary: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub net_salary: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub residual: Decimal,
    pub iterations: u32,
    pub status: SearchStatus,
}

impl From<GrossForNetResult> for GrossReport {
    fn from(result: GrossForNetResult) -> Self {
        Self {
            salary: result.gross_salary,
            net_salary: result.net_salary,
            residual: result.residual,
            iterations: result.iterations,
            status: result.status,
        }
    }
}
