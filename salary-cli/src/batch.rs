//! CSV batch input for salary breakdowns.
//!
//! ## CSV Format
//!
//! Headers are matched by name, so column order does not matter. Whitespace
//! around values is trimmed.
//!
//! | Column      | Required | Type    | Notes                         |
//! |-------------|----------|---------|-------------------------------|
//! | `salary`    | yes      | decimal | Gross salary, e.g. `24000.00` |
//! | `insurance` | no       | decimal | Empty cell means `0`          |
//! | `kids`      | no       | integer | Empty cell means `0`          |
//!
//! ```csv
//! salary,insurance,kids
//! 24000.00,1800.00,2
//! 100000,2000,
//! ```
use std::path::Path;

use rust_decimal::Decimal;
use salary_core::SalaryCalculator;
use serde::Deserialize;

use crate::report::PartsReport;

#[derive(Debug, Deserialize)]
struct CsvRow {
    salary: Decimal,
    insurance: Option<Decimal>,
    kids: Option<u32>,
}

/// One validated input row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SalaryInput {
    pub salary: Decimal,
    pub insurance: Decimal,
    pub kids: u32,
}

/// Errors that can occur while loading batch input.
#[derive(Debug, thiserror::Error)]
pub enum BatchLoadError {
    #[error("cannot read batch file: {0}")]
    Io(#[from] std::io::Error),

    /// Bad structure, missing `salary` column, or a value of the wrong type.
    #[error("CSV parse error on row {row}: {source}")]
    Parse {
        row: usize,
        #[source]
        source: csv::Error,
    },
}

/// Parses CSV text into inputs, in file order.
///
/// `row` in errors is 1-based and excludes the header.
pub fn load_from_str(input: &str) -> Result<Vec<SalaryInput>, BatchLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| {
            let row = result.map_err(|source| BatchLoadError::Parse {
                row: idx + 1,
                source,
            })?;
            Ok(SalaryInput {
                salary: row.salary,
                insurance: row.insurance.unwrap_or_default(),
                kids: row.kids.unwrap_or_default(),
            })
        })
        .collect()
}

/// Reads a file from disk and delegates to [`load_from_str`].
pub fn load_from_file(path: &Path) -> Result<Vec<SalaryInput>, BatchLoadError> {
    let contents = std::fs::read_to_string(path)?;
    load_from_str(&contents)
}

/// Computes a breakdown for every input row.
pub fn compute_all(
    calculator: &SalaryCalculator<'_>,
    inputs: &[SalaryInput],
) -> Vec<PartsReport> {
    inputs
        .iter()
        .map(|input| {
            let parts = calculator.compute_parts(input.salary, input.insurance, input.kids);
            PartsReport::new(input.salary, input.insurance, input.kids, parts)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    const FULL_CSV: &str = "\
salary,insurance,kids
24000.00,1800.00,2
100000,2000,0
";

    const SPARSE_CSV: &str = "\
kids,salary,insurance
,  15000 ,
3,8000,
";

    #[test]
    fn full_rows_parse_in_order() {
        let inputs = load_from_str(FULL_CSV).unwrap();

        assert_eq!(
            inputs,
            vec![
                SalaryInput {
                    salary: dec!(24000.00),
                    insurance: dec!(1800.00),
                    kids: 2,
                },
                SalaryInput {
                    salary: dec!(100000),
                    insurance: dec!(2000),
                    kids: 0,
                },
            ]
        );
    }

    #[test]
    fn empty_optional_cells_default_to_zero() {
        let inputs = load_from_str(SPARSE_CSV).unwrap();

        assert_eq!(inputs[0].salary, dec!(15000));
        assert_eq!(inputs[0].insurance, dec!(0));
        assert_eq!(inputs[0].kids, 0);
        assert_eq!(inputs[1].kids, 3);
    }

    #[test]
    fn header_only_yields_no_rows() {
        assert!(load_from_str("salary,insurance,kids\n").unwrap().is_empty());
    }

    #[test]
    fn invalid_amount_reports_row_number() {
        let csv = "salary,insurance,kids\n1000,0,0\nabc,0,0\n";

        let err = load_from_str(csv).unwrap_err();

        assert!(matches!(err, BatchLoadError::Parse { row: 2, .. }));
    }

    #[test]
    fn negative_kids_are_rejected() {
        let csv = "salary,insurance,kids\n1000,0,-1\n";

        assert!(load_from_str(csv).is_err());
    }

    #[test]
    fn compute_all_matches_single_calculation() {
        let inputs = load_from_str(FULL_CSV).unwrap();

        let reports = compute_all(&SalaryCalculator::greek(), &inputs);

        assert_eq!(reports.len(), 2);
        assert_eq!(reports[1].total_tax, dec!(41191));
        assert_eq!(reports[1].net_salary, dec!(58809));
    }
}
