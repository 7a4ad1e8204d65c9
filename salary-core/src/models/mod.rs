mod reduction_table;
mod salary_parts;
mod tax_bracket;

pub use reduction_table::ReductionTable;
pub use salary_parts::SalaryParts;
pub use tax_bracket::{BracketTable, TaxBracket};
