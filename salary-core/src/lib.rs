pub mod calculations;
pub mod models;
pub mod tables;

#[cfg(test)]
mod test_support;

pub use calculations::{
    GrossForNetError, GrossForNetResult, SalaryCalculator, SearchConfig, SearchStatus,
    compute_parts, gross_for_net,
};
pub use models::*;
