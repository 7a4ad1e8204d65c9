//! Salary tax calculations.
//!
//! This module provides the progressive bracket accumulation, the child
//! reduction rule, the gross to net breakdown built on them, and the inverse
//! search from a net salary back to gross.

pub mod brackets;
pub mod common;
pub mod gross_for_net;
pub mod reduction;
pub mod salary;

pub use brackets::accumulate;
pub use gross_for_net::{
    GrossForNetError, GrossForNetResolver, GrossForNetResult, MAX_PRECISION, SearchConfig,
    SearchStatus, gross_for_net,
};
pub use reduction::reduction;
pub use salary::{SalaryCalculator, compute_parts};
