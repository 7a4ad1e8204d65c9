//! Command handlers shared by the binary and the integration tests.

use std::path::Path;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use salary_core::calculations::{GrossForNetResolver, SearchConfig};
use salary_core::SalaryCalculator;
use tracing::{debug, info, warn};

use crate::batch;
use crate::report::{GrossReport, PartsReport};

/// Gross to net breakdown.
pub fn parts(
    salary: Decimal,
    insurance: Decimal,
    kids: u32,
) -> PartsReport {
    debug!(%salary, %insurance, kids, "computing salary parts");
    let parts = SalaryCalculator::greek().compute_parts(salary, insurance, kids);
    PartsReport::new(salary, insurance, kids, parts)
}

/// Net to gross search.
pub fn gross(
    net: Decimal,
    insurance: Decimal,
    kids: u32,
    config: SearchConfig,
) -> Result<GrossReport> {
    debug!(%net, %insurance, kids, ?config, "searching gross salary");
    let result = GrossForNetResolver::new(SalaryCalculator::greek(), config)
        .resolve(net, insurance, kids)
        .context("gross-for-net search rejected its configuration")?;

    if !result.converged() {
        warn!(
            status = ?result.status,
            residual = %result.residual,
            "returning approximate gross salary"
        );
    }
    Ok(GrossReport::from(result))
}

/// Breakdowns for every row of a CSV file.
pub fn batch(path: &Path) -> Result<Vec<PartsReport>> {
    let inputs = batch::load_from_file(path)
        .with_context(|| format!("failed to load batch file: {}", path.display()))?;
    info!(rows = inputs.len(), file = %path.display(), "loaded batch input");
    Ok(batch::compute_all(&SalaryCalculator::greek(), &inputs))
}
