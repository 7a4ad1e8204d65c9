//! Gross salary search for a target net salary.
//!
//! Net salary is piecewise linear and strictly increasing in gross salary,
//! so the inverse is found with a safeguarded Newton iteration: the local
//! slope is measured with a one-unit forward difference, and any step that
//! leaves the current bracket of known-low and known-high candidates falls
//! back to bisection (or to doubling while no high candidate exists yet).
//! Within a single linear segment a Newton step lands on the answer, so the
//! search usually finishes in one or two iterations.
//!
//! Convergence is judged on the net salary residual, not on the gross step,
//! because total tax is rounded to cents.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use salary_core::calculations::{gross_for_net, SearchStatus};
//!
//! let result = gross_for_net(dec!(10000), dec!(0), 0, 1, 1).unwrap();
//!
//! assert_eq!(result.status, SearchStatus::Converged);
//! assert!((result.gross_salary - dec!(10157.69)).abs() < dec!(0.01));
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::calculations::salary::SalaryCalculator;

/// Largest supported number of decimal places of net salary accuracy.
pub const MAX_PRECISION: u32 = 10;

/// Gross salary step used to measure the local slope of net salary.
const SLOPE_STEP: Decimal = dec!(1);

/// Decimal places kept on each gross salary candidate.
const CANDIDATE_SCALE: u32 = 6;

/// Errors that can occur while setting up a gross-for-net search.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GrossForNetError {
    /// The requested precision cannot be represented.
    #[error("precision must be at most {MAX_PRECISION} decimal places, got {0}")]
    InvalidPrecision(u32),
}

/// Knobs for [`GrossForNetResolver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Number of decimal places of net salary accuracy. The search stops once
    /// `|net - target| <= 10^-precision`.
    pub precision: u32,

    /// Maximum number of candidates evaluated after the initial guess.
    pub max_iterations: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            precision: 2,
            max_iterations: 50,
        }
    }
}

impl SearchConfig {
    /// Validates the configuration values.
    ///
    /// # Errors
    ///
    /// Returns [`GrossForNetError::InvalidPrecision`] if `precision` exceeds
    /// [`MAX_PRECISION`].
    pub fn validate(&self) -> Result<(), GrossForNetError> {
        if self.precision > MAX_PRECISION {
            return Err(GrossForNetError::InvalidPrecision(self.precision));
        }
        Ok(())
    }

    /// Largest accepted distance between computed and target net salary.
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use salary_core::calculations::SearchConfig;
    ///
    /// let config = SearchConfig { precision: 1, max_iterations: 10 };
    /// assert_eq!(config.tolerance(), dec!(0.1));
    /// ```
    pub fn tolerance(&self) -> Decimal {
        Decimal::new(1, self.precision.min(MAX_PRECISION))
    }
}

/// How a search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStatus {
    /// The net salary is within tolerance of the target.
    Converged,

    /// Even a gross salary of zero yields more than the target net salary,
    /// so zero is returned.
    BelowFloor,

    /// The iteration cap was reached; the closest candidate is returned.
    MaxIterations,
}

/// Outcome of a gross-for-net search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrossForNetResult {
    /// The gross salary found.
    pub gross_salary: Decimal,

    /// Net salary produced by `gross_salary`.
    pub net_salary: Decimal,

    /// `net_salary - target`.
    pub residual: Decimal,

    /// Number of candidates evaluated after the initial guess.
    pub iterations: u32,

    pub status: SearchStatus,
}

impl GrossForNetResult {
    pub fn converged(&self) -> bool {
        self.status == SearchStatus::Converged
    }
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    gross: Decimal,
    net: Decimal,
    residual: Decimal,
}

/// Inverts [`SalaryCalculator::compute_parts`] for a fixed insurance amount
/// and number of children.
#[derive(Debug, Clone, Copy)]
pub struct GrossForNetResolver<'a> {
    calculator: SalaryCalculator<'a>,
    config: SearchConfig,
}

impl<'a> GrossForNetResolver<'a> {
    pub fn new(
        calculator: SalaryCalculator<'a>,
        config: SearchConfig,
    ) -> Self {
        Self { calculator, config }
    }

    /// Finds the gross salary whose net salary matches `target_net`.
    ///
    /// Gross salary is never searched below zero. If the net salary at zero
    /// gross already exceeds the target, the result is zero with
    /// [`SearchStatus::BelowFloor`]. When the iteration cap is reached the
    /// candidate with the smallest residual is returned with
    /// [`SearchStatus::MaxIterations`].
    ///
    /// # Errors
    ///
    /// Returns [`GrossForNetError`] if the search configuration is invalid.
    pub fn resolve(
        &self,
        target_net: Decimal,
        insurance: Decimal,
        kids: u32,
    ) -> Result<GrossForNetResult, GrossForNetError> {
        self.config.validate()?;
        let tolerance = self.config.tolerance();
        let evaluate = |gross: Decimal| self.evaluate(gross, target_net, insurance, kids);

        let floor = evaluate(Decimal::ZERO);
        if floor.residual >= -tolerance {
            let status = if floor.residual <= tolerance {
                SearchStatus::Converged
            } else {
                SearchStatus::BelowFloor
            };
            debug!(
                target_net = %target_net,
                floor_net = %floor.net,
                ?status,
                "Target net salary is reached at zero gross"
            );
            return Ok(Self::finish(floor, 0, status));
        }

        let mut lower = Decimal::ZERO;
        let mut upper: Option<Decimal> = None;
        let mut current = evaluate(target_net);
        let mut best = current;
        let mut iterations = 0;

        loop {
            if current.residual.abs() <= tolerance {
                return Ok(Self::finish(current, iterations, SearchStatus::Converged));
            }
            if iterations >= self.config.max_iterations {
                warn!(
                    target_net = %target_net,
                    gross = %best.gross,
                    residual = %best.residual,
                    iterations,
                    "Gross-for-net search did not converge; returning closest candidate"
                );
                return Ok(Self::finish(best, iterations, SearchStatus::MaxIterations));
            }

            if current.residual < Decimal::ZERO {
                lower = lower.max(current.gross);
            } else {
                upper = Some(upper.map_or(current.gross, |u| u.min(current.gross)));
            }

            let Some(next) = self.next_gross(&current, lower, upper, insurance, kids) else {
                warn!(
                    target_net = %target_net,
                    gross = %best.gross,
                    residual = %best.residual,
                    iterations,
                    "Next gross salary candidate is out of range; returning closest candidate"
                );
                return Ok(Self::finish(best, iterations, SearchStatus::MaxIterations));
            };
            current = evaluate(next);
            iterations += 1;

            debug!(
                iteration = iterations,
                gross = %current.gross,
                net = %current.net,
                residual = %current.residual,
                "Gross-for-net step"
            );

            if current.residual.abs() < best.residual.abs() {
                best = current;
            }
        }
    }

    fn evaluate(
        &self,
        gross: Decimal,
        target_net: Decimal,
        insurance: Decimal,
        kids: u32,
    ) -> Candidate {
        let net = self.calculator.breakdown(gross, insurance, kids).net_salary;
        Candidate {
            gross,
            net,
            residual: net - target_net,
        }
    }

    /// Picks the next candidate: a Newton step when it stays strictly inside
    /// `(lower, upper)`, otherwise bisection, or doubling while `upper` is
    /// unknown. Returns `None` when the candidate would not fit in a
    /// [`Decimal`].
    fn next_gross(
        &self,
        current: &Candidate,
        lower: Decimal,
        upper: Option<Decimal>,
        insurance: Decimal,
        kids: u32,
    ) -> Option<Decimal> {
        let ahead = self
            .calculator
            .breakdown(current.gross.checked_add(SLOPE_STEP)?, insurance, kids)
            .net_salary;
        let slope = (ahead - current.net) / SLOPE_STEP;

        let newton = if slope > Decimal::ZERO {
            current
                .residual
                .checked_div(slope)
                .and_then(|step| current.gross.checked_sub(step))
                .map(|gross| gross.round_dp(CANDIDATE_SCALE))
        } else {
            None
        };

        match (newton, upper) {
            (Some(step), Some(upper)) if step > lower && step < upper => Some(step),
            (Some(step), None) if step > lower => Some(step),
            (_, Some(upper)) => {
                Some((lower + (upper - lower) / Decimal::TWO).round_dp(CANDIDATE_SCALE))
            }
            (_, None) => current.gross.max(Decimal::ONE).checked_mul(Decimal::TWO),
        }
    }

    fn finish(
        candidate: Candidate,
        iterations: u32,
        status: SearchStatus,
    ) -> GrossForNetResult {
        GrossForNetResult {
            gross_salary: candidate.gross,
            net_salary: candidate.net,
            residual: candidate.residual,
            iterations,
            status,
        }
    }
}

/// Finds the gross salary for `target_net` with the fixed Greek tables.
///
/// `precision` is the number of decimal places of net salary accuracy and
/// `max_iterations` caps the number of search steps.
///
/// # Errors
///
/// Returns [`GrossForNetError::InvalidPrecision`] if `precision` exceeds
/// [`MAX_PRECISION`].
pub fn gross_for_net(
    target_net: Decimal,
    insurance: Decimal,
    kids: u32,
    precision: u32,
    max_iterations: u32,
) -> Result<GrossForNetResult, GrossForNetError> {
    let config = SearchConfig {
        precision,
        max_iterations,
    };
    GrossForNetResolver::new(SalaryCalculator::greek(), config).resolve(target_net, insurance, kids)
}
