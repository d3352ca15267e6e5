//! Estimate runner for batch and side-by-side calculator runs
//!
//! Loads assumptions once, then runs any number of estimates against them
//! without re-reading CSV files.

use crate::assumptions::RateAssumptions;
use crate::error::{AssumptionError, EstimateError};
use crate::estimate::{EstimationResult, Estimator};
use crate::policy::{CalculatorKind, PolicyInput, RawPolicyInput};
use rayon::prelude::*;

/// Pre-loaded runner for repeated estimates
///
/// # Example
/// ```ignore
/// let runner = EstimateRunner::from_csv()?;
///
/// // Same applicant priced under every calculator
/// for result in runner.run_all_kinds(&input)? {
///     println!("{}: {}", result.calculator, result.annual_premium);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct EstimateRunner {
    estimator: Estimator,
}

impl EstimateRunner {
    /// Create runner with default in-memory assumptions
    pub fn new() -> Self {
        Self::default()
    }

    /// Create runner by loading assumptions from CSV files
    pub fn from_csv() -> Result<Self, AssumptionError> {
        Ok(Self::with_assumptions(RateAssumptions::from_csv()?))
    }

    /// Create runner from specific assumptions directory
    pub fn from_csv_path(path: &std::path::Path) -> Result<Self, AssumptionError> {
        Ok(Self::with_assumptions(RateAssumptions::from_csv_path(path)?))
    }

    pub fn with_assumptions(assumptions: RateAssumptions) -> Self {
        Self {
            estimator: Estimator::new(assumptions),
        }
    }

    pub fn run(&self, input: &PolicyInput) -> Result<EstimationResult, EstimateError> {
        self.estimator.estimate(input)
    }

    pub fn run_raw(&self, raw: &RawPolicyInput) -> Result<EstimationResult, EstimateError> {
        self.estimator.estimate_raw(raw)
    }

    /// Estimate many inputs in parallel; results keep input order
    pub fn run_batch(&self, inputs: &[PolicyInput]) -> Vec<Result<EstimationResult, EstimateError>> {
        inputs.par_iter().map(|input| self.estimator.estimate(input)).collect()
    }

    /// Price the same applicant under every calculator, in listing order
    pub fn run_all_kinds(&self, input: &PolicyInput) -> Result<Vec<EstimationResult>, EstimateError> {
        CalculatorKind::ALL
            .iter()
            .map(|&kind| self.estimator.estimate(&input.with_calculator(kind)))
            .collect()
    }

    pub fn assumptions(&self) -> &RateAssumptions {
        self.estimator.assumptions()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_input() -> PolicyInput {
        PolicyInput::new(CalculatorKind::TermInsurance, 30, 1_000_000, 5_000_000, 20)
    }

    #[test]
    fn test_run_all_kinds() {
        let runner = EstimateRunner::new();
        let results = runner.run_all_kinds(&test_input()).unwrap();

        assert_eq!(results.len(), 4);
        let kinds: Vec<_> = results.iter().map(|r| r.calculator).collect();
        assert_eq!(kinds, CalculatorKind::ALL);

        assert_eq!(results[0].maturity_amount, 0);
        assert!(results[1..].iter().all(|r| r.maturity_amount == 6_000_000));
        assert!(results.iter().all(|r| r.annual_premium == 15_000));
    }

    #[test]
    fn test_run_batch_keeps_order() {
        let runner = EstimateRunner::new();
        let inputs: Vec<_> = (1..=40)
            .map(|term| PolicyInput::new(CalculatorKind::Maturity, 35, 0, 1_000_000, term))
            .chain(std::iter::once(PolicyInput::new(CalculatorKind::Maturity, 35, 0, 1_000_000, 0)))
            .collect();

        let results = runner.run_batch(&inputs);
        assert_eq!(results.len(), 41);
        for (i, result) in results[..40].iter().enumerate() {
            assert_eq!(result.as_ref().unwrap().term_years, i as u32 + 1);
        }
        assert!(results[40].is_err());
    }

    #[test]
    fn test_run_raw() {
        let runner = EstimateRunner::new();
        let raw = RawPolicyInput::from_fields(CalculatorKind::Pension, "45", "0", "2500000", "15");
        let result = runner.run_raw(&raw).unwrap();
        assert_eq!(result.annual_premium, 11_250);
    }
}
