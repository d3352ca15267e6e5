//! Premium and maturity estimation

use super::result::{
    BreakdownCategory, BreakdownEntry, EstimateWarning, EstimationResult, ProjectionPoint,
};
use crate::assumptions::{AgePolicy, RateAssumptions};
use crate::error::{EstimateError, ValidationErrors};
use crate::policy::{check_input, PolicyInput, RawPolicyInput, FIELD_AGE};
use log::debug;

/// Round half up to a whole currency unit; all inputs here are non-negative
fn round_amount(x: f64, quantity: &'static str) -> Result<u64, EstimateError> {
    let rounded = x.round();
    if !rounded.is_finite() || rounded < 0.0 || rounded >= u64::MAX as f64 {
        return Err(EstimateError::Overflow(quantity));
    }
    Ok(rounded as u64)
}

/// Stateless estimator over a fixed set of rate assumptions
#[derive(Debug, Clone, Default)]
pub struct Estimator {
    assumptions: RateAssumptions,
}

impl Estimator {
    pub fn new(assumptions: RateAssumptions) -> Self {
        Self { assumptions }
    }

    pub fn assumptions(&self) -> &RateAssumptions {
        &self.assumptions
    }

    /// Validate a raw form submission and estimate it
    pub fn estimate_raw(&self, raw: &RawPolicyInput) -> Result<EstimationResult, EstimateError> {
        let input = raw.validate()?;
        self.estimate(&input)
    }

    /// Estimate premiums, maturity, projection series and breakdown for one input
    pub fn estimate(&self, input: &PolicyInput) -> Result<EstimationResult, EstimateError> {
        check_input(input)?;

        let a = &self.assumptions;
        let (age, warnings) = self.pricing_age(input.age)?;
        let coverage = input.coverage_amount;

        let annual_premium = round_amount(
            coverage as f64 * a.premium_rate * (age as f64 / a.age_divisor),
            "annual premium",
        )?;
        let monthly_premium = round_amount(annual_premium as f64 / 12.0, "monthly premium")?;
        let total_premiums = annual_premium
            .checked_mul(input.term_years as u64)
            .ok_or(EstimateError::Overflow("total premiums"))?;

        let maturity_amount = if input.calculator.has_maturity_benefit() {
            round_amount(coverage as f64 * a.maturity_multiplier, "maturity amount")?
        } else {
            0
        };

        let projection_series = self.projection_series(coverage, annual_premium, input.term_years)?;

        let tax_benefits = round_amount(annual_premium as f64 * a.tax_benefit_rate, "tax benefits")?;
        let breakdown = vec![
            BreakdownEntry::new(BreakdownCategory::LifeCoverage, coverage),
            BreakdownEntry::new(BreakdownCategory::TotalPremiums, total_premiums),
            BreakdownEntry::new(BreakdownCategory::TaxBenefits, tax_benefits),
        ];

        debug!(
            "{} estimate: age={} coverage={} term={} annual={} monthly={} maturity={}",
            input.calculator,
            age,
            coverage,
            input.term_years,
            annual_premium,
            monthly_premium,
            maturity_amount
        );

        Ok(EstimationResult {
            calculator: input.calculator,
            coverage,
            term_years: input.term_years,
            annual_premium,
            monthly_premium,
            total_premiums,
            maturity_amount,
            projection_series,
            breakdown,
            warnings,
        })
    }

    /// Flat premium against a linearly appreciating nominal value, capped in length
    pub fn projection_series(
        &self,
        coverage: u64,
        annual_premium: u64,
        term_years: u32,
    ) -> Result<Vec<ProjectionPoint>, EstimateError> {
        let years = term_years.min(self.assumptions.max_projection_years);
        let step = self.assumptions.appreciation_step;

        (0..years)
            .map(|i| {
                Ok(ProjectionPoint {
                    year_label: format!("Year {}", i + 1),
                    premium: annual_premium,
                    value: round_amount(coverage as f64 * (1.0 + i as f64 * step), "projected value")?,
                })
            })
            .collect()
    }

    /// Age used for pricing under the configured age policy, with any warnings raised
    fn pricing_age(&self, age: u32) -> Result<(u32, Vec<EstimateWarning>), EstimateError> {
        let a = &self.assumptions;
        let (min, max) = (a.suggested_min_age, a.suggested_max_age);
        let mut warnings = Vec::new();

        if a.age_in_suggested_range(age) {
            return Ok((age, warnings));
        }

        match a.age_policy {
            AgePolicy::Flag => {
                if age == 0 {
                    warnings.push(EstimateWarning::DegenerateResult { age });
                }
                warnings.push(EstimateWarning::AgeOutsideSuggestedRange { age, min, max });
                debug!("age {} outside {}-{}, pricing unchanged", age, min, max);
                Ok((age, warnings))
            }
            AgePolicy::Clamp => {
                let clamped = age.clamp(min, max);
                warnings.push(EstimateWarning::AgeClamped { from: age, to: clamped });
                debug!("age {} clamped to {}", age, clamped);
                Ok((clamped, warnings))
            }
            AgePolicy::Reject => Err(ValidationErrors::single(
                FIELD_AGE,
                format!("Age must be between {} and {}", min, max),
            )
            .into()),
        }
    }
}

/// Estimate with the default pricing assumptions
pub fn estimate(input: &PolicyInput) -> Result<EstimationResult, EstimateError> {
    Estimator::default().estimate(input)
}
