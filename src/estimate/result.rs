//! Estimation output structures consumed by the results view and charts

use crate::catalog::CalculatorConfig;
use crate::policy::CalculatorKind;
use serde::Serialize;
use std::fmt;

/// One bar of the projection chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionPoint {
    /// "Year 1", "Year 2", ...
    pub year_label: String,
    pub premium: u64,
    /// Illustrative nominal value, appreciating linearly
    pub value: u64,
}

/// Slices of the breakdown pie
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BreakdownCategory {
    LifeCoverage,
    TotalPremiums,
    TaxBenefits,
}

impl BreakdownCategory {
    pub const ALL: [BreakdownCategory; 3] = [
        BreakdownCategory::LifeCoverage,
        BreakdownCategory::TotalPremiums,
        BreakdownCategory::TaxBenefits,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            BreakdownCategory::LifeCoverage => "Life Coverage",
            BreakdownCategory::TotalPremiums => "Total Premiums",
            BreakdownCategory::TaxBenefits => "Tax Benefits",
        }
    }

    /// Chart color, taken in order from the site palette
    pub fn color(&self) -> &'static str {
        match self {
            BreakdownCategory::LifeCoverage => "#8B5CF6",
            BreakdownCategory::TotalPremiums => "#3B82F6",
            BreakdownCategory::TaxBenefits => "#10B981",
        }
    }
}

/// A named monetary amount in the breakdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreakdownEntry {
    pub category: BreakdownCategory,
    pub name: &'static str,
    pub value: u64,
    pub color: &'static str,
}

impl BreakdownEntry {
    pub fn new(category: BreakdownCategory, value: u64) -> Self {
        Self {
            category,
            name: category.label(),
            value,
            color: category.color(),
        }
    }
}

/// Advisory findings that do not stop an estimate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum EstimateWarning {
    /// Age of zero prices to a zero premium, which is almost certainly wrong
    DegenerateResult { age: u32 },
    AgeOutsideSuggestedRange { age: u32, min: u32, max: u32 },
    AgeClamped { from: u32, to: u32 },
}

impl fmt::Display for EstimateWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EstimateWarning::DegenerateResult { age } => {
                write!(f, "age {} produces a zero premium", age)
            }
            EstimateWarning::AgeOutsideSuggestedRange { age, min, max } => {
                write!(f, "age {} is outside the suggested range {}-{}", age, min, max)
            }
            EstimateWarning::AgeClamped { from, to } => {
                write!(f, "age {} was clamped to {} for pricing", from, to)
            }
        }
    }
}

/// Complete estimate for one submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimationResult {
    pub calculator: CalculatorKind,

    /// Coverage and term echoed back for the summary cards
    pub coverage: u64,
    pub term_years: u32,

    pub annual_premium: u64,
    pub monthly_premium: u64,
    pub total_premiums: u64,

    /// Zero for term insurance
    pub maturity_amount: u64,

    /// At most `max_projection_years` entries
    pub projection_series: Vec<ProjectionPoint>,

    pub breakdown: Vec<BreakdownEntry>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<EstimateWarning>,
}

impl EstimationResult {
    /// Page configuration of the calculator that produced this result
    pub fn config(&self) -> &'static CalculatorConfig {
        self.calculator.config()
    }

    pub fn breakdown_value(&self, category: BreakdownCategory) -> Option<u64> {
        self.breakdown
            .iter()
            .find(|e| e.category == category)
            .map(|e| e.value)
    }

    pub fn tax_benefits(&self) -> u64 {
        self.breakdown_value(BreakdownCategory::TaxBenefits).unwrap_or(0)
    }

    pub fn breakdown_total(&self) -> u128 {
        self.breakdown.iter().map(|e| e.value as u128).sum()
    }

    /// Fraction of the breakdown total held by each category, for pie slices
    /// Empty when the total is zero
    pub fn breakdown_shares(&self) -> Vec<(BreakdownCategory, f64)> {
        let total = self.breakdown_total();
        if total == 0 {
            return Vec::new();
        }
        self.breakdown
            .iter()
            .map(|e| (e.category, e.value as f64 / total as f64))
            .collect()
    }

    pub fn is_degenerate(&self) -> bool {
        self.warnings
            .iter()
            .any(|w| matches!(w, EstimateWarning::DegenerateResult { .. }))
    }
}
