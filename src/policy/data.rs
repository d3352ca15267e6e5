//! Policy input structures as submitted by the calculator forms

use crate::error::EstimateError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which calculator page the estimate is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CalculatorKind {
    /// Pure protection, no maturity benefit
    TermInsurance,
    /// Endowment and money-back policies
    Maturity,
    /// Retirement and annuity plans
    Pension,
    /// Education and marriage benefit plans
    ChildPlan,
}

impl CalculatorKind {
    /// All calculators in the order they are listed on the site
    pub const ALL: [CalculatorKind; 4] = [
        CalculatorKind::TermInsurance,
        CalculatorKind::Maturity,
        CalculatorKind::Pension,
        CalculatorKind::ChildPlan,
    ];

    /// URL slug of the calculator page
    pub fn slug(&self) -> &'static str {
        match self {
            CalculatorKind::TermInsurance => "term-insurance",
            CalculatorKind::Maturity => "maturity",
            CalculatorKind::Pension => "pension",
            CalculatorKind::ChildPlan => "child-plan",
        }
    }

    /// Whether the product pays a lump sum at the end of the term
    pub fn has_maturity_benefit(&self) -> bool {
        !matches!(self, CalculatorKind::TermInsurance)
    }
}

impl fmt::Display for CalculatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for CalculatorKind {
    type Err = EstimateError;

    /// Unknown slugs are rejected rather than falling back to term insurance
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let slug = s.trim();
        CalculatorKind::ALL
            .into_iter()
            .find(|kind| kind.slug() == slug)
            .ok_or_else(|| EstimateError::UnknownCalculator(slug.to_string()))
    }
}

/// A validated request to the estimator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyInput {
    /// Age of the policyholder in whole years
    pub age: u32,

    /// Annual income in whole currency units
    pub annual_income: u64,

    /// Sum assured
    pub coverage_amount: u64,

    /// Policy duration in years, always at least 1 once validated
    pub term_years: u32,

    pub calculator: CalculatorKind,
}

impl PolicyInput {
    pub fn new(
        calculator: CalculatorKind,
        age: u32,
        annual_income: u64,
        coverage_amount: u64,
        term_years: u32,
    ) -> Self {
        Self {
            age,
            annual_income,
            coverage_amount,
            term_years,
            calculator,
        }
    }

    /// Same numeric input priced under another calculator
    pub fn with_calculator(&self, calculator: CalculatorKind) -> Self {
        Self { calculator, ..self.clone() }
    }
}

/// A numeric form field as it arrives over the wire: a JSON number or the
/// string an HTML input produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawField {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl From<i64> for RawField {
    fn from(value: i64) -> Self {
        RawField::Integer(value)
    }
}

impl From<&str> for RawField {
    fn from(value: &str) -> Self {
        RawField::Text(value.to_string())
    }
}

impl From<String> for RawField {
    fn from(value: String) -> Self {
        RawField::Text(value)
    }
}

/// Unvalidated calculator form submission
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPolicyInput {
    /// Calculator slug, e.g. "term-insurance"
    #[serde(default, alias = "calculatorKind")]
    pub calculator: Option<String>,

    #[serde(default)]
    pub age: Option<RawField>,

    #[serde(default, alias = "annualIncome")]
    pub income: Option<RawField>,

    #[serde(default, alias = "coverageAmount")]
    pub coverage: Option<RawField>,

    #[serde(default, alias = "termYears")]
    pub term: Option<RawField>,
}

impl RawPolicyInput {
    /// Raw form for a known calculator with every field filled in
    pub fn from_fields(
        calculator: CalculatorKind,
        age: impl Into<RawField>,
        income: impl Into<RawField>,
        coverage: impl Into<RawField>,
        term: impl Into<RawField>,
    ) -> Self {
        Self {
            calculator: Some(calculator.slug().to_string()),
            age: Some(age.into()),
            income: Some(income.into()),
            coverage: Some(coverage.into()),
            term: Some(term.into()),
        }
    }
}
