//! Presentation records for each calculator page

use crate::policy::CalculatorKind;
use serde::Serialize;

/// What a calculator page shows above its form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalculatorConfig {
    pub kind: CalculatorKind,
    pub slug: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    /// Gradient classes used for the page accent
    pub accent: &'static str,
    pub features: &'static [&'static str],
}

static TERM_INSURANCE: CalculatorConfig = CalculatorConfig {
    kind: CalculatorKind::TermInsurance,
    slug: "term-insurance",
    title: "Term Insurance Calculator",
    description: "Calculate your ideal term insurance coverage and premium amounts",
    accent: "from-blue-500 to-cyan-500",
    features: &[
        "Coverage amount calculation",
        "Premium estimation",
        "Age-based recommendations",
    ],
};

static MATURITY: CalculatorConfig = CalculatorConfig {
    kind: CalculatorKind::Maturity,
    slug: "maturity",
    title: "Maturity Calculator",
    description: "Project maturity amounts with bonus calculations",
    accent: "from-orange-500 to-red-500",
    features: &[
        "Compound growth visualization",
        "Bonus projections",
        "Inflation adjustment",
    ],
};

static PENSION: CalculatorConfig = CalculatorConfig {
    kind: CalculatorKind::Pension,
    slug: "pension",
    title: "Pension Calculator",
    description: "Plan your retirement with pension schemes and annuity calculations",
    accent: "from-indigo-500 to-purple-500",
    features: &[
        "Retirement planning",
        "Annuity calculations",
        "Tax implications",
    ],
};

static CHILD_PLAN: CalculatorConfig = CalculatorConfig {
    kind: CalculatorKind::ChildPlan,
    slug: "child-plan",
    title: "Child Plan Calculator",
    description: "Calculate education and marriage benefits for child insurance plans",
    accent: "from-pink-500 to-rose-500",
    features: &[
        "Education fund planning",
        "Milestone-based payouts",
        "Waiver of premium",
    ],
};

impl CalculatorKind {
    /// Page configuration for this calculator
    pub fn config(&self) -> &'static CalculatorConfig {
        match self {
            CalculatorKind::TermInsurance => &TERM_INSURANCE,
            CalculatorKind::Maturity => &MATURITY,
            CalculatorKind::Pension => &PENSION,
            CalculatorKind::ChildPlan => &CHILD_PLAN,
        }
    }
}

/// All calculator configs in listing order
pub fn catalog() -> Vec<&'static CalculatorConfig> {
    CalculatorKind::ALL.iter().map(|kind| kind.config()).collect()
}
