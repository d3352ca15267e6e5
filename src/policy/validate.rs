//! Field-level validation of raw calculator submissions
//!
//! Every field is checked and all failures are reported together, so a form
//! can mark each bad input at once. Nothing here applies the age policy; that
//! depends on the rate assumptions and happens in the estimator.

use super::{CalculatorKind, PolicyInput, RawField, RawPolicyInput};
use crate::error::ValidationErrors;
use std::num::IntErrorKind;

pub const FIELD_CALCULATOR: &str = "calculator";
pub const FIELD_AGE: &str = "age";
pub const FIELD_INCOME: &str = "income";
pub const FIELD_COVERAGE: &str = "coverage";
pub const FIELD_TERM: &str = "term";

/// Largest coverage amount accepted; every amount derived from it stays exact in an f64
pub const MAX_COVERAGE: u64 = 1 << 53;

impl RawPolicyInput {
    /// Parse and check every field, returning a typed input or every field error found
    pub fn validate(&self) -> Result<PolicyInput, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let calculator = match self.calculator.as_deref().map(str::trim) {
            None | Some("") => {
                errors.push(FIELD_CALCULATOR, "Calculator is required");
                None
            }
            Some(slug) => match slug.parse::<CalculatorKind>() {
                Ok(kind) => Some(kind),
                Err(_) => {
                    errors.push(FIELD_CALCULATOR, format!("Unknown calculator '{}'", slug));
                    None
                }
            },
        };

        let age = whole_number(self.age.as_ref(), FIELD_AGE, "Age", &mut errors)
            .and_then(|v| narrow(v, FIELD_AGE, "Age", &mut errors));
        let income = whole_number(self.income.as_ref(), FIELD_INCOME, "Income", &mut errors);
        let coverage = whole_number(self.coverage.as_ref(), FIELD_COVERAGE, "Coverage amount", &mut errors);
        let term = whole_number(self.term.as_ref(), FIELD_TERM, "Policy term", &mut errors)
            .and_then(|v| narrow(v, FIELD_TERM, "Policy term", &mut errors));

        if let Some(coverage) = coverage {
            check_coverage(coverage, &mut errors);
        }
        if let Some(term) = term {
            check_term(term, &mut errors);
        }

        match (calculator, age, income, coverage, term) {
            (Some(calculator), Some(age), Some(income), Some(coverage), Some(term))
                if errors.is_empty() =>
            {
                Ok(PolicyInput::new(calculator, age, income, coverage, term))
            }
            _ => Err(errors),
        }
    }
}

/// Check invariants on an already-typed input
pub fn check_input(input: &PolicyInput) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    check_coverage(input.coverage_amount, &mut errors);
    check_term(input.term_years, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_coverage(coverage: u64, errors: &mut ValidationErrors) {
    if coverage == 0 {
        errors.push(FIELD_COVERAGE, "Coverage amount must be greater than 0");
    } else if coverage > MAX_COVERAGE {
        errors.push(FIELD_COVERAGE, "Coverage amount is too large");
    }
}

fn check_term(term: u32, errors: &mut ValidationErrors) {
    if term == 0 {
        errors.push(FIELD_TERM, "Policy term must be at least 1 year");
    }
}

/// Parse a present, non-negative whole number
fn whole_number(
    raw: Option<&RawField>,
    field: &'static str,
    label: &str,
    errors: &mut ValidationErrors,
) -> Option<u64> {
    let value = match raw {
        None => {
            errors.push(field, format!("{} is required", label));
            return None;
        }
        Some(RawField::Integer(v)) => *v,
        Some(RawField::Float(v)) => {
            if !v.is_finite() || v.fract() != 0.0 {
                errors.push(field, format!("{} must be a whole number", label));
                return None;
            }
            // i64::MAX as f64 rounds up to 2^63, which is itself out of range
            if v.abs() >= i64::MAX as f64 {
                let message = if *v < 0.0 { "cannot be negative" } else { "is too large" };
                errors.push(field, format!("{} {}", label, message));
                return None;
            }
            *v as i64
        }
        Some(RawField::Text(s)) => {
            let s = s.trim();
            if s.is_empty() {
                errors.push(field, format!("{} is required", label));
                return None;
            }
            match s.parse::<i64>() {
                Ok(v) => v,
                Err(e) if *e.kind() == IntErrorKind::PosOverflow => {
                    errors.push(field, format!("{} is too large", label));
                    return None;
                }
                Err(e) if *e.kind() == IntErrorKind::NegOverflow => {
                    errors.push(field, format!("{} cannot be negative", label));
                    return None;
                }
                Err(_) => {
                    errors.push(field, format!("{} must be a whole number", label));
                    return None;
                }
            }
        }
    };

    if value < 0 {
        errors.push(field, format!("{} cannot be negative", label));
        return None;
    }
    Some(value as u64)
}

fn narrow(value: u64, field: &'static str, label: &str, errors: &mut ValidationErrors) -> Option<u32> {
    match u32::try_from(value) {
        Ok(v) => Some(v),
        Err(_) => {
            errors.push(field, format!("{} is too large", label));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(age: &str, income: &str, coverage: &str, term: &str) -> RawPolicyInput {
        RawPolicyInput::from_fields(CalculatorKind::TermInsurance, age, income, coverage, term)
    }

    #[test]
    fn test_valid_form() {
        let input = form("30", "1000000", "5000000", "20").validate().unwrap();
        assert_eq!(
            input,
            PolicyInput::new(CalculatorKind::TermInsurance, 30, 1_000_000, 5_000_000, 20)
        );
    }

    #[test]
    fn test_numbers_and_whitespace() {
        let raw = RawPolicyInput {
            calculator: Some(" maturity ".to_string()),
            age: Some(RawField::Integer(45)),
            income: Some(RawField::Float(800000.0)),
            coverage: Some(" 3000000 ".into()),
            term: Some(RawField::Integer(10)),
        };
        let input = raw.validate().unwrap();
        assert_eq!(input.calculator, CalculatorKind::Maturity);
        assert_eq!(input.age, 45);
        assert_eq!(input.annual_income, 800_000);
        assert_eq!(input.coverage_amount, 3_000_000);
    }

    #[test]
    fn test_zero_term_rejected() {
        let errors = form("30", "1000000", "5000000", "0").validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.message_for(FIELD_TERM), Some("Policy term must be at least 1 year"));
    }

    #[test]
    fn test_reports_every_bad_field() {
        let raw = RawPolicyInput {
            calculator: Some("whole-life".to_string()),
            age: None,
            income: Some("-5".into()),
            coverage: Some("5e6".into()),
            term: Some(RawField::Float(12.5)),
        };
        let errors = raw.validate().unwrap_err();

        assert_eq!(errors.len(), 5);
        assert_eq!(errors.message_for(FIELD_CALCULATOR), Some("Unknown calculator 'whole-life'"));
        assert_eq!(errors.message_for(FIELD_AGE), Some("Age is required"));
        assert_eq!(errors.message_for(FIELD_INCOME), Some("Income cannot be negative"));
        assert_eq!(errors.message_for(FIELD_COVERAGE), Some("Coverage amount must be a whole number"));
        assert_eq!(errors.message_for(FIELD_TERM), Some("Policy term must be a whole number"));
    }

    #[test]
    fn test_blank_text_is_missing() {
        let errors = form("", "1000000", "  ", "20").validate().unwrap_err();
        assert_eq!(errors.message_for(FIELD_AGE), Some("Age is required"));
        assert_eq!(errors.message_for(FIELD_COVERAGE), Some("Coverage amount is required"));
    }

    #[test]
    fn test_missing_calculator() {
        let mut raw = form("30", "1000000", "5000000", "20");
        raw.calculator = None;
        let errors = raw.validate().unwrap_err();
        assert_eq!(errors.message_for(FIELD_CALCULATOR), Some("Calculator is required"));
    }

    #[test]
    fn test_age_zero_passes_validation() {
        // Degenerate ages are handled by the estimator's age policy
        let input = form("0", "0", "5000000", "1").validate().unwrap();
        assert_eq!(input.age, 0);
        assert_eq!(input.annual_income, 0);
    }

    #[test]
    fn test_oversized_term() {
        let errors = form("30", "1", "1", "5000000000").validate().unwrap_err();
        assert_eq!(errors.message_for(FIELD_TERM), Some("Policy term is too large"));
    }

    #[test]
    fn test_zero_coverage_rejected() {
        let errors = form("30", "1000000", "0", "20").validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.message_for(FIELD_COVERAGE),
            Some("Coverage amount must be greater than 0")
        );
    }

    #[test]
    fn test_coverage_upper_bound() {
        assert!(form("30", "1", &MAX_COVERAGE.to_string(), "1").validate().is_ok());

        let errors = form("30", "1", &(MAX_COVERAGE + 1).to_string(), "1").validate().unwrap_err();
        assert_eq!(errors.message_for(FIELD_COVERAGE), Some("Coverage amount is too large"));
    }

    #[test]
    fn test_values_beyond_i64_are_too_large() {
        let raw: RawPolicyInput = serde_json::from_str(
            r#"{"calculator":"maturity","age":30,"income":1,"coverage":10000000000000000000,"term":10}"#,
        )
        .unwrap();
        assert_eq!(raw.coverage, Some(RawField::Float(1e19)));
        let errors = raw.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.message_for(FIELD_COVERAGE), Some("Coverage amount is too large"));

        let mut raw = form("30", "1", "1", "1");
        raw.income = Some(RawField::Float(9_223_372_036_854_775_808.0));
        raw.age = Some(RawField::Float(-9_223_372_036_854_775_808.0));
        let errors = raw.validate().unwrap_err();
        assert_eq!(errors.message_for(FIELD_INCOME), Some("Income is too large"));
        assert_eq!(errors.message_for(FIELD_AGE), Some("Age cannot be negative"));

        let errors = form("30", "99999999999999999999", "1", "1").validate().unwrap_err();
        assert_eq!(errors.message_for(FIELD_INCOME), Some("Income is too large"));
    }

    #[test]
    fn test_check_input() {
        let mut input = PolicyInput::new(CalculatorKind::Pension, 40, 0, 100, 5);
        assert!(check_input(&input).is_ok());
        input.term_years = 0;
        input.coverage_amount = 0;
        let errors = check_input(&input).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.message_for(FIELD_TERM), Some("Policy term must be at least 1 year"));

        input.term_years = 5;
        input.coverage_amount = MAX_COVERAGE + 1;
        assert_eq!(
            check_input(&input).unwrap_err().message_for(FIELD_COVERAGE),
            Some("Coverage amount is too large")
        );
    }
}
