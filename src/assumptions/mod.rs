//! Rate assumptions behind the premium heuristic
//!
//! The defaults reproduce the calculator pages exactly. They are a simple
//! age-scaled rate per unit of coverage, not an actuarial table, and any
//! production pricing must replace them with a regulated rate table.

pub mod loader;

use crate::error::AssumptionError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// What to do with ages outside the suggested range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgePolicy {
    /// Keep the arithmetic as-is and attach advisory warnings
    #[default]
    Flag,
    /// Clamp into the suggested range before pricing
    Clamp,
    /// Reject as a validation error
    Reject,
}

impl FromStr for AgePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flag" => Ok(AgePolicy::Flag),
            "clamp" => Ok(AgePolicy::Clamp),
            "reject" => Ok(AgePolicy::Reject),
            other => Err(format!("expected flag, clamp or reject, got '{}'", other)),
        }
    }
}

impl fmt::Display for AgePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AgePolicy::Flag => "flag",
            AgePolicy::Clamp => "clamp",
            AgePolicy::Reject => "reject",
        };
        f.write_str(s)
    }
}

/// Constants used by the estimator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateAssumptions {
    /// Annual premium per unit of coverage at the reference age
    pub premium_rate: f64,

    /// Age at which the premium rate applies unscaled
    pub age_divisor: f64,

    /// Maturity amount as a multiple of coverage (savings-linked products only)
    pub maturity_multiplier: f64,

    /// Linear yearly appreciation of the illustrated nominal value
    pub appreciation_step: f64,

    /// Tax benefit as a fraction of the annual premium
    pub tax_benefit_rate: f64,

    /// Cap on projection series length
    pub max_projection_years: u32,

    pub suggested_min_age: u32,
    pub suggested_max_age: u32,

    pub age_policy: AgePolicy,
}

impl Default for RateAssumptions {
    fn default() -> Self {
        Self::default_pricing()
    }
}

impl RateAssumptions {
    /// Constants matching the live calculator pages
    pub fn default_pricing() -> Self {
        Self {
            premium_rate: 0.003,
            age_divisor: 30.0,
            maturity_multiplier: 1.2,
            appreciation_step: 0.05,
            tax_benefit_rate: 0.2,
            max_projection_years: 10,
            suggested_min_age: 18,
            suggested_max_age: 65,
            age_policy: AgePolicy::Flag,
        }
    }

    /// Load overrides from the default location (data/assumptions/)
    pub fn from_csv() -> Result<Self, AssumptionError> {
        Self::from_csv_path(Path::new(loader::DEFAULT_ASSUMPTIONS_PATH))
    }

    /// Load overrides from `rates.csv` in a specific directory; names not in the file keep their defaults
    pub fn from_csv_path(path: &Path) -> Result<Self, AssumptionError> {
        let rates = loader::load_rates(path)?;
        Self::from_loaded(&rates)
    }

    /// Apply loaded `(name, value)` overrides on top of the defaults
    pub fn from_loaded(rates: &[(String, String)]) -> Result<Self, AssumptionError> {
        let mut assumptions = Self::default_pricing();
        for (name, value) in rates {
            assumptions.apply(name, value)?;
        }
        assumptions.check()?;
        Ok(assumptions)
    }

    pub fn with_age_policy(mut self, age_policy: AgePolicy) -> Self {
        self.age_policy = age_policy;
        self
    }

    /// Whether `age` lies in the suggested range (inclusive)
    pub fn age_in_suggested_range(&self, age: u32) -> bool {
        (self.suggested_min_age..=self.suggested_max_age).contains(&age)
    }

    fn apply(&mut self, name: &str, value: &str) -> Result<(), AssumptionError> {
        match name {
            "premium_rate" => self.premium_rate = parse_rate(name, value)?,
            "age_divisor" => self.age_divisor = parse_rate(name, value)?,
            "maturity_multiplier" => self.maturity_multiplier = parse_rate(name, value)?,
            "appreciation_step" => self.appreciation_step = parse_rate(name, value)?,
            "tax_benefit_rate" => self.tax_benefit_rate = parse_rate(name, value)?,
            "max_projection_years" => self.max_projection_years = parse_whole(name, value)?,
            "suggested_min_age" => self.suggested_min_age = parse_whole(name, value)?,
            "suggested_max_age" => self.suggested_max_age = parse_whole(name, value)?,
            "age_policy" => {
                self.age_policy = value
                    .parse::<AgePolicy>()
                    .map_err(|reason| invalid(name, value, reason))?
            }
            other => return Err(AssumptionError::UnknownKey(other.to_string())),
        }
        Ok(())
    }

    fn check(&self) -> Result<(), AssumptionError> {
        if self.age_divisor <= 0.0 {
            return Err(invalid("age_divisor", &self.age_divisor.to_string(), "must be positive"));
        }
        if self.max_projection_years == 0 {
            return Err(invalid("max_projection_years", "0", "must be at least 1"));
        }
        if self.suggested_min_age > self.suggested_max_age {
            return Err(invalid(
                "suggested_min_age",
                &self.suggested_min_age.to_string(),
                "must not exceed suggested_max_age",
            ));
        }
        Ok(())
    }
}

fn invalid(key: &str, value: &str, reason: impl Into<String>) -> AssumptionError {
    AssumptionError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

fn parse_rate(key: &str, value: &str) -> Result<f64, AssumptionError> {
    let rate: f64 = value.parse().map_err(|_| invalid(key, value, "not a number"))?;
    if !rate.is_finite() || rate < 0.0 {
        return Err(invalid(key, value, "must be a finite non-negative number"));
    }
    Ok(rate)
}

fn parse_whole(key: &str, value: &str) -> Result<u32, AssumptionError> {
    value.parse().map_err(|_| invalid(key, value, "not a whole number"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_default_pricing_constants() {
        let a = RateAssumptions::default_pricing();
        assert_eq!(a.premium_rate, 0.003);
        assert_eq!(a.age_divisor, 30.0);
        assert_eq!(a.maturity_multiplier, 1.2);
        assert_eq!(a.max_projection_years, 10);
        assert_eq!(a.age_policy, AgePolicy::Flag);
        assert!(a.age_in_suggested_range(18));
        assert!(a.age_in_suggested_range(65));
        assert!(!a.age_in_suggested_range(66));
        assert!(!a.age_in_suggested_range(0));
    }

    #[test]
    fn test_overrides_applied() {
        let a = RateAssumptions::from_loaded(&pairs(&[
            ("premium_rate", "0.004"),
            ("max_projection_years", "5"),
            ("age_policy", "Reject"),
        ]))
        .unwrap();

        assert_eq!(a.premium_rate, 0.004);
        assert_eq!(a.max_projection_years, 5);
        assert_eq!(a.age_policy, AgePolicy::Reject);
        assert_eq!(a.maturity_multiplier, 1.2);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = RateAssumptions::from_loaded(&pairs(&[("bonus_rate", "0.1")])).unwrap_err();
        assert!(matches!(err, AssumptionError::UnknownKey(ref k) if k == "bonus_rate"));
    }

    #[test]
    fn test_invalid_values_rejected() {
        for (key, value) in [
            ("premium_rate", "abc"),
            ("premium_rate", "-0.1"),
            ("age_divisor", "0"),
            ("max_projection_years", "0"),
            ("max_projection_years", "2.5"),
            ("age_policy", "ignore"),
        ] {
            let result = RateAssumptions::from_loaded(&pairs(&[(key, value)]));
            assert!(
                matches!(result, Err(AssumptionError::InvalidValue { .. })),
                "{}={} should be rejected",
                key,
                value
            );
        }
    }

    #[test]
    fn test_inverted_age_range_rejected() {
        let result = RateAssumptions::from_loaded(&pairs(&[("suggested_min_age", "70")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_default_csv_matches_default_pricing() {
        let loaded = RateAssumptions::from_csv().expect("Failed to load default assumptions");
        assert_eq!(loaded, RateAssumptions::default_pricing());
    }
}
