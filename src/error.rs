//! Error types for validation, estimation and assumption loading

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// A single field-level validation failure, suitable for showing next to a form input
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self { field, message: message.into() }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// All field errors found in one submission
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn single(field: &'static str, message: impl Into<String>) -> Self {
        Self(vec![FieldError::new(field, message)])
    }

    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError::new(field, message));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> &[FieldError] {
        &self.0
    }

    /// First message reported for `field`, if any
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|e| e.to_string()).collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// Failure to produce an estimate
#[derive(Debug, Error)]
pub enum EstimateError {
    #[error("Invalid policy input: {0}")]
    Validation(ValidationErrors),

    #[error("Unknown calculator: {0:?}")]
    UnknownCalculator(String),

    #[error("Arithmetic overflow computing {0}")]
    Overflow(&'static str),
}

impl EstimateError {
    /// Field errors to surface to the caller, if this is a validation failure
    pub fn field_errors(&self) -> Option<&ValidationErrors> {
        match self {
            EstimateError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<ValidationErrors> for EstimateError {
    fn from(errors: ValidationErrors) -> Self {
        EstimateError::Validation(errors)
    }
}

/// Failure to load rate assumptions from disk
#[derive(Debug, Error)]
pub enum AssumptionError {
    #[error("Failed to read assumptions file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse assumptions CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Unknown assumption {0:?}")]
    UnknownKey(String),

    #[error("Invalid value {value:?} for assumption {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

/// Failure to load a batch of policy inputs
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read input file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse input CSV: {0}")]
    Csv(#[from] csv::Error),
}
