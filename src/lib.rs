//! Premium Estimator - estimation engine behind the insurance calculator pages
//!
//! This library provides:
//! - Validation of raw calculator form submissions
//! - Premium, total premium and maturity estimates per calculator
//! - Chart data: a capped yearly projection series and a category breakdown
//! - The calculator catalog shown on the listing and detail pages
//!
//! The premium formula is an illustrative heuristic, not an actuarial rate table.

pub mod error;
pub mod policy;
pub mod assumptions;
pub mod catalog;
pub mod estimate;
pub mod scenario;

// Re-export commonly used types
pub use error::{EstimateError, FieldError, ValidationErrors};
pub use policy::{CalculatorKind, PolicyInput, RawPolicyInput};
pub use assumptions::{AgePolicy, RateAssumptions};
pub use catalog::{catalog, CalculatorConfig};
pub use estimate::{estimate, EstimationResult, Estimator};
pub use scenario::EstimateRunner;
