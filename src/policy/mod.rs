//! Calculator inputs, validation and batch loading

mod data;
mod validate;
pub mod loader;

pub use data::{CalculatorKind, PolicyInput, RawField, RawPolicyInput};
pub use validate::{
    check_input, FIELD_AGE, FIELD_CALCULATOR, FIELD_COVERAGE, FIELD_INCOME, FIELD_TERM,
    MAX_COVERAGE,
};
pub use loader::{load_inputs, load_inputs_from_reader, BatchRow};
