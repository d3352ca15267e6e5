//! Load batches of calculator inputs from CSV

use super::{PolicyInput, RawField, RawPolicyInput};
use crate::error::{LoadError, ValidationErrors};
use csv::{ReaderBuilder, Trim};
use std::path::Path;

/// Raw CSV row; every column is optional text so validation can report per field
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Calculator", default)]
    calculator: Option<String>,
    #[serde(rename = "Age", default)]
    age: Option<String>,
    #[serde(rename = "AnnualIncome", default)]
    annual_income: Option<String>,
    #[serde(rename = "CoverageAmount", default)]
    coverage_amount: Option<String>,
    #[serde(rename = "TermYears", default)]
    term_years: Option<String>,
}

impl CsvRow {
    fn to_raw(self) -> RawPolicyInput {
        RawPolicyInput {
            calculator: self.calculator,
            age: self.age.map(RawField::Text),
            income: self.annual_income.map(RawField::Text),
            coverage: self.coverage_amount.map(RawField::Text),
            term: self.term_years.map(RawField::Text),
        }
    }
}

/// One input row with its validation outcome
#[derive(Debug, Clone)]
pub struct BatchRow {
    /// 1-based data row number (header excluded)
    pub row: usize,
    pub input: Result<PolicyInput, ValidationErrors>,
}

/// Load all inputs from a CSV file
pub fn load_inputs<P: AsRef<Path>>(path: P) -> Result<Vec<BatchRow>, LoadError> {
    let file = std::fs::File::open(path)?;
    load_inputs_from_reader(file)
}

/// Load inputs from any reader (e.g., string buffer, request body)
pub fn load_inputs_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<BatchRow>, LoadError> {
    let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let mut rows = Vec::new();

    for (i, result) in csv_reader.deserialize().enumerate() {
        let row: CsvRow = result?;
        rows.push(BatchRow {
            row: i + 1,
            input: row.to_raw().validate(),
        });
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::CalculatorKind;

    const SAMPLE: &str = "\
Calculator,Age,AnnualIncome,CoverageAmount,TermYears
term-insurance,30,1000000,5000000,20
maturity, 45 ,800000,3000000,15
pension,abc,800000,3000000,0
";

    #[test]
    fn test_load_inputs_from_reader() {
        let rows = load_inputs_from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(rows.len(), 3);

        let first = rows[0].input.as_ref().unwrap();
        assert_eq!(rows[0].row, 1);
        assert_eq!(first.calculator, CalculatorKind::TermInsurance);
        assert_eq!(first.coverage_amount, 5_000_000);

        let second = rows[1].input.as_ref().unwrap();
        assert_eq!(second.age, 45);
        assert_eq!(second.term_years, 15);

        let errors = rows[2].input.as_ref().unwrap_err();
        assert_eq!(rows[2].row, 3);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.message_for("age"), Some("Age must be a whole number"));
    }

    #[test]
    fn test_empty_cells_are_missing() {
        let data = "Calculator,Age,AnnualIncome,CoverageAmount,TermYears\nchild-plan,35,,500000,10\n";
        let rows = load_inputs_from_reader(data.as_bytes()).unwrap();
        let errors = rows[0].input.as_ref().unwrap_err();
        assert_eq!(errors.message_for("income"), Some("Income is required"));
    }
}
