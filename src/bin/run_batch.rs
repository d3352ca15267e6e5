//! Run estimates for every row of an input CSV
//!
//! Rows that fail validation are logged and skipped; the rest are estimated
//! in parallel and written as a summary CSV.

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use premium_estimator::policy::{load_inputs, BatchRow};
use premium_estimator::{
    EstimateError, EstimateRunner, EstimationResult, PolicyInput, RateAssumptions,
};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(author, version, about = "Estimate premiums for a CSV of applicants", long_about = None)]
struct Args {
    /// Input CSV with Calculator,Age,AnnualIncome,CoverageAmount,TermYears columns.
    input: PathBuf,

    /// Where to write the results.
    #[arg(long, short, default_value = "estimates_output.csv")]
    output: PathBuf,

    /// Directory containing rates.csv (defaults to built-in rates).
    #[arg(long)]
    assumptions: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let start = Instant::now();
    let rows = load_inputs(&args.input)
        .with_context(|| format!("loading inputs from {}", args.input.display()))?;
    info!("Loaded {} rows in {:?}", rows.len(), start.elapsed());

    let runner = match &args.assumptions {
        Some(dir) => EstimateRunner::from_csv_path(dir)
            .with_context(|| format!("loading assumptions from {}", dir.display()))?,
        None => EstimateRunner::with_assumptions(RateAssumptions::default_pricing()),
    };

    let (row_numbers, inputs) = split_valid(rows);

    let run_start = Instant::now();
    let results = runner.run_batch(&inputs);
    info!("Estimated {} rows in {:?}", inputs.len(), run_start.elapsed());

    let file = File::create(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    let mut out = BufWriter::new(file);
    let written = write_summary(&mut out, &row_numbers, &inputs, results)?;
    out.flush()?;

    println!("Wrote {} estimates to {} ({:?} total)", written, args.output.display(), start.elapsed());
    Ok(())
}

/// Write one summary line per successful estimate, keyed by its input row
fn write_summary<W: Write>(
    out: &mut W,
    row_numbers: &[usize],
    inputs: &[PolicyInput],
    results: Vec<Result<EstimationResult, EstimateError>>,
) -> std::io::Result<usize> {
    writeln!(out, "Row,Calculator,Age,CoverageAmount,TermYears,AnnualPremium,MonthlyPremium,TotalPremiums,MaturityAmount,TaxBenefits,Warnings")?;

    let mut written = 0;
    for ((row, input), result) in row_numbers.iter().zip(inputs).zip(results) {
        match result {
            Ok(r) => {
                let warnings: Vec<String> = r.warnings.iter().map(|w| w.to_string()).collect();
                writeln!(out, "{},{},{},{},{},{},{},{},{},{},\"{}\"",
                    row,
                    r.calculator,
                    input.age,
                    r.coverage,
                    r.term_years,
                    r.annual_premium,
                    r.monthly_premium,
                    r.total_premiums,
                    r.maturity_amount,
                    r.tax_benefits(),
                    warnings.join("; "),
                )?;
                written += 1;
            }
            Err(e) => warn!("Row {}: {}", row, e),
        }
    }
    Ok(written)
}

/// Keep valid rows with their row numbers; log the rest
fn split_valid(rows: Vec<BatchRow>) -> (Vec<usize>, Vec<PolicyInput>) {
    let mut row_numbers = Vec::with_capacity(rows.len());
    let mut inputs = Vec::with_capacity(rows.len());

    for BatchRow { row, input } in rows {
        match input {
            Ok(input) => {
                row_numbers.push(row);
                inputs.push(input);
            }
            Err(errors) => warn!("Skipping row {}: {}", row, errors),
        }
    }

    (row_numbers, inputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use premium_estimator::policy::load_inputs_from_reader;

    const HEADER: &str = "Row,Calculator,Age,CoverageAmount,TermYears,AnnualPremium,MonthlyPremium,TotalPremiums,MaturityAmount,TaxBenefits,Warnings";

    fn summarize(data: &str) -> (usize, Vec<String>) {
        let rows = load_inputs_from_reader(data.as_bytes()).unwrap();
        let (row_numbers, inputs) = split_valid(rows);
        let results = EstimateRunner::new().run_batch(&inputs);

        let mut out = Vec::new();
        let written = write_summary(&mut out, &row_numbers, &inputs, results).unwrap();
        let text = String::from_utf8(out).unwrap();
        (written, text.lines().map(str::to_string).collect())
    }

    #[test]
    fn test_invalid_rows_skipped_and_rows_aligned() {
        let data = "Calculator,Age,AnnualIncome,CoverageAmount,TermYears\n\
                    term-insurance,30,1000000,5000000,20\n\
                    maturity,abc,1000000,5000000,20\n\
                    maturity,30,1000000,5000000,20\n\
                    pension,40,1000000,0,10\n\
                    child-plan,0,500000,1000000,5\n";
        let (written, lines) = summarize(data);

        assert_eq!(written, 3);
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], HEADER);
        assert_eq!(lines[1], "1,term-insurance,30,5000000,20,15000,1250,300000,0,3000,\"\"");
        assert_eq!(lines[2], "3,maturity,30,5000000,20,15000,1250,300000,6000000,3000,\"\"");
        assert!(lines[3].starts_with("5,child-plan,0,1000000,5,0,0,0,1200000,0,\""));
        assert!(lines[3].contains("; "));
    }

    #[test]
    fn test_failed_estimates_not_written() {
        let inputs = vec![
            PolicyInput::new(premium_estimator::CalculatorKind::Pension, 30, 0, 1_000_000, 5),
            PolicyInput::new(premium_estimator::CalculatorKind::Pension, 30, 0, 1_000_000, 6),
        ];
        let results = vec![
            Err(EstimateError::Overflow("total premiums")),
            EstimateRunner::new().run(&inputs[1]),
        ];

        let mut out = Vec::new();
        let written = write_summary(&mut out, &[2, 7], &inputs, results).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(written, 1);
        assert_eq!(text.lines().count(), 2);
        assert!(text.lines().nth(1).unwrap().starts_with("7,pension,30,1000000,6,"));
    }
}
