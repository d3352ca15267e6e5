//! Premium Estimator CLI
//!
//! Command-line interface for running calculator estimates

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use premium_estimator::{
    catalog, AgePolicy, CalculatorKind, EstimateError, EstimateRunner, EstimationResult,
    RateAssumptions, RawPolicyInput,
};
use premium_estimator::policy::RawField;
use std::path::PathBuf;
use std::process::ExitCode;

/// Insurance premium and maturity estimates from the command line.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate premiums for one calculator.
    Estimate(EstimateArgs),
    /// Price the same applicant under every calculator.
    Compare(CompareArgs),
    /// List the available calculators.
    Calculators,
}

#[derive(Args)]
struct ApplicantArgs {
    /// Age in whole years.
    #[arg(long, allow_hyphen_values = true)]
    age: String,

    /// Annual income in whole currency units.
    #[arg(long, allow_hyphen_values = true)]
    income: String,

    /// Coverage amount (sum assured).
    #[arg(long, allow_hyphen_values = true)]
    coverage: String,

    /// Policy term in years.
    #[arg(long, allow_hyphen_values = true)]
    term: String,

    /// Directory containing rates.csv (defaults to built-in rates).
    #[arg(long)]
    assumptions: Option<PathBuf>,

    /// How to treat ages outside the suggested range: flag, clamp or reject.
    #[arg(long)]
    age_policy: Option<AgePolicy>,

    /// Print JSON instead of tables.
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct EstimateArgs {
    /// Calculator slug, e.g. "term-insurance".
    #[arg(long, default_value = "term-insurance")]
    calculator: String,

    #[command(flatten)]
    applicant: ApplicantArgs,
}

#[derive(Args)]
struct CompareArgs {
    #[command(flatten)]
    applicant: ApplicantArgs,
}

impl ApplicantArgs {
    fn runner(&self) -> Result<EstimateRunner> {
        let mut assumptions = match &self.assumptions {
            Some(dir) => RateAssumptions::from_csv_path(dir)
                .with_context(|| format!("loading assumptions from {}", dir.display()))?,
            None => RateAssumptions::default_pricing(),
        };
        if let Some(policy) = self.age_policy {
            assumptions.age_policy = policy;
        }
        Ok(EstimateRunner::with_assumptions(assumptions))
    }

    fn raw(&self, calculator: &str) -> RawPolicyInput {
        RawPolicyInput {
            calculator: Some(calculator.to_string()),
            age: Some(RawField::Text(self.age.clone())),
            income: Some(RawField::Text(self.income.clone())),
            coverage: Some(RawField::Text(self.coverage.clone())),
            term: Some(RawField::Text(self.term.clone())),
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    let outcome = match cli.command {
        Commands::Estimate(args) => handle_estimate(args),
        Commands::Compare(args) => handle_compare(args),
        Commands::Calculators => handle_calculators(),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_error(&e);
            ExitCode::FAILURE
        }
    }
}

fn report_error(err: &anyhow::Error) {
    match err.downcast_ref::<EstimateError>().and_then(|e| e.field_errors()) {
        Some(fields) => {
            eprintln!("Invalid input:");
            for field in fields.fields() {
                eprintln!("  {:<10} {}", field.field, field.message);
            }
        }
        None => eprintln!("Error: {:#}", err),
    }
}

fn handle_estimate(args: EstimateArgs) -> Result<()> {
    let runner = args.applicant.runner()?;
    let result = runner.run_raw(&args.applicant.raw(&args.calculator))?;

    if args.applicant.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_result(&result);
    }
    Ok(())
}

fn handle_compare(args: CompareArgs) -> Result<()> {
    let runner = args.applicant.runner()?;
    let input = args
        .applicant
        .raw(CalculatorKind::TermInsurance.slug())
        .validate()
        .map_err(EstimateError::from)?;
    let results = runner.run_all_kinds(&input)?;

    if args.applicant.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    println!("{:<28} {:>12} {:>14} {:>16} {:>16}",
        "Calculator", "Monthly", "Annual", "Total Premiums", "Maturity");
    println!("{}", "-".repeat(90));
    for r in &results {
        println!("{:<28} {:>12} {:>14} {:>16} {:>16}",
            r.config().title, r.monthly_premium, r.annual_premium, r.total_premiums, r.maturity_amount);
    }
    Ok(())
}

fn handle_calculators() -> Result<()> {
    for config in catalog() {
        println!("{:<16} {}", config.slug, config.title);
        println!("{:<16} {}", "", config.description);
        for feature in config.features {
            println!("{:<16} - {}", "", feature);
        }
        println!();
    }
    Ok(())
}

fn print_result(result: &EstimationResult) {
    let config = result.config();
    println!("{}", config.title);
    println!("{}\n", "=".repeat(config.title.len()));

    println!("  Monthly Premium: {:>14}", result.monthly_premium);
    println!("  Annual Premium:  {:>14}", result.annual_premium);
    println!("  Coverage:        {:>14}", result.coverage);
    println!("  Total Premiums:  {:>14}", result.total_premiums);
    if result.calculator.has_maturity_benefit() {
        println!("  Maturity Amount: {:>14}", result.maturity_amount);
    }
    println!("  Term:            {:>11} yrs", result.term_years);

    println!("\nProjection ({} years):", result.projection_series.len());
    println!("{:>8} {:>14} {:>16}", "Year", "Premium", "Value");
    println!("{}", "-".repeat(40));
    for point in &result.projection_series {
        println!("{:>8} {:>14} {:>16}", point.year_label, point.premium, point.value);
    }

    println!("\nBreakdown:");
    let shares = result.breakdown_shares();
    for (i, entry) in result.breakdown.iter().enumerate() {
        let pct = shares.get(i).map(|(_, s)| s * 100.0).unwrap_or(0.0);
        println!("  {:<16} {:>14} {:>7.2}%", entry.name, entry.value, pct);
    }

    if !result.warnings.is_empty() {
        println!("\nWarnings:");
        for warning in &result.warnings {
            println!("  - {}", warning);
        }
    }
}
