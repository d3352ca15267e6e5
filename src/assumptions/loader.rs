//! CSV-based assumption loader
//!
//! Loads rate overrides from `rates.csv` in data/assumptions/

use crate::error::AssumptionError;
use std::fs::File;
use std::path::Path;

/// Default path to assumptions directory
pub const DEFAULT_ASSUMPTIONS_PATH: &str = "data/assumptions";

/// File holding the `name,value` rate overrides
pub const RATES_FILE: &str = "rates.csv";

/// Load rate overrides from CSV
/// Returns (name, value) pairs in file order; values are left as text for the caller to parse
pub fn load_rates(path: &Path) -> Result<Vec<(String, String)>, AssumptionError> {
    let file = File::open(path.join(RATES_FILE))?;
    load_rates_from_reader(file)
}

/// Load rate overrides from any reader
pub fn load_rates_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<(String, String)>, AssumptionError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(reader);

    let mut rates = Vec::new();

    for result in reader.records() {
        let record = result?;
        let name = record.get(0).unwrap_or_default().to_string();
        let value = record.get(1).unwrap_or_default().to_string();
        if name.is_empty() {
            continue;
        }
        rates.push((name, value));
    }

    Ok(rates)
}
