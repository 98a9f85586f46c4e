//! CSV-based assumption loader
//!
//! Loads insurance needs assumptions from data/assumptions/insurance_needs.csv

use std::error::Error;
use std::fs::File;
use std::path::Path;

/// Default path to assumptions directory
pub const DEFAULT_ASSUMPTIONS_PATH: &str = "data/assumptions";

/// File holding the insurance needs terms
pub const NEEDS_FILE: &str = "insurance_needs.csv";

/// Load insurance needs terms from CSV
/// Returns Vec<(term_name, value)> in file order
pub fn load_needs_terms(path: &Path) -> Result<Vec<(String, f64)>, Box<dyn Error>> {
    let file = File::open(path.join(NEEDS_FILE))?;
    read_terms(file)
}

/// Read `term,value` rows from any reader
pub fn read_terms<R: std::io::Read>(reader: R) -> Result<Vec<(String, f64)>, Box<dyn Error>> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut terms = Vec::new();

    for (i, result) in reader.records().enumerate() {
        let record = result?;
        // Line 1 is the header
        let line = i + 2;
        let (term, value) = match (record.get(0), record.get(1)) {
            (Some(term), Some(value)) => (term.trim(), value.trim()),
            _ => return Err(format!("line {}: expected term,value", line).into()),
        };
        let value: f64 = value
            .parse()
            .map_err(|e| format!("line {}: invalid value {:?} for {}: {}", line, value, term, e))?;
        terms.push((term.to_string(), value));
    }

    Ok(terms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_terms() {
        let data = "term,value\ntreatment_cost,50000000\nstock_liquidity, 0.7\n";
        let terms = read_terms(data.as_bytes()).unwrap();

        assert_eq!(terms.len(), 2);
        assert_eq!(terms[0], ("treatment_cost".to_string(), 50_000_000.0));
        assert_eq!(terms[1].1, 0.7);
    }

    #[test]
    fn test_bad_value_rejected() {
        let data = "term,value\ntreatment_cost,lots\n";
        assert!(read_terms(data.as_bytes()).is_err());
    }

    #[test]
    fn test_missing_value_column_rejected() {
        let data = "term\ntreatment_cost\n";
        let err = read_terms(data.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("line 2"), "{}", err);
    }
}
