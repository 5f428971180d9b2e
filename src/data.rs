//! Embedded sales-tax data and CSV parsing.
//!
//! The provincial and territorial rates live in `data/tax_rates.csv` and are
//! embedded into the binary at compile time using [`include_str!`], so no
//! runtime file I/O is needed.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::types::FinancingError;

// ---------------------------------------------------------------------------
// Embedded CSV data
// ---------------------------------------------------------------------------

/// Combined GST/HST/PST rates for the Canadian provinces and territories.
pub(crate) const CANADIAN_TAX_RATES_CSV: &str = include_str!("../data/tax_rates.csv");

// ---------------------------------------------------------------------------
// Internal data structures
// ---------------------------------------------------------------------------

/// A single row of a tax-rate CSV.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TaxRateRow {
    /// Upper-case region code.
    pub code: String,
    pub name: String,
    /// Flat fraction in `(0, 1]`.
    pub rate: Decimal,
}

// ---------------------------------------------------------------------------
// CSV parsing
// ---------------------------------------------------------------------------

/// Parse a `region,name,rate` CSV into rows, in file order.
///
/// The first line is a header. Blank lines are skipped. Line numbers in
/// errors are 1-based and count the header.
pub(crate) fn parse_tax_rates(csv: &str) -> Result<Vec<TaxRateRow>, FinancingError> {
    let mut rows: Vec<TaxRateRow> = Vec::new();

    for (idx, line) in csv.lines().enumerate().skip(1) {
        let line_no = idx + 1;
        if line.trim().is_empty() {
            continue;
        }

        let cols: Vec<&str> = line.split(',').map(str::trim).collect();
        if cols.len() != 3 {
            return Err(invalid(
                line_no,
                format!("expected 3 columns, found {}", cols.len()),
            ));
        }

        let code = normalize_region(cols[0]).ok_or_else(|| invalid(line_no, "empty region code"))?;
        let rate = Decimal::from_str(cols[2])
            .map_err(|e| invalid(line_no, format!("bad rate {:?}: {e}", cols[2])))?;
        if rate <= Decimal::ZERO || rate > Decimal::ONE {
            return Err(invalid(line_no, format!("rate {rate} is outside (0, 1]")));
        }
        if rows.iter().any(|row| row.code == code) {
            return Err(invalid(line_no, format!("duplicate region {code}")));
        }

        rows.push(TaxRateRow {
            code,
            name: cols[1].to_string(),
            rate,
        });
    }

    Ok(rows)
}

/// Trim and upper-case a region code. Returns [`None`] for blank input.
pub(crate) fn normalize_region(region: &str) -> Option<String> {
    let trimmed = region.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_uppercase())
    }
}

fn invalid(line: usize, reason: impl Into<String>) -> FinancingError {
    FinancingError::InvalidTaxTable {
        line,
        reason: reason.into(),
    }
}
