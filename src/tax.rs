//! Region to sales-tax rate lookup.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::data::{self, CANADIAN_TAX_RATES_CSV};
use crate::types::FinancingError;

/// A jurisdiction and its flat sales-tax rate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaxRegion {
    /// Upper-case region code, e.g. `"ON"`.
    pub code: String,
    /// Display name, e.g. `"Ontario"`.
    pub name: String,
    /// Combined rate as a fraction, e.g. `0.13`.
    pub rate: Decimal,
}

/// An immutable table of region codes and their sales-tax rates.
///
/// Lookups trim surrounding whitespace and ignore case. Codes that are blank
/// or not in the table resolve to a rate of zero rather than an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaxTable {
    regions: BTreeMap<String, TaxRegion>,
}

static CANADIAN: LazyLock<TaxTable> = LazyLock::new(|| {
    TaxTable::from_csv(CANADIAN_TAX_RATES_CSV).unwrap_or_else(|err| {
        error!(%err, "embedded tax table failed to parse");
        TaxTable::default()
    })
});

impl TaxTable {
    /// The built-in table of Canadian provincial and territorial rates.
    pub fn canadian() -> &'static TaxTable {
        &CANADIAN
    }

    /// Build a table from `region,name,rate` CSV text with a header line.
    ///
    /// # Errors
    ///
    /// Returns [`FinancingError::InvalidTaxTable`] if a row has the wrong
    /// number of columns, a blank code, an unparseable rate, a rate outside
    /// `(0, 1]`, or repeats an earlier code.
    ///
    /// # Examples
    ///
    /// ```
    /// use rust_decimal::Decimal;
    /// use zoomloop_financing::TaxTable;
    ///
    /// let table = TaxTable::from_csv("region,name,rate\nON,Ontario,0.13\n").unwrap();
    /// assert_eq!(table.tax_rate(Some("on")), Decimal::new(13, 2));
    /// ```
    pub fn from_csv(csv: &str) -> Result<Self, FinancingError> {
        let regions = data::parse_tax_rates(csv)?
            .into_iter()
            .map(|row| {
                let region = TaxRegion {
                    code: row.code,
                    name: row.name,
                    rate: row.rate,
                };
                (region.code.clone(), region)
            })
            .collect();
        Ok(Self { regions })
    }

    /// Rate for `region`, or zero if it is absent, blank or unknown.
    pub fn tax_rate(&self, region: Option<&str>) -> Decimal {
        match self.lookup(region) {
            Some(found) => found.rate,
            None => {
                debug!(region = ?region, "no tax rate for region, using zero");
                Decimal::ZERO
            }
        }
    }

    /// Whether `region` names a code in this table.
    pub fn is_supported_region(&self, region: Option<&str>) -> bool {
        self.lookup(region).is_some()
    }

    /// Every code and its rate, ordered by code.
    pub fn all_tax_rates(&self) -> BTreeMap<String, Decimal> {
        self.regions
            .iter()
            .map(|(code, region)| (code.clone(), region.rate))
            .collect()
    }

    /// Full region records, ordered by code.
    pub fn regions(&self) -> impl Iterator<Item = &TaxRegion> {
        self.regions.values()
    }

    /// Number of regions in the table.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Whether the table has no regions, so every lookup resolves to zero.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    fn lookup(&self, region: Option<&str>) -> Option<&TaxRegion> {
        let code = data::normalize_region(region?)?;
        self.regions.get(&code)
    }
}

/// Sales-tax rate for a Canadian region code, or zero if unrecognized.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use zoomloop_financing::get_tax_rate;
///
/// assert_eq!(get_tax_rate(Some(" on ")), Decimal::new(13, 2));
/// assert_eq!(get_tax_rate(Some("XX")), Decimal::ZERO);
/// assert_eq!(get_tax_rate(None), Decimal::ZERO);
/// ```
pub fn get_tax_rate(region: Option<&str>) -> Decimal {
    TaxTable::canadian().tax_rate(region)
}

/// Whether `region` is a Canadian province or territory code.
pub fn is_supported_region(region: Option<&str>) -> bool {
    TaxTable::canadian().is_supported_region(region)
}

/// All Canadian region codes and their rates.
pub fn get_all_tax_rates() -> BTreeMap<String, Decimal> {
    TaxTable::canadian().all_tax_rates()
}
