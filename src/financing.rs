//! Financing breakdown: taxable amount, sales tax and financed principal.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::data;
use crate::payment::summarize_loan;
use crate::tax::TaxTable;
use crate::types::{
    FinancingCalculationResult, FinancingError, FinancingOptions, FinancingQuote,
    ensure_non_negative,
};

/// Computes financing breakdowns against a tax table.
///
/// [`FinancingCalculator::default`] uses the built-in Canadian table; use
/// [`FinancingCalculator::new`] to supply another.
#[derive(Debug, Clone, Copy)]
pub struct FinancingCalculator<'a> {
    tax_table: &'a TaxTable,
}

impl Default for FinancingCalculator<'static> {
    fn default() -> Self {
        Self::new(TaxTable::canadian())
    }
}

impl<'a> FinancingCalculator<'a> {
    pub fn new(tax_table: &'a TaxTable) -> Self {
        Self { tax_table }
    }

    /// Compute the financing breakdown for `options`.
    ///
    /// 1. The tax rate is `custom_tax_rate` if given, otherwise the region's
    ///    rate (zero for unknown regions).
    /// 2. The taxable amount is `price − down payment − trade-in`, plus fees
    ///    when they are financed, floored at zero.
    /// 3. Tax is `taxable amount × rate`.
    /// 4. The financed principal is the unfloored taxable base plus tax,
    ///    floored at zero.
    ///
    /// # Errors
    ///
    /// Returns [`FinancingError::NegativeAmount`] if the price, down payment,
    /// trade-in value or fees are negative,
    /// [`FinancingError::InvalidTaxRate`] if a custom rate is outside `[0, 1]`,
    /// and [`FinancingError::Overflow`] if an amount leaves the decimal range.
    pub fn calculate(
        &self,
        options: &FinancingOptions,
    ) -> Result<FinancingCalculationResult, FinancingError> {
        ensure_non_negative("vehiclePrice", options.vehicle_price)?;
        ensure_non_negative("downPayment", options.down_payment)?;
        ensure_non_negative("tradeInValue", options.trade_in_value)?;
        ensure_non_negative("fees", options.fees)?;

        let region = options.region.as_deref();
        let tax_rate = match options.custom_tax_rate {
            Some(rate) => {
                if rate < Decimal::ZERO || rate > Decimal::ONE {
                    return Err(FinancingError::InvalidTaxRate(rate));
                }
                if self.tax_table.is_supported_region(region) {
                    warn!(
                        region = ?region,
                        custom_tax_rate = %rate,
                        region_tax_rate = %self.tax_table.tax_rate(region),
                        "custom tax rate overrides region rate"
                    );
                }
                rate
            }
            None => self.tax_table.tax_rate(region),
        };

        let mut base = options
            .vehicle_price
            .checked_sub(options.down_payment)
            .and_then(|amount| amount.checked_sub(options.trade_in_value))
            .ok_or(FinancingError::Overflow)?;
        if options.finance_fees {
            base = base
                .checked_add(options.fees)
                .ok_or(FinancingError::Overflow)?;
        }

        let taxable_amount = base.max(Decimal::ZERO);
        let tax_amount = taxable_amount
            .checked_mul(tax_rate)
            .ok_or(FinancingError::Overflow)?;
        let financed_principal = base
            .checked_add(tax_amount)
            .ok_or(FinancingError::Overflow)?
            .max(Decimal::ZERO);

        debug!(
            vehicle_price = %options.vehicle_price,
            taxable_amount = %taxable_amount,
            tax_rate = %tax_rate,
            tax_amount = %tax_amount,
            financed_principal = %financed_principal,
            "computed financing breakdown"
        );

        Ok(FinancingCalculationResult {
            vehicle_price: options.vehicle_price,
            down_payment: options.down_payment,
            trade_in_value: options.trade_in_value,
            fees: options.fees,
            fees_financed: options.finance_fees,
            taxable_amount,
            tax_rate,
            tax_amount,
            financed_principal,
            region: region.and_then(data::normalize_region),
        })
    }

    /// Compute the breakdown for `options`, then the loan on its financed
    /// principal.
    ///
    /// # Errors
    ///
    /// Any error from [`FinancingCalculator::calculate`] or
    /// [`summarize_loan`].
    pub fn quote(
        &self,
        options: &FinancingOptions,
        annual_percentage_rate: Decimal,
        term_in_months: u32,
    ) -> Result<FinancingQuote, FinancingError> {
        let financing = self.calculate(options)?;
        let loan = summarize_loan(
            financing.financed_principal,
            annual_percentage_rate,
            term_in_months,
        )?;
        Ok(FinancingQuote { financing, loan })
    }
}

/// Compute a financing breakdown using the built-in Canadian tax table.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use zoomloop_financing::{FinancingOptions, calculate_financing};
///
/// let options = FinancingOptions {
///     vehicle_price: Decimal::from(30_000),
///     down_payment: Decimal::from(5_000),
///     fees: Decimal::from(1_000),
///     finance_fees: true,
///     region: Some("ON".to_string()),
///     ..Default::default()
/// };
///
/// let result = calculate_financing(&options).unwrap();
/// assert_eq!(result.taxable_amount, Decimal::from(26_000));
/// assert_eq!(result.tax_amount, Decimal::from(3_380));
/// assert_eq!(result.financed_principal, Decimal::from(29_380));
/// ```
pub fn calculate_financing(
    options: &FinancingOptions,
) -> Result<FinancingCalculationResult, FinancingError> {
    FinancingCalculator::default().calculate(options)
}

/// Financing breakdown and loan summary using the built-in tax table.
pub fn quote(
    options: &FinancingOptions,
    annual_percentage_rate: Decimal,
    term_in_months: u32,
) -> Result<FinancingQuote, FinancingError> {
    FinancingCalculator::default().quote(options, annual_percentage_rate, term_in_months)
}
