//! Sales-tax lookup, financing breakdowns and amortized payments for the
//! ZoomLoop used-vehicle marketplace.
//!
//! # Overview
//!
//! Buying a car on credit involves three numbers this crate computes:
//!
//! - **Sales-tax rate**: Looked up from a table of Canadian provincial and
//!   territorial rates by region code (`"ON"`, `"QC"`, ...). Codes are
//!   trimmed and case-insensitive; unknown or blank codes are untaxed.
//!
//! - **Financing breakdown**: The taxable amount is the price less the down
//!   payment and trade-in, plus fees when they are rolled into the loan.
//!   Tax is applied to that amount, and the financed principal is the base
//!   plus tax. Both amounts are floored at zero.
//!
//! - **Monthly payment**: The standard amortized payment
//!   `P × r / (1 − (1 + r)^−n)` with `r = APR / 12`, rounded to cents.
//!
//! All amounts are [`rust_decimal::Decimal`], so tax and payment figures are
//! exact to the cent. Every function is pure and the tax table is a
//! read-only static, so calls are safe from any thread.
//!
//! # Examples
//!
//! ```
//! use rust_decimal::Decimal;
//! use zoomloop_financing::{
//!     FinancingOptions, calculate_financing, calculate_monthly_payment, get_tax_rate,
//! };
//!
//! assert_eq!(get_tax_rate(Some("on")), Decimal::new(13, 2));
//!
//! let options = FinancingOptions {
//!     vehicle_price: Decimal::from(30_000),
//!     down_payment: Decimal::from(5_000),
//!     fees: Decimal::from(1_000),
//!     finance_fees: false,
//!     region: Some("ON".to_string()),
//!     ..Default::default()
//! };
//! let breakdown = calculate_financing(&options).unwrap();
//! assert_eq!(breakdown.tax_amount, Decimal::from(3_250));
//! assert_eq!(breakdown.financed_principal, Decimal::from(28_250));
//!
//! // 6.99% APR over 72 months
//! let apr = Decimal::new(699, 4);
//! let payment = calculate_monthly_payment(breakdown.financed_principal, apr, 72).unwrap();
//! assert!(payment > Decimal::ZERO);
//! ```
//!
//! # Tax data
//!
//! The built-in rates are stored in `data/tax_rates.csv` and embedded into
//! the binary at compile time via [`include_str!`]. A different table can be
//! loaded with [`TaxTable::from_csv`] and passed to
//! [`FinancingCalculator::new`].
//!
//! # Logging
//!
//! Calculations emit [`tracing`] events at `debug` level, plus a `warn` when
//! a custom tax rate overrides a supported region. The crate never installs
//! a subscriber.

mod data;
mod financing;
mod payment;
mod tax;
mod types;

pub use financing::{FinancingCalculator, calculate_financing, quote};
pub use payment::{
    NEAR_ZERO_MONTHLY_RATE, calculate_monthly_payment, calculate_payment, summarize_loan,
};
pub use tax::{TaxRegion, TaxTable, get_all_tax_rates, get_tax_rate, is_supported_region};
pub use types::{
    FinancingCalculationResult, FinancingError, FinancingOptions, FinancingQuote, LoanSummary,
    PaymentOptions,
};
