//! Public types: request and response records, and error definitions.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Inputs to a financing breakdown.
///
/// Field names serialize in camelCase so the record can be bound straight
/// from a request body. `tradeInValue`, `fees` and `financeFees` may be
/// omitted and default to zero and `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancingOptions {
    /// Sticker price of the vehicle.
    pub vehicle_price: Decimal,
    /// Cash paid up front.
    pub down_payment: Decimal,
    /// Credit given for the buyer's current vehicle.
    #[serde(default)]
    pub trade_in_value: Decimal,
    /// Dealer and registration fees.
    #[serde(default)]
    pub fees: Decimal,
    /// Whether `fees` are rolled into the loan (and taxed with it).
    #[serde(default)]
    pub finance_fees: bool,
    /// Region code used to look up the sales-tax rate, e.g. `"ON"`.
    #[serde(default)]
    pub region: Option<String>,
    /// Overrides the region's rate when present. Must be within `[0, 1]`.
    #[serde(default)]
    pub custom_tax_rate: Option<Decimal>,
}

/// The outcome of a financing breakdown.
///
/// Echoes the inputs next to the derived amounts. `region` holds the
/// normalized code, or `None` if no region was supplied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancingCalculationResult {
    pub vehicle_price: Decimal,
    pub down_payment: Decimal,
    pub trade_in_value: Decimal,
    pub fees: Decimal,
    pub fees_financed: bool,
    /// Amount subject to sales tax, never negative.
    pub taxable_amount: Decimal,
    /// The rate actually applied.
    pub tax_rate: Decimal,
    pub tax_amount: Decimal,
    /// Amount to be borrowed, never negative.
    pub financed_principal: Decimal,
    pub region: Option<String>,
}

/// Inputs to the monthly payment calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentOptions {
    pub principal: Decimal,
    /// Annual rate as a fraction (`0.0699` for 6.99%).
    pub annual_percentage_rate: Decimal,
    pub term_in_months: u32,
}

/// Cost of borrowing for a fixed-rate loan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanSummary {
    /// Monthly payment, rounded to cents.
    pub monthly_payment: Decimal,
    /// `monthly_payment × term_in_months`.
    pub total_of_payments: Decimal,
    /// `total_of_payments − principal`, never negative.
    pub total_interest: Decimal,
}

/// A financing breakdown together with the loan it implies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancingQuote {
    pub financing: FinancingCalculationResult,
    pub loan: LoanSummary,
}

/// Errors that can occur during financing and payment calculations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FinancingError {
    /// A currency input was negative. `field` is the input's wire name.
    #[error("{field} cannot be negative, got {value}")]
    NegativeAmount { field: &'static str, value: Decimal },

    /// The annual percentage rate was negative.
    #[error("annual percentage rate cannot be negative, got {0}")]
    NegativeRate(Decimal),

    /// A custom tax rate fell outside `[0, 1]`.
    #[error("tax rate must be between 0 and 1, got {0}")]
    InvalidTaxRate(Decimal),

    /// The loan term was zero months.
    #[error("term in months must be greater than zero")]
    InvalidTerm,

    /// An intermediate amount exceeded the decimal range. Not an invalid
    /// argument: every input passed validation.
    #[error("calculation overflowed the supported amount range")]
    Overflow,

    /// A tax table supplied as CSV could not be loaded.
    #[error("invalid tax table at line {line}: {reason}")]
    InvalidTaxTable { line: usize, reason: String },
}

impl FinancingError {
    /// Whether the error was caused by a request value failing validation.
    /// Callers map these to a client error.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            FinancingError::NegativeAmount { .. }
                | FinancingError::NegativeRate(_)
                | FinancingError::InvalidTaxRate(_)
                | FinancingError::InvalidTerm
        )
    }
}

/// Reject a negative currency input.
pub(crate) fn ensure_non_negative(
    field: &'static str,
    value: Decimal,
) -> Result<(), FinancingError> {
    if value < Decimal::ZERO {
        return Err(FinancingError::NegativeAmount { field, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use serde_json::json;

    use super::*;

    #[test]
    fn options_bind_from_camel_case_body() {
        let body = json!({
            "vehiclePrice": 30000,
            "downPayment": 5000,
            "region": "ON",
        });

        let options: FinancingOptions = serde_json::from_value(body).unwrap();

        assert_eq!(options.vehicle_price, dec!(30000));
        assert_eq!(options.down_payment, dec!(5000));
        assert_eq!(options.trade_in_value, Decimal::ZERO);
        assert_eq!(options.fees, Decimal::ZERO);
        assert!(!options.finance_fees);
        assert_eq!(options.region.as_deref(), Some("ON"));
        assert_eq!(options.custom_tax_rate, None);
    }

    #[test]
    fn result_serializes_wire_names() {
        let result = FinancingCalculationResult {
            vehicle_price: dec!(100),
            down_payment: dec!(0),
            trade_in_value: dec!(0),
            fees: dec!(0),
            fees_financed: true,
            taxable_amount: dec!(100),
            tax_rate: dec!(0.13),
            tax_amount: dec!(13),
            financed_principal: dec!(113),
            region: Some("ON".to_string()),
        };

        let value = serde_json::to_value(&result).unwrap();
        let mut keys: Vec<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        keys.sort_unstable();

        assert_eq!(
            keys,
            vec![
                "downPayment",
                "fees",
                "feesFinanced",
                "financedPrincipal",
                "region",
                "taxAmount",
                "taxRate",
                "taxableAmount",
                "tradeInValue",
                "vehiclePrice",
            ]
        );
    }

    #[test]
    fn zero_is_not_negative() {
        assert_eq!(ensure_non_negative("fees", Decimal::ZERO), Ok(()));
        assert_eq!(
            ensure_non_negative("fees", dec!(-0.01)),
            Err(FinancingError::NegativeAmount {
                field: "fees",
                value: dec!(-0.01),
            })
        );
    }

    #[test]
    fn only_validation_errors_are_client_errors() {
        assert!(FinancingError::InvalidTerm.is_invalid_argument());
        assert!(FinancingError::NegativeRate(dec!(-1)).is_invalid_argument());
        assert!(FinancingError::InvalidTaxRate(dec!(2)).is_invalid_argument());
        assert!(
            FinancingError::NegativeAmount {
                field: "fees",
                value: dec!(-1),
            }
            .is_invalid_argument()
        );
        assert!(!FinancingError::Overflow.is_invalid_argument());
        assert!(
            !FinancingError::InvalidTaxTable {
                line: 2,
                reason: "missing rate".to_string(),
            }
            .is_invalid_argument()
        );
    }
}
