//! Amortized monthly payments.

use rust_decimal::prelude::*;
use tracing::debug;

use crate::types::{FinancingError, LoanSummary, PaymentOptions, ensure_non_negative};

/// Monthly rates below this use straight division instead of the
/// amortization formula, whose denominator tends to zero with the rate.
pub const NEAR_ZERO_MONTHLY_RATE: Decimal = Decimal::from_parts(1, 0, 0, false, 6);

const CENTS: u32 = 2;
const ROUNDING: RoundingStrategy = RoundingStrategy::MidpointAwayFromZero;

/// Compute the fixed monthly payment that repays `principal` over
/// `term_in_months` at `annual_percentage_rate`.
///
/// Uses `P × r / (1 − (1 + r)^−n)` with `r = APR / 12`, falling back to
/// `P / n` when `r` is below [`NEAR_ZERO_MONTHLY_RATE`]. The result is
/// rounded to cents, half away from zero. Rounding happens only at the end.
///
/// # Errors
///
/// Returns [`FinancingError::NegativeAmount`] for a negative principal,
/// [`FinancingError::NegativeRate`] for a negative APR,
/// [`FinancingError::InvalidTerm`] for a zero-month term, and
/// [`FinancingError::Overflow`] if the payment exceeds the decimal range.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use zoomloop_financing::calculate_monthly_payment;
///
/// // $20,000 at 6% over five years
/// let payment = calculate_monthly_payment(Decimal::from(20_000), Decimal::new(6, 2), 60).unwrap();
/// assert_eq!(payment, Decimal::new(38666, 2));
///
/// // Interest-free
/// let payment = calculate_monthly_payment(Decimal::from(1_000), Decimal::ZERO, 6).unwrap();
/// assert_eq!(payment, Decimal::new(16667, 2));
/// ```
pub fn calculate_monthly_payment(
    principal: Decimal,
    annual_percentage_rate: Decimal,
    term_in_months: u32,
) -> Result<Decimal, FinancingError> {
    ensure_non_negative("principal", principal)?;
    if annual_percentage_rate < Decimal::ZERO {
        return Err(FinancingError::NegativeRate(annual_percentage_rate));
    }
    if term_in_months == 0 {
        return Err(FinancingError::InvalidTerm);
    }
    if principal.is_zero() {
        return Ok(Decimal::ZERO);
    }

    let term = Decimal::from(term_in_months);
    let monthly_rate = annual_percentage_rate / Decimal::from(12);

    let payment = if monthly_rate < NEAR_ZERO_MONTHLY_RATE {
        principal / term
    } else {
        amortized_payment(principal, monthly_rate, term_in_months)?
    };
    let payment = payment.round_dp_with_strategy(CENTS, ROUNDING);

    debug!(
        principal = %principal,
        annual_percentage_rate = %annual_percentage_rate,
        term_in_months,
        monthly_payment = %payment,
        "computed monthly payment"
    );

    Ok(payment)
}

/// `P × r / (1 − (1 + r)^−n)`, unrounded.
fn amortized_payment(
    principal: Decimal,
    monthly_rate: Decimal,
    term_in_months: u32,
) -> Result<Decimal, FinancingError> {
    let interest = monthly_rate
        .checked_mul(principal)
        .ok_or(FinancingError::Overflow)?;

    // When (1 + r)^n leaves the decimal range its reciprocal is below
    // decimal resolution, so the discount term is zero.
    let discount = (Decimal::ONE + monthly_rate)
        .checked_powu(u64::from(term_in_months))
        .and_then(|growth| Decimal::ONE.checked_div(growth))
        .unwrap_or(Decimal::ZERO);

    interest
        .checked_div(Decimal::ONE - discount)
        .ok_or(FinancingError::Overflow)
}

/// Monthly payment for `options`. See [`calculate_monthly_payment`].
pub fn calculate_payment(options: &PaymentOptions) -> Result<Decimal, FinancingError> {
    calculate_monthly_payment(
        options.principal,
        options.annual_percentage_rate,
        options.term_in_months,
    )
}

/// Monthly payment plus total cost of borrowing.
///
/// `total_of_payments` is the rounded payment times the term, so it can sit
/// a few cents either side of the exact figure; `total_interest` is floored
/// at zero.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use zoomloop_financing::summarize_loan;
///
/// let summary = summarize_loan(Decimal::from(10_000), Decimal::new(5, 2), 36).unwrap();
/// assert_eq!(summary.monthly_payment, Decimal::new(29971, 2));
/// assert_eq!(summary.total_of_payments, Decimal::new(1078956, 2));
/// assert_eq!(summary.total_interest, Decimal::new(78956, 2));
/// ```
pub fn summarize_loan(
    principal: Decimal,
    annual_percentage_rate: Decimal,
    term_in_months: u32,
) -> Result<LoanSummary, FinancingError> {
    let monthly_payment =
        calculate_monthly_payment(principal, annual_percentage_rate, term_in_months)?;
    let total_of_payments = monthly_payment
        .checked_mul(Decimal::from(term_in_months))
        .ok_or(FinancingError::Overflow)?;
    let total_interest = (total_of_payments - principal).max(Decimal::ZERO);

    Ok(LoanSummary {
        monthly_payment,
        total_of_payments,
        total_interest,
    })
}
