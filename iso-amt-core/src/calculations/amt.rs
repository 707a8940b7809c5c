//! Alternative minimum tax on an ISO exercise.
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Adjustment: (fair market value - strike price) × shares exercised |
//! | 2    | AMT income: annual income + adjustment |
//! | 3    | Exemption, reduced by 25% of AMT income above the phaseout threshold |
//! | 4    | AMT base: AMT income - exemption, minimum 0 |
//! | 5    | Tentative minimum tax: base × 26%, or × 28% above the rate threshold |
//! | 6    | Payable tax: larger of tentative minimum tax and ordinary income tax |
//!
//! The rate in step 5 is a single step: the whole base is taxed at one rate.

use rust_decimal::Decimal;

use crate::calculations::common::max;
use crate::models::{FilingStatus, TaxYear};
use crate::tables::{AMT_LOWER_RATE, AMT_PHASEOUT_RATE, AMT_UPPER_RATE, year_tables};

/// ISO bargain element added to AMT income. Negative for underwater options.
pub fn amt_adjustment(
    num_shares: Decimal,
    strike_price: Decimal,
    fair_market_value: Decimal,
) -> Decimal {
    fair_market_value
        .saturating_sub(strike_price)
        .saturating_mul(num_shares)
}

/// Income subject to AMT before the exemption. Not floored.
pub fn amt_income(
    annual_income: Decimal,
    adjustment: Decimal,
) -> Decimal {
    annual_income.saturating_add(adjustment)
}

/// Exemption for the year and status after the phaseout.
pub fn amt_exemption(
    amt_income: Decimal,
    tax_year: TaxYear,
    filing_status: FilingStatus,
) -> Decimal {
    let tables = year_tables(tax_year);
    let base = tables.amt_exemption.get(filing_status);
    let phaseout_threshold = tables.amt_phaseout_threshold.get(filing_status);

    if amt_income <= phaseout_threshold {
        return base;
    }

    let reduction = (amt_income - phaseout_threshold) * AMT_PHASEOUT_RATE;
    max(base - reduction, Decimal::ZERO)
}

pub fn amt_base(
    amt_income: Decimal,
    amt_exemption: Decimal,
) -> Decimal {
    max(amt_income.saturating_sub(amt_exemption), Decimal::ZERO)
}

/// Rate applied to the whole AMT base.
pub fn amt_rate(
    amt_base: Decimal,
    tax_year: TaxYear,
    filing_status: FilingStatus,
) -> Decimal {
    if amt_base <= year_tables(tax_year).amt_rate_threshold.get(filing_status) {
        AMT_LOWER_RATE
    } else {
        AMT_UPPER_RATE
    }
}

pub fn tentative_min_tax(
    amt_base: Decimal,
    tax_year: TaxYear,
    filing_status: FilingStatus,
) -> Decimal {
    amt_base * amt_rate(amt_base, tax_year, filing_status)
}

/// The taxpayer owes whichever is larger.
pub fn payable_tax(
    tentative_min_tax: Decimal,
    ordinary_income_tax: Decimal,
) -> Decimal {
    max(tentative_min_tax, ordinary_income_tax)
}
