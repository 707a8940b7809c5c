use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculations::common::{max, parse_lenient_decimal};
use crate::models::{FilingStatus, ParseFilingStatusError, ParseTaxYearError, TaxYear};

/// Errors converting a [`CalculationRequest`] into a [`CalculationInput`].
///
/// Only the two closed selections can fail; numeric fields never do.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalculationRequestError {
    #[error(transparent)]
    TaxYear(#[from] ParseTaxYearError),

    #[error(transparent)]
    FilingStatus(#[from] ParseFilingStatusError),
}

/// Text form of a calculation, as a form or CSV row supplies it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationRequest {
    pub tax_year: String,
    pub filing_status: String,
    pub annual_income: String,
    #[serde(rename = "numISOs")]
    pub num_isos: String,
    pub strike_price: String,
    pub share_value: String,
}

impl Default for CalculationRequest {
    fn default() -> Self {
        Self {
            tax_year: "2024".to_string(),
            filing_status: "Single".to_string(),
            annual_income: "150000".to_string(),
            num_isos: "1000".to_string(),
            strike_price: "5.00".to_string(),
            share_value: "25.00".to_string(),
        }
    }
}

impl CalculationRequest {
    /// Resolves the selections and coerces the numeric text.
    ///
    /// Unparsable numeric text becomes zero.
    ///
    /// # Errors
    ///
    /// Returns [`CalculationRequestError`] if the tax year or filing status
    /// names no tabulated value.
    pub fn to_input(&self) -> Result<CalculationInput, CalculationRequestError> {
        Ok(CalculationInput {
            tax_year: self.tax_year.parse()?,
            filing_status: self.filing_status.parse()?,
            annual_income: parse_lenient_decimal(&self.annual_income),
            num_shares: parse_lenient_decimal(&self.num_isos),
            strike_price: parse_lenient_decimal(&self.strike_price),
            fair_market_value: parse_lenient_decimal(&self.share_value),
        })
    }
}

/// Typed inputs to [`crate::TaxEngine::calculate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationInput {
    pub tax_year: TaxYear,
    pub filing_status: FilingStatus,
    pub annual_income: Decimal,
    pub num_shares: Decimal,
    pub strike_price: Decimal,
    pub fair_market_value: Decimal,
}

/// Everything derived from one [`CalculationInput`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Annual income as entered.
    pub income: Decimal,

    /// ISO bargain element: (fair market value - strike) x shares.
    /// Negative when the options are underwater.
    pub adjustment: Decimal,

    /// Income plus the adjustment.
    pub amt_income: Decimal,

    /// Exemption after the phaseout.
    pub amt_exemption: Decimal,

    /// AMT income less the exemption, floored at zero.
    pub amt_base: Decimal,

    pub tentative_min_tax: Decimal,

    /// Regular tax after the standard deduction, rounded to whole dollars.
    pub ordinary_income_tax: Decimal,

    /// The greater of tentative minimum tax and ordinary income tax.
    pub payable_tax: Decimal,
}

impl CalculationResult {
    /// Tax owed on top of the ordinary income tax because of AMT.
    pub fn amt_owed(&self) -> Decimal {
        max(
            self.tentative_min_tax - self.ordinary_income_tax,
            Decimal::ZERO,
        )
    }

    pub fn owes_amt(&self) -> bool {
        self.tentative_min_tax > self.ordinary_income_tax
    }
}
