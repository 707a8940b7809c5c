//! ISO exercise AMT calculation.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use iso_amt_core::{CalculationInput, FilingStatus, TaxEngine, TaxYear};
//!
//! let input = CalculationInput {
//!     tax_year: TaxYear::Y2024,
//!     filing_status: FilingStatus::Single,
//!     annual_income: dec!(150000),
//!     num_shares: dec!(1000),
//!     strike_price: dec!(5.00),
//!     fair_market_value: dec!(25.00),
//! };
//!
//! let result = TaxEngine::new().calculate(&input);
//!
//! assert_eq!(result.tentative_min_tax, dec!(21918));
//! assert_eq!(result.ordinary_income_tax, dec!(25539));
//! assert_eq!(result.payable_tax, dec!(25539));
//! ```

use tracing::debug;

use crate::calculations::{amt, ordinary};
use crate::models::{BracketTax, CalculationInput, CalculationResult};

/// Computes AMT exposure against ordinary tax from the static tables.
///
/// The engine holds no state; every call derives its result solely from the
/// input and the tables, and never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaxEngine;

impl TaxEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn calculate(
        &self,
        input: &CalculationInput,
    ) -> CalculationResult {
        let year = input.tax_year;
        let status = input.filing_status;

        let adjustment = amt::amt_adjustment(
            input.num_shares,
            input.strike_price,
            input.fair_market_value,
        );
        let amt_income = amt::amt_income(input.annual_income, adjustment);
        let amt_exemption = amt::amt_exemption(amt_income, year, status);
        let amt_base = amt::amt_base(amt_income, amt_exemption);
        let tentative_min_tax = amt::tentative_min_tax(amt_base, year, status);

        let ordinary_income_tax = ordinary::ordinary_income_tax(input.annual_income, year, status);

        let payable_tax = amt::payable_tax(tentative_min_tax, ordinary_income_tax);

        debug!(
            %year,
            %status,
            %adjustment,
            %amt_income,
            %amt_exemption,
            %amt_base,
            %tentative_min_tax,
            %ordinary_income_tax,
            %payable_tax,
            "calculated ISO exercise tax"
        );

        CalculationResult {
            income: input.annual_income,
            adjustment,
            amt_income,
            amt_exemption,
            amt_base,
            tentative_min_tax,
            ordinary_income_tax,
            payable_tax,
        }
    }

    /// Per-bracket explanation of the result's `ordinary_income_tax`.
    pub fn bracket_breakdown(
        &self,
        input: &CalculationInput,
    ) -> Vec<BracketTax> {
        ordinary::bracket_breakdown(input.annual_income, input.tax_year, input.filing_status)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::{FilingStatus, TaxYear};

    fn test_input() -> CalculationInput {
        CalculationInput {
            tax_year: TaxYear::Y2024,
            filing_status: FilingStatus::Single,
            annual_income: dec!(150000),
            num_shares: dec!(1000),
            strike_price: dec!(5.00),
            fair_market_value: dec!(25.00),
        }
    }

    #[test]
    fn calculate_standard_case() {
        let result = TaxEngine::new().calculate(&test_input());

        assert_eq!(
            result,
            CalculationResult {
                income: dec!(150000),
                adjustment: dec!(20000),
                amt_income: dec!(170000),
                amt_exemption: dec!(85700),
                amt_base: dec!(84300),
                tentative_min_tax: dec!(21918),
                ordinary_income_tax: dec!(25539),
                payable_tax: dec!(25539),
            }
        );
    }

    #[test]
    fn calculate_large_exercise_triggers_amt() {
        let mut input = test_input();
        input.num_shares = dec!(20000);

        let result = TaxEngine::new().calculate(&input);

        // Adjustment 400000, AMT income 550000, base 464300 at 28%
        assert_eq!(result.adjustment, dec!(400000));
        assert_eq!(result.amt_base, dec!(464300));
        assert_eq!(result.tentative_min_tax, dec!(130004));
        assert_eq!(result.payable_tax, dec!(130004));
        assert!(result.owes_amt());
    }

    #[test]
    fn calculate_phaseout_reduces_exemption() {
        let mut input = test_input();
        input.num_shares = dec!(30000);

        let result = TaxEngine::new().calculate(&input);

        // AMT income 750000; exemption 85700 - (750000 - 609350) * 0.25 = 50537.50
        assert_eq!(result.amt_income, dec!(750000));
        assert_eq!(result.amt_exemption, dec!(50537.50));
        assert_eq!(result.amt_base, dec!(699462.50));
    }

    #[test]
    fn calculate_underwater_options_keep_base_non_negative() {
        let mut input = test_input();
        input.annual_income = dec!(10000);
        input.strike_price = dec!(40.00);

        let result = TaxEngine::new().calculate(&input);

        assert_eq!(result.adjustment, dec!(-15000));
        assert_eq!(result.amt_income, dec!(-5000));
        assert_eq!(result.amt_base, Decimal::ZERO);
        assert_eq!(result.tentative_min_tax, Decimal::ZERO);
        assert_eq!(result.payable_tax, Decimal::ZERO);
    }

    #[test]
    fn calculate_zero_inputs() {
        let mut input = test_input();
        input.annual_income = Decimal::ZERO;
        input.num_shares = Decimal::ZERO;

        let result = TaxEngine::new().calculate(&input);

        assert_eq!(result.adjustment, Decimal::ZERO);
        assert_eq!(result.amt_income, Decimal::ZERO);
        assert_eq!(result.amt_base, Decimal::ZERO);
        assert_eq!(result.tentative_min_tax, Decimal::ZERO);
        assert_eq!(result.ordinary_income_tax, Decimal::ZERO);
        assert_eq!(result.payable_tax, Decimal::ZERO);
    }

    #[test]
    fn bracket_breakdown_matches_ordinary_tax() {
        let engine = TaxEngine::new();
        let input = test_input();

        let breakdown = engine.bracket_breakdown(&input);
        let total: Decimal = breakdown.iter().map(|slice| slice.tax).sum();

        assert_eq!(breakdown.len(), 4);
        assert_eq!(total, dec!(25538.50));
    }
}
