//! Regular federal income tax from the progressive bracket schedules.
//!
//! Taxable income is annual income less the standard deduction, minimum 0.
//! Each bracket taxes the slice of income between its threshold and the next
//! bracket's threshold (the last bracket is unbounded); the walk stops at the
//! first bracket that starts at or above the taxable income. The total is
//! rounded to whole dollars once, after summing.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use iso_amt_core::calculations::OrdinaryTaxSchedule;
//! use iso_amt_core::{FilingStatus, TaxYear};
//!
//! let schedule = OrdinaryTaxSchedule::for_year(TaxYear::Y2025, FilingStatus::Single);
//!
//! // 1192.50 + 4386 + (85000 - 48475) * 0.22
//! assert_eq!(schedule.tax(dec!(85000)), dec!(13614));
//! ```

use rust_decimal::Decimal;

use crate::calculations::common::{max, round_to_whole};
use crate::models::{BracketTax, FilingStatus, TaxBracket, TaxYear};
use crate::tables::year_tables;

/// Applies one bracket schedule to taxable income.
#[derive(Debug, Clone, Copy)]
pub struct OrdinaryTaxSchedule<'a> {
    brackets: &'a [TaxBracket],
}

impl<'a> OrdinaryTaxSchedule<'a> {
    /// Brackets must be sorted by `min_income`, starting at 0.
    pub fn new(brackets: &'a [TaxBracket]) -> Self {
        Self { brackets }
    }

    /// Tax on `taxable_income`, rounded to whole dollars.
    pub fn tax(
        &self,
        taxable_income: Decimal,
    ) -> Decimal {
        let total: Decimal = self
            .contributions(taxable_income)
            .map(|slice| slice.tax)
            .sum();
        round_to_whole(total)
    }

    /// Brackets that contribute tax, lowest first, with unrounded amounts.
    pub fn breakdown(
        &self,
        taxable_income: Decimal,
    ) -> Vec<BracketTax> {
        self.contributions(taxable_income)
            .filter(|slice| slice.tax > Decimal::ZERO)
            .collect()
    }

    fn contributions(
        &self,
        taxable_income: Decimal,
    ) -> impl Iterator<Item = BracketTax> + '_ {
        self.brackets
            .iter()
            .enumerate()
            .take_while(move |(_, bracket)| taxable_income > bracket.min_income)
            .map(move |(index, bracket)| {
                let income_to = match self.brackets.get(index + 1) {
                    Some(next) => next.min_income.min(taxable_income),
                    None => taxable_income,
                };
                BracketTax {
                    tax_rate: bracket.tax_rate,
                    income_from: bracket.min_income,
                    income_to,
                    tax: (income_to - bracket.min_income) * bracket.tax_rate,
                }
            })
    }
}

impl OrdinaryTaxSchedule<'static> {
    pub fn for_year(
        tax_year: TaxYear,
        filing_status: FilingStatus,
    ) -> Self {
        Self::new(year_tables(tax_year).brackets.get(filing_status))
    }
}

/// Annual income less the standard deduction, minimum 0.
pub fn taxable_income(
    annual_income: Decimal,
    tax_year: TaxYear,
    filing_status: FilingStatus,
) -> Decimal {
    let deduction = year_tables(tax_year).standard_deduction.get(filing_status);
    max(annual_income.saturating_sub(deduction), Decimal::ZERO)
}

/// Regular income tax on `annual_income`, rounded to whole dollars.
pub fn ordinary_income_tax(
    annual_income: Decimal,
    tax_year: TaxYear,
    filing_status: FilingStatus,
) -> Decimal {
    OrdinaryTaxSchedule::for_year(tax_year, filing_status)
        .tax(taxable_income(annual_income, tax_year, filing_status))
}

/// Per-bracket explanation of [`ordinary_income_tax`] for the same income.
pub fn bracket_breakdown(
    annual_income: Decimal,
    tax_year: TaxYear,
    filing_status: FilingStatus,
) -> Vec<BracketTax> {
    OrdinaryTaxSchedule::for_year(tax_year, filing_status)
        .breakdown(taxable_income(annual_income, tax_year, filing_status))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn single_2025() -> OrdinaryTaxSchedule<'static> {
        OrdinaryTaxSchedule::for_year(TaxYear::Y2025, FilingStatus::Single)
    }

    // =========================================================================
    // taxable_income tests
    // =========================================================================

    #[test]
    fn taxable_income_subtracts_standard_deduction() {
        let result = taxable_income(dec!(150000), TaxYear::Y2024, FilingStatus::Single);

        assert_eq!(result, dec!(135400));
    }

    #[test]
    fn taxable_income_returns_zero_when_deduction_exceeds_income() {
        let result = taxable_income(dec!(10000), TaxYear::Y2025, FilingStatus::HeadOfHousehold);

        assert_eq!(result, dec!(0));
    }

    // =========================================================================
    // tax tests
    // =========================================================================

    #[test]
    fn tax_is_zero_for_zero_income() {
        assert_eq!(single_2025().tax(dec!(0)), dec!(0));
    }

    #[test]
    fn tax_first_bracket() {
        assert_eq!(single_2025().tax(dec!(10000)), dec!(1000));
    }

    #[test]
    fn tax_second_bracket() {
        // 1192.50 + (30000 - 11925) * 0.12 = 3361.50, rounded
        assert_eq!(single_2025().tax(dec!(30000)), dec!(3362));
    }

    #[test]
    fn tax_highest_bracket() {
        // 188769.75 + (700000 - 626350) * 0.37 = 216020.25, rounded
        assert_eq!(single_2025().tax(dec!(700000)), dec!(216020));
    }

    #[test]
    fn tax_at_exact_threshold_excludes_next_bracket() {
        // Full 10% and 12% brackets, nothing at 22%
        assert_eq!(single_2025().tax(dec!(48475)), round_to_whole(dec!(5578.50)));
    }

    #[test]
    fn tax_with_empty_schedule_is_zero() {
        let schedule = OrdinaryTaxSchedule::new(&[]);

        assert_eq!(schedule.tax(dec!(50000)), dec!(0));
    }

    #[test]
    fn ordinary_income_tax_applies_deduction_then_schedule() {
        let result = ordinary_income_tax(dec!(150000), TaxYear::Y2024, FilingStatus::Single);

        // 1160 + 4266 + 11742.50 + 8370 = 25538.50
        assert_eq!(result, dec!(25539));
    }

    // =========================================================================
    // breakdown tests
    // =========================================================================

    #[test]
    fn breakdown_lists_contributing_brackets() {
        let result = bracket_breakdown(dec!(150000), TaxYear::Y2024, FilingStatus::Single);

        assert_eq!(
            result,
            vec![
                BracketTax {
                    tax_rate: dec!(0.10),
                    income_from: dec!(0),
                    income_to: dec!(11600),
                    tax: dec!(1160),
                },
                BracketTax {
                    tax_rate: dec!(0.12),
                    income_from: dec!(11600),
                    income_to: dec!(47150),
                    tax: dec!(4266),
                },
                BracketTax {
                    tax_rate: dec!(0.22),
                    income_from: dec!(47150),
                    income_to: dec!(100525),
                    tax: dec!(11742.50),
                },
                BracketTax {
                    tax_rate: dec!(0.24),
                    income_from: dec!(100525),
                    income_to: dec!(135400),
                    tax: dec!(8370),
                },
            ]
        );
    }

    #[test]
    fn breakdown_is_empty_below_deduction() {
        let result = bracket_breakdown(dec!(12000), TaxYear::Y2024, FilingStatus::Single);

        assert!(result.is_empty());
    }

    #[test]
    fn breakdown_sums_to_ordinary_tax() {
        let income = dec!(987654.32);
        let total: Decimal = bracket_breakdown(income, TaxYear::Y2025, FilingStatus::MarriedFilingJointly)
            .iter()
            .map(|slice| slice.tax)
            .sum();

        assert_eq!(
            round_to_whole(total),
            ordinary_income_tax(income, TaxYear::Y2025, FilingStatus::MarriedFilingJointly)
        );
    }

    #[test]
    fn breakdown_top_bracket_runs_to_taxable_income() {
        let result = single_2025().breakdown(dec!(700000));

        let top = result.last().unwrap();
        assert_eq!(top.income_from, dec!(626350));
        assert_eq!(top.income_to, dec!(700000));
        assert_eq!(top.tax, dec!(27250.50));
    }
}
