use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A marginal rate and the taxable income at which it starts to apply.
///
/// The upper edge of a bracket is the next bracket's `min_income`; the last
/// bracket in a schedule is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub tax_rate: Decimal,
    pub min_income: Decimal,
}

impl TaxBracket {
    pub const fn new(
        tax_rate: Decimal,
        min_income: Decimal,
    ) -> Self {
        Self {
            tax_rate,
            min_income,
        }
    }
}

/// One bracket's share of the ordinary income tax, for explanatory display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketTax {
    pub tax_rate: Decimal,
    /// Taxable income where this bracket starts.
    pub income_from: Decimal,
    /// Upper edge of the income actually taxed in this bracket.
    pub income_to: Decimal,
    /// Unrounded tax attributed to this bracket.
    pub tax: Decimal,
}
