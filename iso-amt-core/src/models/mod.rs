mod calculation;
mod filing_status;
mod tax_bracket;
mod tax_year;

pub use calculation::{
    CalculationInput, CalculationRequest, CalculationRequestError, CalculationResult,
};
pub use filing_status::{FilingStatus, ParseFilingStatusError};
pub use tax_bracket::{BracketTax, TaxBracket};
pub use tax_year::{ParseTaxYearError, TaxYear};
