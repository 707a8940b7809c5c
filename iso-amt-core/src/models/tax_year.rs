use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported tax year '{0}' (expected 2024 or 2025)")]
pub struct ParseTaxYearError(pub String);

/// Tax years with tabulated brackets, deductions and AMT parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TaxYear {
    #[serde(rename = "2024")]
    Y2024,
    #[serde(rename = "2025")]
    Y2025,
}

impl TaxYear {
    pub const ALL: [TaxYear; 2] = [Self::Y2024, Self::Y2025];

    pub fn year(&self) -> i32 {
        match self {
            Self::Y2024 => 2024,
            Self::Y2025 => 2025,
        }
    }

    pub fn from_year(year: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|y| y.year() == year)
    }
}

impl fmt::Display for TaxYear {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}", self.year())
    }
}

impl FromStr for TaxYear {
    type Err = ParseTaxYearError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i32>()
            .ok()
            .and_then(Self::from_year)
            .ok_or_else(|| ParseTaxYearError(s.to_string()))
    }
}
