use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when text names no supported filing status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognised filing status '{0}'")]
pub struct ParseFilingStatusError(pub String);

/// Filing statuses covered by the lookup tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilingStatus {
    Single,
    HeadOfHousehold,
    MarriedFilingJointly,
    MarriedFilingSeparately,
}

impl FilingStatus {
    /// Every status, in the order the calculator form lists them.
    pub const ALL: [FilingStatus; 4] = [
        Self::Single,
        Self::HeadOfHousehold,
        Self::MarriedFilingJointly,
        Self::MarriedFilingSeparately,
    ];

    /// Short code, e.g. `"MFJ"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "S",
            Self::HeadOfHousehold => "HOH",
            Self::MarriedFilingJointly => "MFJ",
            Self::MarriedFilingSeparately => "MFS",
        }
    }

    /// Full label, e.g. `"Married Filing Jointly"`.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Single => "Single",
            Self::HeadOfHousehold => "Head of Household",
            Self::MarriedFilingJointly => "Married Filing Jointly",
            Self::MarriedFilingSeparately => "Married Filing Separately",
        }
    }

    /// Accepts either the short code or the full label, ignoring case and
    /// surrounding whitespace.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|status| {
                status.as_str().eq_ignore_ascii_case(s) || status.label().eq_ignore_ascii_case(s)
            })
    }
}

impl fmt::Display for FilingStatus {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FilingStatus {
    type Err = ParseFilingStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ParseFilingStatusError(s.to_string()))
    }
}
