//! Federal tax parameters for the supported tax years.
//!
//! Each [`YearTables`] bundles the bracket schedules, standard deductions and
//! AMT parameters for one year. Lookups go through exhaustive matches on
//! [`TaxYear`] and [`FilingStatus`], so a table cannot be missing an entry.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{FilingStatus, TaxBracket, TaxYear};

/// Share of AMT income above the phaseout threshold that reduces the exemption.
pub const AMT_PHASEOUT_RATE: Decimal = dec!(0.25);

/// AMT rate applied when the AMT base is at or below the rate threshold.
pub const AMT_LOWER_RATE: Decimal = dec!(0.26);

/// AMT rate applied when the AMT base exceeds the rate threshold.
pub const AMT_UPPER_RATE: Decimal = dec!(0.28);

/// One value per filing status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByStatus<T> {
    pub single: T,
    pub head_of_household: T,
    pub married_filing_jointly: T,
    pub married_filing_separately: T,
}

impl<T: Copy> ByStatus<T> {
    pub fn get(
        &self,
        status: FilingStatus,
    ) -> T {
        match status {
            FilingStatus::Single => self.single,
            FilingStatus::HeadOfHousehold => self.head_of_household,
            FilingStatus::MarriedFilingJointly => self.married_filing_jointly,
            FilingStatus::MarriedFilingSeparately => self.married_filing_separately,
        }
    }
}

/// All parameters for a single tax year.
#[derive(Debug, PartialEq, Eq)]
pub struct YearTables {
    pub tax_year: TaxYear,
    pub standard_deduction: ByStatus<Decimal>,
    pub amt_exemption: ByStatus<Decimal>,
    /// AMT income above which the exemption shrinks.
    pub amt_phaseout_threshold: ByStatus<Decimal>,
    /// AMT base separating the 26% and 28% rates.
    pub amt_rate_threshold: ByStatus<Decimal>,
    pub brackets: ByStatus<&'static [TaxBracket]>,
}

/// Returns the parameters for `year`.
pub fn year_tables(year: TaxYear) -> &'static YearTables {
    match year {
        TaxYear::Y2024 => &TABLES_2024,
        TaxYear::Y2025 => &TABLES_2025,
    }
}

const RATES: [Decimal; 7] = [
    dec!(0.10),
    dec!(0.12),
    dec!(0.22),
    dec!(0.24),
    dec!(0.32),
    dec!(0.35),
    dec!(0.37),
];

/// Pairs the seven marginal rates with a year's thresholds.
const fn ladder(thresholds: [Decimal; 7]) -> [TaxBracket; 7] {
    let mut brackets = [TaxBracket::new(Decimal::ZERO, Decimal::ZERO); 7];
    let mut i = 0;
    while i < brackets.len() {
        brackets[i] = TaxBracket::new(RATES[i], thresholds[i]);
        i += 1;
    }
    brackets
}

// ─── 2024 ───────────────────────────────────────────────────────────────────

static SINGLE_2024: [TaxBracket; 7] = ladder([
    dec!(0),
    dec!(11600),
    dec!(47150),
    dec!(100525),
    dec!(191950),
    dec!(243725),
    dec!(609350),
]);

static HEAD_OF_HOUSEHOLD_2024: [TaxBracket; 7] = ladder([
    dec!(0),
    dec!(16550),
    dec!(63100),
    dec!(100500),
    dec!(191950),
    dec!(243700),
    dec!(609350),
]);

static MARRIED_JOINT_2024: [TaxBracket; 7] = ladder([
    dec!(0),
    dec!(23200),
    dec!(94300),
    dec!(201050),
    dec!(383900),
    dec!(487450),
    dec!(731200),
]);

static MARRIED_SEPARATE_2024: [TaxBracket; 7] = ladder([
    dec!(0),
    dec!(11600),
    dec!(47150),
    dec!(100525),
    dec!(191950),
    dec!(243725),
    dec!(365600),
]);

static TABLES_2024: YearTables = YearTables {
    tax_year: TaxYear::Y2024,
    standard_deduction: ByStatus {
        single: dec!(14600),
        head_of_household: dec!(21900),
        married_filing_jointly: dec!(29200),
        married_filing_separately: dec!(14600),
    },
    amt_exemption: ByStatus {
        single: dec!(85700),
        head_of_household: dec!(85700),
        married_filing_jointly: dec!(133300),
        married_filing_separately: dec!(66650),
    },
    amt_phaseout_threshold: ByStatus {
        single: dec!(609350),
        head_of_household: dec!(609350),
        married_filing_jointly: dec!(1218700),
        married_filing_separately: dec!(609350),
    },
    amt_rate_threshold: ByStatus {
        single: dec!(232600),
        head_of_household: dec!(232600),
        married_filing_jointly: dec!(232600),
        married_filing_separately: dec!(116300),
    },
    brackets: ByStatus {
        single: &SINGLE_2024,
        head_of_household: &HEAD_OF_HOUSEHOLD_2024,
        married_filing_jointly: &MARRIED_JOINT_2024,
        married_filing_separately: &MARRIED_SEPARATE_2024,
    },
};

// ─── 2025 ───────────────────────────────────────────────────────────────────

static SINGLE_2025: [TaxBracket; 7] = ladder([
    dec!(0),
    dec!(11925),
    dec!(48475),
    dec!(103350),
    dec!(197300),
    dec!(250525),
    dec!(626350),
]);

static HEAD_OF_HOUSEHOLD_2025: [TaxBracket; 7] = ladder([
    dec!(0),
    dec!(17000),
    dec!(64850),
    dec!(103350),
    dec!(197300),
    dec!(250500),
    dec!(626350),
]);

static MARRIED_JOINT_2025: [TaxBracket; 7] = ladder([
    dec!(0),
    dec!(23850),
    dec!(96950),
    dec!(206700),
    dec!(394600),
    dec!(501050),
    dec!(751600),
]);

static MARRIED_SEPARATE_2025: [TaxBracket; 7] = ladder([
    dec!(0),
    dec!(11925),
    dec!(48500),
    dec!(103375),
    dec!(197400),
    dec!(250800),
    dec!(375800),
]);

static TABLES_2025: YearTables = YearTables {
    tax_year: TaxYear::Y2025,
    standard_deduction: ByStatus {
        single: dec!(15000),
        head_of_household: dec!(22500),
        married_filing_jointly: dec!(30000),
        married_filing_separately: dec!(15000),
    },
    amt_exemption: ByStatus {
        single: dec!(88100),
        head_of_household: dec!(88100),
        married_filing_jointly: dec!(137000),
        married_filing_separately: dec!(68500),
    },
    amt_phaseout_threshold: ByStatus {
        single: dec!(626350),
        head_of_household: dec!(626350),
        married_filing_jointly: dec!(1252700),
        married_filing_separately: dec!(626350),
    },
    amt_rate_threshold: ByStatus {
        single: dec!(239100),
        head_of_household: dec!(239100),
        married_filing_jointly: dec!(239100),
        married_filing_separately: dec!(119550),
    },
    brackets: ByStatus {
        single: &SINGLE_2025,
        head_of_household: &HEAD_OF_HOUSEHOLD_2025,
        married_filing_jointly: &MARRIED_JOINT_2025,
        married_filing_separately: &MARRIED_SEPARATE_2025,
    },
};
