//! Text and CSV rendering of calculation results.

use std::fmt;
use std::io;

use iso_amt_core::calculations::common::round_half_up;
use iso_amt_core::calculations::ordinary::taxable_income;
use iso_amt_core::tables::year_tables;
use iso_amt_core::{BracketTax, CalculationInput, CalculationResult, FilingStatus, TaxYear};
use rust_decimal::Decimal;
use serde::Serialize;

/// Formats a dollar amount as `$1,234.56` (or `-$1,234.56`).
pub fn format_currency(value: Decimal) -> String {
    let rounded = round_half_up(value);
    let digits = format!("{:.2}", rounded.abs());
    let (whole, cents) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    format!("{sign}${grouped}.{cents}")
}

/// Formats a rate such as `0.24` as `24%`.
pub fn format_rate(rate: Decimal) -> String {
    format!("{}%", (rate * Decimal::ONE_HUNDRED).normalize())
}

/// Human-readable report of one calculation and its bracket breakdown.
pub fn render_result(
    input: &CalculationInput,
    result: &CalculationResult,
    breakdown: &[BracketTax],
) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_result(&mut out, input, result, breakdown);
    out
}

/// Writes the report [`render_result`] returns.
pub fn write_result<W: fmt::Write>(
    out: &mut W,
    input: &CalculationInput,
    result: &CalculationResult,
    breakdown: &[BracketTax],
) -> fmt::Result {
    let rows = [
        ("Income", result.income),
        ("ISO adjustment", result.adjustment),
        ("AMT income", result.amt_income),
        ("AMT exemption", result.amt_exemption),
        ("AMT base", result.amt_base),
        ("Tentative minimum tax", result.tentative_min_tax),
        ("Ordinary income tax", result.ordinary_income_tax),
        ("Payable tax", result.payable_tax),
    ];

    writeln!(
        out,
        "ISO exercise estimate for {} ({})",
        input.tax_year, input.filing_status
    )?;
    writeln!(out)?;
    for (label, value) in rows {
        writeln!(out, "  {label:<24}{:>18}", format_currency(value))?;
    }
    writeln!(out)?;

    if result.owes_amt() {
        writeln!(
            out,
            "AMT owed: {} above ordinary income tax.",
            format_currency(result.amt_owed())
        )?;
    } else {
        writeln!(out, "No AMT owed: ordinary income tax is at least the tentative minimum tax.")?;
    }

    if !breakdown.is_empty() {
        write_breakdown(out, input, result, breakdown)?;
    }
    Ok(())
}

fn write_breakdown<W: fmt::Write>(
    out: &mut W,
    input: &CalculationInput,
    result: &CalculationResult,
    breakdown: &[BracketTax],
) -> fmt::Result {
    let deduction = year_tables(input.tax_year)
        .standard_deduction
        .get(input.filing_status);
    let taxable = taxable_income(input.annual_income, input.tax_year, input.filing_status);

    writeln!(out)?;
    writeln!(out, "Tax calculation breakdown for {}:", input.tax_year)?;
    writeln!(out, "  Filing status: {}", input.filing_status)?;
    writeln!(out, "  AGI: {}", format_currency(input.annual_income))?;
    writeln!(out, "  Standard deduction: {}", format_currency(deduction))?;
    writeln!(out, "  Taxable income: {}", format_currency(taxable))?;
    for slice in breakdown {
        writeln!(
            out,
            "  {:>4} bracket ({} to {}): {}",
            format_rate(slice.tax_rate),
            format_currency(slice.income_from),
            format_currency(slice.income_to),
            format_currency(slice.tax)
        )?;
    }
    writeln!(
        out,
        "  Total tax: {}",
        format_currency(result.ordinary_income_tax)
    )
}

/// Reference parameters for one tax year, one block per filing status.
pub fn render_tables(year: TaxYear) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_tables(&mut out, year);
    out
}

/// Writes the listing [`render_tables`] returns.
pub fn write_tables<W: fmt::Write>(
    out: &mut W,
    year: TaxYear,
) -> fmt::Result {
    let tables = year_tables(year);

    writeln!(out, "Tax year {year}")?;
    for status in FilingStatus::ALL {
        let amounts = [
            ("Standard deduction", tables.standard_deduction.get(status)),
            ("AMT exemption", tables.amt_exemption.get(status)),
            ("AMT phaseout threshold", tables.amt_phaseout_threshold.get(status)),
            ("26% AMT rate threshold", tables.amt_rate_threshold.get(status)),
        ];

        writeln!(out)?;
        writeln!(out, "  {status}")?;
        for (label, amount) in amounts {
            writeln!(out, "    {label:<24}{}", format_currency(amount))?;
        }
        writeln!(out, "    Brackets:")?;
        for bracket in tables.brackets.get(status) {
            writeln!(
                out,
                "      {:>4} from {}",
                format_rate(bracket.tax_rate),
                format_currency(bracket.min_income)
            )?;
        }
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct ResultRow {
    tax_year: i32,
    filing_status: &'static str,
    income: Decimal,
    adjustment: Decimal,
    amt_income: Decimal,
    amt_exemption: Decimal,
    amt_base: Decimal,
    tentative_min_tax: Decimal,
    ordinary_income_tax: Decimal,
    payable_tax: Decimal,
}

impl ResultRow {
    fn new(
        input: &CalculationInput,
        result: &CalculationResult,
    ) -> Self {
        Self {
            tax_year: input.tax_year.year(),
            filing_status: input.filing_status.label(),
            income: result.income.normalize(),
            adjustment: result.adjustment.normalize(),
            amt_income: result.amt_income.normalize(),
            amt_exemption: result.amt_exemption.normalize(),
            amt_base: result.amt_base.normalize(),
            tentative_min_tax: result.tentative_min_tax.normalize(),
            ordinary_income_tax: result.ordinary_income_tax.normalize(),
            payable_tax: result.payable_tax.normalize(),
        }
    }
}

/// Writes one CSV row per scenario, with a header.
pub fn write_results_csv<W: io::Write>(
    writer: W,
    results: &[(CalculationInput, CalculationResult)],
) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(writer);
    for (input, result) in results {
        writer.serialize(ResultRow::new(input, result))?;
    }
    writer.flush()?;
    Ok(())
}
