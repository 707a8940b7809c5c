use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{debug, info};

use iso_amt_cli::config::AppConfig;
use iso_amt_cli::{csv_loader, logging, report};
use iso_amt_core::{CalculationRequest, FilingStatus, TaxEngine, TaxYear};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Alternative minimum tax exposure from exercising incentive stock options.
///
/// Compares the tentative minimum tax on an ISO exercise with ordinary
/// federal income tax for tax years 2024 and 2025.
#[derive(Debug, Parser)]
#[command(name = "iso-amt", version, about, long_about = None)]
struct Cli {
    /// TOML file with default selections and logging settings.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter directive (e.g. `info`, `iso_amt_core=debug`).
    /// `RUST_LOG` takes precedence when set.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Append log records to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Calculate one exercise scenario.
    Calc(CalcArgs),

    /// Calculate every scenario in a CSV file.
    Batch {
        /// Scenario CSV (tax_year, filing_status, annual_income, num_isos,
        /// strike_price, share_value).
        #[arg(short, long)]
        input: PathBuf,

        /// Results CSV; written to stdout when omitted.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the tax tables for one or both years.
    Tables {
        #[arg(long)]
        tax_year: Option<TaxYear>,
    },
}

/// Numeric values are free text: unparsable amounts count as zero.
#[derive(Debug, Args)]
struct CalcArgs {
    #[arg(long)]
    tax_year: Option<TaxYear>,

    /// Label (`Head of Household`) or code (`S`, `HOH`, `MFJ`, `MFS`).
    #[arg(long)]
    filing_status: Option<FilingStatus>,

    /// Annual income before the standard deduction.
    #[arg(long, allow_hyphen_values = true)]
    income: Option<String>,

    /// Number of ISOs exercised.
    #[arg(long, allow_hyphen_values = true)]
    isos: Option<String>,

    /// Strike price per share.
    #[arg(long, allow_hyphen_values = true)]
    strike: Option<String>,

    /// Fair market value per share at exercise.
    #[arg(long, allow_hyphen_values = true)]
    share_value: Option<String>,
}

impl CalcArgs {
    fn into_request(
        self,
        defaults: CalculationRequest,
    ) -> CalculationRequest {
        CalculationRequest {
            tax_year: self
                .tax_year
                .map(|year| year.to_string())
                .unwrap_or(defaults.tax_year),
            filing_status: self
                .filing_status
                .map(|status| status.label().to_string())
                .unwrap_or(defaults.filing_status),
            annual_income: self.income.unwrap_or(defaults.annual_income),
            num_isos: self.isos.unwrap_or(defaults.num_isos),
            strike_price: self.strike.unwrap_or(defaults.strike_price),
            share_value: self.share_value.unwrap_or(defaults.share_value),
        }
    }
}

// ─── commands ────────────────────────────────────────────────────────────────

fn run_calc(
    args: CalcArgs,
    config: &AppConfig,
) -> Result<()> {
    let request = args.into_request(config.request_defaults());
    debug!(?request, "resolved calculation request");

    let input = request
        .to_input()
        .context("invalid tax year or filing status")?;
    let engine = TaxEngine::new();
    let result = engine.calculate(&input);
    let breakdown = engine.bracket_breakdown(&input);

    print!("{}", report::render_result(&input, &result, &breakdown));
    Ok(())
}

fn run_batch(
    input: PathBuf,
    output: Option<PathBuf>,
) -> Result<()> {
    let scenarios = csv_loader::load_from_file(&input)
        .with_context(|| format!("failed to load scenarios from {}", input.display()))?;
    info!(count = scenarios.len(), path = %input.display(), "loaded scenarios");

    let engine = TaxEngine::new();
    let results: Vec<_> = scenarios
        .into_iter()
        .map(|scenario| {
            let result = engine.calculate(&scenario);
            (scenario, result)
        })
        .collect();

    match &output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create {}", path.display()))?;
            report::write_results_csv(file, &results)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(count = results.len(), path = %path.display(), "wrote results");
        }
        None => {
            report::write_results_csv(io::stdout().lock(), &results)
                .context("failed to write results")?;
        }
    }
    Ok(())
}

fn run_tables(tax_year: Option<TaxYear>) -> Result<()> {
    let years = match tax_year {
        Some(year) => vec![year],
        None => TaxYear::ALL.to_vec(),
    };

    let mut stdout = io::stdout().lock();
    for (i, year) in years.into_iter().enumerate() {
        if i > 0 {
            writeln!(stdout)?;
        }
        write!(stdout, "{}", report::render_tables(year))?;
    }
    Ok(())
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => AppConfig::default(),
    };
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    if let Some(file) = cli.log_file {
        config.logging.file = Some(file);
    }

    logging::init_logging(&config.logging)?;

    match cli.command {
        Command::Calc(args) => run_calc(args, &config),
        Command::Batch { input, output } => run_batch(input, output),
        Command::Tables { tax_year } => run_tables(tax_year),
    }
}
