use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing::{debug, info};

use foir_ui::app::{self, CalcRequest};
use foir_ui::config::AppConfig;
use foir_ui::logging;
use foir_ui::utils::parse_amount;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Fixed Obligations to Income Ratio calculator.
///
/// Collects a monthly salary, EMIs and credit card outstanding, and rates
/// the resulting FOIR as Excellent, Good or Poor.
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    /// Configuration file. Defaults to `foir.toml` when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `foir_ui=trace`. Overrides the config.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Show results without the calculation pause.
    #[arg(long, global = true)]
    no_delay: bool,

    #[command(subcommand)]
    command: Option<Mode>,
}

#[derive(Debug, Subcommand)]
enum Mode {
    /// Edit inputs and calculate interactively (default).
    Interactive,

    /// Calculate once from the given amounts.
    Calc {
        /// Monthly net salary.
        #[arg(long, value_parser = amount)]
        salary: Decimal,

        /// Monthly EMI amount. Repeat for several loans.
        #[arg(long = "emi", value_parser = amount)]
        emis: Vec<Decimal>,

        /// Credit card outstanding balance.
        #[arg(long, value_parser = amount, default_value = "0")]
        credit_card: Decimal,

        /// Export the result in this format (csv, txt).
        #[arg(long)]
        export: Option<String>,

        /// Share the result, or copy it to the clipboard.
        #[arg(long)]
        share: bool,
    },

    /// Calculate every scenario in a CSV file.
    Batch {
        /// CSV with columns label, salary, emis, credit_card_outstanding.
        #[arg(long)]
        file: PathBuf,
    },
}

fn amount(s: &str) -> Result<Decimal, String> {
    parse_amount(s).map_err(|e| e.to_string())
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let log = logging::init_logging();

    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if cli.no_delay {
        config.calculation_delay_ms = 0;
    }

    if let Some(level) = cli.log_level.as_deref().or(config.log_level.as_deref()) {
        log.set_level(level)?;
    }
    if let Some(path) = &config.log_file {
        log.attach_file(path)?;
    }
    debug!(?config, "configuration");

    let symbol = config.currency_symbol.clone();
    let mut stdout = io::stdout().lock();

    match cli.command.unwrap_or(Mode::Interactive) {
        Mode::Interactive => {
            let mut session = app::build_session(&config, app::build_capabilities(&config))
                .context("Invalid configuration")?;
            info!("interactive session started");
            app::run_interactive(&mut session, io::stdin().lock(), &mut stdout, &symbol).await?;
        }
        Mode::Calc {
            salary,
            emis,
            credit_card,
            export,
            share,
        } => {
            let mut session = app::build_session(&config, app::build_capabilities(&config))
                .context("Invalid configuration")?;
            let request = CalcRequest {
                salary,
                emis,
                credit_card_outstanding: credit_card,
                export,
                share,
            };
            app::run_calc(&mut session, &request, &mut stdout, &symbol).await?;
        }
        Mode::Batch { file } => {
            let calculator = config.calculator().context("Invalid configuration")?;
            app::run_batch(&file, &calculator, &mut stdout, &symbol)?;
        }
    }

    Ok(())
}
