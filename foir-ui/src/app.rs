//! Front-end drivers: the interactive command loop, one-shot `calc`, and
//! CSV `batch`.

use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};
use foir_core::{Breakdown, FoirCalculator, InputSnapshot};
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::{AppConfig, ConfigError};
use crate::csv_loader;
use crate::exporters::build_registry;
use crate::platform::{CommandClipboard, CommandShareTarget};
use crate::render::{InputsView, ResultView};
use crate::session::{CalculatorSession, Capabilities, Notice, SessionOptions};
use crate::utils::{format_money, format_percent};

/// Command reference, listing the export formats that are registered.
pub fn help_text(export_formats: &[&str]) -> String {
    format!(
        "\
Commands:
  salary <amount>        set monthly net salary
  cc <amount>            set credit card outstanding
  add                    add an EMI row
  set <n> <amount>       set the amount of EMI row n
  remove <n>             remove EMI row n
  show                   show inputs (and the result, if any)
  calc                   calculate FOIR
  export [format]        export the result ({})
  share                  share the result or copy it to the clipboard
  reset                  clear every field
  help                   show this help
  quit                   leave",
        export_formats.join(", ")
    )
}

// ─── commands ────────────────────────────────────────────────────────────────

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command '{0}' (type `help`)")]
    Unknown(String),

    #[error("`{command}` needs {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("'{0}' is not a row number")]
    InvalidPosition(String),
}

/// One line of interactive input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Salary(String),
    CreditCard(String),
    Add,
    Set { position: usize, amount: String },
    Remove(usize),
    Show,
    Calculate,
    Export(Option<String>),
    Share,
    Reset,
    Help,
    Quit,
}

fn parse_position(
    command: &'static str,
    token: Option<&str>,
) -> Result<usize, CommandError> {
    let token = token.ok_or(CommandError::MissingArgument {
        command,
        argument: "a row number",
    })?;
    token
        .parse()
        .map_err(|_| CommandError::InvalidPosition(token.to_string()))
}

impl Command {
    /// Parses one input line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((w, r)) => (w, r.trim()),
            None => (line, ""),
        };
        let rest_arg = (!rest.is_empty()).then(|| rest.to_string());

        let command = match word.to_ascii_lowercase().as_str() {
            "" => return Ok(None),
            "salary" => Self::Salary(rest_arg.ok_or(CommandError::MissingArgument {
                command: "salary",
                argument: "an amount",
            })?),
            "cc" | "card" => Self::CreditCard(rest_arg.ok_or(CommandError::MissingArgument {
                command: "cc",
                argument: "an amount",
            })?),
            "add" => Self::Add,
            "set" => {
                let mut parts = rest.splitn(2, char::is_whitespace);
                let position = parse_position("set", parts.next().filter(|p| !p.is_empty()))?;
                let amount = parts
                    .next()
                    .map(str::trim)
                    .filter(|a| !a.is_empty())
                    .ok_or(CommandError::MissingArgument {
                        command: "set",
                        argument: "an amount",
                    })?;
                Self::Set {
                    position,
                    amount: amount.to_string(),
                }
            }
            "remove" | "rm" => Self::Remove(parse_position("remove", (!rest.is_empty()).then_some(rest))?),
            "show" => Self::Show,
            "calc" | "calculate" => Self::Calculate,
            "export" => Self::Export(rest_arg),
            "share" => Self::Share,
            "reset" => Self::Reset,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(Some(command))
    }
}

// ─── session wiring ──────────────────────────────────────────────────────────

/// Builds the share, clipboard and export collaborators from `config`.
pub fn build_capabilities(config: &AppConfig) -> Capabilities {
    Capabilities {
        share: Box::new(CommandShareTarget::new(config.share_command.clone())),
        clipboard: Box::new(CommandClipboard::new(config.clipboard_command.clone())),
        exporters: build_registry(config),
    }
}

/// # Errors
///
/// Fails when the configured credit card rate is out of range.
pub fn build_session(
    config: &AppConfig,
    capabilities: Capabilities,
) -> Result<CalculatorSession, ConfigError> {
    Ok(CalculatorSession::new(
        capabilities,
        SessionOptions {
            calculation_delay: config.calculation_delay(),
            default_export_format: config.export_format.clone(),
            calculator: config.calculator()?,
        },
    ))
}

fn write_inputs<W: Write>(
    out: &mut W,
    session: &CalculatorSession,
    symbol: &str,
) -> io::Result<()> {
    write!(
        out,
        "{}",
        InputsView {
            state: session.state(),
            currency_symbol: symbol,
            credit_card_rate: session.credit_card_rate(),
        }
    )
}

fn write_result<W: Write>(
    out: &mut W,
    session: &CalculatorSession,
    symbol: &str,
) -> io::Result<()> {
    if let Some(shown) = session.shown_result() {
        writeln!(out)?;
        write!(
            out,
            "{}",
            ResultView {
                breakdown: &shown.breakdown(),
                currency_symbol: symbol,
                stale: session.is_result_stale(),
            }
        )?;
    }
    Ok(())
}

// ─── interactive ─────────────────────────────────────────────────────────────

/// Reads commands from `input` until `quit` or end of input.
///
/// Every error is reported as a line of output; none ends the loop.
pub async fn run_interactive<R: BufRead, W: Write>(
    session: &mut CalculatorSession,
    input: R,
    out: &mut W,
    symbol: &str,
) -> io::Result<()> {
    writeln!(out, "FOIR Calculator")?;
    writeln!(out, "Type `help` for commands.")?;
    write!(out, "> ")?;
    out.flush()?;

    for line in input.lines() {
        let line = line?;
        let command = match Command::parse(&line) {
            Ok(Some(c)) => c,
            Ok(None) => {
                write!(out, "> ")?;
                out.flush()?;
                continue;
            }
            Err(e) => {
                writeln!(out, "{e}")?;
                write!(out, "> ")?;
                out.flush()?;
                continue;
            }
        };
        debug!(?command, "command");

        let reply = match command {
            Command::Quit => break,
            Command::Help => {
                writeln!(out, "{}", help_text(&session.available_export_formats()))?;
                Reply::Done
            }
            Command::Show => {
                write_inputs(out, session, symbol)?;
                write_result(out, session, symbol)?;
                Reply::Done
            }
            Command::Salary(raw) => Reply::Edited(session.set_salary(&raw)),
            Command::CreditCard(raw) => Reply::Edited(session.set_credit_card_outstanding(&raw)),
            Command::Add => {
                session.add_entry();
                Reply::Edited(None)
            }
            Command::Set { position, amount } => Reply::Edited(session.update_entry(position, &amount)),
            Command::Remove(position) => Reply::Edited(session.remove_entry(position)),
            Command::Calculate => {
                if session.can_calculate() && !session.calculation_delay().is_zero() {
                    writeln!(out, "Calculating...")?;
                    out.flush()?;
                }
                let notice = session.calculate().await;
                let shown = !notice.is_error();
                writeln!(out, "{notice}")?;
                if shown {
                    write_result(out, session, symbol)?;
                }
                Reply::Done
            }
            Command::Export(format) => Reply::Notice(session.export(format.as_deref())),
            Command::Share => Reply::Notice(session.share().await),
            Command::Reset => Reply::Notice(session.reset()),
        };

        match reply {
            Reply::Notice(notice) => writeln!(out, "{notice}")?,
            Reply::Edited(notice) => {
                if let Some(notice) = notice {
                    writeln!(out, "{notice}")?;
                }
                write_inputs(out, session, symbol)?;
            }
            Reply::Done => {}
        }
        write!(out, "> ")?;
        out.flush()?;
    }
    writeln!(out)?;
    Ok(())
}

/// What the loop prints after a command.
enum Reply {
    Done,
    Notice(Notice),
    /// Inputs changed; print the optional notice, then the form.
    Edited(Option<Notice>),
}

// ─── one-shot ────────────────────────────────────────────────────────────────

/// Inputs for a single non-interactive calculation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalcRequest {
    pub salary: Decimal,
    pub emis: Vec<Decimal>,
    pub credit_card_outstanding: Decimal,
    /// Export format to write after calculating, if any.
    pub export: Option<String>,
    pub share: bool,
}

/// Calculates once, prints the result and runs the requested actions.
///
/// # Errors
///
/// Fails when the input is refused. Export and share problems are printed
/// but do not fail the run.
pub async fn run_calc<W: Write>(
    session: &mut CalculatorSession,
    request: &CalcRequest,
    out: &mut W,
    symbol: &str,
) -> Result<()> {
    session.load(InputSnapshot::from_amounts(
        request.salary,
        &request.emis,
        request.credit_card_outstanding,
    ));

    let notice = session.calculate().await;
    if notice.is_error() {
        writeln!(out, "{notice}")?;
        anyhow::bail!("{}: {}", notice.title, notice.description);
    }
    write_result(out, session, symbol)?;

    if let Some(format) = &request.export {
        writeln!(out, "{}", session.export(Some(format)))?;
    }
    if request.share {
        writeln!(out, "{}", session.share().await)?;
    }
    Ok(())
}

// ─── batch ───────────────────────────────────────────────────────────────────

/// Totals printed after a batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub calculated: usize,
    pub refused: usize,
}

/// Calculates every scenario in `path` and prints one line per row.
pub fn run_batch<W: Write>(
    path: &Path,
    calculator: &FoirCalculator,
    out: &mut W,
    symbol: &str,
) -> Result<BatchSummary> {
    let scenarios = csv_loader::load_from_file(path)
        .with_context(|| format!("Failed to load scenarios: {}", path.display()))?;
    info!(count = scenarios.len(), "scenarios loaded");

    let mut summary = BatchSummary::default();

    for scenario in &scenarios {
        match calculator.calculate(&scenario.snapshot) {
            Ok(result) => {
                let b = Breakdown::new(&scenario.snapshot, &result);
                writeln!(
                    out,
                    "{}: {}% {} (obligations {} of {})",
                    scenario.label,
                    format_percent(b.foir_percent, 2),
                    b.category.label(),
                    format_money(symbol, b.total_obligations),
                    format_money(symbol, b.salary)
                )?;
                summary.calculated += 1;
            }
            Err(e) => {
                writeln!(out, "{}: refused: {e}", scenario.label)?;
                summary.refused += 1;
            }
        }
    }

    writeln!(
        out,
        "{} calculated, {} refused",
        summary.calculated, summary.refused
    )?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_simple_commands() {
        assert_eq!(Command::parse("add").unwrap(), Some(Command::Add));
        assert_eq!(Command::parse("  CALC ").unwrap(), Some(Command::Calculate));
        assert_eq!(Command::parse("q").unwrap(), Some(Command::Quit));
        assert_eq!(Command::parse("   ").unwrap(), None);
    }

    #[test]
    fn salary_keeps_the_rest_of_the_line() {
        assert_eq!(
            Command::parse("salary ₹ 50,000").unwrap(),
            Some(Command::Salary("₹ 50,000".to_string()))
        );
    }

    #[test]
    fn set_needs_position_and_amount() {
        assert_eq!(
            Command::parse("set 2 5,000").unwrap(),
            Some(Command::Set {
                position: 2,
                amount: "5,000".to_string(),
            })
        );
        assert!(matches!(
            Command::parse("set 2"),
            Err(CommandError::MissingArgument { command: "set", .. })
        ));
        assert_eq!(
            Command::parse("set two 5"),
            Err(CommandError::InvalidPosition("two".to_string()))
        );
    }

    #[test]
    fn remove_needs_position() {
        assert_eq!(Command::parse("remove 3").unwrap(), Some(Command::Remove(3)));
        assert!(Command::parse("remove").is_err());
    }

    #[test]
    fn export_format_is_optional() {
        assert_eq!(Command::parse("export").unwrap(), Some(Command::Export(None)));
        assert_eq!(
            Command::parse("export txt").unwrap(),
            Some(Command::Export(Some("txt".to_string())))
        );
    }

    #[test]
    fn help_lists_registered_formats() {
        let text = help_text(&["csv", "txt"]);

        assert!(text.contains("export the result (csv, txt)"));
        assert!(text.starts_with("Commands:"));
    }

    #[test]
    fn unknown_command_is_reported() {
        assert_eq!(
            Command::parse("launch"),
            Err(CommandError::Unknown("launch".to_string()))
        );
    }
}
