//! One calculator session: form state, the shown result, and the actions.
//!
//! The session is the only owner of mutable state. Every user action goes
//! through one method here and comes back as an optional [`Notice`].

use std::{fmt, time::Duration};

use foir_core::actions::{ShareOutcome, export_breakdown, share_breakdown};
use foir_core::calculations::common::round_half_up;
use foir_core::capabilities::{Clipboard, DocumentGeneratorRegistry, ShareTarget};
use foir_core::{Breakdown, EmiId, FoirCalculator, FoirError, FoirResult, InputSnapshot, InputState};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::utils::parse_amount;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// A user-visible message, the terminal counterpart of a toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub description: String,
}

impl Notice {
    fn new(
        level: NoticeLevel,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            level,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn info(
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self::new(NoticeLevel::Info, title, description)
    }

    pub fn success(
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self::new(NoticeLevel::Success, title, description)
    }

    pub fn error(
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self::new(NoticeLevel::Error, title, description)
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

impl fmt::Display for Notice {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let tag = match self.level {
            NoticeLevel::Info => "info",
            NoticeLevel::Success => "ok",
            NoticeLevel::Error => "error",
        };
        write!(f, "[{tag}] {}: {}", self.title, self.description)
    }
}

/// A result together with the inputs that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShownResult {
    pub snapshot: InputSnapshot,
    pub result: FoirResult,
}

impl ShownResult {
    pub fn breakdown(&self) -> Breakdown {
        Breakdown::new(&self.snapshot, &self.result)
    }
}

/// What the result area currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum View {
    #[default]
    NoResult,
    ShowingResult(ShownResult),
}

/// External collaborators used by export and share.
pub struct Capabilities {
    pub share: Box<dyn ShareTarget>,
    pub clipboard: Box<dyn Clipboard>,
    pub exporters: DocumentGeneratorRegistry,
}

#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Pause before a result is shown.
    pub calculation_delay: Duration,
    /// Format used by [`CalculatorSession::export`] when none is given.
    pub default_export_format: String,
    pub calculator: FoirCalculator,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            calculation_delay: Duration::ZERO,
            default_export_format: "csv".to_string(),
            calculator: FoirCalculator::default(),
        }
    }
}

pub struct CalculatorSession {
    state: InputState,
    calculator: FoirCalculator,
    view: View,
    capabilities: Capabilities,
    options: SessionOptions,
}

impl CalculatorSession {
    pub fn new(
        capabilities: Capabilities,
        options: SessionOptions,
    ) -> Self {
        Self {
            state: InputState::new(),
            calculator: options.calculator.clone(),
            view: View::NoResult,
            capabilities,
            options,
        }
    }

    pub fn state(&self) -> &InputState {
        &self.state
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn shown_result(&self) -> Option<&ShownResult> {
        match &self.view {
            View::ShowingResult(shown) => Some(shown),
            View::NoResult => None,
        }
    }

    /// Whether the shown result was computed from different inputs.
    pub fn is_result_stale(&self) -> bool {
        self.shown_result()
            .is_some_and(|shown| shown.snapshot != self.state.snapshot())
    }

    /// Whether `calculate` would be accepted right now.
    pub fn can_calculate(&self) -> bool {
        self.calculator.check_input(&self.state.snapshot()).is_ok()
    }

    pub fn credit_card_rate(&self) -> Decimal {
        self.calculator.config().credit_card_rate
    }

    pub fn calculation_delay(&self) -> Duration {
        self.options.calculation_delay
    }

    pub fn available_export_formats(&self) -> Vec<&'static str> {
        self.capabilities.exporters.available_formats()
    }

    // ── editing ─────────────────────────────────────────────────────────

    pub fn set_salary(
        &mut self,
        raw: &str,
    ) -> Option<Notice> {
        let (amount, notice) = coerce_with_notice("Salary", raw);
        self.state.set_salary(amount);
        notice
    }

    pub fn set_credit_card_outstanding(
        &mut self,
        raw: &str,
    ) -> Option<Notice> {
        let (amount, notice) = coerce_with_notice("Credit card outstanding", raw);
        self.state.set_credit_card_outstanding(amount);
        notice
    }

    /// Replaces every field with `snapshot`. A shown result is kept and
    /// becomes stale if the values differ.
    pub fn load(
        &mut self,
        snapshot: InputSnapshot,
    ) {
        self.state = InputState::from(snapshot);
    }

    pub fn add_entry(&mut self) -> EmiId {
        self.state.add_entry()
    }

    /// Sets the amount of the EMI at 1-based `position`.
    pub fn update_entry(
        &mut self,
        position: usize,
        raw: &str,
    ) -> Option<Notice> {
        let Some(id) = self.state.entry_at(position).map(|e| e.id) else {
            return Some(no_such_entry(position));
        };
        let (amount, notice) = coerce_with_notice(&format!("EMI {position}"), raw);
        self.state.update_entry(id, amount);
        notice
    }

    /// Removes the EMI at 1-based `position`. The last row always stays.
    pub fn remove_entry(
        &mut self,
        position: usize,
    ) -> Option<Notice> {
        let Some(id) = self.state.entry_at(position).map(|e| e.id) else {
            return Some(no_such_entry(position));
        };
        if self.state.remove_entry(id) {
            None
        } else {
            Some(Notice::info(
                "EMI Kept",
                "At least one EMI row is always present",
            ))
        }
    }

    // ── actions ─────────────────────────────────────────────────────────

    /// Runs the calculation and shows the result.
    ///
    /// Invalid input is refused before the delay and leaves the view as it was.
    pub async fn calculate(&mut self) -> Notice {
        let snapshot = self.state.snapshot();
        if let Err(e) = self.calculator.check_input(&snapshot) {
            warn!(error = %e, "calculation refused");
            return refused(&e);
        }

        if !self.options.calculation_delay.is_zero() {
            debug!(delay = ?self.options.calculation_delay, "calculating");
            tokio::time::sleep(self.options.calculation_delay).await;
        }

        match self.calculator.calculate(&snapshot) {
            Ok(result) => {
                let percent = round_half_up(result.foir_percent);
                info!(foir = %percent, category = result.category().label(), "result shown");
                self.view = View::ShowingResult(ShownResult { snapshot, result });
                Notice::success("FOIR Calculated Successfully!", format!("Your FOIR is {percent}%"))
            }
            Err(e) => refused(&e),
        }
    }

    /// Clears every field and hides the result.
    pub fn reset(&mut self) -> Notice {
        self.state.reset();
        self.view = View::NoResult;
        Notice::info("Calculator Reset", "All fields have been cleared")
    }

    /// Exports the shown result with `format`, or the default format.
    pub fn export(
        &self,
        format: Option<&str>,
    ) -> Notice {
        let Some(shown) = self.shown_result() else {
            return nothing_to("export");
        };
        let format = format.unwrap_or(self.options.default_export_format.as_str());

        let generator = match self.capabilities.exporters.get(format) {
            Ok(g) => g,
            Err(e) => return Notice::error("Export Failed", e.to_string()),
        };

        match export_breakdown(generator, &shown.breakdown()) {
            Ok(document) => Notice::success(
                "Result Exported",
                format!("Saved {} document to {}", document.format, document.path.display()),
            ),
            Err(e) => Notice::error("Export Failed", e.to_string()),
        }
    }

    /// Shares the shown result, falling back to the clipboard.
    pub async fn share(&self) -> Notice {
        let Some(shown) = self.shown_result() else {
            return nothing_to("share");
        };

        match share_breakdown(
            self.capabilities.share.as_ref(),
            self.capabilities.clipboard.as_ref(),
            &shown.breakdown(),
        )
        .await
        {
            Ok(ShareOutcome::Shared) => Notice::success("Result Shared", "FOIR result shared"),
            Ok(ShareOutcome::Copied) => {
                Notice::success("Result Copied!", "FOIR result copied to clipboard")
            }
            Err(e) => Notice::error("Share Failed", e.to_string()),
        }
    }
}

fn coerce_with_notice(
    field: &str,
    raw: &str,
) -> (Decimal, Option<Notice>) {
    match parse_amount(raw) {
        Ok(amount) => (amount, None),
        Err(e) => {
            warn!(field, input = %raw, error = %e, "invalid amount treated as zero");
            (
                Decimal::ZERO,
                Some(Notice::error(
                    "Invalid Amount",
                    format!("{field}: '{}' is not a valid amount, using 0", raw.trim()),
                )),
            )
        }
    }
}

fn no_such_entry(position: usize) -> Notice {
    Notice::error("No Such EMI", format!("EMI {position} does not exist"))
}

fn nothing_to(action: &str) -> Notice {
    Notice::error(
        "No Result",
        format!("Calculate FOIR before trying to {action} it"),
    )
}

fn refused(error: &FoirError) -> Notice {
    match error {
        FoirError::IncompleteInput(_) => Notice::error(
            "Incomplete Information",
            "Please fill in all required fields to calculate FOIR",
        ),
        FoirError::Overflow(_) => Notice::error("Amount Too Large", error.to_string()),
        other => Notice::error("Invalid Input", other.to_string()),
    }
}
