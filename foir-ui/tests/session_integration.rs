//! Drives the interactive loop with scripted input and stub capabilities.

use std::io::Cursor;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use foir_core::capabilities::{CapabilityError, Clipboard};
use foir_ui::app;
use foir_ui::config::AppConfig;
use foir_ui::exporters::build_registry;
use foir_ui::platform::CommandShareTarget;
use foir_ui::session::{CalculatorSession, Capabilities};
use pretty_assertions::assert_eq;

#[derive(Clone, Default)]
struct MemoryClipboard(Arc<Mutex<Option<String>>>);

#[async_trait]
impl Clipboard for MemoryClipboard {
    async fn copy(
        &self,
        text: &str,
    ) -> Result<(), CapabilityError> {
        *self.0.lock().unwrap() = Some(text.to_string());
        Ok(())
    }
}

fn scratch_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("foir-session-{}-{name}", std::process::id()))
}

fn session(
    export_dir: PathBuf,
    clipboard: MemoryClipboard,
) -> CalculatorSession {
    let config = AppConfig {
        calculation_delay_ms: 0,
        export_dir,
        ..AppConfig::default()
    };
    let capabilities = Capabilities {
        share: Box::new(CommandShareTarget::new(None)),
        clipboard: Box::new(clipboard),
        exporters: build_registry(&config),
    };
    app::build_session(&config, capabilities).expect("default config is valid")
}

async fn run(
    session: &mut CalculatorSession,
    script: &str,
) -> String {
    let mut out = Vec::new();
    app::run_interactive(session, Cursor::new(script), &mut out, "₹")
        .await
        .expect("loop should not fail on an in-memory writer");
    String::from_utf8(out).unwrap()
}

#[tokio::test]
async fn full_flow_calculates_shares_and_exports() {
    let dir = scratch_dir("flow");
    let clipboard = MemoryClipboard::default();
    let mut session = session(dir.clone(), clipboard.clone());

    let output = run(
        &mut session,
        "salary 50,000\nset 1 10000\nadd\nset 2 5000\ncc 20000\ncalc\nshare\nexport txt\nquit\n",
    )
    .await;

    assert!(output.contains("5% of ₹20,000 = ₹1,000 will be added to your obligations"));
    assert!(output.contains("[ok] FOIR Calculated Successfully!: Your FOIR is 32.00%"));
    assert!(output.contains("32.0%  🎯 Excellent FOIR (favorable)"));
    assert!(output.contains("FOIR Calculation:       16,000 ÷ 50,000 × 100"));
    assert!(output.contains("[ok] Result Copied!: FOIR result copied to clipboard"));
    assert!(output.contains("[ok] Result Exported: Saved txt document to"));
    assert_eq!(
        clipboard.0.lock().unwrap().as_deref(),
        Some("My FOIR is 32.00% - Excellent")
    );

    let exported = std::fs::read_dir(&dir).unwrap().count();
    assert_eq!(exported, 1);
    std::fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn zero_salary_is_refused_without_a_result() {
    let mut session = session(scratch_dir("refused"), MemoryClipboard::default());

    let output = run(&mut session, "set 1 5000\ncalc\nshare\n").await;

    assert!(output.contains(
        "[error] Incomplete Information: Please fill in all required fields to calculate FOIR"
    ));
    assert!(output.contains("[error] No Result: Calculate FOIR before trying to share it"));
    assert!(session.shown_result().is_none());
}

#[tokio::test]
async fn last_row_survives_remove_and_reset_clears_everything() {
    let mut session = session(scratch_dir("reset"), MemoryClipboard::default());

    let output = run(
        &mut session,
        "salary 40000\nset 1 20000\nremove 1\ncalc\nreset\n",
    )
    .await;

    assert!(output.contains("[info] EMI Kept: At least one EMI row is always present"));
    assert!(output.contains("50.0%  ⚠️ Good FOIR (cautionary)"));
    assert!(output.contains("[info] Calculator Reset: All fields have been cleared"));
    assert!(session.shown_result().is_none());
    assert_eq!(session.state().entries().len(), 1);
    assert!(session.state().salary().is_zero());
}

#[tokio::test]
async fn bad_commands_are_reported_and_the_loop_continues() {
    let mut session = session(scratch_dir("bad"), MemoryClipboard::default());

    let output = run(&mut session, "launch\nremove\nsalary abc\nshow\n").await;

    assert!(output.contains("unknown command 'launch' (type `help`)"));
    assert!(output.contains("`remove` needs a row number"));
    assert!(output.contains("[error] Invalid Amount: Salary: 'abc' is not a valid amount, using 0"));
    assert!(output.contains("Monthly Net Salary:       ₹0"));
}

#[tokio::test]
async fn amounts_at_the_decimal_limit_do_not_end_the_session() {
    let mut session = session(scratch_dir("limit"), MemoryClipboard::default());
    let max = "79228162514264337593543950335";

    let output = run(
        &mut session,
        &format!("salary 1\nset 1 {max}\ncalc\nadd\nset 2 {max}\ncalc\nset 2 0\nset 1 100\ncalc\n"),
    )
    .await;

    assert!(output.contains("[error] Amount Too Large: FOIR is too large to calculate"));
    assert!(output.contains("[error] Amount Too Large: total EMIs is too large to calculate"));
    assert!(output.contains("EMI 2 amount:           ₹79,228,162,514,264,337,593,543,950,335"));
    assert!(output.contains("[ok] FOIR Calculated Successfully!: Your FOIR is 10000.00%"));
}

#[tokio::test]
async fn help_lists_the_registered_export_formats() {
    let mut session = session(scratch_dir("help"), MemoryClipboard::default());

    let output = run(&mut session, "help\n").await;

    assert!(output.contains("export the result (csv, txt)"));
}
