//! Export and share actions on a computed result.
//!
//! Both actions are optional. A failure is returned to the caller for
//! reporting and never touches the input state or the result itself.

use thiserror::Error;
use tracing::{info, warn};

use crate::calculations::common::round_half_up;
use crate::capabilities::{
    CapabilityError, Clipboard, DocumentGenerator, GeneratedDocument, SharePayload, ShareTarget,
};
use crate::models::Breakdown;

pub const SHARE_TITLE: &str = "My FOIR Result";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExportError {
    #[error("export to {format} failed: {source}")]
    Generation {
        format: &'static str,
        #[source]
        source: CapabilityError,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShareError {
    /// Neither the share target nor the clipboard accepted the summary.
    #[error("sharing failed ({share}); clipboard fallback failed ({clipboard})")]
    AllTargetsFailed {
        share: CapabilityError,
        clipboard: CapabilityError,
    },
}

/// Which path delivered the shared summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    Shared,
    Copied,
}

/// One-line summary used for sharing, e.g. `My FOIR is 32.00% - Excellent`.
pub fn share_summary(breakdown: &Breakdown) -> String {
    format!(
        "My FOIR is {}% - {}",
        round_half_up(breakdown.foir_percent),
        breakdown.category.label()
    )
}

/// Writes `breakdown` through `generator`.
///
/// # Errors
///
/// [`ExportError::Generation`] wraps whatever the generator reported.
pub fn export_breakdown(
    generator: &dyn DocumentGenerator,
    breakdown: &Breakdown,
) -> Result<GeneratedDocument, ExportError> {
    let format = generator.format_name();
    match generator.generate(breakdown) {
        Ok(document) => {
            info!(format, path = %document.path.display(), "result exported");
            Ok(document)
        }
        Err(source) => {
            warn!(format, error = %source, "export failed");
            Err(ExportError::Generation { format, source })
        }
    }
}

/// Shares the summary, falling back to the clipboard.
///
/// # Errors
///
/// [`ShareError::AllTargetsFailed`] when both paths fail.
pub async fn share_breakdown(
    share: &dyn ShareTarget,
    clipboard: &dyn Clipboard,
    breakdown: &Breakdown,
) -> Result<ShareOutcome, ShareError> {
    let payload = SharePayload {
        title: SHARE_TITLE.to_string(),
        text: share_summary(breakdown),
    };

    let share_err = match share.share(&payload).await {
        Ok(()) => {
            info!("result shared");
            return Ok(ShareOutcome::Shared);
        }
        Err(e) => e,
    };
    warn!(error = %share_err, "share unavailable, copying to clipboard");

    match clipboard.copy(&payload.text).await {
        Ok(()) => {
            info!("result copied to clipboard");
            Ok(ShareOutcome::Copied)
        }
        Err(clipboard_err) => {
            warn!(error = %clipboard_err, "clipboard copy failed");
            Err(ShareError::AllTargetsFailed {
                share: share_err,
                clipboard: clipboard_err,
            })
        }
    }
}
