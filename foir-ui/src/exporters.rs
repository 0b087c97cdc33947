//! Document generators for the export action.
//!
//! | format | contents |
//! |--------|----------|
//! | `csv`  | `field,value` rows with raw decimal values |
//! | `txt`  | the rendered result, as shown in the terminal |

use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::Local;
use foir_core::capabilities::{
    CapabilityError, DocumentGenerator, DocumentGeneratorRegistry, GeneratedDocument,
};
use foir_core::Breakdown;
use tracing::debug;

use crate::config::AppConfig;
use crate::render::ResultView;

/// Builds `<dir>/foir-result-<timestamp>.<ext>`, creating `dir` if needed.
fn output_path(
    dir: &Path,
    extension: &str,
) -> Result<PathBuf, CapabilityError> {
    fs::create_dir_all(dir).map_err(|e| {
        CapabilityError::Failed(format!("cannot create '{}': {e}", dir.display()))
    })?;
    let stamp = Local::now().format("%Y%m%d-%H%M%S%3f");
    Ok(dir.join(format!("foir-result-{stamp}.{extension}")))
}

/// Writes the breakdown as a two-column CSV file.
#[derive(Debug, Clone)]
pub struct CsvDocumentGenerator {
    dir: PathBuf,
}

impl CsvDocumentGenerator {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn write(
        path: &Path,
        breakdown: &Breakdown,
    ) -> Result<(), csv::Error> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(["field", "value"])?;
        let rows = [
            ("salary", breakdown.salary.to_string()),
            ("total_emis", breakdown.total_emis.to_string()),
            ("emi_count", breakdown.emi_count.to_string()),
            (
                "credit_card_outstanding",
                breakdown.credit_card_outstanding.to_string(),
            ),
            ("credit_card_factor", breakdown.credit_card_factor.to_string()),
            ("total_obligations", breakdown.total_obligations.to_string()),
            ("foir_percent", breakdown.foir_percent.to_string()),
            ("category", breakdown.category.label().to_string()),
        ];
        for (field, value) in rows {
            writer.write_record([field, value.as_str()])?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl DocumentGenerator for CsvDocumentGenerator {
    fn format_name(&self) -> &'static str {
        "csv"
    }

    fn generate(
        &self,
        breakdown: &Breakdown,
    ) -> Result<GeneratedDocument, CapabilityError> {
        let path = output_path(&self.dir, "csv")?;
        Self::write(&path, breakdown).map_err(|e| {
            CapabilityError::Failed(format!("cannot write '{}': {e}", path.display()))
        })?;
        debug!(path = %path.display(), "csv document written");
        Ok(GeneratedDocument {
            format: self.format_name(),
            path,
        })
    }
}

/// Writes the rendered result as plain text.
#[derive(Debug, Clone)]
pub struct TextDocumentGenerator {
    dir: PathBuf,
    currency_symbol: String,
}

impl TextDocumentGenerator {
    pub fn new(
        dir: impl Into<PathBuf>,
        currency_symbol: impl Into<String>,
    ) -> Self {
        Self {
            dir: dir.into(),
            currency_symbol: currency_symbol.into(),
        }
    }
}

impl DocumentGenerator for TextDocumentGenerator {
    fn format_name(&self) -> &'static str {
        "txt"
    }

    fn generate(
        &self,
        breakdown: &Breakdown,
    ) -> Result<GeneratedDocument, CapabilityError> {
        let path = output_path(&self.dir, "txt")?;
        let body = ResultView {
            breakdown,
            currency_symbol: &self.currency_symbol,
            stale: false,
        }
        .to_string();
        fs::write(&path, body).map_err(|e| {
            CapabilityError::Failed(format!("cannot write '{}': {e}", path.display()))
        })?;
        debug!(path = %path.display(), "text document written");
        Ok(GeneratedDocument {
            format: self.format_name(),
            path,
        })
    }
}

/// Registry holding every built-in generator, writing into `export_dir`.
pub fn build_registry(config: &AppConfig) -> DocumentGeneratorRegistry {
    let mut registry = DocumentGeneratorRegistry::new();
    registry.register(Box::new(CsvDocumentGenerator::new(&config.export_dir)));
    registry.register(Box::new(TextDocumentGenerator::new(
        &config.export_dir,
        config.currency_symbol.as_str(),
    )));
    registry
}
