//! Application configuration loaded from a TOML file.
//!
//! ```toml
//! currency_symbol = "₹"
//! calculation_delay_ms = 1500
//! credit_card_rate = 0.05
//! export_dir = "exports"
//! export_format = "csv"
//! share_command = ["notify-send", "FOIR"]
//! clipboard_command = ["wl-copy"]
//! log_file = "foir.log"
//! log_level = "info"
//! ```
//!
//! Every key is optional. Unknown keys are rejected so typos surface early.

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use foir_core::calculations::{CREDIT_CARD_FACTOR_RATE, FoirCalculator, FoirCalculatorConfig};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// File looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "foir.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse config file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Prefix printed before every money amount.
    pub currency_symbol: String,
    /// Pause before a result is shown. Zero disables it.
    pub calculation_delay_ms: u64,
    /// Share of the credit card outstanding counted as a monthly obligation.
    pub credit_card_rate: Decimal,
    /// Directory exported documents are written to.
    pub export_dir: PathBuf,
    /// Format used by `export` when none is named.
    pub export_format: String,
    /// Program (plus arguments) that receives the share text on stdin.
    pub share_command: Option<Vec<String>>,
    /// Program (plus arguments) that receives clipboard text on stdin.
    /// When unset, well-known clipboard tools are probed.
    pub clipboard_command: Option<Vec<String>>,
    pub log_file: Option<PathBuf>,
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "₹".to_string(),
            calculation_delay_ms: 1500,
            credit_card_rate: CREDIT_CARD_FACTOR_RATE,
            export_dir: PathBuf::from("."),
            export_format: "csv".to_string(),
            share_command: None,
            clipboard_command: None,
            log_file: None,
            log_level: None,
        }
    }
}

impl AppConfig {
    /// Parses configuration text and validates it.
    pub fn from_toml_str(
        text: &str,
        origin: &Path,
    ) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reads `path`, or `foir.toml` in the working directory when `path` is
    /// `None` and that file exists, or falls back to defaults.
    ///
    /// # Errors
    ///
    /// An explicitly named file that cannot be read is an error. So is any
    /// file that does not parse or validate.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !fallback.is_file() {
                    debug!("no config file, using defaults");
                    return Ok(Self::default());
                }
                fallback
            }
        };

        let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let config = Self::from_toml_str(&text, &path)?;
        debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, command) in [
            ("share_command", &self.share_command),
            ("clipboard_command", &self.clipboard_command),
        ] {
            if let Some(argv) = command {
                if argv.first().is_none_or(|program| program.trim().is_empty()) {
                    return Err(ConfigError::Invalid(format!(
                        "{name} must name a program"
                    )));
                }
            }
        }
        self.calculator()?;
        if self.export_format.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "export_format must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// A calculator using the configured credit card rate.
    pub fn calculator(&self) -> Result<FoirCalculator, ConfigError> {
        FoirCalculator::new(FoirCalculatorConfig {
            credit_card_rate: self.credit_card_rate,
        })
        .map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    pub fn calculation_delay(&self) -> Duration {
        Duration::from_millis(self.calculation_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(text: &str) -> Result<AppConfig, ConfigError> {
        AppConfig::from_toml_str(text, Path::new("test.toml"))
    }

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(parse("").unwrap(), AppConfig::default());
    }

    #[test]
    fn defaults_are_applied_without_a_file() {
        let config = AppConfig::default();

        assert_eq!(config.currency_symbol, "₹");
        assert_eq!(config.calculation_delay(), Duration::from_millis(1500));
        assert_eq!(config.export_format, "csv");
    }

    #[test]
    fn values_override_defaults() {
        let config = parse(
            r#"
currency_symbol = "$"
calculation_delay_ms = 0
export_dir = "out"
share_command = ["notify-send", "FOIR"]
"#,
        )
        .unwrap();

        assert_eq!(config.currency_symbol, "$");
        assert_eq!(config.calculation_delay(), Duration::ZERO);
        assert_eq!(config.export_dir, PathBuf::from("out"));
        assert_eq!(
            config.share_command,
            Some(vec!["notify-send".to_string(), "FOIR".to_string()])
        );
        assert_eq!(config.export_format, "csv");
    }

    #[test]
    fn credit_card_rate_reaches_the_calculator() {
        let config = parse("credit_card_rate = 0.1").unwrap();

        let calculator = config.calculator().unwrap();

        assert_eq!(config.credit_card_rate, rust_decimal_macros::dec!(0.1));
        assert_eq!(
            calculator.credit_card_factor(rust_decimal_macros::dec!(20000)),
            Some(rust_decimal_macros::dec!(2000))
        );
    }

    #[test]
    fn credit_card_rate_above_one_is_rejected() {
        assert!(matches!(parse("credit_card_rate = 1.5"), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn unknown_key_is_rejected() {
        assert!(matches!(parse("colour = \"red\""), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn empty_command_is_rejected() {
        assert!(matches!(parse("share_command = []"), Err(ConfigError::Invalid(_))));
        assert!(matches!(
            parse("clipboard_command = [\" \"]"),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let result = AppConfig::load(Some(Path::new("/this/path/does/not/exist.toml")));

        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}
