use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::Breakdown;

/// Failure reported by an external collaborator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CapabilityError {
    /// The capability does not exist in this environment.
    #[error("{0} is not available")]
    Unavailable(String),

    /// The capability exists but the call failed.
    #[error("{0}")]
    Failed(String),
}

/// What gets handed to a share target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharePayload {
    pub title: String,
    pub text: String,
}

/// A document written by a [`DocumentGenerator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedDocument {
    /// Format name of the generator that produced it (e.g. `"csv"`).
    pub format: &'static str,
    pub path: PathBuf,
}

/// System-level share facility.
#[async_trait]
pub trait ShareTarget: Send + Sync {
    async fn share(&self, payload: &SharePayload) -> Result<(), CapabilityError>;
}

/// Clipboard write access.
#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn copy(&self, text: &str) -> Result<(), CapabilityError>;
}

/// Serializes a breakdown into a downloadable document.
pub trait DocumentGenerator: Send + Sync {
    /// Unique, lowercase format identifier.
    fn format_name(&self) -> &'static str;

    fn generate(&self, breakdown: &Breakdown) -> Result<GeneratedDocument, CapabilityError>;
}
