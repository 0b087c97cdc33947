//! Interfaces to the environment: share, clipboard, document generation.
//!
//! Concrete implementations live in the front-end crate so that tests can
//! swap in stubs.

mod registry;
mod traits;

pub use registry::{DocumentGeneratorRegistry, RegistryError};
pub use traits::{
    CapabilityError, Clipboard, DocumentGenerator, GeneratedDocument, SharePayload, ShareTarget,
};
