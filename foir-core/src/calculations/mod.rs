//! FOIR calculation modules.
//!
//! The calculator is a pure function of an [`InputSnapshot`](crate::InputSnapshot).

pub mod common;
pub mod foir;

pub use foir::{CREDIT_CARD_FACTOR_RATE, FoirCalculator, FoirCalculatorConfig, FoirError};
