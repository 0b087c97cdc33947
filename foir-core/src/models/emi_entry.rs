use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of one EMI row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmiId(Uuid);

impl EmiId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EmiId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EmiId {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single monthly loan installment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmiEntry {
    pub id: EmiId,
    pub amount: Decimal,
}

impl EmiEntry {
    /// Creates an entry with a fresh id and a zero amount.
    pub fn new() -> Self {
        Self {
            id: EmiId::new(),
            amount: Decimal::ZERO,
        }
    }

    pub fn with_amount(amount: Decimal) -> Self {
        Self {
            id: EmiId::new(),
            amount,
        }
    }
}

impl Default for EmiEntry {
    fn default() -> Self {
        Self::new()
    }
}
