use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::FoirCategory;

/// Output of one FOIR calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoirResult {
    /// Obligations as a percentage of salary, unrounded.
    pub foir_percent: Decimal,
    /// Sum of EMIs plus the credit-card factor.
    pub total_obligations: Decimal,
    pub total_emis: Decimal,
    /// Portion of the credit-card outstanding counted as an obligation.
    pub credit_card_factor: Decimal,
}

impl FoirResult {
    pub fn category(&self) -> FoirCategory {
        FoirCategory::from_percent(self.foir_percent)
    }
}
