use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{FoirCategory, FoirResult, InputSnapshot};

/// The figures a rendered or exported result is made of.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakdown {
    pub salary: Decimal,
    pub total_emis: Decimal,
    pub emi_count: usize,
    pub credit_card_outstanding: Decimal,
    pub credit_card_factor: Decimal,
    pub total_obligations: Decimal,
    pub foir_percent: Decimal,
    pub category: FoirCategory,
}

impl Breakdown {
    /// Pairs a result with the snapshot that produced it.
    pub fn new(
        snapshot: &InputSnapshot,
        result: &FoirResult,
    ) -> Self {
        Self {
            salary: snapshot.salary,
            total_emis: result.total_emis,
            emi_count: snapshot.emi_list.len(),
            credit_card_outstanding: snapshot.credit_card_outstanding,
            credit_card_factor: result.credit_card_factor,
            total_obligations: result.total_obligations,
            foir_percent: result.foir_percent,
            category: result.category(),
        }
    }
}
