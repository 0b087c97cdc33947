use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::EmiEntry;

/// Everything the user has entered at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSnapshot {
    /// Monthly net salary.
    pub salary: Decimal,
    /// Monthly EMIs in the order they were added.
    pub emi_list: Vec<EmiEntry>,
    /// Current credit-card outstanding balance.
    pub credit_card_outstanding: Decimal,
}

impl InputSnapshot {
    /// Builds a snapshot from plain amounts, assigning fresh ids to the EMIs.
    pub fn from_amounts(
        salary: Decimal,
        emis: &[Decimal],
        credit_card_outstanding: Decimal,
    ) -> Self {
        let mut emi_list: Vec<EmiEntry> = emis.iter().copied().map(EmiEntry::with_amount).collect();
        if emi_list.is_empty() {
            emi_list.push(EmiEntry::new());
        }
        Self {
            salary,
            emi_list,
            credit_card_outstanding,
        }
    }

    /// Sum of every EMI amount, or `None` if it does not fit in a `Decimal`.
    pub fn total_emis(&self) -> Option<Decimal> {
        self.emi_list
            .iter()
            .try_fold(Decimal::ZERO, |total, e| total.checked_add(e.amount))
    }
}

impl Default for InputSnapshot {
    fn default() -> Self {
        Self {
            salary: Decimal::ZERO,
            emi_list: vec![EmiEntry::new()],
            credit_card_outstanding: Decimal::ZERO,
        }
    }
}
