//! Input State Manager.
//!
//! Owns the salary, the EMI rows, and the credit-card outstanding for one
//! session. It performs no numeric validation; callers coerce bad input to
//! zero before handing it over.

use rust_decimal::Decimal;
use tracing::debug;

use crate::{EmiEntry, EmiId, InputSnapshot};

/// Mutable form state. There is always at least one EMI row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    snapshot: InputSnapshot,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn salary(&self) -> Decimal {
        self.snapshot.salary
    }

    pub fn set_salary(
        &mut self,
        salary: Decimal,
    ) {
        self.snapshot.salary = salary;
    }

    pub fn credit_card_outstanding(&self) -> Decimal {
        self.snapshot.credit_card_outstanding
    }

    pub fn set_credit_card_outstanding(
        &mut self,
        outstanding: Decimal,
    ) {
        self.snapshot.credit_card_outstanding = outstanding;
    }

    pub fn entries(&self) -> &[EmiEntry] {
        &self.snapshot.emi_list
    }

    /// Looks up a row by its 1-based position.
    pub fn entry_at(
        &self,
        position: usize,
    ) -> Option<&EmiEntry> {
        position
            .checked_sub(1)
            .and_then(|idx| self.snapshot.emi_list.get(idx))
    }

    /// Whether a remove would take effect.
    pub fn can_remove(&self) -> bool {
        self.snapshot.emi_list.len() > 1
    }

    /// Sum of the EMI rows, `None` past the `Decimal` range.
    pub fn total_emis(&self) -> Option<Decimal> {
        self.snapshot.total_emis()
    }

    /// Current values as an owned snapshot.
    pub fn snapshot(&self) -> InputSnapshot {
        self.snapshot.clone()
    }

    /// Appends a zero-amount row and returns its id.
    pub fn add_entry(&mut self) -> EmiId {
        let entry = EmiEntry::new();
        let id = entry.id;
        self.snapshot.emi_list.push(entry);
        debug!(%id, count = self.snapshot.emi_list.len(), "EMI row added");
        id
    }

    /// Removes the row with `id`.
    ///
    /// Returns `false` without touching anything when `id` is the only row
    /// left or is not present.
    pub fn remove_entry(
        &mut self,
        id: EmiId,
    ) -> bool {
        if !self.can_remove() {
            debug!(%id, "refusing to remove the last EMI row");
            return false;
        }
        let before = self.snapshot.emi_list.len();
        self.snapshot.emi_list.retain(|e| e.id != id);
        let removed = self.snapshot.emi_list.len() < before;
        debug!(%id, removed, "EMI row remove requested");
        removed
    }

    /// Replaces the amount of the row with `id`. Returns `false` if no row matches.
    pub fn update_entry(
        &mut self,
        id: EmiId,
        amount: Decimal,
    ) -> bool {
        match self.snapshot.emi_list.iter_mut().find(|e| e.id == id) {
            Some(entry) => {
                entry.amount = amount;
                true
            }
            None => false,
        }
    }

    /// Restores salary and outstanding to zero with a single zero-amount row.
    pub fn reset(&mut self) {
        self.snapshot = InputSnapshot::default();
        debug!("input state reset");
    }
}

impl From<InputSnapshot> for InputState {
    /// Adopts `snapshot`, adding a zero-amount row if it has none.
    fn from(mut snapshot: InputSnapshot) -> Self {
        if snapshot.emi_list.is_empty() {
            snapshot.emi_list.push(EmiEntry::new());
        }
        Self { snapshot }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn new_state_has_one_zero_row() {
        let state = InputState::new();

        assert_eq!(state.entries().len(), 1);
        assert_eq!(state.entries()[0].amount, Decimal::ZERO);
        assert_eq!(state.salary(), Decimal::ZERO);
        assert_eq!(state.credit_card_outstanding(), Decimal::ZERO);
    }

    #[test]
    fn add_entry_appends_zero_row_with_unique_id() {
        let mut state = InputState::new();
        let first = state.entries()[0].id;

        let added = state.add_entry();

        assert_eq!(state.entries().len(), 2);
        assert_ne!(first, added);
        assert_eq!(state.entries()[1].id, added);
        assert_eq!(state.entries()[1].amount, Decimal::ZERO);
    }

    #[test]
    fn many_rows_can_be_added() {
        let mut state = InputState::new();
        for _ in 0..50 {
            state.add_entry();
        }

        assert_eq!(state.entries().len(), 51);
    }

    #[test]
    fn removing_sole_row_is_a_noop() {
        let mut state = InputState::new();
        let only = state.entries()[0].id;
        state.update_entry(only, dec!(1500));
        let before = state.clone();

        let removed = state.remove_entry(only);

        assert!(!removed);
        assert_eq!(state, before);
        assert_eq!(state.entries()[0].amount, dec!(1500));
    }

    #[test]
    fn remove_entry_deletes_matching_row() {
        let mut state = InputState::new();
        let first = state.entries()[0].id;
        let second = state.add_entry();

        assert!(state.remove_entry(first));

        assert_eq!(state.entries().len(), 1);
        assert_eq!(state.entries()[0].id, second);
    }

    #[test]
    fn remove_unknown_id_changes_nothing() {
        let mut state = InputState::new();
        state.add_entry();

        assert!(!state.remove_entry(EmiId::new()));
        assert_eq!(state.entries().len(), 2);
    }

    #[test]
    fn update_entry_replaces_amount() {
        let mut state = InputState::new();
        let id = state.add_entry();

        assert!(state.update_entry(id, dec!(7500)));
        assert!(state.update_entry(id, dec!(2500)));

        assert_eq!(state.entries()[1].amount, dec!(2500));
        assert_eq!(state.total_emis(), Some(dec!(2500)));
    }

    #[test]
    fn update_unknown_id_returns_false() {
        let mut state = InputState::new();

        assert!(!state.update_entry(EmiId::new(), dec!(10)));
    }

    #[test]
    fn entry_at_is_one_based() {
        let mut state = InputState::new();
        let second = state.add_entry();

        assert_eq!(state.entry_at(2).map(|e| e.id), Some(second));
        assert!(state.entry_at(0).is_none());
        assert!(state.entry_at(3).is_none());
    }

    #[test]
    fn from_snapshot_keeps_at_least_one_row() {
        let snapshot = InputSnapshot {
            salary: dec!(100),
            emi_list: Vec::new(),
            credit_card_outstanding: dec!(5),
        };

        let state = InputState::from(snapshot);

        assert_eq!(state.entries().len(), 1);
        assert_eq!(state.salary(), dec!(100));
    }

    #[test]
    fn reset_restores_defaults() {
        let mut state = InputState::new();
        state.set_salary(dec!(50000));
        state.set_credit_card_outstanding(dec!(20000));
        let id = state.add_entry();
        state.update_entry(id, dec!(10000));

        state.reset();

        assert_eq!(state.salary(), Decimal::ZERO);
        assert_eq!(state.credit_card_outstanding(), Decimal::ZERO);
        assert_eq!(state.entries().len(), 1);
        assert_eq!(state.entries()[0].amount, Decimal::ZERO);
    }
}
