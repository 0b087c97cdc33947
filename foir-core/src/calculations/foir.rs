//! Fixed Obligations to Income Ratio calculation.
//!
//! | Step | Value |
//! |------|-------|
//! | 1    | Credit-card factor: outstanding × rate (5% unless configured) |
//! | 2    | Total EMIs: sum of every EMI amount |
//! | 3    | Total obligations: Step 1 + Step 2 |
//! | 4    | FOIR: (Step 3 ÷ salary) × 100 |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use foir_core::calculations::FoirCalculator;
//! use foir_core::{FoirCategory, InputSnapshot};
//!
//! let snapshot = InputSnapshot::from_amounts(
//!     dec!(50000),
//!     &[dec!(10000), dec!(5000)],
//!     dec!(20000),
//! );
//!
//! let result = FoirCalculator::default().calculate(&snapshot).unwrap();
//!
//! assert_eq!(result.credit_card_factor, dec!(1000));
//! assert_eq!(result.total_obligations, dec!(16000));
//! assert_eq!(result.foir_percent, dec!(32));
//! assert_eq!(result.category(), FoirCategory::Excellent);
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::{FoirResult, InputSnapshot};

/// Share of the credit-card outstanding counted as a monthly obligation.
pub const CREDIT_CARD_FACTOR_RATE: Decimal = Decimal::from_parts(5, 0, 0, false, 2);

/// Errors that can occur during a FOIR calculation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FoirError {
    /// Salary is zero or negative, so there is nothing to divide by.
    #[error("incomplete input: salary must be greater than zero, got {0}")]
    IncompleteInput(Decimal),

    /// An obligation amount is below zero.
    #[error("{field} must not be negative, got {amount}")]
    NegativeAmount { field: &'static str, amount: Decimal },

    /// A total or the ratio does not fit in a `Decimal`.
    #[error("{0} is too large to calculate")]
    Overflow(&'static str),

    /// The credit-card rate is outside [0, 1].
    #[error("credit card rate must be between 0 and 1, got {0}")]
    InvalidCreditCardRate(Decimal),
}

/// Tunables for [`FoirCalculator`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoirCalculatorConfig {
    /// Multiplier applied to the credit-card outstanding (Step 1).
    pub credit_card_rate: Decimal,
}

impl Default for FoirCalculatorConfig {
    fn default() -> Self {
        Self {
            credit_card_rate: CREDIT_CARD_FACTOR_RATE,
        }
    }
}

impl FoirCalculatorConfig {
    /// Validates the configuration values.
    ///
    /// # Errors
    ///
    /// Returns [`FoirError::InvalidCreditCardRate`] if the rate is not in [0, 1].
    pub fn validate(&self) -> Result<(), FoirError> {
        if self.credit_card_rate < Decimal::ZERO || self.credit_card_rate > Decimal::ONE {
            return Err(FoirError::InvalidCreditCardRate(self.credit_card_rate));
        }
        Ok(())
    }
}

/// Pure FOIR calculator.
///
/// Holds no state between calls. Every call recomputes from the snapshot.
#[derive(Debug, Clone, Default)]
pub struct FoirCalculator {
    config: FoirCalculatorConfig,
}

impl FoirCalculator {
    /// Creates a calculator after validating `config`.
    ///
    /// # Errors
    ///
    /// Returns [`FoirError::InvalidCreditCardRate`] for an out-of-range rate.
    pub fn new(config: FoirCalculatorConfig) -> Result<Self, FoirError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &FoirCalculatorConfig {
        &self.config
    }

    /// Checks that `calculate` would succeed, without logging a result.
    ///
    /// # Errors
    ///
    /// The same as [`FoirCalculator::calculate`].
    pub fn check_input(
        &self,
        snapshot: &InputSnapshot,
    ) -> Result<(), FoirError> {
        self.compute(snapshot).map(|_| ())
    }

    /// Calculates FOIR for `snapshot`.
    ///
    /// # Errors
    ///
    /// * [`FoirError::IncompleteInput`] when salary is not positive. No
    ///   division is attempted.
    /// * [`FoirError::NegativeAmount`] when the EMI total or outstanding is negative.
    /// * [`FoirError::Overflow`] when a step leaves the `Decimal` range.
    pub fn calculate(
        &self,
        snapshot: &InputSnapshot,
    ) -> Result<FoirResult, FoirError> {
        let result = self.compute(snapshot)?;

        debug!(
            total_emis = %result.total_emis,
            credit_card_factor = %result.credit_card_factor,
            total_obligations = %result.total_obligations,
            foir_percent = %result.foir_percent,
            "FOIR calculated"
        );

        Ok(result)
    }

    /// Step 1: portion of the outstanding balance that counts as an
    /// obligation. `None` past the `Decimal` range.
    pub fn credit_card_factor(
        &self,
        outstanding: Decimal,
    ) -> Option<Decimal> {
        outstanding.checked_mul(self.config.credit_card_rate)
    }

    fn compute(
        &self,
        snapshot: &InputSnapshot,
    ) -> Result<FoirResult, FoirError> {
        let salary = snapshot.salary;
        if salary <= Decimal::ZERO {
            return Err(FoirError::IncompleteInput(salary));
        }

        let total_emis = snapshot
            .total_emis()
            .ok_or(FoirError::Overflow("total EMIs"))?;
        if total_emis < Decimal::ZERO {
            return Err(FoirError::NegativeAmount {
                field: "total EMIs",
                amount: total_emis,
            });
        }

        let outstanding = snapshot.credit_card_outstanding;
        if outstanding < Decimal::ZERO {
            return Err(FoirError::NegativeAmount {
                field: "credit card outstanding",
                amount: outstanding,
            });
        }

        let credit_card_factor = self
            .credit_card_factor(outstanding)
            .ok_or(FoirError::Overflow("credit card factor"))?;
        let total_obligations = total_emis
            .checked_add(credit_card_factor)
            .ok_or(FoirError::Overflow("total obligations"))?;
        let foir_percent = total_obligations
            .checked_div(salary)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .ok_or(FoirError::Overflow("FOIR"))?
            .normalize();

        Ok(FoirResult {
            foir_percent,
            total_obligations,
            total_emis,
            credit_card_factor,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::FoirCategory;

    fn snapshot(
        salary: Decimal,
        emis: &[Decimal],
        outstanding: Decimal,
    ) -> InputSnapshot {
        InputSnapshot::from_amounts(salary, emis, outstanding)
    }

    #[test]
    fn two_emis_and_card_outstanding_is_excellent() {
        let result = FoirCalculator::default()
            .calculate(&snapshot(dec!(50000), &[dec!(10000), dec!(5000)], dec!(20000)))
            .unwrap();

        assert_eq!(result.credit_card_factor, dec!(1000));
        assert_eq!(result.total_emis, dec!(15000));
        assert_eq!(result.total_obligations, dec!(16000));
        assert_eq!(result.foir_percent, dec!(32));
        assert_eq!(result.category(), FoirCategory::Excellent);
    }

    #[test]
    fn half_of_salary_is_good() {
        let result = FoirCalculator::default()
            .calculate(&snapshot(dec!(40000), &[dec!(20000)], dec!(0)))
            .unwrap();

        assert_eq!(result.foir_percent, dec!(50));
        assert_eq!(result.category(), FoirCategory::Good);
    }

    #[test]
    fn obligations_above_sixty_percent_are_poor() {
        let result = FoirCalculator::default()
            .calculate(&snapshot(dec!(10000), &[dec!(6001)], dec!(0)))
            .unwrap();

        assert_eq!(result.foir_percent, dec!(60.01));
        assert_eq!(result.category(), FoirCategory::Poor);
    }

    #[test]
    fn matches_formula_for_fractional_amounts() {
        let salary = dec!(73456.78);
        let emis = [dec!(1234.5), dec!(999.99), dec!(0.01)];
        let outstanding = dec!(12345.67);

        let result = FoirCalculator::default()
            .calculate(&snapshot(salary, &emis, outstanding))
            .unwrap();

        let expected_obligations = dec!(1234.5) + dec!(999.99) + dec!(0.01) + outstanding * dec!(0.05);
        assert_eq!(result.total_obligations, expected_obligations);
        assert_eq!(
            result.foir_percent,
            (expected_obligations / salary * dec!(100)).normalize()
        );
    }

    #[test]
    fn zero_obligations_give_zero_percent() {
        let result = FoirCalculator::default()
            .calculate(&snapshot(dec!(30000), &[], dec!(0)))
            .unwrap();

        assert_eq!(result.foir_percent, Decimal::ZERO);
        assert_eq!(result.category(), FoirCategory::Excellent);
    }

    #[test]
    fn zero_salary_is_incomplete_input() {
        let err = FoirCalculator::default()
            .calculate(&snapshot(dec!(0), &[dec!(1000)], dec!(0)))
            .unwrap_err();

        assert_eq!(err, FoirError::IncompleteInput(dec!(0)));
    }

    #[test]
    fn negative_salary_is_incomplete_input() {
        let err = FoirCalculator::default()
            .calculate(&snapshot(dec!(-5), &[], dec!(0)))
            .unwrap_err();

        assert_eq!(err, FoirError::IncompleteInput(dec!(-5)));
    }

    #[test]
    fn negative_outstanding_is_rejected() {
        let err = FoirCalculator::default()
            .calculate(&snapshot(dec!(1000), &[], dec!(-1)))
            .unwrap_err();

        assert_eq!(
            err,
            FoirError::NegativeAmount {
                field: "credit card outstanding",
                amount: dec!(-1),
            }
        );
    }

    #[test]
    fn negative_emi_total_is_rejected() {
        let err = FoirCalculator::default()
            .calculate(&snapshot(dec!(1000), &[dec!(100), dec!(-300)], dec!(0)))
            .unwrap_err();

        assert!(matches!(err, FoirError::NegativeAmount { field: "total EMIs", .. }));
    }

    #[test]
    fn custom_rate_is_applied() {
        let calculator = FoirCalculator::new(FoirCalculatorConfig {
            credit_card_rate: dec!(0.10),
        })
        .unwrap();

        assert_eq!(calculator.credit_card_factor(dec!(20000)), Some(dec!(2000)));
    }

    #[test]
    fn rate_above_one_is_rejected() {
        let err = FoirCalculator::new(FoirCalculatorConfig {
            credit_card_rate: dec!(1.5),
        })
        .unwrap_err();

        assert_eq!(err, FoirError::InvalidCreditCardRate(dec!(1.5)));
    }

    #[test]
    fn ratio_past_decimal_range_is_overflow() {
        let calculator = FoirCalculator::default();
        let huge = snapshot(dec!(1), &[Decimal::MAX], dec!(0));

        assert_eq!(calculator.calculate(&huge), Err(FoirError::Overflow("FOIR")));
        assert_eq!(calculator.check_input(&huge), Err(FoirError::Overflow("FOIR")));
    }

    #[test]
    fn emi_sum_past_decimal_range_is_overflow() {
        let err = FoirCalculator::default()
            .calculate(&snapshot(dec!(50000), &[Decimal::MAX, Decimal::MAX], dec!(0)))
            .unwrap_err();

        assert_eq!(err, FoirError::Overflow("total EMIs"));
    }

    #[test]
    fn obligations_past_decimal_range_is_overflow() {
        let err = FoirCalculator::default()
            .calculate(&snapshot(dec!(50000), &[Decimal::MAX], dec!(20000)))
            .unwrap_err();

        assert_eq!(err, FoirError::Overflow("total obligations"));
    }

    #[test]
    fn salary_check_comes_before_overflow() {
        let err = FoirCalculator::default()
            .check_input(&snapshot(dec!(0), &[Decimal::MAX, Decimal::MAX], dec!(0)))
            .unwrap_err();

        assert_eq!(err, FoirError::IncompleteInput(dec!(0)));
    }

    #[test]
    fn default_rate_is_five_percent() {
        assert_eq!(CREDIT_CARD_FACTOR_RATE, dec!(0.05));
    }
}
