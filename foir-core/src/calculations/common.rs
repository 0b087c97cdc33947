//! Common utility functions for FOIR calculations.
//!
//! Rounding here is for display only. Category thresholds are always
//! compared against unrounded values.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use foir_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(32.454)), dec!(32.45));
/// assert_eq!(round_half_up(dec!(32.455)), dec!(32.46));
/// assert_eq!(round_half_up(dec!(-32.455)), dec!(-32.46)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    round_to(value, 2)
}

/// Rounds to `places` decimal places, half away from zero, and pads the
/// scale so that `round_to(dec!(32), 1)` prints as `32.0`.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use foir_core::calculations::common::round_to;
///
/// assert_eq!(round_to(dec!(33.333333), 1).to_string(), "33.3");
/// assert_eq!(round_to(dec!(32), 2).to_string(), "32.00");
/// ```
pub fn round_to(
    value: Decimal,
    places: u32,
) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero);
    if rounded.scale() < places {
        rounded.rescale(places);
    }
    rounded
}
