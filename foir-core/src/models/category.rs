use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Qualitative band a FOIR percentage falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FoirCategory {
    Excellent,
    Good,
    Poor,
}

/// How a category should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tone {
    Favorable,
    Cautionary,
    Unfavorable,
}

/// Lower bound of the Good band (inclusive).
pub const GOOD_LOWER_BOUND: Decimal = Decimal::from_parts(50, 0, 0, false, 0);
/// Upper bound of the Good band (inclusive).
pub const GOOD_UPPER_BOUND: Decimal = Decimal::from_parts(60, 0, 0, false, 0);

/// Guideline lines shown under every result.
pub const GUIDELINES: [&str; 3] = [
    "Below 50%: Excellent financial health",
    "50-60%: Moderate obligations, manageable",
    "Above 60%: High obligations, consider reducing debt",
];

impl FoirCategory {
    /// Maps a percentage to its band: `< 50` Excellent, `50..=60` Good, `> 60` Poor.
    pub fn from_percent(foir_percent: Decimal) -> Self {
        if foir_percent < GOOD_LOWER_BOUND {
            Self::Excellent
        } else if foir_percent <= GOOD_UPPER_BOUND {
            Self::Good
        } else {
            Self::Poor
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Poor => "Poor",
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            Self::Excellent => Tone::Favorable,
            Self::Good => Tone::Cautionary,
            Self::Poor => Tone::Unfavorable,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::Excellent => "Very Good FOIR! You are loan eligible",
            Self::Good => "Average FOIR. You may qualify for loans",
            Self::Poor => "High Risk FOIR. Loan approval may be difficult",
        }
    }

    /// Short marker printed before the category label.
    pub fn marker(&self) -> &'static str {
        match self {
            Self::Excellent => "🎯",
            Self::Good => "⚠️",
            Self::Poor => "🔴",
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn just_below_fifty_is_excellent() {
        assert_eq!(FoirCategory::from_percent(dec!(49.99)), FoirCategory::Excellent);
    }

    #[test]
    fn fifty_is_good() {
        assert_eq!(FoirCategory::from_percent(dec!(50)), FoirCategory::Good);
    }

    #[test]
    fn sixty_is_good() {
        assert_eq!(FoirCategory::from_percent(dec!(60)), FoirCategory::Good);
        assert_eq!(FoirCategory::from_percent(dec!(60.00)), FoirCategory::Good);
    }

    #[test]
    fn just_above_sixty_is_poor() {
        assert_eq!(FoirCategory::from_percent(dec!(60.01)), FoirCategory::Poor);
    }

    #[test]
    fn zero_and_very_large_values() {
        assert_eq!(FoirCategory::from_percent(Decimal::ZERO), FoirCategory::Excellent);
        assert_eq!(FoirCategory::from_percent(dec!(250)), FoirCategory::Poor);
    }

    #[test]
    fn tones_follow_categories() {
        assert_eq!(FoirCategory::Excellent.tone(), Tone::Favorable);
        assert_eq!(FoirCategory::Good.tone(), Tone::Cautionary);
        assert_eq!(FoirCategory::Poor.tone(), Tone::Unfavorable);
    }
}
