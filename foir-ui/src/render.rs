//! Text rendering of the form and of a computed result.

use std::fmt;

use foir_core::models::{Breakdown, GUIDELINES, Tone};
use foir_core::InputState;
use rust_decimal::Decimal;

use crate::utils::{format_amount, format_money, format_percent};

/// Current form values, one line per field.
pub struct InputsView<'a> {
    pub state: &'a InputState,
    pub currency_symbol: &'a str,
    /// Rate the calculator applies to the outstanding balance.
    pub credit_card_rate: Decimal,
}

impl fmt::Display for InputsView<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let sym = self.currency_symbol;
        writeln!(
            f,
            "Monthly Net Salary:       {}",
            format_money(sym, self.state.salary())
        )?;
        writeln!(f, "Monthly EMIs:")?;
        for (idx, entry) in self.state.entries().iter().enumerate() {
            writeln!(f, "  EMI {} amount:           {}", idx + 1, format_money(sym, entry.amount))?;
        }
        // totals past the Decimal range are left out
        if let Some(total_emis) = self.state.total_emis().filter(|t| *t > Decimal::ZERO) {
            writeln!(f, "  Total Monthly EMIs:     {}", format_money(sym, total_emis))?;
        }

        let outstanding = self.state.credit_card_outstanding();
        writeln!(f, "Credit Card Outstanding:  {}", format_money(sym, outstanding))?;
        let rate = self.credit_card_rate;
        let hint = rate
            .checked_mul(Decimal::ONE_HUNDRED)
            .zip(outstanding.checked_mul(rate));
        if let Some((percent, factor)) = hint.filter(|_| outstanding > Decimal::ZERO) {
            writeln!(
                f,
                "  {}% of {} = {} will be added to your obligations",
                format_amount(percent),
                format_money(sym, outstanding),
                format_money(sym, factor)
            )?;
        }
        Ok(())
    }
}

/// A computed result with its breakdown and guidelines.
pub struct ResultView<'a> {
    pub breakdown: &'a Breakdown,
    pub currency_symbol: &'a str,
    /// Inputs were edited after this result was computed.
    pub stale: bool,
}

fn tone_word(tone: Tone) -> &'static str {
    match tone {
        Tone::Favorable => "favorable",
        Tone::Cautionary => "cautionary",
        Tone::Unfavorable => "unfavorable",
    }
}

impl fmt::Display for ResultView<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let b = self.breakdown;
        let sym = self.currency_symbol;

        writeln!(f, "Your FOIR Result")?;
        writeln!(f, "Fixed Obligations to Income Ratio")?;
        if self.stale {
            writeln!(f, "(inputs changed since this result; run `calc` again)")?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "  {}%  {} {} FOIR ({})",
            format_percent(b.foir_percent, 1),
            b.category.marker(),
            b.category.label(),
            tone_word(b.category.tone())
        )?;
        writeln!(f, "  {}", b.category.message())?;
        writeln!(f)?;

        writeln!(f, "Calculation Breakdown")?;
        writeln!(f, "  Monthly Salary:         {}", format_money(sym, b.salary))?;
        writeln!(
            f,
            "  Total EMIs ({}):         {}",
            b.emi_count,
            format_money(sym, b.total_emis)
        )?;
        writeln!(
            f,
            "  Credit Card Factor:     {}",
            format_money(sym, b.credit_card_factor)
        )?;
        writeln!(
            f,
            "  Total Obligations:      {}",
            format_money(sym, b.total_obligations)
        )?;
        writeln!(
            f,
            "  FOIR Calculation:       {} ÷ {} × 100",
            format_amount(b.total_obligations),
            format_amount(b.salary)
        )?;
        writeln!(f)?;

        writeln!(f, "FOIR Guidelines")?;
        for line in GUIDELINES {
            writeln!(f, "  • {line}")?;
        }
        Ok(())
    }
}
