//! Prices in whole hryvnias.
//!
//! The nursery sells seedlings by the piece and never deals in kopecks, so a
//! price is a plain non-negative integer amount of UAH.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Currency suffix used in every rendered amount.
pub const CURRENCY_SUFFIX: &str = "грн";

/// A per-piece price in whole hryvnias.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Price(u32);

impl Price {
    /// Price applied when a product carries no parseable price text.
    pub const UNIFIED: Self = Self(800);

    /// Create a new price.
    #[must_use]
    pub const fn new(amount: u32) -> Self {
        Self(amount)
    }

    /// Get the amount in hryvnias.
    #[must_use]
    pub const fn amount(&self) -> u32 {
        self.0
    }

    /// Total for `qty` pieces. Widened so large quantities cannot overflow.
    #[must_use]
    pub fn line_total(&self, qty: u32) -> u64 {
        u64::from(self.0) * u64::from(qty)
    }

    /// Per-piece label, e.g. `600 грн/шт`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} {CURRENCY_SUFFIX}/шт", self.0)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {CURRENCY_SUFFIX}", self.0)
    }
}

impl From<u32> for Price {
    fn from(amount: u32) -> Self {
        Self(amount)
    }
}

/// Format an amount with `uk-UA` digit grouping (non-breaking space every
/// three digits), e.g. `12 400`.
#[must_use]
pub fn group_thousands(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 * 2);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('\u{a0}');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label() {
        assert_eq!(Price::new(600).label(), "600 грн/шт");
    }

    #[test]
    fn test_display() {
        assert_eq!(Price::new(650).to_string(), "650 грн");
    }

    #[test]
    fn test_line_total_does_not_overflow() {
        let price = Price::new(u32::MAX);
        assert_eq!(price.line_total(2), u64::from(u32::MAX) * 2);
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(800), "800");
        assert_eq!(group_thousands(2400), "2\u{a0}400");
        assert_eq!(group_thousands(1_234_567), "1\u{a0}234\u{a0}567");
    }
}
