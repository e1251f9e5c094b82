//! Status enums shared by the catalog and the cart.

use serde::{Deserialize, Serialize};

/// Stock status of a product or of one of its height tiers.
///
/// Governs whether an item may be added to the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    #[default]
    InStock,
    /// Few seedlings left; still sellable.
    Limited,
    OutOfStock,
}

impl Availability {
    /// Whether items with this status may be put in the cart.
    #[must_use]
    pub const fn is_sellable(self) -> bool {
        !matches!(self, Self::OutOfStock)
    }
}

impl std::fmt::Display for Availability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InStock => write!(f, "in_stock"),
            Self::Limited => write!(f, "limited"),
            Self::OutOfStock => write!(f, "out_of_stock"),
        }
    }
}

impl std::str::FromStr for Availability {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in_stock" => Ok(Self::InStock),
            "limited" => Ok(Self::Limited),
            "out_of_stock" => Ok(Self::OutOfStock),
            _ => Err(format!("invalid availability: {s}")),
        }
    }
}
