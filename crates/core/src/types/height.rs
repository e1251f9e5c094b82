//! Height tier tags.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Key selecting one of several price tiers of the same product.
///
/// Tiers are physical size classes of a seedling (`1м`, `1,4м+`), not stock
/// counts. Products with a single price use the [`HeightTag::STANDARD`] tier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HeightTag(String);

impl HeightTag {
    /// Tag of the single tier of a product without height pricing.
    pub const STANDARD: &'static str = "standard";

    /// Create a tag from any string.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// The `standard` tag.
    #[must_use]
    pub fn standard() -> Self {
        Self(Self::STANDARD.to_owned())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_standard(&self) -> bool {
        self.0 == Self::STANDARD
    }
}

impl fmt::Display for HeightTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for HeightTag {
    fn from(tag: &str) -> Self {
        Self(tag.to_owned())
    }
}

impl AsRef<str> for HeightTag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
