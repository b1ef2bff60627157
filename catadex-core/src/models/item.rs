//! Catalog item types.
//!
//! This module contains the records returned by the catalog API:
//! - [`ItemSummary`] - Minimal list-endpoint reference
//! - [`PageResponse`] - One page of summaries with continuation pointers
//! - [`ItemDetail`] - Full per-item record fetched individually

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Maximum base value used for stat bars when the stat is not known.
const DEFAULT_STAT_MAX: u32 = 100;

// ============================================================================
// Summary & Page
// ============================================================================

/// Minimal reference returned by the list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSummary {
    /// Item name (lowercase slug).
    pub name: String,
    /// Absolute URL of the detail endpoint.
    pub url: String,
}

impl ItemSummary {
    /// Creates a new summary.
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// One page of the list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageResponse {
    /// Total number of items upstream.
    #[serde(default)]
    pub count: u32,
    /// URL of the next page, absent on the last page.
    #[serde(default)]
    pub next: Option<String>,
    /// URL of the previous page.
    #[serde(default)]
    pub previous: Option<String>,
    /// Summaries on this page.
    #[serde(default)]
    pub results: Vec<ItemSummary>,
}

impl PageResponse {
    /// Returns true if the upstream advertises a following page.
    pub fn has_next(&self) -> bool {
        self.next.as_deref().is_some_and(|n| !n.is_empty())
    }

    /// Returns true if the page carries no summaries.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

// ============================================================================
// Detail
// ============================================================================

/// Full record for a single catalog item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDetail {
    /// Numeric identifier, unique across the catalog.
    pub id: u32,
    /// Item name (lowercase slug).
    pub name: String,
    /// Height in decimetres.
    pub height: u32,
    /// Weight in hectograms.
    pub weight: u32,
    /// Types, ordered by slot.
    pub types: Vec<TypeSlot>,
    /// Base stats, in upstream order.
    pub stats: Vec<StatEntry>,
    /// Image URLs.
    pub images: ItemImages,
    /// Abilities, in upstream order.
    pub abilities: Vec<AbilityEntry>,
}

/// A type assigned to an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSlot {
    /// Slot position (1-based).
    pub slot: u8,
    /// Type name (e.g. "grass").
    pub type_name: String,
}

/// A single base stat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatEntry {
    /// Base value.
    pub base_value: u32,
    /// Effort value yield.
    #[serde(default)]
    pub effort: u32,
    /// Stat name (e.g. "special-attack").
    pub stat_name: String,
}

impl StatEntry {
    /// Returns the highest base value any item has for this stat.
    pub fn max_value(&self) -> u32 {
        match self.stat_name.as_str() {
            "hp" => 255,
            "attack" => 190,
            "defense" | "special-defense" => 250,
            "special-attack" => 194,
            "speed" => 200,
            _ => DEFAULT_STAT_MAX,
        }
    }

    /// Returns the base value as a percentage of the stat maximum, capped at 100.
    pub fn percent_of_max(&self) -> f64 {
        let pct = f64::from(self.base_value) / f64::from(self.max_value()) * 100.0;
        pct.min(100.0)
    }
}

/// Image URLs for an item. Upstream sends null for missing sprites.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemImages {
    /// Front sprite.
    pub primary: Option<String>,
    /// Back sprite.
    pub secondary: Option<String>,
    /// Official artwork.
    pub artwork: Option<String>,
}

/// An ability an item can have.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityEntry {
    /// Ability name.
    pub name: String,
    /// Whether this is a hidden ability.
    pub is_hidden: bool,
    /// Slot position.
    pub slot: u8,
}

impl ItemDetail {
    /// Formats the catalog number as `#001`.
    pub fn display_number(&self) -> String {
        format!("#{:03}", self.id)
    }

    /// Returns the name with its first letter capitalized.
    pub fn display_name(&self) -> String {
        capitalize(&self.name)
    }

    /// Returns the type names in slot order.
    pub fn type_names(&self) -> Vec<String> {
        let mut slots: Vec<&TypeSlot> = self.types.iter().collect();
        slots.sort_by_key(|t| t.slot);
        slots.into_iter().map(|t| t.type_name.clone()).collect()
    }

    /// Returns the best image to show: artwork, falling back to the front sprite.
    pub fn image_url(&self) -> Option<&str> {
        self.images
            .artwork
            .as_deref()
            .filter(|u| !u.is_empty())
            .or(self.images.primary.as_deref().filter(|u| !u.is_empty()))
    }

    /// Sum of all base stats.
    pub fn total_base_stats(&self) -> u32 {
        self.stats.iter().map(|s| s.base_value).sum()
    }

    /// Height in metres.
    pub fn height_m(&self) -> f64 {
        f64::from(self.height) / 10.0
    }

    /// Weight in kilograms.
    pub fn weight_kg(&self) -> f64 {
        f64::from(self.weight) / 10.0
    }

    /// Validates invariants the rest of the system relies on.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidData`] for a zero id or an empty name.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.id == 0 {
            return Err(CoreError::InvalidData(format!(
                "item '{}' has id 0",
                self.name
            )));
        }
        if self.name.trim().is_empty() {
            return Err(CoreError::InvalidData(format!(
                "item {} has an empty name",
                self.id
            )));
        }
        Ok(())
    }
}

/// Capitalizes the first character of a name.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ============================================================================
// Tests
// ============================================================================
