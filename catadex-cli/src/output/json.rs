//! JSON output formatting.

use anyhow::Result;
use catadex_core::ItemDetail;
use catadex_fetch::PaginationCursor;
use serde::Serialize;

// ============================================================================
// Output Types
// ============================================================================

/// JSON output for a single item.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemOutput {
    pub id: u32,
    pub number: String,
    pub name: String,
    pub types: Vec<String>,
    pub height_m: f64,
    pub weight_kg: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub abilities: Vec<AbilityOutput>,
    pub stats: Vec<StatOutput>,
    pub total_base_stats: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favorite: Option<bool>,
}

/// An ability.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AbilityOutput {
    pub name: String,
    pub hidden: bool,
}

/// A base stat.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatOutput {
    pub name: String,
    pub base: u32,
    pub percent_of_max: f64,
}

/// Result of a browse run.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowseOutput {
    pub items: Vec<ItemOutput>,
    pub loaded: usize,
    pub next_offset: u32,
    pub has_more: bool,
}

// ============================================================================
// Formatter
// ============================================================================

/// JSON formatter.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Formats any serializable value.
    pub fn format<T: Serialize + ?Sized>(&self, data: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(data)?
        } else {
            serde_json::to_string(data)?
        };
        Ok(json)
    }

    /// Converts an item to its output shape.
    pub fn item_to_output(&self, item: &ItemDetail, favorite: Option<bool>) -> ItemOutput {
        ItemOutput {
            id: item.id,
            number: item.display_number(),
            name: item.name.clone(),
            types: item.type_names(),
            height_m: item.height_m(),
            weight_kg: item.weight_kg(),
            image_url: item.image_url().map(str::to_string),
            abilities: item
                .abilities
                .iter()
                .map(|a| AbilityOutput {
                    name: a.name.clone(),
                    hidden: a.is_hidden,
                })
                .collect(),
            stats: item
                .stats
                .iter()
                .map(|s| StatOutput {
                    name: s.stat_name.clone(),
                    base: s.base_value,
                    percent_of_max: s.percent_of_max(),
                })
                .collect(),
            total_base_stats: item.total_base_stats(),
            favorite,
        }
    }

    /// Formats one item.
    pub fn format_item(&self, item: &ItemDetail, favorite: Option<bool>) -> Result<String> {
        self.format(&self.item_to_output(item, favorite))
    }

    /// Formats a browse result.
    pub fn format_browse(&self, items: &[ItemDetail], cursor: &PaginationCursor) -> Result<String> {
        let output = BrowseOutput {
            items: items.iter().map(|i| self.item_to_output(i, None)).collect(),
            loaded: items.len(),
            next_offset: cursor.offset(),
            has_more: cursor.has_more(),
        };
        self.format(&output)
    }
}
