//! Catalog response parsers.
//!
//! The upstream detail payload nests most fields one level deeper than the
//! domain model (`types[].type.name`, `stats[].stat.name`, ...). The wire
//! structs here mirror that shape and are flattened into
//! [`catadex_core::ItemDetail`].

use catadex_core::{AbilityEntry, ItemDetail, ItemImages, PageResponse, StatEntry, TypeSlot};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::FetchError;

// ============================================================================
// API Response Structures
// ============================================================================

/// Detail payload as served by the catalog.
#[derive(Debug, Deserialize)]
pub struct WireDetail {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub weight: u32,
    #[serde(default)]
    pub types: Vec<WireTypeSlot>,
    #[serde(default)]
    pub stats: Vec<WireStat>,
    #[serde(default)]
    pub sprites: WireSprites,
    #[serde(default)]
    pub abilities: Vec<WireAbility>,
}

/// Named reference (`{"name": ..., "url": ...}`).
#[derive(Debug, Deserialize)]
pub struct WireNamed {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct WireTypeSlot {
    pub slot: u8,
    #[serde(rename = "type")]
    pub kind: WireNamed,
}

#[derive(Debug, Deserialize)]
pub struct WireStat {
    pub base_stat: u32,
    #[serde(default)]
    pub effort: u32,
    pub stat: WireNamed,
}

#[derive(Debug, Default, Deserialize)]
pub struct WireSprites {
    #[serde(default)]
    pub front_default: Option<String>,
    #[serde(default)]
    pub back_default: Option<String>,
    #[serde(default)]
    pub other: Option<WireOtherSprites>,
}

#[derive(Debug, Deserialize)]
pub struct WireOtherSprites {
    #[serde(rename = "official-artwork", default)]
    pub official_artwork: Option<WireArtwork>,
}

#[derive(Debug, Deserialize)]
pub struct WireArtwork {
    #[serde(default)]
    pub front_default: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WireAbility {
    pub ability: WireNamed,
    #[serde(default)]
    pub is_hidden: bool,
    #[serde(default)]
    pub slot: u8,
}

impl From<WireDetail> for ItemDetail {
    fn from(wire: WireDetail) -> Self {
        let artwork = wire
            .sprites
            .other
            .and_then(|o| o.official_artwork)
            .and_then(|a| a.front_default);

        ItemDetail {
            id: wire.id,
            name: wire.name,
            height: wire.height,
            weight: wire.weight,
            types: wire
                .types
                .into_iter()
                .map(|t| TypeSlot {
                    slot: t.slot,
                    type_name: t.kind.name,
                })
                .collect(),
            stats: wire
                .stats
                .into_iter()
                .map(|s| StatEntry {
                    base_value: s.base_stat,
                    effort: s.effort,
                    stat_name: s.stat.name,
                })
                .collect(),
            images: ItemImages {
                primary: wire.sprites.front_default,
                secondary: wire.sprites.back_default,
                artwork,
            },
            abilities: wire
                .abilities
                .into_iter()
                .map(|a| AbilityEntry {
                    name: a.ability.name,
                    is_hidden: a.is_hidden,
                    slot: a.slot,
                })
                .collect(),
        }
    }
}

// ============================================================================
// Parsers
// ============================================================================

/// Parses a list-endpoint response.
pub fn parse_page(value: Value) -> Result<PageResponse, FetchError> {
    let page: PageResponse = serde_json::from_value(value).map_err(|e| {
        warn!(error = %e, "Failed to parse page response");
        FetchError::InvalidResponse(format!("Invalid page: {e}"))
    })?;
    debug!(
        count = page.count,
        results = page.results.len(),
        has_next = page.has_next(),
        "Parsed page"
    );
    Ok(page)
}

/// Parses a detail-endpoint response and validates it.
pub fn parse_detail(value: Value) -> Result<ItemDetail, FetchError> {
    let wire: WireDetail = serde_json::from_value(value).map_err(|e| {
        warn!(error = %e, "Failed to parse detail response");
        FetchError::InvalidResponse(format!("Invalid detail: {e}"))
    })?;
    let detail = ItemDetail::from(wire);
    detail.validate()?;
    Ok(detail)
}
