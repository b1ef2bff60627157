//! Favorite projection of a catalog item.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::item::{capitalize, ItemDetail};

/// Lightweight projection of an [`ItemDetail`] kept in the favorites list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteEntry {
    /// Item identifier.
    pub id: u32,
    /// Item name.
    pub name: String,
    /// Image to show for the item.
    pub image_url: Option<String>,
    /// Type names in slot order.
    pub types: Vec<String>,
    /// When the item was favorited.
    #[serde(default = "Utc::now")]
    pub added_at: DateTime<Utc>,
}

impl FavoriteEntry {
    /// Returns the name with its first letter capitalized.
    pub fn display_name(&self) -> String {
        capitalize(&self.name)
    }
}

impl From<&ItemDetail> for FavoriteEntry {
    fn from(detail: &ItemDetail) -> Self {
        Self {
            id: detail.id,
            name: detail.name.clone(),
            image_url: detail.image_url().map(str::to_string),
            types: detail.type_names(),
            added_at: Utc::now(),
        }
    }
}
