//! Domain models for Catadex.
//!
//! ## Submodules
//!
//! - [`item`] - Catalog records (ItemSummary, PageResponse, ItemDetail)
//! - [`favorite`] - Favorite projection (FavoriteEntry)
//! - [`user`] - Accounts (UserProfile, UserRecord, Session)

mod favorite;
mod item;
mod user;

pub use favorite::FavoriteEntry;
pub use item::{
    capitalize, AbilityEntry, ItemDetail, ItemImages, ItemSummary, PageResponse, StatEntry,
    TypeSlot,
};
pub use user::{Session, UserProfile, UserRecord};
