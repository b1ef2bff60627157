//! Ordered, deduplicated collection of fetched details.

use catadex_core::ItemDetail;
use std::collections::HashMap;

/// Details fetched during one browsing session, in discovery order.
///
/// Uniqueness is by item id. Merging a known id is a no-op: the existing
/// entry keeps its value and position.
#[derive(Debug, Clone, Default)]
pub struct AccumulatedSet {
    items: Vec<ItemDetail>,
    positions: HashMap<u32, usize>,
}

impl AccumulatedSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `detail` unless its id is already present.
    ///
    /// Returns true if it was inserted.
    pub fn merge(&mut self, detail: ItemDetail) -> bool {
        if self.positions.contains_key(&detail.id) {
            return false;
        }
        self.positions.insert(detail.id, self.items.len());
        self.items.push(detail);
        true
    }

    /// Merges every detail in order and returns how many were new.
    pub fn merge_all(&mut self, details: impl IntoIterator<Item = ItemDetail>) -> usize {
        details.into_iter().filter(|d| self.merge(d.clone())).count()
    }

    /// Returns true if an item with `id` is present.
    pub fn contains(&self, id: u32) -> bool {
        self.positions.contains_key(&id)
    }

    /// Looks up an item by id.
    pub fn get(&self, id: u32) -> Option<&ItemDetail> {
        self.positions.get(&id).map(|&i| &self.items[i])
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if no items have been merged.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &ItemDetail> {
        self.items.iter()
    }

    /// Returns the items in discovery order.
    pub fn as_slice(&self) -> &[ItemDetail] {
        &self.items
    }

    /// Drops every item.
    pub fn clear(&mut self) {
        self.items.clear();
        self.positions.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catadex_core::ItemImages;

    fn item(id: u32, name: &str) -> ItemDetail {
        ItemDetail {
            id,
            name: name.to_string(),
            height: 1,
            weight: 1,
            types: vec![],
            stats: vec![],
            images: ItemImages::default(),
            abilities: vec![],
        }
    }

    #[test]
    fn test_preserves_discovery_order() {
        let mut set = AccumulatedSet::new();
        set.merge_all([item(4, "charmander"), item(1, "bulbasaur"), item(7, "squirtle")]);

        let ids: Vec<u32> = set.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![4, 1, 7]);
    }

    #[test]
    fn test_duplicate_merge_is_noop() {
        let mut set = AccumulatedSet::new();
        set.merge_all([item(1, "bulbasaur"), item(2, "ivysaur")]);
        let before: Vec<ItemDetail> = set.as_slice().to_vec();

        assert!(!set.merge(item(1, "renamed")));
        assert_eq!(set.len(), 2);
        assert_eq!(set.as_slice(), before.as_slice());
        assert_eq!(set.get(1).unwrap().name, "bulbasaur");
    }

    #[test]
    fn test_merge_all_counts_new_only() {
        let mut set = AccumulatedSet::new();
        set.merge(item(1, "bulbasaur"));
        let added = set.merge_all([item(1, "bulbasaur"), item(2, "ivysaur"), item(2, "ivysaur")]);
        assert_eq!(added, 1);
        assert!(set.contains(2));
    }

    #[test]
    fn test_clear() {
        let mut set = AccumulatedSet::new();
        set.merge(item(1, "bulbasaur"));
        set.clear();
        assert!(set.is_empty());
        assert!(!set.contains(1));
    }
}
