pub mod suppliers;

pub use suppliers::SupplierDirectory;

use std::collections::BTreeMap;

use crate::error::{AppError, AppResult};
use crate::models::{Item, ItemDraft, ItemId, ItemPatch};

/// In-memory store of item records. Ids are assigned as max + 1, so the
/// ascending id order of the backing map is also insertion order.
#[derive(Debug, Default)]
pub struct ItemCatalog {
    items: BTreeMap<ItemId, Item>,
}

impl ItemCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog pre-populated with the demo inventory.
    pub fn with_sample_data() -> Self {
        let mut catalog = Self::new();
        let samples = [
            ItemDraft {
                name: "Wireless Headphones".to_string(),
                category: "Electronics".to_string(),
                quantity: 15,
                price: 99.99,
                image: Some("http://static.photos/technology/200x200/1".to_string()),
                ..Default::default()
            },
            ItemDraft {
                name: "Organic Cotton T-Shirt".to_string(),
                category: "Clothing".to_string(),
                quantity: 42,
                price: 24.95,
                image: Some("http://static.photos/black/200x200/2".to_string()),
                ..Default::default()
            },
            ItemDraft {
                name: "Ergonomic Office Chair".to_string(),
                category: "Furniture".to_string(),
                quantity: 8,
                price: 249.99,
                image: Some("http://static.photos/office/200x200/3".to_string()),
                ..Default::default()
            },
            ItemDraft {
                name: "Organic Apples".to_string(),
                category: "Food".to_string(),
                quantity: 50,
                price: 2.99,
                image: Some("http://static.photos/food/200x200/4".to_string()),
                expiry: Some("2024-12-31".to_string()),
                ..Default::default()
            },
        ];
        for draft in samples {
            catalog.create(draft);
        }
        catalog
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All items in insertion order.
    pub fn list(&self) -> Vec<&Item> {
        self.items.values().collect()
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.get(&id)
    }

    /// Case-insensitive substring match against item names. An empty query
    /// matches everything.
    pub fn filter_by_name(&self, query: &str) -> Vec<&Item> {
        let query = query.to_lowercase();
        self.items
            .values()
            .filter(|item| item.name.to_lowercase().contains(&query))
            .collect()
    }

    /// Exact category match. An empty selector matches everything.
    pub fn filter_by_category(&self, category: &str) -> Vec<&Item> {
        if category.is_empty() {
            return self.list();
        }
        self.items
            .values()
            .filter(|item| item.category == category)
            .collect()
    }

    /// Stores the draft under a freshly assigned id and returns the record.
    pub fn create(&mut self, draft: ItemDraft) -> &Item {
        let id = self.next_id();
        self.items
            .entry(id)
            .or_insert_with(|| Item::from_draft(id, draft))
    }

    /// Merges the patch onto the existing record.
    pub fn update(&mut self, id: ItemId, patch: ItemPatch) -> AppResult<&Item> {
        let item = self
            .items
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Item not found: {}", id)))?;
        item.apply(patch);
        Ok(item)
    }

    pub fn delete(&mut self, id: ItemId) -> AppResult<()> {
        self.items
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("Item not found: {}", id)))
    }

    fn next_id(&self) -> ItemId {
        self.items.keys().next_back().map_or(1, |max| max + 1)
    }
}
