use serde::{Deserialize, Serialize};

use crate::models::SupplierId;

pub type ItemId = u32;

/// Category whose items carry a meaningful expiry date
pub const FOOD_CATEGORY: &str = "Food";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub category: String,
    pub quantity: i32,
    pub price: f64,
    pub image: String,
    // Only meaningful while the category is Food; read through expiry()
    expiry: Option<String>,
    pub supplier_id: Option<SupplierId>,
}

/// Fields supplied by the caller when creating an item. The catalog assigns
/// the id and fills in the image when none is given.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemDraft {
    pub name: String,
    pub category: String,
    pub quantity: i32,
    pub price: f64,
    pub image: Option<String>,
    pub expiry: Option<String>,
    pub supplier_id: Option<SupplierId>,
}

/// Partial update payload; omitted fields keep their current values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub quantity: Option<i32>,
    pub price: Option<f64>,
    pub image: Option<String>,
    pub expiry: Option<String>,
    pub supplier_id: Option<SupplierId>,
}

impl Item {
    pub(crate) fn from_draft(id: ItemId, draft: ItemDraft) -> Self {
        let image = draft
            .image
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| placeholder_image(id));
        let expiry = if draft.category == FOOD_CATEGORY {
            draft.expiry.filter(|s| !s.is_empty())
        } else {
            None
        };
        Item {
            id,
            name: draft.name,
            category: draft.category,
            quantity: draft.quantity,
            price: draft.price,
            image,
            expiry,
            supplier_id: draft.supplier_id,
        }
    }

    /// Merges the patch onto the item. A category change away from Food
    /// drops the stored expiry date.
    pub(crate) fn apply(&mut self, patch: ItemPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(quantity) = patch.quantity {
            self.quantity = quantity;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(image) = patch.image {
            self.image = image;
        }
        if let Some(expiry) = patch.expiry {
            self.expiry = Some(expiry);
        }
        if let Some(supplier_id) = patch.supplier_id {
            self.supplier_id = Some(supplier_id);
        }
        if !self.is_perishable() {
            self.expiry = None;
        }
    }

    pub fn is_perishable(&self) -> bool {
        self.category == FOOD_CATEGORY
    }

    /// Expiry date, reported only for Food items
    pub fn expiry(&self) -> Option<&str> {
        if self.is_perishable() {
            self.expiry.as_deref()
        } else {
            None
        }
    }
}

fn placeholder_image(id: ItemId) -> String {
    format!("http://static.photos/minimal/200x200/{}", id % 100)
}
