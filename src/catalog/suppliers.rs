use std::collections::BTreeMap;

use crate::models::{Supplier, SupplierId};

/// In-memory registry of suppliers, keyed the same way as the item catalog.
#[derive(Debug, Default)]
pub struct SupplierDirectory {
    suppliers: BTreeMap<SupplierId, Supplier>,
}

impl SupplierDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sample_data() -> Self {
        let mut directory = Self::new();
        directory.create("Fresh Farms Co.".to_string(), "orders@freshfarms.example".to_string());
        directory
    }

    pub fn list(&self) -> Vec<&Supplier> {
        self.suppliers.values().collect()
    }

    pub fn get(&self, id: SupplierId) -> Option<&Supplier> {
        self.suppliers.get(&id)
    }

    /// Name of the supplier, or an empty string for a dangling reference.
    pub fn name_of(&self, id: SupplierId) -> &str {
        self.get(id).map(|s| s.name.as_str()).unwrap_or_default()
    }

    pub fn create(&mut self, name: String, contact: String) -> &Supplier {
        let id = self.suppliers.keys().next_back().map_or(1, |max| max + 1);
        self.suppliers
            .entry(id)
            .or_insert(Supplier { id, name, contact })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_assigns_sequential_ids() {
        let mut directory = SupplierDirectory::new();
        let first = directory.create("Fresh Farms Co.".to_string(), "a@example.com".to_string()).id;
        let second = directory.create("Metro Wholesale".to_string(), "b@example.com".to_string()).id;
        assert_eq!((first, second), (1, 2));
        assert_eq!(directory.list().len(), 2);
    }

    #[test]
    fn test_name_of_dangling_reference_is_empty() {
        let directory = SupplierDirectory::new();
        assert_eq!(directory.name_of(42), "");
    }
}
