use serde::{Deserialize, Serialize};

pub type SupplierId = u32;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Supplier {
    pub id: SupplierId,
    pub name: String,
    pub contact: String,
}
