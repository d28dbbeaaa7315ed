pub mod health_service;
pub mod items_service;
pub mod suppliers_service;

pub use health_service::HealthServiceImpl;
pub use items_service::ItemsServiceImpl;
pub use suppliers_service::SuppliersServiceImpl;
