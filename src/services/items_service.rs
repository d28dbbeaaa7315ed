use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::RwLock;
use tonic::{Request, Response, Status};

use crate::catalog::{ItemCatalog, SupplierDirectory};
use crate::error::{AppError, AppResult};
use crate::models::{Item, ItemDraft, ItemPatch, FOOD_CATEGORY};
use crate::proto::common::Empty;
use crate::proto::items::items_service_server::ItemsService;
use crate::proto::items::{
    CreateItemReq, CreateItemRes, DeleteItemReq, GetItemReq, GetItemRes, ListItemsReq,
    ListItemsRes, UpdateItemReq, UpdateItemRes,
};

pub struct ItemsServiceImpl {
    catalog: Arc<RwLock<ItemCatalog>>,
    suppliers: Arc<RwLock<SupplierDirectory>>,
}

impl ItemsServiceImpl {
    pub fn new(
        catalog: Arc<RwLock<ItemCatalog>>,
        suppliers: Arc<RwLock<SupplierDirectory>>,
    ) -> Self {
        Self { catalog, suppliers }
    }

    fn to_proto(item: &Item, suppliers: &SupplierDirectory) -> crate::proto::items::Item {
        crate::proto::items::Item {
            id: item.id,
            name: item.name.clone(),
            category: item.category.clone(),
            quantity: item.quantity,
            price: item.price,
            image: item.image.clone(),
            expiry: item.expiry().unwrap_or_default().to_string(),
            supplier_id: item.supplier_id.unwrap_or_default(),
            supplier_name: item
                .supplier_id
                .map(|id| suppliers.name_of(id).to_string())
                .unwrap_or_default(),
        }
    }

    fn check_price(price: f64) -> AppResult<()> {
        if !price.is_finite() || price < 0.0 {
            return Err(AppError::InvalidInput(
                "price must be a non-negative number".to_string(),
            ));
        }
        Ok(())
    }

    fn check_quantity(quantity: i32) -> AppResult<()> {
        if quantity < 0 {
            return Err(AppError::InvalidInput(
                "quantity must not be negative".to_string(),
            ));
        }
        Ok(())
    }

    fn check_expiry(expiry: &str) -> AppResult<()> {
        NaiveDate::parse_from_str(expiry, "%Y-%m-%d")
            .map(|_| ())
            .map_err(|_| AppError::InvalidInput("expiry must be a YYYY-MM-DD date".to_string()))
    }
}

#[tonic::async_trait]
impl ItemsService for ItemsServiceImpl {
    async fn list_items(
        &self,
        request: Request<ListItemsReq>,
    ) -> Result<Response<ListItemsRes>, Status> {
        let req = request.into_inner();

        let catalog = self.catalog.read().await;
        let suppliers = self.suppliers.read().await;

        let matches = match (req.name_query.is_empty(), req.category.is_empty()) {
            (true, true) => catalog.list(),
            (false, true) => catalog.filter_by_name(&req.name_query),
            (true, false) => catalog.filter_by_category(&req.category),
            (false, false) => catalog
                .filter_by_name(&req.name_query)
                .into_iter()
                .filter(|item| item.category == req.category)
                .collect(),
        };

        let items = matches
            .into_iter()
            .map(|item| Self::to_proto(item, &suppliers))
            .collect();
        Ok(Response::new(ListItemsRes { items }))
    }

    async fn get_item(
        &self,
        request: Request<GetItemReq>,
    ) -> Result<Response<GetItemRes>, Status> {
        let req = request.into_inner();

        if req.id == 0 {
            return Err(Status::invalid_argument("id is required"));
        }

        let catalog = self.catalog.read().await;
        let suppliers = self.suppliers.read().await;

        match catalog.get(req.id) {
            Some(item) => Ok(Response::new(GetItemRes {
                item: Some(Self::to_proto(item, &suppliers)),
            })),
            None => Err(Status::not_found("Item not found")),
        }
    }

    async fn create_item(
        &self,
        request: Request<CreateItemReq>,
    ) -> Result<Response<CreateItemRes>, Status> {
        let req = request.into_inner();

        if req.name.is_empty() {
            return Err(Status::invalid_argument("name is required"));
        }
        Self::check_price(req.price)?;
        Self::check_quantity(req.quantity)?;
        if req.category == FOOD_CATEGORY && !req.expiry.is_empty() {
            Self::check_expiry(&req.expiry)?;
        }

        let image = if req.image.is_empty() {
            None
        } else {
            Some(req.image.clone())
        };
        let expiry = if req.expiry.is_empty() {
            None
        } else {
            Some(req.expiry.clone())
        };
        let supplier_id = if req.supplier_id == 0 {
            None
        } else {
            Some(req.supplier_id)
        };

        let draft = ItemDraft {
            name: req.name,
            category: req.category,
            quantity: req.quantity,
            price: req.price,
            image,
            expiry,
            supplier_id,
        };

        let mut catalog = self.catalog.write().await;
        let suppliers = self.suppliers.read().await;
        let item = catalog.create(draft);

        tracing::info!("Created item: id={}, name={}", item.id, item.name);

        Ok(Response::new(CreateItemRes {
            item: Some(Self::to_proto(item, &suppliers)),
        }))
    }

    async fn update_item(
        &self,
        request: Request<UpdateItemReq>,
    ) -> Result<Response<UpdateItemRes>, Status> {
        let req = request.into_inner();

        if req.id == 0 {
            return Err(Status::invalid_argument("id is required"));
        }
        if let Some(ref name) = req.name {
            if name.is_empty() {
                return Err(Status::invalid_argument("name must not be empty"));
            }
        }
        if let Some(price) = req.price {
            Self::check_price(price)?;
        }
        if let Some(quantity) = req.quantity {
            Self::check_quantity(quantity)?;
        }

        let mut catalog = self.catalog.write().await;
        let suppliers = self.suppliers.read().await;

        if let Some(ref expiry) = req.expiry {
            if !expiry.is_empty() {
                // Only dates that will actually be stored need to parse
                let perishable = match req.category.as_deref() {
                    Some(category) => category == FOOD_CATEGORY,
                    None => catalog.get(req.id).is_some_and(Item::is_perishable),
                };
                if perishable {
                    Self::check_expiry(expiry)?;
                }
            }
        }

        let patch = ItemPatch {
            name: req.name,
            category: req.category,
            quantity: req.quantity,
            price: req.price,
            image: req.image.filter(|i| !i.is_empty()),
            expiry: req.expiry.filter(|e| !e.is_empty()),
            supplier_id: req.supplier_id.filter(|&id| id != 0),
        };

        let item = catalog.update(req.id, patch)?;

        tracing::info!("Updated item: id={}", item.id);

        Ok(Response::new(UpdateItemRes {
            item: Some(Self::to_proto(item, &suppliers)),
        }))
    }

    async fn delete_item(
        &self,
        request: Request<DeleteItemReq>,
    ) -> Result<Response<Empty>, Status> {
        let req = request.into_inner();

        if req.id == 0 {
            return Err(Status::invalid_argument("id is required"));
        }

        let mut catalog = self.catalog.write().await;
        catalog.delete(req.id)?;

        tracing::info!("Deleted item: id={}", req.id);

        Ok(Response::new(Empty {}))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tonic::Code;

    fn service_with(catalog: ItemCatalog, suppliers: SupplierDirectory) -> ItemsServiceImpl {
        ItemsServiceImpl::new(
            Arc::new(RwLock::new(catalog)),
            Arc::new(RwLock::new(suppliers)),
        )
    }

    fn empty_service() -> ItemsServiceImpl {
        service_with(ItemCatalog::new(), SupplierDirectory::new())
    }

    fn apples_req() -> CreateItemReq {
        CreateItemReq {
            name: "Apples".to_string(),
            category: "Food".to_string(),
            quantity: 50,
            price: 2.99,
            image: String::new(),
            expiry: "2024-12-31".to_string(),
            supplier_id: 0,
        }
    }

    #[tokio::test]
    async fn test_create_item_fills_defaults() {
        let service = empty_service();
        let res = service
            .create_item(Request::new(apples_req()))
            .await
            .unwrap();
        let item = res.into_inner().item.unwrap();
        assert_eq!(item.id, 1);
        assert_eq!(item.expiry, "2024-12-31");
        assert!(item.image.starts_with("http://static.photos/"));
        assert_eq!(item.supplier_name, "");
    }

    #[tokio::test]
    async fn test_create_item_requires_name() {
        let service = empty_service();
        let status = service
            .create_item(Request::new(CreateItemReq {
                name: String::new(),
                ..apples_req()
            }))
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::InvalidArgument);
    }

    #[tokio::test]
    async fn test_create_item_rejects_nan_price() {
        let service = empty_service();
        let status = service
            .create_item(Request::new(CreateItemReq {
                price: f64::NAN,
                ..apples_req()
            }))
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::InvalidArgument);
    }

    #[tokio::test]
    async fn test_create_item_rejects_malformed_expiry() {
        let service = empty_service();
        let status = service
            .create_item(Request::new(CreateItemReq {
                expiry: "soon".to_string(),
                ..apples_req()
            }))
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::InvalidArgument);
    }

    #[tokio::test]
    async fn test_create_item_ignores_expiry_for_non_food() {
        let service = empty_service();
        let res = service
            .create_item(Request::new(CreateItemReq {
                category: "Electronics".to_string(),
                expiry: "whenever".to_string(),
                ..apples_req()
            }))
            .await
            .unwrap();
        assert_eq!(res.into_inner().item.unwrap().expiry, "");
    }

    #[tokio::test]
    async fn test_create_item_expands_supplier_name() {
        let mut suppliers = SupplierDirectory::new();
        suppliers.create("Fresh Farms Co.".to_string(), "orders@freshfarms.example".to_string());
        let service = service_with(ItemCatalog::new(), suppliers);

        let res = service
            .create_item(Request::new(CreateItemReq {
                supplier_id: 1,
                ..apples_req()
            }))
            .await
            .unwrap();
        let item = res.into_inner().item.unwrap();
        assert_eq!(item.supplier_id, 1);
        assert_eq!(item.supplier_name, "Fresh Farms Co.");
    }

    #[tokio::test]
    async fn test_list_items_applies_filters() {
        let service = service_with(ItemCatalog::with_sample_data(), SupplierDirectory::new());

        let all = service
            .list_items(Request::new(ListItemsReq::default()))
            .await
            .unwrap()
            .into_inner()
            .items;
        assert_eq!(all.len(), 4);

        let organic = service
            .list_items(Request::new(ListItemsReq {
                name_query: "organic".to_string(),
                category: String::new(),
            }))
            .await
            .unwrap()
            .into_inner()
            .items;
        assert_eq!(organic.len(), 2);

        let organic_food = service
            .list_items(Request::new(ListItemsReq {
                name_query: "organic".to_string(),
                category: "Food".to_string(),
            }))
            .await
            .unwrap()
            .into_inner()
            .items;
        assert_eq!(organic_food.len(), 1);
        assert_eq!(organic_food[0].name, "Organic Apples");
    }

    #[tokio::test]
    async fn test_update_item_partial_merge_and_expiry_gate() {
        let service = service_with(ItemCatalog::with_sample_data(), SupplierDirectory::new());

        // Item 4 is the Food item with an expiry date
        let res = service
            .update_item(Request::new(UpdateItemReq {
                id: 4,
                category: Some("Electronics".to_string()),
                ..Default::default()
            }))
            .await
            .unwrap();
        let item = res.into_inner().item.unwrap();
        assert_eq!(item.category, "Electronics");
        assert_eq!(item.expiry, "");
        assert_eq!(item.name, "Organic Apples");
        assert_eq!(item.quantity, 50);
    }

    #[tokio::test]
    async fn test_update_unknown_item_is_not_found() {
        let service = empty_service();
        let status = service
            .update_item(Request::new(UpdateItemReq {
                id: 99,
                quantity: Some(1),
                ..Default::default()
            }))
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::NotFound);
    }

    #[tokio::test]
    async fn test_delete_item_then_reads_fail() {
        let service = service_with(ItemCatalog::with_sample_data(), SupplierDirectory::new());

        service
            .delete_item(Request::new(DeleteItemReq { id: 2 }))
            .await
            .unwrap();

        let status = service
            .get_item(Request::new(GetItemReq { id: 2 }))
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::NotFound);

        let status = service
            .delete_item(Request::new(DeleteItemReq { id: 2 }))
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::NotFound);
    }
}
