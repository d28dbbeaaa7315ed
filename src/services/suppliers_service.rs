use std::sync::Arc;

use tokio::sync::RwLock;
use tonic::{Request, Response, Status};

use crate::catalog::SupplierDirectory;
use crate::models::Supplier;
use crate::proto::common::Empty;
use crate::proto::suppliers::suppliers_service_server::SuppliersService;
use crate::proto::suppliers::{CreateSupplierReq, CreateSupplierRes, ListSuppliersRes};

pub struct SuppliersServiceImpl {
    suppliers: Arc<RwLock<SupplierDirectory>>,
}

impl SuppliersServiceImpl {
    pub fn new(suppliers: Arc<RwLock<SupplierDirectory>>) -> Self {
        Self { suppliers }
    }

    fn to_proto(supplier: &Supplier) -> crate::proto::suppliers::Supplier {
        crate::proto::suppliers::Supplier {
            id: supplier.id,
            name: supplier.name.clone(),
            contact: supplier.contact.clone(),
        }
    }
}

#[tonic::async_trait]
impl SuppliersService for SuppliersServiceImpl {
    async fn list_suppliers(
        &self,
        _request: Request<Empty>,
    ) -> Result<Response<ListSuppliersRes>, Status> {
        let suppliers = self.suppliers.read().await;
        let suppliers = suppliers.list().into_iter().map(Self::to_proto).collect();
        Ok(Response::new(ListSuppliersRes { suppliers }))
    }

    async fn create_supplier(
        &self,
        request: Request<CreateSupplierReq>,
    ) -> Result<Response<CreateSupplierRes>, Status> {
        let req = request.into_inner();

        if req.name.is_empty() {
            return Err(Status::invalid_argument("name is required"));
        }

        let mut suppliers = self.suppliers.write().await;
        let supplier = suppliers.create(req.name, req.contact);

        tracing::info!("Created supplier: id={}, name={}", supplier.id, supplier.name);

        Ok(Response::new(CreateSupplierRes {
            supplier: Some(Self::to_proto(supplier)),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_and_list_suppliers() {
        let service = SuppliersServiceImpl::new(Arc::new(RwLock::new(SupplierDirectory::new())));

        let res = service
            .create_supplier(Request::new(CreateSupplierReq {
                name: "Fresh Farms Co.".to_string(),
                contact: "orders@freshfarms.example".to_string(),
            }))
            .await
            .unwrap();
        assert_eq!(res.into_inner().supplier.unwrap().id, 1);

        let listed = service
            .list_suppliers(Request::new(Empty {}))
            .await
            .unwrap()
            .into_inner()
            .suppliers;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Fresh Farms Co.");
    }

    #[tokio::test]
    async fn test_create_supplier_requires_name() {
        let service = SuppliersServiceImpl::new(Arc::new(RwLock::new(SupplierDirectory::new())));
        let status = service
            .create_supplier(Request::new(CreateSupplierReq::default()))
            .await
            .unwrap_err();
        assert_eq!(status.code(), tonic::Code::InvalidArgument);
    }
}
