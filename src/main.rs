use std::net::SocketAddr;
use std::sync::Arc;

use grocery_api::catalog::{ItemCatalog, SupplierDirectory};
use grocery_api::config::Config;
use grocery_api::proto::health::health_server::HealthServer;
use grocery_api::proto::items::items_service_server::ItemsServiceServer;
use grocery_api::proto::suppliers::suppliers_service_server::SuppliersServiceServer;
use grocery_api::services::{HealthServiceImpl, ItemsServiceImpl, SuppliersServiceImpl};

use tokio::sync::RwLock;
use tonic::transport::Server;
use tonic_reflection::server::Builder as ReflectionBuilder;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Include file descriptor for gRPC reflection
pub const FILE_DESCRIPTOR_SET: &[u8] = tonic::include_file_descriptor_set!("grocery_descriptor");

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "grocery_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env();

    tracing::info!("Starting grocery-api gRPC server...");

    // Build the in-memory stores
    let (catalog, suppliers) = if config.seed_sample_data {
        tracing::info!("Seeding catalog with sample inventory");
        (
            ItemCatalog::with_sample_data(),
            SupplierDirectory::with_sample_data(),
        )
    } else {
        (ItemCatalog::new(), SupplierDirectory::new())
    };
    let catalog = Arc::new(RwLock::new(catalog));
    let suppliers = Arc::new(RwLock::new(suppliers));

    // Create services
    let items_service = ItemsServiceImpl::new(catalog.clone(), suppliers.clone());
    let suppliers_service = SuppliersServiceImpl::new(suppliers.clone());
    let health_service = HealthServiceImpl::new();

    // CORS layer for gRPC-Web
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers(Any)
        .allow_methods(Any)
        .expose_headers(Any);

    // Build reflection service
    let reflection_service = ReflectionBuilder::configure()
        .register_encoded_file_descriptor_set(FILE_DESCRIPTOR_SET)
        .build_v1()?;

    // Parse server address
    let addr: SocketAddr = config.server_addr().parse()?;
    tracing::info!("Listening on {}", addr);

    // Build and run server with gRPC-Web support
    Server::builder()
        .accept_http1(true) // Required for gRPC-Web
        .layer(cors)
        .layer(tonic_web::GrpcWebLayer::new()) // Enable gRPC-Web
        .add_service(reflection_service)
        .add_service(ItemsServiceServer::new(items_service))
        .add_service(SuppliersServiceServer::new(suppliers_service))
        .add_service(HealthServer::new(health_service))
        .serve(addr)
        .await?;

    Ok(())
}
