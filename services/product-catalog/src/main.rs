use std::sync::Arc;

use bootstrap::{Infrastructure, run_server};
use errors::AppError;
use tonic_reflection::server::Builder as ReflectionBuilder;
use tracing::info;

use product_catalog::api::{ErrorMessages, ProductServiceImpl};
use product_catalog::application::ProductHandler;
use product_catalog::infrastructure::persistence::PostgresProductRepository;
use product_catalog::proto::product_service_server::ProductServiceServer;
use product_catalog::{FILE_DESCRIPTOR_SET, MIGRATOR};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    run_server("config", |infra: Infrastructure, mut server| async move {
        info!("Initializing product-catalog service...");

        infra.migrate(&MIGRATOR).await?;

        let repository = Arc::new(PostgresProductRepository::new(infra.postgres_pool()));
        let handler = Arc::new(ProductHandler::new(repository));
        let messages = ErrorMessages::from(&infra.config().messages);
        let service = ProductServiceImpl::new(handler, messages);

        let reflection_service = ReflectionBuilder::configure()
            .register_encoded_file_descriptor_set(FILE_DESCRIPTOR_SET)
            .build_v1()
            .map_err(|e| AppError::internal(format!("Failed to build reflection service: {}", e)))?;

        Ok(server
            .add_service(ProductServiceServer::new(service))
            .add_service(reflection_service))
    })
    .await
}
