//! gRPC service implementation

use std::sync::Arc;
use std::time::Instant;

use tonic::{Request, Response, Status};

use crate::application::ProductHandler;
use crate::domain::ProductId;
use crate::proto::product_service_server::ProductService;
use crate::proto::*;

use super::error_messages::ErrorMessages;
use super::proto_converters::{output_to_proto, request_to_input};

const SERVICE_NAME: &str = "catalog.product.v1.ProductService";

pub struct ProductServiceImpl {
    handler: Arc<ProductHandler>,
    messages: ErrorMessages,
}

impl ProductServiceImpl {
    pub fn new(handler: Arc<ProductHandler>, messages: ErrorMessages) -> Self {
        Self { handler, messages }
    }

    async fn handle_create(&self, req: ProductRequest) -> Result<ProductResponse, Status> {
        let input = request_to_input(req)?;

        let output = self
            .handler
            .create(input)
            .await
            .map_err(|e| self.messages.to_status(e))?;

        Ok(output_to_proto(&output))
    }

    async fn handle_find_all(&self) -> Result<ProductResponseList, Status> {
        let outputs = self
            .handler
            .find_all()
            .await
            .map_err(|e| self.messages.to_status(e))?;

        Ok(ProductResponseList {
            products: outputs.iter().map(output_to_proto).collect(),
        })
    }

    async fn handle_find_by_id(&self, req: RequestById) -> Result<ProductResponse, Status> {
        let output = self
            .handler
            .find_by_id(ProductId(req.id))
            .await
            .map_err(|e| self.messages.to_status(e))?;

        Ok(output_to_proto(&output))
    }

    async fn handle_delete(&self, req: RequestById) -> Result<EmptyResponse, Status> {
        self.handler
            .delete(ProductId(req.id))
            .await
            .map_err(|e| self.messages.to_status(e))?;

        Ok(EmptyResponse {})
    }
}

/// 记录请求指标并包装响应
fn observe<T>(
    method: &str,
    started: Instant,
    result: Result<T, Status>,
) -> Result<Response<T>, Status> {
    let code = match &result {
        Ok(_) => tonic::Code::Ok,
        Err(status) => status.code(),
    };
    telemetry::record_grpc_request(SERVICE_NAME, method, &format!("{:?}", code), started.elapsed());
    result.map(Response::new)
}

#[tonic::async_trait]
impl ProductService for ProductServiceImpl {
    async fn create(
        &self,
        request: Request<ProductRequest>,
    ) -> Result<Response<ProductResponse>, Status> {
        let started = Instant::now();
        let result = self.handle_create(request.into_inner()).await;
        observe("Create", started, result)
    }

    async fn find_all(
        &self,
        _request: Request<EmptyRequest>,
    ) -> Result<Response<ProductResponseList>, Status> {
        let started = Instant::now();
        let result = self.handle_find_all().await;
        observe("FindAll", started, result)
    }

    async fn find_by_id(
        &self,
        request: Request<RequestById>,
    ) -> Result<Response<ProductResponse>, Status> {
        let started = Instant::now();
        let result = self.handle_find_by_id(request.into_inner()).await;
        observe("FindById", started, result)
    }

    async fn delete(
        &self,
        request: Request<RequestById>,
    ) -> Result<Response<EmptyResponse>, Status> {
        let started = Instant::now();
        let result = self.handle_delete(request.into_inner()).await;
        observe("Delete", started, result)
    }
}
