//! Service error types

use errors::AppError;
use thiserror::Error;

use crate::domain::ProductId;

/// 商品领域错误
///
/// 携带出错的标识，由 API 层映射为 gRPC 状态码。
#[derive(Debug, Error)]
pub enum ProductError {
    #[error("product {0} already exists")]
    AlreadyExists(String),

    #[error("product {0} not found")]
    NotFound(ProductId),

    #[error(transparent)]
    Repository(#[from] AppError),
}

pub type ProductResult<T> = Result<T, ProductError>;
