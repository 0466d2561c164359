//! errors - 统一错误处理
//!
//! 基础设施层共享的错误类型及其到 gRPC 状态码的映射

use thiserror::Error;

/// 应用错误类型
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    /// 转换为 gRPC 状态码
    pub fn grpc_code(&self) -> tonic::Code {
        match self {
            Self::NotFound(_) => tonic::Code::NotFound,
            Self::Validation(_) => tonic::Code::InvalidArgument,
            Self::Conflict(_) => tonic::Code::AlreadyExists,
            Self::Internal(_) => tonic::Code::Internal,
            Self::Database(_) => tonic::Code::Internal,
        }
    }

    /// 是否为唯一性冲突
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }
}

impl From<AppError> for tonic::Status {
    fn from(err: AppError) -> Self {
        tonic::Status::new(err.grpc_code(), err.to_string())
    }
}

/// Result 类型别名
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grpc_code_mapping() {
        assert_eq!(AppError::not_found("x").grpc_code(), tonic::Code::NotFound);
        assert_eq!(AppError::validation("x").grpc_code(), tonic::Code::InvalidArgument);
        assert_eq!(AppError::conflict("x").grpc_code(), tonic::Code::AlreadyExists);
        assert_eq!(AppError::database("x").grpc_code(), tonic::Code::Internal);
        assert_eq!(AppError::internal("x").grpc_code(), tonic::Code::Internal);
    }

    #[test]
    fn test_into_status_keeps_message() {
        let status: tonic::Status = AppError::database("connection reset").into();
        assert_eq!(status.code(), tonic::Code::Internal);
        assert_eq!(status.message(), "Database error: connection reset");
    }

    #[test]
    fn test_is_conflict() {
        assert!(AppError::conflict("dup").is_conflict());
        assert!(!AppError::validation("bad").is_conflict());
    }
}
