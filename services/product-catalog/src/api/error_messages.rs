//! 领域错误到 gRPC 状态的映射

use config::{ID_PLACEHOLDER, MessagesConfig, NAME_PLACEHOLDER};
use tonic::Status;

use crate::domain::ProductId;
use crate::error::ProductError;

/// 按配置模板渲染的错误提示
#[derive(Debug, Clone)]
pub struct ErrorMessages {
    already_exists: String,
    not_found: String,
}

impl ErrorMessages {
    pub fn already_exists(&self, name: &str) -> String {
        self.already_exists.replace(NAME_PLACEHOLDER, name)
    }

    pub fn not_found(&self, id: ProductId) -> String {
        self.not_found.replace(ID_PLACEHOLDER, &id.to_string())
    }

    /// 仅 API 层感知 gRPC 状态码
    pub fn to_status(&self, err: ProductError) -> Status {
        match err {
            ProductError::AlreadyExists(name) => Status::already_exists(self.already_exists(&name)),
            ProductError::NotFound(id) => Status::not_found(self.not_found(id)),
            ProductError::Repository(e) => e.into(),
        }
    }
}

impl From<&MessagesConfig> for ErrorMessages {
    fn from(config: &MessagesConfig) -> Self {
        Self {
            already_exists: config.already_exists.clone(),
            not_found: config.not_found.clone(),
        }
    }
}

impl Default for ErrorMessages {
    fn default() -> Self {
        Self::from(&MessagesConfig::default())
    }
}
