//! 商品仓储接口

use async_trait::async_trait;
use errors::AppResult;

use crate::domain::entities::{NewProduct, Product, ProductId};

/// 商品仓储接口
///
/// 实现方负责在存储层保证名称大小写不敏感唯一：`save` 遇到重名时返回
/// `AppError::Conflict`。
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// 按名称查找（忽略大小写）
    async fn find_by_name_ignore_case(&self, name: &str) -> AppResult<Option<Product>>;

    /// 根据 ID 查找
    async fn find_by_id(&self, id: ProductId) -> AppResult<Option<Product>>;

    /// 保存新商品，返回带有已分配 ID 的实体
    async fn save(&self, product: NewProduct) -> AppResult<Product>;

    /// 删除商品；记录已不存在时返回 `AppError::NotFound`
    async fn delete(&self, product: &Product) -> AppResult<()>;

    /// 查询全部商品
    async fn find_all(&self) -> AppResult<Vec<Product>>;
}
