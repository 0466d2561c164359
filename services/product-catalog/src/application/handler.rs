//! Business logic handler

use std::sync::Arc;

use errors::AppError;
use tracing::{debug, info, instrument, warn};

use crate::domain::{ProductId, ProductRepository};
use crate::error::{ProductError, ProductResult};

use super::converter::{input_to_new_product, product_to_output};
use super::dto::{ProductInput, ProductOutput};

/// 商品业务处理器
///
/// 无状态，所有状态都在仓储中。名称唯一性先查后写，两步之间的竞争由
/// 存储层的唯一约束兜底，冲突同样以 `AlreadyExists` 返回。
pub struct ProductHandler {
    repository: Arc<dyn ProductRepository>,
}

impl ProductHandler {
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self { repository }
    }

    /// 创建商品
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: ProductInput) -> ProductResult<ProductOutput> {
        if self
            .repository
            .find_by_name_ignore_case(&input.name)
            .await?
            .is_some()
        {
            warn!("Product name already registered");
            return Err(ProductError::AlreadyExists(input.name));
        }

        let name = input.name.clone();
        let product = match self.repository.save(input_to_new_product(input)).await {
            Ok(product) => product,
            Err(e) if e.is_conflict() => {
                warn!(error = %e, "Product name taken concurrently");
                return Err(ProductError::AlreadyExists(name));
            }
            Err(e) => return Err(e.into()),
        };

        info!(id = %product.id(), "Product created");
        Ok(product_to_output(&product))
    }

    /// 根据 ID 获取商品
    #[instrument(skip(self))]
    pub async fn find_by_id(&self, id: ProductId) -> ProductResult<ProductOutput> {
        debug!("Finding product");

        let product = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))?;

        Ok(product_to_output(&product))
    }

    /// 查询全部商品，顺序由存储决定
    #[instrument(skip(self))]
    pub async fn find_all(&self) -> ProductResult<Vec<ProductOutput>> {
        let products = self.repository.find_all().await?;
        debug!(count = products.len(), "Products loaded");

        Ok(products.iter().map(product_to_output).collect())
    }

    /// 删除商品
    #[instrument(skip(self))]
    pub async fn delete(&self, id: ProductId) -> ProductResult<()> {
        let product = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))?;

        match self.repository.delete(&product).await {
            Ok(()) => {
                info!("Product deleted");
                Ok(())
            }
            Err(AppError::NotFound(_)) => Err(ProductError::NotFound(id)),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewProduct, Product};
    use crate::infrastructure::persistence::InMemoryProductRepository;
    use async_trait::async_trait;
    use errors::AppResult;
    use rust_decimal::Decimal;

    fn input(name: &str) -> ProductInput {
        ProductInput {
            name: name.to_string(),
            price: Decimal::new(1099, 2),
            quantity_in_stock: 10,
        }
    }

    fn setup() -> (ProductHandler, Arc<InMemoryProductRepository>) {
        let repository = Arc::new(InMemoryProductRepository::new());
        (ProductHandler::new(repository.clone()), repository)
    }

    #[tokio::test]
    async fn test_create_returns_store_assigned_id() {
        let (handler, _) = setup();

        let output = handler.create(input("Product A")).await.unwrap();

        assert_eq!(output.id, ProductId(1));
        assert_eq!(output.name, "Product A");
        assert_eq!(output.price, Decimal::new(1099, 2));
        assert_eq!(output.quantity_in_stock, 10);
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_name_ignoring_case() {
        let (handler, repository) = setup();
        handler.create(input("Widget")).await.unwrap();

        let err = handler.create(input("widget")).await.unwrap_err();

        assert!(matches!(err, ProductError::AlreadyExists(ref name) if name == "widget"));
        assert_eq!(repository.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let (handler, _) = setup();
        let created = handler.create(input("Product A")).await.unwrap();

        let found = handler.find_by_id(created.id).await.unwrap();

        assert_eq!(found, created);
    }

    #[tokio::test]
    async fn test_find_by_id_not_found() {
        let (handler, _) = setup();

        let err = handler.find_by_id(ProductId(100)).await.unwrap_err();

        assert!(matches!(err, ProductError::NotFound(ProductId(100))));
    }

    #[tokio::test]
    async fn test_find_all_empty() {
        let (handler, _) = setup();
        assert!(handler.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_find_all_returns_created_products() {
        let (handler, _) = setup();
        handler.create(input("A")).await.unwrap();
        handler.create(input("B")).await.unwrap();

        let products = handler.find_all().await.unwrap();

        assert_eq!(products.len(), 2);
        let names: Vec<&str> = products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[tokio::test]
    async fn test_delete_then_find_fails() {
        let (handler, _) = setup();
        let created = handler.create(input("Product A")).await.unwrap();

        handler.delete(created.id).await.unwrap();

        let err = handler.find_by_id(created.id).await.unwrap_err();
        assert!(matches!(err, ProductError::NotFound(id) if id == created.id));
    }

    #[tokio::test]
    async fn test_delete_missing_does_not_mutate() {
        let (handler, repository) = setup();
        handler.create(input("Product A")).await.unwrap();

        let err = handler.delete(ProductId(100)).await.unwrap_err();

        assert!(matches!(err, ProductError::NotFound(ProductId(100))));
        assert_eq!(repository.find_all().await.unwrap().len(), 1);
    }

    /// 查名时看不到冲突，写入时被存储层唯一约束拒绝
    struct RacingRepository;

    #[async_trait]
    impl ProductRepository for RacingRepository {
        async fn find_by_name_ignore_case(&self, _name: &str) -> AppResult<Option<Product>> {
            Ok(None)
        }
        async fn find_by_id(&self, _id: ProductId) -> AppResult<Option<Product>> {
            Ok(None)
        }
        async fn save(&self, _product: NewProduct) -> AppResult<Product> {
            Err(AppError::conflict("uq_products_name_lower"))
        }
        async fn delete(&self, _product: &Product) -> AppResult<()> {
            Ok(())
        }
        async fn find_all(&self) -> AppResult<Vec<Product>> {
            Ok(vec![])
        }
    }

    #[tokio::test]
    async fn test_store_conflict_surfaces_as_already_exists() {
        let handler = ProductHandler::new(Arc::new(RacingRepository));

        let err = handler.create(input("Widget")).await.unwrap_err();

        assert!(matches!(err, ProductError::AlreadyExists(ref name) if name == "Widget"));
    }

    /// 查到记录后记录被并发删除
    struct VanishingRepository;

    #[async_trait]
    impl ProductRepository for VanishingRepository {
        async fn find_by_name_ignore_case(&self, _name: &str) -> AppResult<Option<Product>> {
            Ok(None)
        }
        async fn find_by_id(&self, id: ProductId) -> AppResult<Option<Product>> {
            Ok(Some(Product::from_new(
                id,
                NewProduct {
                    name: "ghost".to_string(),
                    price: Decimal::ZERO,
                    quantity_in_stock: 0,
                },
            )))
        }
        async fn save(&self, _product: NewProduct) -> AppResult<Product> {
            Err(AppError::internal("unused"))
        }
        async fn delete(&self, _product: &Product) -> AppResult<()> {
            Err(AppError::not_found("Record not found"))
        }
        async fn find_all(&self) -> AppResult<Vec<Product>> {
            Ok(vec![])
        }
    }

    #[tokio::test]
    async fn test_delete_race_reports_not_found() {
        let handler = ProductHandler::new(Arc::new(VanishingRepository));

        let err = handler.delete(ProductId(5)).await.unwrap_err();

        assert!(matches!(err, ProductError::NotFound(ProductId(5))));
    }

    struct FailingRepository;

    #[async_trait]
    impl ProductRepository for FailingRepository {
        async fn find_by_name_ignore_case(&self, _name: &str) -> AppResult<Option<Product>> {
            Err(AppError::database("connection reset"))
        }
        async fn find_by_id(&self, _id: ProductId) -> AppResult<Option<Product>> {
            Err(AppError::database("connection reset"))
        }
        async fn save(&self, _product: NewProduct) -> AppResult<Product> {
            Err(AppError::database("connection reset"))
        }
        async fn delete(&self, _product: &Product) -> AppResult<()> {
            Err(AppError::database("connection reset"))
        }
        async fn find_all(&self) -> AppResult<Vec<Product>> {
            Err(AppError::database("connection reset"))
        }
    }

    #[tokio::test]
    async fn test_repository_faults_propagate() {
        let handler = ProductHandler::new(Arc::new(FailingRepository));

        assert!(matches!(
            handler.create(input("A")).await,
            Err(ProductError::Repository(AppError::Database(_)))
        ));
        assert!(matches!(
            handler.find_by_id(ProductId(1)).await,
            Err(ProductError::Repository(AppError::Database(_)))
        ));
        assert!(matches!(
            handler.find_all().await,
            Err(ProductError::Repository(AppError::Database(_)))
        ));
        assert!(matches!(
            handler.delete(ProductId(1)).await,
            Err(ProductError::Repository(AppError::Database(_)))
        ));
    }
}
