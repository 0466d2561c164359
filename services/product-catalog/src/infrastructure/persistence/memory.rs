//! In-memory implementation of ProductRepository
//!
//! 仅用于测试。按 `0001_create_products.sql` 检查约束：名称最长 255 个字符、
//! 去掉空格后非空（与 PostgreSQL `trim()` 一致，只去空格）、大小写不敏感唯一，
//! 价格与库存非负。
//!
//! 大小写折叠使用 Unicode `to_lowercase`；PostgreSQL `lower()` 取决于数据库排序规则，
//! 对非 ASCII 名称两者可能不同。

use std::collections::BTreeMap;

use async_trait::async_trait;
use errors::{AppError, AppResult};
use rust_decimal::Decimal;
use tokio::sync::RwLock;

use crate::domain::{NewProduct, Product, ProductId, ProductRepository};

#[derive(Default)]
struct MemoryState {
    last_id: i64,
    products: BTreeMap<ProductId, Product>,
}

#[derive(Default)]
pub struct InMemoryProductRepository {
    state: RwLock<MemoryState>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

/// `name VARCHAR(255)`
const NAME_MAX_CHARS: usize = 255;

fn check_constraints(product: &NewProduct) -> AppResult<()> {
    if product.name.chars().count() > NAME_MAX_CHARS {
        return Err(AppError::validation(format!(
            "Value too long for type character varying({})",
            NAME_MAX_CHARS
        )));
    }
    if product.name.trim_matches(' ').is_empty() {
        return Err(AppError::validation(
            "Check constraint chk_products_name_not_blank violated",
        ));
    }
    if product.price < Decimal::ZERO {
        return Err(AppError::validation(
            "Check constraint chk_products_price_non_negative violated",
        ));
    }
    if product.quantity_in_stock < 0 {
        return Err(AppError::validation(
            "Check constraint chk_products_quantity_non_negative violated",
        ));
    }
    Ok(())
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_by_name_ignore_case(&self, name: &str) -> AppResult<Option<Product>> {
        let needle = name.to_lowercase();
        let state = self.state.read().await;
        Ok(state
            .products
            .values()
            .find(|p| p.name().to_lowercase() == needle)
            .cloned())
    }

    async fn find_by_id(&self, id: ProductId) -> AppResult<Option<Product>> {
        Ok(self.state.read().await.products.get(&id).cloned())
    }

    async fn save(&self, product: NewProduct) -> AppResult<Product> {
        check_constraints(&product)?;

        // 查重与写入在同一把写锁内完成
        let mut state = self.state.write().await;
        let needle = product.name.to_lowercase();
        if state
            .products
            .values()
            .any(|p| p.name().to_lowercase() == needle)
        {
            return Err(AppError::conflict(
                "Duplicate entry violates unique constraint uq_products_name_lower",
            ));
        }

        state.last_id += 1;
        let saved = Product::from_new(ProductId(state.last_id), product);
        state.products.insert(saved.id(), saved.clone());
        Ok(saved)
    }

    async fn delete(&self, product: &Product) -> AppResult<()> {
        self.state
            .write()
            .await
            .products
            .remove(&product.id())
            .map(|_| ())
            .ok_or_else(|| AppError::not_found(format!("Product {} not found", product.id())))
    }

    async fn find_all(&self) -> AppResult<Vec<Product>> {
        Ok(self.state.read().await.products.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_product(name: &str) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            price: Decimal::new(1099, 2),
            quantity_in_stock: 10,
        }
    }

    #[tokio::test]
    async fn test_ids_are_never_reused() {
        let repo = InMemoryProductRepository::new();
        let a = repo.save(new_product("A")).await.unwrap();
        repo.delete(&a).await.unwrap();

        let b = repo.save(new_product("B")).await.unwrap();

        assert_eq!(a.id(), ProductId(1));
        assert_eq!(b.id(), ProductId(2));
    }

    #[tokio::test]
    async fn test_save_rejects_duplicate_name() {
        let repo = InMemoryProductRepository::new();
        repo.save(new_product("Widget")).await.unwrap();

        let err = repo.save(new_product("WIDGET")).await.unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_save_enforces_check_constraints() {
        let repo = InMemoryProductRepository::new();

        let mut blank = new_product("  ");
        assert!(matches!(repo.save(blank.clone()).await, Err(AppError::Validation(_))));

        blank.name = "Widget".to_string();
        blank.price = Decimal::new(-1, 2);
        assert!(matches!(repo.save(blank.clone()).await, Err(AppError::Validation(_))));

        blank.price = Decimal::ZERO;
        blank.quantity_in_stock = -1;
        assert!(matches!(repo.save(blank).await, Err(AppError::Validation(_))));

        assert!(repo.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_enforces_name_length() {
        let repo = InMemoryProductRepository::new();

        let err = repo.save(new_product(&"a".repeat(256))).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        // 按字符而非字节计数
        let saved = repo.save(new_product(&"é".repeat(255))).await.unwrap();
        assert_eq!(saved.name().chars().count(), 255);
    }

    #[tokio::test]
    async fn test_blank_check_only_strips_spaces() {
        let repo = InMemoryProductRepository::new();

        let saved = repo.save(new_product("\t")).await.unwrap();

        assert_eq!(saved.name(), "\t");
    }

    #[tokio::test]
    async fn test_delete_missing_reports_not_found() {
        let repo = InMemoryProductRepository::new();
        let ghost = Product::from_new(ProductId(9), new_product("ghost"));

        let err = repo.delete(&ghost).await.unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_find_all_orders_by_id() {
        let repo = InMemoryProductRepository::new();
        repo.save(new_product("B")).await.unwrap();
        repo.save(new_product("A")).await.unwrap();

        let names: Vec<String> = repo
            .find_all()
            .await
            .unwrap()
            .iter()
            .map(|p| p.name().to_string())
            .collect();

        assert_eq!(names, vec!["B", "A"]);
    }
}
