//! PostgreSQL implementation of ProductRepository

use adapter_postgres::map_sqlx_error;
use async_trait::async_trait;
use errors::{AppError, AppResult};
use sqlx::PgPool;

use crate::domain::{NewProduct, Product, ProductId, ProductRepository};

use super::rows::ProductRow;

pub struct PostgresProductRepository {
    pool: PgPool,
}

impl PostgresProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn find_by_name_ignore_case(&self, name: &str) -> AppResult<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, name, price, quantity_in_stock
            FROM products
            WHERE lower(name) = lower($1)
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(Product::from))
    }

    async fn find_by_id(&self, id: ProductId) -> AppResult<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, name, price, quantity_in_stock
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(Product::from))
    }

    async fn save(&self, product: NewProduct) -> AppResult<Product> {
        // 名称唯一由 uq_products_name_lower 保证，冲突映射为 AppError::Conflict
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            INSERT INTO products (name, price, quantity_in_stock)
            VALUES ($1, $2, $3)
            RETURNING id, name, price, quantity_in_stock
            "#,
        )
        .bind(&product.name)
        .bind(product.price)
        .bind(product.quantity_in_stock)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn delete(&self, product: &Product) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(product.id().0)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Product {} not found", product.id())));
        }

        Ok(())
    }

    async fn find_all(&self) -> AppResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, name, price, quantity_in_stock
            FROM products
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(Product::from).collect())
    }
}
