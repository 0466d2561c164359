//! 数据库行结构

use rust_decimal::Decimal;

use crate::domain::{NewProduct, Product, ProductId};

#[derive(Debug, sqlx::FromRow)]
pub struct ProductRow {
    pub id: i64,
    pub name: String,
    pub price: Decimal,
    pub quantity_in_stock: i32,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product::from_new(
            ProductId(row.id),
            NewProduct {
                name: row.name,
                price: row.price,
                quantity_in_stock: row.quantity_in_stock,
            },
        )
    }
}
