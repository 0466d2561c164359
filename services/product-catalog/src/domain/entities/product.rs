//! 商品实体

use std::fmt;

use rust_decimal::Decimal;

/// 商品 ID，由存储层分配
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProductId(pub i64);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 尚未持久化的商品
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub price: Decimal,
    pub quantity_in_stock: i32,
}

/// 已持久化的商品
///
/// ID 一经分配不可修改，因此字段只通过访问器暴露。
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    id: ProductId,
    name: String,
    price: Decimal,
    quantity_in_stock: i32,
}

impl Product {
    /// 以存储层分配的 ID 构建实体
    pub fn from_new(id: ProductId, product: NewProduct) -> Self {
        Self {
            id,
            name: product.name,
            price: product.price,
            quantity_in_stock: product.quantity_in_stock,
        }
    }

    pub fn id(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn quantity_in_stock(&self) -> i32 {
        self.quantity_in_stock
    }
}
