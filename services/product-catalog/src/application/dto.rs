//! 输入输出数据对象

use rust_decimal::Decimal;

use crate::domain::ProductId;

/// 创建商品的输入
#[derive(Debug, Clone, PartialEq)]
pub struct ProductInput {
    pub name: String,
    pub price: Decimal,
    pub quantity_in_stock: i32,
}

/// 商品的只读投影
#[derive(Debug, Clone, PartialEq)]
pub struct ProductOutput {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub quantity_in_stock: i32,
}
