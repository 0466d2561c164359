//! 实体与输入输出对象之间的转换

use crate::domain::{NewProduct, Product};

use super::dto::{ProductInput, ProductOutput};

/// Product -> ProductOutput
pub fn product_to_output(product: &Product) -> ProductOutput {
    ProductOutput {
        id: product.id(),
        name: product.name().to_string(),
        price: product.price(),
        quantity_in_stock: product.quantity_in_stock(),
    }
}

/// ProductInput -> NewProduct，ID 由存储层分配
pub fn input_to_new_product(input: ProductInput) -> NewProduct {
    NewProduct {
        name: input.name,
        price: input.price,
        quantity_in_stock: input.quantity_in_stock,
    }
}
