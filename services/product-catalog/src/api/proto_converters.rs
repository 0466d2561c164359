//! Proto <-> DTO conversions

use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use tonic::Status;

use crate::application::{ProductInput, ProductOutput};
use crate::proto::{ProductRequest, ProductResponse};

/// ProductRequest -> ProductInput
///
/// 价格必须能表示为 `Decimal`：NaN、无穷值以及绝对值超过 `Decimal::MAX`
/// （约 7.9e28）的数都会被拒绝。
#[allow(clippy::result_large_err)]
pub fn request_to_input(req: ProductRequest) -> Result<ProductInput, Status> {
    let price = Decimal::from_f64(req.price).ok_or_else(|| {
        Status::invalid_argument(format!(
            "Invalid price: {} (must be finite and within ±{})",
            req.price,
            Decimal::MAX
        ))
    })?;

    Ok(ProductInput {
        name: req.name,
        price,
        quantity_in_stock: req.quantity_in_stock,
    })
}

/// ProductOutput -> ProductResponse
pub fn output_to_proto(output: &ProductOutput) -> ProductResponse {
    ProductResponse {
        id: output.id.0,
        name: output.name.clone(),
        price: output.price.to_f64().unwrap_or_default(),
        quantity_in_stock: output.quantity_in_stock,
    }
}
