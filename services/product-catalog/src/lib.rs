//! product-catalog Service - 商品目录
//!
//! 通过 gRPC 暴露商品的创建、查询与删除

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;

// Proto generated code
pub mod proto {
    tonic::include_proto!("catalog.product.v1");
}

pub const FILE_DESCRIPTOR_SET: &[u8] =
    tonic::include_file_descriptor_set!("catalog_product_descriptor");

/// 内嵌的数据库迁移
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
