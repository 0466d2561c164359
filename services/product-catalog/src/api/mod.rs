//! API layer - gRPC service implementations

mod error_messages;
mod grpc_service;
mod proto_converters;

pub use error_messages::ErrorMessages;
pub use grpc_service::ProductServiceImpl;
