//! telemetry - 可观测性库

use std::time::Duration;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// 初始化 tracing
pub fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// 初始化 JSON 格式的 tracing（生产环境）
pub fn init_tracing_json(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().json())
        .init();
}

/// 初始化 Prometheus metrics
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    tracing::info!("Prometheus recorder installed");
    Ok(handle)
}

/// 记录 gRPC 请求
pub fn record_grpc_request(service: &str, method: &str, status: &str, elapsed: Duration) {
    let labels = [
        ("service", service.to_string()),
        ("method", method.to_string()),
        ("status", status.to_string()),
    ];

    counter!("grpc_requests_total", &labels).increment(1);
    histogram!("grpc_request_duration_ms", &labels).record(elapsed.as_secs_f64() * 1000.0);
}
