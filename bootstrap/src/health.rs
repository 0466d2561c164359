//! 健康检查模块
//!
//! 提供 /health、/ready 和 /metrics 端点

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use sqlx::PgPool;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

/// 健康检查状态
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub checks: Vec<ComponentHealth>,
}

/// 组件健康状态
#[derive(Debug, Clone, Serialize)]
pub struct ComponentHealth {
    pub name: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl HealthStatus {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            checks: vec![],
        }
    }

    pub fn add_check(&mut self, check: ComponentHealth) {
        if check.status != "healthy" {
            self.status = "unhealthy".to_string();
        }
        self.checks.push(check);
    }

    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

impl ComponentHealth {
    pub fn healthy(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: "healthy".to_string(),
            message: None,
        }
    }

    pub fn unhealthy(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: "unhealthy".to_string(),
            message: Some(message.into()),
        }
    }
}

/// 健康检查器
pub struct HealthChecker {
    pool: PgPool,
}

impl HealthChecker {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 存活检查（liveness），不检查依赖
    pub async fn liveness(&self) -> HealthStatus {
        HealthStatus::healthy()
    }

    /// 就绪检查（readiness）
    pub async fn readiness(&self) -> HealthStatus {
        let mut status = HealthStatus::healthy();
        status.add_check(self.check_postgres().await);
        status
    }

    async fn check_postgres(&self) -> ComponentHealth {
        match adapter_postgres::check_connection(&self.pool).await {
            Ok(()) => ComponentHealth::healthy("postgres"),
            Err(e) => ComponentHealth::unhealthy("postgres", e.to_string()),
        }
    }
}

#[derive(Clone)]
struct HealthServerState {
    checker: Arc<HealthChecker>,
    metrics: PrometheusHandle,
}

/// HTTP 健康检查服务器
pub struct HealthServer {
    checker: Arc<HealthChecker>,
    metrics: PrometheusHandle,
    port: u16,
}

impl HealthServer {
    pub fn new(checker: Arc<HealthChecker>, metrics: PrometheusHandle, port: u16) -> Self {
        Self {
            checker,
            metrics,
            port,
        }
    }

    /// 启动 HTTP 服务器
    pub async fn serve(self) -> Result<(), std::io::Error> {
        let state = HealthServerState {
            checker: self.checker,
            metrics: self.metrics,
        };

        let app = Router::new()
            .route("/health", get(health_handler))
            .route("/ready", get(ready_handler))
            .route("/metrics", get(metrics_handler))
            .with_state(state);

        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));
        info!(%addr, "Health check HTTP server starting");

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await
    }
}

async fn health_handler(State(state): State<HealthServerState>) -> impl IntoResponse {
    let status = state.checker.liveness().await;
    (StatusCode::OK, Json(status))
}

async fn ready_handler(State(state): State<HealthServerState>) -> impl IntoResponse {
    let status = state.checker.readiness().await;
    let code = if status.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (code, Json(status))
}

async fn metrics_handler(State(state): State<HealthServerState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        state.metrics.render(),
    )
}
