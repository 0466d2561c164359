//! 服务启动器
//!
//! 提供统一的服务启动模式

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use config::AppConfig;
use errors::AppResult;
use tonic::transport::Server;
use tonic::transport::server::Router;
use tracing::{error, info};

use crate::health::{HealthChecker, HealthServer};
use crate::infrastructure::Infrastructure;
use crate::runtime::{init_runtime, shutdown_signal};

/// 运行 gRPC 服务
///
/// 所有服务的统一入口点：
/// 1. 加载配置并初始化日志
/// 2. 安装 Prometheus 记录器
/// 3. 创建基础设施资源（带重试）
/// 4. 启动健康检查 HTTP 服务器
/// 5. 调用闭包注册 gRPC 服务
/// 6. 启动服务器并处理 graceful shutdown
///
/// # 示例
///
/// ```ignore
/// run_server("config", |infra, mut server| async move {
///     let service = MyServiceImpl::new(infra.postgres_pool());
///     Ok(server.add_service(MyServiceServer::new(service)))
/// })
/// .await
/// ```
pub async fn run_server<F, Fut>(
    config_dir: &str,
    server_builder: F,
) -> Result<(), Box<dyn std::error::Error>>
where
    F: FnOnce(Infrastructure, Server) -> Fut,
    Fut: Future<Output = AppResult<Router>>,
{
    let config = AppConfig::load(config_dir)?;

    init_runtime(&config);

    info!("Starting {} service", config.app_name);

    let metrics = telemetry::init_metrics()?;

    let infra = Infrastructure::from_config(config.clone()).await?;

    let health_checker = Arc::new(HealthChecker::new(infra.postgres_pool()));
    let health_server = HealthServer::new(health_checker, metrics, config.server.health_port());
    let health_handle = tokio::spawn(async move {
        if let Err(e) = health_server.serve().await {
            error!("Health server error: {}", e);
        }
    });

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    let router = server_builder(infra, Server::builder()).await?;

    info!(%addr, "gRPC server starting");

    router.serve_with_shutdown(addr, shutdown_signal()).await?;

    health_handle.abort();

    info!("Service stopped");

    Ok(())
}
