//! 基础设施资源管理
//!
//! 统一管理服务共享的基础设施资源

use std::time::Duration;

use adapter_postgres::{PostgresConfig, create_pool, run_migrations};
use config::AppConfig;
use errors::AppResult;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use tracing::info;

use crate::retry::{RetryConfig, with_retry};

/// 基础设施资源容器
#[derive(Clone)]
pub struct Infrastructure {
    /// 应用配置
    config: AppConfig,
    /// PostgreSQL 连接池
    postgres_pool: PgPool,
}

impl Infrastructure {
    /// 从配置创建基础设施资源（带重试）
    pub async fn from_config(config: AppConfig) -> AppResult<Self> {
        let retry_config = RetryConfig::default();

        let pg_config = PostgresConfig::new(config.database.url.expose_secret())
            .with_max_connections(config.database.max_connections)
            .with_min_connections(config.database.min_connections)
            .with_connect_timeout(Duration::from_secs(config.database.acquire_timeout_secs));
        let postgres_pool = with_retry(&retry_config, "PostgreSQL connection", || {
            let cfg = pg_config.clone();
            async move { create_pool(&cfg).await }
        })
        .await?;
        info!(
            "PostgreSQL connection pool created (max_connections: {})",
            config.database.max_connections
        );

        Ok(Self {
            config,
            postgres_pool,
        })
    }

    /// 获取应用配置
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// 获取 PostgreSQL 连接池
    pub fn postgres_pool(&self) -> PgPool {
        self.postgres_pool.clone()
    }

    /// 按配置执行服务内嵌的迁移
    pub async fn migrate(&self, migrator: &Migrator) -> AppResult<()> {
        if !self.config.database.run_migrations {
            info!("Database migrations disabled by config, skipping");
            return Ok(());
        }
        run_migrations(&self.postgres_pool, migrator).await
    }
}
