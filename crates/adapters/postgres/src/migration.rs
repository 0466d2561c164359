//! PostgreSQL 迁移管理模块
//!
//! 迁移脚本由各服务通过 `sqlx::migrate!` 内嵌，这里只负责执行

use errors::{AppError, AppResult};
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use tracing::info;

/// 执行所有未应用的迁移
pub async fn run_migrations(pool: &PgPool, migrator: &Migrator) -> AppResult<()> {
    info!(
        migrations = migrator.iter().count(),
        "Running database migrations"
    );

    migrator
        .run(pool)
        .await
        .map_err(|e| AppError::database(format!("Migration failed: {}", e)))?;

    info!("Database migrations applied");
    Ok(())
}
