//! config - 配置加载库
//!
//! 加载顺序：`{dir}/default.toml` → `{dir}/{APP_ENV}.toml` → `APP_` 前缀环境变量
//! （层级以 `__` 分隔，例如 `APP_DATABASE__URL`）

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::Deserialize;
use thiserror::Error;

use secrecy::Secret;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load config: {0}")]
    Load(#[from] figment::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// 数据库配置
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: Secret<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_acquire_timeout_secs")]
    pub acquire_timeout_secs: u64,
    /// 启动时执行内嵌迁移
    #[serde(default = "default_run_migrations")]
    pub run_migrations: bool,
}

fn default_max_connections() -> u32 {
    // 开发环境: 10, 生产环境: 50
    match std::env::var("APP_ENV").as_deref() {
        Ok("production") => 50,
        _ => 10,
    }
}

fn default_min_connections() -> u32 {
    1
}

fn default_acquire_timeout_secs() -> u64 {
    30
}

fn default_run_migrations() -> bool {
    true
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// 健康检查端口（默认为 gRPC 端口 + 1000）
    pub health_port: Option<u16>,
}

impl ServerConfig {
    pub fn health_port(&self) -> u16 {
        self.health_port
            .unwrap_or_else(|| self.port.saturating_add(1000))
    }
}

/// 遥测配置
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// JSON 格式日志；未设置时生产环境启用
    pub json: Option<bool>,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// 面向调用方的错误提示模板
///
/// `{name}` 与 `{id}` 为占位符，渲染时替换为冲突的商品名称和未找到的商品 ID。
#[derive(Debug, Clone, Deserialize)]
pub struct MessagesConfig {
    #[serde(default = "default_already_exists")]
    pub already_exists: String,
    #[serde(default = "default_not_found")]
    pub not_found: String,
}

pub const NAME_PLACEHOLDER: &str = "{name}";
pub const ID_PLACEHOLDER: &str = "{id}";

fn default_already_exists() -> String {
    "Product {name} already exists".to_string()
}

fn default_not_found() -> String {
    "Product with id {id} not found".to_string()
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            already_exists: default_already_exists(),
            not_found: default_not_found(),
        }
    }
}

impl MessagesConfig {
    /// 模板必须包含对应的占位符
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.already_exists.contains(NAME_PLACEHOLDER) {
            return Err(ConfigError::Invalid(format!(
                "messages.already_exists must contain {}",
                NAME_PLACEHOLDER
            )));
        }
        if !self.not_found.contains(ID_PLACEHOLDER) {
            return Err(ConfigError::Invalid(format!(
                "messages.not_found must contain {}",
                ID_PLACEHOLDER
            )));
        }
        Ok(())
    }
}

/// 应用配置
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app_name: String,
    pub app_env: String,
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
    #[serde(default)]
    pub messages: MessagesConfig,
}

impl AppConfig {
    /// 从配置文件和环境变量加载配置
    pub fn load(config_dir: &str) -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let config: Self = Figment::new()
            .merge(Serialized::default("app_env", &env))
            .merge(Toml::file(format!("{}/default.toml", config_dir)))
            .merge(Toml::file(format!("{}/{}.toml", config_dir, env)))
            .merge(Env::prefixed("APP_").split("__"))
            .extract()?;

        config.messages.validate()?;

        Ok(config)
    }

    /// 是否为生产环境
    pub fn is_production(&self) -> bool {
        self.app_env == "production"
    }

    /// 是否输出 JSON 日志
    pub fn json_logs(&self) -> bool {
        self.telemetry.json.unwrap_or_else(|| self.is_production())
    }
}
