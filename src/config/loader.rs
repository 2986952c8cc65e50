//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError as ConfigCrateError};
use config::{Environment, File, FileFormat};
use std::path::Path;
use thiserror::Error;

use super::types::{default_char_list, default_typing_delay, AppConfig};

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 环境变量前缀
const ENV_PREFIX: &str = "CHATSPLIT";

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `CHATSPLIT_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `CHATSPLIT_SPLIT__MAX_COUNT=3`
/// - `CHATSPLIT_SPLIT__TYPING_DELAY=1.0,2.5`
/// - `CHATSPLIT_LOG__LEVEL=debug`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = with_defaults(Config::builder())?;

    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 例如: CHATSPLIT_SPLIT__MAX_COUNT=3
    // 注意: 环境变量名会被转换为小写
    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    build(builder)
}

/// 从 TOML 文本加载配置（不读取文件与环境变量）
pub fn load_config_from_str(toml: &str) -> Result<AppConfig, ConfigError> {
    let builder = with_defaults(Config::builder())?.add_source(File::from_str(toml, FileFormat::Toml));
    build(builder)
}

fn with_defaults(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(builder
        .set_default("split.char_list", default_char_list())?
        .set_default("split.max_count", 0)?
        .set_default("split.typing_delay", default_typing_delay())?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?)
}

fn build(builder: ConfigBuilder<DefaultState>) -> Result<AppConfig, ConfigError> {
    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
///
/// typing_delay 格式错误不在此处拒绝，由分段器回退到默认值
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.log.level.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "Log level cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Split Delimiters: {:?}", config.split.char_list);
    if config.split.max_count > 0 {
        tracing::info!("Split Max Count: {}", config.split.max_count);
    } else {
        tracing::info!("Split Max Count: unlimited");
    }
    tracing::info!("Typing Delay: {}", config.split.typing_delay);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
