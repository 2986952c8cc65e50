//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 分段配置
    #[serde(default)]
    pub split: SplitConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 分段配置
#[derive(Debug, Clone, Deserialize)]
pub struct SplitConfig {
    /// 分隔符列表，`\n` 表示换行，`\s` 表示任意空白
    #[serde(default = "default_char_list")]
    pub char_list: Vec<String>,

    /// 最大分段数（<=0 表示不限制）
    #[serde(default)]
    pub max_count: i64,

    /// 打字延迟区间（秒），格式 "min,max"
    #[serde(default = "default_typing_delay")]
    pub typing_delay: String,
}

pub(super) fn default_char_list() -> Vec<String> {
    ["。", "？", "\\s", "\\n"]
        .into_iter()
        .map(String::from)
        .collect()
}

pub(super) fn default_typing_delay() -> String {
    "1.5,3.5".to_string()
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            char_list: default_char_list(),
            max_count: 0,
            typing_delay: default_typing_delay(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
