//! 打字延迟模型
//!
//! 根据分段文本长度计算发送间隔（线性映射到 min_delay ~ max_delay）：
//! - 短文本 → 接近 min_delay
//! - 长文本 → 接近 max_delay

use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

/// 默认最小延迟（秒）
pub const DEFAULT_MIN_DELAY: f64 = 1.5;
/// 默认最大延迟（秒）
pub const DEFAULT_MAX_DELAY: f64 = 3.5;
/// 文本长度归一化上限（字符数），达到后取 max_delay
pub const DEFAULT_NORM_LEN: usize = 150;
/// 允许配置的最大延迟（秒）
pub const MAX_DELAY_CEILING: f64 = 3600.0;

/// `typing_delay` 解析错误
#[derive(Debug, Error, PartialEq)]
pub enum DelayParseError {
    #[error("expected \"min,max\", got {0:?}")]
    Format(String),

    #[error("invalid number {0:?}")]
    Number(String),

    #[error("invalid bounds: min={min}, max={max}")]
    Bounds { min: f64, max: f64 },
}

/// 延迟区间（秒）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TypingDelay {
    pub min: f64,
    pub max: f64,
}

impl Default for TypingDelay {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_DELAY,
            max: DEFAULT_MAX_DELAY,
        }
    }
}

impl TypingDelay {
    /// 解析 "min,max"，失败时记录警告并使用默认值 1.5,3.5
    pub fn parse_or_default(raw: &str) -> Self {
        raw.parse().unwrap_or_else(|e: DelayParseError| {
            tracing::warn!(typing_delay = %raw, error = %e, "解析 typing_delay 失败，使用默认值 1.5,3.5");
            Self::default()
        })
    }
}

impl FromStr for TypingDelay {
    type Err = DelayParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').collect();
        let [min, max] = parts.as_slice() else {
            return Err(DelayParseError::Format(s.to_string()));
        };

        let parse = |v: &str| {
            v.trim()
                .parse::<f64>()
                .map_err(|_| DelayParseError::Number(v.to_string()))
        };
        let (min, max) = (parse(*min)?, parse(*max)?);

        if !min.is_finite() || !max.is_finite() || min < 0.0 || min > max || max > MAX_DELAY_CEILING {
            return Err(DelayParseError::Bounds { min, max });
        }

        Ok(Self { min, max })
    }
}

/// 延迟模型
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DelayModel {
    pub delay: TypingDelay,
    pub norm_len: usize,
}

impl Default for DelayModel {
    fn default() -> Self {
        Self::new(TypingDelay::default())
    }
}

impl DelayModel {
    pub fn new(delay: TypingDelay) -> Self {
        Self {
            delay,
            norm_len: DEFAULT_NORM_LEN,
        }
    }

    /// 文本长度（字符数）对应的延迟秒数
    pub fn delay_secs(&self, text_len: usize) -> f64 {
        if text_len == 0 {
            return 0.0;
        }

        let ratio = if self.norm_len == 0 {
            1.0
        } else {
            (text_len as f64 / self.norm_len as f64).min(1.0)
        };
        self.delay.min + (self.delay.max - self.delay.min) * ratio
    }

    /// 无法表示的延迟（负数、溢出）按不等待处理
    pub fn delay_for(&self, text_len: usize) -> Duration {
        Duration::try_from_secs_f64(self.delay_secs(text_len)).unwrap_or(Duration::ZERO)
    }
}
