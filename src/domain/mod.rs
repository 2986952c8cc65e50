//! Domain Layer - 领域层
//!
//! 消息分段的纯计算部分：
//! - content: 内容单元与逻辑分段
//! - delimiter: 分隔符模式编译
//! - segmenter: 分段算法
//! - delay: 打字延迟模型

mod content;
mod delay;
mod delimiter;
mod segmenter;

pub use content::{ContentUnit, Segment};
pub use delay::{
    DelayModel, DelayParseError, TypingDelay, DEFAULT_MAX_DELAY, DEFAULT_MIN_DELAY,
    DEFAULT_NORM_LEN, MAX_DELAY_CEILING,
};
pub use delimiter::{DelimiterPattern, Token};
pub use segmenter::Segmenter;
