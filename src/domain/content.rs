//! 消息内容单元与逻辑分段
//!
//! 一条待发送消息由有序的 `ContentUnit` 组成，分段器把它切成若干 `Segment`

use serde::{Deserialize, Serialize};

/// 句尾可去除的标点（中英文逗号、句号、顿号、分号、冒号）
#[inline]
fn is_tail_punctuation(ch: char) -> bool {
    matches!(ch, ',' | '，' | '。' | '.' | '、' | '；' | ';' | '：' | ':')
}

/// 消息内容单元
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum ContentUnit {
    /// 纯文本
    Plain(String),
    /// @某人（目标 ID）
    Mention(String),
    /// 回复某条消息（消息 ID）
    Reply(String),
    /// 图片引用
    Image(String),
    /// 表情引用
    Sticker(String),
    /// 其他不透明组件，必须独立成段
    Other(serde_json::Value),
}

impl ContentUnit {
    pub fn plain(text: impl Into<String>) -> Self {
        Self::Plain(text.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Plain(text) => Some(text),
            _ => None,
        }
    }
}

/// 逻辑分段单元
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Segment {
    units: Vec<ContentUnit>,
}

impl Segment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_units(units: Vec<ContentUnit>) -> Self {
        Self { units }
    }

    pub fn append(&mut self, unit: ContentUnit) {
        self.units.push(unit);
    }

    pub fn extend(&mut self, units: impl IntoIterator<Item = ContentUnit>) {
        self.units.extend(units);
    }

    pub fn units(&self) -> &[ContentUnit] {
        &self.units
    }

    pub fn into_units(self) -> Vec<ContentUnit> {
        self.units
    }

    pub fn has_units(&self) -> bool {
        !self.units.is_empty()
    }

    /// 仅提取文本内容（用于延迟计算）
    pub fn text(&self) -> String {
        self.units.iter().filter_map(ContentUnit::as_text).collect()
    }

    /// 是否包含非文本组件（图片 / 表情 / 其他）
    pub fn has_media(&self) -> bool {
        self.units.iter().any(|u| !matches!(u, ContentUnit::Plain(_)))
    }

    /// 是否为空段（无文本、无媒体）
    pub fn is_empty(&self) -> bool {
        self.text().trim().is_empty() && !self.has_media()
    }

    /// 移除末尾 Plain 文本中的句尾符号
    ///
    /// 只处理最后一个 Plain，不影响中间结构
    pub fn strip_tail_punctuation(&mut self) {
        let last_plain = self.units.iter_mut().rev().find_map(|u| match u {
            ContentUnit::Plain(text) => Some(text),
            _ => None,
        });

        if let Some(text) = last_plain {
            let kept = text.trim_end_matches(is_tail_punctuation).len();
            text.truncate(kept);
        }
    }
}
