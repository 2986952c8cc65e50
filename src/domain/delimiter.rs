//! 分隔符模式编译器
//!
//! 把配置中的分隔符列表编译成 "一个或多个连续分隔符" 的匹配器，
//! 连续的 `,,,` 或混合分隔符只算作一个边界

use regex::Regex;

/// 配置中表示换行的两字符写法
const NEWLINE_TOKEN: &str = "\\n";
/// 配置中表示任意空白的两字符写法
const WHITESPACE_TOKEN: &str = "\\s";

/// 拆分后的文本片段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// 普通文本
    Literal(&'a str),
    /// 连续分隔符
    Delimiter(&'a str),
}

/// 编译后的分隔符匹配器
#[derive(Debug, Clone)]
pub struct DelimiterPattern {
    /// 为 None 时不会匹配任何内容
    regex: Option<Regex>,
}

impl DelimiterPattern {
    /// 编译分隔符列表
    ///
    /// 例如前端配置 `["。", "？", "\\s", "\\n"]`
    pub fn compile<S: AsRef<str>>(char_list: &[S]) -> Self {
        let class: String = char_list
            .iter()
            .map(|ch| match ch.as_ref() {
                NEWLINE_TOKEN => "\n".to_string(),
                WHITESPACE_TOKEN => r"\s".to_string(),
                other => regex::escape(other),
            })
            .collect();

        if class.is_empty() {
            tracing::debug!("Empty delimiter list, text will not be split");
            return Self::never();
        }

        let pattern = format!("[{}]+", class);
        match Regex::new(&pattern) {
            Ok(regex) => Self { regex: Some(regex) },
            Err(e) => {
                tracing::warn!(pattern = %pattern, error = %e, "Invalid delimiter pattern, splitting disabled");
                Self::never()
            }
        }
    }

    /// 不匹配任何内容的模式
    pub fn never() -> Self {
        Self { regex: None }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.regex.as_ref().map(Regex::as_str)
    }

    /// 整段文本是否都是分隔符
    pub fn is_delimiter(&self, text: &str) -> bool {
        match &self.regex {
            Some(regex) => regex
                .find(text)
                .map_or(false, |m| m.start() == 0 && m.end() == text.len()),
            None => false,
        }
    }

    /// 按分隔符拆分，保留分隔符本身，丢弃空片段
    pub fn split<'a>(&self, text: &'a str) -> Vec<Token<'a>> {
        let Some(regex) = &self.regex else {
            return if text.is_empty() {
                Vec::new()
            } else {
                vec![Token::Literal(text)]
            };
        };

        let mut tokens = Vec::new();
        let mut last = 0;

        for m in regex.find_iter(text) {
            if m.start() > last {
                tokens.push(Token::Literal(&text[last..m.start()]));
            }
            tokens.push(Token::Delimiter(m.as_str()));
            last = m.end();
        }

        if last < text.len() {
            tokens.push(Token::Literal(&text[last..]));
        }

        tokens
    }
}

impl Default for DelimiterPattern {
    fn default() -> Self {
        Self::never()
    }
}
