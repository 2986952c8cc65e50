//! 消息分段器
//!
//! 把一条消息的组件序列拆成若干逻辑分段：
//! 1. Reply / Mention 绑定到后一个分段
//! 2. Plain 文本只在分隔符处断开，分隔符保留在所结束的分段末尾
//! 3. Image / Sticker 跟随当前或上一个分段
//! 4. 其他组件独立成段
//! 5. 超过最大分段数时合并到最后一个分段

use super::content::{ContentUnit, Segment};
use super::delimiter::{DelimiterPattern, Token};

/// 分段器
#[derive(Debug, Clone)]
pub struct Segmenter {
    pattern: DelimiterPattern,
    /// 最大分段数（<=0 表示不限制）
    max_count: i64,
}

/// 单次分段过程中的状态
struct SplitState<'a> {
    max_count: i64,
    segments: Vec<Segment>,
    current: Segment,
    /// 必须绑定到 "下一个 segment" 的组件，例如 Reply / Mention
    pending_prefix: Vec<ContentUnit>,
    pattern: &'a DelimiterPattern,
}

impl<'a> SplitState<'a> {
    fn new(pattern: &'a DelimiterPattern, max_count: i64) -> Self {
        Self {
            max_count,
            segments: Vec::new(),
            current: Segment::new(),
            pending_prefix: Vec::new(),
            pattern,
        }
    }

    /// 将 segment 推入列表，并处理 max_count 限制
    fn push(&mut self, seg: Segment) {
        if !seg.has_units() {
            return;
        }

        let at_cap = self.max_count > 0 && self.segments.len() as i64 >= self.max_count;
        if at_cap {
            // 超出限制则合并到最后一个 segment
            if let Some(last) = self.segments.last_mut() {
                last.extend(seg.into_units());
            }
        } else {
            self.segments.push(seg);
        }
    }

    /// 提交当前 segment
    fn flush(&mut self) {
        if self.current.has_units() {
            let seg = std::mem::take(&mut self.current);
            self.push(seg);
        }
    }

    fn drain_prefix(&mut self) {
        if !self.pending_prefix.is_empty() {
            self.current.extend(self.pending_prefix.drain(..));
        }
    }

    /// 把缓冲文本作为一个 Plain 追加到当前分段
    fn append_text(&mut self, text: String) {
        self.drain_prefix();
        self.current.append(ContentUnit::Plain(text));
    }

    fn accept(&mut self, unit: ContentUnit) {
        match unit {
            ContentUnit::Mention(_) | ContentUnit::Reply(_) => self.pending_prefix.push(unit),
            ContentUnit::Plain(text) => self.accept_text(&text),
            ContentUnit::Image(_) | ContentUnit::Sticker(_) => {
                if self.current.has_units() {
                    self.current.append(unit);
                } else if let Some(last) = self.segments.last_mut() {
                    last.append(unit);
                } else {
                    self.push(Segment::from_units(vec![unit]));
                }
            }
            ContentUnit::Other(_) => {
                self.flush();
                if !self.pending_prefix.is_empty() {
                    let prefix = std::mem::take(&mut self.pending_prefix);
                    self.push(Segment::from_units(prefix));
                }
                self.push(Segment::from_units(vec![unit]));
            }
        }
    }

    fn accept_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }

        let pattern = self.pattern;
        let mut buf = String::new();

        for token in pattern.split(text) {
            match token {
                // 命中分隔符：形成一个完整 segment
                Token::Delimiter(delim) => {
                    buf.push_str(delim);
                    self.append_text(std::mem::take(&mut buf));
                    self.flush();
                }
                Token::Literal(part) => {
                    if !buf.is_empty() {
                        self.append_text(std::mem::take(&mut buf));
                    }
                    buf.push_str(part);
                }
            }
        }

        // 剩余文本留在当前分段，不主动断开
        if !buf.is_empty() {
            self.append_text(buf);
        }
    }

    fn finish(mut self) -> Vec<Segment> {
        self.flush();
        if !self.pending_prefix.is_empty() {
            let prefix = std::mem::take(&mut self.pending_prefix);
            self.push(Segment::from_units(prefix));
        }
        self.segments
    }
}

impl Segmenter {
    pub fn new(pattern: DelimiterPattern, max_count: i64) -> Self {
        Self { pattern, max_count }
    }

    pub fn pattern(&self) -> &DelimiterPattern {
        &self.pattern
    }

    /// 拆分并去除每段末尾的句尾符号
    pub fn segment(&self, chain: Vec<ContentUnit>) -> Vec<Segment> {
        let mut segments = self.segment_untrimmed(chain);
        for seg in &mut segments {
            seg.strip_tail_punctuation();
        }
        segments
    }

    /// 拆分核心逻辑（不做句尾符号处理）
    pub fn segment_untrimmed(&self, chain: Vec<ContentUnit>) -> Vec<Segment> {
        let mut state = SplitState::new(&self.pattern, self.max_count);
        for unit in chain {
            state.accept(unit);
        }
        state.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(text: &str) -> ContentUnit {
        ContentUnit::plain(text)
    }

    fn segmenter(chars: &[&str], max_count: i64) -> Segmenter {
        Segmenter::new(DelimiterPattern::compile(chars), max_count)
    }

    fn all_text(segments: &[Segment]) -> String {
        segments.iter().map(Segment::text).collect()
    }

    #[test]
    fn test_split_on_delimiter() {
        let s = segmenter(&["。"], 0);
        let segments = s.segment_untrimmed(vec![plain("你好。今天天气不错")]);

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].units(), &[plain("你好。")]);
        assert_eq!(segments[1].units(), &[plain("今天天气不错")]);

        let trimmed = s.segment(vec![plain("你好。今天天气不错")]);
        assert_eq!(trimmed[0].units(), &[plain("你好")]);
        assert_eq!(trimmed[1].units(), &[plain("今天天气不错")]);
    }

    #[test]
    fn test_reply_binds_to_following_text() {
        let s = segmenter(&["。"], 0);
        let segments = s.segment(vec![ContentUnit::Reply("1".into()), plain("稍等,我查一下。")]);

        assert_eq!(segments.len(), 1);
        assert_eq!(
            segments[0].units(),
            &[ContentUnit::Reply("1".into()), plain("稍等,我查一下")]
        );
    }

    #[test]
    fn test_plain_units_not_merged_without_delimiter() {
        let s = segmenter(&["。"], 0);
        let segments = s.segment(vec![plain("a"), plain("b"), plain("c")]);

        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].units(), &[plain("a"), plain("b"), plain("c")]);
    }

    #[test]
    fn test_max_count_merges_into_last() {
        let s = segmenter(&["。"], 1);
        let segments = s.segment_untrimmed(vec![plain("一。二。三")]);

        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].units(), &[plain("一。"), plain("二。"), plain("三")]);
    }

    #[test]
    fn test_merge_then_trim_only_touches_tail() {
        let s = segmenter(&["。"], 2);
        let segments = s.segment(vec![plain("一。二。三。")]);

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].units(), &[plain("一")]);
        // 合并进来的 "二。" 位于中间，不受影响；末尾的 "三。" 被去掉句号
        assert_eq!(segments[1].units(), &[plain("二。"), plain("三")]);
    }

    #[test]
    fn test_merge_then_trim_strips_absorbed_tail() {
        let s = segmenter(&["。"], 1);
        let segments = s.segment(vec![plain("一。"), ContentUnit::Other(serde_json::json!("x")), plain("二。")]);

        assert_eq!(segments.len(), 1);
        assert_eq!(
            segments[0].units(),
            &[plain("一。"), ContentUnit::Other(serde_json::json!("x")), plain("二")]
        );
    }

    #[test]
    fn test_merge_then_trim_reaches_past_absorbed_media() {
        let s = segmenter(&["。"], 1);
        let segments = s.segment(vec![plain("一。"), ContentUnit::Other(serde_json::json!("x"))]);

        // 合并后 "一。" 不再处于结构末尾，但仍是最后一个 Plain
        assert_eq!(
            segments[0].units(),
            &[plain("一"), ContentUnit::Other(serde_json::json!("x"))]
        );
    }

    #[test]
    fn test_image_alone() {
        let s = segmenter(&["。"], 0);
        let segments = s.segment(vec![ContentUnit::Image("ref".into())]);

        assert_eq!(segments, vec![Segment::from_units(vec![ContentUnit::Image("ref".into())])]);
    }

    #[test]
    fn test_image_follows_open_segment() {
        let s = segmenter(&["。"], 0);
        let segments = s.segment_untrimmed(vec![plain("看"), ContentUnit::Image("a".into()), plain("。后面")]);

        assert_eq!(segments.len(), 2);
        assert_eq!(
            segments[0].units(),
            &[plain("看"), ContentUnit::Image("a".into()), plain("。")]
        );
    }

    #[test]
    fn test_image_follows_last_completed_segment() {
        let s = segmenter(&["。"], 0);
        let segments = s.segment(vec![plain("看这个。"), ContentUnit::Sticker("s".into()), plain("好")]);

        assert_eq!(segments.len(), 2);
        assert_eq!(
            segments[0].units(),
            &[plain("看这个"), ContentUnit::Sticker("s".into())]
        );
        assert_eq!(segments[1].units(), &[plain("好")]);
    }

    #[test]
    fn test_other_stands_alone() {
        let s = segmenter(&["。"], 0);
        let other = ContentUnit::Other(serde_json::json!({"kind": "file"}));
        let segments = s.segment(vec![
            plain("前"),
            ContentUnit::Mention("42".into()),
            other.clone(),
            plain("后"),
        ]);

        assert_eq!(segments.len(), 4);
        assert_eq!(segments[0].units(), &[plain("前")]);
        assert_eq!(segments[1].units(), &[ContentUnit::Mention("42".into())]);
        assert_eq!(segments[2].units(), &[other]);
        assert_eq!(segments[3].units(), &[plain("后")]);
    }

    #[test]
    fn test_trailing_binding_units_become_own_segment() {
        let s = segmenter(&["。"], 0);
        let segments = s.segment(vec![
            plain("好的。"),
            ContentUnit::Mention("1".into()),
            ContentUnit::Reply("2".into()),
        ]);

        assert_eq!(segments.len(), 2);
        assert_eq!(
            segments[1].units(),
            &[ContentUnit::Mention("1".into()), ContentUnit::Reply("2".into())]
        );
    }

    #[test]
    fn test_mention_attaches_to_next_segment() {
        let s = segmenter(&["。"], 0);
        let segments = s.segment_untrimmed(vec![
            plain("第一句。"),
            ContentUnit::Mention("7".into()),
            plain("第二句。"),
        ]);

        assert_eq!(segments.len(), 2);
        assert_eq!(
            segments[1].units(),
            &[ContentUnit::Mention("7".into()), plain("第二句。")]
        );
    }

    #[test]
    fn test_delimiter_runs_collapse() {
        let s = segmenter(&[",", "。"], 0);
        let segments = s.segment_untrimmed(vec![plain("嗯,,,。好")]);

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].units(), &[plain("嗯,,,。")]);
    }

    #[test]
    fn test_empty_plain_ignored() {
        let s = segmenter(&["。"], 0);
        assert!(s.segment(vec![plain("")]).is_empty());
        assert!(s.segment(Vec::new()).is_empty());
    }

    #[test]
    fn test_empty_delimiter_config_passes_through() {
        let s = segmenter(&[], 0);
        let segments = s.segment_untrimmed(vec![plain("一。二。")]);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].units(), &[plain("一。二。")]);
    }

    #[test]
    fn test_text_is_preserved_before_trim() {
        let s = segmenter(&["。", "\\s", "\\n"], 0);
        let input = vec![
            ContentUnit::Reply("9".into()),
            plain(" 开头 空格。\n\n第二行"),
            ContentUnit::Image("i".into()),
            plain("。。尾巴 "),
        ];
        let expected: String = input.iter().filter_map(ContentUnit::as_text).collect();

        let segments = s.segment_untrimmed(input);
        assert_eq!(all_text(&segments), expected);
    }

    #[test]
    fn test_cap_never_exceeded_and_binding_kept() {
        for cap in 1..=4 {
            let s = segmenter(&["。", "\\s"], cap);
            let segments = s.segment(vec![
                ContentUnit::Mention("a".into()),
                plain("一。二 三。四"),
                ContentUnit::Reply("b".into()),
                ContentUnit::Other(serde_json::json!(1)),
                plain("五。"),
                ContentUnit::Mention("c".into()),
            ]);

            assert!(segments.len() as i64 <= cap);
            let bindings: usize = segments
                .iter()
                .map(|seg| seg.units().iter().filter(|u| matches!(u, ContentUnit::Mention(_) | ContentUnit::Reply(_))).count())
                .sum();
            assert_eq!(bindings, 3);
        }
    }

    #[test]
    fn test_unlimited_count_follows_boundaries() {
        let s = segmenter(&["。"], 0);
        let segments = s.segment(vec![plain("一。二。三。四。五。")]);
        assert_eq!(segments.len(), 5);

        let s = segmenter(&["。"], -3);
        assert_eq!(s.segment(vec![plain("一。二。三。")]).len(), 3);
    }

    #[test]
    fn test_leading_delimiter_yields_blank_segment() {
        let s = segmenter(&["。"], 0);
        let segments = s.segment(vec![plain("。你好")]);

        // 空白分段保留在列表中，由发送端跳过，文本不丢失
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].units(), &[plain("")]);
        assert!(segments[0].is_empty());
        assert!(!segments[1].is_empty());

        let untrimmed = s.segment_untrimmed(vec![plain("。你好")]);
        assert_eq!(all_text(&untrimmed), "。你好");
    }
}
