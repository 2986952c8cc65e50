//! 消息分段发送
//!
//! 把一条消息拆成多段，除最后一段外逐段发送并按打字延迟等待，
//! 最后一段回填到原消息中交给主流程继续处理

use std::sync::Arc;

use crate::application::ports::MessageTransportPort;
use crate::config::SplitConfig;
use crate::domain::{ContentUnit, DelayModel, DelimiterPattern, Segment, Segmenter, TypingDelay};

/// 单段发送结果
#[derive(Debug, Clone, PartialEq)]
pub enum DeliveryStatus {
    Sent,
    /// 空段不发送
    SkippedEmpty,
    Failed(String),
}

/// 分段发送记录
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentOutcome {
    /// 分段下标（从 0 开始）
    pub index: usize,
    /// 分段文本
    pub text: String,
    pub status: DeliveryStatus,
}

/// 一次分段发送的汇总
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeliveryReport {
    /// 分段总数（含回填的最后一段）
    pub total_segments: usize,
    /// 已处理的分段（不含最后一段）
    pub outcomes: Vec<SegmentOutcome>,
}

impl DeliveryReport {
    /// 消息是否被拆分发送
    pub fn was_split(&self) -> bool {
        self.total_segments > 1
    }

    pub fn sent_count(&self) -> usize {
        self.sent().count()
    }

    pub fn failed_count(&self) -> usize {
        self.failures().count()
    }

    /// 已成功发送的分段
    pub fn sent(&self) -> impl Iterator<Item = &SegmentOutcome> {
        self.outcomes
            .iter()
            .filter(|o| o.status == DeliveryStatus::Sent)
    }

    pub fn failures(&self) -> impl Iterator<Item = &SegmentOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, DeliveryStatus::Failed(_)))
    }
}

/// 消息分段器
pub struct MessageSplitter {
    segmenter: Segmenter,
    delay_model: DelayModel,
    transport: Arc<dyn MessageTransportPort>,
}

impl MessageSplitter {
    pub fn new(
        segmenter: Segmenter,
        delay_model: DelayModel,
        transport: Arc<dyn MessageTransportPort>,
    ) -> Self {
        Self {
            segmenter,
            delay_model,
            transport,
        }
    }

    /// 从配置创建，typing_delay 解析失败时使用默认值
    pub fn from_config(config: &SplitConfig, transport: Arc<dyn MessageTransportPort>) -> Self {
        let segmenter = Segmenter::new(DelimiterPattern::compile(config.char_list.as_slice()), config.max_count);
        let delay_model = DelayModel::new(TypingDelay::parse_or_default(&config.typing_delay));

        tracing::debug!(
            pattern = ?segmenter.pattern().as_str(),
            max_count = config.max_count,
            min_delay = delay_model.delay.min,
            max_delay = delay_model.delay.max,
            "MessageSplitter initialized"
        );

        Self::new(segmenter, delay_model, transport)
    }

    pub fn delay_model(&self) -> &DelayModel {
        &self.delay_model
    }

    pub fn segment(&self, chain: Vec<ContentUnit>) -> Vec<Segment> {
        self.segmenter.segment(chain)
    }

    /// 对消息进行拆分并发送
    ///
    /// 分段数 <= 1 时不做任何处理；否则最后一段回填到 `chain` 中
    pub async fn dispatch(&self, destination: &str, chain: &mut Vec<ContentUnit>) -> DeliveryReport {
        let mut segments = self.segmenter.segment(chain.clone());
        let total = segments.len();

        let mut report = DeliveryReport {
            total_segments: total,
            outcomes: Vec::new(),
        };

        if total <= 1 {
            return report;
        }

        tracing::debug!(destination = %destination, segments = total, "消息被分段");

        // 逐段发送（最后一段不立即发）
        let Some(last) = segments.pop() else {
            return report;
        };
        // 最后一个会被发送的分段之后不再等待
        let last_dispatched = segments.iter().rposition(|seg| !seg.is_empty());

        for (index, seg) in segments.iter().enumerate() {
            let text = seg.text();
            if seg.is_empty() {
                report.outcomes.push(SegmentOutcome {
                    index,
                    text,
                    status: DeliveryStatus::SkippedEmpty,
                });
                continue;
            }

            let status = match self.transport.send(destination, seg.units()).await {
                Ok(()) => {
                    if last_dispatched.map_or(false, |last| index < last) {
                        let delay = self.delay_model.delay_for(text.chars().count());
                        tokio::time::sleep(delay).await;
                    }
                    DeliveryStatus::Sent
                }
                Err(e) => {
                    tracing::error!(
                        destination = %destination,
                        segment = index + 1,
                        error = %e,
                        "发送分段失败"
                    );
                    DeliveryStatus::Failed(e.to_string())
                }
            };

            report.outcomes.push(SegmentOutcome { index, text, status });
        }

        // 最后一段回填给主流程继续处理
        chain.clear();
        if !last.is_empty() {
            chain.extend(last.into_units());
        }

        tracing::info!(
            destination = %destination,
            total = total,
            sent = report.sent_count(),
            failed = report.failed_count(),
            "分段发送完成"
        );

        report
    }
}
