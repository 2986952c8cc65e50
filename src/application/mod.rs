//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（MessageTransport、ConversationStore）
//! - splitter: 分段发送流程

pub mod ports;
pub mod splitter;

pub use ports::{
    ConversationState, ConversationStorePort, MessageTransportPort, TransportError,
};
pub use splitter::{DeliveryReport, DeliveryStatus, MessageSplitter, SegmentOutcome};
