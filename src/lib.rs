//! Chatsplit - 聊天消息分段发送
//!
//! 把 Bot 的一条回复拆成几条自然的短消息，按打字节奏逐条发送
//!
//! 领域层 (domain/):
//! - ContentUnit / Segment: 消息内容与逻辑分段
//! - DelimiterPattern: 分隔符匹配
//! - Segmenter: 分段算法
//! - DelayModel: 打字延迟
//!
//! 应用层 (application/):
//! - Ports: 端口定义（MessageTransport, ConversationStore）
//! - MessageSplitter: 分段发送流程
//!
//! 基础设施层 (infrastructure/):
//! - Adapters: LogTransport, FakeTransport
//! - Memory: InMemoryConversationStore

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use application::{DeliveryReport, MessageSplitter};
pub use config::{load_config, AppConfig};
pub use domain::{ContentUnit, Segment, Segmenter};
