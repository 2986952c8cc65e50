//! Message Transport Port - 消息发送抽象
//!
//! 定义向会话发送一段消息的接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::ContentUnit;

/// 发送错误
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Message rejected: {0}")]
    Rejected(String),

    #[error("Send timeout")]
    Timeout,
}

/// Message Transport Port
///
/// 外部消息平台的发送接口，失败不影响后续分段
#[async_trait]
pub trait MessageTransportPort: Send + Sync {
    /// 向目标会话发送一组内容单元
    async fn send(&self, destination: &str, units: &[ContentUnit]) -> Result<(), TransportError>;
}
