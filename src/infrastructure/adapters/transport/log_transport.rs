//! Log Transport - 把消息写入日志
//!
//! 不连接任何消息平台，命令行演示时使用

use async_trait::async_trait;

use crate::application::ports::{MessageTransportPort, TransportError};
use crate::domain::ContentUnit;

/// 日志发送器
#[derive(Debug, Default)]
pub struct LogTransport;

impl LogTransport {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MessageTransportPort for LogTransport {
    async fn send(&self, destination: &str, units: &[ContentUnit]) -> Result<(), TransportError> {
        let payload =
            serde_json::to_string(units).map_err(|e| TransportError::Rejected(e.to_string()))?;
        tracing::info!(destination = %destination, units = units.len(), payload = %payload, "Segment sent");
        Ok(())
    }
}
