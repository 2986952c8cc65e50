//! Fake Transport - 用于测试的发送器
//!
//! 在内存中记录每次成功发送，可配置在指定调用次序上失败

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::application::ports::{MessageTransportPort, TransportError};
use crate::domain::ContentUnit;

/// 一次成功的发送
#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    pub destination: String,
    pub units: Vec<ContentUnit>,
}

/// Fake Transport
pub struct FakeTransport {
    deliveries: Mutex<Vec<Delivery>>,
    /// 需要失败的调用次序（从 0 开始）
    fail_on: HashSet<usize>,
    attempts: AtomicUsize,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::failing_at(&[])
    }

    /// 在第 `calls` 次调用时返回网络错误
    pub fn failing_at(calls: &[usize]) -> Self {
        Self {
            deliveries: Mutex::new(Vec::new()),
            fail_on: calls.iter().copied().collect(),
            attempts: AtomicUsize::new(0),
        }
    }

    pub fn deliveries(&self) -> Vec<Delivery> {
        self.deliveries
            .lock()
            .map(|d| d.clone())
            .unwrap_or_else(|e| e.into_inner().clone())
    }

    /// 总调用次数（含失败）
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl Default for FakeTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessageTransportPort for FakeTransport {
    async fn send(&self, destination: &str, units: &[ContentUnit]) -> Result<(), TransportError> {
        let call = self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail_on.contains(&call) {
            tracing::debug!(call = call, destination = %destination, "FakeTransport: simulated failure");
            return Err(TransportError::Network(format!("simulated failure on call {}", call)));
        }

        let mut deliveries = self
            .deliveries
            .lock()
            .map_err(|e| TransportError::Rejected(e.to_string()))?;
        deliveries.push(Delivery {
            destination: destination.to_string(),
            units: units.to_vec(),
        });
        Ok(())
    }
}
