//! Transport Adapter - 消息发送实现

mod fake_transport;
mod log_transport;

pub use fake_transport::{Delivery, FakeTransport};
pub use log_transport::LogTransport;
