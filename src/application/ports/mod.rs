//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod conversation_store;
mod transport;

pub use conversation_store::{
    ConversationState, ConversationStorePort, BOT_MESSAGE_CAPACITY, INTERRUPTION_CAPACITY,
};
pub use transport::{MessageTransportPort, TransportError};
