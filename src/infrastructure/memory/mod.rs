//! Memory Layer - In-Memory State Management
//!
//! 实现 ConversationStore，按会话保存近期消息状态

mod conversation_store;

pub use conversation_store::InMemoryConversationStore;
