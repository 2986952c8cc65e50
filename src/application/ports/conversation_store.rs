//! Conversation Store Port - 会话内存状态
//!
//! 按会话 ID 保存最近的 Bot 消息、被插话记录与昵称表，
//! 具体实现在 infrastructure/memory 层

use std::collections::VecDeque;

/// Bot 消息缓存容量
pub const BOT_MESSAGE_CAPACITY: usize = 5;
/// 插话记录容量
pub const INTERRUPTION_CAPACITY: usize = 10;

/// 单个会话的内存状态
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationState {
    pub conversation_id: String,
    /// 最近发送的 Bot 消息
    bot_messages: VecDeque<String>,
    /// 被顶掉的消息
    interruptions: VecDeque<String>,
    /// 昵称 -> ID（保持插入顺序）
    name_to_id: Vec<(String, String)>,
}

fn push_bounded(buf: &mut VecDeque<String>, capacity: usize, item: String) {
    if buf.len() == capacity {
        buf.pop_front();
    }
    buf.push_back(item);
}

impl ConversationState {
    pub fn new(conversation_id: impl Into<String>) -> Self {
        Self {
            conversation_id: conversation_id.into(),
            bot_messages: VecDeque::with_capacity(BOT_MESSAGE_CAPACITY),
            interruptions: VecDeque::with_capacity(INTERRUPTION_CAPACITY),
            name_to_id: Vec::new(),
        }
    }

    pub fn record_bot_message(&mut self, text: impl Into<String>) {
        push_bounded(&mut self.bot_messages, BOT_MESSAGE_CAPACITY, text.into());
    }

    pub fn record_interruption(&mut self, marker: impl Into<String>) {
        push_bounded(&mut self.interruptions, INTERRUPTION_CAPACITY, marker.into());
    }

    /// 记录昵称；已存在的昵称原位更新
    pub fn remember_name(&mut self, name: impl Into<String>, id: impl Into<String>) {
        let name = name.into();
        let id = id.into();
        match self.name_to_id.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = id,
            None => self.name_to_id.push((name, id)),
        }
    }

    pub fn lookup_name(&self, name: &str) -> Option<&str> {
        self.name_to_id
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, id)| id.as_str())
    }

    pub fn bot_messages(&self) -> impl Iterator<Item = &str> {
        self.bot_messages.iter().map(String::as_str)
    }

    pub fn interruptions(&self) -> impl Iterator<Item = &str> {
        self.interruptions.iter().map(String::as_str)
    }

    pub fn names(&self) -> impl Iterator<Item = (&str, &str)> {
        self.name_to_id.iter().map(|(n, id)| (n.as_str(), id.as_str()))
    }
}

/// Conversation Store Port
///
/// 会话状态在首次访问时创建，通过引用传给需要它的组件
pub trait ConversationStorePort: Send + Sync {
    /// 获取会话状态快照（不存在则创建）
    fn get_or_create(&self, conversation_id: &str) -> ConversationState;

    /// 在会话状态上执行修改（不存在则创建）
    fn with_state(&self, conversation_id: &str, f: &mut dyn FnMut(&mut ConversationState));

    /// 移除会话状态，返回是否存在
    fn remove(&self, conversation_id: &str) -> bool;

    /// 获取所有会话 ID
    fn list_all(&self) -> Vec<String>;
}
