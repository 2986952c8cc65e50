//! In-Memory Conversation Store Implementation

use dashmap::DashMap;

use crate::application::ports::{ConversationState, ConversationStorePort};

/// 内存会话状态表
pub struct InMemoryConversationStore {
    states: DashMap<String, ConversationState>,
}

impl InMemoryConversationStore {
    pub fn new() -> Self {
        Self {
            states: DashMap::new(),
        }
    }
}

impl Default for InMemoryConversationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationStorePort for InMemoryConversationStore {
    fn get_or_create(&self, conversation_id: &str) -> ConversationState {
        self.states
            .entry(conversation_id.to_string())
            .or_insert_with(|| {
                tracing::debug!(conversation_id = %conversation_id, "Conversation state created");
                ConversationState::new(conversation_id)
            })
            .clone()
    }

    fn with_state(&self, conversation_id: &str, f: &mut dyn FnMut(&mut ConversationState)) {
        let mut state = self
            .states
            .entry(conversation_id.to_string())
            .or_insert_with(|| ConversationState::new(conversation_id));
        f(state.value_mut());
    }

    fn remove(&self, conversation_id: &str) -> bool {
        self.states.remove(conversation_id).is_some()
    }

    fn list_all(&self) -> Vec<String> {
        self.states.iter().map(|e| e.key().clone()).collect()
    }
}
