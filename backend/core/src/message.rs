use serde::{Deserialize, Serialize};

use crate::identity::{ChatRoom, ChatUser};

/// An inbound chat message handed to the bot by a chat platform adapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<ChatUser>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room: Option<ChatRoom>,
}

impl ChatMessage {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            user: None,
            room: None,
        }
    }

    pub fn from_user(mut self, user: ChatUser) -> Self {
        self.user = Some(user);
        self
    }

    pub fn in_room(mut self, room: ChatRoom) -> Self {
        self.room = Some(room);
        self
    }
}
