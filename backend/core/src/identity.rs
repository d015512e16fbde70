//! Chat identities supplied by the chat platform adapter.
//!
//! A message may arrive without a known sender (system messages, webhooks)
//! and without a room (direct messages). Absence is modelled with `Option`
//! and rendered through [`display_handle`].

use serde::{Deserialize, Serialize};

/// Display handle used when no real caller was supplied.
pub const UNKNOWN_HANDLE: &str = "unknown";

/// The user who sent a chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatUser {
    pub id: String,
    pub name: String,
    /// Handle used to address the user in replies (e.g. `janedoe`).
    pub mention_name: String,
}

impl ChatUser {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        mention_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            mention_name: mention_name.into(),
        }
    }

    /// A user whose id, name and mention name are all the same handle.
    pub fn from_handle(handle: impl Into<String>) -> Self {
        let handle = handle.into();
        Self::new(handle.clone(), handle.clone(), handle)
    }
}

/// The room or channel a chat message was posted in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRoom {
    pub id: String,
    pub name: String,
}

impl ChatRoom {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Handle for an optional caller, falling back to [`UNKNOWN_HANDLE`].
pub fn display_handle(user: Option<&ChatUser>) -> &str {
    user.map_or(UNKNOWN_HANDLE, |u| u.mention_name.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_handle_for_known_user() {
        let jane = ChatUser::new("123", "Jane Doe", "janedoe");
        assert_eq!(display_handle(Some(&jane)), "janedoe");
    }

    #[test]
    fn test_display_handle_for_missing_user() {
        assert_eq!(display_handle(None), UNKNOWN_HANDLE);
    }

    #[test]
    fn test_from_handle_fills_every_field() {
        let user = ChatUser::from_handle("jamesbond");
        assert_eq!(user.id, "jamesbond");
        assert_eq!(user.name, "jamesbond");
        assert_eq!(user.mention_name, "jamesbond");
    }
}
