pub mod error;
pub mod identity;
pub mod message;

pub use error::DeployBotError;
pub use identity::{display_handle, ChatRoom, ChatUser, UNKNOWN_HANDLE};
pub use message::ChatMessage;
