//! Structured logging for deploybot.
//!
//! Handles log redaction, JSON file output with rotation, and the bot's
//! structured events (deployment created, deployment failed, unknown reply).

pub mod event_logger;
pub mod logger;
pub mod redact;

pub use event_logger::{BotEvent, EventLogEntry, EventLogger};
pub use logger::init_logger;
pub use redact::redact_sensitive_data;
