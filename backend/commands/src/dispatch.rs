//! Command dispatch: route detected commands to handlers.
use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use deploybot_core::ChatMessage;
use tracing::info;

use crate::types::CommandInvocation;

// ---------------------------------------------------------------------------
// Handler trait
// ---------------------------------------------------------------------------

/// Context passed to every command handler.
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub message: ChatMessage,
}

/// Replies a handler wants posted back to the room, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandResponse {
    pub replies: Vec<String>,
}

impl CommandResponse {
    pub fn reply(text: impl Into<String>) -> Self {
        Self {
            replies: vec![text.into()],
        }
    }

    pub fn replies(replies: Vec<String>) -> Self {
        Self { replies }
    }
}

#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn handle(&self, ctx: &CommandContext, inv: &CommandInvocation) -> Result<CommandResponse>;
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

pub struct CommandDispatcher {
    handlers: HashMap<String, Arc<dyn CommandHandler>>,
}

impl CommandDispatcher {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    pub fn register(&mut self, key: impl Into<String>, handler: Arc<dyn CommandHandler>) {
        self.handlers.insert(key.into(), handler);
    }

    pub async fn dispatch(
        &self,
        ctx: &CommandContext,
        inv: &CommandInvocation,
    ) -> Result<CommandResponse> {
        if let Some(handler) = self.handlers.get(&inv.key) {
            let user = ctx.message.user.as_ref().map(|u| u.mention_name.as_str());
            info!(command = %inv.key, user = ?user, "Dispatching command");
            handler.handle(ctx, inv).await
        } else {
            Ok(CommandResponse::reply(format!(
                "No handler registered for command {}",
                inv.key
            )))
        }
    }
}

impl Default for CommandDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
