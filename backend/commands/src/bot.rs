//! The bot facade: one inbound chat message in, the replies to post out.
use std::sync::Arc;

use anyhow::Result;
use deploybot_config::DeployBotConfig;
use deploybot_core::ChatMessage;
use deploybot_github::DeploymentApi;
use tracing::debug;

use crate::detection::detect_command;
use crate::dispatch::{CommandContext, CommandDispatcher};
use crate::registry::CommandRegistry;

pub struct Bot {
    registry: CommandRegistry,
    dispatcher: CommandDispatcher,
}

impl Bot {
    pub fn new(config: Arc<DeployBotConfig>, api: Arc<dyn DeploymentApi>) -> Self {
        Self {
            registry: CommandRegistry::new(),
            dispatcher: crate::build_dispatcher(config, api),
        }
    }

    /// Handle one message. Messages that match no route produce no replies.
    pub async fn handle_message(&self, message: ChatMessage) -> Result<Vec<String>> {
        let Some(inv) = detect_command(&message.body, &self.registry) else {
            debug!(body = %message.body, "Ignoring message with no command");
            return Ok(Vec::new());
        };
        let ctx = CommandContext { message };
        let response = self.dispatcher.dispatch(&ctx, &inv).await?;
        Ok(response.replies)
    }
}
