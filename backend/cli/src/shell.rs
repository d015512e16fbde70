//! Local chat adapter: feeds stdin lines (or one message) to the bot as if
//! they were posted in a chat room.

use anyhow::Result;
use deploybot_commands::Bot;
use deploybot_core::{ChatMessage, ChatRoom, ChatUser, DeployBotError};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{info, warn};

use crate::terminal_output::{note_error, print_reply, prompt, supports_color};

/// Who is "speaking" and where, for every message sent from this terminal.
#[derive(Debug, Clone, Default)]
pub struct Speaker {
    pub user: Option<ChatUser>,
    pub room: Option<ChatRoom>,
}

impl Speaker {
    pub fn new(user: Option<String>, room: Option<String>) -> Self {
        Self {
            user: user.map(ChatUser::from_handle),
            room: room.map(|name| ChatRoom::new(name.clone(), name)),
        }
    }

    pub fn message(&self, body: impl Into<String>) -> ChatMessage {
        ChatMessage {
            body: body.into(),
            user: self.user.clone(),
            room: self.room.clone(),
        }
    }
}

/// Send one message and print whatever the bot answers.
pub async fn say(bot: &Bot, speaker: &Speaker, body: &str) -> Result<()> {
    for reply in bot.handle_message(speaker.message(body)).await? {
        print_reply(&reply);
    }
    Ok(())
}

/// Read messages from stdin until EOF or `exit`.
pub async fn run(bot: &Bot, speaker: &Speaker) -> Result<()> {
    let color = supports_color();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    info!(user = ?speaker.user.as_ref().map(|u| &u.mention_name), "Shell started");
    loop {
        stdout.write_all(prompt(color).as_bytes()).await?;
        stdout.flush().await?;

        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => return Err(DeployBotError::InputClosed(e.to_string()).into()),
        };
        let body = line.trim();
        if body.is_empty() {
            continue;
        }
        if body == "exit" {
            break;
        }

        // One bad message shouldn't end the session.
        if let Err(e) = say(bot, speaker, body).await {
            warn!(error = %e, "Message failed");
            note_error(&e.to_string());
        }
    }
    info!("Shell closed");
    Ok(())
}
