//! Deploy request: a parsed command resolved against app config and the caller.
//!
//! A [`DeployRequest`] is built once per inbound message and read through its
//! accessors: the handler uses `repo`, `git_ref`, `env`, `task`, `auto_merge`,
//! `is_forced` and `payload` to create the remote deployment, then `reply`
//! for the chat confirmation.

use deploybot_config::AppConfig;
use deploybot_core::{ChatRoom, ChatUser, display_handle};
use deploybot_github::DeploymentOptions;
use deploybot_logging::{BotEvent, EventLogger};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::intent::{CommandKind, DeployIntent};

pub const DEFAULT_REF: &str = "master";
pub const DEFAULT_ENV: &str = "production";
pub const DEFAULT_AUTO_MERGE: bool = true;

#[derive(Debug, Error)]
pub enum DeployError {
    #[error("no repo configured for app '{app}'")]
    MissingRepo { app: String },

    /// A reply was asked for text the parser never recognized. Routing only
    /// hands recognized commands to handlers, so this marks a routing bug.
    #[error("no reply for unrecognized command: {message}")]
    UnknownReply { message: String },

    #[error("not a deploy, lock or unlock command: {message}")]
    Unrecognized { message: String },
}

/// Map shorthand environment names to their canonical name.
pub fn alias_environment(env: &str) -> &str {
    match env {
        "stg" => "staging",
        "prod" | "prd" => "production",
        other => other,
    }
}

#[derive(Debug, Clone)]
pub struct DeployRequest {
    message: String,
    intent: DeployIntent,
    config: AppConfig,
    user: Option<ChatUser>,
    room: Option<ChatRoom>,
    git_ref: String,
    environment: String,
    auto_merge_on_standard_deploys: bool,
}

impl DeployRequest {
    /// Parse `message` and fill in defaults from `config`.
    ///
    /// Text beats config, config beats the built-in defaults.
    pub fn new(message: impl Into<String>, config: &AppConfig) -> Self {
        let message = message.into();
        let intent = DeployIntent::parse(&message);
        let target = intent.target();

        let git_ref = target
            .and_then(|t| t.git_ref.clone())
            .or_else(|| config.default_ref.clone())
            .unwrap_or_else(|| DEFAULT_REF.to_string());
        let environment = target
            .and_then(|t| t.environment.clone())
            .or_else(|| config.default_env.clone())
            .unwrap_or_else(|| DEFAULT_ENV.to_string());
        let auto_merge_on_standard_deploys = config
            .auto_merge_on_standard_deploys
            .unwrap_or(DEFAULT_AUTO_MERGE);

        Self {
            message,
            intent,
            config: config.clone(),
            user: None,
            room: None,
            git_ref,
            environment,
            auto_merge_on_standard_deploys,
        }
    }

    pub fn from_user(mut self, user: Option<ChatUser>) -> Self {
        self.user = user;
        self
    }

    pub fn in_room(mut self, room: Option<ChatRoom>) -> Self {
        self.room = room;
        self
    }

    pub fn git_ref(&self) -> &str {
        &self.git_ref
    }

    /// Environment as typed (or defaulted), before aliasing.
    pub fn raw_environment(&self) -> &str {
        &self.environment
    }

    pub fn env(&self) -> &str {
        alias_environment(&self.environment)
    }

    /// `None` for unrecognized text.
    pub fn task(&self) -> Option<&'static str> {
        self.intent.command().map(CommandKind::task)
    }

    pub fn is_forced(&self) -> bool {
        self.intent.is_forced()
    }

    /// Forced deploys never auto-merge.
    pub fn auto_merge(&self) -> bool {
        !self.is_forced() && self.auto_merge_on_standard_deploys
    }

    pub fn repo(&self) -> Result<&str, DeployError> {
        self.config
            .repo
            .as_deref()
            .ok_or_else(|| DeployError::MissingRepo {
                app: self.intent.app().unwrap_or_default().to_string(),
            })
    }

    /// Display handle of the caller, `unknown` when there is none.
    pub fn actor(&self) -> &str {
        display_handle(self.user.as_ref())
    }

    pub fn reply(&self) -> Result<String, DeployError> {
        let handle = self.actor();
        match self.intent.command() {
            Some(command @ (CommandKind::Lock | CommandKind::Unlock)) => Ok(format!(
                "{handle} is {}ing {} in {}",
                command.as_str(),
                self.repo()?,
                self.env()
            )),
            Some(CommandKind::Deploy) => {
                let verb = if self.is_forced() {
                    "force deploying"
                } else {
                    "deploying"
                };
                Ok(format!(
                    "{handle} is {verb} {}/{} to {}",
                    self.repo()?,
                    self.git_ref,
                    self.env()
                ))
            }
            None => {
                EventLogger::log_event(self.unknown_reply_event());
                Err(DeployError::UnknownReply {
                    message: self.message.clone(),
                })
            }
        }
    }

    /// Event recorded when a reply is requested for unrecognized text.
    fn unknown_reply_event(&self) -> BotEvent {
        BotEvent::UnknownReply {
            message: self.message.clone(),
        }
    }

    /// The app's configured payload plus `actor` and `notify`.
    ///
    /// Works on a copy; the app config is never touched.
    pub fn payload(&self) -> Map<String, Value> {
        let mut payload = self.config.payload.clone().unwrap_or_default();
        payload.insert("actor".into(), Value::String(self.actor().to_string()));

        let mut notify = Map::new();
        if let Some(user) = &self.user {
            notify.insert("user".into(), Value::String(user.mention_name.clone()));
        }
        if let Some(room) = &self.room {
            notify.insert("room".into(), Value::String(room.name.clone()));
        }
        payload.insert("notify".into(), Value::Object(notify));
        payload
    }

    /// Options for the create-deployment call. Forced deploys skip every
    /// required status context.
    pub fn deployment_options(&self) -> Result<DeploymentOptions, DeployError> {
        let task = self.task().ok_or_else(|| DeployError::Unrecognized {
            message: self.message.clone(),
        })?;
        Ok(DeploymentOptions {
            environment: self.env().to_string(),
            task: task.to_string(),
            auto_merge: self.auto_merge(),
            payload: self.payload(),
            required_contexts: self.is_forced().then(Vec::new),
        })
    }
}
