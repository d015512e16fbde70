//! Built-in command handlers.
//!
//! Each handler is a concrete struct implementing `CommandHandler`. Deploy and
//! lock share one handler: both record a deployment, only the task differs.
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use deploybot_config::DeployBotConfig;
use deploybot_core::UNKNOWN_HANDLE;
use deploybot_github::{DeploymentApi, DeploymentQuery, GitHubError};
use deploybot_logging::{BotEvent, EventLogger};
use serde_json::Value;
use tracing::debug;

use crate::dispatch::{CommandContext, CommandHandler, CommandResponse};
use crate::registry::CommandRegistry;
use crate::request::{DeployError, DeployRequest};
use crate::types::CommandInvocation;

/// Environments reported by "where can I deploy", in display order.
pub const WCID_ENVIRONMENTS: [&str; 3] = ["staging", "qa", "production"];

fn not_found(app: &str) -> CommandResponse {
    CommandResponse::reply(format!("{app} not found"))
}

/// App slug from the first argument, dropping any `/ref` suffix.
fn app_slug(inv: &CommandInvocation) -> &str {
    inv.args
        .first()
        .and_then(|target| target.split('/').next())
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// deploy, deploy!, lock, unlock
// ---------------------------------------------------------------------------

pub struct DeployHandler {
    pub config: Arc<DeployBotConfig>,
    pub api: Arc<dyn DeploymentApi>,
}

impl DeployHandler {
    /// Record the deployment. API failures become chat replies.
    async fn create_deployment(&self, request: &DeployRequest) -> Result<Option<CommandResponse>> {
        let repo = request.repo()?;
        let options = request.deployment_options()?;

        EventLogger::log_event(BotEvent::CreateDeployment {
            repo: repo.to_string(),
            git_ref: request.git_ref().to_string(),
            environment: options.environment.clone(),
            task: options.task.clone(),
            payload: Value::Object(options.payload.clone()).to_string(),
        });

        match self.api.create_deployment(repo, request.git_ref(), &options).await {
            Ok(deployment) => {
                debug!(id = deployment.id, repo, "Deployment created");
                Ok(None)
            }
            Err(err) => {
                EventLogger::log_event(BotEvent::DeploymentFailed {
                    repo: repo.to_string(),
                    status: err.status(),
                    error_msg: err.to_string(),
                });
                Ok(Some(failure_replies(&err)))
            }
        }
    }
}

fn failure_replies(err: &GitHubError) -> CommandResponse {
    let headline = match err.status() {
        Some(status) => format!("{status} error creating deployment"),
        None => "error creating deployment".to_string(),
    };
    CommandResponse::replies(vec![headline, err.to_string()])
}

#[async_trait]
impl CommandHandler for DeployHandler {
    async fn handle(&self, ctx: &CommandContext, inv: &CommandInvocation) -> Result<CommandResponse> {
        let app = app_slug(inv);
        let Some(app_config) = self.config.app(app) else {
            return Ok(not_found(app));
        };

        let request = DeployRequest::new(ctx.message.body.as_str(), app_config)
            .from_user(ctx.message.user.clone())
            .in_room(ctx.message.room.clone());

        if let Some(failure) = self.create_deployment(&request).await? {
            return Ok(failure);
        }
        Ok(CommandResponse::reply(request.reply()?))
    }
}

// ---------------------------------------------------------------------------
// where can I deploy / wcid
// ---------------------------------------------------------------------------

pub struct WhereCanIDeployHandler {
    pub config: Arc<DeployBotConfig>,
    pub api: Arc<dyn DeploymentApi>,
}

#[async_trait]
impl CommandHandler for WhereCanIDeployHandler {
    async fn handle(&self, _ctx: &CommandContext, inv: &CommandInvocation) -> Result<CommandResponse> {
        let app = app_slug(inv);
        let Some(app_config) = self.config.app(app) else {
            return Ok(not_found(app));
        };
        let repo = app_config
            .repo
            .as_deref()
            .ok_or_else(|| DeployError::MissingRepo { app: app.to_string() })?;

        let mut lines = Vec::new();
        for env in WCID_ENVIRONMENTS {
            let deployments = self
                .api
                .list_deployments(repo, &DeploymentQuery::latest_in(env))
                .await
                .with_context(|| format!("Failed to list {env} deployments for {repo}"))?;

            for deployment in deployments {
                let statuses = self
                    .api
                    .list_deployment_statuses(repo, deployment.id)
                    .await
                    .with_context(|| format!("Failed to list statuses of deployment {}", deployment.id))?;
                debug!(id = deployment.id, env, statuses = statuses.len(), "Latest deployment");

                let state = statuses.first().map_or("unknown", |s| s.state.as_str());
                lines.push(format!(
                    "*{env}*: {} deployed {} at {}; state {state}",
                    deployment.actor().unwrap_or(UNKNOWN_HANDLE),
                    deployment.git_ref,
                    deployment.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
                ));
            }
        }

        if lines.is_empty() {
            return Ok(CommandResponse::reply(format!("No deployments found for {app}")));
        }
        Ok(CommandResponse::reply(lines.join("\n")))
    }
}

// ---------------------------------------------------------------------------
// help
// ---------------------------------------------------------------------------

pub struct HelpHandler {
    pub registry: CommandRegistry,
}

#[async_trait]
impl CommandHandler for HelpHandler {
    async fn handle(&self, _ctx: &CommandContext, _inv: &CommandInvocation) -> Result<CommandResponse> {
        let lines: Vec<String> = self
            .registry
            .all()
            .flat_map(|cmd| cmd.help.iter())
            .map(|entry| format!("{} - {}", entry.usage, entry.description))
            .collect();
        Ok(CommandResponse::reply(lines.join("\n")))
    }
}
