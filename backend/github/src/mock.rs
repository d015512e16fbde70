use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use crate::error::GitHubError;
use crate::types::{Deployment, DeploymentOptions, DeploymentQuery, DeploymentStatus};
use crate::DeploymentApi;

/// A `create_deployment` call captured by [`RecordingDeploymentApi`].
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedDeployment {
    pub repo: String,
    pub git_ref: String,
    pub options: DeploymentOptions,
}

/// An in-memory deployments API that records what it was asked to create
/// and serves canned listings.
#[derive(Default)]
pub struct RecordingDeploymentApi {
    created: Mutex<Vec<CreatedDeployment>>,
    deployments: HashMap<String, Vec<Deployment>>,
    statuses: HashMap<u64, Vec<DeploymentStatus>>,
    failure: Option<(u16, String)>,
}

impl RecordingDeploymentApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `deployment` from `list_deployments` for its environment.
    pub fn with_deployment(mut self, deployment: Deployment, statuses: Vec<DeploymentStatus>) -> Self {
        self.statuses.insert(deployment.id, statuses);
        self.deployments
            .entry(deployment.environment.clone())
            .or_default()
            .push(deployment);
        self
    }

    /// Make every call fail with the given HTTP status and message.
    pub fn failing_with(mut self, status: u16, message: impl Into<String>) -> Self {
        self.failure = Some((status, message.into()));
        self
    }

    /// Every deployment created so far, oldest first.
    pub async fn created(&self) -> Vec<CreatedDeployment> {
        self.created.lock().await.clone()
    }

    fn check_failure(&self) -> Result<(), GitHubError> {
        match &self.failure {
            Some((status, message)) => Err(GitHubError::Status {
                status: *status,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl DeploymentApi for RecordingDeploymentApi {
    async fn create_deployment(
        &self,
        repo: &str,
        git_ref: &str,
        options: &DeploymentOptions,
    ) -> Result<Deployment, GitHubError> {
        self.check_failure()?;
        let mut created = self.created.lock().await;
        created.push(CreatedDeployment {
            repo: repo.to_string(),
            git_ref: git_ref.to_string(),
            options: options.clone(),
        });
        Ok(Deployment {
            id: created.len() as u64,
            git_ref: git_ref.to_string(),
            task: Some(options.task.clone()),
            environment: options.environment.clone(),
            payload: serde_json::Value::Object(options.payload.clone()),
            created_at: Utc::now(),
        })
    }

    async fn list_deployments(
        &self,
        _repo: &str,
        query: &DeploymentQuery,
    ) -> Result<Vec<Deployment>, GitHubError> {
        self.check_failure()?;
        let matching = match &query.environment {
            Some(env) => self.deployments.get(env).cloned().unwrap_or_default(),
            None => self.deployments.values().flatten().cloned().collect(),
        };
        let limit = query.per_page.map_or(matching.len(), |n| n as usize);
        Ok(matching.into_iter().take(limit).collect())
    }

    async fn list_deployment_statuses(
        &self,
        _repo: &str,
        deployment_id: u64,
    ) -> Result<Vec<DeploymentStatus>, GitHubError> {
        self.check_failure()?;
        Ok(self.statuses.get(&deployment_id).cloned().unwrap_or_default())
    }
}
