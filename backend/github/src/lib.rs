//! Client for the GitHub "deployments" API.
//!
//! The bot never executes deployments itself; it records a deployment (or a
//! lock/unlock task) against the repository and lets whatever listens to
//! deployment events do the work.

pub mod client;
pub mod error;
pub mod mock;
pub mod types;

pub use client::GitHubClient;
pub use error::GitHubError;
pub use mock::RecordingDeploymentApi;
pub use types::{Deployment, DeploymentOptions, DeploymentQuery, DeploymentStatus};

use async_trait::async_trait;

/// Operations the bot needs from a deployments API.
#[async_trait]
pub trait DeploymentApi: Send + Sync {
    /// Record a new deployment of `git_ref` for `repo` (`owner/name`).
    async fn create_deployment(
        &self,
        repo: &str,
        git_ref: &str,
        options: &DeploymentOptions,
    ) -> Result<Deployment, GitHubError>;

    /// List deployments for `repo`, newest first.
    async fn list_deployments(
        &self,
        repo: &str,
        query: &DeploymentQuery,
    ) -> Result<Vec<Deployment>, GitHubError>;

    /// List the statuses of one deployment, newest first.
    async fn list_deployment_statuses(
        &self,
        repo: &str,
        deployment_id: u64,
    ) -> Result<Vec<DeploymentStatus>, GitHubError>;
}
