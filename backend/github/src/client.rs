use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::GitHubError;
use crate::types::{Deployment, DeploymentOptions, DeploymentQuery, DeploymentStatus};
use crate::DeploymentApi;

const USER_AGENT: &str = concat!("deploybot/", env!("CARGO_PKG_VERSION"));

/// GitHub REST client for the deployments resource.
pub struct GitHubClient {
    client: Client,
    access_token: String,
    base_url: String,
}

impl GitHubClient {
    /// `base_url` is the API root, e.g. `https://api.github.com` or a
    /// GitHub Enterprise `https://ghe.example.com/api/v3`.
    pub fn new(base_url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            access_token: access_token.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn deployments_url(&self, repo: &str) -> String {
        format!("{}/repos/{}/deployments", self.base_url, repo)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("Authorization", format!("token {}", self.access_token))
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", USER_AGENT)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        url: &str,
        request: RequestBuilder,
    ) -> Result<T, GitHubError> {
        let response = self
            .authorized(request)
            .send()
            .await
            .map_err(|source| GitHubError::Http {
                url: url.to_string(),
                source,
            })?;

        let response = error_for_status(response).await?;

        response.json().await.map_err(|source| GitHubError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

#[derive(Serialize)]
struct CreateDeploymentBody<'a> {
    #[serde(rename = "ref")]
    git_ref: &'a str,
    #[serde(flatten)]
    options: &'a DeploymentOptions,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Turn a non-2xx response into [`GitHubError::Status`], preferring the
/// `message` field GitHub puts in error bodies.
async fn error_for_status(response: Response) -> Result<Response, GitHubError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiErrorBody>(&body)
        .map(|b| b.message)
        .unwrap_or_else(|_| {
            if body.is_empty() {
                status.canonical_reason().unwrap_or("request failed").to_string()
            } else {
                body
            }
        });
    Err(GitHubError::Status {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl DeploymentApi for GitHubClient {
    async fn create_deployment(
        &self,
        repo: &str,
        git_ref: &str,
        options: &DeploymentOptions,
    ) -> Result<Deployment, GitHubError> {
        let url = self.deployments_url(repo);
        debug!(repo, git_ref, environment = %options.environment, task = %options.task, "Creating deployment");
        let body = CreateDeploymentBody { git_ref, options };
        self.send(&url, self.client.post(&url).json(&body)).await
    }

    async fn list_deployments(
        &self,
        repo: &str,
        query: &DeploymentQuery,
    ) -> Result<Vec<Deployment>, GitHubError> {
        let url = self.deployments_url(repo);
        debug!(repo, environment = ?query.environment, "Listing deployments");
        self.send(&url, self.client.get(&url).query(&query.to_pairs()))
            .await
    }

    async fn list_deployment_statuses(
        &self,
        repo: &str,
        deployment_id: u64,
    ) -> Result<Vec<DeploymentStatus>, GitHubError> {
        let url = format!("{}/{}/statuses", self.deployments_url(repo), deployment_id);
        self.send(&url, self.client.get(&url)).await
    }
}
