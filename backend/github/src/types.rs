use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body of `POST /repos/{repo}/deployments`, minus the ref.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeploymentOptions {
    pub environment: String,
    pub task: String,
    pub auto_merge: bool,
    pub payload: Map<String, Value>,
    /// Status contexts that must pass first. `Some(vec![])` skips every check.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_contexts: Option<Vec<String>>,
}

/// Filters for `GET /repos/{repo}/deployments`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeploymentQuery {
    pub environment: Option<String>,
    pub per_page: Option<u32>,
}

impl DeploymentQuery {
    /// The most recent deployment to one environment.
    pub fn latest_in(environment: impl Into<String>) -> Self {
        Self {
            environment: Some(environment.into()),
            per_page: Some(1),
        }
    }

    pub(crate) fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(env) = &self.environment {
            pairs.push(("environment", env.clone()));
        }
        if let Some(per_page) = self.per_page {
            pairs.push(("per_page", per_page.to_string()));
        }
        pairs
    }
}

/// A deployment record as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deployment {
    pub id: u64,
    #[serde(rename = "ref")]
    pub git_ref: String,
    #[serde(default)]
    pub task: Option<String>,
    pub environment: String,
    #[serde(default)]
    pub payload: Value,
    pub created_at: DateTime<Utc>,
}

impl Deployment {
    /// The chat handle recorded in the payload when the bot created it.
    pub fn actor(&self) -> Option<&str> {
        self.payload.get("actor").and_then(Value::as_str)
    }
}

/// One status update of a deployment (`pending`, `success`, `failure`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeploymentStatus {
    pub state: String,
    #[serde(default)]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}
