//! deploybot configuration schema.
//!
//! Keys are snake_case in YAML so the per-app block reads the same way the
//! chat commands refer to it (`default_ref`, `default_env`, ...).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Root configuration for deploybot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeployBotConfig {
    /// Token used to authenticate against the deployments API
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,

    /// Base URL of the deployments API
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// Deployable applications keyed by chat slug
    #[serde(default)]
    pub apps: HashMap<String, AppConfig>,

    /// Logging configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging: Option<LoggingConfig>,
}

impl DeployBotConfig {
    /// Look up an application by the slug used in chat.
    pub fn app(&self, slug: &str) -> Option<&AppConfig> {
        self.apps.get(slug)
    }
}

// ---------------------------------------------------------------------------
// Apps
// ---------------------------------------------------------------------------

/// Per-application deployment settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Remote repository, `owner/name`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,

    /// Ref deployed when the command names none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_ref: Option<String>,

    /// Environment deployed to when the command names none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_env: Option<String>,

    /// Whether non-forced deploys ask the API to auto-merge (default: true)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_merge_on_standard_deploys: Option<bool>,

    /// Extra fields sent with every deployment payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Map<String, Value>>,
}

impl AppConfig {
    pub fn with_repo(repo: impl Into<String>) -> Self {
        Self {
            repo: Some(repo.into()),
            ..Default::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    /// Directory for the rolling NDJSON log file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
}
