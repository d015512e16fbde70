use thiserror::Error;

/// Errors returned by a [`DeploymentApi`](crate::DeploymentApi).
#[derive(Debug, Error)]
pub enum GitHubError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The API answered with a non-success status.
    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl GitHubError {
    /// HTTP status of the failed call, when the API answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            GitHubError::Status { status, .. } => Some(*status),
            GitHubError::Http { source, .. } | GitHubError::Decode { source, .. } => {
                source.status().map(|s| s.as_u16())
            }
        }
    }
}
