//! GitHub REST v3 client (repository creation only).

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const ACCEPT: &str = "application/vnd.github.v3+json";
const USER_AGENT: &str = concat!("bizforge/", env!("CARGO_PKG_VERSION"));

/// URLs of a freshly created repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedRepository {
    pub html_url: String,
    pub clone_url: String,
    pub ssh_url: String,
}

#[derive(Debug, Error)]
pub enum GitHubError {
    #[error("github request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("github returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected github response: {0}")]
    Decode(String),
}

/// Hosted repository provider.
#[async_trait]
pub trait RepositoryHost: Send + Sync {
    async fn create_repository(
        &self,
        name: &str,
        description: &str,
        public: bool,
    ) -> Result<CreatedRepository, GitHubError>;
}

#[derive(Debug, Serialize)]
struct CreateRepositoryRequest<'a> {
    name: &'a str,
    description: &'a str,
    private: bool,
    auto_init: bool,
    has_issues: bool,
    has_projects: bool,
    has_wiki: bool,
}

/// Token-authenticated client for `POST /user/repos`.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    api_url: String,
    token: String,
    http: reqwest::Client,
}

impl GitHubClient {
    pub fn with_api_url(
        api_url: impl Into<String>,
        token: impl Into<String>,
    ) -> Result<Self, GitHubError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            http,
        })
    }
}

#[async_trait]
impl RepositoryHost for GitHubClient {
    async fn create_repository(
        &self,
        name: &str,
        description: &str,
        public: bool,
    ) -> Result<CreatedRepository, GitHubError> {
        let url = format!("{}/user/repos", self.api_url);
        let body = CreateRepositoryRequest {
            name,
            description,
            private: !public,
            auto_init: false,
            has_issues: true,
            has_projects: true,
            has_wiki: false,
        };

        let resp = self
            .http
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, format!("token {}", self.token))
            .header(reqwest::header::ACCEPT, ACCEPT)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if status != reqwest::StatusCode::CREATED {
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(repo = name, status = status.as_u16(), "✗ failed to create repository");
            return Err(GitHubError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let repo: CreatedRepository = resp
            .json()
            .await
            .map_err(|e| GitHubError::Decode(e.to_string()))?;
        tracing::info!(repo = name, url = %repo.html_url, "✓ repository created");
        Ok(repo)
    }
}
