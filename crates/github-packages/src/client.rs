//! Authenticated HTTP client for the GitHub REST API.

use reqwest::{Response, Url};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::GithubError;
use crate::wire::{ApiErrorBody, PackageVersion};
use crate::Result;

/// Default public API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

const API_VERSION: &str = "2022-11-28";
const ACCEPT: &str = "application/vnd.github+json";

/// GitHub API configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct GithubConfig {
    /// API base URL (GitHub Enterprise Server uses `https://host/api/v3`)
    pub api_url: String,
    /// Token with `read:packages` and `delete:packages`
    pub token: String,
    pub user_agent: String,
}

impl std::fmt::Debug for GithubConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GithubConfig")
            .field("api_url", &self.api_url)
            .field("token", &"<redacted>")
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl GithubConfig {
    pub fn new(token: &str) -> Self {
        GithubConfig {
            api_url: DEFAULT_API_URL.to_string(),
            token: token.to_string(),
            user_agent: format!("vprune/{}", vprune_core::VERSION),
        }
    }

    pub fn with_api_url(mut self, api_url: &str) -> Self {
        self.api_url = api_url.to_string();
        self
    }
}

/// GitHub client shared by the scope adapters
#[derive(Debug, Clone)]
pub struct GithubClient {
    config: GithubConfig,
    base_url: Url,
    http_client: reqwest::Client,
}

impl GithubClient {
    pub fn new(config: GithubConfig) -> Result<Self> {
        if config.token.trim().is_empty() {
            return Err(GithubError::MissingToken);
        }
        let base_url = Url::parse(config.api_url.trim_end_matches('/'))
            .map_err(|e| GithubError::InvalidUrl(format!("{}: {e}", config.api_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(GithubError::InvalidUrl(config.api_url.clone()));
        }
        let http_client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(GithubClient {
            config,
            base_url,
            http_client,
        })
    }

    /// Join path segments onto the API base, percent-encoding each one.
    ///
    /// A package name such as `team/api` becomes the single segment
    /// `team%2Fapi`.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| GithubError::InvalidUrl(self.config.api_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .bearer_auth(&self.config.token)
            .header(reqwest::header::ACCEPT, ACCEPT)
            .header("X-GitHub-Api-Version", API_VERSION)
    }

    /// `GET {url}?per_page=..&page=..&state=active`
    pub async fn list_versions(
        &self,
        url: Url,
        page_size: u32,
        page: u32,
    ) -> Result<Vec<PackageVersion>> {
        debug!(%url, page_size, page, "listing package versions");
        let response = self
            .authorized(self.http_client.get(url))
            .query(&[
                ("per_page", page_size.to_string()),
                ("page", page.to_string()),
                ("state", "active".to_string()),
            ])
            .send()
            .await?;
        let body = check_status(response).await?.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// `DELETE {url}`
    pub async fn delete_version(&self, url: Url) -> Result<()> {
        debug!(%url, "deleting package version");
        let response = self
            .authorized(self.http_client.delete(url))
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiErrorBody>(&text)
        .map(|body| body.message)
        .unwrap_or_else(|_| {
            if text.is_empty() {
                status.canonical_reason().unwrap_or("unknown").to_string()
            } else {
                text
            }
        });
    Err(GithubError::Status {
        status: status.as_u16(),
        message,
    })
}
