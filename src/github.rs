//! Thin client for the unauthenticated GitHub REST v3 API.
//!
//! One HTTP GET per operation, no retries, no timeouts, no rate-limit
//! backoff. Every failure is mapped into the closed [`GithubError`]
//! taxonomy so callers can tell an unknown user from an exhausted quota.

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Base URL of the production GitHub API.
pub const GITHUB_API_BASE: &str = "https://api.github.com";

const USER_AGENT: &str = concat!("gitglance/", env!("CARGO_PKG_VERSION"));

/// Everything that can go wrong talking to GitHub.
#[derive(Debug, Error)]
pub enum GithubError {
    /// The user or repository does not exist (HTTP 404).
    #[error("not found: {0}")]
    NotFound(String),
    /// The unauthenticated request quota is exhausted (HTTP 403/429).
    #[error("GitHub API rate limit exceeded")]
    RateLimited,
    /// Transport failure or an unexpected HTTP status.
    #[error("network error talking to GitHub: {0}")]
    Network(#[from] reqwest::Error),
    /// The response body was not the JSON shape we expected.
    #[error("failed to parse GitHub response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// `GET /users/{username}` payload, reduced to the fields the profile uses.
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub login: String,
    pub name: Option<String>,
    pub avatar_url: String,
}

/// One entry of `GET /users/{username}/repos`.
#[derive(Debug, Clone, Deserialize)]
pub struct Repository {
    pub name: String,
    pub stargazers_count: u64,
    pub languages_url: String,
}

/// One entry of `GET /repos/{owner}/{repo}/pulls`.
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequest {
    pub user: PullRequestAuthor,
    pub html_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestAuthor {
    pub login: String,
}

/// Pagination parameters for the listing endpoints.
///
/// The default sends neither parameter, which yields the API's first page
/// at its default size. No cursor is ever followed.
#[derive(Debug, Clone, Copy, Default)]
pub struct Page {
    pub number: Option<u32>,
    pub per_page: Option<u32>,
}

impl Page {
    fn apply(self, mut req: RequestBuilder) -> RequestBuilder {
        if let Some(number) = self.number {
            req = req.query(&[("page", number)]);
        }
        if let Some(per_page) = self.per_page {
            req = req.query(&[("per_page", per_page)]);
        }
        req
    }
}

/// Anonymous GitHub API accessor, cheap to clone and share.
#[derive(Clone)]
pub struct GithubClient {
    http: Client,
    base_url: Arc<String>,
}

impl GithubClient {
    /// Create a client against the production GitHub API.
    pub fn new() -> Result<Self, GithubError> {
        Self::with_base_url(GITHUB_API_BASE)
    }

    /// Create a client against an arbitrary base URL (tests, proxies).
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, GithubError> {
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            http,
            base_url: Arc::new(base_url.into()),
        })
    }

    /// Fetch a user's public details.
    pub async fn fetch_user(&self, username: &str) -> Result<User, GithubError> {
        let req = self.http.get(format!("{}/users/{username}", self.base_url));
        self.get_json(req).await
    }

    /// Fetch a user's repository listing in the API's default order.
    pub async fn fetch_repositories(
        &self,
        username: &str,
        page: Page,
    ) -> Result<Vec<Repository>, GithubError> {
        let req = self
            .http
            .get(format!("{}/users/{username}/repos", self.base_url));
        self.get_json(page.apply(req)).await
    }

    /// Fetch one repository's language byte counts. The URL comes verbatim
    /// from the repository listing; the returned map keeps the response's
    /// own key order.
    pub async fn fetch_languages(
        &self,
        languages_url: &str,
    ) -> Result<Map<String, Value>, GithubError> {
        self.get_json(self.http.get(languages_url)).await
    }

    /// Fetch a repository's pull requests in the API's return order.
    pub async fn fetch_pull_requests(
        &self,
        username: &str,
        repo: &str,
        page: Page,
    ) -> Result<Vec<PullRequest>, GithubError> {
        let req = self
            .http
            .get(format!("{}/repos/{username}/{repo}/pulls", self.base_url));
        self.get_json(page.apply(req)).await
    }

    async fn get_json<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, GithubError> {
        let resp = req.send().await?;
        debug!(url = %resp.url(), status = %resp.status(), "GET");

        match resp.status() {
            StatusCode::NOT_FOUND => Err(GithubError::NotFound(resp.url().to_string())),
            StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS => Err(GithubError::RateLimited),
            _ => {
                let body = resp.error_for_status()?.text().await?;
                Ok(serde_json::from_str(&body)?)
            }
        }
    }
}
