//! Pull-request listing for a selected repository.

use crate::github::{GithubClient, GithubError, Page};

/// One pull request, reduced to what the display needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestRef {
    pub author_login: String,
    pub url: String,
}

/// Lists a repository's pull requests through an injected [`GithubClient`].
pub struct PullRequestFinder {
    client: GithubClient,
}

impl PullRequestFinder {
    pub fn new(client: GithubClient) -> Self {
        Self { client }
    }

    /// First page of pull requests, projected to author login and HTML
    /// URL in the API's return order. An empty list means the repository
    /// has no open pull requests and is not an error.
    pub async fn find_pull_requests(
        &self,
        username: &str,
        repo: &str,
    ) -> Result<Vec<PullRequestRef>, GithubError> {
        let pulls = self
            .client
            .fetch_pull_requests(username, repo, Page::default())
            .await?;

        Ok(pulls
            .into_iter()
            .map(|pull| PullRequestRef {
                author_login: pull.user.login,
                url: pull.html_url,
            })
            .collect())
    }
}
