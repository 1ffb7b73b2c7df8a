//! Profile aggregation: one username in, one merged view model out.
//!
//! The aggregator fans out the user lookup, the repository listing, and a
//! bounded set of per-repository language lookups, then merges everything
//! into a [`UserProfile`]. Any dependent call failing fails the whole
//! build; a partial profile is never returned.

use futures::future;
use serde_json::{Map, Value};
use tracing::debug;

use crate::github::{GithubClient, GithubError, Page, Repository};

/// How many repositories get a language lookup. Kept small so an
/// unauthenticated search stays inside GitHub's request quota.
pub const LANGUAGE_SAMPLE_SIZE: usize = 3;

/// Which repositories the language sample is drawn from.
///
/// The API's listing order differs from the star ranking shown in
/// [`UserProfile::repositories`], so the two policies can sample entirely
/// different repositories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SampleOrder {
    /// The first repositories in the order the API listed them.
    #[default]
    ApiOrder,
    /// The repositories with the most stars.
    TopStars,
}

/// Merged, display-ready summary of one GitHub account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    /// The username the caller searched for, echoed verbatim.
    pub username: String,
    /// Display name; empty when GitHub reports none.
    pub name: String,
    /// Avatar URL.
    pub picture_url: String,
    /// Sum of stargazer counts over every fetched repository.
    pub star_count: u64,
    /// Ranked languages of the sampled repositories, concatenated in
    /// sample order.
    pub languages: Vec<String>,
    /// All repository names, most-starred first.
    pub repositories: Vec<String>,
}

/// Ranks the languages of a bounded sample of repositories.
pub struct LanguageSampler<'a> {
    client: &'a GithubClient,
    order: SampleOrder,
}

impl<'a> LanguageSampler<'a> {
    pub fn new(client: &'a GithubClient, order: SampleOrder) -> Self {
        Self { client, order }
    }

    /// Fetch and rank languages for at most [`LANGUAGE_SAMPLE_SIZE`] of
    /// `repositories`. All lookups are dispatched together and jointly
    /// awaited; one failure fails the whole sample.
    pub async fn sample(&self, repositories: &[Repository]) -> Result<Vec<String>, GithubError> {
        let sample = select_sample(repositories, self.order);
        let lookups = sample
            .iter()
            .map(|repo| self.client.fetch_languages(&repo.languages_url));
        let rankings = future::try_join_all(lookups).await?;

        Ok(rankings.into_iter().flat_map(rank_languages).collect())
    }
}

fn select_sample(repositories: &[Repository], order: SampleOrder) -> Vec<&Repository> {
    match order {
        SampleOrder::ApiOrder => repositories.iter().take(LANGUAGE_SAMPLE_SIZE).collect(),
        SampleOrder::TopStars => {
            let mut ranked: Vec<&Repository> = repositories.iter().collect();
            ranked.sort_by(|a, b| b.stargazers_count.cmp(&a.stargazers_count));
            ranked.truncate(LANGUAGE_SAMPLE_SIZE);
            ranked
        }
    }
}

/// Language names ranked by byte count descending. The sort is stable, so
/// equal byte counts keep the order the API serialized them in.
fn rank_languages(bytes: Map<String, Value>) -> Vec<String> {
    let mut languages: Vec<(String, u64)> = bytes
        .into_iter()
        .map(|(name, count)| (name, count.as_u64().unwrap_or(0)))
        .collect();
    languages.sort_by(|a, b| b.1.cmp(&a.1));
    languages.into_iter().map(|(name, _)| name).collect()
}

/// Builds [`UserProfile`]s from an injected [`GithubClient`].
pub struct ProfileAggregator {
    client: GithubClient,
    sample_order: SampleOrder,
}

impl ProfileAggregator {
    pub fn new(client: GithubClient) -> Self {
        Self::with_sample_order(client, SampleOrder::default())
    }

    pub fn with_sample_order(client: GithubClient, sample_order: SampleOrder) -> Self {
        Self {
            client,
            sample_order,
        }
    }

    /// Fetch user details, the full repository listing, and the language
    /// sample, then merge them into one profile.
    ///
    /// The user and repository calls run sequentially; the language
    /// lookups fan out concurrently over the sampled repositories. No
    /// side effects beyond the network calls themselves.
    pub async fn build_profile(&self, username: &str) -> Result<UserProfile, GithubError> {
        let user = self.client.fetch_user(username).await?;
        let repositories = self
            .client
            .fetch_repositories(username, Page::default())
            .await?;

        let languages = LanguageSampler::new(&self.client, self.sample_order)
            .sample(&repositories)
            .await?;

        debug!(username, repos = repositories.len(), "assembling profile");
        Ok(UserProfile {
            username: username.to_string(),
            name: user.name.unwrap_or_default(),
            picture_url: user.avatar_url,
            star_count: total_stars(&repositories),
            languages,
            repositories: rank_by_stars(&repositories),
        })
    }
}

/// Sum of stargazer counts over the full listing, whatever its order.
fn total_stars(repositories: &[Repository]) -> u64 {
    repositories.iter().map(|r| r.stargazers_count).sum()
}

/// Repository names, most-starred first. The sort is stable: equal star
/// counts keep the API's relative order.
fn rank_by_stars(repositories: &[Repository]) -> Vec<String> {
    let mut ranked: Vec<&Repository> = repositories.iter().collect();
    ranked.sort_by(|a, b| b.stargazers_count.cmp(&a.stargazers_count));
    ranked.into_iter().map(|r| r.name.clone()).collect()
}
