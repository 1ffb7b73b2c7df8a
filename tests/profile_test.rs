//! Aggregation tests against a mock GitHub API server.

use gitglance::github::{GithubClient, GithubError};
use gitglance::profile::{ProfileAggregator, SampleOrder};

fn repo_entry(base: &str, name: &str, stars: u64) -> String {
    format!(
        r#"{{"name":"{name}","stargazers_count":{stars},"languages_url":"{base}/repos/octo/{name}/languages"}}"#
    )
}

async fn mock_languages(
    server: &mut mockito::ServerGuard,
    name: &str,
    body: &str,
    hits: usize,
) -> mockito::Mock {
    server
        .mock("GET", format!("/repos/octo/{name}/languages").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .expect(hits)
        .create_async()
        .await
}

async fn mock_user(server: &mut mockito::ServerGuard, body: &str) -> mockito::Mock {
    server
        .mock("GET", "/users/octo")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await
}

async fn mock_repos(server: &mut mockito::ServerGuard, body: &str) -> mockito::Mock {
    server
        .mock("GET", "/users/octo/repos")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await
}

#[tokio::test]
async fn build_profile_merges_all_four_endpoints() {
    let mut server = mockito::Server::new_async().await;
    let base = server.url();

    let user = mock_user(
        &mut server,
        r#"{"login":"octo","name":"The Octocat","avatar_url":"https://example.com/octo.png"}"#,
    )
    .await;

    let repos_body = format!(
        "[{},{},{},{}]",
        repo_entry(&base, "alpha", 5),
        repo_entry(&base, "beta", 10),
        repo_entry(&base, "gamma", 2),
        repo_entry(&base, "delta", 7),
    );
    let repos = mock_repos(&mut server, &repos_body).await;

    // Only the first three repositories in listing order get a language
    // lookup; the fourth must never be requested.
    let alpha = mock_languages(&mut server, "alpha", r#"{"Rust":100,"C":50}"#, 1).await;
    let beta = mock_languages(&mut server, "beta", r#"{"Go":70}"#, 1).await;
    let gamma = mock_languages(&mut server, "gamma", r#"{"Python":10,"Shell":10}"#, 1).await;
    let delta = mock_languages(&mut server, "delta", r#"{"C":1}"#, 0).await;

    let client = GithubClient::with_base_url(&base).unwrap();
    let profile = ProfileAggregator::new(client)
        .build_profile("octo")
        .await
        .unwrap();

    assert_eq!(profile.username, "octo");
    assert_eq!(profile.name, "The Octocat");
    assert_eq!(profile.picture_url, "https://example.com/octo.png");
    assert_eq!(profile.star_count, 24);
    assert_eq!(profile.repositories, vec!["beta", "delta", "alpha", "gamma"]);
    assert_eq!(profile.languages, vec!["Rust", "C", "Go", "Python", "Shell"]);

    user.assert_async().await;
    repos.assert_async().await;
    alpha.assert_async().await;
    beta.assert_async().await;
    gamma.assert_async().await;
    delta.assert_async().await;
}

#[tokio::test]
async fn empty_repository_listing_builds_an_empty_profile() {
    let mut server = mockito::Server::new_async().await;

    mock_user(
        &mut server,
        r#"{"login":"octo","name":null,"avatar_url":"https://example.com/octo.png"}"#,
    )
    .await;
    mock_repos(&mut server, "[]").await;

    let client = GithubClient::with_base_url(server.url()).unwrap();
    let profile = ProfileAggregator::new(client)
        .build_profile("octo")
        .await
        .unwrap();

    assert_eq!(profile.name, "");
    assert_eq!(profile.star_count, 0);
    assert!(profile.repositories.is_empty());
    assert!(profile.languages.is_empty());
}

#[tokio::test]
async fn one_failed_language_lookup_fails_the_whole_build() {
    let mut server = mockito::Server::new_async().await;
    let base = server.url();

    mock_user(
        &mut server,
        r#"{"login":"octo","name":"O","avatar_url":"https://example.com/octo.png"}"#,
    )
    .await;
    let repos_body = format!(
        "[{},{}]",
        repo_entry(&base, "alpha", 1),
        repo_entry(&base, "beta", 2),
    );
    mock_repos(&mut server, &repos_body).await;

    mock_languages(&mut server, "alpha", r#"{"Rust":100}"#, 1).await;
    server
        .mock("GET", "/repos/octo/beta/languages")
        .with_status(500)
        .create_async()
        .await;

    let client = GithubClient::with_base_url(&base).unwrap();
    let err = ProfileAggregator::new(client)
        .build_profile("octo")
        .await
        .unwrap_err();

    assert!(matches!(err, GithubError::Network(_)));
}

#[tokio::test]
async fn unknown_user_fails_before_the_repository_listing() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("GET", "/users/octo")
        .with_status(404)
        .with_body(r#"{"message":"Not Found"}"#)
        .create_async()
        .await;
    let repos = server
        .mock("GET", "/users/octo/repos")
        .expect(0)
        .create_async()
        .await;

    let client = GithubClient::with_base_url(server.url()).unwrap();
    let err = ProfileAggregator::new(client)
        .build_profile("octo")
        .await
        .unwrap_err();

    assert!(matches!(err, GithubError::NotFound(_)));
    repos.assert_async().await;
}

#[tokio::test]
async fn top_stars_policy_samples_the_star_ranked_prefix() {
    let mut server = mockito::Server::new_async().await;
    let base = server.url();

    mock_user(
        &mut server,
        r#"{"login":"octo","name":"O","avatar_url":"https://example.com/octo.png"}"#,
    )
    .await;
    let repos_body = format!(
        "[{},{},{},{}]",
        repo_entry(&base, "alpha", 1),
        repo_entry(&base, "beta", 9),
        repo_entry(&base, "gamma", 5),
        repo_entry(&base, "delta", 7),
    );
    mock_repos(&mut server, &repos_body).await;

    let alpha = mock_languages(&mut server, "alpha", r#"{"Rust":1}"#, 0).await;
    let beta = mock_languages(&mut server, "beta", r#"{"Go":1}"#, 1).await;
    let gamma = mock_languages(&mut server, "gamma", r#"{"Python":1}"#, 1).await;
    let delta = mock_languages(&mut server, "delta", r#"{"C":1}"#, 1).await;

    let client = GithubClient::with_base_url(&base).unwrap();
    let profile = ProfileAggregator::with_sample_order(client, SampleOrder::TopStars)
        .build_profile("octo")
        .await
        .unwrap();

    // Sampled prefix follows the star ranking: beta, delta, gamma.
    assert_eq!(profile.languages, vec!["Go", "C", "Python"]);

    alpha.assert_async().await;
    beta.assert_async().await;
    gamma.assert_async().await;
    delta.assert_async().await;
}
