use anyhow::Result;
use clap::Parser;

use gitglance::github::{GITHUB_API_BASE, GithubClient};
use gitglance::profile::{ProfileAggregator, SampleOrder, UserProfile};
use gitglance::pulls::{PullRequestFinder, PullRequestRef};
use gitglance::session::SearchSession;

/// Summarize a public GitHub profile straight from the REST API.
#[derive(Parser)]
#[command(name = "gitglance", version, about)]
struct Cli {
    /// GitHub username to look up
    username: String,

    /// Also list the pull requests of this repository
    #[arg(long)]
    repo: Option<String>,

    /// Sample languages from the listing order or the star ranking
    #[arg(long, value_parser = ["api-order", "top-stars"], default_value = "api-order")]
    sample_order: String,

    /// Base URL of the GitHub API
    #[arg(long, env = "GITGLANCE_API_URL", default_value = GITHUB_API_BASE)]
    api_url: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let sample_order = match cli.sample_order.as_str() {
        "top-stars" => SampleOrder::TopStars,
        _ => SampleOrder::ApiOrder,
    };

    let client = GithubClient::with_base_url(&cli.api_url)?;
    let aggregator = ProfileAggregator::with_sample_order(client.clone(), sample_order);
    let mut session = SearchSession::new();

    let token = session.begin_profile_search();
    let result = aggregator.build_profile(&cli.username).await;
    session.complete_profile_search(token, result);

    if let Some(err) = session.profile_error() {
        anyhow::bail!("profile lookup for {} failed: {err}", cli.username);
    }
    if let Some(profile) = session.profile() {
        print_profile(profile);
    }

    if let Some(repo) = &cli.repo {
        let finder = PullRequestFinder::new(client);

        let token = session.begin_pull_request_search();
        let result = finder.find_pull_requests(&cli.username, repo).await;
        session.complete_pull_request_search(token, result);

        if let Some(err) = session.pull_request_error() {
            anyhow::bail!("pull request lookup for {repo} failed: {err}");
        }
        if let Some(pulls) = session.pull_requests() {
            print_pull_requests(pulls);
        }
    }

    Ok(())
}

fn print_profile(profile: &UserProfile) {
    println!("\n{}", profile.username);
    if !profile.name.is_empty() {
        println!("  {}", profile.name);
    }
    println!("  {}", profile.picture_url);
    println!("  ⭐ {}", profile.star_count);

    println!("\nMost used languages:");
    for language in &profile.languages {
        println!("  {language}");
    }

    println!("\nRepositories:");
    for repo in &profile.repositories {
        println!("  {repo}");
    }
}

fn print_pull_requests(pulls: &[PullRequestRef]) {
    println!("\nPull requests:");
    if pulls.is_empty() {
        println!("  No PR found for this repository");
        return;
    }
    for pull in pulls {
        println!("  {} - {}", pull.author_login, pull.url);
    }
}
