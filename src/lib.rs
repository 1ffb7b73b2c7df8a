//! gitglance: public GitHub profile and pull-request summaries.
//!
//! Fans out unauthenticated GitHub REST calls and merges them into
//! display-ready view models:
//! - [`github::GithubClient`]: one thin accessor per endpoint
//! - [`profile::ProfileAggregator`]: user + repositories + language sample
//! - [`pulls::PullRequestFinder`]: pull requests of a selected repository
//! - [`session::SearchSession`]: reset/replace semantics across searches

pub mod github;
pub mod profile;
pub mod pulls;
pub mod session;
