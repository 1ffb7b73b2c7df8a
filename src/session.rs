//! Caller-side display-slot protocol for successive searches.
//!
//! Each search clears its slot to absent before the network round-trip
//! and fills it on completion. Slots hand out monotonically increasing
//! request tokens; a completion carrying anything but the newest token is
//! discarded, so two overlapping searches always resolve to the
//! later-issued one no matter which response arrives last.

use crate::github::GithubError;
use crate::profile::UserProfile;
use crate::pulls::PullRequestRef;

/// Identifies one request issued against a session slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

#[derive(Debug)]
struct DisplaySlot<T> {
    value: Option<T>,
    error: Option<GithubError>,
    next_token: u64,
    pending: Option<u64>,
}

impl<T> Default for DisplaySlot<T> {
    fn default() -> Self {
        Self {
            value: None,
            error: None,
            next_token: 0,
            pending: None,
        }
    }
}

impl<T> DisplaySlot<T> {
    fn begin(&mut self) -> RequestToken {
        self.value = None;
        self.error = None;
        let token = self.next_token;
        self.next_token += 1;
        self.pending = Some(token);
        RequestToken(token)
    }

    /// Applies the result only when `token` is the newest issued
    /// generation. Returns false when the result was discarded as stale.
    fn complete(&mut self, token: RequestToken, result: Result<T, GithubError>) -> bool {
        if self.pending != Some(token.0) {
            return false;
        }
        self.pending = None;
        match result {
            Ok(value) => self.value = Some(value),
            Err(err) => self.error = Some(err),
        }
        true
    }

    fn loading(&self) -> bool {
        self.pending.is_some()
    }
}

/// Tracks what one caller interaction currently displays: the profile of
/// the last username searched and the pull requests of the last selected
/// repository. Not a persistent store; nothing survives the session.
#[derive(Debug, Default)]
pub struct SearchSession {
    profile: DisplaySlot<UserProfile>,
    pull_requests: DisplaySlot<Vec<PullRequestRef>>,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a username search. The displayed profile goes absent until
    /// the returned token's completion arrives.
    pub fn begin_profile_search(&mut self) -> RequestToken {
        self.profile.begin()
    }

    /// Deliver a profile search result. On failure the profile stays
    /// absent and the error is kept for display. Returns false when the
    /// token has been superseded by a newer search.
    pub fn complete_profile_search(
        &mut self,
        token: RequestToken,
        result: Result<UserProfile, GithubError>,
    ) -> bool {
        self.profile.complete(token, result)
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.value.as_ref()
    }

    pub fn profile_error(&self) -> Option<&GithubError> {
        self.profile.error.as_ref()
    }

    /// True exactly while the newest profile request is outstanding.
    pub fn profile_loading(&self) -> bool {
        self.profile.loading()
    }

    /// Start a pull-request search for a selected repository.
    pub fn begin_pull_request_search(&mut self) -> RequestToken {
        self.pull_requests.begin()
    }

    /// Deliver a pull-request search result; same token semantics as
    /// [`SearchSession::complete_profile_search`].
    pub fn complete_pull_request_search(
        &mut self,
        token: RequestToken,
        result: Result<Vec<PullRequestRef>, GithubError>,
    ) -> bool {
        self.pull_requests.complete(token, result)
    }

    pub fn pull_requests(&self) -> Option<&[PullRequestRef]> {
        self.pull_requests.value.as_deref()
    }

    pub fn pull_request_error(&self) -> Option<&GithubError> {
        self.pull_requests.error.as_ref()
    }

    /// True exactly while the newest pull-request request is outstanding.
    pub fn pull_requests_loading(&self) -> bool {
        self.pull_requests.loading()
    }
}
