use crate::api::ApiError;
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

/// Lifecycle of one asynchronous request target.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    Idle,
    Loading,
    Success(T),
    Failure(String),
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<T> FetchState<T> {
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failure(reason) => Some(reason.as_str()),
            _ => None,
        }
    }
}

impl<T> fmt::Display for FetchState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Loading => write!(f, "Loading"),
            Self::Success(_) => write!(f, "Success"),
            Self::Failure(reason) => write!(f, "Failure({reason})"),
        }
    }
}

/// Key of a data fetch. Compared by value: any field change is a new request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DataRequest {
    pub region: Option<String>,
    pub year: i32,
    pub params: BTreeMap<String, String>,
}

impl DataRequest {
    pub const fn new(region: Option<String>, year: i32) -> Self {
        Self {
            region,
            year,
            params: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_param(mut self, key: &str, value: impl ToString) -> Self {
        self.params.insert(key.to_string(), value.to_string());
        self
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}

/// Identity of an issued request: a monotonic id plus the key it was made for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket<K> {
    pub id: u64,
    pub key: K,
}

/// Human-readable failure text, separating transport trouble from server replies.
pub fn failure_reason(err: &ApiError) -> String {
    match err {
        ApiError::NetworkUnreachable(detail) => {
            format!("backend unreachable ({detail}). Is the backend server running?")
        }
        ApiError::Timeout(secs) => format!("request timed out after {secs}s"),
        ApiError::Server { status, message } => format!("server returned {status}: {message}"),
        ApiError::Malformed(message) => format!("unexpected response: {message}"),
    }
}

/// Tracks the current request for one logical target and drops stale replies.
///
/// Each `begin` supersedes whatever was in flight; `complete` only applies an
/// outcome whose ticket is still the newest one.
#[derive(Debug, Clone)]
pub struct Fetcher<K, T> {
    state: FetchState<T>,
    current: Option<Ticket<K>>,
    issued: u64,
}

impl<K, T> Default for Fetcher<K, T> {
    fn default() -> Self {
        Self {
            state: FetchState::Idle,
            current: None,
            issued: 0,
        }
    }
}

impl<K: Clone + PartialEq + fmt::Debug, T> Fetcher<K, T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn state(&self) -> &FetchState<T> {
        &self.state
    }

    pub fn key(&self) -> Option<&K> {
        self.current.as_ref().map(|ticket| &ticket.key)
    }

    /// Number of requests issued so far.
    pub const fn issued(&self) -> u64 {
        self.issued
    }

    /// Issue a request for `key` unconditionally and move to `Loading`.
    pub fn begin(&mut self, key: K) -> Ticket<K> {
        self.issued += 1;
        let ticket = Ticket {
            id: self.issued,
            key,
        };
        if let Some(previous) = &self.current {
            if self.state.is_loading() {
                debug!(superseded = previous.id, by = ticket.id, "request superseded");
            }
        }
        self.current = Some(ticket.clone());
        self.state = FetchState::Loading;
        ticket
    }

    /// Issue a request only when `key` differs from the current one.
    pub fn request(&mut self, key: K) -> Option<Ticket<K>> {
        if self.key() == Some(&key) {
            return None;
        }
        Some(self.begin(key))
    }

    /// Apply a finished request. Returns false when the ticket is stale.
    pub fn complete(&mut self, ticket: &Ticket<K>, outcome: Result<T, ApiError>) -> bool {
        let is_current = self
            .current
            .as_ref()
            .is_some_and(|current| current.id == ticket.id && current.key == ticket.key);

        if !is_current {
            debug!(stale = ticket.id, key = ?ticket.key, "discarding stale response");
            return false;
        }

        self.state = match outcome {
            Ok(value) => FetchState::Success(value),
            Err(err) => FetchState::Failure(failure_reason(&err)),
        };
        true
    }

    /// Forget the current target. Pending replies become stale.
    pub fn reset(&mut self) {
        self.current = None;
        self.state = FetchState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_request_wins_when_older_reply_arrives_last() {
        let mut fetcher: Fetcher<&str, u32> = Fetcher::new();
        let a = fetcher.begin("A");
        let b = fetcher.begin("B");

        assert!(fetcher.complete(&b, Ok(2)));
        assert!(!fetcher.complete(&a, Ok(1)));

        assert_eq!(fetcher.state(), &FetchState::Success(2));
        assert_eq!(fetcher.key(), Some(&"B"));
    }

    #[test]
    fn older_reply_arriving_first_never_shows() {
        let mut fetcher: Fetcher<&str, u32> = Fetcher::new();
        let a = fetcher.begin("A");
        let b = fetcher.begin("B");

        assert!(!fetcher.complete(&a, Ok(1)));
        assert_eq!(fetcher.state(), &FetchState::Loading);

        assert!(fetcher.complete(&b, Ok(2)));
        assert_eq!(fetcher.state(), &FetchState::Success(2));
    }

    #[test]
    fn same_key_reissued_still_discards_first_ticket() {
        let mut fetcher: Fetcher<&str, u32> = Fetcher::new();
        let first = fetcher.begin("A");
        let second = fetcher.begin("A");

        assert!(!fetcher.complete(&first, Ok(1)));
        assert!(fetcher.complete(&second, Ok(2)));
        assert_eq!(fetcher.state().value(), Some(&2));
    }

    #[test]
    fn request_skips_unchanged_key() {
        let mut fetcher: Fetcher<(Option<String>, i32), ()> = Fetcher::new();
        assert!(fetcher.request((None, 2020)).is_some());
        assert!(fetcher.request((None, 2020)).is_none());
        assert!(fetcher.request((Some("kerala".to_string()), 2020)).is_some());
        assert_eq!(fetcher.issued(), 2);
    }

    #[test]
    fn data_requests_compare_by_value() {
        let mut fetcher: Fetcher<DataRequest, ()> = Fetcher::new();
        let base = DataRequest::new(Some("kerala".to_string()), 2020).with_param("sample_rate", 10);

        assert!(fetcher.request(base.clone()).is_some());
        assert!(fetcher
            .request(DataRequest::new(Some("kerala".to_string()), 2020).with_param("sample_rate", 10))
            .is_none());
        assert!(fetcher.request(base.with_param("sample_rate", 20)).is_some());
    }

    #[test]
    fn failures_distinguish_network_from_server() {
        let mut fetcher: Fetcher<i32, ()> = Fetcher::new();
        let ticket = fetcher.begin(1);
        fetcher.complete(
            &ticket,
            Err(ApiError::NetworkUnreachable("connection refused".to_string())),
        );
        assert!(fetcher
            .state()
            .error()
            .is_some_and(|reason| reason.contains("backend unreachable")));

        let ticket = fetcher.begin(2);
        fetcher.complete(
            &ticket,
            Err(ApiError::Server {
                status: 500,
                message: "boom".to_string(),
            }),
        );
        assert_eq!(fetcher.state().error(), Some("server returned 500: boom"));
    }

    #[test]
    fn reset_makes_pending_reply_stale() {
        let mut fetcher: Fetcher<i32, i32> = Fetcher::new();
        let ticket = fetcher.begin(1);
        fetcher.reset();
        assert!(!fetcher.complete(&ticket, Ok(1)));
        assert_eq!(fetcher.state(), &FetchState::Idle);
    }
}
