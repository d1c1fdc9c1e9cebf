//! Data source adapter: loads the user list once and reports a load state.
//!
//! The fetch runs on a spawned task after an optional delay. It can be
//! cancelled at any point, and a cancelled fetch never delivers a result, so
//! a view torn down before the fetch completes is never updated afterwards.

use std::sync::Arc;
use std::time::Duration;

use log::debug;
use log::info;
use log::warn;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::UsersClient;
use crate::error::Error;
use crate::model::User;

/// Delay before the first fetch is issued.
pub const DEFAULT_FETCH_DELAY: Duration = Duration::from_millis(1000);

/// Result of one fetch attempt.
pub type FetchOutcome = Result<Vec<User>, Error>;

/// Where the user list currently stands.
#[derive(Debug, Clone, Default)]
pub enum LoadState {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// A fetch is pending or in flight.
    Loading,
    /// The list arrived.
    Loaded(Arc<[User]>),
    /// The last fetch failed; the message is meant for display.
    Failed(String),
}

impl LoadState {
    /// Returns `true` while a fetch is pending.
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Returns the loaded users, if any.
    pub fn users(&self) -> Option<&Arc<[User]>> {
        match self {
            Self::Loaded(users) => Some(users),
            _ => None,
        }
    }

    /// Returns the failure message, if the last fetch failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Handle to one spawned fetch.
///
/// Dropping the handle cancels the fetch.
#[derive(Debug)]
pub struct FetchHandle {
    cancel: CancellationToken,
    rx: mpsc::Receiver<FetchOutcome>,
}

impl FetchHandle {
    /// Spawns a fetch that starts after `delay`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(client: UsersClient, delay: Duration) -> Self {
        let cancel = CancellationToken::new();
        let (tx, rx) = mpsc::channel(1);
        let token = cancel.clone();

        tokio::spawn(async move {
            let outcome = tokio::select! {
                _ = token.cancelled() => {
                    debug!("fetch cancelled before completion");
                    return;
                }
                outcome = async {
                    tokio::time::sleep(delay).await;
                    client.fetch_users().await
                } => outcome,
            };

            if token.is_cancelled() {
                debug!("fetch finished after cancellation, dropping result");
                return;
            }
            let _ = tx.send(outcome).await;
        });

        Self { cancel, rx }
    }

    /// Cancels the fetch. Idempotent.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Returns `true` if the fetch was cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Waits for the outcome.
    ///
    /// Returns `None` if the fetch was cancelled.
    pub async fn recv(&mut self) -> Option<FetchOutcome> {
        if self.is_cancelled() {
            return None;
        }
        self.rx.recv().await
    }

    /// Takes the outcome if it has already arrived.
    pub fn try_recv(&mut self) -> Option<FetchOutcome> {
        if self.is_cancelled() {
            return None;
        }
        self.rx.try_recv().ok()
    }
}

impl Drop for FetchHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Owns the user list and at most one in-flight fetch.
///
/// # Example
///
/// ```ignore
/// let mut source = UserSource::new(client, DEFAULT_FETCH_DELAY);
/// source.start();
///
/// while let Some(outcome) = source.recv().await {
///     source.apply(outcome);
/// }
/// ```
#[derive(Debug)]
pub struct UserSource {
    client: UsersClient,
    delay: Duration,
    state: LoadState,
    pending: Option<FetchHandle>,
}

impl UserSource {
    /// Creates an idle source.
    pub fn new(client: UsersClient, delay: Duration) -> Self {
        Self {
            client,
            delay,
            state: LoadState::Idle,
            pending: None,
        }
    }

    /// Returns the current load state.
    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// Returns `true` while a fetch is in flight.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Issues the fetch unless one is already in flight.
    ///
    /// Returns `true` if a fetch was started.
    pub fn start(&mut self) -> bool {
        if self.pending.is_some() {
            return false;
        }
        info!("loading users from {} in {:?}", self.client.url(), self.delay);
        self.pending = Some(FetchHandle::spawn(self.client.clone(), self.delay));
        self.state = LoadState::Loading;
        true
    }

    /// Cancels any in-flight fetch and fetches again without delay.
    ///
    /// This is the recovery path after a failure. A previously loaded list
    /// is replaced only once the new fetch succeeds.
    pub fn refetch(&mut self) {
        self.cancel();
        info!("re-fetching users from {}", self.client.url());
        self.pending = Some(FetchHandle::spawn(self.client.clone(), Duration::ZERO));
        if self.state.users().is_none() {
            self.state = LoadState::Loading;
        }
    }

    /// Cancels the in-flight fetch, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.cancel();
            if self.state.is_loading() {
                self.state = LoadState::Idle;
            }
        }
    }

    /// Waits for the in-flight fetch.
    ///
    /// Returns `None` immediately when nothing is in flight.
    pub async fn recv(&mut self) -> Option<FetchOutcome> {
        let outcome = self.pending.as_mut()?.recv().await;
        if outcome.is_none() {
            self.pending = None;
        }
        outcome
    }

    /// Applies a finished fetch if one is ready. Returns `true` if the state changed.
    pub fn poll(&mut self) -> bool {
        match self.pending.as_mut().and_then(FetchHandle::try_recv) {
            Some(outcome) => {
                self.apply(outcome);
                true
            }
            None => false,
        }
    }

    /// Records the outcome of a fetch.
    pub fn apply(&mut self, outcome: FetchOutcome) {
        self.pending = None;
        match outcome {
            Ok(users) => {
                info!("loaded {} users", users.len());
                self.state = LoadState::Loaded(users.into());
            }
            Err(e) => {
                warn!("loading users failed (retryable: {}): {}", e.is_retryable(), e);
                self.state = LoadState::Failed(e.to_string());
            }
        }
    }
}

impl Drop for UserSource {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::fixtures::named;

    fn source() -> UserSource {
        let client = UsersClient::builder()
            .url("http://127.0.0.1:9/users")
            .build()
            .unwrap();
        UserSource::new(client, Duration::from_secs(60))
    }

    #[test]
    fn test_load_state_accessors() {
        assert!(!LoadState::Idle.is_loading());
        assert!(LoadState::Loading.is_loading());
        assert_eq!(LoadState::Failed("boom".into()).error(), Some("boom"));
        let users: Arc<[User]> = named(&["Alice"]).into();
        assert_eq!(LoadState::Loaded(users).users().map(|u| u.len()), Some(1));
    }

    #[test]
    fn test_apply_success_and_failure() {
        let mut source = source();
        source.apply(Ok(named(&["Alice", "bob"])));
        assert_eq!(source.state().users().map(|u| u.len()), Some(2));

        source.apply(Err(ApiError::http(500, "boom").into()));
        assert_eq!(source.state().error(), Some("HTTP 500: boom"));
    }

    #[tokio::test]
    async fn test_start_is_single_flight() {
        let mut source = source();
        assert!(source.start());
        assert!(!source.start());
        assert!(source.state().is_loading());
        assert!(source.is_pending());
    }

    #[tokio::test]
    async fn test_cancel_before_delay_delivers_nothing() {
        let mut source = source();
        source.start();
        source.cancel();

        assert!(!source.is_pending());
        assert!(matches!(source.state(), LoadState::Idle));
        assert!(source.recv().await.is_none());
        assert!(!source.poll());
    }

    #[tokio::test]
    async fn test_cancelled_handle_yields_none() {
        let client = UsersClient::builder()
            .url("http://127.0.0.1:9/users")
            .build()
            .unwrap();
        let mut handle = FetchHandle::spawn(client, Duration::from_secs(60));
        handle.cancel();
        assert!(handle.is_cancelled());
        assert!(handle.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_refetch_keeps_loaded_list_until_replaced() {
        let mut source = source();
        source.apply(Ok(named(&["Alice"])));
        source.refetch();
        assert!(source.is_pending());
        assert_eq!(source.state().users().map(|u| u.len()), Some(1));
    }
}
