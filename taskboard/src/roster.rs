//! One-shot loading of the remote user roster.
//!
//! [`load_roster`] drives the lifecycle `Loading → Ready | Failed` on a
//! [`Store`]. The cause of a failure is logged but never surfaced: the
//! snapshot only ever carries [`ROSTER_ERROR_MESSAGE`]. There is no retry.

use std::future::Future;
use std::time::Duration;

use taskboard_proto::codec;
use taskboard_proto::user::User;
use tokio::task::JoinHandle;
use url::Url;

use crate::store::{Action, Store};

/// Roster endpoint used when none is configured.
pub const DEFAULT_ROSTER_URL: &str = "https://jsonplaceholder.typicode.com/users";

/// Message stored in the snapshot when the roster cannot be loaded.
pub const ROSTER_ERROR_MESSAGE: &str = "Unable to load users.";

/// Errors that can occur while fetching the roster.
#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    /// The HTTP client could not be built.
    #[error("http client setup failed: {0}")]
    Client(String),

    /// The request did not complete.
    #[error("roster request failed: {0}")]
    Transport(String),

    /// The server answered with a non-success status.
    #[error("roster request returned status {0}")]
    Status(u16),

    /// The body was not a JSON array of users.
    #[error("roster body could not be decoded: {0}")]
    Decode(#[from] codec::CodecError),
}

/// Somewhere a roster can be fetched from.
pub trait RosterSource: Send + Sync {
    /// Fetches the full roster.
    fn fetch(&self) -> impl Future<Output = Result<Vec<User>, RosterError>> + Send;
}

/// Fetches the roster with an HTTP GET.
#[derive(Debug, Clone)]
pub struct HttpRosterSource {
    client: reqwest::Client,
    url: Url,
}

impl HttpRosterSource {
    /// Creates a source for `url` with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::Client`] if the HTTP client cannot be built
    /// (for example, no TLS backend is available).
    pub fn new(url: Url, timeout: Duration) -> Result<Self, RosterError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RosterError::Client(e.to_string()))?;
        Ok(Self { client, url })
    }

    /// The endpoint this source queries.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }
}

impl RosterSource for HttpRosterSource {
    async fn fetch(&self) -> Result<Vec<User>, RosterError> {
        let response = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(|e| RosterError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RosterError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| RosterError::Transport(e.to_string()))?;
        Ok(codec::decode_users(&body)?)
    }
}

/// Loads the roster into `store`.
///
/// Marks the roster as loading, fetches it, publishes the users or the
/// fixed error message, and always finishes with `SetLoading(false)`.
/// Results from a load that has been superseded by a newer one are
/// discarded.
pub async fn load_roster<S: RosterSource>(store: &Store, source: &S) {
    let ticket = store.begin_roster_load();

    match source.fetch().await {
        Ok(users) => {
            tracing::info!(count = users.len(), "roster loaded");
            store.dispatch_roster(ticket, Action::SetUsers(users));
        }
        Err(err) => {
            tracing::warn!(error = %err, "roster load failed");
            store.dispatch_roster(ticket, Action::SetError(ROSTER_ERROR_MESSAGE.to_string()));
        }
    }

    store.dispatch_roster(ticket, Action::SetLoading(false));
}

/// Spawns [`load_roster`] on the tokio runtime.
///
/// The returned handle may be aborted; an aborted load leaves the roster
/// in whatever state it reached.
pub fn spawn_roster_load<S>(store: Store, source: S) -> JoinHandle<()>
where
    S: RosterSource + 'static,
{
    tokio::spawn(async move {
        load_roster(&store, &source).await;
    })
}
