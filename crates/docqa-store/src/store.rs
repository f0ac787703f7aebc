//! The state container.

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use docqa_transport::Transport;
use tokio::sync::watch;

use crate::claims;
use crate::persistence::{PersistencePort, tokens};
use crate::slices::Session;
use crate::state::{Action, AppState};

/// Holds the state tree and the two injected ports.
///
/// Every transition is applied synchronously through [`Store::dispatch`] and
/// published to subscribers. Operations (see the `ops` module) suspend only on
/// transport calls; no lock is held across an await.
pub struct Store<T, P> {
    pub(crate) transport: T,
    pub(crate) port: P,
    state: watch::Sender<AppState>,
    /// Serializes port writes with the session transition they belong to, so
    /// the stored pair and the in-memory pair change together.
    session_lock: Mutex<()>,
}

impl<T: Transport, P: PersistencePort> Store<T, P> {
    /// Build the container, seeding the session from the stored token pair.
    #[must_use]
    pub fn new(transport: T, port: P) -> Self {
        let stored = tokens::load(&port);
        if let Some(pair) = &stored {
            if claims::is_expired(&pair.access, Utc::now()) {
                tracing::warn!("restored access token has expired; requests may be rejected");
            }
            tracing::debug!("session restored from token store");
        }
        let initial = AppState {
            auth: Session::restored(stored),
            ..AppState::default()
        };
        Self {
            transport,
            port,
            state: watch::Sender::new(initial),
            session_lock: Mutex::new(()),
        }
    }

    /// A copy of the current tree.
    #[must_use]
    pub fn snapshot(&self) -> AppState {
        self.state.borrow().clone()
    }

    /// A receiver notified after every applied transition.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.state.subscribe()
    }

    /// Apply one transition and publish the new tree.
    pub fn dispatch(&self, action: impl Into<Action>) {
        let action = action.into();
        tracing::debug!(action = %action.name(), "dispatch");
        self.state.send_modify(|state| state.reduce(action));
    }

    /// Read one value out of the current tree without cloning all of it.
    pub(crate) fn select<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
        f(&self.state.borrow())
    }

    pub(crate) fn lock_session(&self) -> MutexGuard<'_, ()> {
        self.session_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
