//! # docqa-store
//!
//! Client-side state for the docqa service: the session (profile and token
//! pair), the user's documents, and question-answering conversations.
//!
//! A [`Store`] owns the state tree ([`AppState`]) and two injected ports:
//!
//! - a [`Transport`](docqa_transport::Transport) for backend calls
//! - a [`PersistencePort`] holding the token pair across restarts
//!
//! Every asynchronous operation on the store moves its slice through
//! `pending → fulfilled | rejected` ([`Transition`]). Failures land in the
//! slice's `last_error` as a [`docqa_core::ActionError`].
//!
//! Each slice has one `pending`/`last_error` pair shared by all of its
//! operations. Two operations in flight on the same slice therefore settle
//! in resolution order, and the last one wins.

pub mod claims;
mod lifecycle;
mod ops;
pub mod persistence;
pub mod slices;
mod state;
mod store;

#[cfg(test)]
mod test_support;

pub use lifecycle::Transition;
pub use persistence::{FilePort, KeyringPort, MemoryPort, PersistenceError, PersistencePort};
pub use slices::{Answered, DocumentsState, QaState, Session};
pub use state::{Action, AppState};
pub use store::Store;
