//! Asynchronous operations on the [`Store`](crate::Store).
//!
//! Each operation dispatches `pending`, awaits the transport, and dispatches
//! the settling transition. The same error is returned to the caller; the
//! slice's `last_error` stays the channel the presentation layer renders.

mod documents;
mod qa;
mod session;

use docqa_core::ActionError;
use docqa_transport::TransportError;

/// Generic markers used when a rejection carries no server message.
pub(crate) mod fallback {
    pub const LOGIN: &str = "Login failed";
    pub const REGISTER: &str = "Registration failed";
    pub const PROFILE: &str = "Failed to fetch profile";
    pub const REFRESH: &str = "Token refresh failed";
    pub const DOCUMENTS: &str = "Failed to fetch documents";
    pub const DOCUMENT: &str = "Failed to fetch document";
    pub const UPLOAD: &str = "Upload failed";
    pub const DELETE_DOCUMENT: &str = "Failed to delete document";
    pub const CHUNKS: &str = "Failed to fetch chunks";
    pub const CONVERSATIONS: &str = "Failed to fetch conversations";
    pub const ASK: &str = "Failed to get answer";
    pub const DELETE_CONVERSATION: &str = "Failed to delete conversation";
}

/// `map_err` adapter turning a transport failure into the slice error.
pub(crate) fn rejected(fallback: &'static str) -> impl FnOnce(TransportError) -> ActionError {
    move |error| error.into_action_error(fallback)
}
