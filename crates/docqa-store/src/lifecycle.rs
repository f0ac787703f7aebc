//! Start/success/failure transitions shared by every asynchronous action.

use docqa_core::ActionError;

/// One step of an asynchronous action.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition<T> {
    /// The side effect has been issued.
    Pending,
    /// The side effect resolved with a payload.
    Fulfilled(T),
    /// The side effect failed.
    Rejected(ActionError),
}

impl<T> Transition<T> {
    #[must_use]
    pub const fn phase(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Fulfilled(_) => "fulfilled",
            Self::Rejected(_) => "rejected",
        }
    }

    /// Build the settling transition from an operation's result.
    pub fn settle(result: Result<T, ActionError>) -> Self {
        match result {
            Ok(value) => Self::Fulfilled(value),
            Err(error) => Self::Rejected(error),
        }
    }
}

/// Apply a transition to a slice's shared `pending`/`last_error` pair.
///
/// Returns the payload of a fulfilled transition for the slice to store.
pub(crate) fn apply<T>(
    pending: &mut bool,
    last_error: &mut Option<ActionError>,
    transition: Transition<T>,
) -> Option<T> {
    match transition {
        Transition::Pending => {
            *pending = true;
            *last_error = None;
            None
        }
        Transition::Fulfilled(value) => {
            *pending = false;
            *last_error = None;
            Some(value)
        }
        Transition::Rejected(error) => {
            *pending = false;
            *last_error = Some(error);
            None
        }
    }
}
