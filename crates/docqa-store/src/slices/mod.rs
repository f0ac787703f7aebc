//! State slices. Each slice owns its subtree and a pure reducer over its
//! action enum; side effects live in [`crate::ops`].

mod documents;
mod qa;
mod session;

pub use documents::{DocumentsAction, DocumentsState};
pub use qa::{Answered, QaAction, QaState};
pub use session::{AuthAction, LoginSuccess, Session};
