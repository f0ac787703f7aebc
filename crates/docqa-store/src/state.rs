//! The state tree and the action type routed to its slices.

use crate::slices::{AuthAction, DocumentsAction, DocumentsState, QaAction, QaState, Session};

/// Snapshot of the whole tree, as published to subscribers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub auth: Session,
    pub documents: DocumentsState,
    pub qa: QaState,
}

/// A named request to transition one slice.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Auth(AuthAction),
    Documents(DocumentsAction),
    Qa(QaAction),
}

impl Action {
    /// `<slice>/<operation>[/<phase>]`, used in logs.
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::Auth(action) => action.name(),
            Self::Documents(action) => action.name(),
            Self::Qa(action) => action.name(),
        }
    }
}

impl From<AuthAction> for Action {
    fn from(action: AuthAction) -> Self {
        Self::Auth(action)
    }
}

impl From<DocumentsAction> for Action {
    fn from(action: DocumentsAction) -> Self {
        Self::Documents(action)
    }
}

impl From<QaAction> for Action {
    fn from(action: QaAction) -> Self {
        Self::Qa(action)
    }
}

impl AppState {
    /// Route an action to the slice that owns it.
    pub fn reduce(&mut self, action: Action) {
        match action {
            Action::Auth(action) => self.auth.reduce(action),
            Action::Documents(action) => self.documents.reduce(action),
            Action::Qa(action) => self.qa.reduce(action),
        }
    }
}
