//! Question-answering slice: conversations, their question history, and the
//! conversation currently being viewed.

use std::collections::BTreeMap;

use docqa_core::ActionError;
use docqa_core::entities::{Conversation, Question};

use crate::lifecycle::{Transition, apply};

/// An answered question and the conversation it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct Answered {
    pub conversation_id: String,
    pub question: Question,
}

#[derive(Debug, Clone, PartialEq)]
pub enum QaAction {
    FetchConversations(Transition<Vec<Conversation>>),
    Ask(Transition<Answered>),
    DeleteConversation(Transition<String>),
    SelectConversation(Option<String>),
    ClearError,
}

impl QaAction {
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::FetchConversations(t) => format!("qa/fetchConversations/{}", t.phase()),
            Self::Ask(t) => format!("qa/ask/{}", t.phase()),
            Self::DeleteConversation(t) => format!("qa/deleteConversation/{}", t.phase()),
            Self::SelectConversation(_) => "qa/selectConversation".to_string(),
            Self::ClearError => "qa/clearError".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct QaState {
    /// Most recently active first.
    pub conversations: Vec<Conversation>,
    /// Questions answered in this process, per conversation, oldest first.
    pub history: BTreeMap<String, Vec<Question>>,
    pub active_conversation: Option<String>,
    pub pending: bool,
    pub last_error: Option<ActionError>,
}

impl QaState {
    #[must_use]
    pub fn conversation(&self, id: &str) -> Option<&Conversation> {
        self.conversations.iter().find(|conv| conv.id == id)
    }

    /// History of the active conversation.
    #[must_use]
    pub fn active_history(&self) -> &[Question] {
        self.active_conversation
            .as_ref()
            .and_then(|id| self.history.get(id))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn record(&mut self, answered: Answered) {
        let Answered {
            conversation_id,
            question,
        } = answered;

        match self
            .conversations
            .iter()
            .position(|conv| conv.id == conversation_id)
        {
            Some(index) => {
                let mut conv = self.conversations.remove(index);
                conv.record(question.clone());
                self.conversations.insert(0, conv);
            }
            None => {
                let conv = Conversation::started_by(conversation_id.clone(), question.clone());
                self.conversations.insert(0, conv);
            }
        }

        self.history
            .entry(conversation_id.clone())
            .or_default()
            .push(question);
        self.active_conversation = Some(conversation_id);
    }

    pub(crate) fn reduce(&mut self, action: QaAction) {
        let (pending, last_error) = (&mut self.pending, &mut self.last_error);
        match action {
            QaAction::FetchConversations(t) => {
                if let Some(conversations) = apply(pending, last_error, t) {
                    self.conversations = conversations;
                }
            }
            QaAction::Ask(t) => {
                if let Some(answered) = apply(pending, last_error, t) {
                    self.record(answered);
                }
            }
            QaAction::DeleteConversation(t) => {
                if let Some(id) = apply(pending, last_error, t) {
                    self.conversations.retain(|conv| conv.id != id);
                    self.history.remove(&id);
                    if self.active_conversation.as_deref() == Some(id.as_str()) {
                        self.active_conversation = None;
                    }
                }
            }
            QaAction::SelectConversation(id) => self.active_conversation = id,
            QaAction::ClearError => self.last_error = None,
        }
    }
}
