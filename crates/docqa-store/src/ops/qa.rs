use chrono::Utc;
use docqa_core::ActionError;
use docqa_core::entities::Conversation;
use docqa_core::requests::AskQuestion;
use docqa_transport::Transport;

use super::{fallback, rejected};
use crate::lifecycle::Transition;
use crate::persistence::PersistencePort;
use crate::slices::{Answered, QaAction};
use crate::store::Store;

impl<T: Transport, P: PersistencePort> Store<T, P> {
    /// # Errors
    ///
    /// Returns the [`ActionError`] also recorded in `qa.last_error`.
    pub async fn fetch_conversations(&self) -> Result<Vec<Conversation>, ActionError> {
        self.dispatch(QaAction::FetchConversations(Transition::Pending));
        let access = self.access_token();
        let result = self
            .transport
            .list_conversations(access.as_deref())
            .await
            .map_err(rejected(fallback::CONVERSATIONS));
        self.dispatch(QaAction::FetchConversations(Transition::settle(
            result.clone(),
        )));
        result
    }

    /// Ask a question, optionally scoped to documents or continuing a
    /// conversation. The answer is appended to that conversation's history,
    /// which becomes the active one.
    ///
    /// # Errors
    ///
    /// Returns the [`ActionError`] also recorded in `qa.last_error`.
    pub async fn ask_question(&self, request: AskQuestion) -> Result<Answered, ActionError> {
        self.dispatch(QaAction::Ask(Transition::Pending));
        let result = self.send_question(&request).await;
        self.dispatch(QaAction::Ask(Transition::settle(result.clone())));
        result
    }

    async fn send_question(&self, request: &AskQuestion) -> Result<Answered, ActionError> {
        request.validate()?;
        let access = self.access_token();
        let answer = self
            .transport
            .ask_question(access.as_deref(), request)
            .await
            .map_err(rejected(fallback::ASK))?;
        tracing::debug!(
            conversation = %answer.conversation_id,
            sources = answer.sources.len(),
            elapsed_ms = answer.processing_time_ms,
            "answer received"
        );
        let (conversation_id, question) = answer.into_question(Utc::now());
        Ok(Answered {
            conversation_id,
            question,
        })
    }

    /// # Errors
    ///
    /// Returns the [`ActionError`] also recorded in `qa.last_error`.
    pub async fn delete_conversation(&self, id: &str) -> Result<(), ActionError> {
        self.dispatch(QaAction::DeleteConversation(Transition::Pending));
        let access = self.access_token();
        let result = self
            .transport
            .delete_conversation(access.as_deref(), id)
            .await
            .map_err(rejected(fallback::DELETE_CONVERSATION));
        self.dispatch(QaAction::DeleteConversation(Transition::settle(
            result.clone().map(|()| id.to_string()),
        )));
        result
    }

    pub fn select_conversation(&self, id: Option<String>) {
        self.dispatch(QaAction::SelectConversation(id));
    }

    pub fn clear_qa_error(&self) {
        self.dispatch(QaAction::ClearError);
    }
}
