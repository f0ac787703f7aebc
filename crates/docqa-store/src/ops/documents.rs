use chrono::Utc;
use docqa_core::ActionError;
use docqa_core::entities::{Document, DocumentChunk};
use docqa_core::requests::DocumentUpload;
use docqa_transport::Transport;

use super::{fallback, rejected};
use crate::lifecycle::Transition;
use crate::persistence::PersistencePort;
use crate::slices::DocumentsAction;
use crate::store::Store;

impl<T: Transport, P: PersistencePort> Store<T, P> {
    /// Replace the document collection with the server's list.
    ///
    /// # Errors
    ///
    /// Returns the [`ActionError`] also recorded in `documents.last_error`.
    pub async fn fetch_documents(&self) -> Result<Vec<Document>, ActionError> {
        self.dispatch(DocumentsAction::FetchAll(Transition::Pending));
        let access = self.access_token();
        let result = self
            .transport
            .list_documents(access.as_deref())
            .await
            .map_err(rejected(fallback::DOCUMENTS));
        self.dispatch(DocumentsAction::FetchAll(Transition::settle(result.clone())));
        result
    }

    /// Fetch one document (typically to poll its processing status).
    ///
    /// # Errors
    ///
    /// Returns the [`ActionError`] also recorded in `documents.last_error`.
    pub async fn fetch_document(&self, id: &str) -> Result<Document, ActionError> {
        self.dispatch(DocumentsAction::FetchOne(Transition::Pending));
        let access = self.access_token();
        let result = self
            .transport
            .get_document(access.as_deref(), id)
            .await
            .map_err(rejected(fallback::DOCUMENT));
        self.dispatch(DocumentsAction::FetchOne(Transition::settle(result.clone())));
        result
    }

    /// Upload a file. The new document is appended in the `pending` state.
    ///
    /// # Errors
    ///
    /// Returns the [`ActionError`] also recorded in `documents.last_error`,
    /// including local validation failures such as the upload size limit.
    pub async fn upload_document(&self, upload: DocumentUpload) -> Result<Document, ActionError> {
        self.dispatch(DocumentsAction::Upload(Transition::Pending));
        let result = self.send_upload(&upload).await;
        if let Ok(document) = &result {
            tracing::info!(id = %document.id, title = %document.title, "document uploaded");
        }
        self.dispatch(DocumentsAction::Upload(Transition::settle(result.clone())));
        result
    }

    async fn send_upload(&self, upload: &DocumentUpload) -> Result<Document, ActionError> {
        upload.validate()?;
        let access = self.access_token();
        let ack = self
            .transport
            .upload_document(access.as_deref(), upload)
            .await
            .map_err(rejected(fallback::UPLOAD))?;
        let size = u64::try_from(upload.bytes.len()).unwrap_or(u64::MAX);
        Ok(ack.into_document(size, Utc::now()))
    }

    /// Delete a document and forget its cached chunks.
    ///
    /// # Errors
    ///
    /// Returns the [`ActionError`] also recorded in `documents.last_error`.
    pub async fn delete_document(&self, id: &str) -> Result<(), ActionError> {
        self.dispatch(DocumentsAction::Delete(Transition::Pending));
        let access = self.access_token();
        let result = self
            .transport
            .delete_document(access.as_deref(), id)
            .await
            .map_err(rejected(fallback::DELETE_DOCUMENT));
        self.dispatch(DocumentsAction::Delete(Transition::settle(
            result.clone().map(|()| id.to_string()),
        )));
        result
    }

    /// Fetch and cache the chunks of a processed document.
    ///
    /// # Errors
    ///
    /// Returns the [`ActionError`] also recorded in `documents.last_error`.
    pub async fn fetch_chunks(&self, id: &str) -> Result<Vec<DocumentChunk>, ActionError> {
        self.dispatch(DocumentsAction::FetchChunks(Transition::Pending));
        let access = self.access_token();
        let result = self
            .transport
            .list_chunks(access.as_deref(), id)
            .await
            .map_err(rejected(fallback::CHUNKS));
        self.dispatch(DocumentsAction::FetchChunks(Transition::settle(
            result.clone().map(|chunks| (id.to_string(), chunks)),
        )));
        result
    }

    pub fn clear_documents_error(&self) {
        self.dispatch(DocumentsAction::ClearError);
    }
}
