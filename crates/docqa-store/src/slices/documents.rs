//! Documents slice: the user's uploaded documents and their cached chunks.

use std::collections::BTreeMap;

use docqa_core::ActionError;
use docqa_core::entities::{Document, DocumentChunk};

use crate::lifecycle::{Transition, apply};

#[derive(Debug, Clone, PartialEq)]
pub enum DocumentsAction {
    FetchAll(Transition<Vec<Document>>),
    FetchOne(Transition<Document>),
    Upload(Transition<Document>),
    Delete(Transition<String>),
    /// Chunks keyed by their document id.
    FetchChunks(Transition<(String, Vec<DocumentChunk>)>),
    ClearError,
}

impl DocumentsAction {
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::FetchAll(t) => format!("documents/fetchAll/{}", t.phase()),
            Self::FetchOne(t) => format!("documents/fetchOne/{}", t.phase()),
            Self::Upload(t) => format!("documents/upload/{}", t.phase()),
            Self::Delete(t) => format!("documents/delete/{}", t.phase()),
            Self::FetchChunks(t) => format!("documents/fetchChunks/{}", t.phase()),
            Self::ClearError => "documents/clearError".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentsState {
    pub documents: Vec<Document>,
    pub chunks: BTreeMap<String, Vec<DocumentChunk>>,
    pub pending: bool,
    pub last_error: Option<ActionError>,
}

impl DocumentsState {
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Document> {
        self.documents.iter().find(|doc| doc.id == id)
    }

    fn upsert(&mut self, document: Document) {
        match self.documents.iter_mut().find(|doc| doc.id == document.id) {
            Some(existing) => *existing = document,
            None => self.documents.push(document),
        }
    }

    pub(crate) fn reduce(&mut self, action: DocumentsAction) {
        let (pending, last_error) = (&mut self.pending, &mut self.last_error);
        match action {
            DocumentsAction::FetchAll(t) => {
                if let Some(documents) = apply(pending, last_error, t) {
                    // Chunks of documents that no longer exist are dropped.
                    self.chunks
                        .retain(|id, _| documents.iter().any(|doc| &doc.id == id));
                    self.documents = documents;
                }
            }
            DocumentsAction::FetchOne(t) => {
                if let Some(document) = apply(pending, last_error, t) {
                    let stale = self
                        .get(&document.id)
                        .is_some_and(|known| !document.status.is_reachable_from(known.status));
                    if stale {
                        tracing::debug!(id = %document.id, status = %document.status, "ignoring stale document");
                    } else {
                        self.upsert(document);
                    }
                }
            }
            DocumentsAction::Upload(t) => {
                if let Some(document) = apply(pending, last_error, t) {
                    self.upsert(document);
                }
            }
            DocumentsAction::Delete(t) => {
                if let Some(id) = apply(pending, last_error, t) {
                    self.documents.retain(|doc| doc.id != id);
                    self.chunks.remove(&id);
                }
            }
            DocumentsAction::FetchChunks(t) => {
                if let Some((id, chunks)) = apply(pending, last_error, t) {
                    self.chunks.insert(id, chunks);
                }
            }
            DocumentsAction::ClearError => self.last_error = None,
        }
    }
}
