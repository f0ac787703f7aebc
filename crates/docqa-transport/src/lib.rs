//! # docqa-transport
//!
//! The boundary between the state container and the backend API.
//!
//! [`Transport`] is the port the container is written against: one typed
//! method per backend endpoint, each returning either the decoded payload or a
//! [`TransportError`]. [`HttpTransport`] is the reqwest-backed implementation;
//! tests substitute scripted fakes.
//!
//! Credentials are passed explicitly per call. The transport never reads the
//! token store, which is owned by the session slice.

pub mod endpoints;
mod error;
mod http;

pub use error::TransportError;
pub use http::HttpTransport;

use std::future::Future;

use docqa_core::entities::{Conversation, Document, DocumentChunk, Profile};
use docqa_core::requests::{AskQuestion, DocumentUpload, LoginCredentials, RegisterData};
use docqa_core::responses::{
    AskAnswer, RefreshedToken, RegisteredAccount, TokenPair, UploadedDocument,
};

/// Result of a single backend call.
pub type TransportResult<T> = Result<T, TransportError>;

/// Typed access to the backend endpoints.
///
/// `access` is the bearer token to attach; `None` sends the request
/// unauthenticated.
pub trait Transport: Send + Sync {
    /// `POST /auth/token/`
    fn obtain_token(
        &self,
        credentials: &LoginCredentials,
    ) -> impl Future<Output = TransportResult<TokenPair>> + Send;

    /// `POST /auth/token/refresh/`
    fn refresh_token(
        &self,
        refresh: &str,
    ) -> impl Future<Output = TransportResult<RefreshedToken>> + Send;

    /// `GET /auth/profile/`
    fn fetch_profile(
        &self,
        access: Option<&str>,
    ) -> impl Future<Output = TransportResult<Profile>> + Send;

    /// `POST /auth/register/`
    fn register(
        &self,
        data: &RegisterData,
    ) -> impl Future<Output = TransportResult<RegisteredAccount>> + Send;

    /// `GET /documents/`
    fn list_documents(
        &self,
        access: Option<&str>,
    ) -> impl Future<Output = TransportResult<Vec<Document>>> + Send;

    /// `GET /documents/{id}/`
    fn get_document(
        &self,
        access: Option<&str>,
        id: &str,
    ) -> impl Future<Output = TransportResult<Document>> + Send;

    /// `POST /documents/` (multipart)
    fn upload_document(
        &self,
        access: Option<&str>,
        upload: &DocumentUpload,
    ) -> impl Future<Output = TransportResult<UploadedDocument>> + Send;

    /// `DELETE /documents/{id}/`
    fn delete_document(
        &self,
        access: Option<&str>,
        id: &str,
    ) -> impl Future<Output = TransportResult<()>> + Send;

    /// `GET /documents/{id}/chunks/`
    fn list_chunks(
        &self,
        access: Option<&str>,
        id: &str,
    ) -> impl Future<Output = TransportResult<Vec<DocumentChunk>>> + Send;

    /// `GET /qa/conversations/`
    fn list_conversations(
        &self,
        access: Option<&str>,
    ) -> impl Future<Output = TransportResult<Vec<Conversation>>> + Send;

    /// `POST /qa/conversations/ask/`
    fn ask_question(
        &self,
        access: Option<&str>,
        request: &AskQuestion,
    ) -> impl Future<Output = TransportResult<AskAnswer>> + Send;

    /// `DELETE /qa/conversations/{id}/`
    fn delete_conversation(
        &self,
        access: Option<&str>,
        id: &str,
    ) -> impl Future<Output = TransportResult<()>> + Send;
}
