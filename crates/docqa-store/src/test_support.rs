//! Fakes for the two injected ports.

use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::sync::{Arc, Mutex, PoisonError};

use docqa_core::entities::{Conversation, Document, DocumentChunk, Profile};
use docqa_core::requests::{AskQuestion, DocumentUpload, LoginCredentials, RegisterData};
use docqa_core::responses::{
    AskAnswer, RefreshedToken, RegisteredAccount, TokenPair, UploadedDocument,
};
use docqa_transport::{Transport, TransportError, TransportResult};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::oneshot;

use crate::persistence::{MemoryPort, PersistenceError, PersistencePort};

/// A [`MemoryPort`] whose writes to selected keys fail on demand.
#[derive(Debug, Default)]
pub(crate) struct FlakyPort {
    inner: MemoryPort,
    failing: Mutex<BTreeSet<String>>,
}

impl FlakyPort {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn fail_writes_to(&self, key: &str) {
        self.failing
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string());
    }

    pub(crate) fn heal(&self) {
        self.failing
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    pub(crate) const fn inner(&self) -> &MemoryPort {
        &self.inner
    }
}

impl PersistencePort for FlakyPort {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        let failing = self
            .failing
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(key);
        if failing {
            return Err(PersistenceError::Keyring(format!("write to {key} refused")));
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), PersistenceError> {
        self.inner.remove(key)
    }
}

/// Backend endpoints, as seen by [`ScriptedTransport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Endpoint {
    ObtainToken,
    RefreshToken,
    FetchProfile,
    Register,
    ListDocuments,
    GetDocument,
    UploadDocument,
    DeleteDocument,
    ListChunks,
    ListConversations,
    Ask,
    DeleteConversation,
}

/// One recorded call: the endpoint and the bearer token it carried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Call {
    pub endpoint: Endpoint,
    pub access: Option<String>,
}

struct Reply {
    result: TransportResult<Value>,
    gate: Option<oneshot::Receiver<()>>,
}

#[derive(Default)]
struct Script {
    replies: BTreeMap<Endpoint, VecDeque<Reply>>,
    calls: Vec<Call>,
}

/// A transport answering from per-endpoint queues of canned replies.
///
/// Gated replies are held until their sender fires, which lets a test decide
/// the order in which concurrent calls resolve.
#[derive(Clone, Default)]
pub(crate) struct ScriptedTransport {
    script: Arc<Mutex<Script>>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn push(&self, endpoint: Endpoint, result: TransportResult<Value>, gate: Option<oneshot::Receiver<()>>) {
        self.lock()
            .replies
            .entry(endpoint)
            .or_default()
            .push_back(Reply { result, gate });
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn reply(&self, endpoint: Endpoint, body: Value) -> &Self {
        self.push(endpoint, Ok(body), None);
        self
    }

    pub(crate) fn fail(&self, endpoint: Endpoint, error: TransportError) -> &Self {
        self.push(endpoint, Err(error), None);
        self
    }

    /// Queue a reply that resolves only once the returned sender fires.
    pub(crate) fn gated(
        &self,
        endpoint: Endpoint,
        result: TransportResult<Value>,
    ) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.push(endpoint, result, Some(rx));
        tx
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    pub(crate) fn calls_to(&self, endpoint: Endpoint) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|call| call.endpoint == endpoint)
            .count()
    }

    async fn next<R: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        access: Option<&str>,
    ) -> TransportResult<R> {
        let reply = {
            let mut script = self.lock();
            script.calls.push(Call {
                endpoint,
                access: access.map(str::to_string),
            });
            script
                .replies
                .get_mut(&endpoint)
                .and_then(VecDeque::pop_front)
        };
        let Some(Reply { result, gate }) = reply else {
            return Err(TransportError::Network(format!(
                "no scripted reply for {endpoint:?}"
            )));
        };
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        serde_json::from_value(result?).map_err(|e| TransportError::Decode(e.to_string()))
    }
}

impl Transport for ScriptedTransport {
    async fn obtain_token(&self, _credentials: &LoginCredentials) -> TransportResult<TokenPair> {
        self.next(Endpoint::ObtainToken, None).await
    }

    async fn refresh_token(&self, _refresh: &str) -> TransportResult<RefreshedToken> {
        self.next(Endpoint::RefreshToken, None).await
    }

    async fn fetch_profile(&self, access: Option<&str>) -> TransportResult<Profile> {
        self.next(Endpoint::FetchProfile, access).await
    }

    async fn register(&self, _data: &RegisterData) -> TransportResult<RegisteredAccount> {
        self.next(Endpoint::Register, None).await
    }

    async fn list_documents(&self, access: Option<&str>) -> TransportResult<Vec<Document>> {
        self.next(Endpoint::ListDocuments, access).await
    }

    async fn get_document(&self, access: Option<&str>, _id: &str) -> TransportResult<Document> {
        self.next(Endpoint::GetDocument, access).await
    }

    async fn upload_document(
        &self,
        access: Option<&str>,
        _upload: &DocumentUpload,
    ) -> TransportResult<UploadedDocument> {
        self.next(Endpoint::UploadDocument, access).await
    }

    async fn delete_document(&self, access: Option<&str>, _id: &str) -> TransportResult<()> {
        self.next(Endpoint::DeleteDocument, access).await
    }

    async fn list_chunks(
        &self,
        access: Option<&str>,
        _id: &str,
    ) -> TransportResult<Vec<DocumentChunk>> {
        self.next(Endpoint::ListChunks, access).await
    }

    async fn list_conversations(
        &self,
        access: Option<&str>,
    ) -> TransportResult<Vec<Conversation>> {
        self.next(Endpoint::ListConversations, access).await
    }

    async fn ask_question(
        &self,
        access: Option<&str>,
        _request: &AskQuestion,
    ) -> TransportResult<AskAnswer> {
        self.next(Endpoint::Ask, access).await
    }

    async fn delete_conversation(&self, access: Option<&str>, _id: &str) -> TransportResult<()> {
        self.next(Endpoint::DeleteConversation, access).await
    }
}

/// A rejection with a JSON body, as the HTTP transport would report it.
pub(crate) fn status(code: u16, body: Value) -> TransportError {
    TransportError::Status {
        status: code,
        body: body.to_string(),
    }
}
