//! Response envelopes returned by the backend.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::{Document, Profile, Question, Source};
use crate::enums::{DocumentStatus, FileType};

/// Token pair returned by `POST /auth/token/`.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

impl TokenPair {
    pub fn new(access: impl Into<String>, refresh: impl Into<String>) -> Self {
        Self {
            access: access.into(),
            refresh: refresh.into(),
        }
    }
}

impl fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenPair")
            .field("access", &redact(&self.access))
            .field("refresh", &redact(&self.refresh))
            .finish()
    }
}

/// Response of `POST /auth/token/refresh/`.
///
/// `refresh` is only present when the backend rotates refresh tokens.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RefreshedToken {
    pub access: String,
    #[serde(default)]
    pub refresh: Option<String>,
}

impl RefreshedToken {
    /// Merge with the refresh token that was presented.
    #[must_use]
    pub fn into_pair(self, presented_refresh: &str) -> TokenPair {
        TokenPair {
            access: self.access,
            refresh: self
                .refresh
                .unwrap_or_else(|| presented_refresh.to_string()),
        }
    }
}

impl fmt::Debug for RefreshedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefreshedToken")
            .field("access", &redact(&self.access))
            .field("refresh", &self.refresh.as_deref().map(redact))
            .finish()
    }
}

/// Acknowledgement of `POST /auth/register/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct RegisteredAccount {
    #[serde(default)]
    pub user: Option<Profile>,
    #[serde(default)]
    pub message: String,
}

/// Acknowledgement of a document upload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UploadedDocument {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub file: Option<String>,
    pub file_type: FileType,
    #[serde(default)]
    pub collection: Option<String>,
}

impl UploadedDocument {
    /// The freshly uploaded document, queued for processing.
    #[must_use]
    pub fn into_document(self, file_size: u64, uploaded_at: DateTime<Utc>) -> Document {
        Document {
            id: self.id,
            title: self.title,
            file: self.file,
            file_type: self.file_type,
            file_size,
            status: DocumentStatus::Pending,
            processing_error: None,
            page_count: 0,
            word_count: 0,
            chunks_count: 0,
            created_at: uploaded_at,
            updated_at: None,
            processed_at: None,
        }
    }
}

/// Answer returned by `POST /qa/conversations/ask/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AskAnswer {
    pub question_id: String,
    pub conversation_id: String,
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub sources: Vec<Source>,
    #[serde(default)]
    pub processing_time_ms: u64,
    #[serde(default)]
    pub confidence_score: Option<f64>,
}

impl AskAnswer {
    /// Split into the owning conversation id and the question record.
    #[must_use]
    pub fn into_question(self, answered_at: DateTime<Utc>) -> (String, Question) {
        let question = Question {
            id: self.question_id,
            question_text: self.question,
            answer_text: self.answer,
            sources: self.sources,
            confidence_score: self.confidence_score,
            processing_time_ms: self.processing_time_ms,
            created_at: answered_at,
            is_helpful: None,
        };
        (self.conversation_id, question)
    }
}

/// A list endpoint's body: a bare array, or a DRF page envelope.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Listing<T> {
    Page {
        results: Vec<T>,
        #[serde(default)]
        count: Option<u64>,
    },
    Bare(Vec<T>),
}

impl<T> Listing<T> {
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::Page { results, .. } | Self::Bare(results) => results,
        }
    }
}

fn redact(token: &str) -> String {
    let visible: String = token.chars().take(6).collect();
    format!("{visible}…")
}
