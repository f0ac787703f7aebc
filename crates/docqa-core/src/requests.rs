//! Request payloads sent to the backend.
//!
//! The `validate()` helpers mirror the checks the backend performs. The state
//! container runs them before dispatching an action, so malformed input is
//! rejected without a network call.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::enums::FileType;
use crate::errors::ActionError;

/// Largest upload the backend accepts.
pub const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// Longest question the backend accepts.
pub const MAX_QUESTION_CHARS: usize = 1000;

/// Credentials exchanged for a token pair.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

impl LoginCredentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// # Errors
    ///
    /// Returns [`ActionError::Validation`] if the email has no `@` or the
    /// password is empty.
    pub fn validate(&self) -> Result<(), ActionError> {
        validate_email(&self.email)?;
        if self.password.is_empty() {
            return Err(ActionError::validation("password is required"));
        }
        Ok(())
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Account creation payload.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisterData {
    pub email: String,
    pub username: String,
    pub password: String,
    pub password_confirm: String,
    pub first_name: String,
    pub last_name: String,
}

impl RegisterData {
    /// # Errors
    ///
    /// Returns [`ActionError::Validation`] for a malformed email, an empty
    /// username, or a password that does not match its confirmation.
    pub fn validate(&self) -> Result<(), ActionError> {
        validate_email(&self.email)?;
        if self.username.trim().is_empty() {
            return Err(ActionError::validation("username is required"));
        }
        if self.password.is_empty() {
            return Err(ActionError::validation("password is required"));
        }
        if self.password != self.password_confirm {
            return Err(ActionError::validation("passwords do not match"));
        }
        Ok(())
    }
}

impl fmt::Debug for RegisterData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterData")
            .field("email", &self.email)
            .field("username", &self.username)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .finish_non_exhaustive()
    }
}

/// A question submitted for answering.
///
/// `document_ids: None` searches across every document; `conversation_id:
/// None` opens a new conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AskQuestion {
    pub question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_ids: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
}

impl AskQuestion {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            document_ids: None,
            conversation_id: None,
        }
    }

    #[must_use]
    pub fn in_conversation(mut self, conversation_id: impl Into<String>) -> Self {
        self.conversation_id = Some(conversation_id.into());
        self
    }

    #[must_use]
    pub fn against(mut self, document_ids: Vec<String>) -> Self {
        self.document_ids = Some(document_ids);
        self
    }

    /// # Errors
    ///
    /// Returns [`ActionError::Validation`] for an empty or over-long question.
    pub fn validate(&self) -> Result<(), ActionError> {
        if self.question.trim().is_empty() {
            return Err(ActionError::validation("question is empty"));
        }
        if self.question.chars().count() > MAX_QUESTION_CHARS {
            return Err(ActionError::validation(format!(
                "question exceeds {MAX_QUESTION_CHARS} characters"
            )));
        }
        Ok(())
    }
}

/// A file to upload, sent as multipart form data.
#[derive(Clone, PartialEq, Eq)]
pub struct DocumentUpload {
    pub title: String,
    pub file_name: String,
    pub file_type: FileType,
    pub collection: Option<String>,
    pub bytes: Vec<u8>,
}

impl DocumentUpload {
    /// # Errors
    ///
    /// Returns [`ActionError::Validation`] for an empty title, an empty file,
    /// or a file above [`MAX_UPLOAD_BYTES`].
    pub fn validate(&self) -> Result<(), ActionError> {
        if self.title.trim().is_empty() {
            return Err(ActionError::validation("title is required"));
        }
        if self.bytes.is_empty() {
            return Err(ActionError::validation("file is empty"));
        }
        if self.bytes.len() > MAX_UPLOAD_BYTES {
            return Err(ActionError::validation("File size exceeds the 50MB limit."));
        }
        Ok(())
    }
}

impl fmt::Debug for DocumentUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentUpload")
            .field("title", &self.title)
            .field("file_name", &self.file_name)
            .field("file_type", &self.file_type)
            .field("collection", &self.collection)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

fn validate_email(email: &str) -> Result<(), ActionError> {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(ActionError::validation(format!("invalid email: {email:?}"))),
    }
}
