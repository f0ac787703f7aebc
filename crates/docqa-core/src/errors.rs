//! The error value surfaced through every slice's `last_error`.
//!
//! Transport- and persistence-level errors (`TransportError`, `PersistenceError`)
//! live in their own crates and are converted into an [`ActionError`] at the
//! boundary of each asynchronous operation, so the presentation layer can
//! match on a closed set of kinds instead of inspecting raw payloads.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Keys a rejection payload may use for its human-readable message.
const DETAIL_KEYS: [&str; 3] = ["detail", "error", "message"];

/// Key DRF uses for errors not tied to a single field.
const NON_FIELD_KEY: &str = "non_field_errors";

/// Failure of an asynchronous action, as stored in a slice's `last_error`.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActionError {
    /// No response was obtained (connection, timeout, undecodable body).
    #[error("transport error: {message}")]
    Transport { message: String },

    /// The server answered with a structured rejection.
    #[error("{}", rejected_message(.detail, .field_errors))]
    Rejected {
        status: u16,
        /// Server-reported detail, or the operation's generic marker.
        detail: String,
        /// Per-field messages, kept verbatim.
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        field_errors: BTreeMap<String, Vec<String>>,
    },

    /// Input rejected before dispatch.
    #[error("validation error: {message}")]
    Validation { message: String },

    /// The token store could not be updated.
    #[error("storage error: {message}")]
    Storage { message: String },
}

impl ActionError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// A rejection carrying only a detail message.
    pub fn rejected(status: u16, detail: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            detail: detail.into(),
            field_errors: BTreeMap::new(),
        }
    }

    /// Build a rejection from a raw response body.
    ///
    /// Understands the DRF shapes: `{"detail": ".."}`, `{"error": ".."}`,
    /// field maps like `{"email": [".."]}`, `{"non_field_errors": [..]}`, and
    /// bare strings or string lists. When the body yields no detail message,
    /// `fallback` is used.
    #[must_use]
    pub fn from_response(status: u16, body: &str, fallback: &str) -> Self {
        let parsed = serde_json::from_str::<Value>(body).ok();
        let mut detail = None;
        let mut field_errors = BTreeMap::new();

        match parsed {
            Some(Value::Object(map)) => {
                for (key, value) in map {
                    if DETAIL_KEYS.contains(&key.as_str()) {
                        if detail.is_none() {
                            detail = value_messages(&value).into_iter().next();
                        }
                    } else if key == NON_FIELD_KEY {
                        let messages = value_messages(&value);
                        if !messages.is_empty() {
                            detail.get_or_insert_with(|| messages.join(" "));
                        }
                    } else {
                        field_errors.insert(key, value_messages(&value));
                    }
                }
            }
            Some(Value::String(text)) if !text.trim().is_empty() => detail = Some(text),
            Some(value @ Value::Array(_)) => {
                let messages = value_messages(&value);
                if !messages.is_empty() {
                    detail = Some(messages.join(" "));
                }
            }
            _ => {}
        }

        Self::Rejected {
            status,
            detail: detail.unwrap_or_else(|| fallback.to_string()),
            field_errors,
        }
    }

    /// Server-reported detail of a rejection.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Rejected { detail, .. } => Some(detail),
            _ => None,
        }
    }

    /// HTTP status of a rejection.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the server refused the credentials attached to the request.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Rejected { status: 401, .. })
    }

    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Transport { .. } => "transport",
            Self::Rejected { .. } => "rejected",
            Self::Validation { .. } => "validation",
            Self::Storage { .. } => "storage",
        }
    }
}

fn value_messages(value: &Value) -> Vec<String> {
    match value {
        Value::String(text) => vec![text.clone()],
        Value::Array(items) => items.iter().flat_map(value_messages).collect(),
        Value::Null => Vec::new(),
        other => vec![other.to_string()],
    }
}

fn rejected_message(detail: &str, field_errors: &BTreeMap<String, Vec<String>>) -> String {
    if field_errors.is_empty() {
        return detail.to_string();
    }
    let fields = field_errors
        .iter()
        .map(|(field, messages)| format!("{field}: {}", messages.join(" ")))
        .collect::<Vec<_>>()
        .join("; ");
    format!("{detail} ({fields})")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn detail_payload_becomes_detail() {
        let err = ActionError::from_response(401, r#"{"detail":"invalid credentials"}"#, "Login failed");
        assert_eq!(err.detail(), Some("invalid credentials"));
        assert_eq!(err.to_string(), "invalid credentials");
        assert!(err.is_unauthorized());
    }

    #[test]
    fn error_key_is_accepted() {
        let err = ActionError::from_response(
            400,
            r#"{"error":"No documents found. Please upload documents first."}"#,
            "Question failed",
        );
        assert_eq!(
            err.detail(),
            Some("No documents found. Please upload documents first.")
        );
    }

    #[test]
    fn field_errors_kept_verbatim() {
        let body = r#"{"email":["user with this email already exists."],"username":["A user with that username already exists."]}"#;
        let err = ActionError::from_response(400, body, "Registration failed");
        let ActionError::Rejected {
            detail,
            field_errors,
            ..
        } = &err
        else {
            panic!("expected rejection");
        };
        assert_eq!(detail, "Registration failed");
        assert_eq!(
            field_errors["email"],
            vec!["user with this email already exists.".to_string()]
        );
        assert_eq!(field_errors.len(), 2);
        assert!(err.to_string().starts_with("Registration failed (email: "));
    }

    #[test]
    fn non_field_errors_become_detail() {
        let body = r#"{"non_field_errors":["Passwords do not match"]}"#;
        let err = ActionError::from_response(400, body, "Registration failed");
        assert_eq!(err.detail(), Some("Passwords do not match"));
    }

    #[test]
    fn empty_or_html_body_uses_fallback() {
        let err = ActionError::from_response(502, "<html>Bad Gateway</html>", "Login failed");
        assert_eq!(err.detail(), Some("Login failed"));
        let err = ActionError::from_response(500, "", "Login failed");
        assert_eq!(err.detail(), Some("Login failed"));
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn serializes_with_kind_tag() {
        let json = serde_json::to_value(ActionError::transport("connection refused")).unwrap();
        assert_eq!(json["kind"], "transport");
        assert_eq!(json["message"], "connection refused");
    }

    #[test]
    fn non_rejections_have_no_detail() {
        assert_eq!(ActionError::validation("bad").detail(), None);
        assert_eq!(ActionError::storage("io").kind(), "storage");
        assert!(!ActionError::transport("x").is_unauthorized());
    }
}
