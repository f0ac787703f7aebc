use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::{DocumentStatus, FileType};

/// Metadata of an uploaded document and its processing outcome.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Document {
    pub id: String,
    pub title: String,
    /// Storage reference of the uploaded file.
    #[serde(default)]
    pub file: Option<String>,
    pub file_type: FileType,
    /// Size in bytes.
    #[serde(default)]
    pub file_size: u64,
    #[serde(default)]
    pub status: DocumentStatus,
    #[serde(default)]
    pub processing_error: Option<String>,
    #[serde(default)]
    pub page_count: u32,
    #[serde(default)]
    pub word_count: u64,
    #[serde(default)]
    pub chunks_count: u32,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub processed_at: Option<DateTime<Utc>>,
}

/// A retrievable slice of a processed document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentChunk {
    pub id: String,
    pub text: String,
    pub chunk_index: u32,
    #[serde(default)]
    pub page_number: Option<u32>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_list_payload_without_file_field() {
        let json = r#"{
            "id": "d1", "title": "Handbook", "file_type": "pdf", "file_size": 2048,
            "status": "processing", "processing_error": null, "page_count": 0,
            "word_count": 0, "chunks_count": 0,
            "created_at": "2025-03-01T10:00:00Z", "processed_at": null
        }"#;
        let doc: Document = serde_json::from_str(json).unwrap();
        assert_eq!(doc.file, None);
        assert_eq!(doc.status, DocumentStatus::Processing);
        assert_eq!(doc.file_type, FileType::Pdf);
    }

    #[test]
    fn failed_document_keeps_error_detail() {
        let json = r#"{
            "id": "d2", "title": "Scan", "file_type": "pdf", "status": "failed",
            "processing_error": "no extractable text", "created_at": "2025-03-01T10:00:00Z"
        }"#;
        let doc: Document = serde_json::from_str(json).unwrap();
        assert_eq!(doc.processing_error.as_deref(), Some("no extractable text"));
        assert_eq!(doc.chunks_count, 0);
    }
}
