use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Conversation titles are the question truncated to this many characters.
pub const CONVERSATION_TITLE_MAX_CHARS: usize = 100;

/// A citation attached to an answer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Source {
    pub document_id: String,
    #[serde(default)]
    pub document_title: String,
    pub chunk_id: String,
    #[serde(default)]
    pub page_number: Option<u32>,
    #[serde(default)]
    pub text_preview: String,
    #[serde(default)]
    pub similarity_score: f64,
}

/// One question with its answer and ordered citations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Question {
    pub id: String,
    pub question_text: String,
    #[serde(default)]
    pub answer_text: String,
    #[serde(default, alias = "source_documents", deserialize_with = "null_as_empty")]
    pub sources: Vec<Source>,
    #[serde(default)]
    pub confidence_score: Option<f64>,
    #[serde(default)]
    pub processing_time_ms: u64,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub is_helpful: Option<bool>,
}

/// A thread of questions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Conversation {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub questions_count: u32,
    #[serde(default)]
    pub latest_question: Option<Question>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    /// A conversation opened by its first question.
    #[must_use]
    pub fn started_by(id: String, question: Question) -> Self {
        Self {
            id,
            title: conversation_title(&question.question_text),
            questions_count: 1,
            created_at: question.created_at,
            updated_at: question.created_at,
            latest_question: Some(question),
        }
    }

    /// Record a new question as the latest one.
    pub fn record(&mut self, question: Question) {
        self.questions_count += 1;
        self.updated_at = question.created_at;
        self.latest_question = Some(question);
    }
}

/// First [`CONVERSATION_TITLE_MAX_CHARS`] characters of a question.
#[must_use]
pub fn conversation_title(question: &str) -> String {
    question.chars().take(CONVERSATION_TITLE_MAX_CHARS).collect()
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Source>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<Vec<Source>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(text: &str) -> Question {
        Question {
            id: "q1".into(),
            question_text: text.into(),
            answer_text: "42".into(),
            sources: Vec::new(),
            confidence_score: None,
            processing_time_ms: 10,
            created_at: Utc::now(),
            is_helpful: None,
        }
    }

    #[test]
    fn stored_question_reads_source_documents() {
        let json = r#"{
            "id": "q1", "question_text": "What?", "answer_text": "That.",
            "source_documents": [{"document_id": "d1", "document_title": "Doc",
              "chunk_id": "c1", "page_number": 3, "text_preview": "...",
              "similarity_score": 0.87}],
            "processing_time_ms": 120, "created_at": "2025-03-01T10:00:00Z",
            "is_helpful": null
        }"#;
        let q: Question = serde_json::from_str(json).unwrap();
        assert_eq!(q.sources.len(), 1);
        assert_eq!(q.sources[0].page_number, Some(3));
    }

    #[test]
    fn null_sources_decode_as_empty() {
        let json = r#"{"id": "q1", "question_text": "What?", "source_documents": null,
            "created_at": "2025-03-01T10:00:00Z"}"#;
        let q: Question = serde_json::from_str(json).unwrap();
        assert!(q.sources.is_empty());
    }

    #[test]
    fn title_is_truncated_by_chars() {
        let long = "é".repeat(150);
        assert_eq!(conversation_title(&long).chars().count(), 100);
        assert_eq!(conversation_title("short"), "short");
    }

    #[test]
    fn record_bumps_count_and_latest() {
        let mut conv = Conversation::started_by("c1".into(), question("first"));
        assert_eq!(conv.title, "first");
        conv.record(question("second"));
        assert_eq!(conv.questions_count, 2);
        assert_eq!(
            conv.latest_question.as_ref().map(|q| q.question_text.as_str()),
            Some("second")
        );
    }
}
