use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// The authenticated user's profile, with denormalized usage counters.
///
/// Never patched in place: a fresh fetch replaces it wholesale.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Profile {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub github_profile: Option<String>,
    #[serde(default)]
    pub linkedin_profile: Option<String>,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub total_documents: u64,
    #[serde(default)]
    pub total_questions: u64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// User primary keys arrive as integers from some deployments and as strings
/// from others.
fn id_from_string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(u64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(id) => id,
        RawId::Number(id) => id.to_string(),
    })
}

impl Profile {
    /// "First Last", falling back to the username, then the email.
    #[must_use]
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if !full.is_empty() {
            full.to_string()
        } else if !self.username.is_empty() {
            self.username.clone()
        } else {
            self.email.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_backend_payload() {
        let json = r#"{
            "id": "7f1c", "username": "ada", "email": "ada@example.com",
            "first_name": "Ada", "last_name": "Lovelace",
            "phone": null, "avatar": null, "bio": "", "github_profile": "",
            "linkedin_profile": "", "is_verified": false,
            "total_documents": 3, "total_questions": 12,
            "created_at": "2025-01-02T03:04:05Z", "updated_at": "2025-01-02T03:04:05Z"
        }"#;
        let profile: Profile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.total_documents, 3);
        assert_eq!(profile.total_questions, 12);
        assert_eq!(profile.display_name(), "Ada Lovelace");
    }

    #[test]
    fn numeric_id_is_accepted() {
        let json = r#"{"id": 42, "email": "ada@example.com"}"#;
        let profile: Profile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.id, "42");
    }

    #[test]
    fn non_scalar_id_is_rejected() {
        let json = r#"{"id": {"pk": 1}, "email": "ada@example.com"}"#;
        assert!(serde_json::from_str::<Profile>(json).is_err());
    }

    #[test]
    fn display_name_falls_back() {
        let profile = Profile {
            id: "u1".into(),
            email: "a@b.com".into(),
            ..Default::default()
        };
        assert_eq!(profile.display_name(), "a@b.com");

        let profile = Profile {
            username: "ab".into(),
            ..profile
        };
        assert_eq!(profile.display_name(), "ab");
    }
}
