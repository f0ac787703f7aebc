//! Backend endpoint paths, relative to the API base URL.

pub const TOKEN: &str = "/auth/token/";
pub const TOKEN_REFRESH: &str = "/auth/token/refresh/";
pub const PROFILE: &str = "/auth/profile/";
pub const REGISTER: &str = "/auth/register/";
pub const DOCUMENTS: &str = "/documents/";
pub const CONVERSATIONS: &str = "/qa/conversations/";
pub const ASK: &str = "/qa/conversations/ask/";

#[must_use]
pub fn document(id: &str) -> String {
    format!("{DOCUMENTS}{}/", urlencoding::encode(id))
}

#[must_use]
pub fn document_chunks(id: &str) -> String {
    format!("{DOCUMENTS}{}/chunks/", urlencoding::encode(id))
}

#[must_use]
pub fn conversation(id: &str) -> String {
    format!("{CONVERSATIONS}{}/", urlencoding::encode(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_paths_keep_trailing_slash() {
        assert_eq!(document("d1"), "/documents/d1/");
        assert_eq!(document_chunks("d1"), "/documents/d1/chunks/");
        assert_eq!(conversation("c 1"), "/qa/conversations/c%201/");
    }
}
