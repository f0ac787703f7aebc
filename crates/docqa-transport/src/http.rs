//! reqwest-backed [`Transport`].

use std::time::Duration;

use docqa_core::entities::{Conversation, Document, DocumentChunk, Profile};
use docqa_core::requests::{AskQuestion, DocumentUpload, LoginCredentials, RegisterData};
use docqa_core::responses::{
    AskAnswer, Listing, RefreshedToken, RegisteredAccount, TokenPair, UploadedDocument,
};
use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::endpoints;
use crate::error::TransportError;
use crate::{Transport, TransportResult};

/// HTTP client for the docqa backend.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Build a client rooted at `base_url` (e.g. `http://localhost:8000/api/v1`).
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Network`] if the underlying `reqwest::Client`
    /// cannot be built (TLS backend initialization).
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        user_agent: &str,
    ) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { http, base_url })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str, access: Option<&str>) -> RequestBuilder {
        let builder = self.http.request(method, format!("{}{path}", self.base_url));
        match access {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> TransportResult<Response> {
        let request = builder.build()?;
        let method = request.method().clone();
        let url = request.url().path().to_string();
        let response = self.http.execute(request).await?;
        tracing::debug!(%method, %url, status = response.status().as_u16(), "backend call");
        check_response(response).await
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> TransportResult<T> {
        let response = self.send(builder).await?;
        Ok(response.json::<T>().await?)
    }
}

/// Map a non-success status to [`TransportError::Status`], keeping the body.
async fn check_response(response: Response) -> TransportResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(TransportError::Status {
        status: status.as_u16(),
        body,
    })
}

impl Transport for HttpTransport {
    async fn obtain_token(&self, credentials: &LoginCredentials) -> TransportResult<TokenPair> {
        self.send_json(self.request(Method::POST, endpoints::TOKEN, None).json(credentials))
            .await
    }

    async fn refresh_token(&self, refresh: &str) -> TransportResult<RefreshedToken> {
        let body = serde_json::json!({ "refresh": refresh });
        self.send_json(self.request(Method::POST, endpoints::TOKEN_REFRESH, None).json(&body))
            .await
    }

    async fn fetch_profile(&self, access: Option<&str>) -> TransportResult<Profile> {
        self.send_json(self.request(Method::GET, endpoints::PROFILE, access))
            .await
    }

    async fn register(&self, data: &RegisterData) -> TransportResult<RegisteredAccount> {
        self.send_json(self.request(Method::POST, endpoints::REGISTER, None).json(data))
            .await
    }

    async fn list_documents(&self, access: Option<&str>) -> TransportResult<Vec<Document>> {
        let listing: Listing<Document> = self
            .send_json(self.request(Method::GET, endpoints::DOCUMENTS, access))
            .await?;
        Ok(listing.into_vec())
    }

    async fn get_document(&self, access: Option<&str>, id: &str) -> TransportResult<Document> {
        self.send_json(self.request(Method::GET, &endpoints::document(id), access))
            .await
    }

    async fn upload_document(
        &self,
        access: Option<&str>,
        upload: &DocumentUpload,
    ) -> TransportResult<UploadedDocument> {
        let file = Part::bytes(upload.bytes.clone())
            .file_name(upload.file_name.clone())
            .mime_str(upload.file_type.mime())?;
        let mut form = Form::new()
            .text("title", upload.title.clone())
            .text("file_type", upload.file_type.as_str())
            .part("file", file);
        if let Some(collection) = &upload.collection {
            form = form.text("collection", collection.clone());
        }
        self.send_json(
            self.request(Method::POST, endpoints::DOCUMENTS, access)
                .multipart(form),
        )
        .await
    }

    async fn delete_document(&self, access: Option<&str>, id: &str) -> TransportResult<()> {
        self.send(self.request(Method::DELETE, &endpoints::document(id), access))
            .await?;
        Ok(())
    }

    async fn list_chunks(
        &self,
        access: Option<&str>,
        id: &str,
    ) -> TransportResult<Vec<DocumentChunk>> {
        let listing: Listing<DocumentChunk> = self
            .send_json(self.request(Method::GET, &endpoints::document_chunks(id), access))
            .await?;
        Ok(listing.into_vec())
    }

    async fn list_conversations(
        &self,
        access: Option<&str>,
    ) -> TransportResult<Vec<Conversation>> {
        let listing: Listing<Conversation> = self
            .send_json(self.request(Method::GET, endpoints::CONVERSATIONS, access))
            .await?;
        Ok(listing.into_vec())
    }

    async fn ask_question(
        &self,
        access: Option<&str>,
        request: &AskQuestion,
    ) -> TransportResult<AskAnswer> {
        self.send_json(self.request(Method::POST, endpoints::ASK, access).json(request))
            .await
    }

    async fn delete_conversation(&self, access: Option<&str>, id: &str) -> TransportResult<()> {
        self.send(self.request(Method::DELETE, &endpoints::conversation(id), access))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let transport =
            HttpTransport::new("http://localhost:8000/api/v1/", Duration::from_secs(5), "test")
                .unwrap();
        assert_eq!(transport.base_url(), "http://localhost:8000/api/v1");
    }
}
