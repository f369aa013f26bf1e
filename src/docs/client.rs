use crate::config::ServerConfig;
use crate::docs::model::{BatchUpdateResponse, Document};
use crate::docs::requests::Request;
use crate::error::DocsError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

/// The two document calls everything else is built from, plus creation.
///
/// Offsets in a returned [`Document`] are valid only until the next
/// successful `batch_update` against the same document.
pub trait DocsApi {
    async fn get_document(&self, document_id: &str) -> Result<Document, DocsError>;

    /// Applies `requests` atomically. `replies[i]` answers `requests[i]`.
    async fn batch_update(
        &self,
        document_id: &str,
        requests: &[Request],
    ) -> Result<BatchUpdateResponse, DocsError>;

    async fn create_document(&self, title: &str) -> Result<Document, DocsError>;
}

#[derive(Debug, Serialize)]
struct BatchUpdateBody<'a> {
    requests: &'a [Request],
}

#[derive(Debug, Serialize)]
struct CreateDocumentBody<'a> {
    title: &'a str,
}

/// REST client for `https://docs.googleapis.com/v1`.
#[derive(Debug, Clone)]
pub struct HttpDocsClient {
    http: reqwest::Client,
    base_url: String,
    access_token: String,
}

impl HttpDocsClient {
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.endpoint.clone(),
            access_token: config.access_token.clone(),
        }
    }

    fn url_with_segments(
        &self,
        document_id: &str,
        segments: &[&str],
        operation: &'static str,
    ) -> Result<reqwest::Url, DocsError> {
        let invalid = |detail: String| DocsError::Remote {
            document_id: document_id.to_string(),
            operation,
            detail,
        };
        let mut url = reqwest::Url::parse(&self.base_url)
            .map_err(|err| invalid(format!("invalid endpoint '{}': {err}", self.base_url)))?;
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|()| invalid("endpoint must be an absolute URL".to_string()))?;
            for segment in segments {
                path.push(segment);
            }
        }
        Ok(url)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        document_id: &str,
        operation: &'static str,
    ) -> Result<T, DocsError> {
        let failed = |detail: String| DocsError::Remote {
            document_id: document_id.to_string(),
            operation,
            detail,
        };

        let response = request
            .bearer_auth(&self.access_token)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|err| failed(format!("request error: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(failed(format!("Google Docs API returned {status}: {body}")));
        }

        response
            .json::<T>()
            .await
            .map_err(|err| failed(format!("invalid response body: {err}")))
    }
}

impl DocsApi for HttpDocsClient {
    async fn get_document(&self, document_id: &str) -> Result<Document, DocsError> {
        debug!(document_id, "fetching document");
        let url = self.url_with_segments(document_id, &["documents", document_id], "get")?;
        self.send(self.http.get(url), document_id, "get").await
    }

    async fn batch_update(
        &self,
        document_id: &str,
        requests: &[Request],
    ) -> Result<BatchUpdateResponse, DocsError> {
        debug!(document_id, count = requests.len(), "submitting batch");
        let target = format!("{document_id}:batchUpdate");
        let url = self.url_with_segments(document_id, &["documents", &target], "batchUpdate")?;
        let request = self.http.post(url).json(&BatchUpdateBody { requests });
        self.send(request, document_id, "batchUpdate").await
    }

    async fn create_document(&self, title: &str) -> Result<Document, DocsError> {
        debug!(title, "creating document");
        let url = self.url_with_segments("", &["documents"], "create")?;
        let request = self.http.post(url).json(&CreateDocumentBody { title });
        self.send(request, "", "create").await
    }
}
