use crate::core::firestore;
use crate::utils::error::{truncate_chars, EtlError, Result};
use reqwest::header::USER_AGENT;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

const ERROR_BODY_LIMIT: usize = 300;

/// Read-only client for the Firestore REST documents endpoint.
#[derive(Debug, Clone)]
pub struct FirestoreClient {
    client: Client,
    base_url: String,
    timeout: Duration,
    user_agent: String,
}

impl FirestoreClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration, user_agent: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            timeout,
            user_agent: user_agent.into(),
        }
    }

    pub fn document_url(&self, project_id: &str, document_path: &str) -> String {
        firestore::document_url(&self.base_url, project_id, document_path)
    }

    /// 單次 GET，不重試；非 2xx 回應帶回狀態碼與截斷後的內容
    pub async fn fetch_document(&self, project_id: &str, document_path: &str) -> Result<Value> {
        let url = self.document_url(project_id, document_path);
        tracing::debug!("Making API request to: {}", url);

        let response = self
            .client
            .get(&url)
            .header(USER_AGENT, &self.user_agent)
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EtlError::HttpStatusError {
                status: status.as_u16(),
                body: truncate_chars(&body, ERROR_BODY_LIMIT).to_string(),
            });
        }

        let body = response.bytes().await?;
        let document = serde_json::from_slice(&body)?;
        Ok(document)
    }
}
