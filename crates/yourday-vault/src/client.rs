//! Obsidian Local REST API client.

use reqwest::{header, Client};
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;
use yourday_core::{ReqwestErrorExt, VaultError};

const REQUEST_TIMEOUT_SECS: u64 = 10;
const MARKDOWN_CONTENT_TYPE: &str = "text/markdown";

#[derive(Clone)]
pub struct VaultClient {
    client: Arc<Client>,
    api_key: String,
    base_url: String,
}

impl VaultClient {
    pub fn new(api_key: &str, base_url: &str) -> Result<Self, VaultError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| VaultError::Unreachable(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client: Arc::new(client),
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn auth_header(&self) -> String {
        format!("Bearer {}", self.api_key)
    }

    /// Full URL of a vault file, with each path segment percent-encoded.
    pub fn file_url(&self, file_path: &str) -> String {
        let encoded = file_path
            .trim_start_matches('/')
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/");

        format!("{}/vault/{}", self.base_url, encoded)
    }

    /// Write `content` to `file_path`, replacing whatever is there.
    #[instrument(skip(self, content), fields(bytes = content.len()), level = "info")]
    pub async fn put_content(&self, file_path: &str, content: &str) -> Result<(), VaultError> {
        let response = self
            .client
            .put(self.file_url(file_path))
            .header(header::AUTHORIZATION, self.auth_header())
            .header(header::CONTENT_TYPE, MARKDOWN_CONTENT_TYPE)
            .body(content.to_owned())
            .send()
            .await
            .map_err(|e| VaultError::Unreachable(e.describe()))?;

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("Failed to read vault response body: {}", e.describe());
                String::new()
            }
        };

        if !status.is_success() {
            return Err(VaultError::PublishFailed {
                status: status.as_u16(),
                message: body,
            });
        }

        tracing::debug!("Vault API response: {}", status);
        if !body.is_empty() {
            tracing::debug!("Response body: {}", body);
        }

        Ok(())
    }
}

impl std::fmt::Debug for VaultClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VaultClient")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}
