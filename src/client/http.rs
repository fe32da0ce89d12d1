use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use tracing::{debug, warn};

use super::AnalysisBackend;
use crate::errors::MedscanError;
use crate::models::{AdminMessage, AnalysisResult};

/// HTTP client for the analysis service. The error variants distinguish
/// transport failures, error statuses, and undecodable bodies; that
/// distinction is for logs only. Callers collapse all three into the one
/// generic user-facing analysis error.
pub struct HttpAnalysisClient {
    client: Client,
    base_url: String,
}

impl HttpAnalysisClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl AnalysisBackend for HttpAnalysisClient {
    async fn analyze(
        &self,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<AnalysisResult, MedscanError> {
        let part = Part::bytes(bytes).file_name(filename.to_string());
        let form = Form::new().part("file", part);

        let resp = self
            .client
            .post(format!("{}/analyze", self.base_url))
            .multipart(form)
            .send()
            .await
            .map_err(|e| MedscanError::Network(format!("analyze request failed: {}", e)))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            warn!(%status, body = %body, "analysis endpoint returned an error status");
            return Err(MedscanError::Endpoint(format!(
                "analysis failed with status {}",
                status
            )));
        }

        let result: AnalysisResult = resp
            .json()
            .await
            .map_err(|e| MedscanError::Decode(format!("invalid analysis response: {}", e)))?;

        debug!(status = ?result.status, "analysis verdict received");
        Ok(result)
    }

    async fn create_admin(&self) -> Result<AdminMessage, MedscanError> {
        let resp = self
            .client
            .post(format!("{}/admin/create_admin", self.base_url))
            .header("content-type", "application/json")
            .send()
            .await
            .map_err(|e| MedscanError::Network(format!("admin request failed: {}", e)))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(MedscanError::Admin(format!(
                "create_admin failed with status {}",
                status
            )));
        }

        resp.json()
            .await
            .map_err(|e| MedscanError::Decode(format!("invalid admin response: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_stripped() {
        let client = HttpAnalysisClient::new("http://localhost:8080/");
        assert_eq!(client.base_url(), "http://localhost:8080");
    }
}
