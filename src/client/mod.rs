pub mod http;

use async_trait::async_trait;

use crate::errors::MedscanError;
use crate::models::{AdminMessage, AnalysisResult};

pub use http::HttpAnalysisClient;

/// Seam between the upload controller and the remote analysis service.
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    /// Submit one image and wait for its verdict. Single attempt, no retry.
    async fn analyze(
        &self,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<AnalysisResult, MedscanError>;

    /// Provision the demo admin account. Standalone utility, not part of
    /// the analysis flow.
    async fn create_admin(&self) -> Result<AdminMessage, MedscanError>;
}
