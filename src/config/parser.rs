use std::path::Path;

use tracing::debug;

use super::types::MedscanConfig;
use crate::errors::MedscanError;

pub async fn parse_config(path: &Path) -> Result<MedscanConfig, MedscanError> {
    let content = tokio::fs::read_to_string(path).await.map_err(|e| {
        MedscanError::Config(format!("cannot read {}: {}", path.display(), e))
    })?;

    let config: MedscanConfig = serde_yaml::from_str(&content).map_err(|e| {
        MedscanError::Config(format!("invalid config {}: {}", path.display(), e))
    })?;

    debug!(path = %path.display(), "loaded config file");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_parse_config_reads_endpoint() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "endpoint:\n  base_url: http://10.0.0.5:9000").unwrap();

        let config = parse_config(file.path()).await.unwrap();
        assert_eq!(
            config.endpoint.unwrap().base_url.as_deref(),
            Some("http://10.0.0.5:9000")
        );
    }

    #[tokio::test]
    async fn test_parse_config_empty_sections_allowed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "endpoint:").unwrap();

        let config = parse_config(file.path()).await.unwrap();
        assert!(config.endpoint.is_none());
    }

    #[tokio::test]
    async fn test_parse_config_missing_file_is_config_error() {
        let err = parse_config(Path::new("/nonexistent/medscan.yaml"))
            .await
            .unwrap_err();
        assert!(matches!(err, MedscanError::Config(_)));
    }

    #[tokio::test]
    async fn test_parse_config_invalid_yaml_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "endpoint: [unclosed").unwrap();

        let err = parse_config(file.path()).await.unwrap_err();
        assert!(matches!(err, MedscanError::Config(_)));
    }
}
