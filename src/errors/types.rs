use thiserror::Error;

#[derive(Debug, Error)]
pub enum MedscanError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid image file: {0}")]
    InvalidFile(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Analysis endpoint error: {0}")]
    Endpoint(String),

    #[error("Malformed response: {0}")]
    Decode(String),

    #[error("Admin endpoint error: {0}")]
    Admin(String),

    #[error("Analysis error: {0}")]
    Analysis(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}
