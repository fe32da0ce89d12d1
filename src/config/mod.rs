pub mod parser;
pub mod settings;
pub mod types;

use std::path::Path;

use tracing::warn;

pub use parser::parse_config;
pub use settings::Settings;
pub use types::*;

/// Config file picked up from the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "medscan.yaml";

/// Directory for persisted client state (theme, REPL history).
pub const SETTINGS_DIR: &str = ".medscan";

/// Load `medscan.yaml` from the working directory if present. A broken
/// default config is ignored with a warning rather than refusing to start;
/// an explicitly passed config file is a hard error instead.
pub async fn load_default_config() -> MedscanConfig {
    let path = Path::new(DEFAULT_CONFIG_FILE);
    if !path.exists() {
        return MedscanConfig::default();
    }
    match parser::parse_config(path).await {
        Ok(config) => config,
        Err(e) => {
            warn!("ignoring {}: {}", DEFAULT_CONFIG_FILE, e);
            MedscanConfig::default()
        }
    }
}

/// Endpoint precedence: CLI flag, then config file, then the built-in
/// default.
pub fn resolve_base_url(flag: Option<&str>, config: &MedscanConfig) -> String {
    flag.map(str::to_string)
        .or_else(|| {
            config
                .endpoint
                .as_ref()
                .and_then(|e| e.base_url.clone())
        })
        .unwrap_or_else(|| types::DEFAULT_BASE_URL.to_string())
}
