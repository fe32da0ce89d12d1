use std::collections::HashMap;
use std::path::PathBuf;

use crate::errors::MedscanError;

use super::types::Theme;

pub const THEME_KEY: &str = "theme";

/// Small key/value store persisted between runs, the client-side analogue
/// of the front end's localStorage. Currently holds only the theme.
#[derive(Debug, Clone)]
pub struct Settings {
    dir: PathBuf,
    values: HashMap<String, String>,
}

impl Settings {
    /// Load persisted settings from `<dir>/settings.json`. A missing or
    /// unreadable file just means defaults.
    pub fn load(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let mut values = HashMap::new();
        if let Ok(content) = std::fs::read_to_string(dir.join("settings.json")) {
            if let Ok(saved) = serde_json::from_str::<HashMap<String, String>>(&content) {
                values = saved;
            }
        }
        Self { dir, values }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<(), MedscanError> {
        self.values.insert(key.to_string(), value.to_string());
        self.save()
    }

    fn save(&self) -> Result<(), MedscanError> {
        std::fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(&self.values)?;
        std::fs::write(self.dir.join("settings.json"), json)?;
        Ok(())
    }

    /// Saved theme, defaulting to dark.
    pub fn theme(&self) -> Theme {
        self.get(THEME_KEY)
            .and_then(|v| v.parse().ok())
            .unwrap_or_default()
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<(), MedscanError> {
        self.set(THEME_KEY, theme.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_default_theme_is_dark() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(dir.path());
        assert_eq!(settings.theme(), Theme::Dark);
    }

    #[test]
    fn test_settings_theme_persists_across_loads() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut settings = Settings::load(dir.path());
            settings.set_theme(Theme::Light).unwrap();
        }
        let reloaded = Settings::load(dir.path());
        assert_eq!(reloaded.theme(), Theme::Light);
    }

    #[test]
    fn test_settings_toggle_twice_restores_persisted_value() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = Settings::load(dir.path());
        let original = settings.theme();

        settings.set_theme(settings.theme().toggled()).unwrap();
        settings.set_theme(settings.theme().toggled()).unwrap();

        assert_eq!(settings.theme(), original);
        let reloaded = Settings::load(dir.path());
        assert_eq!(reloaded.theme(), original);
    }

    #[test]
    fn test_settings_garbage_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("settings.json"), "not json").unwrap();
        let settings = Settings::load(dir.path());
        assert_eq!(settings.theme(), Theme::Dark);
        assert!(settings.get("anything").is_none());
    }
}
