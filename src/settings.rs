//! User settings stored as settings.json in the app data directory

use crate::constants::*;
use crate::types::Backend;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Window geometry
    pub window_x: Option<f32>,
    pub window_y: Option<f32>,
    pub window_w: Option<f32>,
    pub window_h: Option<f32>,

    // Server
    pub server_url: String,
    pub backend: Backend,
    pub recent_days: u32,
    pub article_limit: u32,
    pub request_timeout_secs: u64,

    // Category buttons
    pub categories: Vec<String>,
    pub last_category: Option<String>,

    // Word cloud
    pub cloud_width: f32,
    pub cloud_height: f32,
    pub cloud_padding: f32,
    pub size_multiplier: f32,
    pub layout_seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_x: None,
            window_y: None,
            window_w: None,
            window_h: None,
            server_url: DEFAULT_SERVER_URL.to_string(),
            backend: Backend::Classic,
            recent_days: DEFAULT_RECENT_DAYS,
            article_limit: DEFAULT_ARTICLE_LIMIT,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            last_category: None,
            cloud_width: CLOUD_WIDTH,
            cloud_height: CLOUD_HEIGHT,
            cloud_padding: CLOUD_PADDING,
            size_multiplier: SIZE_MULTIPLIER,
            layout_seed: DEFAULT_LAYOUT_SEED,
        }
    }
}

impl Settings {
    pub fn load(data_dir: &Path) -> Self {
        let path = data_dir.join("settings.json");
        match std::fs::read_to_string(&path) {
            Ok(s) => match serde_json::from_str(&s) {
                Ok(settings) => {
                    debug!(path = %path.display(), "Settings loaded");
                    settings
                }
                Err(e) => {
                    warn!(error = %e, "Failed to parse settings, using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                debug!("No settings file found, using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self, data_dir: &Path) {
        let path = data_dir.join("settings.json");
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&path, json) {
                    warn!(error = %e, "Failed to save settings");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize settings"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "word-cloud-explorer-{}-{}",
            name,
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_defaults_match_reference_canvas() {
        let settings = Settings::default();
        assert_eq!(settings.cloud_width, 600.0);
        assert_eq!(settings.cloud_height, 400.0);
        assert_eq!(settings.size_multiplier, 2.0);
        assert_eq!(settings.backend, Backend::Classic);
        assert!(settings.categories.iter().any(|c| c == "IT/과학"));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"server_url":"http://example.test"}"#).unwrap();
        assert_eq!(settings.server_url, "http://example.test");
        assert_eq!(settings.article_limit, DEFAULT_ARTICLE_LIMIT);
    }

    #[test]
    fn test_save_then_load() {
        let dir = temp_dir("save");
        let settings = Settings {
            backend: Backend::NewsApi,
            last_category: Some("경제".into()),
            layout_seed: 7,
            ..Settings::default()
        };
        settings.save(&dir);
        assert_eq!(Settings::load(&dir), settings);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_corrupt_file_falls_back_to_defaults() {
        let dir = temp_dir("corrupt");
        std::fs::write(dir.join("settings.json"), "{ not json").unwrap();
        assert_eq!(Settings::load(&dir), Settings::default());
        std::fs::remove_dir_all(&dir).ok();
    }
}
