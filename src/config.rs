use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::document::DEFAULT_IMAGE_ALT;
use crate::host::DEFAULT_ICON_BACKGROUND;

/// Environment variable naming a JSON config file.
pub const CONFIG_ENV: &str = "TOAST_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToastConfig {
    /// Filter for a stderr subscriber. `None` leaves subscriber setup to the
    /// embedding process.
    #[serde(default)]
    pub log_filter: Option<String>,
    #[serde(default = "default_image_alt_text")]
    pub image_alt_text: String,
    #[serde(default = "default_icon_background")]
    pub icon_background: String,
}

fn default_image_alt_text() -> String {
    DEFAULT_IMAGE_ALT.to_string()
}

fn default_icon_background() -> String {
    DEFAULT_ICON_BACKGROUND.to_string()
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            log_filter: None,
            image_alt_text: default_image_alt_text(),
            icon_background: default_icon_background(),
        }
    }
}

impl ToastConfig {
    /// Loads the file named by `TOAST_CONFIG`, falling back to defaults.
    pub fn load() -> Self {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load_from(Path::new(&path)),
            None => Self::default(),
        }
    }

    /// Reads a JSON config file. Missing or malformed files yield defaults.
    pub fn load_from(path: &Path) -> Self {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                tracing::warn!("Failed to read toast config {:?}: {}", path, e);
                return Self::default();
            }
        };

        serde_json::from_str(&contents).unwrap_or_else(|e| {
            tracing::warn!("Invalid toast config {:?}: {}", path, e);
            Self::default()
        })
    }
}
