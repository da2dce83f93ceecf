//! Preview preferences persisted between sessions.
//!
//! Stored as JSON in the user's config directory
//! (e.g., `~/.config/reelcrop/preferences.json` on Linux).

use anyhow::{Context, Result};
use directories::ProjectDirs;
use reelcrop_core::AspectRatioMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Ratio shortcuts offered in the preview, as `(key label, ratio spec)`.
pub const RATIO_SHORTCUTS: &[(&str, &str)] = &[
    ("f", "free"),
    ("s", "square"),
    ("w", "16:9"),
    ("t", "9:16"),
];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Last aspect ratio, as accepted by [`AspectRatioMode`]'s parser.
    pub aspect_ratio: String,
    /// Draw the rule-of-thirds grid inside the crop.
    pub show_grid: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            aspect_ratio: "free".to_string(),
            show_grid: true,
        }
    }
}

impl Settings {
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "reelcrop").map(|dirs| dirs.config_dir().join("preferences.json"))
    }

    /// Loads settings from disk, falling back to defaults if missing or unreadable.
    pub fn load() -> Self {
        Self::config_path()
            .and_then(|path| fs::read_to_string(path).ok())
            .and_then(|content| Self::parse(&content))
            .unwrap_or_default()
    }

    fn parse(content: &str) -> Option<Self> {
        serde_json::from_str(content).ok()
    }

    pub fn save(&self) -> Result<()> {
        let Some(path) = Self::config_path() else {
            return Ok(());
        };
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    /// The stored ratio, or free if it no longer parses.
    pub fn aspect_mode(&self) -> AspectRatioMode {
        self.aspect_ratio.parse().unwrap_or_default()
    }
}
