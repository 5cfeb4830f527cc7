//! Session configuration.
//!
//! Loaded from `.toml` or `.json`. Missing fields take their defaults, so an
//! empty file is a valid configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use markupkit_core::constants::{DEFAULT_HISTORY_CAPACITY, MIN_FREEHAND_POINTS};
use markupkit_core::{ContainerRect, Error, Result};

/// Feature switches for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Capabilities {
    /// Pointer events may pass through to the page instead of annotating.
    pub browse_mode: bool,
    /// Style overrides can be edited.
    pub style_editor: bool,
    /// Undo/redo is available.
    pub history: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            browse_mode: true,
            style_editor: true,
            history: true,
        }
    }
}

impl Capabilities {
    /// Annotation only: no browse mode, no style editor, no history.
    pub fn annotate_only() -> Self {
        Self {
            browse_mode: false,
            style_editor: false,
            history: false,
        }
    }
}

/// Session settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Maximum number of history entries.
    pub history_capacity: usize,
    /// Samples a freehand gesture needs to become a cloud.
    pub min_freehand_points: usize,
    /// Where `FileStore` keeps its blobs. `None` uses the platform data dir.
    pub storage_dir: Option<PathBuf>,
    pub capabilities: Capabilities,
    /// Preview container rectangle before the first resize.
    pub container: ContainerRect,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            min_freehand_points: MIN_FREEHAND_POINTS,
            storage_dir: None,
            capabilities: Capabilities::default(),
            container: ContainerRect::default(),
        }
    }
}

impl SessionConfig {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::other(format!("Failed to read config file: {}", e)))?;

        let config: Self = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)
                .map_err(|e| Error::other(format!("Invalid JSON config: {}", e)))?
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            toml::from_str(&content)
                .map_err(|e| Error::other(format!("Invalid TOML config: {}", e)))?
        } else {
            return Err(Error::other("Config file must be .json or .toml"));
        };

        config.validate()?;
        tracing::info!("Loaded session config from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        self.validate()?;

        let content = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::to_string_pretty(self)
                .map_err(|e| Error::other(format!("Failed to serialize config: {}", e)))?
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            toml::to_string_pretty(self)
                .map_err(|e| Error::other(format!("Failed to serialize config: {}", e)))?
        } else {
            return Err(Error::other("Config file must be .json or .toml"));
        };

        std::fs::write(path, content)
            .map_err(|e| Error::other(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.history_capacity == 0 {
            return Err(Error::other("History capacity must be > 0"));
        }

        if self.min_freehand_points < 2 {
            return Err(Error::other("Freehand gestures need at least 2 points"));
        }

        let c = &self.container;
        if !(c.width.is_finite() && c.height.is_finite()) || c.width < 0.0 || c.height < 0.0 {
            return Err(Error::other("Container size must be finite and >= 0"));
        }

        Ok(())
    }
}
