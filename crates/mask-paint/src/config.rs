//! JSON configuration for persisted editor settings.

use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn default_cell_size() -> u32 {
    18
}

/// Editor settings persisted alongside a mask.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Brush granularity in display pixels.
    #[serde(default = "default_cell_size")]
    pub cell_size: u32,
    /// Brush radius in cells (0 = single-cell dabs).
    #[serde(default)]
    pub brush_cells: usize,
    /// Where the mask PGM lives, if one is persisted.
    #[serde(default)]
    pub mask_path: Option<String>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            cell_size: default_cell_size(),
            brush_cells: 0,
            mask_path: None,
        }
    }
}

impl EditorConfig {
    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
