// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Start-up settings for the graphics system.

use crate::renderer::api::DisplayOptions;
use crate::table::DEFAULT_MIN_FREE_INDICES;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings read once when the graphics system is created.
///
/// Every field has a default, so a configuration file only needs to list
/// what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphicsConfig {
    /// Initial display settings.
    pub display: DisplayOptions,
    /// Directory that relative resource paths are resolved against.
    pub root_path: PathBuf,
    /// Colour the display target is cleared to at the start of each frame.
    pub clear_colour: [f32; 4],
    /// Freed handles held back by each resource manager before reuse.
    pub min_free_indices: usize,
    /// Batches a command queue reserves room for up front.
    pub command_queue_capacity: usize,
}

impl Default for GraphicsConfig {
    fn default() -> Self {
        Self {
            display: DisplayOptions::default(),
            root_path: PathBuf::from("."),
            clear_colour: [0.0, 0.0, 0.0, 1.0],
            min_free_indices: DEFAULT_MIN_FREE_INDICES,
            command_queue_capacity: 64,
        }
    }
}

impl GraphicsConfig {
    /// Parses a configuration from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("Invalid graphics configuration")
    }

    /// Reads a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read '{}'", path.display()))?;
        Self::from_json_str(&text)
            .with_context(|| format!("Failed to parse '{}'", path.display()))
    }

    /// Serializes the configuration as pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize graphics configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::api::DisplayMode;
    use approx::assert_relative_eq;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = GraphicsConfig::from_json_str(
            r#"{ "display": { "width": 1920, "height": 1080, "mode": "borderless" } }"#,
        )
        .unwrap();

        assert_eq!(config.display.width, 1920);
        assert_eq!(config.display.mode, DisplayMode::Borderless);
        assert_eq!(config.display.multisample_level, 1);
        assert_eq!(config.min_free_indices, DEFAULT_MIN_FREE_INDICES);
        assert_relative_eq!(config.clear_colour[3], 1.0);
    }

    #[test]
    fn test_json_round_trip() {
        let mut config = GraphicsConfig::default();
        config.clear_colour = [0.1, 0.2, 0.3, 1.0];
        config.display.mode = DisplayMode::Fullscreen;

        let text = config.to_json_string().unwrap();
        assert_eq!(GraphicsConfig::from_json_str(&text).unwrap(), config);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(GraphicsConfig::from_json_str("{ display: }").is_err());
    }

    #[test]
    fn test_load_reports_missing_file() {
        let err = GraphicsConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }
}
