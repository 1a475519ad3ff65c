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

//! Engine configuration, loaded from JSON.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use sylva_core::Location;
use thiserror::Error;

/// Errors raised while loading an [`EngineConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file '{}'", path.display())]
    Io {
        /// The config file path.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The content is not a valid configuration.
    #[error("invalid engine config")]
    Parse(#[from] serde_json::Error),
}

/// Debug panel settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugPanelConfig {
    /// Load and enable the panel after the bootstrap.
    pub enabled: bool,
    /// Script path, relative to the root path. Uses the default path when
    /// unset.
    pub path: Option<String>,
}

impl Default for DebugPanelConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: None,
        }
    }
}

/// Settings of one engine run. Every field is optional in the JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Design width of the stage.
    pub width: u32,
    /// Design height of the stage.
    pub height: u32,
    /// Show an alert for uncaught faults.
    pub alert_global_error: bool,
    /// Debug panel settings; no panel when absent.
    pub debug_panel: Option<DebugPanelConfig>,
    /// `env_logger` filter used when `RUST_LOG` is unset.
    pub log_filter: String,
    /// Time between two cache sweeps, in milliseconds of system-clock time.
    pub cache_check_interval_ms: u64,
    /// Wall time fed to the clocks per frame, in milliseconds.
    pub frame_time_ms: u64,
    /// Overrides the location the host reports.
    pub location: Option<Location>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            alert_global_error: false,
            debug_panel: None,
            log_filter: "info".to_string(),
            cache_check_interval_ms: 15_000,
            frame_time_ms: 16,
            location: None,
        }
    }
}

impl EngineConfig {
    /// Parses a configuration from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Loaded engine config from '{}'.", path.display());
        Self::from_json_str(&json)
    }

    /// [`cache_check_interval_ms`](Self::cache_check_interval_ms) as a
    /// duration.
    pub fn cache_check_interval(&self) -> Duration {
        Duration::from_millis(self.cache_check_interval_ms)
    }

    /// [`frame_time_ms`](Self::frame_time_ms) as a duration.
    pub fn frame_time(&self) -> Duration {
        Duration::from_millis(self.frame_time_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_use_defaults() {
        let config = EngineConfig::from_json_str(r#"{ "width": 640 }"#).unwrap();
        assert_eq!(config.width, 640);
        assert_eq!(config.height, 720);
        assert_eq!(config.cache_check_interval(), Duration::from_secs(15));
        assert!(config.debug_panel.is_none());
    }

    #[test]
    fn debug_panel_section_defaults_to_enabled() {
        let config = EngineConfig::from_json_str(r#"{ "debug_panel": {} }"#).unwrap();
        assert_eq!(config.debug_panel, Some(DebugPanelConfig::default()));
    }

    #[test]
    fn location_override_is_parsed() {
        let config = EngineConfig::from_json_str(
            r#"{ "location": { "protocol": "https:", "host": "example.com", "pathname": "/app/index" } }"#,
        )
        .unwrap();
        assert_eq!(
            config.location,
            Some(Location::new("https:", "example.com", "/app/index"))
        );
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let err = EngineConfig::from_json_str("{ width: }").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.json");
        std::fs::write(&path, r#"{ "alert_global_error": true, "frame_time_ms": 33 }"#).unwrap();

        let config = EngineConfig::from_path(&path).unwrap();
        assert!(config.alert_global_error);
        assert_eq!(config.frame_time(), Duration::from_millis(33));

        let missing = EngineConfig::from_path(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(missing, ConfigError::Io { .. }));
    }
}
