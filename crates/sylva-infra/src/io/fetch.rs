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

use std::io::ErrorKind;

use async_trait::async_trait;
use sylva_core::script::{FetchError, ScriptFetcher};

/// Fetches scripts from the local filesystem.
///
/// Accepts plain paths and `file://` URLs; any other scheme is rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsScriptFetcher;

impl FsScriptFetcher {
    /// Creates a filesystem fetcher.
    pub fn new() -> Self {
        Self
    }
}

fn local_path(path: &str) -> Result<&str, FetchError> {
    if let Some(stripped) = path.strip_prefix("file://") {
        return Ok(stripped);
    }
    if path.contains("://") {
        return Err(FetchError::UnsupportedScheme(path.to_string()));
    }
    Ok(path)
}

#[async_trait]
impl ScriptFetcher for FsScriptFetcher {
    async fn fetch(&self, path: &str) -> Result<String, FetchError> {
        let local = local_path(path)?;
        log::debug!("Fetching script '{local}'.");
        tokio::fs::read_to_string(local)
            .await
            .map_err(|source| match source.kind() {
                ErrorKind::NotFound => FetchError::NotFound(path.to_string()),
                _ => FetchError::Io {
                    path: path.to_string(),
                    source,
                },
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reads_plain_and_file_url_paths() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("tool.js");
        std::fs::write(&script, "install debugtool\n").unwrap();
        let plain = script.to_string_lossy().to_string();

        let fetcher = FsScriptFetcher::new();
        assert_eq!(fetcher.fetch(&plain).await.unwrap(), "install debugtool\n");
        let url = format!("file://{plain}");
        assert_eq!(fetcher.fetch(&url).await.unwrap(), "install debugtool\n");
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.js");
        let err = FsScriptFetcher
            .fetch(&missing.to_string_lossy())
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::NotFound(_)));
    }

    #[tokio::test]
    async fn remote_schemes_are_rejected() {
        let err = FsScriptFetcher
            .fetch("https://example.com/libs/tool.js")
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::UnsupportedScheme(_)));
    }
}
