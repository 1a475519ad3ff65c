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

use async_trait::async_trait;
use thiserror::Error;

/// Errors raised while fetching a script.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Nothing exists at the requested path.
    #[error("script not found: {0}")]
    NotFound(String),

    /// The path uses a scheme this fetcher cannot serve.
    #[error("unsupported scheme for '{0}'")]
    UnsupportedScheme(String),

    /// Reading the script failed.
    #[error("failed to read script '{path}'")]
    Io {
        /// The requested path.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Retrieves script source from wherever the host keeps it.
///
/// Fetching is the only suspension point of the engine: callers run it on a
/// task and apply the result later, on their own thread.
#[async_trait]
pub trait ScriptFetcher: Send + Sync {
    /// Fetches the script at `path`, already resolved against the root path.
    async fn fetch(&self, path: &str) -> Result<String, FetchError>;
}
