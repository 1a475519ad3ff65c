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

//! The script escape hatch.
//!
//! Running host script is an explicit, opt-in capability. The engine only
//! ever talks to a [`ScriptRunner`]; builds that must not evaluate foreign
//! code use [`DisabledScriptRunner`], which refuses everything.

mod fetch;
mod panel;

pub use fetch::{FetchError, ScriptFetcher};
pub use panel::{lookup_debug_panel, publish_debug_panel, DebugPanel, DEFAULT_DEBUG_PANEL_PATH};

use thiserror::Error;

use crate::platform::HostEnvironment;

/// Errors raised while running a script.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// Script execution is disabled in this build.
    #[error("script execution is disabled")]
    Disabled,

    /// The script could not be parsed.
    #[error("syntax error on line {line}: {message}")]
    Syntax {
        /// 1-based line number.
        line: usize,
        /// What went wrong.
        message: String,
    },

    /// The script referenced a bundle the runner does not know.
    #[error("unknown bundle '{name}' on line {line}")]
    UnknownBundle {
        /// 1-based line number.
        line: usize,
        /// The bundle name.
        name: String,
    },

    /// A bundle failed while installing itself.
    #[error("bundle '{name}' failed to install")]
    Bundle {
        /// The bundle name.
        name: String,
        /// The underlying failure.
        #[source]
        source: anyhow::Error,
    },
}

/// Summary of a successful script run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScriptOutput {
    /// Number of statements executed.
    pub executed: usize,
}

/// Evaluates host script in the host's global scope.
pub trait ScriptRunner: Send + Sync {
    /// Runs `source` against `host`.
    fn run_script(
        &self,
        source: &str,
        host: &dyn HostEnvironment,
    ) -> Result<ScriptOutput, ScriptError>;
}

/// A runner that refuses to evaluate anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledScriptRunner;

impl ScriptRunner for DisabledScriptRunner {
    fn run_script(
        &self,
        _source: &str,
        _host: &dyn HostEnvironment,
    ) -> Result<ScriptOutput, ScriptError> {
        log::warn!("Refusing to run a script: script execution is disabled.");
        Err(ScriptError::Disabled)
    }
}
