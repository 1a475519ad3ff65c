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

//! Error type shared by every subsystem construction contract.

use thiserror::Error;

/// An error raised by a host environment or by a subsystem while it is being
/// constructed or activated.
///
/// The bootstrap never produces these itself; it only forwards them, tagged
/// with the step that failed.
#[derive(Debug, Error)]
pub enum SubsystemError {
    /// The host environment could not be probed or initialized.
    #[error("host environment error: {0}")]
    Host(String),

    /// A subsystem is not available in this build or on this host.
    #[error("subsystem '{0}' is unavailable")]
    Unavailable(&'static str),

    /// A one-time setup routine was invoked a second time.
    #[error("subsystem '{0}' was already initialized")]
    AlreadyInitialized(&'static str),

    /// A subsystem required a dependency that was not provided.
    #[error("subsystem '{subsystem}' requires '{dependency}'")]
    MissingDependency {
        /// The subsystem being set up.
        subsystem: &'static str,
        /// The dependency it could not find.
        dependency: &'static str,
    },

    /// Any other failure reported by backend code.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
