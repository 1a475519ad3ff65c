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

//! Caller-supplied extensions activated during bootstrap.

/// The activation capability a plugin may expose.
pub trait Enable {
    /// Activates the extension. Called at most once, during bootstrap.
    fn enable(&mut self) -> anyhow::Result<()>;
}

/// An extension object handed to the bootstrap.
///
/// Plugins are activated in the order they are passed. A plugin that does not
/// expose [`Enable`] is skipped without error.
///
/// # Example
///
/// ```rust
/// use sylva_core::plugin::{Enable, Plugin};
///
/// struct Accelerated { enabled: bool }
///
/// impl Enable for Accelerated {
///     fn enable(&mut self) -> anyhow::Result<()> {
///         self.enabled = true;
///         Ok(())
///     }
/// }
///
/// impl Plugin for Accelerated {
///     fn name(&self) -> &str { "accelerated" }
///     fn enable_capability(&mut self) -> Option<&mut dyn Enable> { Some(self) }
/// }
/// ```
pub trait Plugin {
    /// A human-readable name, used in logs and errors.
    fn name(&self) -> &str;

    /// Returns the plugin's activation capability, if it has one.
    fn enable_capability(&mut self) -> Option<&mut dyn Enable> {
        None
    }
}
