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

//! The host environment abstraction.

use std::sync::Arc;

use super::fault::{AlertSink, FaultHandler};
use super::globals::GlobalValue;
use super::location::Location;
use crate::compat::BufferSliceFn;
use crate::error::SubsystemError;

/// Primitives a host may or may not provide natively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostCapabilities {
    /// The host can slice byte buffers on its own.
    pub buffer_slice: bool,
}

impl Default for HostCapabilities {
    fn default() -> Self {
        Self { buffer_slice: true }
    }
}

/// The environment the engine runs in.
///
/// A host owns the global namespace, knows where the application was loaded
/// from, shows alerts and dispatches uncaught faults. All methods take `&self`
/// because a host is shared with fault handlers that may fire from anywhere.
pub trait HostEnvironment: AlertSink + Send + Sync {
    /// Reports which primitives the host provides natively.
    fn capabilities(&self) -> HostCapabilities;

    /// Installs a fallback buffer-slicing primitive.
    fn install_buffer_slice_shim(&self, shim: BufferSliceFn);

    /// Copies `buffer[start..end]` using the native primitive or the
    /// installed shim. Returns `None` if neither exists or the range is
    /// invalid.
    fn slice_buffer(&self, buffer: &[u8], start: usize, end: usize) -> Option<Vec<u8>>;

    /// Runs feature detection and prepares host services. Called once, before
    /// any other subsystem touches the host.
    fn init(&self) -> Result<(), SubsystemError>;

    /// Where the application was loaded from.
    fn location(&self) -> Location;

    /// Returns `true` when running inside a native-app embedding with its own
    /// run driver.
    fn is_native_app(&self) -> bool;

    /// Publishes `value` in the global namespace under `key`.
    fn publish_global(&self, key: &str, value: GlobalValue);

    /// Looks up a value in the global namespace.
    fn global(&self, key: &str) -> Option<GlobalValue>;

    /// Installs (`Some`) or removes (`None`) the uncaught-fault handler.
    ///
    /// The last call wins; handlers never stack.
    fn set_fault_handler(&self, handler: Option<Arc<dyn FaultHandler>>);

    /// Returns `true` while a fault handler is installed.
    fn has_fault_handler(&self) -> bool;
}
