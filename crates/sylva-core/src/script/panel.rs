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

use std::any::Any;
use std::sync::Arc;

use crate::platform::{HostEnvironment, DEBUG_PANEL_KEY};

/// Where the debug tool script lives, relative to the root path.
pub const DEFAULT_DEBUG_PANEL_PATH: &str = "libs/laya.debugtool.js";

/// The capability a loaded debug tool registers in the global namespace.
pub trait DebugPanel: Send + Sync + 'static {
    /// Shows the panel. May be called any number of times.
    fn enable(&self);

    /// Allows downcasting to the concrete panel type.
    fn as_any(&self) -> &dyn Any;
}

/// Registers `panel` under [`DEBUG_PANEL_KEY`].
pub fn publish_debug_panel(host: &dyn HostEnvironment, panel: Arc<dyn DebugPanel>) {
    host.publish_global(DEBUG_PANEL_KEY, Arc::new(panel));
}

/// Returns the debug panel registered in the global namespace, if any.
pub fn lookup_debug_panel(host: &dyn HostEnvironment) -> Option<Arc<dyn DebugPanel>> {
    host.global(DEBUG_PANEL_KEY)?
        .downcast::<Arc<dyn DebugPanel>>()
        .ok()
        .map(|panel| Arc::clone(&*panel))
}
