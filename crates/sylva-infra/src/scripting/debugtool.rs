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

//! The built-in debug tool bundle.

use std::any::Any;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use sylva_core::platform::HostEnvironment;
use sylva_core::script::{publish_debug_panel, DebugPanel};

/// Name scripts use to install this bundle.
pub const BUNDLE_NAME: &str = "debugtool";

/// An on-screen overlay showing engine statistics.
#[derive(Debug, Default)]
pub struct OverlayDebugPanel {
    activations: AtomicUsize,
    visible: AtomicBool,
}

impl OverlayDebugPanel {
    /// Creates a hidden panel.
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times the panel was enabled.
    pub fn activations(&self) -> usize {
        self.activations.load(Ordering::SeqCst)
    }

    /// Returns `true` once the panel was enabled.
    pub fn is_visible(&self) -> bool {
        self.visible.load(Ordering::SeqCst)
    }
}

impl DebugPanel for OverlayDebugPanel {
    fn enable(&self) {
        let n = self.activations.fetch_add(1, Ordering::SeqCst) + 1;
        self.visible.store(true, Ordering::SeqCst);
        log::info!("Debug panel enabled (activation {n}).");
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Registers a fresh [`OverlayDebugPanel`] in the host's global namespace.
pub fn install(host: &dyn HostEnvironment) -> anyhow::Result<()> {
    publish_debug_panel(host, Arc::new(OverlayDebugPanel::new()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::HeadlessHost;
    use sylva_core::script::lookup_debug_panel;

    #[test]
    fn installed_panel_counts_activations() {
        let host = HeadlessHost::default();
        install(&host).unwrap();

        let panel = lookup_debug_panel(&host).unwrap();
        panel.enable();
        panel.enable();

        let overlay = panel
            .as_any()
            .downcast_ref::<OverlayDebugPanel>()
            .unwrap();
        assert_eq!(overlay.activations(), 2);
        assert!(overlay.is_visible());
    }
}
