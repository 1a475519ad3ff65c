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

//! A deterministic, in-memory host.
//!
//! [`HeadlessHost`] never touches the real process: alerts are recorded
//! instead of shown, and faults only happen when someone calls
//! [`HeadlessHost::raise_fault`]. Clones share the same state, so a test can
//! keep a handle while the engine owns another.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use sylva_core::compat::BufferSliceFn;
use sylva_core::platform::{
    AlertSink, FaultDisposition, FaultHandler, GlobalNamespace, GlobalValue, HostCapabilities,
    HostEnvironment, HostFault, Location,
};
use sylva_core::SubsystemError;

use crate::sync::lock;

#[derive(Default)]
struct Inner {
    location: Location,
    native_app: bool,
    capabilities: HostCapabilities,
    shim: Mutex<Option<BufferSliceFn>>,
    init_count: AtomicUsize,
    globals: Mutex<GlobalNamespace>,
    handler: Mutex<Option<Arc<dyn FaultHandler>>>,
    alerts: Mutex<Vec<String>>,
    unhandled: Mutex<Vec<HostFault>>,
}

/// An in-memory host for tests and headless tools.
#[derive(Clone, Default)]
pub struct HeadlessHost {
    inner: Arc<Inner>,
}

/// Builder for [`HeadlessHost`].
#[derive(Debug, Default)]
pub struct HeadlessHostBuilder {
    location: Location,
    native_app: bool,
    capabilities: HostCapabilities,
}

impl HeadlessHostBuilder {
    /// Sets the location the host reports.
    pub fn location(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    /// Makes the host report itself as a native-app embedding.
    pub fn native_app(mut self, native_app: bool) -> Self {
        self.native_app = native_app;
        self
    }

    /// Overrides the natively available primitives.
    pub fn capabilities(mut self, capabilities: HostCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Builds the host.
    pub fn build(self) -> HeadlessHost {
        HeadlessHost {
            inner: Arc::new(Inner {
                location: self.location,
                native_app: self.native_app,
                capabilities: self.capabilities,
                ..Inner::default()
            }),
        }
    }
}

impl HeadlessHost {
    /// Creates a host reporting `location`, with every primitive available.
    pub fn new(location: Location) -> Self {
        Self::builder().location(location).build()
    }

    /// Starts building a customized host.
    pub fn builder() -> HeadlessHostBuilder {
        HeadlessHostBuilder::default()
    }

    /// Simulates an uncaught fault.
    ///
    /// The installed handler receives it; without one, the fault is logged
    /// and kept in [`unhandled_faults`](Self::unhandled_faults).
    pub fn raise_fault(&self, fault: HostFault) -> FaultDisposition {
        let handler = lock(&self.inner.handler).clone();
        match handler {
            Some(handler) => {
                handler.on_fault(&fault, self);
                FaultDisposition::Intercepted
            }
            None => {
                log::error!("Uncaught fault: {fault}");
                lock(&self.inner.unhandled).push(fault);
                FaultDisposition::Unhandled
            }
        }
    }

    /// Every alert shown so far, oldest first.
    pub fn alerts(&self) -> Vec<String> {
        lock(&self.inner.alerts).clone()
    }

    /// Faults that reached the default handling.
    pub fn unhandled_faults(&self) -> Vec<HostFault> {
        lock(&self.inner.unhandled).clone()
    }

    /// How many times [`HostEnvironment::init`] ran.
    pub fn init_count(&self) -> usize {
        self.inner.init_count.load(Ordering::SeqCst)
    }

    /// Returns `true` once a buffer-slice shim has been installed.
    pub fn has_buffer_slice_shim(&self) -> bool {
        lock(&self.inner.shim).is_some()
    }
}

impl std::fmt::Debug for HeadlessHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeadlessHost")
            .field("location", &self.inner.location)
            .field("native_app", &self.inner.native_app)
            .field("init_count", &self.init_count())
            .finish_non_exhaustive()
    }
}

impl AlertSink for HeadlessHost {
    fn alert(&self, message: &str) {
        log::warn!("[alert] {message}");
        lock(&self.inner.alerts).push(message.to_string());
    }
}

impl HostEnvironment for HeadlessHost {
    fn capabilities(&self) -> HostCapabilities {
        self.inner.capabilities
    }

    fn install_buffer_slice_shim(&self, shim: BufferSliceFn) {
        *lock(&self.inner.shim) = Some(shim);
    }

    fn slice_buffer(&self, buffer: &[u8], start: usize, end: usize) -> Option<Vec<u8>> {
        if self.inner.capabilities.buffer_slice {
            return buffer.get(start..end).map(<[u8]>::to_vec);
        }
        let shim = (*lock(&self.inner.shim))?;
        shim(buffer, start, end)
    }

    fn init(&self) -> Result<(), SubsystemError> {
        let count = self.inner.init_count.fetch_add(1, Ordering::SeqCst) + 1;
        log::debug!("Headless host initialized (pass {count}).");
        Ok(())
    }

    fn location(&self) -> Location {
        self.inner.location.clone()
    }

    fn is_native_app(&self) -> bool {
        self.inner.native_app
    }

    fn publish_global(&self, key: &str, value: GlobalValue) {
        log::trace!("Publishing global '{key}'.");
        lock(&self.inner.globals).insert(key, value);
    }

    fn global(&self, key: &str) -> Option<GlobalValue> {
        lock(&self.inner.globals).get(key)
    }

    fn set_fault_handler(&self, handler: Option<Arc<dyn FaultHandler>>) {
        *lock(&self.inner.handler) = handler;
    }

    fn has_fault_handler(&self) -> bool {
        lock(&self.inner.handler).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sylva_core::compat::slice_buffer;

    struct CountingHandler(AtomicUsize);

    impl FaultHandler for CountingHandler {
        fn on_fault(&self, fault: &HostFault, alerts: &dyn AlertSink) {
            self.0.fetch_add(1, Ordering::SeqCst);
            alerts.alert(&fault.message);
        }
    }

    #[test]
    fn clones_share_state() {
        let host = HeadlessHost::new(Location::file("/game/index"));
        let clone = host.clone();
        clone.publish_global("k", Arc::new(7u32));
        clone.alert("hello");

        assert!(host.global("k").is_some());
        assert_eq!(host.alerts(), vec!["hello".to_string()]);
    }

    #[test]
    fn faults_without_handler_use_default_handling() {
        let host = HeadlessHost::default();
        let disposition = host.raise_fault(HostFault::new("boom"));

        assert_eq!(disposition, FaultDisposition::Unhandled);
        assert_eq!(host.unhandled_faults().len(), 1);
        assert!(host.alerts().is_empty());
    }

    #[test]
    fn installed_handler_intercepts_faults() {
        let host = HeadlessHost::default();
        let handler = Arc::new(CountingHandler(AtomicUsize::new(0)));
        host.set_fault_handler(Some(handler.clone()));

        assert_eq!(host.raise_fault(HostFault::new("a")), FaultDisposition::Intercepted);
        assert_eq!(handler.0.load(Ordering::SeqCst), 1);
        assert_eq!(host.alerts(), vec!["a".to_string()]);

        host.set_fault_handler(None);
        assert!(!host.has_fault_handler());
        assert_eq!(host.raise_fault(HostFault::new("b")), FaultDisposition::Unhandled);
    }

    #[test]
    fn slicing_without_native_primitive_needs_the_shim() {
        let host = HeadlessHost::builder()
            .capabilities(HostCapabilities {
                buffer_slice: false,
            })
            .build();
        let data = [9u8, 8, 7, 6];

        assert_eq!(host.slice_buffer(&data, 0, 2), None);

        host.install_buffer_slice_shim(slice_buffer);
        assert_eq!(host.slice_buffer(&data, 1, 3), Some(vec![8, 7]));
    }
}
