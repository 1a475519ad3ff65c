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

//! The host backed by the running process.
//!
//! Uncaught faults are Rust panics: installing a fault handler installs a
//! panic hook, and alerts are written to standard error.

use std::backtrace::Backtrace;
use std::panic::{self, PanicHookInfo};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use sylva_core::compat::BufferSliceFn;
use sylva_core::platform::{
    AlertSink, FaultHandler, GlobalNamespace, GlobalValue, HostCapabilities, HostEnvironment,
    HostFault, Location,
};
use sylva_core::SubsystemError;

use crate::sync::lock;

/// Builds the `file:` location of a document living in `dir`.
///
/// Backslashes become forward slashes and the path always starts and ends
/// with `/`, so the directory itself becomes the root resource path.
pub fn location_for_dir(dir: &Path) -> Location {
    let mut pathname = dir.to_string_lossy().replace('\\', "/");
    if !pathname.starts_with('/') {
        pathname.insert(0, '/');
    }
    if !pathname.ends_with('/') {
        pathname.push('/');
    }
    Location::file(pathname)
}

struct ConsoleAlert;

impl AlertSink for ConsoleAlert {
    fn alert(&self, message: &str) {
        log::error!("[alert] {message}");
        eprintln!("{message}");
    }
}

fn fault_from_panic(info: &PanicHookInfo<'_>) -> HostFault {
    let payload = info.payload();
    let message = if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Box<dyn Any>".to_string()
    };

    let mut fault = HostFault::new(message).with_stack(Backtrace::force_capture().to_string());
    if let Some(location) = info.location() {
        fault = fault.with_origin(format!(
            "{}:{}:{}",
            location.file(),
            location.line(),
            location.column()
        ));
    }
    fault
}

/// A host running directly in the current process.
pub struct ProcessHost {
    location: Location,
    shim: Mutex<Option<BufferSliceFn>>,
    globals: Mutex<GlobalNamespace>,
    handler_installed: AtomicBool,
}

impl ProcessHost {
    /// Creates a host located in the current working directory.
    pub fn new() -> Result<Self, SubsystemError> {
        let dir = std::env::current_dir().map_err(|e| {
            SubsystemError::Host(format!("cannot read the working directory: {e}"))
        })?;
        Ok(Self::with_location(location_for_dir(&dir)))
    }

    /// Creates a host reporting an explicit location.
    pub fn with_location(location: Location) -> Self {
        Self {
            location,
            shim: Mutex::new(None),
            globals: Mutex::new(GlobalNamespace::new()),
            handler_installed: AtomicBool::new(false),
        }
    }
}

impl std::fmt::Debug for ProcessHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessHost")
            .field("location", &self.location)
            .field("globals", &*lock(&self.globals))
            .field("fault_handler", &self.has_fault_handler())
            .finish_non_exhaustive()
    }
}

impl AlertSink for ProcessHost {
    fn alert(&self, message: &str) {
        ConsoleAlert.alert(message);
    }
}

impl HostEnvironment for ProcessHost {
    fn capabilities(&self) -> HostCapabilities {
        HostCapabilities::default()
    }

    fn install_buffer_slice_shim(&self, shim: BufferSliceFn) {
        *lock(&self.shim) = Some(shim);
    }

    fn slice_buffer(&self, buffer: &[u8], start: usize, end: usize) -> Option<Vec<u8>> {
        buffer.get(start..end).map(<[u8]>::to_vec)
    }

    fn init(&self) -> Result<(), SubsystemError> {
        log::info!(
            "Process host ready (pid {}, {} {}).",
            std::process::id(),
            std::env::consts::OS,
            std::env::consts::ARCH
        );
        Ok(())
    }

    fn location(&self) -> Location {
        self.location.clone()
    }

    fn is_native_app(&self) -> bool {
        true
    }

    fn publish_global(&self, key: &str, value: GlobalValue) {
        lock(&self.globals).insert(key, value);
    }

    fn global(&self, key: &str) -> Option<GlobalValue> {
        lock(&self.globals).get(key)
    }

    fn set_fault_handler(&self, handler: Option<Arc<dyn FaultHandler>>) {
        // The panic hook cannot be touched while this thread unwinds; the
        // installed hook stays in place.
        if std::thread::panicking() {
            log::debug!("Thread is panicking, leaving the panic hook untouched.");
            return;
        }
        match handler {
            Some(handler) => {
                panic::set_hook(Box::new(move |info| {
                    handler.on_fault(&fault_from_panic(info), &ConsoleAlert);
                }));
                self.handler_installed.store(true, Ordering::SeqCst);
            }
            None => {
                if self.handler_installed.swap(false, Ordering::SeqCst) {
                    // Restores the default hook.
                    drop(panic::take_hook());
                }
            }
        }
    }

    fn has_fault_handler(&self) -> bool {
        self.handler_installed.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_for_unix_dir() {
        let location = location_for_dir(Path::new("/srv/game"));
        assert_eq!(location.protocol, "file:");
        assert_eq!(location.pathname, "/srv/game/");
    }

    #[test]
    fn location_for_windows_dir() {
        let location = location_for_dir(Path::new("C:\\games\\demo"));
        assert_eq!(location.pathname, "/C:/games/demo/");
        assert_eq!(
            sylva_core::platform::resolve_root_path(&location),
            "C:/games/demo"
        );
    }

    #[test]
    fn process_host_is_a_native_app() {
        let host = ProcessHost::with_location(Location::file("/tmp/"));
        assert!(host.is_native_app());
        assert!(!host.has_fault_handler());
        assert_eq!(host.slice_buffer(&[1, 2, 3], 1, 3), Some(vec![2, 3]));
    }

    struct DetachOnDrop(Arc<ProcessHost>);

    impl Drop for DetachOnDrop {
        fn drop(&mut self) {
            self.0.set_fault_handler(None);
        }
    }

    struct CountingHandler(std::sync::atomic::AtomicUsize);

    impl FaultHandler for CountingHandler {
        fn on_fault(&self, _fault: &HostFault, _alerts: &dyn AlertSink) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn detaching_during_unwind_keeps_the_hook() {
        let host = Arc::new(ProcessHost::with_location(Location::file("/tmp/")));
        let handler = Arc::new(CountingHandler(Default::default()));
        host.set_fault_handler(Some(handler.clone()));

        let worker = Arc::clone(&host);
        let joined = std::thread::spawn(move || {
            let _guard = DetachOnDrop(worker);
            panic!("unwinding with a handler attached");
        })
        .join();

        assert!(joined.is_err());
        assert!(handler.0.load(Ordering::SeqCst) >= 1);
        assert!(host.has_fault_handler());

        host.set_fault_handler(None);
        assert!(!host.has_fault_handler());
    }
}
