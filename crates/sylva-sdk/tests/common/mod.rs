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

//! Recording fakes shared by the integration tests.

#![allow(dead_code)]

use std::any::Any;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use sylva_core::compat::BufferSliceFn;
use sylva_core::platform::{
    AlertSink, FaultHandler, GlobalValue, HostCapabilities, HostEnvironment, Location,
};
use sylva_core::script::{DebugPanel, FetchError, ScriptFetcher};
use sylva_core::subsystem::{
    CacheMaintenance, DisplayRoot, FrameStats, KeyboardManager, MouseManager, Origin,
    RenderBackend, ResourceLoader, SceneBindings, SoundManager, SubsystemFactory, SurfaceHandle,
    TextInputManager,
};
use sylva_core::{Clock, SubsystemError};
use sylva_infra::{DefaultSubsystems, HeadlessHost};

/// An ordered, shared event log.
#[derive(Debug, Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<String>>>);

impl Journal {
    pub fn record(&self, entry: impl Into<String>) {
        self.0.lock().unwrap().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn position(&self, entry: &str) -> usize {
        self.entries()
            .iter()
            .position(|e| e == entry)
            .unwrap_or_else(|| panic!("'{entry}' was never recorded"))
    }

    pub fn count(&self, entry: &str) -> usize {
        self.entries().iter().filter(|e| *e == entry).count()
    }
}

/// A headless host that journals the calls the bootstrap makes.
#[derive(Debug, Clone)]
pub struct RecordingHost {
    pub inner: HeadlessHost,
    pub journal: Journal,
}

impl RecordingHost {
    pub fn new(inner: HeadlessHost, journal: Journal) -> Self {
        Self { inner, journal }
    }
}

impl AlertSink for RecordingHost {
    fn alert(&self, message: &str) {
        self.inner.alert(message);
    }
}

impl HostEnvironment for RecordingHost {
    fn capabilities(&self) -> HostCapabilities {
        self.inner.capabilities()
    }

    fn install_buffer_slice_shim(&self, shim: BufferSliceFn) {
        self.journal.record("host.install_buffer_slice_shim");
        self.inner.install_buffer_slice_shim(shim);
    }

    fn slice_buffer(&self, buffer: &[u8], start: usize, end: usize) -> Option<Vec<u8>> {
        self.inner.slice_buffer(buffer, start, end)
    }

    fn init(&self) -> Result<(), SubsystemError> {
        self.journal.record("host.init");
        self.inner.init()
    }

    fn location(&self) -> Location {
        self.inner.location()
    }

    fn is_native_app(&self) -> bool {
        self.inner.is_native_app()
    }

    fn publish_global(&self, key: &str, value: GlobalValue) {
        self.journal.record(format!("host.publish_global({key})"));
        self.inner.publish_global(key, value);
    }

    fn global(&self, key: &str) -> Option<GlobalValue> {
        self.inner.global(key)
    }

    fn set_fault_handler(&self, handler: Option<Arc<dyn FaultHandler>>) {
        self.inner.set_fault_handler(handler);
    }

    fn has_fault_handler(&self) -> bool {
        self.inner.has_fault_handler()
    }
}

/// A render backend that journals its one-time setup.
#[derive(Debug)]
struct RecordingRenderer {
    inner: Box<dyn RenderBackend>,
    journal: Journal,
}

impl RenderBackend for RecordingRenderer {
    fn mode(&self) -> sylva_core::subsystem::RenderMode {
        self.inner.mode()
    }

    fn origin(&self) -> Origin {
        self.inner.origin()
    }

    fn surface(&self) -> SurfaceHandle {
        self.inner.surface()
    }

    fn surface_size(&self) -> (u32, u32) {
        self.inner.surface_size()
    }

    fn init_sprite_rendering(&mut self, scene: &SceneBindings) -> Result<(), SubsystemError> {
        self.journal.record("renderer.init_sprite_rendering");
        self.inner.init_sprite_rendering(scene)
    }

    fn render(&mut self, scene: &SceneBindings) -> Result<FrameStats, SubsystemError> {
        self.inner.render(scene)
    }
}

/// Wraps [`DefaultSubsystems`] and journals every factory call.
#[derive(Debug)]
pub struct RecordingFactory {
    inner: DefaultSubsystems,
    journal: Journal,
    pub fail_at: Option<&'static str>,
}

impl RecordingFactory {
    pub fn new(journal: Journal) -> Self {
        Self {
            inner: DefaultSubsystems::new(),
            journal,
            fail_at: None,
        }
    }

    fn enter(&self, call: &'static str) -> Result<(), SubsystemError> {
        self.journal.record(format!("factory.{call}"));
        if self.fail_at == Some(call) {
            return Err(SubsystemError::Host(format!("{call} refused")));
        }
        Ok(())
    }
}

impl SubsystemFactory for RecordingFactory {
    fn create_loader(&mut self) -> Result<Arc<dyn ResourceLoader>, SubsystemError> {
        self.enter("create_loader")?;
        self.inner.create_loader()
    }

    fn enable_accelerated_rendering(&mut self) -> Result<(), SubsystemError> {
        self.enter("enable_accelerated_rendering")?;
        self.inner.enable_accelerated_rendering()
    }

    fn enable_native_driver(&mut self) -> Result<(), SubsystemError> {
        self.enter("enable_native_driver")?;
        self.inner.enable_native_driver()
    }

    fn begin_cache_check(
        &mut self,
        system_clock: &Arc<Clock>,
    ) -> Result<Box<dyn CacheMaintenance>, SubsystemError> {
        self.enter("begin_cache_check")?;
        self.inner.begin_cache_check(system_clock)
    }

    fn create_stage(&mut self) -> Result<Arc<dyn DisplayRoot>, SubsystemError> {
        self.enter("create_stage")?;
        self.inner.create_stage()
    }

    fn create_renderer(
        &mut self,
        origin: Origin,
    ) -> Result<Box<dyn RenderBackend>, SubsystemError> {
        self.enter("create_renderer")?;
        Ok(Box::new(RecordingRenderer {
            inner: self.inner.create_renderer(origin)?,
            journal: self.journal.clone(),
        }))
    }

    fn bind_scene(&mut self, scene: &SceneBindings) -> Result<(), SubsystemError> {
        self.enter("bind_scene")?;
        self.inner.bind_scene(scene)
    }

    fn create_keyboard(
        &mut self,
        scene: &SceneBindings,
    ) -> Result<Box<dyn KeyboardManager>, SubsystemError> {
        self.enter("create_keyboard")?;
        self.inner.create_keyboard(scene)
    }

    fn create_mouse(
        &mut self,
        scene: &SceneBindings,
        surface: SurfaceHandle,
    ) -> Result<Box<dyn MouseManager>, SubsystemError> {
        self.enter("create_mouse")?;
        self.inner.create_mouse(scene, surface)
    }

    fn create_text_input(
        &mut self,
        scene: &SceneBindings,
    ) -> Result<Box<dyn TextInputManager>, SubsystemError> {
        self.enter("create_text_input")?;
        self.inner.create_text_input(scene)
    }

    fn create_sound_manager(&mut self) -> Result<Box<dyn SoundManager>, SubsystemError> {
        self.enter("create_sound_manager")?;
        self.inner.create_sound_manager()
    }
}

/// A debug panel counting its activations.
#[derive(Debug, Default)]
pub struct CountingPanel {
    pub activations: AtomicUsize,
}

impl CountingPanel {
    pub fn activations(&self) -> usize {
        self.activations.load(Ordering::SeqCst)
    }
}

impl DebugPanel for CountingPanel {
    fn enable(&self) {
        self.activations.fetch_add(1, Ordering::SeqCst);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A fetcher serving a fixed script and counting requests.
#[derive(Debug, Clone)]
pub struct StaticFetcher {
    pub source: Option<String>,
    pub requests: Arc<Mutex<Vec<String>>>,
}

impl StaticFetcher {
    pub fn serving(source: &str) -> Self {
        Self {
            source: Some(source.to_string()),
            requests: Arc::default(),
        }
    }

    pub fn missing() -> Self {
        Self {
            source: None,
            requests: Arc::default(),
        }
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ScriptFetcher for StaticFetcher {
    async fn fetch(&self, path: &str) -> Result<String, FetchError> {
        self.requests.lock().unwrap().push(path.to_string());
        self.source
            .clone()
            .ok_or_else(|| FetchError::NotFound(path.to_string()))
    }
}

/// A fetcher that waits until released.
#[derive(Debug, Clone)]
pub struct GatedFetcher {
    pub source: String,
    pub gate: Arc<tokio::sync::Notify>,
}

#[async_trait]
impl ScriptFetcher for GatedFetcher {
    async fn fetch(&self, _path: &str) -> Result<String, FetchError> {
        self.gate.notified().await;
        Ok(self.source.clone())
    }
}

/// A fetcher whose task dies without producing a result.
#[derive(Debug, Clone, Default)]
pub struct PanickingFetcher;

#[async_trait]
impl ScriptFetcher for PanickingFetcher {
    async fn fetch(&self, path: &str) -> Result<String, FetchError> {
        panic!("fetcher crashed while loading {path}");
    }
}
