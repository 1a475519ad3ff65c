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

//! The public-facing Software Development Kit (SDK) for the Sylva engine.
//!
//! [`Engine::init`] builds every mandatory subsystem exactly once, in a fixed
//! dependency order, and exposes them through the [`EngineContext`]. The
//! engine also owns the global error alerts and the deferred debug panel.
//!
//! ```no_run
//! use sylva_sdk::prelude::*;
//!
//! let mut engine = Engine::builder(HeadlessHost::new(Location::file("/game/index"))).build();
//! let surface = engine.init(1136, 640, &mut []).unwrap();
//! assert!(surface.is_some());
//! ```

mod bootstrap;
pub mod config;
mod context;
pub mod debug_panel;
pub mod error;
pub mod error_reporter;
pub mod logging;

use std::sync::Arc;
use std::time::Duration;

use sylva_core::platform::HostEnvironment;
use sylva_core::plugin::Plugin;
use sylva_core::script::{
    DisabledScriptRunner, ScriptError, ScriptFetcher, ScriptOutput, ScriptRunner,
    DEFAULT_DEBUG_PANEL_PATH,
};
use sylva_core::subsystem::{FrameStats, InputEvent, SubsystemFactory, SurfaceHandle};
use sylva_core::SubsystemError;
use sylva_infra::io::FsScriptFetcher;
use sylva_infra::DefaultSubsystems;

pub use config::{ConfigError, DebugPanelConfig, EngineConfig};
pub use context::{EngineContext, EngineState};
pub use debug_panel::{DebugPanelLoader, DebugPanelState};
pub use error::{BootStep, InitError};
pub use error_reporter::{AlertBudget, ErrorReporter};
pub use logging::init_logging;

/// The engine version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports for applications.
pub mod prelude {
    pub use crate::{Engine, EngineBuilder, EngineConfig, EngineContext, InitError};
    pub use sylva_core::platform::{HostEnvironment, Location};
    pub use sylva_core::plugin::{Enable, Plugin};
    pub use sylva_core::subsystem::{InputEvent, MouseButton, SurfaceHandle};
    pub use sylva_infra::{DefaultSubsystems, HeadlessHost, ProcessHost};
}

/// Configures an [`Engine`].
pub struct EngineBuilder {
    host: Arc<dyn HostEnvironment>,
    factory: Option<Box<dyn SubsystemFactory>>,
    scripts: Option<Arc<dyn ScriptRunner>>,
    fetcher: Option<Arc<dyn ScriptFetcher>>,
    alert_global_error: bool,
    cache_interval: Option<Duration>,
}

impl EngineBuilder {
    /// Starts configuring an engine running on `host`.
    pub fn new(host: impl HostEnvironment + 'static) -> Self {
        Self::with_shared_host(Arc::new(host))
    }

    /// Like [`new`](Self::new), for a host that is already shared.
    pub fn with_shared_host(host: Arc<dyn HostEnvironment>) -> Self {
        Self {
            host,
            factory: None,
            scripts: None,
            fetcher: None,
            alert_global_error: false,
            cache_interval: None,
        }
    }

    /// Applies the engine-level settings of `config`: the error alerts and
    /// the cache check interval of the default factory.
    pub fn config(mut self, config: &EngineConfig) -> Self {
        self.alert_global_error = config.alert_global_error;
        self.cache_interval = Some(config.cache_check_interval());
        self
    }

    /// Uses `factory` to build the subsystems. Defaults to
    /// [`DefaultSubsystems`].
    ///
    /// A custom factory owns its cache settings; the configured cache check
    /// interval only applies to the default one, whatever the call order.
    pub fn factory(mut self, factory: impl SubsystemFactory + 'static) -> Self {
        self.factory = Some(Box::new(factory));
        self
    }

    /// Uses `scripts` to run host script. Defaults to
    /// [`DisabledScriptRunner`].
    pub fn script_runner(mut self, scripts: impl ScriptRunner + 'static) -> Self {
        self.scripts = Some(Arc::new(scripts));
        self
    }

    /// Uses `fetcher` to retrieve the debug panel script. Defaults to
    /// [`FsScriptFetcher`].
    pub fn script_fetcher(mut self, fetcher: impl ScriptFetcher + 'static) -> Self {
        self.fetcher = Some(Arc::new(fetcher));
        self
    }

    /// Enables the global error alerts right away.
    pub fn alert_global_error(mut self, enabled: bool) -> Self {
        self.alert_global_error = enabled;
        self
    }

    /// Builds the engine. Nothing is constructed until [`Engine::init`].
    pub fn build(self) -> Engine {
        let mut engine = Engine {
            host: self.host,
            factory: self.factory.unwrap_or_else(|| {
                let factory = DefaultSubsystems::new();
                Box::new(match self.cache_interval {
                    Some(interval) => factory.with_cache_interval(interval),
                    None => factory,
                })
            }),
            scripts: self
                .scripts
                .unwrap_or_else(|| Arc::new(DisabledScriptRunner)),
            fetcher: self.fetcher.unwrap_or_else(|| Arc::new(FsScriptFetcher)),
            state: EngineState::Uninitialized,
            reporter: ErrorReporter::new(),
            debug_panel: DebugPanelLoader::new(),
        };
        if self.alert_global_error {
            engine.set_alert_global_error(true);
        }
        engine
    }
}

/// The engine: the bootstrap entry point and owner of every subsystem.
pub struct Engine {
    host: Arc<dyn HostEnvironment>,
    factory: Box<dyn SubsystemFactory>,
    scripts: Arc<dyn ScriptRunner>,
    fetcher: Arc<dyn ScriptFetcher>,
    state: EngineState,
    reporter: ErrorReporter,
    debug_panel: DebugPanelLoader,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("state", &self.state)
            .field("reporter", &self.reporter)
            .field("debug_panel", &self.debug_panel)
            .finish_non_exhaustive()
    }
}

impl Engine {
    /// Starts configuring an engine running on `host`.
    pub fn builder(host: impl HostEnvironment + 'static) -> EngineBuilder {
        EngineBuilder::new(host)
    }

    /// Builds and wires every mandatory subsystem.
    ///
    /// The first call runs the bootstrap and, on success, returns the
    /// drawable surface. Every later call does nothing and returns
    /// `Ok(None)`, whether the first one succeeded or failed.
    pub fn init(
        &mut self,
        width: u32,
        height: u32,
        plugins: &mut [Box<dyn Plugin>],
    ) -> Result<Option<SurfaceHandle>, InitError> {
        match &self.state {
            EngineState::Uninitialized => {}
            EngineState::Ready(_) => {
                log::debug!("Engine already initialized, ignoring init.");
                return Ok(None);
            }
            EngineState::Failed(step) => {
                log::debug!("Engine bootstrap already failed at {step}, ignoring init.");
                return Ok(None);
            }
        }

        log::info!("Initializing Sylva engine {VERSION} ({width}x{height})...");
        let context = match bootstrap::run(
            self.host.as_ref(),
            self.factory.as_mut(),
            width,
            height,
            plugins,
        ) {
            Ok(context) => context,
            Err(err) => {
                log::error!("Sylva engine bootstrap failed: {err}");
                self.state = EngineState::Failed(err.step());
                return Err(err);
            }
        };
        let surface = context.surface();
        self.state = EngineState::Ready(Box::new(context));
        log::info!("Sylva engine {VERSION} initialized.");
        Ok(Some(surface))
    }

    /// Returns `true` once [`init`](Self::init) succeeded.
    pub fn is_initialized(&self) -> bool {
        self.state.is_ready()
    }

    /// The initialization state.
    pub fn state(&self) -> &EngineState {
        &self.state
    }

    /// The subsystem registry, once initialized.
    pub fn context(&self) -> Option<&EngineContext> {
        self.state.context()
    }

    /// Mutable access to the registry, once initialized.
    pub fn context_mut(&mut self) -> Option<&mut EngineContext> {
        self.state.context_mut()
    }

    /// The host the engine runs on.
    pub fn host(&self) -> &Arc<dyn HostEnvironment> {
        &self.host
    }

    /// Turns the alerts for uncaught faults on or off.
    ///
    /// Turning them on always starts a fresh alert budget.
    pub fn set_alert_global_error(&mut self, enabled: bool) {
        if enabled {
            self.reporter.attach(self.host.as_ref());
        } else {
            self.reporter.detach(self.host.as_ref());
        }
    }

    /// Returns `true` while the alerts for uncaught faults are on.
    pub fn alert_global_error(&self) -> bool {
        self.reporter.is_attached()
    }

    /// The error reporter.
    pub fn error_reporter(&self) -> &ErrorReporter {
        &self.reporter
    }

    /// Runs `source` through the configured script runner.
    pub fn run_script(&self, source: &str) -> Result<ScriptOutput, ScriptError> {
        self.scripts.run_script(source, self.host.as_ref())
    }

    /// Enables the debug panel, loading its script from `path` (default
    /// [`DEFAULT_DEBUG_PANEL_PATH`]) if it is not registered yet.
    ///
    /// Once initialized, `path` resolves against the root path. Loading
    /// happens in the background; see [`poll_debug_panel`](Self::poll_debug_panel)
    /// and [`settle_debug_panel`](Self::settle_debug_panel).
    pub fn enable_debug_panel(&mut self, path: Option<&str>) {
        let path = path.unwrap_or(DEFAULT_DEBUG_PANEL_PATH);
        let resolved = match self.state.context() {
            Some(context) => context.loader().resolve(path),
            None => path.to_string(),
        };
        self.debug_panel
            .request(self.host.as_ref(), &self.fetcher, resolved);
    }

    /// Applies a finished debug panel load, if any.
    pub fn poll_debug_panel(&mut self) -> DebugPanelState {
        self.debug_panel
            .poll(self.host.as_ref(), self.scripts.as_ref())
    }

    /// Waits for the in-flight debug panel load and applies it.
    pub async fn settle_debug_panel(&mut self) -> DebugPanelState {
        self.debug_panel
            .settle(self.host.as_ref(), self.scripts.as_ref())
            .await
    }

    /// Aborts the in-flight debug panel load.
    pub fn cancel_debug_panel(&mut self) {
        self.debug_panel.cancel();
    }

    /// The debug panel loader.
    pub fn debug_panel(&self) -> &DebugPanelLoader {
        &self.debug_panel
    }

    /// Runs one frame: applies finished debug panel loads, advances the
    /// clocks by `real_delta`, runs the cache check and renders the stage.
    ///
    /// Returns `Ok(None)` before [`init`](Self::init).
    pub fn tick(&mut self, real_delta: Duration) -> Result<Option<FrameStats>, SubsystemError> {
        self.poll_debug_panel();
        let Some(context) = self.state.context_mut() else {
            return Ok(None);
        };

        context.clocks.advance_all(real_delta);
        context.cache.check();
        let stats = context.renderer.render(&context.scene)?;
        log::trace!("Frame {} rendered.", stats.frame_number);
        Ok(Some(stats))
    }

    /// Offers `event` to the keyboard, mouse and text input managers.
    /// Returns `true` if any of them consumed it.
    pub fn dispatch_input(&mut self, event: &InputEvent) -> bool {
        let Some(context) = self.state.context_mut() else {
            return false;
        };
        let keyboard = context.keyboard.handle(event);
        let mouse = context.mouse.handle(event);
        let text = context.text_input.handle(event);
        keyboard || mouse || text
    }

    /// Forwards a focus change of the host window to the sound manager.
    pub fn notify_focus(&mut self, focused: bool) {
        if let Some(context) = self.state.context_mut() {
            context.sound.on_focus_changed(focused);
        }
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        if self.reporter.is_attached() {
            self.reporter.detach(self.host.as_ref());
        }
    }
}
