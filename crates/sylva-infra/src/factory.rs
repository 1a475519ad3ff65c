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

//! The default [`SubsystemFactory`].

use std::sync::Arc;
use std::time::Duration;

use sylva_core::subsystem::{
    CacheMaintenance, DisplayRoot, KeyboardManager, MouseManager, Origin, RenderBackend,
    RenderMode, ResourceLoader, SceneBindings, SoundManager, SubsystemFactory, SurfaceHandle,
    TextInputManager,
};
use sylva_core::{Clock, SubsystemError};

use crate::audio::MusicSoundManager;
use crate::cache::{CacheManager, CacheSweeper, DEFAULT_CACHE_CHECK_INTERVAL};
use crate::display::Stage;
use crate::graphics::CanvasRenderer;
use crate::input::{Keyboard, Mouse, TextInput};
use crate::io::LoaderManager;

/// What paces the frame loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrameDriver {
    /// The engine's own timer.
    #[default]
    Timer,
    /// The native host's run driver.
    Native,
}

/// Builds the subsystems shipped in this crate.
pub struct DefaultSubsystems {
    render_mode: RenderMode,
    frame_driver: FrameDriver,
    cache_interval: Duration,
    sweepers: Vec<(String, CacheSweeper)>,
    scene: Option<SceneBindings>,
}

impl std::fmt::Debug for DefaultSubsystems {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sweepers: Vec<&str> = self.sweepers.iter().map(|(n, _)| n.as_str()).collect();
        f.debug_struct("DefaultSubsystems")
            .field("render_mode", &self.render_mode)
            .field("frame_driver", &self.frame_driver)
            .field("cache_interval", &self.cache_interval)
            .field("sweepers", &sweepers)
            .field("scene_bound", &self.scene.is_some())
            .finish()
    }
}

impl Default for DefaultSubsystems {
    fn default() -> Self {
        Self::new()
    }
}

impl DefaultSubsystems {
    /// Creates a factory producing software-rendered, timer-driven
    /// subsystems with the default cache check interval.
    pub fn new() -> Self {
        Self {
            render_mode: RenderMode::default(),
            frame_driver: FrameDriver::default(),
            cache_interval: DEFAULT_CACHE_CHECK_INTERVAL,
            sweepers: Vec::new(),
            scene: None,
        }
    }

    /// Overrides the cache check interval.
    pub fn with_cache_interval(mut self, interval: Duration) -> Self {
        self.cache_interval = interval;
        self
    }

    /// Adds a routine the cache check runs on every sweep. Only sweepers
    /// registered before the cache check starts are picked up.
    pub fn register_cache_sweeper(&mut self, name: impl Into<String>, sweeper: CacheSweeper) {
        self.sweepers.push((name.into(), sweeper));
    }

    /// The mode render backends are created in.
    pub fn render_mode(&self) -> RenderMode {
        self.render_mode
    }

    /// What paces the frame loop.
    pub fn frame_driver(&self) -> FrameDriver {
        self.frame_driver
    }

    fn scene(&self, subsystem: &'static str) -> Result<&SceneBindings, SubsystemError> {
        self.scene
            .as_ref()
            .ok_or(SubsystemError::MissingDependency {
                subsystem,
                dependency: "scene bindings",
            })
    }
}

impl SubsystemFactory for DefaultSubsystems {
    fn create_loader(&mut self) -> Result<Arc<dyn ResourceLoader>, SubsystemError> {
        Ok(Arc::new(LoaderManager::new()))
    }

    fn enable_accelerated_rendering(&mut self) -> Result<(), SubsystemError> {
        log::info!("Accelerated rendering enabled.");
        self.render_mode = RenderMode::Accelerated;
        Ok(())
    }

    fn enable_native_driver(&mut self) -> Result<(), SubsystemError> {
        log::info!("Frame pacing handed over to the native run driver.");
        self.frame_driver = FrameDriver::Native;
        Ok(())
    }

    fn begin_cache_check(
        &mut self,
        system_clock: &Arc<Clock>,
    ) -> Result<Box<dyn CacheMaintenance>, SubsystemError> {
        let mut cache = CacheManager::new(Arc::clone(system_clock), self.cache_interval);
        for (name, sweeper) in self.sweepers.drain(..) {
            cache.register(name, sweeper);
        }
        Ok(Box::new(cache))
    }

    fn create_stage(&mut self) -> Result<Arc<dyn DisplayRoot>, SubsystemError> {
        Ok(Arc::new(Stage::new()))
    }

    fn create_renderer(
        &mut self,
        origin: Origin,
    ) -> Result<Box<dyn RenderBackend>, SubsystemError> {
        Ok(Box::new(CanvasRenderer::new(self.render_mode, origin)))
    }

    fn bind_scene(&mut self, scene: &SceneBindings) -> Result<(), SubsystemError> {
        if self.scene.is_some() {
            return Err(SubsystemError::AlreadyInitialized("scene bindings"));
        }
        self.scene = Some(scene.clone());
        Ok(())
    }

    fn create_keyboard(
        &mut self,
        _scene: &SceneBindings,
    ) -> Result<Box<dyn KeyboardManager>, SubsystemError> {
        self.scene("keyboard")?;
        Ok(Box::new(Keyboard::new()))
    }

    fn create_mouse(
        &mut self,
        scene: &SceneBindings,
        surface: SurfaceHandle,
    ) -> Result<Box<dyn MouseManager>, SubsystemError> {
        self.scene("mouse")?;
        Ok(Box::new(Mouse::new(Arc::clone(&scene.stage), surface)))
    }

    fn create_text_input(
        &mut self,
        scene: &SceneBindings,
    ) -> Result<Box<dyn TextInputManager>, SubsystemError> {
        self.scene("text input")?;
        Ok(Box::new(TextInput::new(Arc::clone(&scene.system_clock))))
    }

    fn create_sound_manager(&mut self) -> Result<Box<dyn SoundManager>, SubsystemError> {
        Ok(Box::new(MusicSoundManager::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sylva_core::ClockHierarchy;

    fn bindings(factory: &mut DefaultSubsystems) -> SceneBindings {
        let clocks = ClockHierarchy::new();
        SceneBindings {
            master_clock: clocks.master,
            system_clock: clocks.system,
            stage: factory.create_stage().unwrap(),
        }
    }

    #[test]
    fn accelerated_mode_applies_to_later_renderers() {
        let mut factory = DefaultSubsystems::new();
        let before = factory.create_renderer(Origin::ZERO).unwrap();
        factory.enable_accelerated_rendering().unwrap();
        let after = factory.create_renderer(Origin::ZERO).unwrap();

        assert_eq!(before.mode(), RenderMode::Software);
        assert_eq!(after.mode(), RenderMode::Accelerated);
    }

    #[test]
    fn native_driver_switch() {
        let mut factory = DefaultSubsystems::new();
        assert_eq!(factory.frame_driver(), FrameDriver::Timer);
        factory.enable_native_driver().unwrap();
        assert_eq!(factory.frame_driver(), FrameDriver::Native);
    }

    #[test]
    fn input_managers_need_bound_scene() {
        let mut factory = DefaultSubsystems::new();
        let scene = bindings(&mut factory);

        assert!(matches!(
            factory.create_keyboard(&scene),
            Err(SubsystemError::MissingDependency { .. })
        ));

        factory.bind_scene(&scene).unwrap();
        assert!(factory.create_keyboard(&scene).is_ok());
        assert!(factory.create_text_input(&scene).is_ok());
        let mouse = factory
            .create_mouse(&scene, SurfaceHandle::new(3))
            .unwrap();
        assert_eq!(mouse.surface(), SurfaceHandle::new(3));

        assert!(matches!(
            factory.bind_scene(&scene),
            Err(SubsystemError::AlreadyInitialized(_))
        ));
    }

    #[test]
    fn registered_sweepers_run_on_the_system_clock() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let counter = Arc::new(AtomicUsize::new(0));
        let c = counter.clone();
        let mut factory = DefaultSubsystems::new().with_cache_interval(Duration::from_secs(1));
        factory.register_cache_sweeper(
            "atlas",
            Box::new(move || {
                c.fetch_add(1, Ordering::SeqCst);
            }),
        );

        let clock = Arc::new(Clock::new("system"));
        let mut cache = factory.begin_cache_check(&clock).unwrap();
        clock.advance(Duration::from_secs(1));

        assert_eq!(cache.check(), 1);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }
}
