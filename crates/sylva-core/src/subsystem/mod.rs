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

//! Construction contracts of the subsystems the bootstrap wires together.
//!
//! The bootstrap treats every subsystem as a black box: it only knows how to
//! construct it through a [`SubsystemFactory`] and which one-time activation
//! it needs. Dependencies between subsystems show up in the signatures, so a
//! subsystem can only be built once the things it needs exist.

mod audio;
mod cache;
mod display;
mod input;
mod loader;
mod render;

pub use audio::SoundManager;
pub use cache::CacheMaintenance;
pub use display::{lookup_stage, publish_stage, DisplayRoot};
pub use input::{InputEvent, KeyboardManager, MouseButton, MouseManager, TextInputManager};
pub use loader::ResourceLoader;
pub use render::{FrameStats, Origin, RenderBackend, RenderMode, SurfaceHandle};

use std::sync::Arc;

use crate::clock::Clock;
use crate::error::SubsystemError;

/// The references scene-level subsystems (nodes, text, event dispatch) need.
///
/// Built once by the bootstrap after the stage exists; this is the only
/// point where cross-subsystem wiring happens.
#[derive(Debug, Clone)]
pub struct SceneBindings {
    /// The master content clock nodes schedule on.
    pub master_clock: Arc<Clock>,
    /// The system clock used for engine-internal timing (text caret, etc.).
    pub system_clock: Arc<Clock>,
    /// The stage events are dispatched on.
    pub stage: Arc<dyn DisplayRoot>,
}

/// Builds and activates the engine's subsystems.
///
/// Methods are listed in the order the bootstrap calls them.
pub trait SubsystemFactory: Send {
    /// Constructs the resource loader.
    fn create_loader(&mut self) -> Result<Arc<dyn ResourceLoader>, SubsystemError>;

    /// Switches every render backend created afterwards to the accelerated
    /// mode.
    fn enable_accelerated_rendering(&mut self) -> Result<(), SubsystemError>;

    /// Hands frame pacing over to the native host's run driver.
    fn enable_native_driver(&mut self) -> Result<(), SubsystemError>;

    /// Starts the background cache check, timed on `system_clock`.
    fn begin_cache_check(
        &mut self,
        system_clock: &Arc<Clock>,
    ) -> Result<Box<dyn CacheMaintenance>, SubsystemError>;

    /// Constructs the display root.
    fn create_stage(&mut self) -> Result<Arc<dyn DisplayRoot>, SubsystemError>;

    /// Constructs the render backend at `origin`.
    fn create_renderer(&mut self, origin: Origin)
        -> Result<Box<dyn RenderBackend>, SubsystemError>;

    /// Propagates the clocks and the stage to the scene-level subsystems.
    fn bind_scene(&mut self, scene: &SceneBindings) -> Result<(), SubsystemError>;

    /// Constructs and initializes the keyboard manager.
    fn create_keyboard(
        &mut self,
        scene: &SceneBindings,
    ) -> Result<Box<dyn KeyboardManager>, SubsystemError>;

    /// Constructs the mouse manager bound to the stage and `surface`.
    fn create_mouse(
        &mut self,
        scene: &SceneBindings,
        surface: SurfaceHandle,
    ) -> Result<Box<dyn MouseManager>, SubsystemError>;

    /// Constructs and initializes the text input manager.
    fn create_text_input(
        &mut self,
        scene: &SceneBindings,
    ) -> Result<Box<dyn TextInputManager>, SubsystemError>;

    /// Constructs the sound manager.
    fn create_sound_manager(&mut self) -> Result<Box<dyn SoundManager>, SubsystemError>;
}
