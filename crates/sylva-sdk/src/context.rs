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

//! The registry of subsystem instances built by the bootstrap.

use std::fmt;
use std::sync::Arc;

use sylva_core::subsystem::{
    CacheMaintenance, DisplayRoot, KeyboardManager, MouseManager, RenderBackend, ResourceLoader,
    SceneBindings, SoundManager, SurfaceHandle, TextInputManager,
};
use sylva_core::{Clock, ClockHierarchy};

use crate::error::BootStep;

/// Every subsystem instance the bootstrap constructed.
///
/// Built as a whole by [`Engine::init`](crate::Engine::init); there is no
/// partially built context.
pub struct EngineContext {
    pub(crate) clocks: ClockHierarchy,
    pub(crate) loader: Arc<dyn ResourceLoader>,
    pub(crate) cache: Box<dyn CacheMaintenance>,
    pub(crate) stage: Arc<dyn DisplayRoot>,
    pub(crate) current_stage: Arc<dyn DisplayRoot>,
    pub(crate) root_path: String,
    pub(crate) renderer: Box<dyn RenderBackend>,
    pub(crate) scene: SceneBindings,
    pub(crate) keyboard: Box<dyn KeyboardManager>,
    pub(crate) mouse: Box<dyn MouseManager>,
    pub(crate) text_input: Box<dyn TextInputManager>,
    pub(crate) sound: Box<dyn SoundManager>,
    pub(crate) surface: SurfaceHandle,
}

impl EngineContext {
    /// The six logical clocks.
    pub fn clocks(&self) -> &ClockHierarchy {
        &self.clocks
    }

    /// The engine-internal system clock.
    pub fn system_clock(&self) -> &Arc<Clock> {
        &self.clocks.system
    }

    /// The master content clock.
    pub fn master_clock(&self) -> &Arc<Clock> {
        &self.clocks.master
    }

    /// The resource loader.
    pub fn loader(&self) -> &Arc<dyn ResourceLoader> {
        &self.loader
    }

    /// The background cache check.
    pub fn cache(&self) -> &dyn CacheMaintenance {
        self.cache.as_ref()
    }

    /// The canonical stage.
    pub fn stage(&self) -> &Arc<dyn DisplayRoot> {
        &self.stage
    }

    /// The stage currently shown. Identical to [`stage`](Self::stage) right
    /// after the bootstrap.
    pub fn current_stage(&self) -> &Arc<dyn DisplayRoot> {
        &self.current_stage
    }

    /// The root resource path derived from the host location.
    pub fn root_path(&self) -> &str {
        &self.root_path
    }

    /// The render backend.
    pub fn renderer(&self) -> &dyn RenderBackend {
        self.renderer.as_ref()
    }

    /// The references handed to the scene-level subsystems.
    pub fn scene(&self) -> &SceneBindings {
        &self.scene
    }

    /// The keyboard manager.
    pub fn keyboard(&self) -> &dyn KeyboardManager {
        self.keyboard.as_ref()
    }

    /// The mouse manager.
    pub fn mouse(&self) -> &dyn MouseManager {
        self.mouse.as_ref()
    }

    /// The text input manager.
    pub fn text_input(&self) -> &dyn TextInputManager {
        self.text_input.as_ref()
    }

    /// Mutable access to the text input manager, e.g. to move focus.
    pub fn text_input_mut(&mut self) -> &mut dyn TextInputManager {
        self.text_input.as_mut()
    }

    /// The sound manager.
    pub fn sound(&self) -> &dyn SoundManager {
        self.sound.as_ref()
    }

    /// Mutable access to the sound manager.
    pub fn sound_mut(&mut self) -> &mut dyn SoundManager {
        self.sound.as_mut()
    }

    /// The drawable surface owned by the render backend.
    pub fn surface(&self) -> SurfaceHandle {
        self.surface
    }
}

impl fmt::Debug for EngineContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineContext")
            .field("root_path", &self.root_path)
            .field("stage_size", &self.stage.size())
            .field("renderer", &self.renderer)
            .field("surface", &self.surface)
            .finish_non_exhaustive()
    }
}

/// Whether the bootstrap ran.
#[derive(Debug, Default)]
pub enum EngineState {
    /// `init` was never called.
    #[default]
    Uninitialized,
    /// `init` completed; the context is final.
    Ready(Box<EngineContext>),
    /// `init` failed at the given step. The engine stays unusable and later
    /// `init` calls do nothing.
    Failed(BootStep),
}

impl EngineState {
    /// Returns `true` once the bootstrap completed.
    pub fn is_ready(&self) -> bool {
        matches!(self, EngineState::Ready(_))
    }

    /// Returns `true` until the first `init` call.
    pub fn is_uninitialized(&self) -> bool {
        matches!(self, EngineState::Uninitialized)
    }

    /// The step a failed bootstrap stopped at.
    pub fn failed_step(&self) -> Option<BootStep> {
        match self {
            EngineState::Failed(step) => Some(*step),
            _ => None,
        }
    }

    /// The context, once ready.
    pub fn context(&self) -> Option<&EngineContext> {
        match self {
            EngineState::Ready(context) => Some(&**context),
            _ => None,
        }
    }

    pub(crate) fn context_mut(&mut self) -> Option<&mut EngineContext> {
        match self {
            EngineState::Ready(context) => Some(&mut **context),
            _ => None,
        }
    }
}
