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

//! A canvas-style render backend that owns an off-screen surface.

use std::sync::atomic::{AtomicU64, Ordering};

use sylva_core::subsystem::{
    FrameStats, Origin, RenderBackend, RenderMode, SceneBindings, SurfaceHandle,
};
use sylva_core::SubsystemError;

static NEXT_SURFACE_ID: AtomicU64 = AtomicU64::new(1);

/// The default render backend.
///
/// The surface follows the stage size; it is resized at the start of each
/// frame if the stage changed.
#[derive(Debug)]
pub struct CanvasRenderer {
    mode: RenderMode,
    origin: Origin,
    surface: SurfaceHandle,
    size: (u32, u32),
    sprite_ready: bool,
    frame: u64,
}

impl CanvasRenderer {
    /// Creates a renderer with a fresh surface at `origin`.
    pub fn new(mode: RenderMode, origin: Origin) -> Self {
        let surface = SurfaceHandle::new(NEXT_SURFACE_ID.fetch_add(1, Ordering::Relaxed));
        log::info!(
            "Created {mode:?} canvas renderer (surface {}) at ({}, {}).",
            surface.id(),
            origin.x,
            origin.y
        );
        Self {
            mode,
            origin,
            surface,
            size: (0, 0),
            sprite_ready: false,
            frame: 0,
        }
    }

    /// Returns `true` once the sprite paths are set up.
    pub fn is_sprite_ready(&self) -> bool {
        self.sprite_ready
    }
}

impl RenderBackend for CanvasRenderer {
    fn mode(&self) -> RenderMode {
        self.mode
    }

    fn origin(&self) -> Origin {
        self.origin
    }

    fn surface(&self) -> SurfaceHandle {
        self.surface
    }

    fn surface_size(&self) -> (u32, u32) {
        self.size
    }

    fn init_sprite_rendering(&mut self, scene: &SceneBindings) -> Result<(), SubsystemError> {
        if self.sprite_ready {
            return Err(SubsystemError::AlreadyInitialized("sprite rendering"));
        }
        self.size = scene.stage.size();
        self.sprite_ready = true;
        log::debug!(
            "Sprite rendering ready on a {}x{} surface.",
            self.size.0,
            self.size.1
        );
        Ok(())
    }

    fn render(&mut self, scene: &SceneBindings) -> Result<FrameStats, SubsystemError> {
        if !self.sprite_ready {
            return Err(SubsystemError::MissingDependency {
                subsystem: "renderer",
                dependency: "sprite rendering",
            });
        }

        let stage_size = scene.stage.size();
        if stage_size != self.size {
            log::debug!(
                "Resizing surface {} from {:?} to {:?}.",
                self.surface.id(),
                self.size,
                stage_size
            );
            self.size = stage_size;
        }

        self.frame += 1;
        Ok(FrameStats {
            frame_number: self.frame,
            width: self.size.0,
            height: self.size.1,
        })
    }
}
