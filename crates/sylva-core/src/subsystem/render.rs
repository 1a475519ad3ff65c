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

use std::fmt::Debug;

use super::SceneBindings;
use crate::error::SubsystemError;

/// Opaque handle to the native surface a render backend draws into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceHandle(u64);

impl SurfaceHandle {
    /// Wraps a backend-specific surface identifier.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the backend-specific surface identifier.
    pub const fn id(self) -> u64 {
        self.0
    }
}

/// How a render backend draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// CPU rasterization.
    #[default]
    Software,
    /// Hardware-accelerated drawing.
    Accelerated,
}

/// Position of the render surface within the host window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Origin {
    /// Horizontal offset in pixels.
    pub x: i32,
    /// Vertical offset in pixels.
    pub y: i32,
}

impl Origin {
    /// The top-left corner.
    pub const ZERO: Self = Self { x: 0, y: 0 };
}

/// Statistics of one rendered frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    /// Monotonic frame counter, starting at 1.
    pub frame_number: u64,
    /// Surface width used for the frame.
    pub width: u32,
    /// Surface height used for the frame.
    pub height: u32,
}

/// The renderer that owns the drawable surface.
pub trait RenderBackend: Debug + Send {
    /// The mode the backend was created in.
    fn mode(&self) -> RenderMode;

    /// Where the surface sits in the host window.
    fn origin(&self) -> Origin;

    /// The native surface handle.
    fn surface(&self) -> SurfaceHandle;

    /// Current surface dimensions.
    fn surface_size(&self) -> (u32, u32);

    /// One-time setup of the sprite rendering paths. Needs the stage to be
    /// bound already.
    fn init_sprite_rendering(&mut self, scene: &SceneBindings) -> Result<(), SubsystemError>;

    /// Draws one frame of the stage.
    fn render(&mut self, scene: &SceneBindings) -> Result<FrameStats, SubsystemError>;
}
