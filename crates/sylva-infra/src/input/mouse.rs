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

use std::collections::HashSet;
use std::sync::Arc;

use sylva_core::subsystem::{DisplayRoot, InputEvent, MouseButton, MouseManager, SurfaceHandle};

/// Tracks the cursor and mouse buttons over the stage.
#[derive(Debug)]
pub struct Mouse {
    stage: Arc<dyn DisplayRoot>,
    surface: SurfaceHandle,
    position: (f32, f32),
    buttons: HashSet<MouseButton>,
    wheel: (f32, f32),
}

impl Mouse {
    /// Creates a mouse manager listening on `surface` and reporting
    /// positions in `stage` coordinates.
    pub fn new(stage: Arc<dyn DisplayRoot>, surface: SurfaceHandle) -> Self {
        Self {
            stage,
            surface,
            position: (0.0, 0.0),
            buttons: HashSet::new(),
            wheel: (0.0, 0.0),
        }
    }

    /// Accumulated wheel delta since creation.
    pub fn wheel(&self) -> (f32, f32) {
        self.wheel
    }
}

impl MouseManager for Mouse {
    fn handle(&mut self, event: &InputEvent) -> bool {
        match *event {
            InputEvent::MouseMoved { x, y } => {
                let (width, height) = self.stage.size();
                self.position = (x.clamp(0.0, width as f32), y.clamp(0.0, height as f32));
                true
            }
            InputEvent::MouseButtonPressed { button } => {
                self.buttons.insert(button);
                true
            }
            InputEvent::MouseButtonReleased { button } => {
                self.buttons.remove(&button);
                true
            }
            InputEvent::MouseWheelScrolled { delta_x, delta_y } => {
                self.wheel.0 += delta_x;
                self.wheel.1 += delta_y;
                true
            }
            _ => false,
        }
    }

    fn position(&self) -> (f32, f32) {
        self.position
    }

    fn is_button_down(&self, button: MouseButton) -> bool {
        self.buttons.contains(&button)
    }

    fn surface(&self) -> SurfaceHandle {
        self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::Stage;

    fn mouse(width: u32, height: u32) -> Mouse {
        let stage = Arc::new(Stage::new());
        stage.set_size(width, height);
        Mouse::new(stage, SurfaceHandle::new(7))
    }

    #[test]
    fn position_is_clamped_to_the_stage() {
        let mut mouse = mouse(100, 50);
        mouse.handle(&InputEvent::MouseMoved { x: 40.0, y: 20.0 });
        assert_eq!(mouse.position(), (40.0, 20.0));

        mouse.handle(&InputEvent::MouseMoved {
            x: 400.0,
            y: -3.0,
        });
        assert_eq!(mouse.position(), (100.0, 0.0));
    }

    #[test]
    fn tracks_buttons_and_wheel() {
        let mut mouse = mouse(10, 10);
        mouse.handle(&InputEvent::MouseButtonPressed {
            button: MouseButton::Left,
        });
        assert!(mouse.is_button_down(MouseButton::Left));
        mouse.handle(&InputEvent::MouseButtonReleased {
            button: MouseButton::Left,
        });
        assert!(!mouse.is_button_down(MouseButton::Left));

        mouse.handle(&InputEvent::MouseWheelScrolled {
            delta_x: 0.0,
            delta_y: -2.5,
        });
        assert_eq!(mouse.wheel(), (0.0, -2.5));
        assert_eq!(mouse.surface(), SurfaceHandle::new(7));
    }
}
