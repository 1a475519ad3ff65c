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

use sylva_core::subsystem::{InputEvent, KeyboardManager};

/// Tracks which keys are held.
#[derive(Debug, Default)]
pub struct Keyboard {
    pressed: HashSet<String>,
}

impl Keyboard {
    /// Creates a keyboard with no key held.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyboardManager for Keyboard {
    fn handle(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::KeyPressed { key_code } => {
                self.pressed.insert(key_code.clone());
                true
            }
            InputEvent::KeyReleased { key_code } => {
                self.pressed.remove(key_code);
                true
            }
            _ => false,
        }
    }

    fn is_pressed(&self, key_code: &str) -> bool {
        self.pressed.contains(key_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_and_release() {
        let mut keyboard = Keyboard::new();
        assert!(keyboard.handle(&InputEvent::KeyPressed {
            key_code: "KeyA".into()
        }));
        assert!(keyboard.is_pressed("KeyA"));

        keyboard.handle(&InputEvent::KeyReleased {
            key_code: "KeyA".into(),
        });
        assert!(!keyboard.is_pressed("KeyA"));
    }

    #[test]
    fn ignores_mouse_events() {
        let mut keyboard = Keyboard::new();
        assert!(!keyboard.handle(&InputEvent::MouseMoved { x: 1.0, y: 2.0 }));
    }
}
