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

use std::sync::Arc;
use std::time::Duration;

use sylva_core::subsystem::{InputEvent, TextInputManager};
use sylva_core::Clock;

/// Half-period of the text caret blink.
pub const CARET_BLINK_INTERVAL: Duration = Duration::from_millis(500);

/// Collects committed text while a field is focused.
#[derive(Debug)]
pub struct TextInput {
    clock: Arc<Clock>,
    focused: bool,
    focused_at: Duration,
    buffer: String,
}

impl TextInput {
    /// Creates a text input whose caret blinks on `clock`.
    pub fn new(clock: Arc<Clock>) -> Self {
        Self {
            clock,
            focused: false,
            focused_at: Duration::ZERO,
            buffer: String::new(),
        }
    }

    /// Returns `true` while the caret should be drawn.
    ///
    /// The caret is visible right after focus and toggles every
    /// [`CARET_BLINK_INTERVAL`] of clock time.
    pub fn caret_visible(&self) -> bool {
        if !self.focused {
            return false;
        }
        let since = self.clock.elapsed().saturating_sub(self.focused_at);
        (since.as_millis() / CARET_BLINK_INTERVAL.as_millis()) % 2 == 0
    }
}

impl TextInputManager for TextInput {
    fn handle(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::TextEntered { text } if self.focused => {
                self.buffer.push_str(text);
                true
            }
            _ => false,
        }
    }

    fn set_focus(&mut self, focused: bool) {
        if focused && !self.focused {
            self.focused_at = self.clock.elapsed();
        }
        self.focused = focused;
    }

    fn is_focused(&self) -> bool {
        self.focused
    }

    fn take_text(&mut self) -> String {
        std::mem::take(&mut self.buffer)
    }
}
