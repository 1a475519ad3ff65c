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

use super::SurfaceHandle;

/// Platform-agnostic input events routed to the input managers.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A keyboard key was pressed.
    KeyPressed {
        /// A string representation of the physical key code.
        key_code: String,
    },
    /// A keyboard key was released.
    KeyReleased {
        /// A string representation of the physical key code.
        key_code: String,
    },
    /// A mouse button was pressed.
    MouseButtonPressed {
        /// The mouse button that was pressed.
        button: MouseButton,
    },
    /// A mouse button was released.
    MouseButtonReleased {
        /// The mouse button that was released.
        button: MouseButton,
    },
    /// The mouse cursor moved, in surface pixels.
    MouseMoved {
        /// The new x-coordinate of the cursor.
        x: f32,
        /// The new y-coordinate of the cursor.
        y: f32,
    },
    /// The mouse wheel was scrolled.
    MouseWheelScrolled {
        /// The horizontal scroll delta.
        delta_x: f32,
        /// The vertical scroll delta.
        delta_y: f32,
    },
    /// Text was committed by the platform's text input.
    TextEntered {
        /// The committed text.
        text: String,
    },
}

/// Represents a button on a mouse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// The left mouse button.
    Left,
    /// The right mouse button.
    Right,
    /// The middle mouse button.
    Middle,
    /// Another mouse button, identified by a numeric code.
    Other(u16),
}

/// Keyboard state tracking.
pub trait KeyboardManager: Debug + Send {
    /// Applies `event`; returns `true` if it was a keyboard event.
    fn handle(&mut self, event: &InputEvent) -> bool;

    /// Returns `true` while `key_code` is held.
    fn is_pressed(&self, key_code: &str) -> bool;
}

/// Mouse state tracking, bound to the stage and the drawable surface.
pub trait MouseManager: Debug + Send {
    /// Applies `event`; returns `true` if it was a mouse event.
    fn handle(&mut self, event: &InputEvent) -> bool;

    /// Cursor position in stage coordinates.
    fn position(&self) -> (f32, f32);

    /// Returns `true` while `button` is held.
    fn is_button_down(&self, button: MouseButton) -> bool;

    /// The surface this manager listens on.
    fn surface(&self) -> SurfaceHandle;
}

/// Text entry for focused input fields.
pub trait TextInputManager: Debug + Send {
    /// Applies `event`; returns `true` if it was consumed as text.
    fn handle(&mut self, event: &InputEvent) -> bool;

    /// Gives or removes text focus.
    fn set_focus(&mut self, focused: bool);

    /// Returns `true` while a text field has focus.
    fn is_focused(&self) -> bool;

    /// Returns and clears the text typed since the last call.
    fn take_text(&mut self) -> String;
}
