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

//! Default input managers.
//!
//! Each manager consumes the backend-agnostic [`InputEvent`]s relevant to it
//! and ignores the others, so the engine can offer every event to every
//! manager.
//!
//! [`InputEvent`]: sylva_core::subsystem::InputEvent

mod keyboard;
mod mouse;
mod text;

pub use keyboard::Keyboard;
pub use mouse::Mouse;
pub use text::{TextInput, CARET_BLINK_INTERVAL};
