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

/// Background music and sound policy.
pub trait SoundManager: Debug + Send {
    /// When `true`, background music stops as soon as the host loses focus.
    fn set_auto_stop_music(&mut self, enabled: bool);

    /// Returns the auto-stop policy.
    fn auto_stop_music(&self) -> bool;

    /// Starts looping background music from `url`.
    fn play_music(&mut self, url: &str);

    /// The background music track, if one was started.
    fn current_music(&self) -> Option<&str>;

    /// Returns `true` while the background music is audible.
    fn is_music_playing(&self) -> bool;

    /// Notifies the manager that the host gained or lost focus. With
    /// auto-stop enabled, music pauses on focus loss and resumes on focus
    /// gain.
    fn on_focus_changed(&mut self, focused: bool);
}
