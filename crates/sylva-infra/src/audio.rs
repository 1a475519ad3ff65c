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

//! Background music policy.

use sylva_core::subsystem::SoundManager;

/// The default sound manager.
///
/// Decoding and mixing belong to the audio device; this type only keeps the
/// background-music state and the focus policy.
#[derive(Debug, Default)]
pub struct MusicSoundManager {
    auto_stop_music: bool,
    music: Option<String>,
    playing: bool,
}

impl MusicSoundManager {
    /// Creates a sound manager with auto-stop disabled and no music.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stops the background music.
    pub fn stop_music(&mut self) {
        self.music = None;
        self.playing = false;
    }
}

impl SoundManager for MusicSoundManager {
    fn set_auto_stop_music(&mut self, enabled: bool) {
        self.auto_stop_music = enabled;
    }

    fn auto_stop_music(&self) -> bool {
        self.auto_stop_music
    }

    fn play_music(&mut self, url: &str) {
        log::debug!("Playing background music '{url}'.");
        self.music = Some(url.to_string());
        self.playing = true;
    }

    fn current_music(&self) -> Option<&str> {
        self.music.as_deref()
    }

    fn is_music_playing(&self) -> bool {
        self.playing
    }

    fn on_focus_changed(&mut self, focused: bool) {
        if !self.auto_stop_music || self.music.is_none() {
            return;
        }
        if self.playing != focused {
            log::debug!(
                "{} background music on focus change.",
                if focused { "Resuming" } else { "Pausing" }
            );
        }
        self.playing = focused;
    }
}
