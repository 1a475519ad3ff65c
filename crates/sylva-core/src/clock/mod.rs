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

//! Logical clocks.
//!
//! A [`Clock`] is an independent time source with its own scale factor. Clocks
//! never tick on their own: whoever owns the frame loop feeds them real elapsed
//! time through [`Clock::advance`], and each clock turns that into its own
//! scaled time. Slowing down, speeding up or pausing one clock has no effect on
//! the others.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
struct ClockState {
    elapsed: Duration,
    delta: Duration,
    frame: u64,
    scale: f64,
    paused: bool,
}

impl Default for ClockState {
    fn default() -> Self {
        Self {
            elapsed: Duration::ZERO,
            delta: Duration::ZERO,
            frame: 0,
            scale: 1.0,
            paused: false,
        }
    }
}

/// A point-in-time copy of a clock's state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClockSnapshot {
    /// Total scaled time accumulated since construction.
    pub elapsed: Duration,
    /// Scaled time applied by the most recent advance.
    pub delta: Duration,
    /// Number of advances applied while running.
    pub frame: u64,
    /// Current scale factor.
    pub scale: f64,
    /// Whether the clock is paused.
    pub paused: bool,
}

/// An independent, manually driven logical clock.
///
/// The clock is shared behind an [`Arc`] by every subsystem that reads it, so
/// all mutation goes through `&self`.
pub struct Clock {
    name: &'static str,
    state: Mutex<ClockState>,
}

impl Clock {
    /// Creates a clock at time zero with a scale of `1.0`.
    ///
    /// The clock is not started by anyone: it only moves when
    /// [`advance`](Self::advance) is called.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            state: Mutex::new(ClockState::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ClockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the name this clock was registered under.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Feeds `real_delta` of wall time into the clock.
    ///
    /// Returns the scaled delta that was applied, which is zero while the
    /// clock is paused.
    pub fn advance(&self, real_delta: Duration) -> Duration {
        let mut state = self.lock();
        if state.paused {
            state.delta = Duration::ZERO;
            return Duration::ZERO;
        }

        // Saturates instead of overflowing for very large scales.
        let scaled = Duration::try_from_secs_f64(real_delta.as_secs_f64() * state.scale)
            .unwrap_or(Duration::MAX);
        state.elapsed = state.elapsed.saturating_add(scaled);
        state.delta = scaled;
        state.frame += 1;
        scaled
    }

    /// Sets the scale factor applied to every future advance.
    ///
    /// Negative or non-finite values are rejected and leave the scale
    /// unchanged.
    pub fn set_scale(&self, scale: f64) {
        if !scale.is_finite() || scale < 0.0 {
            log::warn!(
                "Ignoring invalid scale {scale} for clock '{}'.",
                self.name
            );
            return;
        }
        self.lock().scale = scale;
    }

    /// Returns the current scale factor.
    pub fn scale(&self) -> f64 {
        self.lock().scale
    }

    /// Stops the clock; advances are ignored until [`resume`](Self::resume).
    pub fn pause(&self) {
        self.lock().paused = true;
    }

    /// Resumes a paused clock.
    pub fn resume(&self) {
        self.lock().paused = false;
    }

    /// Returns `true` while the clock is paused.
    pub fn is_paused(&self) -> bool {
        self.lock().paused
    }

    /// Total scaled time accumulated so far.
    pub fn elapsed(&self) -> Duration {
        self.lock().elapsed
    }

    /// Scaled time applied by the last advance.
    pub fn delta(&self) -> Duration {
        self.lock().delta
    }

    /// Number of advances applied while running.
    pub fn current_frame(&self) -> u64 {
        self.lock().frame
    }

    /// Returns a copy of the whole clock state.
    pub fn snapshot(&self) -> ClockSnapshot {
        let state = *self.lock();
        ClockSnapshot {
            elapsed: state.elapsed,
            delta: state.delta,
            frame: state.frame,
            scale: state.scale,
            paused: state.paused,
        }
    }
}

impl fmt::Debug for Clock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Clock")
            .field("name", &self.name)
            .field("state", &self.snapshot())
            .finish()
    }
}

/// The six clocks created by the bootstrap.
///
/// The first five drive engine-internal work categories; `master` is the
/// content clock that scenes, animations and tweens run on.
#[derive(Debug, Clone)]
pub struct ClockHierarchy {
    /// Engine-internal system clock (cache checks, text caret, etc.).
    pub system: Arc<Clock>,
    /// Component `start` callbacks.
    pub start: Arc<Clock>,
    /// Physics stepping.
    pub physics: Arc<Clock>,
    /// Component `update` callbacks.
    pub update: Arc<Clock>,
    /// Component `late_update` callbacks.
    pub late_update: Arc<Clock>,
    /// Master content clock.
    pub master: Arc<Clock>,
}

impl ClockHierarchy {
    /// Creates the six clocks, all at time zero.
    pub fn new() -> Self {
        Self {
            system: Arc::new(Clock::new("system")),
            start: Arc::new(Clock::new("start")),
            physics: Arc::new(Clock::new("physics")),
            update: Arc::new(Clock::new("update")),
            late_update: Arc::new(Clock::new("late_update")),
            master: Arc::new(Clock::new("master")),
        }
    }

    /// Returns the clocks in the order the frame loop advances them.
    pub fn in_frame_order(&self) -> [&Arc<Clock>; 6] {
        [
            &self.system,
            &self.start,
            &self.physics,
            &self.update,
            &self.late_update,
            &self.master,
        ]
    }

    /// Advances every clock by the same wall-clock delta, in frame order.
    pub fn advance_all(&self, real_delta: Duration) {
        for clock in self.in_frame_order() {
            clock.advance(real_delta);
        }
    }
}

impl Default for ClockHierarchy {
    fn default() -> Self {
        Self::new()
    }
}
