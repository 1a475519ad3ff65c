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

//! Periodic cache maintenance.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use sylva_core::subsystem::CacheMaintenance;
use sylva_core::Clock;

/// Time between two cache sweeps.
pub const DEFAULT_CACHE_CHECK_INTERVAL: Duration = Duration::from_secs(15);

/// A named cleanup routine run on every sweep.
pub type CacheSweeper = Box<dyn FnMut() + Send>;

/// Runs registered sweepers every `interval` of clock time.
pub struct CacheManager {
    clock: Arc<Clock>,
    interval: Duration,
    last_sweep: Duration,
    sweepers: Vec<(String, CacheSweeper)>,
    sweeps: usize,
}

impl CacheManager {
    /// Creates a cache check timed on `clock`. The first sweep is due one
    /// `interval` after creation.
    pub fn new(clock: Arc<Clock>, interval: Duration) -> Self {
        let last_sweep = clock.elapsed();
        Self {
            clock,
            interval,
            last_sweep,
            sweepers: Vec::new(),
            sweeps: 0,
        }
    }

    /// Adds a routine to run on every sweep.
    pub fn register(&mut self, name: impl Into<String>, sweeper: CacheSweeper) {
        self.sweepers.push((name.into(), sweeper));
    }

    /// Total sweeps run so far.
    pub fn sweep_count(&self) -> usize {
        self.sweeps
    }

    fn sweep(&mut self) {
        for (name, sweeper) in &mut self.sweepers {
            log::trace!("Running cache sweeper '{name}'.");
            sweeper();
        }
        self.sweeps += 1;
    }
}

impl fmt::Debug for CacheManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.sweepers.iter().map(|(n, _)| n.as_str()).collect();
        f.debug_struct("CacheManager")
            .field("clock", &self.clock.name())
            .field("interval", &self.interval)
            .field("sweepers", &names)
            .field("sweeps", &self.sweeps)
            .finish()
    }
}

impl CacheMaintenance for CacheManager {
    fn interval(&self) -> Duration {
        self.interval
    }

    fn check(&mut self) -> usize {
        if self.interval.is_zero() {
            return 0;
        }
        let now = self.clock.elapsed();
        let mut ran = 0;
        while now.saturating_sub(self.last_sweep) >= self.interval {
            self.last_sweep += self.interval;
            self.sweep();
            ran += 1;
        }
        if ran > 0 {
            log::debug!("Cache check ran {ran} sweep(s).");
        }
        ran
    }
}
