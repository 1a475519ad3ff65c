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
use std::time::Duration;

/// The background cache-maintenance check started during bootstrap.
pub trait CacheMaintenance: Debug + Send {
    /// Time between two sweeps, measured on the clock the check runs on.
    fn interval(&self) -> Duration;

    /// Runs the sweep if the interval has elapsed. Returns the number of
    /// sweeps run (zero when it was not yet due).
    fn check(&mut self) -> usize;
}
