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

//! # Sylva Core
//!
//! Foundational crate containing the traits, core types, and interface
//! contracts that the engine bootstrap wires together: logical clocks, the
//! host environment abstraction, the subsystem construction contracts, plugins
//! and the script escape hatch.

#![warn(missing_docs)]

pub mod clock;
pub mod compat;
pub mod error;
pub mod platform;
pub mod plugin;
pub mod script;
pub mod subsystem;

pub use clock::{Clock, ClockHierarchy};
pub use error::SubsystemError;
pub use platform::{HostEnvironment, Location};
pub use plugin::{Enable, Plugin};
