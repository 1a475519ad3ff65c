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

//! # Sylva Infra
//!
//! Concrete implementations of the contracts defined in `sylva-core`: the
//! headless and process hosts, and the default display, loader, renderer,
//! input, sound and cache subsystems produced by [`DefaultSubsystems`].

pub mod audio;
pub mod cache;
pub mod display;
pub mod factory;
pub mod graphics;
pub mod input;
pub mod io;
pub mod platform;
#[cfg(feature = "scripting")]
pub mod scripting;

mod sync;

pub use factory::{DefaultSubsystems, FrameDriver};
pub use platform::{HeadlessHost, ProcessHost};
