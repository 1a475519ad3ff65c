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

//! Host platform abstractions: environment, location, globals and faults.

pub mod fault;
pub mod globals;
pub mod host;
pub mod location;

pub use fault::{AlertSink, FaultDisposition, FaultHandler, HostFault};
pub use globals::{GlobalNamespace, GlobalValue, DEBUG_PANEL_KEY, STAGE_KEY};
pub use host::{HostCapabilities, HostEnvironment};
pub use location::{directory_of, join_path, resolve_root_path, Location, FILE_PROTOCOL};
