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

//! Uncaught faults reported by the host.

use std::fmt;

/// An uncaught runtime fault, as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostFault {
    /// The fault message.
    pub message: String,
    /// Where the fault was raised (`file:line:column`), if known.
    pub origin: Option<String>,
    /// Stack trace, if the host could capture one.
    pub stack: Option<String>,
}

impl HostFault {
    /// Creates a fault with a message only.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            origin: None,
            stack: None,
        }
    }

    /// Attaches a stack trace.
    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    /// Attaches the location the fault was raised at.
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }
}

impl fmt::Display for HostFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.origin {
            Some(origin) => write!(f, "{} (at {origin})", self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Something that can show a blocking, user-facing alert.
pub trait AlertSink {
    /// Shows `message` to the user.
    fn alert(&self, message: &str);
}

/// A host-level handler for uncaught faults.
///
/// A host holds at most one handler at a time; installing a new one replaces
/// the previous one.
pub trait FaultHandler: Send + Sync {
    /// Called once per uncaught fault. `alerts` is the host's alert surface.
    fn on_fault(&self, fault: &HostFault, alerts: &dyn AlertSink);
}

/// What happened to a fault raised on a host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultDisposition {
    /// A fault handler was installed and received the fault.
    Intercepted,
    /// No handler was installed; the host's default handling applied.
    Unhandled,
}
