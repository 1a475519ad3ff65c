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

use crate::platform::join_path;

/// The asset-loading subsystem.
///
/// Only the parts the bootstrap needs are part of the contract: the loader is
/// constructed early and learns its base path once the root path is known.
pub trait ResourceLoader: Debug + Send + Sync {
    /// Publishes the root resource path every relative URL resolves against.
    fn set_base_path(&self, base: &str);

    /// The current base path; empty until the bootstrap publishes it.
    fn base_path(&self) -> String;

    /// Resolves `url` against the base path.
    fn resolve(&self, url: &str) -> String {
        join_path(&self.base_path(), url)
    }
}
