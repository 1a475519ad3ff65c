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

use std::sync::RwLock;

use sylva_core::subsystem::ResourceLoader;

use crate::sync::{read, write};

/// The default resource loader.
///
/// Only tracks the base path for now; relative URLs resolve against it
/// through [`ResourceLoader::resolve`].
#[derive(Debug, Default)]
pub struct LoaderManager {
    base_path: RwLock<String>,
}

impl LoaderManager {
    /// Creates a loader with an empty base path.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ResourceLoader for LoaderManager {
    fn set_base_path(&self, base: &str) {
        log::debug!("Loader base path set to '{base}'.");
        *write(&self.base_path) = base.to_string();
    }

    fn base_path(&self) -> String {
        read(&self.base_path).clone()
    }
}
