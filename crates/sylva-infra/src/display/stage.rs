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

use std::any::Any;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use sylva_core::subsystem::DisplayRoot;

use crate::sync::{read, write};

/// The root of the scene graph.
///
/// A fresh stage has a zero size until the bootstrap applies the design size.
#[derive(Debug, Default)]
pub struct Stage {
    size: RwLock<(u32, u32)>,
    resizes: AtomicUsize,
}

impl Stage {
    /// Creates an empty, zero-sized stage.
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times the size was set.
    pub fn resize_count(&self) -> usize {
        self.resizes.load(Ordering::SeqCst)
    }
}

impl DisplayRoot for Stage {
    fn set_size(&self, width: u32, height: u32) {
        *write(&self.size) = (width, height);
        self.resizes.fetch_add(1, Ordering::SeqCst);
        log::debug!("Stage resized to {width}x{height}.");
    }

    fn size(&self) -> (u32, u32) {
        *read(&self.size)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
