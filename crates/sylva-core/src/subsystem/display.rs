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
use std::fmt::Debug;
use std::sync::Arc;

use crate::platform::{HostEnvironment, STAGE_KEY};

/// The root node of the scene graph.
///
/// Shared by the engine context, the input managers and the render backend,
/// so resizing goes through `&self`.
pub trait DisplayRoot: Debug + Send + Sync + 'static {
    /// Sets the logical (design) size of the stage.
    fn set_size(&self, width: u32, height: u32);

    /// Returns the logical size of the stage.
    fn size(&self) -> (u32, u32);

    /// Allows downcasting to the concrete stage type.
    fn as_any(&self) -> &dyn Any;
}

/// Publishes `stage` in the host global namespace under [`STAGE_KEY`].
pub fn publish_stage(host: &dyn HostEnvironment, stage: &Arc<dyn DisplayRoot>) {
    host.publish_global(STAGE_KEY, Arc::new(Arc::clone(stage)));
}

/// Returns the stage published in the host global namespace, if any.
pub fn lookup_stage(host: &dyn HostEnvironment) -> Option<Arc<dyn DisplayRoot>> {
    host.global(STAGE_KEY)?
        .downcast::<Arc<dyn DisplayRoot>>()
        .ok()
        .map(|stage| Arc::clone(&*stage))
}
