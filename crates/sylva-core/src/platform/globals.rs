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

//! The host's global namespace.
//!
//! [`GlobalNamespace`] is a name-keyed map of shared, type-erased values. The
//! engine publishes a few well-known entries into it (the stage, the debug
//! panel) so that external tooling can reach them without going through the
//! engine context.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

/// Key under which the bootstrap publishes the display root.
pub const STAGE_KEY: &str = "stage";

/// Key under which a loaded debug tool registers its panel.
pub const DEBUG_PANEL_KEY: &str = "DebugPanel";

/// A value stored in the global namespace.
pub type GlobalValue = Arc<dyn Any + Send + Sync>;

/// A string-keyed map of shared values.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use sylva_core::platform::GlobalNamespace;
///
/// let mut globals = GlobalNamespace::new();
/// globals.insert("answer", Arc::new(42u32));
///
/// let answer = globals.get_as::<u32>("answer").unwrap();
/// assert_eq!(*answer, 42);
/// ```
#[derive(Default)]
pub struct GlobalNamespace {
    entries: HashMap<String, GlobalValue>,
}

impl GlobalNamespace {
    /// Creates an empty namespace.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Stores `value` under `key`, returning the value it replaced.
    pub fn insert(&mut self, key: impl Into<String>, value: GlobalValue) -> Option<GlobalValue> {
        self.entries.insert(key.into(), value)
    }

    /// Returns a shared handle to the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<GlobalValue> {
        self.entries.get(key).cloned()
    }

    /// Returns the value under `key` if it has the concrete type `T`.
    #[must_use]
    pub fn get_as<T: Any + Send + Sync>(&self, key: &str) -> Option<Arc<T>> {
        self.get(key).and_then(|value| value.downcast::<T>().ok())
    }

    /// Removes and returns the value stored under `key`.
    pub fn remove(&mut self, key: &str) -> Option<GlobalValue> {
        self.entries.remove(key)
    }

    /// Returns `true` if something is stored under `key`.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the namespace is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for GlobalNamespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<_> = self.entries.keys().collect();
        keys.sort();
        f.debug_struct("GlobalNamespace").field("keys", &keys).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeStage {
        width: u32,
    }

    #[test]
    fn test_insert_and_get_as() {
        let mut globals = GlobalNamespace::new();
        globals.insert(STAGE_KEY, Arc::new(FakeStage { width: 640 }));

        let stage = globals.get_as::<FakeStage>(STAGE_KEY).unwrap();
        assert_eq!(stage.width, 640);
    }

    #[test]
    fn test_get_as_wrong_type_returns_none() {
        let mut globals = GlobalNamespace::new();
        globals.insert(STAGE_KEY, Arc::new(FakeStage { width: 1 }));

        assert!(globals.get(STAGE_KEY).is_some());
        assert!(globals.get_as::<u32>(STAGE_KEY).is_none());
    }

    #[test]
    fn test_replace_returns_previous() {
        let mut globals = GlobalNamespace::new();
        assert!(globals.insert("k", Arc::new(1u8)).is_none());
        let previous = globals.insert("k", Arc::new(2u8)).unwrap();

        assert_eq!(*previous.downcast::<u8>().unwrap(), 1);
        assert_eq!(*globals.get_as::<u8>("k").unwrap(), 2);
        assert_eq!(globals.len(), 1);
    }

    #[test]
    fn test_remove() {
        let mut globals = GlobalNamespace::default();
        globals.insert(DEBUG_PANEL_KEY, Arc::new(()));
        assert!(globals.contains(DEBUG_PANEL_KEY));

        globals.remove(DEBUG_PANEL_KEY);
        assert!(globals.is_empty());
    }
}
