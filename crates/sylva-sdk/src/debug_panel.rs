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

//! Deferred loading of the debug panel.
//!
//! If the panel is already registered in the global namespace it is enabled
//! on the spot. Otherwise its script is fetched on a tokio task; the result
//! comes back through a channel and is applied on the thread that owns the
//! loader, by [`DebugPanelLoader::poll`] or [`DebugPanelLoader::settle`].

use std::sync::Arc;

use sylva_core::platform::HostEnvironment;
use sylva_core::script::{lookup_debug_panel, FetchError, ScriptFetcher, ScriptRunner};
use tokio::runtime::{Handle, Runtime};
use tokio::task::JoinHandle;

/// Where the loader stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DebugPanelState {
    /// Nothing was requested yet.
    #[default]
    NotLoaded,
    /// A fetch is in flight.
    Loading,
    /// The panel is registered and was enabled.
    Loaded,
    /// The last load failed; nothing was enabled.
    Failed,
    /// The last load was cancelled.
    Cancelled,
}

struct Completion {
    generation: u64,
    result: Result<String, FetchError>,
}

/// Loads and enables the debug panel.
pub struct DebugPanelLoader {
    state: DebugPanelState,
    generation: u64,
    pending_activations: usize,
    fetches: usize,
    sender: flume::Sender<Completion>,
    receiver: flume::Receiver<Completion>,
    task: Option<JoinHandle<()>>,
    runtime: Option<Runtime>,
}

impl Default for DebugPanelLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DebugPanelLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DebugPanelLoader")
            .field("state", &self.state)
            .field("generation", &self.generation)
            .field("pending_activations", &self.pending_activations)
            .field("fetches", &self.fetches)
            .finish_non_exhaustive()
    }
}

impl DebugPanelLoader {
    /// Creates an idle loader.
    pub fn new() -> Self {
        let (sender, receiver) = flume::unbounded();
        Self {
            state: DebugPanelState::NotLoaded,
            generation: 0,
            pending_activations: 0,
            fetches: 0,
            sender,
            receiver,
            task: None,
            runtime: None,
        }
    }

    /// The current state.
    pub fn state(&self) -> DebugPanelState {
        self.state
    }

    /// Number of fetches started so far.
    pub fn fetch_count(&self) -> usize {
        self.fetches
    }

    /// Enables the panel, loading it from `path` first if needed.
    ///
    /// Never fails: a load that cannot start or complete is logged and
    /// leaves the loader [`Failed`](DebugPanelState::Failed). Calls made
    /// while a load is in flight share it, and each one enables the panel
    /// once it arrives.
    pub fn request(
        &mut self,
        host: &dyn HostEnvironment,
        fetcher: &Arc<dyn ScriptFetcher>,
        path: String,
    ) {
        if let Some(panel) = lookup_debug_panel(host) {
            panel.enable();
            self.state = DebugPanelState::Loaded;
            return;
        }

        if self.state == DebugPanelState::Loading {
            self.pending_activations += 1;
            log::debug!(
                "Debug panel already loading; {} activation(s) pending.",
                self.pending_activations
            );
            return;
        }

        let handle = match self.spawn_handle() {
            Ok(handle) => handle,
            Err(err) => {
                log::warn!("Cannot load the debug panel: no async runtime ({err}).");
                self.state = DebugPanelState::Failed;
                return;
            }
        };

        self.generation += 1;
        self.pending_activations = 1;
        self.fetches += 1;
        self.state = DebugPanelState::Loading;
        log::info!("Loading debug panel from '{path}'.");

        let generation = self.generation;
        let sender = self.sender.clone();
        let fetcher = Arc::clone(fetcher);
        self.task = Some(handle.spawn(async move {
            let result = fetcher.fetch(&path).await;
            // The loader may be gone already; nobody is left to tell.
            let _ = sender.send_async(Completion { generation, result }).await;
        }));
    }

    /// Applies completed loads. Returns the resulting state.
    pub fn poll(
        &mut self,
        host: &dyn HostEnvironment,
        scripts: &dyn ScriptRunner,
    ) -> DebugPanelState {
        while let Ok(completion) = self.receiver.try_recv() {
            self.apply(completion, host, scripts);
        }
        let finished = self.task.as_ref().is_some_and(JoinHandle::is_finished);
        if self.state == DebugPanelState::Loading && finished {
            // The task may have sent right before finishing.
            match self.receiver.try_recv() {
                Ok(completion) => self.apply(completion, host, scripts),
                Err(_) => self.abandon(),
            }
        }
        self.state
    }

    /// Waits until the in-flight load, if any, completes and applies it.
    pub async fn settle(
        &mut self,
        host: &dyn HostEnvironment,
        scripts: &dyn ScriptRunner,
    ) -> DebugPanelState {
        while self.state == DebugPanelState::Loading {
            let mut finished = false;
            let received = {
                let receiver = &self.receiver;
                match self.task.as_mut() {
                    Some(task) => tokio::select! {
                        biased;
                        received = receiver.recv_async() => received.ok(),
                        _ = task => {
                            finished = true;
                            receiver.try_recv().ok()
                        }
                    },
                    None => receiver.try_recv().ok(),
                }
            };
            if finished {
                self.task = None;
            }
            match received {
                Some(completion) => self.apply(completion, host, scripts),
                None => self.abandon(),
            }
        }
        self.state
    }

    /// Aborts the in-flight load. Its completion, if it still arrives, is
    /// ignored.
    pub fn cancel(&mut self) {
        if self.state != DebugPanelState::Loading {
            return;
        }
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.pending_activations = 0;
        self.state = DebugPanelState::Cancelled;
        log::info!("Debug panel load cancelled.");
    }

    /// Fails a load whose task ended without reporting back.
    fn abandon(&mut self) {
        log::warn!("Debug panel load ended without a result.");
        self.task = None;
        self.pending_activations = 0;
        self.state = DebugPanelState::Failed;
    }

    fn spawn_handle(&mut self) -> std::io::Result<Handle> {
        if let Ok(handle) = Handle::try_current() {
            return Ok(handle);
        }
        if self.runtime.is_none() {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .worker_threads(1)
                .thread_name("sylva-debug-panel")
                .enable_all()
                .build()?;
            self.runtime = Some(runtime);
        }
        match &self.runtime {
            Some(runtime) => Ok(runtime.handle().clone()),
            None => Err(std::io::Error::other("runtime unavailable")),
        }
    }

    fn apply(
        &mut self,
        completion: Completion,
        host: &dyn HostEnvironment,
        scripts: &dyn ScriptRunner,
    ) {
        if completion.generation != self.generation || self.state != DebugPanelState::Loading {
            log::debug!(
                "Ignoring stale debug panel load (generation {}).",
                completion.generation
            );
            return;
        }
        self.task = None;
        let activations = std::mem::take(&mut self.pending_activations);

        let source = match completion.result {
            Ok(source) => source,
            Err(err) => {
                log::warn!("Failed to fetch the debug panel: {err}");
                self.state = DebugPanelState::Failed;
                return;
            }
        };

        if let Err(err) = scripts.run_script(&source, host) {
            log::warn!("Failed to run the debug panel script: {err}");
            self.state = DebugPanelState::Failed;
            return;
        }

        match lookup_debug_panel(host) {
            Some(panel) => {
                for _ in 0..activations {
                    panel.enable();
                }
                self.state = DebugPanelState::Loaded;
            }
            None => {
                log::warn!("The debug panel script ran but registered no panel.");
                self.state = DebugPanelState::Failed;
            }
        }
    }
}

impl Drop for DebugPanelLoader {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        if let Some(runtime) = self.runtime.take() {
            // Dropping a runtime from inside another runtime would panic.
            runtime.shutdown_background();
        }
    }
}
