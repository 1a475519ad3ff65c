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

//! Errors raised by the bootstrap.

use std::fmt;

use sylva_core::SubsystemError;
use thiserror::Error;

/// The steps of [`Engine::init`](crate::Engine::init), in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BootStep {
    /// Install the buffer-slice shim when the host lacks the primitive.
    BufferSliceShim,
    /// Initialize the host environment.
    HostInit,
    /// Construct the six clocks.
    Clocks,
    /// Construct the resource loader.
    Loader,
    /// Switch to the accelerated render mode.
    AcceleratedRendering,
    /// Enable plugins that expose the capability.
    Plugins,
    /// Hand frame pacing to a native-app host.
    NativeDriver,
    /// Start the background cache check.
    CacheCheck,
    /// Construct the display root.
    Stage,
    /// Resolve and publish the root resource path.
    RootPath,
    /// Construct the render backend.
    Renderer,
    /// Apply the design size to the display root.
    StageSize,
    /// Publish the display root in the global namespace.
    PublishStage,
    /// Propagate the scene bindings.
    SceneBindings,
    /// Set up sprite rendering and the input managers.
    InputSetup,
    /// Apply the sound defaults.
    SoundDefaults,
    /// Hand the drawable surface back to the caller.
    Surface,
}

impl BootStep {
    /// Every step, in execution order.
    pub const ALL: [BootStep; 17] = [
        BootStep::BufferSliceShim,
        BootStep::HostInit,
        BootStep::Clocks,
        BootStep::Loader,
        BootStep::AcceleratedRendering,
        BootStep::Plugins,
        BootStep::NativeDriver,
        BootStep::CacheCheck,
        BootStep::Stage,
        BootStep::RootPath,
        BootStep::Renderer,
        BootStep::StageSize,
        BootStep::PublishStage,
        BootStep::SceneBindings,
        BootStep::InputSetup,
        BootStep::SoundDefaults,
        BootStep::Surface,
    ];

    /// 1-based position of the step.
    pub fn number(self) -> usize {
        self as usize + 1
    }

    /// A short, stable name used in logs.
    pub fn name(self) -> &'static str {
        match self {
            BootStep::BufferSliceShim => "buffer_slice_shim",
            BootStep::HostInit => "host_init",
            BootStep::Clocks => "clocks",
            BootStep::Loader => "loader",
            BootStep::AcceleratedRendering => "accelerated_rendering",
            BootStep::Plugins => "plugins",
            BootStep::NativeDriver => "native_driver",
            BootStep::CacheCheck => "cache_check",
            BootStep::Stage => "stage",
            BootStep::RootPath => "root_path",
            BootStep::Renderer => "renderer",
            BootStep::StageSize => "stage_size",
            BootStep::PublishStage => "publish_stage",
            BootStep::SceneBindings => "scene_bindings",
            BootStep::InputSetup => "input_setup",
            BootStep::SoundDefaults => "sound_defaults",
            BootStep::Surface => "surface",
        }
    }
}

impl fmt::Display for BootStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}/{})", self.name(), self.number(), Self::ALL.len())
    }
}

/// Errors that abort [`Engine::init`](crate::Engine::init).
///
/// A failed `init` is final: the subsystems built so far are dropped, the
/// engine never becomes ready and later `init` calls are no-ops, so no step
/// or plugin runs twice.
#[derive(Debug, Error)]
pub enum InitError {
    /// A subsystem failed during a bootstrap step.
    #[error("bootstrap step {step} failed")]
    StepFailed {
        /// The step that failed.
        step: BootStep,
        /// The subsystem error.
        #[source]
        source: SubsystemError,
    },

    /// A plugin failed to enable.
    #[error("plugin '{name}' failed to enable")]
    Plugin {
        /// The plugin name.
        name: String,
        /// The error the plugin returned.
        #[source]
        source: anyhow::Error,
    },
}

impl InitError {
    /// The step that was running when the error occurred.
    pub fn step(&self) -> BootStep {
        match self {
            InitError::StepFailed { step, .. } => *step,
            InitError::Plugin { .. } => BootStep::Plugins,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_are_numbered_in_order() {
        for (idx, step) in BootStep::ALL.iter().enumerate() {
            assert_eq!(step.number(), idx + 1);
        }
        assert_eq!(BootStep::Surface.to_string(), "surface (17/17)");
    }

    #[test]
    fn plugin_errors_point_at_the_plugin_step() {
        let err = InitError::Plugin {
            name: "physics".into(),
            source: anyhow::anyhow!("boom"),
        };
        assert_eq!(err.step(), BootStep::Plugins);
        assert_eq!(err.to_string(), "plugin 'physics' failed to enable");
    }
}
