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

//! The ordered construction of every engine subsystem.
//!
//! Several subsystems need others to exist first: the render backend needs
//! the stage, sprite rendering and the input managers need the scene
//! bindings, the mouse needs the drawable surface. The order below satisfies
//! all of them and is covered by a recording-factory test.

use std::sync::Arc;

use sylva_core::compat;
use sylva_core::platform::{resolve_root_path, HostEnvironment};
use sylva_core::plugin::Plugin;
use sylva_core::subsystem::{publish_stage, Origin, SceneBindings, SubsystemFactory};
use sylva_core::{ClockHierarchy, SubsystemError};

use crate::context::EngineContext;
use crate::error::{BootStep, InitError};

fn step<T>(
    step: BootStep,
    run: impl FnOnce() -> Result<T, SubsystemError>,
) -> Result<T, InitError> {
    log::debug!("Bootstrap step {step}");
    run().map_err(|source| InitError::StepFailed { step, source })
}

fn enable_plugins(plugins: &mut [Box<dyn Plugin>]) -> Result<(), InitError> {
    for plugin in plugins.iter_mut() {
        let name = plugin.name().to_string();
        match plugin.enable_capability() {
            Some(capability) => {
                log::debug!("Enabling plugin '{name}'.");
                capability
                    .enable()
                    .map_err(|source| InitError::Plugin { name, source })?;
            }
            None => log::debug!("Plugin '{name}' has nothing to enable, skipping."),
        }
    }
    Ok(())
}

/// Runs the seventeen bootstrap steps and returns the finished context.
pub(crate) fn run(
    host: &dyn HostEnvironment,
    factory: &mut dyn SubsystemFactory,
    width: u32,
    height: u32,
    plugins: &mut [Box<dyn Plugin>],
) -> Result<EngineContext, InitError> {
    // 1. Patch the buffer-slice primitive.
    step(BootStep::BufferSliceShim, || {
        if !host.capabilities().buffer_slice {
            log::debug!("Host lacks buffer slicing, installing the shim.");
            host.install_buffer_slice_shim(compat::slice_buffer);
        }
        Ok(())
    })?;

    // 2. Host services.
    step(BootStep::HostInit, || host.init())?;

    // 3. Six manually driven clocks.
    let clocks = step(BootStep::Clocks, || Ok(ClockHierarchy::new()))?;

    // 4. Resource loader.
    let loader = step(BootStep::Loader, || factory.create_loader())?;

    // 5. Render mode, before any surface exists.
    step(BootStep::AcceleratedRendering, || {
        factory.enable_accelerated_rendering()
    })?;

    // 6. Plugins, in the order given.
    log::debug!("Bootstrap step {}", BootStep::Plugins);
    enable_plugins(plugins)?;

    // 7. Native run driver.
    step(BootStep::NativeDriver, || {
        if host.is_native_app() {
            factory.enable_native_driver()?;
        }
        Ok(())
    })?;

    // 8. Cache maintenance on the system clock.
    let cache = step(BootStep::CacheCheck, || {
        factory.begin_cache_check(&clocks.system)
    })?;

    // 9. Display root, canonical and current.
    let stage = step(BootStep::Stage, || factory.create_stage())?;
    let current_stage = Arc::clone(&stage);

    // 10. Root path.
    let root_path = step(BootStep::RootPath, || {
        let root = resolve_root_path(&host.location());
        loader.set_base_path(&root);
        Ok(root)
    })?;

    // 11. Render backend at the top-left corner.
    let mut renderer = step(BootStep::Renderer, || factory.create_renderer(Origin::ZERO))?;

    // 12. Design size.
    step(BootStep::StageSize, || {
        stage.set_size(width, height);
        Ok(())
    })?;

    // 13. Global namespace.
    step(BootStep::PublishStage, || {
        publish_stage(host, &stage);
        Ok(())
    })?;

    // 14. Scene bindings.
    let scene = SceneBindings {
        master_clock: Arc::clone(&clocks.master),
        system_clock: Arc::clone(&clocks.system),
        stage: Arc::clone(&stage),
    };
    step(BootStep::SceneBindings, || factory.bind_scene(&scene))?;

    // 15. Sprite rendering and input.
    let (keyboard, mouse, text_input) = step(BootStep::InputSetup, || {
        renderer.init_sprite_rendering(&scene)?;
        let keyboard = factory.create_keyboard(&scene)?;
        let mouse = factory.create_mouse(&scene, renderer.surface())?;
        let text_input = factory.create_text_input(&scene)?;
        Ok((keyboard, mouse, text_input))
    })?;

    // 16. Sound defaults.
    let sound = step(BootStep::SoundDefaults, || {
        let mut sound = factory.create_sound_manager()?;
        sound.set_auto_stop_music(true);
        Ok(sound)
    })?;

    // 17. The drawable surface.
    let surface = step(BootStep::Surface, || Ok(renderer.surface()))?;

    Ok(EngineContext {
        clocks,
        loader,
        cache,
        stage,
        current_stage,
        root_path,
        renderer,
        scene,
        keyboard,
        mouse,
        text_input,
        sound,
        surface,
    })
}
