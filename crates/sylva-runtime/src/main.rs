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

//! Boots the engine on the current process and runs a fixed number of frames.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use sylva_infra::io::FsScriptFetcher;
use sylva_infra::scripting::BundleScriptRunner;
use sylva_infra::ProcessHost;
use sylva_sdk::{init_logging, DebugPanelConfig, Engine, EngineConfig, VERSION};

#[derive(Parser, Debug)]
#[command(name = "sylva-runtime", version)]
#[command(about = "Boot the Sylva engine headless and run a few frames", long_about = None)]
struct Args {
    /// JSON engine config. Defaults apply for every missing field.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Design width of the stage.
    #[arg(long)]
    width: Option<u32>,

    /// Design height of the stage.
    #[arg(long)]
    height: Option<u32>,

    /// Number of frames to run.
    #[arg(short, long, default_value_t = 60)]
    frames: u64,

    /// Load and enable the debug panel.
    #[arg(long)]
    debug_panel: bool,

    /// Show an alert for uncaught faults.
    #[arg(long)]
    alert_global_error: bool,

    /// Log filter used when RUST_LOG is unset.
    #[arg(long)]
    log: Option<String>,
}

impl Args {
    fn apply(&self, config: &mut EngineConfig) {
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if self.debug_panel && config.debug_panel.is_none() {
            config.debug_panel = Some(DebugPanelConfig::default());
        }
        if self.alert_global_error {
            config.alert_global_error = true;
        }
        if let Some(filter) = &self.log {
            config.log_filter = filter.clone();
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => EngineConfig::from_path(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => EngineConfig::default(),
    };
    args.apply(&mut config);
    init_logging(&config.log_filter);

    log::info!("Sylva runtime {VERSION}");

    let host = match &config.location {
        Some(location) => ProcessHost::with_location(location.clone()),
        None => ProcessHost::new().context("creating the process host")?,
    };
    let mut engine = Engine::builder(host)
        .config(&config)
        .script_runner(BundleScriptRunner::with_builtin_bundles())
        .script_fetcher(FsScriptFetcher::new())
        .build();

    engine
        .init(config.width, config.height, &mut [])
        .context("engine bootstrap failed")?;

    if let Some(panel) = config.debug_panel.as_ref().filter(|panel| panel.enabled) {
        engine.enable_debug_panel(panel.path.as_deref());
        let state = engine.settle_debug_panel().await;
        log::info!("Debug panel: {state:?}");
    }

    let frame_time = config.frame_time();
    let mut last = None;
    for _ in 0..args.frames {
        last = engine.tick(frame_time).context("frame failed")?;
    }

    if let Some(context) = engine.context() {
        log::info!("--- Run Summary ---");
        log::info!("  Root path: {}", context.root_path());
        if let Some(stats) = last {
            log::info!(
                "  Frames: {} at {}x{}",
                stats.frame_number,
                stats.width,
                stats.height
            );
        }
        log::info!("  Master clock: {:?}", context.master_clock().elapsed());
        log::info!("  Renderer: {:?}", context.renderer().mode());
        log::info!("-------------------");
    }
    Ok(())
}
