//! Spinning hexagon and spinning box demos.
//!
//! Both demos share one [`SpinDemo`] application driven by a [`SpinScene`];
//! the scenes differ only in data.

mod demo;
pub mod scenes;

use anyhow::Result;
use gyre_engine::device::GpuInit;
use gyre_engine::logging::{init_logging, LoggingConfig};
use gyre_engine::window::{Runtime, RuntimeConfig};

pub use demo::SpinDemo;
pub use scenes::SpinScene;

/// Canvas element the web build draws into.
pub const CANVAS_ID: &str = "main-canvas";

/// Initializes logging and runs `scene` until its window closes.
pub fn run(scene: SpinScene) -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = RuntimeConfig {
        title: scene.title.to_string(),
        canvas_id: CANVAS_ID.to_string(),
        ..RuntimeConfig::default()
    };

    let mut gpu_init = GpuInit::default();
    if let Some(format) = scene.depth_format {
        gpu_init = gpu_init.with_depth(format);
    }

    log::info!("starting {}", scene.title);
    Runtime::run(config, gpu_init, SpinDemo::new(scene))
}

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen::prelude::*;

    fn start(scene: super::SpinScene) {
        if let Err(e) = super::run(scene) {
            log::error!("{e:#}");
        }
    }

    #[wasm_bindgen]
    pub fn start_hexagon() {
        start(super::scenes::hexagon());
    }

    #[wasm_bindgen]
    pub fn start_spinning_box() {
        start(super::scenes::spinning_box());
    }
}
