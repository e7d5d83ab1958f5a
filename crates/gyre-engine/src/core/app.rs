use anyhow::Result;
use winit::event::WindowEvent;
use winit::window::WindowId;

use super::ctx::{FrameCtx, SurfaceCtx};

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by the demos.
pub trait App {
    /// Called once the drawing context exists, before the first frame.
    ///
    /// An error aborts the runtime after being logged; no frame is drawn.
    fn on_start(&mut self, ctx: &mut SurfaceCtx<'_>) -> Result<()>;

    /// Called after the surface was resized and reconfigured.
    fn on_resize(&mut self, ctx: &mut SurfaceCtx<'_>) {
        let _ = ctx;
    }

    /// Called for window events.
    fn on_window_event(&mut self, window_id: WindowId, event: &WindowEvent) -> AppControl {
        let _ = (window_id, event);
        AppControl::Continue
    }

    /// Called once per animation frame.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl;
}
