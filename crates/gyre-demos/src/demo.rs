use anyhow::Result;
use gyre_engine::core::{App, AppControl, FrameCtx, SurfaceCtx};
use gyre_engine::render::{LinkedProgram, MeshRenderer};
use gyre_engine::transform::Transforms;

use crate::scenes::SpinScene;

/// Draws one scene mesh, rotating it by the scene's spin every frame.
pub struct SpinDemo {
    scene: SpinScene,
    renderer: Option<MeshRenderer>,
}

impl SpinDemo {
    pub fn new(scene: SpinScene) -> Self {
        Self {
            scene,
            renderer: None,
        }
    }

    pub fn scene(&self) -> &SpinScene {
        &self.scene
    }

    /// Whether GPU resources exist (setup succeeded).
    pub fn is_ready(&self) -> bool {
        self.renderer.is_some()
    }
}

impl App for SpinDemo {
    fn on_start(&mut self, ctx: &mut SurfaceCtx<'_>) -> Result<()> {
        let program = LinkedProgram::mesh()?;

        let rctx = ctx.render_ctx();
        let transforms = Transforms::new(&self.scene.camera, rctx.aspect());
        let renderer = MeshRenderer::new(
            &rctx,
            &program,
            &self.scene.mesh,
            &transforms,
            self.scene.pipeline,
        )?;

        log::info!(
            "{} ready: {}x{}",
            self.scene.title,
            rctx.size.width,
            rctx.size.height
        );

        self.renderer = Some(renderer);
        Ok(())
    }

    fn on_resize(&mut self, ctx: &mut SurfaceCtx<'_>) {
        let Some(renderer) = &self.renderer else { return };

        let rctx = ctx.render_ctx();
        let projection = self.scene.camera.projection(rctx.aspect());
        renderer.set_projection(rctx.queue, projection);
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl {
        let Some(renderer) = &self.renderer else {
            return AppControl::Continue;
        };

        let world = self.scene.spin.world_at(ctx.time.elapsed);
        renderer.set_world(ctx.gpu.queue(), world);

        ctx.render(self.scene.clear, |_, target| renderer.render(target))
    }
}
