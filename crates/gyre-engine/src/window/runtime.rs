use std::sync::Arc;

use anyhow::{Context, Result};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop, EventLoopProxy};
use winit::window::{Window, WindowId};

use crate::core::{App as CoreApp, AppControl, FrameCtx, SurfaceCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::time::FrameClock;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    /// Id of the page canvas to draw into (wasm32 only).
    pub canvas_id: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "gyre".to_string(),
            initial_size: LogicalSize::new(800.0, 600.0),
            canvas_id: "main-canvas".to_string(),
        }
    }
}

/// Events delivered to the loop from outside the windowing system.
enum RuntimeEvent {
    /// Asynchronous GPU acquisition finished (wasm32).
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    GpuReady(Result<Gpu>),
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the surface and drives `app` until the window closes.
    ///
    /// On wasm32 this returns immediately; the loop keeps running from the
    /// browser's animation-frame callbacks.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + CoreApp,
    {
        let event_loop = EventLoop::<RuntimeEvent>::with_user_event()
            .build()
            .context("failed to create winit EventLoop")?;
        let state = AppState::new(config, gpu_init, app, event_loop.create_proxy());

        #[cfg(not(target_arch = "wasm32"))]
        {
            let mut state = state;
            event_loop
                .run_app(&mut state)
                .context("winit event loop terminated with error")?;
        }

        #[cfg(target_arch = "wasm32")]
        {
            use winit::platform::web::EventLoopExtWebSys;
            event_loop.spawn_app(state);
        }

        Ok(())
    }
}

struct WindowEntry {
    window: Arc<Window>,
    gpu: Gpu,
    clock: FrameClock,
}

struct AppState<A>
where
    A: CoreApp + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    proxy: EventLoopProxy<RuntimeEvent>,

    /// Set once the window exists; `entry` follows when the GPU is ready.
    window: Option<Arc<Window>>,
    entry: Option<WindowEntry>,
    exit_requested: bool,
}

impl<A> AppState<A>
where
    A: CoreApp + 'static,
{
    fn new(
        config: RuntimeConfig,
        gpu_init: GpuInit,
        app: A,
        proxy: EventLoopProxy<RuntimeEvent>,
    ) -> Self {
        Self {
            config,
            gpu_init,
            app,
            proxy,
            window: None,
            entry: None,
            exit_requested: false,
        }
    }

    fn request_exit(&mut self, event_loop: &ActiveEventLoop) {
        self.exit_requested = true;
        event_loop.exit();
    }

    fn create_window(&self, event_loop: &ActiveEventLoop) -> Result<Arc<Window>> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        #[cfg(target_arch = "wasm32")]
        let attrs = {
            use winit::platform::web::WindowAttributesExtWebSys;
            attrs.with_canvas(Some(find_canvas(&self.config.canvas_id)?))
        };

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        Ok(Arc::new(window))
    }

    /// Starts GPU acquisition for `window`; completion arrives in `on_gpu_ready`.
    fn acquire_gpu(&mut self, event_loop: &ActiveEventLoop, window: Arc<Window>) {
        let gpu_init = self.gpu_init.clone();

        #[cfg(not(target_arch = "wasm32"))]
        {
            let result = pollster::block_on(Gpu::new(window, gpu_init));
            self.on_gpu_ready(event_loop, result);
        }

        #[cfg(target_arch = "wasm32")]
        {
            let _ = event_loop;
            let proxy = self.proxy.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = Gpu::new(window, gpu_init).await;
                if proxy.send_event(RuntimeEvent::GpuReady(result)).is_err() {
                    log::warn!("event loop closed before the GPU was ready");
                }
            });
        }
    }

    fn on_gpu_ready(&mut self, event_loop: &ActiveEventLoop, result: Result<Gpu>) {
        let Some(window) = self.window.clone() else {
            return;
        };

        let gpu = match result {
            Ok(gpu) => gpu,
            Err(e) => {
                log::error!("graphics context not supported: {e:#}");
                self.request_exit(event_loop);
                return;
            }
        };

        let info = gpu.adapter_info();
        log::info!("using {} ({:?})", info.name, info.backend);

        let mut ctx = SurfaceCtx {
            window: WindowCtx {
                id: window.id(),
                window: &window,
            },
            gpu: &gpu,
        };

        if let Err(e) = self.app.on_start(&mut ctx) {
            log::error!("setup failed: {e:#}");
            self.request_exit(event_loop);
            return;
        }

        window.request_redraw();
        self.entry = Some(WindowEntry {
            window,
            gpu,
            clock: FrameClock::new(),
        });
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(entry) = self.entry.as_mut() else {
            return;
        };

        let time = entry.clock.tick();

        let control = {
            let mut ctx = FrameCtx {
                window: WindowCtx {
                    id: entry.window.id(),
                    window: &entry.window,
                },
                gpu: &mut entry.gpu,
                time,
            };
            self.app.on_frame(&mut ctx)
        };

        if control == AppControl::Exit {
            self.request_exit(event_loop);
            return;
        }

        // Re-arm: the next frame is scheduled at the end of this one.
        entry.window.request_redraw();
    }

    fn resize(&mut self) {
        let Some(entry) = self.entry.as_mut() else {
            return;
        };

        let new_size = entry.window.inner_size();
        entry.gpu.resize(new_size);
        entry.clock.reset();

        let mut ctx = SurfaceCtx {
            window: WindowCtx {
                id: entry.window.id(),
                window: &entry.window,
            },
            gpu: &entry.gpu,
        };
        self.app.on_resize(&mut ctx);

        entry.window.request_redraw();
    }
}

impl<A> ApplicationHandler<RuntimeEvent> for AppState<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        let window = match self.create_window(event_loop) {
            Ok(w) => w,
            Err(e) => {
                log::error!("graphics context not supported: {e:#}");
                self.request_exit(event_loop);
                return;
            }
        };

        self.window = Some(window.clone());
        self.acquire_gpu(event_loop, window);
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, event: RuntimeEvent) {
        match event {
            RuntimeEvent::GpuReady(result) => self.on_gpu_ready(event_loop, result),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        if self.app.on_window_event(window_id, &event) == AppControl::Exit {
            self.request_exit(event_loop);
            return;
        }

        match event {
            WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                self.entry = None;
                self.window = None;
                self.request_exit(event_loop);
            }

            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => self.resize(),

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn find_canvas(id: &str) -> Result<web_sys::HtmlCanvasElement> {
    use wasm_bindgen::JsCast;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .context("no document available")?;

    document
        .get_element_by_id(id)
        .with_context(|| format!("canvas #{id} not found"))?
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .map_err(|_| anyhow::anyhow!("element #{id} is not a canvas"))
}
