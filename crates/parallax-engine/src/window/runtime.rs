use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{logical_viewport, App as CoreApp, AppControl, FrameCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::platform::translate_window_event;
use crate::input::{InputFrame, InputState};
use crate::time::FrameClock;

/// Window settings.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    /// Smallest size the user can shrink the window to.
    pub min_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "parallax".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
            min_size: LogicalSize::new(160.0, 120.0),
        }
    }
}

/// Runs one window with a continuously redrawn wgpu surface.
pub struct Runtime;

impl Runtime {
    /// Opens the window and drives `app` until it closes or the app returns
    /// [`AppControl::Exit`].
    ///
    /// Fails if the event loop, window or GPU context cannot be created.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + CoreApp,
    {
        let event_loop = EventLoop::new().context("failed to create event loop")?;
        let mut handler = Handler::new(config, gpu_init, app);

        event_loop
            .run_app(&mut handler)
            .context("event loop exited with an error")?;

        handler.startup_error.map_or(Ok(()), Err)
    }
}

/// The window plus everything that must live exactly as long as it.
#[self_referencing]
struct WindowSurface {
    input_state: InputState,
    input_frame: InputFrame,
    clock: FrameClock,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct Handler<A>
where
    A: CoreApp + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    /// `None` until the first `resumed`, and again after exit.
    surface: Option<WindowSurface>,
    exiting: bool,
    startup_error: Option<anyhow::Error>,
}

impl<A> Handler<A>
where
    A: CoreApp + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            surface: None,
            exiting: false,
            startup_error: None,
        }
    }

    fn open(&self, event_loop: &ActiveEventLoop) -> Result<WindowSurface> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size)
            .with_min_inner_size(self.config.min_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();

        WindowSurfaceTryBuilder {
            input_state: InputState::default(),
            input_frame: InputFrame::default(),
            clock: FrameClock::default(),
            window,
            gpu_builder: |w| {
                pollster::block_on(Gpu::new(w, gpu_init)).context("GPU initialization failed")
            },
        }
        .try_build()
    }

    fn exit(&mut self, event_loop: &ActiveEventLoop) {
        if self.surface.is_some() {
            self.app.on_exit();
        }
        // The surface is released before the window it borrows.
        self.surface = None;
        self.exiting = true;
        event_loop.exit();
    }
}

fn resized<A: CoreApp>(app: &mut A, surface: &mut WindowSurface) {
    let (size, viewport) = surface.with_window(|w| (w.inner_size(), logical_viewport(w)));
    log::debug!(
        "window {}x{} px ({}x{} logical)",
        size.width,
        size.height,
        viewport.width,
        viewport.height
    );

    surface.with_gpu_mut(|gpu| gpu.resize(size));
    app.on_resize(viewport);
    surface.with_window(|w| w.request_redraw());
}

fn redraw<A: CoreApp>(app: &mut A, surface: &mut WindowSurface) -> AppControl {
    surface.with_mut(|fields| {
        let mut ctx = FrameCtx {
            window: WindowCtx { window: fields.window },
            gpu: fields.gpu,
            input_frame: fields.input_frame,
            time: fields.clock.tick(),
        };
        let control = app.on_frame(&mut ctx);

        // Each event is delivered to exactly one frame.
        fields.input_frame.clear();
        control
    })
}

impl<A> ApplicationHandler for Handler<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.surface.is_some() || self.exiting {
            return;
        }

        match self.open(event_loop) {
            Ok(surface) => {
                let viewport = surface.with_window(|w| {
                    w.request_redraw();
                    logical_viewport(w)
                });
                self.app.on_resize(viewport);
                self.surface = Some(surface);
            }
            Err(e) => {
                log::error!("{e:#}");
                self.startup_error = Some(e);
                self.exit(event_loop);
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exiting {
            event_loop.exit();
            return;
        }

        // Redraw continuously; FIFO presentation paces the loop.
        event_loop.set_control_flow(ControlFlow::Wait);
        if let Some(surface) = self.surface.as_ref() {
            surface.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let app = &mut self.app;
        let Some(surface) = self.surface.as_mut() else {
            return;
        };

        surface.with_mut(|fields| {
            if let Some(ev) = translate_window_event(fields.window, fields.input_state, &event) {
                fields.input_state.apply(fields.input_frame, ev);
            }
        });

        let control = match event {
            WindowEvent::CloseRequested => AppControl::Exit,
            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                resized(app, surface);
                AppControl::Continue
            }
            WindowEvent::RedrawRequested => redraw(app, surface),
            _ => AppControl::Continue,
        };

        if control == AppControl::Exit {
            self.exit(event_loop);
        }
    }
}
