use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use winit::dpi::LogicalSize;

use parallax_engine::coords::Viewport;
use parallax_engine::core::{App as EngineApp, AppControl, FrameCtx};
use parallax_engine::device::GpuInit;
use parallax_engine::paint::Color;
use parallax_engine::render::{ParallaxRenderer, SamplerQuality};
use parallax_engine::window::{Runtime, RuntimeConfig};

use crate::config::ParallaxConfig;
use crate::loader::TextureLoader;
use crate::scene::ParallaxScene;
use crate::tilt::{TiltMapper, TiltMode};

// ── Application ───────────────────────────────────────────────────────────

/// Top-level viewer builder.
///
/// Configure paths, tilt mode and rendering options, then open the window
/// with [`run`](Application::run).
///
/// ```rust,ignore
/// Application::new()
///     .title("Parallax")
///     .photo("beach.jpg")
///     .depth_map("beach_depth.png")
///     .mode(TiltMode::drag())
///     .run()?;
/// ```
pub struct Application {
    title:  String,
    width:  f64,
    height: f64,
    config: ParallaxConfig,
}

impl Application {
    pub fn new() -> Self {
        Self {
            title:  "parallax".to_string(),
            width:  1280.0,
            height: 720.0,
            config: ParallaxConfig::default(),
        }
    }

    /// Set the window title.
    pub fn title(mut self, t: impl Into<String>) -> Self {
        self.title = t.into();
        self
    }

    /// Set the initial window size in logical pixels.
    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.width  = width;
        self.height = height;
        self
    }

    /// Color image to display.
    pub fn photo(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.photo_path = path.into();
        self
    }

    /// Depth map matching the photo. Brighter pixels move further.
    pub fn depth_map(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.depth_path = path.into();
        self
    }

    pub fn mode(mut self, mode: TiltMode) -> Self {
        self.config.mode = mode;
        self
    }

    pub fn strength(mut self, strength: f32) -> Self {
        self.config.parallax_strength = strength;
        self
    }

    pub fn sampler(mut self, quality: SamplerQuality) -> Self {
        self.config.sampler = quality;
        self
    }

    pub fn clear_color(mut self, color: Color) -> Self {
        self.config.clear_color = color;
        self
    }

    /// Replace the whole viewer configuration.
    pub fn config(mut self, config: ParallaxConfig) -> Self {
        self.config = config;
        self
    }

    // ── Entry point ───────────────────────────────────────────────────────

    /// Start loading both textures and run the event loop until the window
    /// closes.
    pub fn run(self) -> Result<()> {
        let runtime = RuntimeConfig {
            title:        self.title.clone(),
            initial_size: LogicalSize::new(self.width, self.height),
            ..RuntimeConfig::default()
        };

        log::info!(
            "loading photo '{}' and depth map '{}'",
            self.config.photo_path.display(),
            self.config.depth_path.display()
        );
        let state = ViewerState::new(self.config);

        Runtime::run(runtime, GpuInit::default(), state)
    }
}

impl Default for Application {
    fn default() -> Self {
        Self::new()
    }
}

// ── ViewerState ───────────────────────────────────────────────────────────

/// How often frame statistics are logged at debug level.
const STATS_INTERVAL: Duration = Duration::from_secs(5);

/// Internal state that implements `parallax_engine::core::App`.
struct ViewerState {
    scene:      ParallaxScene,
    mapper:     TiltMapper,
    renderer:   ParallaxRenderer,
    clear:      Color,

    /// Dropped once both loads have reported.
    loader:     Option<TextureLoader>,

    next_stats: Duration,
}

impl ViewerState {
    fn new(config: ParallaxConfig) -> Self {
        let loader = TextureLoader::spawn(config.photo_path, config.depth_path);
        Self {
            scene:      ParallaxScene::new(config.parallax_strength),
            mapper:     TiltMapper::new(config.mode),
            renderer:   ParallaxRenderer::new(config.sampler),
            clear:      config.clear_color,
            loader:     Some(loader),
            next_stats: STATS_INTERVAL,
        }
    }

    fn drain_loads(&mut self) {
        let Some(loader) = self.loader.as_mut() else { return };

        for event in loader.poll() {
            match event.result {
                Ok(image) => {
                    log::info!("{} loaded ({}x{})", event.slot, image.width(), image.height());
                    if self.scene.set_texture(event.slot, image) {
                        log::info!("scene ready");
                    }
                }
                Err(e) => log::error!("{e}"),
            }
        }

        if loader.is_idle() {
            self.loader = None;
        }
    }
}

impl EngineApp for ViewerState {
    fn on_resize(&mut self, viewport: Viewport) {
        self.scene.resize(viewport);
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        self.drain_loads();

        let viewport = self.scene.viewport();
        for event in ctx.input_frame.events() {
            self.mapper.apply(event, viewport);
        }

        if ctx.time.elapsed >= self.next_stats {
            log::debug!("frame {} at {:.1} fps", ctx.time.frame_index, ctx.time.fps);
            self.next_stats = ctx.time.elapsed + STATS_INTERVAL;
        }

        // ── Render ────────────────────────────────────────────────────────
        let tilt     = self.mapper.tilt();
        let scene    = &self.scene;
        let renderer = &mut self.renderer;

        ctx.render(self.clear, |rctx, target| {
            if let Some(draw) = scene.draw(tilt) {
                renderer.render(rctx, target, &draw);
            }
        })
    }

    fn on_exit(&mut self) {
        let tilt = self.mapper.tilt();
        log::info!("closing viewer (final tilt {:.2}, {:.2})", tilt.x, tilt.y);
    }
}
