use std::path::PathBuf;

use anyhow::{ensure, Result};
use clap::{Parser, ValueEnum};

use parallax_engine::logging::{init_logging, LoggingConfig};
use parallax_engine::paint::Color;
use parallax_view::config::{DEFAULT_DEPTH_PATH, DEFAULT_PARALLAX_STRENGTH, DEFAULT_PHOTO_PATH};
use parallax_view::tilt::{DEFAULT_DRAG_LIMIT, DEFAULT_DRAG_SENSITIVITY, DEFAULT_MAX_TILT};
use parallax_view::{render_snapshot, Application, ParallaxConfig, Tilt, TiltMode};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Tilt follows the pointer position
    Hover,
    /// Tilt accumulates while the left button is held
    Drag,
}

#[derive(Parser, Debug)]
#[command(name = "parallax-studio", version, about = "Depth-parallax photo viewer")]
struct Cli {
    /// Color image
    #[arg(long, default_value = DEFAULT_PHOTO_PATH)]
    photo: PathBuf,

    /// Grayscale depth map (red channel is used)
    #[arg(long, default_value = DEFAULT_DEPTH_PATH)]
    depth: PathBuf,

    #[arg(long, value_enum, default_value_t = Mode::Hover)]
    mode: Mode,

    /// UV shift per unit of tilt at full depth
    #[arg(long, default_value_t = DEFAULT_PARALLAX_STRENGTH)]
    strength: f32,

    /// Hover mode: tilt at the window edges
    #[arg(long, default_value_t = DEFAULT_MAX_TILT)]
    max_tilt: f32,

    /// Drag mode: tilt per pixel of pointer travel
    #[arg(long, default_value_t = DEFAULT_DRAG_SENSITIVITY)]
    sensitivity: f32,

    /// Drag mode: clamp applied to both axes
    #[arg(long, default_value_t = DEFAULT_DRAG_LIMIT)]
    tilt_limit: f32,

    #[arg(long, default_value_t = 1280.0)]
    width: f64,

    #[arg(long, default_value_t = 720.0)]
    height: f64,

    /// Background around the photo, as sRGB hex
    #[arg(long, default_value = "#000000")]
    background: Color,

    /// Log filter (env_logger syntax); overrides RUST_LOG
    #[arg(long)]
    log: Option<String>,

    /// Render one frame on the CPU to this image and exit
    #[arg(long, value_name = "OUT.png")]
    snapshot: Option<PathBuf>,

    /// Tilt used for --snapshot, as "x,y"
    #[arg(long, default_value = "0,0", allow_hyphen_values = true)]
    tilt: Tilt,
}

impl Cli {
    fn validate(&self) -> Result<()> {
        ensure!(self.strength.is_finite(), "--strength must be finite");
        ensure!(self.max_tilt.is_finite() && self.max_tilt >= 0.0, "--max-tilt must be >= 0");
        ensure!(self.sensitivity.is_finite(), "--sensitivity must be finite");
        ensure!(self.tilt_limit.is_finite() && self.tilt_limit >= 0.0, "--tilt-limit must be >= 0");
        ensure!(self.width > 0.0 && self.height > 0.0, "window size must be positive");
        Ok(())
    }

    fn tilt_mode(&self) -> TiltMode {
        match self.mode {
            Mode::Hover => TiltMode::Hover { max_tilt: self.max_tilt },
            Mode::Drag => TiltMode::Drag {
                sensitivity: self.sensitivity,
                limit: self.tilt_limit,
            },
        }
    }

    fn parallax_config(&self) -> ParallaxConfig {
        ParallaxConfig {
            photo_path: self.photo.clone(),
            depth_path: self.depth.clone(),
            mode: self.tilt_mode(),
            parallax_strength: self.strength,
            clear_color: self.background,
            ..ParallaxConfig::default()
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(LoggingConfig {
        env_filter: cli.log.clone(),
        ..LoggingConfig::default()
    });
    cli.validate()?;

    let config = cli.parallax_config();

    if let Some(out) = &cli.snapshot {
        return render_snapshot(&config, cli.tilt, out);
    }

    let hint = match cli.mode {
        Mode::Hover => "move the pointer over the window",
        Mode::Drag => "drag with the left mouse button",
    };
    println!();
    println!("  parallax-studio  ·  {hint}");
    println!();

    Application::new()
        .title("Parallax Studio")
        .size(cli.width, cli.height)
        .config(config)
        .run()
}
