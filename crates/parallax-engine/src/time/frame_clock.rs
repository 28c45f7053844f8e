use std::time::{Duration, Instant};

/// Smoothing factor for the frame-rate average; higher reacts faster.
const FPS_SMOOTHING: f32 = 0.1;

/// Timing of one rendered frame.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Seconds since the previous frame, clamped.
    pub dt: f32,

    /// Counts from zero.
    pub frame_index: u64,

    /// Time since the first frame.
    pub elapsed: Duration,

    /// Exponential moving average of `1 / dt`.
    pub fps: f32,
}

/// Produces a [`FrameTime`] per redraw.
///
/// `dt` is clamped so a stall (minimized window, debugger pause) does not
/// show up as one enormous frame.
#[derive(Debug, Clone)]
pub struct FrameClock {
    start: Instant,
    last: Instant,
    frame_index: u64,
    fps: Option<f32>,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    /// Clamps `dt` to 0.1 ms ..= 250 ms.
    pub fn new() -> Self {
        Self::with_clamps(Duration::from_micros(100), Duration::from_millis(250))
    }

    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        let now = Instant::now();
        Self {
            start: now,
            last: now,
            frame_index: 0,
            fps: None,
            dt_min,
            dt_max,
        }
    }

    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> FrameTime {
        let dt = now
            .saturating_duration_since(self.last)
            .clamp(self.dt_min, self.dt_max)
            .as_secs_f32();
        self.last = now;

        let instant_fps = 1.0 / dt;
        let fps = match self.fps {
            Some(avg) => avg + (instant_fps - avg) * FPS_SMOOTHING,
            None => instant_fps,
        };
        self.fps = Some(fps);

        let time = FrameTime {
            dt,
            frame_index: self.frame_index,
            elapsed: now.saturating_duration_since(self.start),
            fps,
        };
        self.frame_index = self.frame_index.wrapping_add(1);
        time
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
