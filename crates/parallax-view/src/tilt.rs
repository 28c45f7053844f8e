//! Pointer-to-tilt mapping.
//!
//! Two policies share one mapper:
//! - **hover**: absolute, recomputed from the pointer position on every move
//! - **drag**: relative, accumulates pointer deltas while a button is held

use std::fmt;
use std::str::FromStr;

use parallax_engine::coords::{Vec2, Viewport};
use parallax_engine::input::{InputEvent, PointerButton};

/// Hover-mode tilt at the canvas edges.
pub const DEFAULT_MAX_TILT: f32 = 20.0;

/// Drag-mode tilt per logical pixel of pointer travel.
pub const DEFAULT_DRAG_SENSITIVITY: f32 = 0.1;

/// Drag-mode clamp, applied symmetrically to both axes.
pub const DEFAULT_DRAG_LIMIT: f32 = 50.0;

/// Horizontal/vertical tilt pair fed to the shader as `(tiltX, tiltY)`.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Tilt {
    pub x: f32,
    pub y: f32,
}

impl Tilt {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn to_array(self) -> [f32; 2] {
        [self.x, self.y]
    }
}

/// Error returned when parsing a `"x,y"` tilt string.
#[derive(Debug, Clone, PartialEq)]
pub struct TiltParseError(String);

impl fmt::Display for TiltParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid tilt '{}': expected two numbers as \"x,y\"", self.0)
    }
}

impl std::error::Error for TiltParseError {}

impl FromStr for Tilt {
    type Err = TiltParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || TiltParseError(s.to_string());
        let (x, y) = s.split_once(',').ok_or_else(err)?;
        let x: f32 = x.trim().parse().map_err(|_| err())?;
        let y: f32 = y.trim().parse().map_err(|_| err())?;
        if !x.is_finite() || !y.is_finite() {
            return Err(err());
        }
        Ok(Tilt::new(x, y))
    }
}

/// Tilt policy.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum TiltMode {
    /// Pointer position within the canvas, scaled to `[-max_tilt, max_tilt]`.
    Hover { max_tilt: f32 },
    /// Accumulated pointer deltas while pressed, clamped to `[-limit, limit]`.
    Drag { sensitivity: f32, limit: f32 },
}

impl TiltMode {
    pub const fn hover() -> Self {
        TiltMode::Hover { max_tilt: DEFAULT_MAX_TILT }
    }

    pub const fn drag() -> Self {
        TiltMode::Drag {
            sensitivity: DEFAULT_DRAG_SENSITIVITY,
            limit: DEFAULT_DRAG_LIMIT,
        }
    }
}

impl Default for TiltMode {
    fn default() -> Self {
        Self::hover()
    }
}

/// Drag tracking: `Up` ignores moves, `Down` remembers the last position.
///
/// `last` is `None` when the press arrived without a known pointer position;
/// the next move then only sets the origin.
#[derive(Debug, Copy, Clone, PartialEq)]
enum DragState {
    Up,
    Down { last: Option<Vec2> },
}

/// Turns pointer events into a [`Tilt`].
#[derive(Debug, Clone)]
pub struct TiltMapper {
    mode: TiltMode,
    tilt: Tilt,
    drag: DragState,
}

impl TiltMapper {
    pub fn new(mode: TiltMode) -> Self {
        Self {
            mode,
            tilt: Tilt::default(),
            drag: DragState::Up,
        }
    }

    #[inline]
    pub fn tilt(&self) -> Tilt {
        self.tilt
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Down { .. })
    }

    /// Feeds one engine input event. `canvas` is the current window viewport.
    ///
    /// Only the primary button starts a drag. Losing focus ends one.
    pub fn apply(&mut self, event: &InputEvent, canvas: Viewport) {
        match *event {
            InputEvent::PointerMoved { position } => self.pointer_moved(position, canvas),
            InputEvent::PointerPressed { button: PointerButton::Primary, position } => {
                self.pointer_pressed(position)
            }
            InputEvent::PointerReleased { button: PointerButton::Primary, .. } => {
                self.pointer_released()
            }
            InputEvent::PointerLeft => self.pointer_left(),
            InputEvent::Focused(false) => self.pointer_released(),
            _ => {}
        }
    }

    /// Pointer moved to `pos` (logical px, top-left origin).
    pub fn pointer_moved(&mut self, pos: Vec2, canvas: Viewport) {
        if !pos.is_finite() {
            return;
        }

        match self.mode {
            TiltMode::Hover { max_tilt } => {
                let Some(n) = canvas.normalize(pos) else { return };
                // Positions outside the canvas (captured pointer) pin to the edge.
                let nx = n.x.clamp(-1.0, 1.0);
                let ny = n.y.clamp(-1.0, 1.0);
                // Moving right shifts the photo left.
                self.tilt = Tilt::new(-nx * max_tilt, ny * max_tilt);
            }
            TiltMode::Drag { sensitivity, limit } => {
                let DragState::Down { last } = self.drag else { return };
                if let Some(last) = last {
                    let delta = (pos - last) * sensitivity;
                    self.tilt = Tilt::new(
                        (self.tilt.x + delta.x).clamp(-limit, limit),
                        (self.tilt.y + delta.y).clamp(-limit, limit),
                    );
                }
                self.drag = DragState::Down { last: Some(pos) };
            }
        }
    }

    /// Primary button pressed at `pos`, if known. Starts a drag in drag mode.
    pub fn pointer_pressed(&mut self, pos: Option<Vec2>) {
        if matches!(self.mode, TiltMode::Drag { .. }) {
            self.drag = DragState::Down { last: pos.filter(|p| p.is_finite()) };
        }
    }

    /// Primary button released. Ends a drag; the tilt is kept.
    pub fn pointer_released(&mut self) {
        self.drag = DragState::Up;
    }

    /// Pointer left the window. Same as a release.
    pub fn pointer_left(&mut self) {
        self.pointer_released();
    }
}

impl Default for TiltMapper {
    fn default() -> Self {
        Self::new(TiltMode::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANVAS: Viewport = Viewport::new(800.0, 600.0);

    fn hover() -> TiltMapper {
        TiltMapper::new(TiltMode::hover())
    }

    fn drag() -> TiltMapper {
        TiltMapper::new(TiltMode::drag())
    }

    // ── hover ─────────────────────────────────────────────────────────────

    #[test]
    fn hover_center_is_neutral() {
        let mut m = hover();
        m.pointer_moved(Vec2::new(400.0, 300.0), CANVAS);
        assert_eq!(m.tilt(), Tilt::new(0.0, 0.0));
    }

    #[test]
    fn hover_corners_reach_max_tilt() {
        let mut m = hover();
        m.pointer_moved(Vec2::new(0.0, 0.0), CANVAS);
        assert_eq!(m.tilt(), Tilt::new(20.0, -20.0));

        m.pointer_moved(Vec2::new(800.0, 600.0), CANVAS);
        assert_eq!(m.tilt(), Tilt::new(-20.0, 20.0));
    }

    #[test]
    fn hover_stays_in_range_and_x_decreases_left_to_right() {
        let mut m = hover();
        let mut prev_x = f32::INFINITY;
        for step in 0..=80 {
            let x = step as f32 * 10.0;
            for y in [0.0, 123.0, 300.0, 599.0, 600.0] {
                m.pointer_moved(Vec2::new(x, y), CANVAS);
                let t = m.tilt();
                assert!((-20.0..=20.0).contains(&t.x), "x out of range at {x},{y}: {t:?}");
                assert!((-20.0..=20.0).contains(&t.y), "y out of range at {x},{y}: {t:?}");
            }
            let tx = m.tilt().x;
            assert!(tx < prev_x, "tiltX must decrease: {tx} !< {prev_x}");
            prev_x = tx;
        }
    }

    #[test]
    fn hover_is_absolute() {
        let mut m = hover();
        m.pointer_moved(Vec2::new(100.0, 100.0), CANVAS);
        m.pointer_moved(Vec2::new(200.0, 450.0), CANVAS);
        let direct = {
            let mut fresh = hover();
            fresh.pointer_moved(Vec2::new(200.0, 450.0), CANVAS);
            fresh.tilt()
        };
        assert_eq!(m.tilt(), direct);
    }

    #[test]
    fn hover_outside_canvas_pins_to_edge() {
        let mut m = hover();
        m.pointer_moved(Vec2::new(-500.0, 5000.0), CANVAS);
        assert_eq!(m.tilt(), Tilt::new(20.0, 20.0));
    }

    #[test]
    fn hover_ignores_degenerate_canvas_and_buttons() {
        let mut m = hover();
        m.pointer_moved(Vec2::new(0.0, 0.0), CANVAS);
        let before = m.tilt();
        m.pointer_moved(Vec2::new(10.0, 10.0), Viewport::new(0.0, 0.0));
        m.pointer_pressed(Some(Vec2::new(10.0, 10.0)));
        assert_eq!(m.tilt(), before);
        assert!(!m.is_dragging());
    }

    // ── drag ──────────────────────────────────────────────────────────────

    #[test]
    fn drag_ignores_moves_while_up() {
        let mut m = drag();
        m.pointer_moved(Vec2::new(100.0, 100.0), CANVAS);
        m.pointer_moved(Vec2::new(300.0, 400.0), CANVAS);
        assert_eq!(m.tilt(), Tilt::default());
    }

    #[test]
    fn drag_accumulates_scaled_deltas() {
        let mut m = drag();
        m.pointer_pressed(Some(Vec2::new(100.0, 100.0)));
        m.pointer_moved(Vec2::new(110.0, 80.0), CANVAS);
        m.pointer_moved(Vec2::new(130.0, 80.0), CANVAS);
        let t = m.tilt();
        assert!((t.x - 3.0).abs() < 1e-5, "{t:?}");
        assert!((t.y + 2.0).abs() < 1e-5, "{t:?}");
    }

    #[test]
    fn drag_clamps_to_limit() {
        let mut m = drag();
        m.pointer_pressed(Some(Vec2::new(0.0, 0.0)));
        m.pointer_moved(Vec2::new(100_000.0, -100_000.0), CANVAS);
        assert_eq!(m.tilt(), Tilt::new(50.0, -50.0));

        // Further travel in the same direction stays clamped.
        m.pointer_moved(Vec2::new(200_000.0, -200_000.0), CANVAS);
        assert_eq!(m.tilt(), Tilt::new(50.0, -50.0));

        // Travel back unwinds from the clamp, not from the raw sum.
        m.pointer_moved(Vec2::new(199_900.0, -199_900.0), CANVAS);
        assert_eq!(m.tilt(), Tilt::new(40.0, -40.0));
    }

    #[test]
    fn release_and_leave_end_the_drag_but_keep_tilt() {
        let mut m = drag();
        m.pointer_pressed(Some(Vec2::new(0.0, 0.0)));
        m.pointer_moved(Vec2::new(50.0, 0.0), CANVAS);
        m.pointer_released();
        assert!(!m.is_dragging());
        m.pointer_moved(Vec2::new(500.0, 0.0), CANVAS);
        assert!((m.tilt().x - 5.0).abs() < 1e-5);

        m.pointer_pressed(Some(Vec2::new(0.0, 0.0)));
        m.pointer_left();
        assert!(!m.is_dragging());
    }

    #[test]
    fn new_press_resets_tracking_origin() {
        let mut m = drag();
        m.pointer_pressed(Some(Vec2::new(0.0, 0.0)));
        m.pointer_released();
        m.pointer_pressed(Some(Vec2::new(400.0, 400.0)));
        m.pointer_moved(Vec2::new(410.0, 400.0), CANVAS);
        assert!((m.tilt().x - 1.0).abs() < 1e-5);
    }

    #[test]
    fn press_without_position_starts_from_first_move() {
        let mut m = drag();
        let canvas = Viewport::new(1280.0, 720.0);

        m.apply(&InputEvent::PointerPressed { button: PointerButton::Primary, position: None }, canvas);
        assert!(m.is_dragging());

        // First move only sets the origin; the corner is not a drag origin.
        m.apply(&InputEvent::PointerMoved { position: Vec2::new(640.0, 360.0) }, canvas);
        assert_eq!(m.tilt(), Tilt::default());

        m.apply(&InputEvent::PointerMoved { position: Vec2::new(641.0, 360.0) }, canvas);
        let t = m.tilt();
        assert!((t.x - 0.1).abs() < 1e-5 && t.y.abs() < 1e-6, "{t:?}");
    }

    #[test]
    fn non_finite_press_position_is_treated_as_unknown() {
        let mut m = drag();
        m.pointer_pressed(Some(Vec2::new(f32::NAN, 0.0)));
        m.pointer_moved(Vec2::new(10.0, 10.0), CANVAS);
        assert_eq!(m.tilt(), Tilt::default());
        m.pointer_moved(Vec2::new(20.0, 10.0), CANVAS);
        assert!((m.tilt().x - 1.0).abs() < 1e-5);
    }

    // ── event dispatch ────────────────────────────────────────────────────

    #[test]
    fn engine_events_drive_drag_state_machine() {
        let mut m = drag();
        let at = Vec2::new(10.0, 10.0);

        m.apply(&InputEvent::PointerPressed { button: PointerButton::Secondary, position: Some(at) }, CANVAS);
        assert!(!m.is_dragging());

        m.apply(&InputEvent::PointerPressed { button: PointerButton::Primary, position: Some(at) }, CANVAS);
        assert!(m.is_dragging());
        m.apply(&InputEvent::PointerMoved { position: Vec2::new(30.0, 10.0) }, CANVAS);
        assert!((m.tilt().x - 2.0).abs() < 1e-5);

        m.apply(&InputEvent::Focused(false), CANVAS);
        assert!(!m.is_dragging());
    }

    #[test]
    fn primary_release_ends_drag() {
        let mut m = drag();
        m.apply(&InputEvent::PointerPressed { button: PointerButton::Primary, position: Some(Vec2::ZERO) }, CANVAS);
        m.apply(&InputEvent::PointerReleased { button: PointerButton::Middle }, CANVAS);
        assert!(m.is_dragging());
        m.apply(&InputEvent::PointerReleased { button: PointerButton::Primary }, CANVAS);
        assert!(!m.is_dragging());
    }

    // ── parsing ───────────────────────────────────────────────────────────

    #[test]
    fn parses_tilt_pairs() {
        assert_eq!("3,-4.5".parse::<Tilt>(), Ok(Tilt::new(3.0, -4.5)));
        assert_eq!(" 0 , 0 ".parse::<Tilt>(), Ok(Tilt::new(0.0, 0.0)));
        assert!("3".parse::<Tilt>().is_err());
        assert!("a,b".parse::<Tilt>().is_err());
        assert!("inf,0".parse::<Tilt>().is_err());
    }
}
