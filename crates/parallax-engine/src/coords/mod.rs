//! Window-space coordinates shared by the runtime, input and the tilt mapper.
//!
//! Logical pixels, origin at the top-left corner, +Y down. World-space math
//! lives in `render` and uses `glam` directly.

mod viewport;

/// Point or offset in logical pixels.
pub use glam::Vec2;
pub use viewport::Viewport;
