//! Parallax engine crate.
//!
//! This crate owns the platform + GPU runtime pieces used by the viewer:
//! window and event loop, surface management, pointer input, frame timing and
//! the depth-parallax renderer.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;
pub mod paint;
