//! Event loop and window ownership.
//!
//! [`Runtime`] creates the window and its GPU surface, feeds input to the
//! app and requests a redraw every time the loop goes idle.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
