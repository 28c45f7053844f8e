//! The contract between the window runtime and the viewer.
//!
//! The runtime owns the window, surface and input plumbing; an [`App`] only
//! sees [`FrameCtx`] and a handful of lifecycle callbacks.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
pub(crate) use ctx::logical_viewport;
