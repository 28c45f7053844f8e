use crate::coords::Viewport;

use super::ctx::FrameCtx;

/// What the runtime should do after a callback.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Callbacks driven by [`Runtime`](crate::window::Runtime), all on the
/// event-loop thread.
pub trait App {
    /// The drawable area changed. Also called once when the window opens.
    ///
    /// `viewport` is in logical pixels; the surface has already been
    /// reconfigured.
    fn on_resize(&mut self, viewport: Viewport) {
        let _ = viewport;
    }

    /// Called for every redraw. Input received since the previous frame is in
    /// `ctx.input_frame`.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;

    /// The window is closing. GPU resources are still alive.
    fn on_exit(&mut self) {}
}
