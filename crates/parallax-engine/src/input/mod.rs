//! Pointer and focus input.
//!
//! winit events are translated at the runtime boundary; nothing outside
//! `platform` sees winit input types.

mod frame;
pub(crate) mod platform;
mod state;
mod types;

pub use frame::InputFrame;
pub use state::InputState;
pub use types::{InputEvent, PointerButton};
