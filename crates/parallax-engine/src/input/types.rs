use crate::coords::Vec2;

/// Pointer button as seen by the viewer.
///
/// Platform buttons beyond the usual three collapse into `Other`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
    Other,
}

/// Input event in window space.
///
/// Positions are logical pixels from the window's top-left corner. A press
/// carries the pointer position so a drag can start exactly where it
/// happened; the position is `None` when no move has been seen since the
/// pointer entered.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum InputEvent {
    PointerMoved { position: Vec2 },
    PointerPressed { button: PointerButton, position: Option<Vec2> },
    PointerReleased { button: PointerButton },

    /// The pointer left the window surface.
    PointerLeft,

    Focused(bool),
}
