use super::types::InputEvent;

/// Input events received since the previous rendered frame.
///
/// The runtime fills this between redraws and empties it once the frame has
/// been handed to the app, so every event is seen exactly once.
#[derive(Debug, Default)]
pub struct InputFrame {
    events: Vec<InputEvent>,
}

impl InputFrame {
    /// Events in arrival order.
    #[inline]
    pub fn events(&self) -> &[InputEvent] {
        &self.events
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub(crate) fn push(&mut self, ev: InputEvent) {
        self.events.push(ev);
    }

    pub(crate) fn clear(&mut self) {
        self.events.clear();
    }
}
