use crate::coords::Vec2;

use super::frame::InputFrame;
use super::types::InputEvent;

/// Pointer state for the window.
///
/// Tracks what is true right now; [`InputFrame`] holds what happened since
/// the last frame.
#[derive(Debug, Default)]
pub struct InputState {
    pointer: Option<Vec2>,
}

impl InputState {
    /// Last known pointer position, `None` while the pointer is outside or
    /// has not moved since it entered.
    #[inline]
    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    /// Folds `ev` into the current state and queues it on `frame`.
    pub fn apply(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match ev {
            InputEvent::PointerMoved { position } => self.pointer = Some(position),
            InputEvent::PointerPressed { position: Some(position), .. } => {
                self.pointer = Some(position)
            }
            InputEvent::PointerLeft => self.pointer = None,
            _ => {}
        }

        frame.push(ev);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::PointerButton;

    #[test]
    fn events_queue_in_arrival_order() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        let moved = InputEvent::PointerMoved { position: Vec2::new(1.0, 2.0) };

        state.apply(&mut frame, moved);
        state.apply(&mut frame, InputEvent::PointerLeft);

        assert_eq!(frame.events(), &[moved, InputEvent::PointerLeft]);
        assert_eq!(state.pointer(), None);
    }

    #[test]
    fn pointer_is_unknown_until_first_move() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        assert_eq!(state.pointer(), None);

        let press = InputEvent::PointerPressed { button: PointerButton::Primary, position: None };
        state.apply(&mut frame, press);
        assert_eq!(state.pointer(), None);

        state.apply(&mut frame, InputEvent::PointerMoved { position: Vec2::new(4.0, 5.0) });
        assert_eq!(state.pointer(), Some(Vec2::new(4.0, 5.0)));

        state.apply(&mut frame, InputEvent::PointerLeft);
        assert_eq!(state.pointer(), None);
    }

    #[test]
    fn clearing_the_frame_keeps_state() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply(&mut frame, InputEvent::PointerMoved { position: Vec2::new(3.0, 3.0) });
        state.apply(&mut frame, InputEvent::PointerReleased { button: PointerButton::Secondary });
        assert_eq!(frame.events().len(), 2);
        frame.clear();

        assert!(frame.is_empty());
        assert_eq!(state.pointer(), Some(Vec2::new(3.0, 3.0)));
    }
}
