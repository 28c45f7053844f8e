use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::window::Window;

use crate::coords::Vec2;
use crate::input::{InputEvent, InputState, PointerButton};

/// Maps a winit event onto an [`InputEvent`], or `None` if input ignores it.
///
/// Cursor positions are converted to logical pixels with the window's current
/// scale factor.
pub(crate) fn translate_window_event(
    window: &Window,
    state: &InputState,
    event: &WindowEvent,
) -> Option<InputEvent> {
    let ev = match event {
        WindowEvent::CursorMoved { position, .. } => {
            let logical = position.to_logical::<f64>(window.scale_factor());
            InputEvent::PointerMoved {
                position: Vec2::new(logical.x as f32, logical.y as f32),
            }
        }

        WindowEvent::MouseInput { state: element, button, .. } => {
            // winit reports no position with button events.
            let button = pointer_button(*button);
            match element {
                ElementState::Pressed => InputEvent::PointerPressed {
                    button,
                    position: state.pointer(),
                },
                ElementState::Released => InputEvent::PointerReleased { button },
            }
        }

        WindowEvent::CursorLeft { .. } => InputEvent::PointerLeft,
        WindowEvent::Focused(focused) => InputEvent::Focused(*focused),
        _ => return None,
    };
    Some(ev)
}

fn pointer_button(button: MouseButton) -> PointerButton {
    match button {
        MouseButton::Left => PointerButton::Primary,
        MouseButton::Right => PointerButton::Secondary,
        MouseButton::Middle => PointerButton::Middle,
        _ => PointerButton::Other,
    }
}
