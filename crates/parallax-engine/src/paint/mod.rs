//! Colors as the application specifies them.

pub mod color;

pub use color::{Color, ColorParseError};
