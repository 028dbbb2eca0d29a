//! Trellis Widgets
//!
//! Built-in composite components.

mod frame;

pub use frame::{Frame, FrameSkin};
