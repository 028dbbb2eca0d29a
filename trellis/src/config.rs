//! Defaults applied to newly created components.

use serde::{Deserialize, Serialize};

use crate::primitives::{Color, Size};

/// Initial attribute values for components created by a
/// [`ComponentTree`](crate::ComponentTree).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentDefaults {
    /// Background colour of new components.
    pub background: Color,

    /// Initial size, before any layout pass touches the component.
    pub size: Size,

    /// Size the component asks its parent's layout for.
    pub preferred_size: Size,

    /// Whether new components paint through an offscreen buffer.
    pub double_buffered: bool,
}

impl Default for ComponentDefaults {
    fn default() -> Self {
        Self {
            background: Color::LIGHT_GRAY,
            size: Size::new(16, 16),
            preferred_size: Size::new(16, 16),
            double_buffered: false,
        }
    }
}
