//! Frame: a bordered content area with a label notched into the top edge.
//!
//! ```text
//!    [label]
//!   +-      ---------+
//!   |                |
//!   |    content     |
//!   |                |
//!   +----------------+
//! ```

use crate::component::{ComponentId, ComponentTree, Skin};
use crate::error::Result;
use crate::graphics::Graphics;
use crate::layout::frame::BORDER;
use crate::layout::{FrameLayout, LayoutManager};
use crate::primitives::{Color, Point, Rect, Size};

/// Handles to the three components making up a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub frame: ComponentId,
    pub label: ComponentId,
    pub content: ComponentId,
}

impl Frame {
    /// Create an unattached frame with its label and content children.
    pub fn build(tree: &mut ComponentTree, name: &str) -> Result<Self> {
        let frame = tree.add(name);
        let label = tree.add_child(frame, format!("Frame label for {name}"))?;
        let content = tree.add_child(frame, format!("Frame container for {name}"))?;
        tree.set_layout(frame, FrameLayout::new(label, content))?;
        tree.component_mut(frame)?.set_skin(FrameSkin::new(label));
        Ok(Self { frame, label, content })
    }

    /// Place children other than the label and content with `layout`.
    pub fn set_secondary_layout(&self, tree: &mut ComponentTree, layout: impl LayoutManager + 'static) -> Result<()> {
        tree.set_layout(self.frame, FrameLayout::new(self.label, self.content).with_secondary(layout))
    }

    /// Add an extra child. It is painted below the label and content.
    pub fn add_child(&self, tree: &mut ComponentTree, child: ComponentId) -> Result<()> {
        tree.insert_child(self.frame, 0, child)
    }

    pub fn set_foreground(&self, tree: &mut ComponentTree, color: Color) -> Result<()> {
        tree.component_mut(self.frame)?
            .set_skin(FrameSkin::new(self.label).with_foreground(color));
        Ok(())
    }

    /// Size of the frame decoration alone, grown by `extra`: the label's
    /// preferred size (or a bare border band) plus the border.
    pub fn calculate_size(&self, tree: &ComponentTree, extra: Size) -> Result<Size> {
        let label = tree.component(self.label)?.preferred_size();
        let (width, height) = if label.is_empty() {
            (0, BORDER)
        } else {
            (label.width, label.height)
        };
        Ok(Size::new(width + 2 * BORDER, height + BORDER).expand(extra.width, extra.height))
    }
}

/// Draws the frame border, leaving a gap where the label sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSkin {
    label: ComponentId,
    foreground: Color,
}

impl FrameSkin {
    pub fn new(label: ComponentId) -> Self {
        Self {
            label,
            foreground: Color::BLACK,
        }
    }

    pub fn with_foreground(mut self, foreground: Color) -> Self {
        self.foreground = foreground;
        self
    }

    pub fn foreground(&self) -> Color {
        self.foreground
    }
}

impl Skin for FrameSkin {
    fn paint(&self, tree: &ComponentTree, id: ComponentId, g: &mut dyn Graphics) -> Result<()> {
        let size = tree.component(id)?.size();
        let (right, bottom) = (size.width - 1, size.height - 1);
        g.set_color(self.foreground);

        let Some(label) = tree.placement(id, self.label)? else {
            g.draw_rect(Rect::new(3, 3, right - 5, bottom - 5));
            return Ok(());
        };

        let (x1, y1) = (3, label.height / 2);
        let (x2, y2) = (right - 3, bottom - 3);
        g.draw_line(Point::new(x1, y1 + 1), Point::new(x1, y2));
        g.draw_line(Point::new(x1 + 1, y2), Point::new(x2 - 1, y2));
        g.draw_line(Point::new(x2, y2), Point::new(x2, y1 + 1));
        g.draw_line(Point::new(x1, y1), Point::new(label.x - 1, y1));
        g.draw_line(Point::new(label.right(), y1), Point::new(x2, y1));
        Ok(())
    }
}
