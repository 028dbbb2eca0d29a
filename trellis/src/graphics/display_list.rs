//! Display List - recorded drawing primitives.
//!
//! A backend that does not rasterise anything: every primitive is stored in
//! surface coordinates together with the clip rectangle that was active when
//! it was issued. Headless hosts use it to inspect what a paint pass did.

use image::RgbaImage;

use super::{ContextState, Graphics, Insets, Surface};
use crate::primitives::{Color, Point, Rect, Size};

/// A single recorded primitive. Coordinates are absolute.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    FillRect { rect: Rect, color: Color, clip: Rect },
    DrawRect { rect: Rect, color: Color, clip: Rect },
    Line { from: Point, to: Point, color: Color, clip: Rect },
    Polygon { points: Vec<Point>, filled: bool, color: Color, clip: Rect },
    /// An image blit; `rect` is the area the image covers.
    Image { rect: Rect, clip: Rect },
}

impl DrawOp {
    /// The clip rectangle the primitive was issued under.
    pub fn clip(&self) -> Rect {
        match self {
            DrawOp::FillRect { clip, .. }
            | DrawOp::DrawRect { clip, .. }
            | DrawOp::Line { clip, .. }
            | DrawOp::Polygon { clip, .. }
            | DrawOp::Image { clip, .. } => *clip,
        }
    }

    /// For fills and blits, the pixels actually covered after clipping.
    pub fn visible_area(&self) -> Option<Rect> {
        match self {
            DrawOp::FillRect { rect, clip, .. } | DrawOp::Image { rect, clip } => {
                rect.intersection(clip)
            }
            _ => None,
        }
    }
}

/// An ordered list of recorded primitives.
#[derive(Debug, Default, Clone)]
pub struct DisplayList {
    ops: Vec<DrawOp>,
}

impl DisplayList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// A context recording into this list, clipped to `bounds`.
    pub fn graphics(&mut self, bounds: Rect) -> ListGraphics<'_> {
        ListGraphics {
            ops: &mut self.ops,
            state: ContextState::new(bounds),
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Clear all primitives.
    pub fn clear(&mut self) {
        self.ops.clear();
    }

    /// Visible areas of every fill of `color`, in paint order.
    pub fn fills_of(&self, color: Color) -> Vec<Rect> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::FillRect { color: c, .. } if *c == color => op.visible_area(),
                _ => None,
            })
            .collect()
    }
}

/// Drawing context handed out by a [`DisplayList`].
pub struct ListGraphics<'a> {
    ops: &'a mut Vec<DrawOp>,
    state: ContextState,
}

impl ListGraphics<'_> {
    /// Record `op` unless the context cannot draw anything.
    fn record(&mut self, build: impl FnOnce(&ContextState, Rect) -> DrawOp) {
        if let Some(clip) = self.state.clip {
            let op = build(&self.state, clip);
            self.ops.push(op);
        }
    }
}

impl Graphics for ListGraphics<'_> {
    fn create(&mut self, area: Rect) -> Box<dyn Graphics + '_> {
        Box::new(ListGraphics {
            ops: &mut *self.ops,
            state: self.state.derive(area),
        })
    }

    fn clip(&mut self, area: Rect) {
        self.state.clip(area);
    }

    fn clip_bounds(&self) -> Option<Rect> {
        self.state.clip_bounds()
    }

    fn translate(&mut self, dx: i32, dy: i32) {
        self.state.translate(dx, dy);
    }

    fn set_color(&mut self, color: Color) {
        self.state.color = color;
    }

    fn color(&self) -> Color {
        self.state.color
    }

    fn fill_rect(&mut self, area: Rect) {
        self.record(|state, clip| DrawOp::FillRect {
            rect: state.to_surface(area),
            color: state.color,
            clip,
        });
    }

    fn draw_rect(&mut self, area: Rect) {
        self.record(|state, clip| DrawOp::DrawRect {
            rect: state.to_surface(area),
            color: state.color,
            clip,
        });
    }

    fn draw_line(&mut self, from: Point, to: Point) {
        self.record(|state, clip| DrawOp::Line {
            from: state.point_to_surface(from),
            to: state.point_to_surface(to),
            color: state.color,
            clip,
        });
    }

    fn draw_polygon(&mut self, points: &[Point]) {
        self.record(|state, clip| DrawOp::Polygon {
            points: points.iter().map(|&p| state.point_to_surface(p)).collect(),
            filled: false,
            color: state.color,
            clip,
        });
    }

    fn fill_polygon(&mut self, points: &[Point]) {
        self.record(|state, clip| DrawOp::Polygon {
            points: points.iter().map(|&p| state.point_to_surface(p)).collect(),
            filled: true,
            color: state.color,
            clip,
        });
    }

    fn draw_image(&mut self, image: &RgbaImage, at: Point) {
        let size = Size::new(image.width() as i32, image.height() as i32);
        self.record(|state, clip| DrawOp::Image {
            rect: Rect::from_origin_size(state.point_to_surface(at), size),
            clip,
        });
    }
}

/// A host surface that records instead of rasterising.
#[derive(Debug, Clone)]
pub struct DisplayListSurface {
    list: DisplayList,
    size: Size,
    insets: Insets,
    title: String,
    visible: bool,
}

impl DisplayListSurface {
    /// A hidden surface of the given outer size.
    pub fn new(size: Size) -> Self {
        Self {
            list: DisplayList::new(),
            size,
            insets: Insets::default(),
            title: String::new(),
            visible: false,
        }
    }

    pub fn with_insets(mut self, insets: Insets) -> Self {
        self.insets = insets;
        self
    }

    pub fn list(&self) -> &DisplayList {
        &self.list
    }

    /// Take the recorded primitives, leaving an empty list behind.
    pub fn take_list(&mut self) -> DisplayList {
        std::mem::take(&mut self.list)
    }
}

impl Surface for DisplayListSurface {
    fn graphics(&mut self) -> Option<Box<dyn Graphics + '_>> {
        if !self.visible {
            return None;
        }
        let content = self.insets.content_rect(self.size);
        Some(Box::new(self.list.graphics(content)))
    }

    fn size(&self) -> Size {
        self.size
    }

    fn resize(&mut self, size: Size) {
        self.size = size;
    }

    fn insets(&self) -> Insets {
        self.insets
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn is_visible(&self) -> bool {
        self.visible
    }
}
