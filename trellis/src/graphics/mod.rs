//! Drawing backend and host surface interfaces.
//!
//! The toolkit consumes these traits; it never draws pixels itself except
//! through a [`Graphics`] handle. Two backends ship with the crate:
//!
//! - [`raster`]: software rasterisation into an `image::RgbaImage`. Offscreen
//!   buffers of double-buffered components use it.
//! - [`display_list`]: records every primitive in surface coordinates, with
//!   the clip it was issued under. Used for headless hosts and tests.

pub mod display_list;
pub mod raster;

pub use display_list::{DisplayList, DisplayListSurface, DrawOp, ListGraphics};
pub use raster::{Offscreen, RasterGraphics, RasterSurface};

use image::RgbaImage;

use crate::primitives::{Color, Point, Rect, Size};

/// A stateful drawing context: clip region, origin and current colour.
///
/// Coordinates passed to drawing primitives are relative to the context's
/// origin. Clipping composes: clipping twice keeps the intersection.
pub trait Graphics {
    /// Derive an independent context for the area `area` of this one.
    ///
    /// The new context is clipped to `area` and its origin is moved to the
    /// top-left corner of `area`. Clip and translate calls on the returned
    /// context do not affect `self`.
    fn create(&mut self, area: Rect) -> Box<dyn Graphics + '_>;

    /// Intersect the clip region with `area`.
    fn clip(&mut self, area: Rect);

    /// Current clip region in local coordinates, `None` if nothing is drawable.
    fn clip_bounds(&self) -> Option<Rect>;

    /// Move the origin to `(dx, dy)` in the current coordinate system.
    fn translate(&mut self, dx: i32, dy: i32);

    fn set_color(&mut self, color: Color);

    fn color(&self) -> Color;

    fn fill_rect(&mut self, area: Rect);

    /// Outline `area`, covering its first and last row and column.
    fn draw_rect(&mut self, area: Rect);

    fn draw_line(&mut self, from: Point, to: Point);

    fn draw_polygon(&mut self, points: &[Point]);

    fn fill_polygon(&mut self, points: &[Point]);

    /// Blit `image` with its top-left corner at `at`.
    fn draw_image(&mut self, image: &RgbaImage, at: Point);
}

/// Space a host surface reserves around its content area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Insets {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Insets {
    #[inline]
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self { left, top, right, bottom }
    }

    /// The content rectangle of a surface of the given outer size.
    pub fn content_rect(&self, outer: Size) -> Rect {
        Rect::new(
            self.left,
            self.top,
            (outer.width - self.left - self.right).max(0),
            (outer.height - self.top - self.bottom).max(0),
        )
    }
}

/// The host window: owns the pixels a root component ends up on.
pub trait Surface {
    /// A drawing context for the content area, or `None` when the surface
    /// cannot be drawn on right now.
    fn graphics(&mut self) -> Option<Box<dyn Graphics + '_>>;

    /// Outer size of the surface.
    fn size(&self) -> Size;

    /// Change the outer size.
    fn resize(&mut self, size: Size);

    fn insets(&self) -> Insets {
        Insets::default()
    }

    /// Size available to the root component.
    fn content_size(&self) -> Size {
        self.insets().content_rect(self.size()).size()
    }

    fn set_title(&mut self, title: &str);

    fn title(&self) -> &str;

    fn set_visible(&mut self, visible: bool);

    fn is_visible(&self) -> bool;
}

/// Clip/origin bookkeeping shared by the bundled backends.
///
/// `origin` and `clip` are in surface (absolute) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ContextState {
    pub origin: Point,
    pub clip: Option<Rect>,
    pub color: Color,
}

impl ContextState {
    pub fn new(bounds: Rect) -> Self {
        Self {
            origin: bounds.origin(),
            clip: bounds.non_empty(),
            color: Color::BLACK,
        }
    }

    /// Map a local rectangle to surface coordinates.
    #[inline]
    pub fn to_surface(&self, area: Rect) -> Rect {
        area.translate(self.origin)
    }

    #[inline]
    pub fn point_to_surface(&self, point: Point) -> Point {
        point + self.origin
    }

    pub fn clip(&mut self, area: Rect) {
        let area = self.to_surface(area);
        self.clip = self.clip.and_then(|clip| clip.intersection(&area));
    }

    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.origin = self.origin + Point::new(dx, dy);
    }

    /// State for a context derived with [`Graphics::create`].
    pub fn derive(&self, area: Rect) -> Self {
        let mut state = *self;
        state.clip(area);
        state.translate(area.x, area.y);
        state
    }

    pub fn clip_bounds(&self) -> Option<Rect> {
        self.clip.map(|clip| {
            clip.translate(Point::new(-self.origin.x, -self.origin.y))
        })
    }
}
