//! Software raster backend over an `image::RgbaImage`.

use image::{Rgba, RgbaImage};

use super::{ContextState, Graphics, Insets, Surface};
use crate::primitives::{Color, Point, Rect, Size};

/// A drawing context that rasterises straight into an image.
pub struct RasterGraphics<'a> {
    image: &'a mut RgbaImage,
    state: ContextState,
}

impl<'a> RasterGraphics<'a> {
    /// A context covering the whole image.
    pub fn new(image: &'a mut RgbaImage) -> Self {
        let bounds = Rect::new(0, 0, image.width() as i32, image.height() as i32);
        Self::with_bounds(image, bounds)
    }

    /// A context with its origin at `bounds`' corner, clipped to `bounds`.
    pub fn with_bounds(image: &'a mut RgbaImage, bounds: Rect) -> Self {
        let full = Rect::new(0, 0, image.width() as i32, image.height() as i32);
        let mut state = ContextState::new(full);
        state = state.derive(bounds);
        Self { image, state }
    }

    /// Blend the current colour into one surface pixel, honouring the clip.
    fn plot(&mut self, x: i32, y: i32) {
        let color = self.state.color;
        self.blend(x, y, color);
    }

    fn blend(&mut self, x: i32, y: i32, color: Color) {
        let Some(clip) = self.state.clip else {
            return;
        };
        if !clip.contains(Point::new(x, y)) {
            return;
        }
        if x < 0 || y < 0 || x as u32 >= self.image.width() || y as u32 >= self.image.height() {
            return;
        }
        let pixel = self.image.get_pixel_mut(x as u32, y as u32);
        *pixel = Rgba(color.over(pixel.0));
    }

    /// Fill an area given in surface coordinates.
    fn fill_surface_rect(&mut self, area: Rect) {
        let Some(clip) = self.state.clip else {
            return;
        };
        let Some(area) = area.intersection(&clip) else {
            return;
        };
        for y in area.y..area.bottom() {
            for x in area.x..area.right() {
                self.plot(x, y);
            }
        }
    }

    /// Bresenham between two surface points, both ends included.
    fn line_surface(&mut self, from: Point, to: Point) {
        let (mut x, mut y) = (from.x, from.y);
        let dx = (to.x - from.x).abs();
        let dy = -(to.y - from.y).abs();
        let sx = if from.x < to.x { 1 } else { -1 };
        let sy = if from.y < to.y { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.plot(x, y);
            if x == to.x && y == to.y {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }
}

impl Graphics for RasterGraphics<'_> {
    fn create(&mut self, area: Rect) -> Box<dyn Graphics + '_> {
        Box::new(RasterGraphics {
            image: &mut *self.image,
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
        let area = self.state.to_surface(area);
        self.fill_surface_rect(area);
    }

    fn draw_rect(&mut self, area: Rect) {
        if area.is_empty() {
            return;
        }
        let area = self.state.to_surface(area);
        let (right, bottom) = (area.right() - 1, area.bottom() - 1);
        self.line_surface(Point::new(area.x, area.y), Point::new(right, area.y));
        self.line_surface(Point::new(area.x, bottom), Point::new(right, bottom));
        if area.height > 2 {
            self.line_surface(Point::new(area.x, area.y + 1), Point::new(area.x, bottom - 1));
            self.line_surface(Point::new(right, area.y + 1), Point::new(right, bottom - 1));
        }
    }

    fn draw_line(&mut self, from: Point, to: Point) {
        let from = self.state.point_to_surface(from);
        let to = self.state.point_to_surface(to);
        self.line_surface(from, to);
    }

    fn draw_polygon(&mut self, points: &[Point]) {
        let Some(&first) = points.first() else {
            return;
        };
        let mut previous = first;
        for &point in &points[1..] {
            self.draw_line(previous, point);
            previous = point;
        }
        if points.len() > 2 {
            self.draw_line(previous, first);
        }
    }

    fn fill_polygon(&mut self, points: &[Point]) {
        if points.len() < 3 {
            return;
        }
        let points: Vec<Point> = points
            .iter()
            .map(|&p| self.state.point_to_surface(p))
            .collect();
        let Some(clip) = self.state.clip else {
            return;
        };

        let top = points.iter().map(|p| p.y).min().unwrap_or(0).max(clip.y);
        let bottom = points.iter().map(|p| p.y).max().unwrap_or(0).min(clip.bottom());

        // Even-odd scanlines sampled at pixel centres.
        let mut crossings: Vec<f64> = Vec::with_capacity(points.len());
        for y in top..bottom {
            let sample = y as f64 + 0.5;
            crossings.clear();
            for (i, &a) in points.iter().enumerate() {
                let b = points[(i + 1) % points.len()];
                let (ay, by) = (a.y as f64, b.y as f64);
                if (ay <= sample && by > sample) || (by <= sample && ay > sample) {
                    let t = (sample - ay) / (by - ay);
                    crossings.push(a.x as f64 + t * (b.x - a.x) as f64);
                }
            }
            crossings.sort_by(|a, b| a.total_cmp(b));
            for pair in crossings.chunks_exact(2) {
                let start = (pair[0] - 0.5).ceil() as i32;
                let end = (pair[1] - 0.5).ceil() as i32;
                for x in start.max(clip.x)..end.min(clip.right()) {
                    self.plot(x, y);
                }
            }
        }
    }

    fn draw_image(&mut self, image: &RgbaImage, at: Point) {
        let at = self.state.point_to_surface(at);
        for (x, y, pixel) in image.enumerate_pixels() {
            let [r, g, b, a] = pixel.0;
            self.blend(at.x + x as i32, at.y + y as i32, Color::rgba8(r, g, b, a));
        }
    }
}

/// Offscreen pixel buffer owned by a double-buffered component.
///
/// Buffers only ever grow: a buffer at least as large as the component is
/// reused as is.
#[derive(Debug, Clone)]
pub struct Offscreen {
    image: RgbaImage,
}

impl Offscreen {
    /// Allocate a transparent buffer of `size`.
    pub fn new(size: Size) -> Self {
        Self {
            image: RgbaImage::new(size.width.max(0) as u32, size.height.max(0) as u32),
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.image.width() as i32, self.image.height() as i32)
    }

    /// Whether a component of `size` can be painted into this buffer.
    pub fn fits(&self, size: Size) -> bool {
        self.size().contains(size)
    }

    /// Reset every pixel to transparent.
    pub fn clear(&mut self) {
        self.image.pixels_mut().for_each(|p| *p = Rgba([0, 0, 0, 0]));
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// A context covering the whole buffer.
    pub fn graphics(&mut self) -> RasterGraphics<'_> {
        RasterGraphics::new(&mut self.image)
    }
}

/// A host surface backed by an in-memory pixel buffer.
#[derive(Debug, Clone)]
pub struct RasterSurface {
    image: RgbaImage,
    insets: Insets,
    title: String,
    visible: bool,
}

impl RasterSurface {
    /// A hidden surface of the given outer size.
    pub fn new(size: Size) -> Self {
        Self {
            image: RgbaImage::new(size.width.max(0) as u32, size.height.max(0) as u32),
            insets: Insets::default(),
            title: String::new(),
            visible: false,
        }
    }

    pub fn with_insets(mut self, insets: Insets) -> Self {
        self.insets = insets;
        self
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Colour of the pixel at surface coordinates, if inside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        self.image
            .get_pixel_checked(x, y)
            .map(|p| Color::rgba8(p.0[0], p.0[1], p.0[2], p.0[3]))
    }
}

impl Surface for RasterSurface {
    fn graphics(&mut self) -> Option<Box<dyn Graphics + '_>> {
        if !self.visible {
            return None;
        }
        let content = self.insets.content_rect(self.size());
        Some(Box::new(RasterGraphics::with_bounds(&mut self.image, content)))
    }

    fn size(&self) -> Size {
        Size::new(self.image.width() as i32, self.image.height() as i32)
    }

    /// Reallocates the pixel buffer; previous content is discarded.
    fn resize(&mut self, size: Size) {
        self.image = RgbaImage::new(size.width.max(0) as u32, size.height.max(0) as u32);
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

#[cfg(test)]
mod tests {
    use super::*;

    fn rgba(image: &RgbaImage, x: u32, y: u32) -> [u8; 4] {
        image.get_pixel(x, y).0
    }

    #[test]
    fn test_fill_rect_respects_clip() {
        let mut image = RgbaImage::new(10, 10);
        {
            let mut g = RasterGraphics::new(&mut image);
            g.clip(Rect::new(0, 0, 5, 5));
            g.set_color(Color::RED);
            g.fill_rect(Rect::new(0, 0, 10, 10));
        }
        assert_eq!(rgba(&image, 4, 4), [255, 0, 0, 255]);
        assert_eq!(rgba(&image, 5, 5), [0, 0, 0, 0]);
    }

    #[test]
    fn test_create_translates_and_isolates() {
        let mut image = RgbaImage::new(10, 10);
        {
            let mut g = RasterGraphics::new(&mut image);
            {
                let mut child = g.create(Rect::new(2, 3, 4, 4));
                child.translate(100, 100);
                child.clip(Rect::new(0, 0, 1, 1));
            }
            // The parent context is unaffected by the child's state.
            assert_eq!(g.clip_bounds(), Some(Rect::new(0, 0, 10, 10)));

            let mut child = g.create(Rect::new(2, 3, 4, 4));
            child.set_color(Color::BLUE);
            child.fill_rect(Rect::new(0, 0, 100, 100));
        }
        assert_eq!(rgba(&image, 2, 3), [0, 0, 255, 255]);
        assert_eq!(rgba(&image, 5, 6), [0, 0, 255, 255]);
        assert_eq!(rgba(&image, 6, 6), [0, 0, 0, 0]);
        assert_eq!(rgba(&image, 1, 3), [0, 0, 0, 0]);
    }

    #[test]
    fn test_draw_rect_outline() {
        let mut image = RgbaImage::new(6, 6);
        {
            let mut g = RasterGraphics::new(&mut image);
            g.set_color(Color::WHITE);
            g.draw_rect(Rect::new(1, 1, 4, 4));
        }
        assert_eq!(rgba(&image, 1, 1)[3], 255);
        assert_eq!(rgba(&image, 4, 4)[3], 255);
        assert_eq!(rgba(&image, 1, 3)[3], 255);
        assert_eq!(rgba(&image, 2, 2)[3], 0);
        assert_eq!(rgba(&image, 5, 5)[3], 0);
    }

    #[test]
    fn test_fill_polygon_triangle() {
        let mut image = RgbaImage::new(10, 10);
        {
            let mut g = RasterGraphics::new(&mut image);
            g.set_color(Color::GREEN);
            g.fill_polygon(&[Point::new(0, 0), Point::new(10, 0), Point::new(0, 10)]);
        }
        assert_eq!(rgba(&image, 1, 1), [0, 255, 0, 255]);
        assert_eq!(rgba(&image, 9, 9), [0, 0, 0, 0]);
    }

    #[test]
    fn test_draw_image_blits_at_origin() {
        let mut source = RgbaImage::new(2, 2);
        source.put_pixel(1, 1, Rgba([9, 8, 7, 255]));
        let mut image = RgbaImage::new(5, 5);
        {
            let mut g = RasterGraphics::new(&mut image);
            g.translate(2, 2);
            g.draw_image(&source, Point::ORIGIN);
        }
        assert_eq!(rgba(&image, 3, 3), [9, 8, 7, 255]);
        // Transparent source pixels leave the destination alone.
        assert_eq!(rgba(&image, 2, 2), [0, 0, 0, 0]);
    }

    #[test]
    fn test_hidden_surface_has_no_graphics() {
        let mut surface = RasterSurface::new(Size::new(4, 4));
        assert!(surface.graphics().is_none());
        surface.set_visible(true);
        assert!(surface.graphics().is_some());
    }

    #[test]
    fn test_surface_insets_offset_content() {
        let mut surface = RasterSurface::new(Size::new(6, 6)).with_insets(Insets::new(1, 1, 1, 1));
        surface.set_visible(true);
        assert_eq!(surface.content_size(), Size::new(4, 4));
        if let Some(mut g) = surface.graphics() {
            g.set_color(Color::RED);
            g.fill_rect(Rect::new(0, 0, 100, 100));
        }
        assert_eq!(surface.pixel(0, 0), Some(Color::TRANSPARENT));
        assert_eq!(surface.pixel(1, 1), Some(Color::RED));
        assert_eq!(surface.pixel(5, 5), Some(Color::TRANSPARENT));
    }

    #[test]
    fn test_offscreen_fits() {
        let buffer = Offscreen::new(Size::new(10, 8));
        assert!(buffer.fits(Size::new(10, 8)));
        assert!(buffer.fits(Size::new(3, 3)));
        assert!(!buffer.fits(Size::new(11, 8)));
    }
}
