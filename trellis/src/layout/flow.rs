//! Flow Layout - wrapping rows of preferred-size children.
//!
//! Children are laid out left to right at their preferred size until the
//! next one would overflow the container width, then wrap to a new line.
//! Each line is as tall as its tallest child; shorter children are stretched
//! to the line height up to their maximum height.

use super::size::{distribute, largest, tightest, SizeKind};
use super::{LayoutManager, LayoutPass};
use crate::component::{ComponentId, ComponentTree};
use crate::primitives::{Rect, Size, UNBOUNDED};

/// How leftover width on a line is used.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FlowAlignment {
    /// Pack children at the left edge.
    #[default]
    Left,
    /// Pack children at the right edge.
    Right,
    /// Grow children up to their maximum width, then widen the gaps.
    Justify,
}

// =========================================================================
// FlowLayout
// =========================================================================

/// Wrapping row layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlowLayout {
    alignment: FlowAlignment,
    /// Horizontal gap between children on a line.
    spacing: i32,
    /// Vertical gap between lines.
    line_spacing: i32,
}

/// A child placed on the line being built.
#[derive(Debug)]
struct Item {
    child: ComponentId,
    rect: Rect,
    maximum: Size,
}

impl FlowLayout {
    /// Left-aligned flow without gaps.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alignment(mut self, alignment: FlowAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Set horizontal spacing between children.
    pub fn spacing(mut self, spacing: i32) -> Self {
        self.spacing = spacing;
        self
    }

    /// Set vertical spacing between lines.
    pub fn line_spacing(mut self, line_spacing: i32) -> Self {
        self.line_spacing = line_spacing;
        self
    }

    /// Distribute `slack` pixels of leftover line width.
    fn align(&self, line: &mut [Item], mut slack: i32) {
        match self.alignment {
            FlowAlignment::Left => {}
            FlowAlignment::Right => {
                for item in line.iter_mut() {
                    item.rect.x += slack;
                }
            }
            FlowAlignment::Justify => {
                let mut widths: Vec<i32> = line.iter().map(|item| item.rect.width).collect();
                let maxima: Vec<i32> = line.iter().map(|item| item.maximum.width).collect();
                slack = distribute(&mut widths, &maxima, slack);

                let mut x = 0;
                for (item, width) in line.iter_mut().zip(widths) {
                    item.rect.x = x;
                    item.rect.width = width;
                    x += item.rect.width + self.spacing;
                }

                // Whatever is left widens the gaps, front gaps first.
                if slack > 0 {
                    match line.len() {
                        0 => {}
                        1 => line[0].rect.width += slack,
                        _ => {
                            let gaps = line.len() as i32 - 1;
                            let (increment, remainder) = (slack / gaps, slack % gaps);
                            let mut offset = 0;
                            for (j, item) in line.iter_mut().enumerate().skip(1) {
                                offset += increment + i32::from(j as i32 <= remainder);
                                item.rect.x += offset;
                            }
                        }
                    }
                }
            }
        }
    }

    fn place_line(&self, pass: &mut LayoutPass, line: &mut Vec<Item>, width: i32, used: i32) -> i32 {
        let slack = width - (used - self.spacing);
        if !line.is_empty() && slack > 0 {
            self.align(line, slack);
        }
        let height = line.iter().map(|item| item.rect.height).max().unwrap_or(0);
        for item in line.drain(..) {
            let rect = Rect {
                height: height.min(item.maximum.height),
                ..item.rect
            };
            pass.place(item.child, Some(rect));
        }
        height
    }
}

impl LayoutManager for FlowLayout {
    fn prepare(&self, tree: &ComponentTree, container: ComponentId) -> LayoutPass {
        let mut pass = LayoutPass::new(container);
        let Ok(parent) = tree.component(container) else {
            return pass;
        };
        let width = parent.size().width;

        let mut line: Vec<Item> = Vec::new();
        let mut used = 0;
        let mut y = 0;
        for (child, component) in tree.child_components(container) {
            if !component.is_visible() {
                continue;
            }
            let preferred = component.preferred_size();
            // A child wider than the container still gets a line of its own.
            if !line.is_empty() && used + preferred.width > width {
                let height = self.place_line(&mut pass, &mut line, width, used);
                y += height + self.line_spacing;
                used = 0;
            }
            line.push(Item {
                child,
                rect: Rect::new(used, y, preferred.width, preferred.height),
                maximum: component.maximum_or_unbounded(),
            });
            used += preferred.width + self.spacing;
        }
        self.place_line(&mut pass, &mut line, width, used);
        pass
    }

    /// Children can always wrap, but the layout reports the single-line
    /// size as its minimum.
    fn minimum_size(&self, tree: &ComponentTree, container: ComponentId) -> Size {
        self.preferred_size(tree, container)
    }

    fn preferred_size(&self, tree: &ComponentTree, container: ComponentId) -> Size {
        let sizes: Vec<Size> = tree
            .child_components(container)
            .filter(|(_, component)| component.is_visible())
            .map(|(_, component)| component.preferred_size())
            .collect();
        let gaps = self.spacing.saturating_mul((sizes.len() as i32 - 1).max(0));
        let width = sizes.iter().fold(gaps, |width, size| width.saturating_add(size.width));
        Size::new(width, largest(sizes).height)
    }

    fn maximum_size(&self, tree: &ComponentTree, container: ComponentId) -> Size {
        if self.alignment != FlowAlignment::Justify {
            return self.preferred_size(tree, container);
        }
        let maxima: Vec<Size> = tree
            .child_components(container)
            .filter(|(_, component)| component.is_visible())
            .map(|(_, component)| SizeKind::Maximum.of(component))
            .collect();
        let gaps = self.spacing.saturating_mul((maxima.len() as i32 - 1).max(0));
        let width = if maxima.iter().any(|size| size.width == UNBOUNDED) {
            UNBOUNDED
        } else {
            maxima.iter().fold(gaps, |width, size| width.saturating_add(size.width))
        };
        Size::new(width, tightest(maxima).height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flow(layout: FlowLayout, width: i32, children: &[Size]) -> (ComponentTree, ComponentId, Vec<Rect>) {
        let mut tree = ComponentTree::new();
        let root = tree.add("flow");
        tree.component_mut(root).unwrap().resize(Size::new(width, 100));
        tree.set_layout(root, layout).unwrap();
        let ids: Vec<ComponentId> = children
            .iter()
            .map(|&size| {
                let id = tree.add_child(root, "item").unwrap();
                tree.component_mut(id).unwrap().set_preferred_size(size);
                id
            })
            .collect();
        let pass = layout.prepare(&tree, root);
        let rects = ids.iter().filter_map(|&id| pass.get(id)).collect();
        (tree, root, rects)
    }

    #[test]
    fn test_wraps_and_stretches_to_line_height() {
        let layout = FlowLayout::new().spacing(2).line_spacing(3);
        let (_, _, rects) = flow(layout, 30, &[Size::new(10, 5), Size::new(10, 8), Size::new(10, 4)]);
        assert_eq!(
            rects,
            vec![Rect::new(0, 0, 10, 8), Rect::new(12, 0, 10, 8), Rect::new(0, 11, 10, 4)]
        );
    }

    #[test]
    fn test_right_alignment_shifts_line() {
        let layout = FlowLayout::new().alignment(FlowAlignment::Right).spacing(2);
        let (_, _, rects) = flow(layout, 30, &[Size::new(10, 5), Size::new(10, 5)]);
        assert_eq!(rects, vec![Rect::new(8, 0, 10, 5), Rect::new(20, 0, 10, 5)]);
    }

    #[test]
    fn test_justify_grows_children() {
        let layout = FlowLayout::new().alignment(FlowAlignment::Justify).spacing(2);
        let (_, _, rects) = flow(layout, 30, &[Size::new(10, 5), Size::new(10, 5)]);
        assert_eq!(rects, vec![Rect::new(0, 0, 14, 5), Rect::new(16, 0, 14, 5)]);
    }

    #[test]
    fn test_oversized_child_gets_own_line() {
        let (_, _, rects) = flow(FlowLayout::new(), 10, &[Size::new(25, 5), Size::new(5, 5)]);
        assert_eq!(rects, vec![Rect::new(0, 0, 25, 5), Rect::new(0, 5, 5, 5)]);
    }

    #[test]
    fn test_preferred_size_is_single_line() {
        let layout = FlowLayout::new().spacing(4);
        let (tree, root, _) = flow(layout, 10, &[Size::new(10, 5), Size::new(20, 7)]);
        assert_eq!(layout.preferred_size(&tree, root), Size::new(34, 7));
    }
}
