//! Frame layout: a label notched into a border around a content area.

use super::absolute::AbsoluteLayout;
use super::size::SizeKind;
use super::{LayoutManager, LayoutPass};
use crate::component::{ComponentId, ComponentTree};
use crate::primitives::{Point, Rect, Size};

/// Width of the border band around the content area.
pub const BORDER: i32 = 7;

/// Places a frame's label at `(7, 0)` with its preferred size and the
/// content area below it, inset by [`BORDER`] on the other three sides.
///
/// Any other child goes through the secondary layout, or is placed
/// absolutely when there is none.
#[derive(Debug)]
pub struct FrameLayout {
    label: ComponentId,
    content: ComponentId,
    secondary: Option<Box<dyn LayoutManager>>,
}

impl FrameLayout {
    pub fn new(label: ComponentId, content: ComponentId) -> Self {
        Self {
            label,
            content,
            secondary: None,
        }
    }

    /// Route children other than the label and content through `layout`.
    pub fn with_secondary(mut self, layout: impl LayoutManager + 'static) -> Self {
        self.secondary = Some(Box::new(layout));
        self
    }

    pub fn label(&self) -> ComponentId {
        self.label
    }

    pub fn content(&self) -> ComponentId {
        self.content
    }

    pub fn secondary(&self) -> Option<&dyn LayoutManager> {
        self.secondary.as_deref()
    }

    fn label_rect(&self, tree: &ComponentTree) -> Option<Rect> {
        let label = tree.component(self.label).ok()?;
        if !label.is_visible() {
            return None;
        }
        Rect::from_origin_size(Point::new(BORDER, 0), label.preferred_size()).non_empty()
    }

    fn content_rect(&self, tree: &ComponentTree, container: ComponentId, label: Option<Rect>) -> Option<Rect> {
        let size = tree.component(container).ok()?.size();
        let y = label.map_or(BORDER, |label| label.height);
        Rect::new(BORDER, y, size.width - 2 * BORDER, size.height - y - BORDER).non_empty()
    }

    fn negotiate(&self, tree: &ComponentTree, kind: SizeKind) -> Size {
        let size_of = |id| {
            tree.component(id)
                .ok()
                .filter(|component| component.is_visible())
                .map_or(Size::ZERO, |component| kind.of(component))
        };
        let label = size_of(self.label);
        let content = size_of(self.content);
        let top = if label.is_empty() { BORDER } else { label.height };
        Size::new(
            label.width.max(content.width).saturating_add(2 * BORDER),
            content.height.saturating_add(top).saturating_add(BORDER),
        )
    }
}

impl LayoutManager for FrameLayout {
    fn prepare(&self, tree: &ComponentTree, container: ComponentId) -> LayoutPass {
        let mut pass = LayoutPass::new(container);
        let label = self.label_rect(tree);
        let others = match &self.secondary {
            Some(secondary) => secondary.prepare(tree, container),
            None => AbsoluteLayout.prepare(tree, container),
        };

        for (child, component) in tree.child_components(container) {
            if !component.is_visible() {
                continue;
            }
            let rect = if child == self.label {
                label
            } else if child == self.content {
                self.content_rect(tree, container, label)
            } else {
                others.get(child)
            };
            pass.place(child, rect);
        }
        others.done();
        pass
    }

    fn minimum_size(&self, tree: &ComponentTree, _container: ComponentId) -> Size {
        self.negotiate(tree, SizeKind::Minimum)
    }

    fn preferred_size(&self, tree: &ComponentTree, _container: ComponentId) -> Size {
        self.negotiate(tree, SizeKind::Preferred)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> (ComponentTree, ComponentId, ComponentId, ComponentId) {
        let mut tree = ComponentTree::new();
        let frame = tree.add("frame");
        let label = tree.add_child(frame, "label").unwrap();
        let content = tree.add_child(frame, "content").unwrap();
        tree.component_mut(frame).unwrap().resize(Size::new(100, 60));
        tree.component_mut(label).unwrap().set_preferred_size(Size::new(30, 12));
        tree.set_layout(frame, FrameLayout::new(label, content)).unwrap();
        (tree, frame, label, content)
    }

    #[test]
    fn test_content_sits_below_label() {
        let (tree, frame, label, content) = frame();
        let pass = tree.prepare(frame).unwrap();
        assert_eq!(pass.get(label), Some(Rect::new(7, 0, 30, 12)));
        assert_eq!(pass.get(content), Some(Rect::new(7, 12, 86, 41)));
    }

    #[test]
    fn test_hidden_label_leaves_border_band() {
        let (mut tree, frame, label, content) = frame();
        tree.component_mut(label).unwrap().set_visible(false);
        let pass = tree.prepare(frame).unwrap();
        assert_eq!(pass.get(label), None);
        assert_eq!(pass.get(content), Some(Rect::new(7, 7, 86, 46)));
    }

    #[test]
    fn test_other_children_are_placed_absolutely() {
        let (mut tree, frame, _, _) = frame();
        let extra = tree.add_child(frame, "extra").unwrap();
        tree.component_mut(extra).unwrap().set_constraint(Point::new(50, 40));
        let pass = tree.prepare(frame).unwrap();
        assert_eq!(pass.get(extra), Some(Rect::new(50, 40, 16, 16)));
    }

    #[test]
    fn test_preferred_size_wraps_label_and_content() {
        let (mut tree, frame, _, content) = frame();
        tree.component_mut(content).unwrap().set_preferred_size(Size::new(20, 20));
        let size = tree.layout_preferred_size(frame).unwrap();
        assert_eq!(size, Size::new(44, 39));
    }
}
