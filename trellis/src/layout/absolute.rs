//! Absolute placement: the layout of containers without a manager.

use super::size::SizeKind;
use super::{LayoutManager, LayoutPass};
use crate::component::{ComponentId, ComponentTree, Constraint};
use crate::primitives::{Point, Rect, Size};

/// Places each visible child at its [`Constraint::Point`] (or the origin)
/// with its preferred size.
#[derive(Debug, Clone, Copy, Default)]
pub struct AbsoluteLayout;

impl AbsoluteLayout {
    fn origin_of(constraint: &Constraint) -> Point {
        match constraint {
            Constraint::Point(point) => *point,
            _ => Point::ORIGIN,
        }
    }

    /// Bottom-right extent of all visible children at the given size kind.
    fn extent(tree: &ComponentTree, container: ComponentId, kind: SizeKind) -> Size {
        tree.child_components(container)
            .filter(|(_, component)| component.is_visible())
            .fold(Size::ZERO, |extent, (_, component)| {
                let origin = Self::origin_of(component.constraint());
                let size = kind.of(component);
                extent.max(Size::new(origin.x, origin.y).expand(size.width, size.height))
            })
    }
}

impl LayoutManager for AbsoluteLayout {
    fn prepare(&self, tree: &ComponentTree, container: ComponentId) -> LayoutPass {
        let mut pass = LayoutPass::new(container);
        for (child, component) in tree.child_components(container) {
            if !component.is_visible() {
                continue;
            }
            let origin = Self::origin_of(component.constraint());
            pass.place(child, Some(Rect::from_origin_size(origin, component.preferred_size())));
        }
        pass
    }

    fn minimum_size(&self, tree: &ComponentTree, container: ComponentId) -> Size {
        Self::extent(tree, container, SizeKind::Minimum)
    }

    fn preferred_size(&self, tree: &ComponentTree, container: ComponentId) -> Size {
        Self::extent(tree, container, SizeKind::Preferred)
    }
}
