//! Margin layout: a stack inset by fixed margins.

use super::size::{largest, tightest, SizeKind};
use super::{LayoutManager, LayoutPass};
use crate::component::{ComponentId, ComponentTree};
use crate::primitives::{Rect, Size};

/// Places every visible child in the container rectangle shrunk by the
/// margins. When the margins do not fit, children get the whole container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarginLayout {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl MarginLayout {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self { left, top, right, bottom }
    }

    pub const fn uniform(margin: i32) -> Self {
        Self::new(margin, margin, margin, margin)
    }

    /// The rectangle children occupy inside a container of `size`.
    pub fn inner_rect(&self, size: Size) -> Rect {
        let inner = Rect::new(
            self.left,
            self.top,
            size.width - self.left - self.right,
            size.height - self.top - self.bottom,
        );
        if inner.width < 0 || inner.height < 0 {
            Rect::from_size(size)
        } else {
            inner
        }
    }

    fn horizontal(&self) -> i32 {
        self.left.saturating_add(self.right)
    }

    fn vertical(&self) -> i32 {
        self.top.saturating_add(self.bottom)
    }

    fn sizes(
        tree: &ComponentTree,
        container: ComponentId,
        kind: SizeKind,
    ) -> impl Iterator<Item = Size> + '_ {
        tree.child_components(container)
            .filter(|(_, component)| component.is_visible())
            .map(move |(_, component)| kind.of(component))
    }
}

impl LayoutManager for MarginLayout {
    fn prepare(&self, tree: &ComponentTree, container: ComponentId) -> LayoutPass {
        let mut pass = LayoutPass::new(container);
        let Ok(component) = tree.component(container) else {
            return pass;
        };
        let inner = self.inner_rect(component.size());
        for (child, component) in tree.child_components(container) {
            if component.is_visible() {
                pass.place(child, Some(inner));
            }
        }
        pass
    }

    fn minimum_size(&self, tree: &ComponentTree, container: ComponentId) -> Size {
        largest(Self::sizes(tree, container, SizeKind::Minimum))
            .expand(self.horizontal(), self.vertical())
    }

    fn preferred_size(&self, tree: &ComponentTree, container: ComponentId) -> Size {
        largest(Self::sizes(tree, container, SizeKind::Preferred))
            .expand(self.horizontal(), self.vertical())
    }

    fn maximum_size(&self, tree: &ComponentTree, container: ComponentId) -> Size {
        tightest(Self::sizes(tree, container, SizeKind::Maximum))
            .expand(self.horizontal(), self.vertical())
    }
}
