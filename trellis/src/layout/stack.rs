//! Stack layout: every child covers the whole container.

use super::size::{largest, tightest, SizeKind};
use super::{LayoutManager, LayoutPass};
use crate::component::{ComponentId, ComponentTree};
use crate::primitives::{Rect, Size};

/// Overlays all visible children, each sized to the container. Later
/// children paint on top of earlier ones.
#[derive(Debug, Clone, Copy, Default)]
pub struct StackLayout;

impl StackLayout {
    fn visible_sizes(
        tree: &ComponentTree,
        container: ComponentId,
        kind: SizeKind,
    ) -> impl Iterator<Item = Size> + '_ {
        tree.child_components(container)
            .filter(|(_, component)| component.is_visible())
            .map(move |(_, component)| kind.of(component))
    }
}

impl LayoutManager for StackLayout {
    fn prepare(&self, tree: &ComponentTree, container: ComponentId) -> LayoutPass {
        let mut pass = LayoutPass::new(container);
        let bounds = match tree.component(container) {
            Ok(component) => Rect::from_size(component.size()),
            Err(_) => return pass,
        };
        for (child, component) in tree.child_components(container) {
            if component.is_visible() {
                pass.place(child, Some(bounds));
            }
        }
        pass
    }

    fn minimum_size(&self, tree: &ComponentTree, container: ComponentId) -> Size {
        largest(Self::visible_sizes(tree, container, SizeKind::Minimum))
    }

    fn preferred_size(&self, tree: &ComponentTree, container: ComponentId) -> Size {
        largest(Self::visible_sizes(tree, container, SizeKind::Preferred))
    }

    fn maximum_size(&self, tree: &ComponentTree, container: ComponentId) -> Size {
        tightest(Self::visible_sizes(tree, container, SizeKind::Maximum))
    }
}
