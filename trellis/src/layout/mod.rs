//! Layout System for Trellis
//!
//! A container delegates child placement to a [`LayoutManager`]. Placement
//! is bracketed: `prepare` computes every child's rectangle for the
//! container's current size and returns a [`LayoutPass`] holding them, the
//! pass answers per-child queries, and `done` (or dropping the pass) ends
//! the bracket.
//!
//! # Architecture
//!
//! ```text
//! prepare(container) -> LayoutPass --get(child)--> Option<Rect> --done()
//! ```
//!
//! Managers only read the tree. Applying a placement to the child's size is
//! the tree's job ([`ComponentTree::locate_in`]), so a manager can be asked
//! hypothetical questions without side effects.
//!
//! [`ComponentTree::locate_in`]: crate::ComponentTree::locate_in

pub mod absolute;
pub mod dock;
pub mod flow;
pub mod frame;
pub mod line;
pub mod margin;
pub mod size;
pub mod stack;

pub use absolute::AbsoluteLayout;
pub use dock::{DockConstraint, DockLayout, Edge};
pub use flow::{FlowAlignment, FlowLayout};
pub use frame::FrameLayout;
pub use line::{LineLayout, Orientation};
pub use margin::MarginLayout;
pub use stack::StackLayout;

use std::collections::HashMap;
use std::fmt;

use crate::component::{ComponentId, ComponentTree};
use crate::primitives::{Rect, Size};

/// Placement policy of a container.
///
/// Implementations must be pure with respect to the tree: everything they
/// compute is returned, never written back.
pub trait LayoutManager: fmt::Debug {
    /// Compute the placement of every child of `container` at its current
    /// size.
    fn prepare(&self, tree: &ComponentTree, container: ComponentId) -> LayoutPass;

    /// Rectangle of a single child, bracketing its own pass.
    fn locate(&self, tree: &ComponentTree, container: ComponentId, child: ComponentId) -> Option<Rect> {
        let pass = self.prepare(tree, container);
        let rect = pass.get(child);
        pass.done();
        rect
    }

    /// Smallest container size the children can live with.
    fn minimum_size(&self, tree: &ComponentTree, container: ComponentId) -> Size;

    /// Container size at which every child gets its preferred size.
    fn preferred_size(&self, tree: &ComponentTree, container: ComponentId) -> Size;

    /// Largest useful container size; [`Size::UNBOUNDED`] when there is none.
    fn maximum_size(&self, _tree: &ComponentTree, _container: ComponentId) -> Size {
        Size::UNBOUNDED
    }
}

/// Transient placement state of one layout pass.
///
/// Only non-empty rectangles are stored; a child without an entry is not
/// placed and must not be painted.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutPass {
    container: ComponentId,
    placements: HashMap<ComponentId, Rect>,
}

impl LayoutPass {
    pub fn new(container: ComponentId) -> Self {
        Self {
            container,
            placements: HashMap::new(),
        }
    }

    /// The container this pass was prepared for.
    pub fn container(&self) -> ComponentId {
        self.container
    }

    /// Record (or replace) the placement of `child`. Empty or missing
    /// rectangles clear any earlier placement.
    pub fn place(&mut self, child: ComponentId, rect: Option<Rect>) {
        match rect.and_then(Rect::non_empty) {
            Some(rect) => {
                self.placements.insert(child, rect);
            }
            None => {
                self.placements.remove(&child);
            }
        }
    }

    pub fn get(&self, child: ComponentId) -> Option<Rect> {
        self.placements.get(&child).copied()
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ComponentId, Rect)> + '_ {
        self.placements.iter().map(|(&id, &rect)| (id, rect))
    }

    /// End the pass and release its state.
    pub fn done(self) {
        tracing::trace!(container = %self.container, placed = self.placements.len(), "layout pass done");
    }
}
