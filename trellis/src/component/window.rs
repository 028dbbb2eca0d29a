//! A root component bound to a host surface.

use super::{ComponentId, ComponentTree};
use crate::error::Result;
use crate::graphics::Surface;
use crate::primitives::{Rect, Size};

/// Top-level window: owns the tree, the host surface and the root id.
#[derive(Debug)]
pub struct Window<S: Surface> {
    surface: S,
    tree: ComponentTree,
    root: ComponentId,
}

impl<S: Surface> Window<S> {
    /// Bind `root` to `surface`, sizing the root to the surface's content
    /// area.
    pub fn new(surface: S, mut tree: ComponentTree, root: ComponentId) -> Result<Self> {
        tree.resize(root, surface.content_size())?;
        Ok(Self { surface, tree, root })
    }

    pub fn root(&self) -> ComponentId {
        self.root
    }

    pub fn tree(&self) -> &ComponentTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut ComponentTree {
        &mut self.tree
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn title(&self) -> &str {
        self.surface.title()
    }

    pub fn set_title(&mut self, title: &str) {
        self.surface.set_title(title);
    }

    pub fn is_visible(&self) -> bool {
        self.surface.is_visible()
    }

    /// Show or hide the surface. Showing it paints the whole tree.
    pub fn set_visible(&mut self, visible: bool) -> Result<()> {
        let was_visible = self.surface.is_visible();
        self.surface.set_visible(visible);
        if visible && !was_visible {
            self.repaint()?;
        }
        Ok(())
    }

    /// Resize the surface, fit the root to its new content area and
    /// repaint.
    pub fn resize(&mut self, size: Size) -> Result<()> {
        self.surface.resize(size);
        let content = self.surface.content_size();
        tracing::debug!(?size, ?content, "window resized");
        self.tree.resize(self.root, content)?;
        self.repaint()
    }

    /// Paint the whole tree.
    pub fn repaint(&mut self) -> Result<()> {
        self.tree.sync(self.root, &mut self.surface)
    }

    pub fn sync(&mut self, id: ComponentId) -> Result<()> {
        self.tree.sync(id, &mut self.surface)
    }

    pub fn sync_area(&mut self, id: ComponentId, area: Rect) -> Result<()> {
        self.tree.sync_area(id, Some(area), &mut self.surface)
    }

    pub fn into_parts(self) -> (S, ComponentTree, ComponentId) {
        (self.surface, self.tree, self.root)
    }
}
