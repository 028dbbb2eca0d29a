//! The component arena, layout bracketing, painting and synchronisation.

use indextree::{Arena, NodeError};

use super::{Component, ComponentId, Constraint};
use crate::config::ComponentDefaults;
use crate::error::{Error, Result};
use crate::graphics::{Graphics, Offscreen, Surface};
use crate::layout::{AbsoluteLayout, LayoutManager, LayoutPass};
use crate::primitives::{Point, Rect, Size};

/// Placement used by containers that have no layout manager.
static DEFAULT_LAYOUT: AbsoluteLayout = AbsoluteLayout;

/// Owner of all components.
///
/// Every operation addresses components by [`ComponentId`]; ids of removed
/// components are rejected with [`Error::UnknownComponent`].
#[derive(Debug, Default)]
pub struct ComponentTree {
    arena: Arena<Component>,
    defaults: ComponentDefaults,
}

impl ComponentTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// A tree whose new components start from `defaults`.
    pub fn with_defaults(defaults: ComponentDefaults) -> Self {
        Self {
            arena: Arena::new(),
            defaults,
        }
    }

    pub fn defaults(&self) -> &ComponentDefaults {
        &self.defaults
    }

    // ========================================================================
    // Structure
    // ========================================================================

    /// Create an unattached component.
    pub fn add(&mut self, name: impl Into<String>) -> ComponentId {
        let component = Component::new(name.into(), &self.defaults);
        ComponentId(self.arena.new_node(component))
    }

    /// Create an unattached component and let `init` configure it.
    pub fn add_with(&mut self, name: impl Into<String>, init: impl FnOnce(&mut Component)) -> ComponentId {
        let id = self.add(name);
        if let Ok(component) = self.component_mut(id) {
            init(component);
        }
        id
    }

    /// Create a component and append it to `parent`.
    pub fn add_child(&mut self, parent: ComponentId, name: impl Into<String>) -> Result<ComponentId> {
        self.component(parent)?;
        let child = self.add(name);
        self.append_child(parent, child)?;
        Ok(child)
    }

    /// Whether `id` refers to a live component.
    pub fn contains(&self, id: ComponentId) -> bool {
        self.arena.get(id.0).is_some_and(|node| !node.is_removed())
    }

    pub fn component(&self, id: ComponentId) -> Result<&Component> {
        match self.arena.get(id.0) {
            Some(node) if !node.is_removed() => Ok(node.get()),
            _ => Err(Error::UnknownComponent(id)),
        }
    }

    pub fn component_mut(&mut self, id: ComponentId) -> Result<&mut Component> {
        match self.arena.get_mut(id.0) {
            Some(node) if !node.is_removed() => Ok(node.get_mut()),
            _ => Err(Error::UnknownComponent(id)),
        }
    }

    pub fn parent(&self, id: ComponentId) -> Option<ComponentId> {
        self.arena
            .get(id.0)
            .filter(|node| !node.is_removed())
            .and_then(|node| node.parent())
            .map(ComponentId)
    }

    /// Children of `id` in paint order. Empty for unknown ids.
    pub fn children(&self, id: ComponentId) -> impl Iterator<Item = ComponentId> + '_ {
        let live = self.contains(id);
        id.0.children(&self.arena)
            .filter(move |_| live)
            .map(ComponentId)
    }

    /// Children of `id` together with their data.
    pub fn child_components(&self, id: ComponentId) -> impl Iterator<Item = (ComponentId, &Component)> + '_ {
        self.children(id).filter_map(move |child| {
            self.component(child).ok().map(|component| (child, component))
        })
    }

    /// `id` followed by its parent, grandparent and so on.
    pub fn ancestors(&self, id: ComponentId) -> impl Iterator<Item = ComponentId> + '_ {
        let live = self.contains(id);
        id.0.ancestors(&self.arena)
            .filter(move |_| live)
            .map(ComponentId)
    }

    /// Append `child` as the last child of `parent`, detaching it from any
    /// previous parent.
    pub fn append_child(&mut self, parent: ComponentId, child: ComponentId) -> Result<()> {
        self.component(parent)?;
        self.component(child)?;
        parent.0.checked_append(child.0, &mut self.arena)?;
        tracing::trace!(%parent, %child, "appended child");
        Ok(())
    }

    /// Insert `child` so it becomes the `index`-th child of `parent`.
    /// Indexes past the end append.
    pub fn insert_child(&mut self, parent: ComponentId, index: usize, child: ComponentId) -> Result<()> {
        self.component(parent)?;
        self.component(child)?;
        // Reject before detaching so a failed insert leaves the tree as it was.
        if child == parent {
            return Err(NodeError::AppendSelf.into());
        }
        if parent.0.ancestors(&self.arena).any(|node| node == child.0) {
            return Err(NodeError::AppendAncestor.into());
        }
        child.0.detach(&mut self.arena);
        match parent.0.children(&self.arena).nth(index) {
            Some(sibling) => sibling.checked_insert_before(child.0, &mut self.arena)?,
            None => parent.0.checked_append(child.0, &mut self.arena)?,
        }
        tracing::trace!(%parent, %child, index, "inserted child");
        Ok(())
    }

    /// Detach `child` from `parent`. The child and its subtree stay alive and
    /// can be attached elsewhere.
    pub fn remove_child(&mut self, parent: ComponentId, child: ComponentId) -> Result<()> {
        self.component(parent)?;
        self.component(child)?;
        if self.parent(child) != Some(parent) {
            return Err(Error::NotAChild { parent, child });
        }
        child.0.detach(&mut self.arena);
        tracing::trace!(%parent, %child, "removed child");
        Ok(())
    }

    /// Destroy `id` and its whole subtree.
    pub fn remove(&mut self, id: ComponentId) -> Result<()> {
        self.component(id)?;
        id.0.remove_subtree(&mut self.arena);
        Ok(())
    }

    /// Number of live components.
    pub fn len(&self) -> usize {
        self.arena.iter().filter(|node| !node.is_removed()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // ========================================================================
    // Attributes
    // ========================================================================

    pub fn set_layout(&mut self, id: ComponentId, layout: impl LayoutManager + 'static) -> Result<()> {
        self.component_mut(id)?.layout = Some(Box::new(layout));
        Ok(())
    }

    /// Remove the layout manager, returning to absolute placement.
    pub fn clear_layout(&mut self, id: ComponentId) -> Result<Option<Box<dyn LayoutManager>>> {
        Ok(self.component_mut(id)?.layout.take())
    }

    pub fn set_constraint(&mut self, id: ComponentId, constraint: impl Into<Constraint>) -> Result<()> {
        self.component_mut(id)?.set_constraint(constraint);
        Ok(())
    }

    pub fn resize(&mut self, id: ComponentId, size: Size) -> Result<()> {
        self.component_mut(id)?.resize(size);
        Ok(())
    }

    // ========================================================================
    // Layout
    // ========================================================================

    /// The layout manager of `container`, or the absolute default.
    pub fn layout_of(&self, container: ComponentId) -> Result<&dyn LayoutManager> {
        let component = self.component(container)?;
        Ok(component.layout.as_deref().unwrap_or(&DEFAULT_LAYOUT))
    }

    /// Open a layout bracket over the children of `container`.
    pub fn prepare(&self, container: ComponentId) -> Result<LayoutPass> {
        let layout = self.layout_of(container)?;
        let pass = layout.prepare(self, container);
        tracing::trace!(%container, placed = pass.len(), "layout pass prepared");
        Ok(pass)
    }

    /// Where `child` would be placed, without touching its size.
    pub fn placement(&self, container: ComponentId, child: ComponentId) -> Result<Option<Rect>> {
        self.component(child)?;
        Ok(self.layout_of(container)?.locate(self, container, child))
    }

    /// Locate `child` in its own layout bracket and size it to the result.
    pub fn locate_child(&mut self, container: ComponentId, child: ComponentId) -> Result<Option<Rect>> {
        let pass = self.prepare(container)?;
        let rect = self.locate_in(&pass, child);
        pass.done();
        rect
    }

    /// Look `child` up in an open bracket and size it to the result.
    ///
    /// A child without a placement keeps its size.
    pub fn locate_in(&mut self, pass: &LayoutPass, child: ComponentId) -> Result<Option<Rect>> {
        let rect = pass.get(child);
        let component = self.component_mut(child)?;
        if let Some(rect) = rect {
            component.size = rect.size();
        }
        Ok(rect)
    }

    pub fn layout_minimum_size(&self, container: ComponentId) -> Result<Size> {
        Ok(self.layout_of(container)?.minimum_size(self, container))
    }

    pub fn layout_preferred_size(&self, container: ComponentId) -> Result<Size> {
        Ok(self.layout_of(container)?.preferred_size(self, container))
    }

    pub fn layout_maximum_size(&self, container: ComponentId) -> Result<Size> {
        Ok(self.layout_of(container)?.maximum_size(self, container))
    }

    /// Set the preferred size of `container` to what its layout asks for.
    pub fn pack(&mut self, container: ComponentId) -> Result<Size> {
        let size = self.layout_preferred_size(container)?;
        self.component_mut(container)?.preferred_size = size;
        Ok(size)
    }

    // ========================================================================
    // Painting
    // ========================================================================

    /// Paint `id` and its subtree into `g`, whose origin is the component's
    /// top-left corner.
    ///
    /// Double-buffered components paint into their offscreen buffer first and
    /// blit it, clipped to their size. The buffer is reused while it is large
    /// enough.
    pub fn paint(&mut self, id: ComponentId, g: &mut dyn Graphics) -> Result<()> {
        let component = self.component_mut(id)?;
        if !component.double_buffered {
            return self.paint_unbuffered(id, g);
        }

        let size = component.size;
        let mut buffer = match component.buffer.take() {
            Some(mut buffer) if buffer.fits(size) => {
                buffer.clear();
                buffer
            }
            previous => {
                tracing::debug!(
                    component = %id,
                    ?size,
                    previous = ?previous.as_ref().map(Offscreen::size),
                    "allocating offscreen buffer"
                );
                Offscreen::new(size)
            }
        };

        let painted = {
            let mut offscreen = buffer.graphics();
            self.paint_unbuffered(id, &mut offscreen)
        };
        if painted.is_ok() {
            let mut target = g.create(Rect::from_size(size));
            target.draw_image(buffer.image(), Point::ORIGIN);
        }
        self.component_mut(id)?.buffer = Some(buffer);
        painted
    }

    /// Background, skin, then children.
    fn paint_unbuffered(&mut self, id: ComponentId, g: &mut dyn Graphics) -> Result<()> {
        let component = self.component(id)?;
        g.set_color(component.background);
        g.fill_rect(Rect::from_size(component.size));
        component.skin.paint(self, id, g)?;
        self.paint_children(id, g)
    }

    /// Paint every placed child of `id` in its own derived context.
    pub fn paint_children(&mut self, id: ComponentId, g: &mut dyn Graphics) -> Result<()> {
        let pass = self.prepare(id)?;
        let children: Vec<ComponentId> = self.children(id).collect();
        for child in children {
            let Some(rect) = self.locate_in(&pass, child)? else {
                tracing::trace!(parent = %id, %child, "child not placed, skipping");
                continue;
            };
            let mut child_g = g.create(rect);
            self.paint(child, child_g.as_mut())?;
        }
        pass.done();
        Ok(())
    }

    // ========================================================================
    // Synchronisation
    // ========================================================================

    /// Repaint `id` onto the surface.
    pub fn sync(&mut self, id: ComponentId, surface: &mut dyn Surface) -> Result<()> {
        self.sync_area(id, None, surface)
    }

    /// Repaint `area` of `id` (all of it for `None`) onto the surface.
    ///
    /// An opaque component repaints only its own rectangle. A translucent
    /// one has its parent repaint the covered area instead, so whatever shows
    /// through is redrawn. Nothing happens when some component on the way to
    /// the root is not placed, or the surface cannot be drawn on.
    pub fn sync_area(&mut self, id: ComponentId, area: Option<Rect>, surface: &mut dyn Surface) -> Result<()> {
        let area = area.filter(|area| area.width >= 0 && area.height >= 0);
        let opaque = self.component(id)?.background.is_opaque();

        if let (false, Some(parent)) = (opaque, self.parent(id)) {
            let Some(rect) = self.locate_child(parent, id)? else {
                tracing::debug!(component = %id, "translucent component not placed, nothing to sync");
                return Ok(());
            };
            let forwarded = match area {
                Some(area) => Rect::new(rect.x + area.x, rect.y + area.y, area.width, area.height),
                None => rect,
            };
            tracing::trace!(component = %id, %parent, area = %forwarded, "forwarding sync to parent");
            return self.sync_area(parent, Some(forwarded), surface);
        }

        // Rectangles of every link from `id` up to the root.
        let mut links = Vec::new();
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            match self.locate_child(parent, current)? {
                Some(rect) => links.push(rect),
                None => {
                    tracing::debug!(component = %id, unplaced = %current, "component not placed, nothing to sync");
                    return Ok(());
                }
            }
            current = parent;
        }

        let Some(mut g) = surface.graphics() else {
            tracing::debug!(component = %id, "surface not drawable, nothing to sync");
            return Ok(());
        };
        for rect in links.iter().rev() {
            g.clip(*rect);
            g.translate(rect.x, rect.y);
        }
        if let Some(area) = area {
            g.clip(area);
        }
        tracing::trace!(component = %id, ?area, "sync");
        self.paint(id, g.as_mut())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::{DisplayListSurface, DrawOp};
    use crate::primitives::Color;

    fn visible_surface(size: Size) -> DisplayListSurface {
        let mut surface = DisplayListSurface::new(size);
        surface.set_visible(true);
        surface
    }

    #[test]
    fn test_append_moves_between_parents() {
        let mut tree = ComponentTree::new();
        let a = tree.add("a");
        let b = tree.add("b");
        let child = tree.add_child(a, "child").unwrap();

        tree.append_child(b, child).unwrap();
        assert_eq!(tree.parent(child), Some(b));
        assert_eq!(tree.children(a).count(), 0);
        assert_eq!(tree.children(b).collect::<Vec<_>>(), vec![child]);
    }

    #[test]
    fn test_add_with_configures() {
        let mut tree = ComponentTree::new();
        let id = tree.add_with("blue", |c| {
            c.set_background(Color::BLUE);
            c.set_preferred_size(Size::new(40, 40));
        });
        let component = tree.component(id).unwrap();
        assert_eq!(component.name(), "blue");
        assert_eq!(component.background(), Color::BLUE);
        assert_eq!(component.preferred_size(), Size::new(40, 40));
    }

    #[test]
    fn test_insert_child_orders_siblings() {
        let mut tree = ComponentTree::new();
        let root = tree.add("root");
        let first = tree.add_child(root, "first").unwrap();
        let last = tree.add_child(root, "last").unwrap();
        let middle = tree.add("middle");

        tree.insert_child(root, 1, middle).unwrap();
        assert_eq!(tree.children(root).collect::<Vec<_>>(), vec![first, middle, last]);

        tree.insert_child(root, 0, last).unwrap();
        assert_eq!(tree.children(root).collect::<Vec<_>>(), vec![last, first, middle]);
    }

    #[test]
    fn test_cannot_append_ancestor() {
        let mut tree = ComponentTree::new();
        let root = tree.add("root");
        let child = tree.add_child(root, "child").unwrap();
        assert!(matches!(tree.append_child(child, root), Err(Error::Tree(_))));
    }

    #[test]
    fn test_failed_insert_keeps_old_parent() {
        let mut tree = ComponentTree::new();
        let root = tree.add("root");
        let a = tree.add_child(root, "a").unwrap();
        let b = tree.add_child(a, "b").unwrap();

        assert!(matches!(tree.insert_child(b, 0, a), Err(Error::Tree(NodeError::AppendAncestor))));
        assert!(matches!(tree.insert_child(a, 0, a), Err(Error::Tree(NodeError::AppendSelf))));
        assert_eq!(tree.parent(a), Some(root));
        assert_eq!(tree.children(root).collect::<Vec<_>>(), vec![a]);
        assert_eq!(tree.children(a).collect::<Vec<_>>(), vec![b]);
    }

    #[test]
    fn test_remove_child_requires_parent() {
        let mut tree = ComponentTree::new();
        let root = tree.add("root");
        let other = tree.add("other");
        let child = tree.add_child(root, "child").unwrap();

        assert!(matches!(
            tree.remove_child(other, child),
            Err(Error::NotAChild { .. })
        ));
        tree.remove_child(root, child).unwrap();
        assert_eq!(tree.parent(child), None);
        assert!(tree.contains(child));
    }

    #[test]
    fn test_removed_ids_are_rejected() {
        let mut tree = ComponentTree::new();
        let root = tree.add("root");
        let child = tree.add_child(root, "child").unwrap();
        tree.remove(root).unwrap();

        assert!(matches!(tree.component(child), Err(Error::UnknownComponent(_))));
        assert!(tree.is_empty());
    }

    #[test]
    fn test_locate_child_applies_size() {
        let mut tree = ComponentTree::new();
        let root = tree.add("root");
        let child = tree.add_child(root, "child").unwrap();
        tree.component_mut(child).unwrap().set_preferred_size(Size::new(30, 20));

        let rect = tree.locate_child(root, child).unwrap();
        assert_eq!(rect, Some(Rect::new(0, 0, 30, 20)));
        assert_eq!(tree.component(child).unwrap().size(), Size::new(30, 20));
    }

    #[test]
    fn test_unplaced_child_keeps_size() {
        let mut tree = ComponentTree::new();
        let root = tree.add("root");
        let child = tree.add_child(root, "child").unwrap();
        let component = tree.component_mut(child).unwrap();
        component.set_preferred_size(Size::new(0, 20));
        component.resize(Size::new(5, 5));

        assert_eq!(tree.locate_child(root, child).unwrap(), None);
        assert_eq!(tree.component(child).unwrap().size(), Size::new(5, 5));
    }

    #[test]
    fn test_paint_fills_background_then_children() {
        let mut tree = ComponentTree::new();
        let root = tree.add("root");
        tree.resize(root, Size::new(50, 50)).unwrap();
        let child = tree.add_child(root, "child").unwrap();
        tree.set_constraint(child, Point::new(10, 10)).unwrap();
        tree.component_mut(child).unwrap().set_background(Color::RED);

        let mut surface = visible_surface(Size::new(50, 50));
        tree.sync(root, &mut surface).unwrap();

        let ops = surface.list().ops();
        assert_eq!(ops.len(), 2);
        assert!(matches!(ops[0], DrawOp::FillRect { rect, .. } if rect == Rect::new(0, 0, 50, 50)));
        assert_eq!(surface.list().fills_of(Color::RED), vec![Rect::new(10, 10, 16, 16)]);
    }

    #[test]
    fn test_sync_on_hidden_surface_is_noop() {
        let mut tree = ComponentTree::new();
        let root = tree.add("root");
        let mut surface = DisplayListSurface::new(Size::new(10, 10));
        tree.sync(root, &mut surface).unwrap();
        assert!(surface.list().is_empty());
    }
}
