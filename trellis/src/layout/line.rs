//! Line layout: a single row or column.

use super::size::{clamp, distribute, SizeKind};
use super::{LayoutManager, LayoutPass};
use crate::component::{Component, ComponentId, ComponentTree};
use crate::primitives::{Rect, Size, UNBOUNDED};

/// Direction children are laid out in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Extent along the layout direction.
    #[inline]
    fn main(self, size: Size) -> i32 {
        match self {
            Orientation::Horizontal => size.width,
            Orientation::Vertical => size.height,
        }
    }

    /// Extent across the layout direction.
    #[inline]
    fn cross(self, size: Size) -> i32 {
        match self {
            Orientation::Horizontal => size.height,
            Orientation::Vertical => size.width,
        }
    }

    #[inline]
    fn size(self, main: i32, cross: i32) -> Size {
        match self {
            Orientation::Horizontal => Size::new(main, cross),
            Orientation::Vertical => Size::new(cross, main),
        }
    }

    #[inline]
    fn rect(self, position: i32, main: i32, cross: i32) -> Rect {
        match self {
            Orientation::Horizontal => Rect::new(position, 0, main, cross),
            Orientation::Vertical => Rect::new(0, position, cross, main),
        }
    }
}

/// Lays visible children out one after another with a fixed gap.
///
/// Children start at their preferred extent. Spare room grows them towards
/// their maximum, missing room shrinks them towards their minimum; whatever
/// still does not fit is cut off at the container's far edge. Across the
/// line, children fill the container up to their maximum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineLayout {
    orientation: Orientation,
    gap: i32,
}

impl LineLayout {
    pub fn new(orientation: Orientation, gap: i32) -> Self {
        Self { orientation, gap }
    }

    pub fn horizontal(gap: i32) -> Self {
        Self::new(Orientation::Horizontal, gap)
    }

    pub fn vertical(gap: i32) -> Self {
        Self::new(Orientation::Vertical, gap)
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn gap(&self) -> i32 {
        self.gap
    }

    fn visible<'t>(
        tree: &'t ComponentTree,
        container: ComponentId,
    ) -> impl Iterator<Item = (ComponentId, &'t Component)> + 't {
        tree.child_components(container)
            .filter(|(_, component)| component.is_visible())
    }

    fn gaps(&self, count: usize) -> i32 {
        self.gap.saturating_mul((count as i32 - 1).max(0))
    }

    /// Sum along the line, max (or min, for maxima) across it.
    fn combine(&self, tree: &ComponentTree, container: ComponentId, kind: SizeKind) -> Size {
        let sizes: Vec<Size> = Self::visible(tree, container)
            .map(|(_, component)| kind.of(component))
            .collect();
        let main = sizes
            .iter()
            .fold(self.gaps(sizes.len()), |sum, &size| {
                sum.saturating_add(self.orientation.main(size))
            });
        let cross = sizes.iter().map(|&size| self.orientation.cross(size));
        let cross = match kind {
            SizeKind::Maximum => cross.min().unwrap_or(UNBOUNDED),
            _ => cross.max().unwrap_or(0),
        };
        self.orientation.size(main, cross)
    }
}

impl LayoutManager for LineLayout {
    fn prepare(&self, tree: &ComponentTree, container: ComponentId) -> LayoutPass {
        let mut pass = LayoutPass::new(container);
        let Ok(parent) = tree.component(container) else {
            return pass;
        };
        let orientation = self.orientation;
        let available = orientation.main(parent.size());
        let depth = orientation.cross(parent.size());

        let children: Vec<(ComponentId, &Component)> = Self::visible(tree, container).collect();
        let mut extents: Vec<i32> = children
            .iter()
            .map(|(_, component)| orientation.main(component.preferred_size()))
            .collect();
        let used: i32 = extents.iter().sum::<i32>() + self.gaps(children.len());
        let spare = available - used;
        if spare > 0 {
            let maxima: Vec<i32> = children
                .iter()
                .map(|(_, component)| orientation.main(component.maximum_or_unbounded()))
                .collect();
            distribute(&mut extents, &maxima, spare);
        } else if spare < 0 {
            let minima: Vec<i32> = children
                .iter()
                .map(|(_, component)| orientation.main(component.minimum_or_zero()))
                .collect();
            distribute(&mut extents, &minima, spare);
        }

        let mut position = 0;
        for ((child, component), extent) in children.into_iter().zip(extents) {
            let extent = extent.min(available - position).max(0);
            let cross = depth.min(orientation.cross(component.maximum_or_unbounded()));
            pass.place(child, Some(orientation.rect(position, extent, cross)));
            position = position.saturating_add(extent).saturating_add(self.gap);
        }
        pass
    }

    fn minimum_size(&self, tree: &ComponentTree, container: ComponentId) -> Size {
        self.combine(tree, container, SizeKind::Minimum)
    }

    fn preferred_size(&self, tree: &ComponentTree, container: ComponentId) -> Size {
        clamp(
            self.combine(tree, container, SizeKind::Preferred),
            self.minimum_size(tree, container),
            self.maximum_size(tree, container),
        )
    }

    fn maximum_size(&self, tree: &ComponentTree, container: ComponentId) -> Size {
        self.combine(tree, container, SizeKind::Maximum)
    }
}
