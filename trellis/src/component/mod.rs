//! Component tree.
//!
//! Components live in an arena owned by [`ComponentTree`] and are addressed
//! by [`ComponentId`] handles. Ownership flows parent → children through the
//! arena; the parent link is only used to walk upwards when a component asks
//! for a drawing context.
//!
//! # Lifecycle
//!
//! ```text
//! unattached --append_child--> attached --locate--> located --paint--> painted
//! ```
//!
//! A component is *located* once its parent's layout has given it a
//! rectangle; locating is also what sizes it for the pass.

mod tree;
mod window;

pub use tree::ComponentTree;
pub use window::Window;

use std::fmt;

use indextree::NodeId;

use crate::error::Result;
use crate::graphics::{Graphics, Offscreen};
use crate::layout::{DockConstraint, LayoutManager};
use crate::primitives::{Color, Point, Size};

/// Stable handle of a component inside a [`ComponentTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(pub(crate) NodeId);

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Placement hint read by the parent's layout manager.
///
/// Each variant is only understood by the layouts that document it; the
/// others treat it as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Constraint {
    #[default]
    None,
    /// Top-left corner for the absolute (default) placement.
    Point(Point),
    /// Edge or centre docking for [`DockLayout`](crate::layout::DockLayout).
    Dock(DockConstraint),
}

impl From<Point> for Constraint {
    fn from(point: Point) -> Self {
        Constraint::Point(point)
    }
}

impl From<DockConstraint> for Constraint {
    fn from(dock: DockConstraint) -> Self {
        Constraint::Dock(dock)
    }
}

/// Paint capability of a widget kind.
///
/// A skin draws the component's own content after the background has been
/// filled and before the children are painted. `g` is local to the
/// component: `(0, 0)` is its top-left corner.
pub trait Skin: fmt::Debug {
    fn paint(&self, tree: &ComponentTree, id: ComponentId, g: &mut dyn Graphics) -> Result<()>;
}

/// The skin of a bare component: background only.
#[derive(Debug, Clone, Copy, Default)]
pub struct Plain;

impl Skin for Plain {
    fn paint(&self, _tree: &ComponentTree, _id: ComponentId, _g: &mut dyn Graphics) -> Result<()> {
        Ok(())
    }
}

/// A node of the component tree.
#[derive(Debug)]
pub struct Component {
    name: String,
    pub(crate) background: Color,
    pub(crate) minimum_size: Option<Size>,
    pub(crate) preferred_size: Size,
    pub(crate) size: Size,
    pub(crate) maximum_size: Option<Size>,
    pub(crate) constraint: Constraint,
    pub(crate) visible: bool,
    pub(crate) double_buffered: bool,
    pub(crate) buffer: Option<Offscreen>,
    pub(crate) layout: Option<Box<dyn LayoutManager>>,
    pub(crate) skin: Box<dyn Skin>,
}

impl Component {
    pub(crate) fn new(name: String, defaults: &crate::config::ComponentDefaults) -> Self {
        Self {
            name,
            background: defaults.background,
            minimum_size: None,
            preferred_size: defaults.preferred_size,
            size: defaults.size,
            maximum_size: None,
            constraint: Constraint::None,
            visible: true,
            double_buffered: defaults.double_buffered,
            buffer: None,
            layout: None,
            skin: Box::new(Plain),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn set_background(&mut self, color: Color) {
        self.background = color;
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Resize the component. Layout passes may override this later.
    pub fn resize(&mut self, size: Size) {
        self.size = size;
    }

    pub fn preferred_size(&self) -> Size {
        self.preferred_size
    }

    pub fn set_preferred_size(&mut self, size: Size) {
        self.preferred_size = size;
    }

    pub fn minimum_size(&self) -> Option<Size> {
        self.minimum_size
    }

    pub fn set_minimum_size(&mut self, size: Option<Size>) {
        self.minimum_size = size;
    }

    pub fn maximum_size(&self) -> Option<Size> {
        self.maximum_size
    }

    pub fn set_maximum_size(&mut self, size: Option<Size>) {
        self.maximum_size = size;
    }

    /// Advisory minimum, zero when unset.
    pub fn minimum_or_zero(&self) -> Size {
        self.minimum_size.unwrap_or(Size::ZERO)
    }

    /// Advisory maximum, unbounded when unset.
    pub fn maximum_or_unbounded(&self) -> Size {
        self.maximum_size.unwrap_or(Size::UNBOUNDED)
    }

    pub fn constraint(&self) -> &Constraint {
        &self.constraint
    }

    pub fn set_constraint(&mut self, constraint: impl Into<Constraint>) {
        self.constraint = constraint.into();
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn is_double_buffered(&self) -> bool {
        self.double_buffered
    }

    /// Toggle double buffering. Turning it off releases the buffer.
    pub fn set_double_buffered(&mut self, double_buffered: bool) {
        self.double_buffered = double_buffered;
        if !double_buffered {
            self.buffer = None;
        }
    }

    /// The offscreen buffer of the last buffered paint, if any.
    pub fn buffer(&self) -> Option<&Offscreen> {
        self.buffer.as_ref()
    }

    pub fn layout(&self) -> Option<&dyn LayoutManager> {
        self.layout.as_deref()
    }

    pub fn skin(&self) -> &dyn Skin {
        self.skin.as_ref()
    }

    pub fn set_skin(&mut self, skin: impl Skin + 'static) {
        self.skin = Box::new(skin);
    }
}
