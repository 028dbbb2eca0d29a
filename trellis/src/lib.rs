//! Trellis: Retained-Mode Component Layout and Compositing
//!
//! Trellis keeps a tree of components, places children through pluggable
//! layout managers and paints the tree onto a host surface:
//! - Bracketed layout passes (`prepare` / `locate` / `done`)
//! - Dock layout with corner yielding between adjacent strips
//! - Per-component double buffering with buffer reuse
//! - Partial repaint (`sync`) that respects translucency
//!
//! # Architecture
//!
//! ```text
//! ComponentTree --prepare--> LayoutPass --locate--> child rects
//!       |                                               |
//!       +--paint(Graphics)--> background, skin, children in derived contexts
//!       |
//!       +--sync(Surface)--> clip+translate down from the root, then paint
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use trellis::{ComponentTree, DockConstraint, DockLayout, RasterSurface, Size, Window};
//!
//! let mut tree = ComponentTree::new();
//! let root = tree.add("root");
//! tree.set_layout(root, DockLayout)?;
//! let status = tree.add_child(root, "status")?;
//! tree.set_constraint(status, "0 bottom 1".parse::<DockConstraint>()?)?;
//!
//! let mut window = Window::new(RasterSurface::new(Size::new(320, 240)), tree, root)?;
//! window.set_visible(true)?;
//! ```

// Core primitives
pub mod primitives;
pub mod error;
pub mod config;

// Drawing backends and host surfaces
pub mod graphics;

// Layout managers
pub mod layout;

// Component tree, painting and synchronisation
pub mod component;

// Composite widgets
pub mod widgets;

// Re-export core types
pub use primitives::{Color, Point, Rect, Size, UNBOUNDED};
pub use error::{Error, Result};
pub use config::ComponentDefaults;
pub use graphics::{
    DisplayList, DisplayListSurface, DrawOp, Graphics, Insets, Offscreen, RasterGraphics,
    RasterSurface, Surface,
};
pub use layout::{
    AbsoluteLayout, DockConstraint, DockLayout, Edge, FlowAlignment, FlowLayout, FrameLayout,
    LayoutManager, LayoutPass, LineLayout, MarginLayout, Orientation, StackLayout,
};
pub use component::{Component, ComponentId, ComponentTree, Constraint, Plain, Skin, Window};
pub use widgets::{Frame, FrameSkin};
