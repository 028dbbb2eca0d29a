//! Dock layout with yielding.
//!
//! Children are processed in child order against a shrinking *free*
//! rectangle that starts as the whole container:
//!
//! - An edge-docked child takes a strip along that edge of the free
//!   rectangle, as thick as its preferred width (left/right) or height
//!   (top/bottom) but never thicker than what is left. The free rectangle
//!   shrinks by the strip.
//! - A centre child, or any child without a dock constraint, takes the whole
//!   free rectangle, which then becomes empty.
//!
//! # Yielding
//!
//! A docked strip normally keeps the corners it covers. A constraint such as
//! `"1 left 2"` instead *yields* the strip's ends to the adjacent edges: the
//! next dock on the counter-clockwise neighbour edge (bottom, for left) and
//! the next two docks on the clockwise neighbour edge (top, for left). When
//! such a later dock takes its strip, every component yielding to that edge
//! is shrunk by the strip's thickness on the side facing it, and the new
//! strip is stretched over the yielded end so it runs the full length.
//!
//! ```text
//!   "0 left 1", then "top":      A yields its top end to B
//!
//!   +--+--------+                +-----------+
//!   |  |        |                |     B     |
//!   |A |        |      ==>       +--+--------+
//!   |  |        |                |A |        |
//!   +--+--------+                +--+--------+
//! ```
//!
//! Each queued yield is consumed by one dock on its edge; a count of `n`
//! yields to the next `n` docks there. Pending yields are served first in,
//! first out.

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use super::size::SizeKind;
use super::{LayoutManager, LayoutPass};
use crate::component::{Component, ComponentId, ComponentTree, Constraint};
use crate::error::{Error, Result};
use crate::primitives::{Rect, Size};

// ============================================================================
// Constraint
// ============================================================================

/// A container edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Left,
    Top,
    Right,
    Bottom,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Left, Edge::Top, Edge::Right, Edge::Bottom];

    /// The neighbour met when walking the border counter-clockwise.
    pub const fn counter_clockwise(self) -> Edge {
        match self {
            Edge::Left => Edge::Bottom,
            Edge::Top => Edge::Left,
            Edge::Right => Edge::Top,
            Edge::Bottom => Edge::Right,
        }
    }

    /// The neighbour met when walking the border clockwise.
    pub const fn clockwise(self) -> Edge {
        match self {
            Edge::Left => Edge::Top,
            Edge::Top => Edge::Right,
            Edge::Right => Edge::Bottom,
            Edge::Bottom => Edge::Left,
        }
    }

    /// Whether strips along this edge run vertically.
    pub const fn is_vertical(self) -> bool {
        matches!(self, Edge::Left | Edge::Right)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Edge::Left => "left",
            Edge::Top => "top",
            Edge::Right => "right",
            Edge::Bottom => "bottom",
        }
    }

    const fn index(self) -> usize {
        match self {
            Edge::Left => 0,
            Edge::Top => 1,
            Edge::Right => 2,
            Edge::Bottom => 3,
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Edge {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "left" => Ok(Edge::Left),
            "top" => Ok(Edge::Top),
            "right" => Ok(Edge::Right),
            "bottom" => Ok(Edge::Bottom),
            _ => Err(Error::malformed(s, "expected left, top, right or bottom")),
        }
    }
}

/// Where a child of a [`DockLayout`] goes.
///
/// Textual form: `"left"`, `"top"`, `"right"`, `"bottom"`, `"center"` (or
/// `"centre"`), or `"<ccw> <edge> <cw>"` with non-negative yield counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DockConstraint {
    Edge {
        edge: Edge,
        /// Docks on the counter-clockwise neighbour edge this child yields to.
        yield_ccw: u32,
        /// Docks on the clockwise neighbour edge this child yields to.
        yield_cw: u32,
    },
    Center,
}

impl DockConstraint {
    pub const LEFT: Self = Self::edge(Edge::Left);
    pub const TOP: Self = Self::edge(Edge::Top);
    pub const RIGHT: Self = Self::edge(Edge::Right);
    pub const BOTTOM: Self = Self::edge(Edge::Bottom);
    pub const CENTER: Self = Self::Center;

    /// Dock on `edge` without yielding.
    pub const fn edge(edge: Edge) -> Self {
        Self::Edge {
            edge,
            yield_ccw: 0,
            yield_cw: 0,
        }
    }

    /// Dock on `edge`, yielding to the next `ccw` counter-clockwise and the
    /// next `cw` clockwise neighbour docks.
    pub const fn yield_to(ccw: u32, edge: Edge, cw: u32) -> Self {
        Self::Edge {
            edge,
            yield_ccw: ccw,
            yield_cw: cw,
        }
    }

    /// The docking edge, `None` for centre.
    pub const fn docked_edge(&self) -> Option<Edge> {
        match self {
            Self::Edge { edge, .. } => Some(*edge),
            Self::Center => None,
        }
    }

    pub const fn yields(&self) -> bool {
        matches!(self, Self::Edge { yield_ccw, yield_cw, .. } if *yield_ccw > 0 || *yield_cw > 0)
    }
}

impl From<Edge> for DockConstraint {
    fn from(edge: Edge) -> Self {
        Self::edge(edge)
    }
}

impl fmt::Display for DockConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Center => f.write_str("center"),
            Self::Edge { edge, yield_ccw: 0, yield_cw: 0 } => write!(f, "{edge}"),
            Self::Edge { edge, yield_ccw, yield_cw } => write!(f, "{yield_ccw} {edge} {yield_cw}"),
        }
    }
}

impl FromStr for DockConstraint {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let words: Vec<&str> = s.split_whitespace().collect();
        match words.as_slice() {
            ["center" | "centre"] => Ok(Self::Center),
            [edge] => edge
                .parse()
                .map(Self::edge)
                .map_err(|_| Error::malformed(s, format!("unknown dock position {edge:?}"))),
            [ccw, edge, cw] => {
                let edge: Edge = edge
                    .parse()
                    .map_err(|_| Error::malformed(s, format!("cannot yield from {edge:?}")))?;
                Ok(Self::yield_to(parse_count(s, ccw)?, edge, parse_count(s, cw)?))
            }
            _ => Err(Error::malformed(
                s,
                format!("expected 1 or 3 words, found {}", words.len()),
            )),
        }
    }
}

impl TryFrom<&str> for DockConstraint {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self> {
        s.parse()
    }
}

fn parse_count(constraint: &str, word: &str) -> Result<u32> {
    word.parse()
        .map_err(|_| Error::malformed(constraint, format!("yield count {word:?} is not a non-negative integer")))
}

// ============================================================================
// Layout
// ============================================================================

/// Docks children against the edges of the container.
///
/// Invisible children are skipped and receive no rectangle. Children whose
/// constraint is not a [`Constraint::Dock`] edge fill the remaining space.
#[derive(Debug, Clone, Copy, Default)]
pub struct DockLayout;

/// A placed component waiting for docks on one edge.
#[derive(Debug, Clone, Copy)]
struct Yielder {
    child: ComponentId,
    /// Edge the yielding component is docked on.
    edge: Edge,
    remaining: u32,
}

/// Pending yields, one FIFO queue per edge they yield to.
#[derive(Debug, Default)]
struct YieldQueues([VecDeque<Yielder>; 4]);

impl YieldQueues {
    fn push(&mut self, to: Edge, yielder: Yielder) {
        if yielder.remaining > 0 {
            self.0[to.index()].push_back(yielder);
        }
    }

    fn queue(&mut self, edge: Edge) -> &mut VecDeque<Yielder> {
        &mut self.0[edge.index()]
    }
}

fn dock_constraint(component: &Component) -> Option<(Edge, u32, u32)> {
    match component.constraint() {
        Constraint::Dock(DockConstraint::Edge { edge, yield_ccw, yield_cw }) => {
            Some((*edge, *yield_ccw, *yield_cw))
        }
        _ => None,
    }
}

impl DockLayout {
    /// Take a strip of `thickness` from `free` along `edge`, shrinking every
    /// component yielding to that edge and stretching the strip over them.
    fn dock(
        edge: Edge,
        thickness: i32,
        free: &mut Rect,
        queue: &mut VecDeque<Yielder>,
        pass: &mut LayoutPass,
    ) -> Rect {
        // Span of the strip along the edge.
        let (mut start, mut length) = if edge.is_vertical() {
            (free.y, free.height)
        } else {
            (free.x, free.width)
        };

        if thickness > 0 {
            for mut yielder in std::mem::take(queue) {
                if let Some(r) = pass.get(yielder.child) {
                    let shrunk = match edge {
                        Edge::Left => Rect::new(r.x + thickness, r.y, r.width - thickness, r.height),
                        Edge::Top => Rect::new(r.x, r.y + thickness, r.width, r.height - thickness),
                        Edge::Right => Rect::new(r.x, r.y, r.width - thickness, r.height),
                        Edge::Bottom => Rect::new(r.x, r.y, r.width, r.height - thickness),
                    };
                    tracing::trace!(child = %yielder.child, to = %edge, from = %r, into = %shrunk, "yield");
                    pass.place(yielder.child, Some(shrunk));

                    if edge.is_vertical() {
                        length += r.height;
                        if yielder.edge == Edge::Top {
                            start -= r.height;
                        }
                    } else {
                        length += r.width;
                        if yielder.edge == Edge::Left {
                            start -= r.width;
                        }
                    }
                }
                yielder.remaining -= 1;
                if yielder.remaining > 0 {
                    queue.push_back(yielder);
                }
            }
        }

        let strip = match edge {
            Edge::Left => Rect::new(free.x, start, thickness, length),
            Edge::Top => Rect::new(start, free.y, length, thickness),
            Edge::Right => Rect::new(free.x + free.width - thickness, start, thickness, length),
            Edge::Bottom => Rect::new(start, free.y + free.height - thickness, length, thickness),
        };

        match edge {
            Edge::Left => {
                free.x += thickness;
                free.width -= thickness;
            }
            Edge::Top => {
                free.y += thickness;
                free.height -= thickness;
            }
            Edge::Right => free.width -= thickness,
            Edge::Bottom => free.height -= thickness,
        }

        strip
    }

    /// Size the container needs so every visible child up to the first
    /// filling one gets `kind` size.
    fn negotiate(tree: &ComponentTree, container: ComponentId, kind: SizeKind) -> Size {
        let mut docked = Vec::new();
        for (_, component) in tree.child_components(container) {
            if !component.is_visible() {
                continue;
            }
            let edge = dock_constraint(component).map(|(edge, _, _)| edge);
            docked.push((edge, kind.of(component)));
            if edge.is_none() {
                break;
            }
        }

        // Outermost strips wrap everything docked after them.
        docked.iter().rev().fold(Size::ZERO, |inner, (edge, size)| match edge {
            Some(edge) if edge.is_vertical() => {
                Size::new(inner.width.saturating_add(size.width), inner.height.max(size.height))
            }
            Some(_) => Size::new(inner.width.max(size.width), inner.height.saturating_add(size.height)),
            None => inner.max(*size),
        })
    }
}

impl LayoutManager for DockLayout {
    fn prepare(&self, tree: &ComponentTree, container: ComponentId) -> LayoutPass {
        let mut pass = LayoutPass::new(container);
        let Ok(parent) = tree.component(container) else {
            return pass;
        };
        let mut free = Rect::from_size(parent.size());
        let mut queues = YieldQueues::default();

        for (child, component) in tree.child_components(container) {
            if !component.is_visible() {
                continue;
            }
            match dock_constraint(component) {
                Some((edge, yield_ccw, yield_cw)) => {
                    let preferred = component.preferred_size();
                    let thickness = if edge.is_vertical() {
                        free.width.min(preferred.width)
                    } else {
                        free.height.min(preferred.height)
                    }
                    .max(0);
                    let strip = Self::dock(edge, thickness, &mut free, queues.queue(edge), &mut pass);
                    tracing::trace!(container = %container, %child, %edge, %strip, "docked");
                    pass.place(child, Some(strip));

                    if pass.get(child).is_some() {
                        queues.push(edge.counter_clockwise(), Yielder { child, edge, remaining: yield_ccw });
                        queues.push(edge.clockwise(), Yielder { child, edge, remaining: yield_cw });
                    }
                }
                None => {
                    tracing::trace!(container = %container, %child, %free, "filled");
                    pass.place(child, Some(free));
                    free.width = 0;
                    free.height = 0;
                }
            }
        }
        pass
    }

    fn minimum_size(&self, tree: &ComponentTree, container: ComponentId) -> Size {
        Self::negotiate(tree, container, SizeKind::Minimum)
    }

    fn preferred_size(&self, tree: &ComponentTree, container: ComponentId) -> Size {
        Self::negotiate(tree, container, SizeKind::Preferred)
    }
}
