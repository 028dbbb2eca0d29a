//! The demo component tree.
//!
//! ```text
//! +---------------------------------+
//! |            toolbar              |
//! +------+--------------------------+
//! |      | [label]                  |
//! | side |  +--------------------+  |
//! | bar  |  |  blue  red         |  |
//! |      |  +--------------------+  |
//! +------+--------------------------+
//! |            status               |
//! +---------------------------------+
//! ```
//!
//! The side bar is docked first but yields both of its ends, so the tool and
//! status bars run the full window width.

use trellis::{
    Color, ComponentId, ComponentTree, DockConstraint, DockLayout, Edge, Frame, Point, Size,
};

use crate::config::DemoConfig;

/// Ids the demo touches after building the tree.
#[derive(Debug, Clone, Copy)]
pub struct Scene {
    pub root: ComponentId,
    pub frame: Frame,
    pub red: ComponentId,
}

pub fn build(tree: &mut ComponentTree, config: &DemoConfig) -> trellis::Result<Scene> {
    let root = tree.add("root");
    tree.set_layout(root, DockLayout)?;

    let sidebar = tree.add_with("side bar", |c| {
        c.set_background(Color::from_rgb_u32(0x3c4048));
        c.set_preferred_size(Size::new(config.sidebar_width, 0));
        c.set_constraint(DockConstraint::yield_to(1, Edge::Left, 1));
    });
    let toolbar = tree.add_with("tool bar", |c| {
        c.set_background(Color::from_rgb_u32(0x5a6270));
        c.set_preferred_size(Size::new(0, config.toolbar_height));
        c.set_constraint(DockConstraint::TOP);
    });
    let status = tree.add_with("status bar", |c| {
        c.set_background(Color::from_rgb_u32(0x2a2d33));
        c.set_preferred_size(Size::new(0, config.status_height));
        c.set_constraint(DockConstraint::BOTTOM);
    });
    for child in [sidebar, toolbar, status] {
        tree.append_child(root, child)?;
    }

    let frame = Frame::build(tree, "workspace")?;
    tree.set_constraint(frame.frame, DockConstraint::CENTER)?;
    tree.component_mut(frame.label)?.set_preferred_size(Size::new(48, 10));
    tree.component_mut(frame.label)?.set_background(Color::WHITE);
    tree.append_child(root, frame.frame)?;

    // Two squares, absolutely placed.
    let blue = tree.add_with("Blue component", |c| {
        c.set_background(Color::BLUE);
        c.set_preferred_size(Size::new(32, 32));
    });
    let red = tree.add_with("Red component", |c| {
        c.set_background(Color::RED);
        c.set_constraint(Point::new(8, 8));
    });
    tree.append_child(frame.content, blue)?;
    tree.append_child(frame.content, red)?;

    Ok(Scene { root, frame, red })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bars_span_full_width() {
        let config = DemoConfig::default();
        let mut tree = ComponentTree::new();
        let scene = build(&mut tree, &config).unwrap();
        tree.resize(scene.root, Size::new(320, 240)).unwrap();

        let pass = tree.prepare(scene.root).unwrap();
        let bars: Vec<_> = tree.children(scene.root).filter_map(|id| pass.get(id)).collect();
        assert_eq!(
            bars,
            vec![
                trellis::Rect::new(0, 24, 60, 200),
                trellis::Rect::new(0, 0, 320, 24),
                trellis::Rect::new(0, 224, 320, 16),
                trellis::Rect::new(60, 24, 260, 200),
            ]
        );
    }
}
