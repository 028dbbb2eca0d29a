//! Integration tests for the simpler layout managers and for nested
//! composition through a window.

use trellis::{
    AbsoluteLayout, Color, ComponentId, ComponentTree, DisplayListSurface, DockConstraint,
    DockLayout, Frame, LayoutManager, MarginLayout, Point, Rect, Size, StackLayout, Window,
};

fn container(tree: &mut ComponentTree, size: Size) -> ComponentId {
    let root = tree.add("container");
    tree.resize(root, size).unwrap();
    root
}

fn child(tree: &mut ComponentTree, parent: ComponentId, preferred: Size) -> ComponentId {
    let id = tree.add_child(parent, "child").unwrap();
    tree.component_mut(id).unwrap().set_preferred_size(preferred);
    id
}

// =========================================================================
// Absolute
// =========================================================================

#[test]
fn test_absolute_places_at_point_with_preferred_size() {
    let mut tree = ComponentTree::new();
    let root = container(&mut tree, Size::new(100, 100));
    let placed = child(&mut tree, root, Size::new(20, 10));
    tree.set_constraint(placed, Point::new(10, 5)).unwrap();
    let unconstrained = child(&mut tree, root, Size::new(8, 8));

    assert_eq!(tree.placement(root, placed).unwrap(), Some(Rect::new(10, 5, 20, 10)));
    assert_eq!(tree.placement(root, unconstrained).unwrap(), Some(Rect::new(0, 0, 8, 8)));
    assert_eq!(tree.layout_preferred_size(root).unwrap(), Size::new(30, 15));
}

#[test]
fn test_absolute_minimum_is_extent_of_minimums() {
    let mut tree = ComponentTree::new();
    let root = container(&mut tree, Size::new(100, 100));
    let placed = child(&mut tree, root, Size::new(20, 10));
    tree.set_constraint(placed, Point::new(10, 5)).unwrap();
    tree.component_mut(placed).unwrap().set_minimum_size(Some(Size::new(5, 5)));
    child(&mut tree, root, Size::new(8, 8));

    assert_eq!(AbsoluteLayout.minimum_size(&tree, root), Size::new(15, 10));
    assert_eq!(AbsoluteLayout.maximum_size(&tree, root), Size::UNBOUNDED);
}

#[test]
fn test_container_without_layout_places_absolutely() {
    let mut tree = ComponentTree::new();
    let root = container(&mut tree, Size::new(100, 100));
    tree.set_layout(root, StackLayout).unwrap();
    let id = child(&mut tree, root, Size::new(20, 10));
    tree.set_constraint(id, Point::new(3, 4)).unwrap();
    assert_eq!(tree.placement(root, id).unwrap(), Some(Rect::new(0, 0, 100, 100)));

    assert!(tree.clear_layout(root).unwrap().is_some());
    assert_eq!(tree.placement(root, id).unwrap(), Some(Rect::new(3, 4, 20, 10)));
}

// =========================================================================
// Stack and margin
// =========================================================================

#[test]
fn test_stack_overlays_visible_children() {
    let mut tree = ComponentTree::new();
    let root = container(&mut tree, Size::new(50, 40));
    tree.set_layout(root, StackLayout).unwrap();
    let back = child(&mut tree, root, Size::new(10, 30));
    let front = child(&mut tree, root, Size::new(20, 5));

    assert_eq!(tree.placement(root, back).unwrap(), Some(Rect::new(0, 0, 50, 40)));
    assert_eq!(tree.placement(root, front).unwrap(), Some(Rect::new(0, 0, 50, 40)));
    assert_eq!(tree.layout_preferred_size(root).unwrap(), Size::new(20, 30));

    tree.component_mut(front).unwrap().set_visible(false);
    assert_eq!(tree.placement(root, front).unwrap(), None);
}

#[test]
fn test_stack_maximum_is_tightest_visible() {
    let mut tree = ComponentTree::new();
    let root = container(&mut tree, Size::new(50, 40));
    tree.set_layout(root, StackLayout).unwrap();
    let bounded = child(&mut tree, root, Size::new(10, 10));
    tree.component_mut(bounded).unwrap().set_maximum_size(Some(Size::new(30, 100)));
    let hidden = child(&mut tree, root, Size::new(10, 10));
    tree.component_mut(hidden).unwrap().set_maximum_size(Some(Size::new(5, 5)));
    tree.component_mut(hidden).unwrap().set_visible(false);

    assert_eq!(tree.layout_maximum_size(root).unwrap(), Size::new(30, 100));
}

#[test]
fn test_margin_insets_children_and_grows_sizes() {
    let mut tree = ComponentTree::new();
    let root = container(&mut tree, Size::new(50, 40));
    tree.set_layout(root, MarginLayout::new(1, 2, 3, 4)).unwrap();
    let id = child(&mut tree, root, Size::new(10, 10));

    assert_eq!(tree.placement(root, id).unwrap(), Some(Rect::new(1, 2, 46, 34)));
    assert_eq!(tree.layout_preferred_size(root).unwrap(), Size::new(14, 16));
    assert_eq!(tree.layout_maximum_size(root).unwrap(), Size::UNBOUNDED);
}

// =========================================================================
// Composition
// =========================================================================

/// A docked toolbar above a frame whose content holds a margined body.
struct Composite {
    window: Window<DisplayListSurface>,
    frame: Frame,
    body: ComponentId,
}

impl Composite {
    fn new(size: Size) -> Self {
        let mut tree = ComponentTree::new();
        let root = tree.add("root");
        tree.set_layout(root, DockLayout).unwrap();

        let toolbar = tree.add_child(root, "toolbar").unwrap();
        tree.set_constraint(toolbar, DockConstraint::TOP).unwrap();
        tree.component_mut(toolbar).unwrap().set_preferred_size(Size::new(50, 20));

        let frame = Frame::build(&mut tree, "settings").unwrap();
        tree.append_child(root, frame.frame).unwrap();
        tree.set_constraint(frame.frame, DockConstraint::CENTER).unwrap();
        tree.component_mut(frame.label).unwrap().set_preferred_size(Size::new(40, 10));
        tree.set_layout(frame.content, MarginLayout::uniform(4)).unwrap();

        let body = tree.add_child(frame.content, "body").unwrap();
        tree.component_mut(body).unwrap().set_background(Color::GREEN);

        let window = Window::new(DisplayListSurface::new(size), tree, root).unwrap();
        Self { window, frame, body }
    }

    fn body_fills(&self) -> Vec<Rect> {
        self.window.surface().list().fills_of(Color::GREEN)
    }
}

#[test]
fn test_nested_layouts_compose_on_screen() {
    let mut composite = Composite::new(Size::new(200, 120));
    composite.window.set_visible(true).unwrap();

    // Frame at (0, 20), content at (7, 10) inside it, body inset by 4.
    assert_eq!(composite.body_fills(), vec![Rect::new(11, 34, 178, 75)]);
    let tree = composite.window.tree();
    assert_eq!(tree.component(composite.frame.content).unwrap().size(), Size::new(186, 83));
    assert_eq!(tree.component(composite.body).unwrap().size(), Size::new(178, 75));
}

#[test]
fn test_window_resize_relayouts() {
    let mut composite = Composite::new(Size::new(200, 120));
    composite.window.set_visible(true).unwrap();
    composite.window.surface_mut().take_list();

    composite.window.resize(Size::new(300, 200)).unwrap();
    assert_eq!(composite.body_fills(), vec![Rect::new(11, 34, 278, 155)]);
}

#[test]
fn test_sync_inside_frame_reaches_surface() {
    let mut composite = Composite::new(Size::new(200, 120));
    composite.window.set_visible(true).unwrap();
    composite.window.surface_mut().take_list();

    composite.window.sync_area(composite.body, Rect::new(0, 0, 10, 10)).unwrap();
    assert_eq!(composite.body_fills(), vec![Rect::new(11, 34, 10, 10)]);
}

#[test]
fn test_pack_bubbles_preferred_sizes_up() {
    let mut composite = Composite::new(Size::new(200, 120));
    let frame = composite.frame;
    let root = composite.window.root();
    let tree = composite.window.tree_mut();

    // Body keeps the default 16x16 preferred size.
    assert_eq!(tree.pack(frame.content).unwrap(), Size::new(24, 24));
    assert_eq!(tree.pack(frame.frame).unwrap(), Size::new(54, 41));
    assert_eq!(tree.pack(root).unwrap(), Size::new(54, 61));
    assert_eq!(tree.component(root).unwrap().preferred_size(), Size::new(54, 61));
}
