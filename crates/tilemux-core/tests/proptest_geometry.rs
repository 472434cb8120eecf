//! Property-based tests for geometry resolution.
//!
//! Uses proptest to verify resolver invariants with random box trees and
//! terminal sizes.

use proptest::prelude::*;

use tilemux_core::geometry::{PctRect, Rect, Size};
use tilemux_core::resolve::resolve_layout;
use tilemux_core::store::{keys, Entity, Store};

/// Generate a valid percentage rectangle.
fn pct_rect() -> impl Strategy<Value = PctRect> {
    (0u8..100, 0u8..100)
        .prop_flat_map(|(x1, y1)| {
            (
                Just(x1),
                Just(y1),
                (x1 + 1)..=100u8,
                (y1 + 1)..=100u8,
            )
        })
        .prop_map(|(x1, y1, x2, y2)| PctRect { x1, y1, x2, y2 })
}

/// Generate a usable terminal size.
fn terminal_size() -> impl Strategy<Value = Size> {
    (4u16..=300, 4u16..=120).prop_map(|(w, h)| Size::new(w, h))
}

fn add_root(store: &mut Store, layout: Entity) -> Entity {
    let root = store.new_box(layout);
    store.set_prop(root, keys::ID, "root");
    store.set_prop(root, keys::IS_ROOT, true);
    store.set_prop(root, keys::REL_RECT, PctRect::FULL);
    root
}

fn add_child(store: &mut Store, layout: Entity, id: &str, parent: &str, rel: PctRect) -> Entity {
    let bx = store.new_box(layout);
    store.set_prop(bx, keys::ID, id);
    store.set_prop(bx, keys::IS_ROOT, false);
    store.set_prop(bx, keys::PARENT, parent);
    store.set_prop(bx, keys::REL_RECT, rel);
    bx
}

proptest! {
    /// Property: the root's absolute rectangle equals the terminal.
    #[test]
    fn root_absolute_equals_terminal(size in terminal_size()) {
        let mut store = Store::new();
        let layout = store.new_layout();
        let root = add_root(&mut store, layout);

        prop_assert!(resolve_layout(&mut store, layout, size).is_ok());
        prop_assert_eq!(
            store.get_cells(root, keys::ABS_RECT),
            Some(Rect::from_size(size))
        );
    }

    /// Property: every resolved child lies within its parent.
    #[test]
    fn children_contained_in_parent(
        size in terminal_size(),
        rel_child in pct_rect(),
        rel_grandchild in pct_rect(),
    ) {
        let mut store = Store::new();
        let layout = store.new_layout();
        let root = add_root(&mut store, layout);
        let child = add_child(&mut store, layout, "child", "root", rel_child);
        let grandchild = add_child(&mut store, layout, "inner", "child", rel_grandchild);

        prop_assert!(resolve_layout(&mut store, layout, size).is_ok());

        let root_abs = store.get_cells(root, keys::ABS_RECT);
        let child_abs = store.get_cells(child, keys::ABS_RECT);
        let grandchild_abs = store.get_cells(grandchild, keys::ABS_RECT);
        prop_assert!(root_abs.is_some());
        prop_assert!(child_abs.is_some());
        prop_assert!(grandchild_abs.is_some());

        if let (Some(r), Some(c), Some(g)) = (root_abs, child_abs, grandchild_abs) {
            prop_assert!(r.contains(&c));
            prop_assert!(c.contains(&g));
        }
    }

    /// Property: resolving twice yields identical rectangles.
    #[test]
    fn resolution_idempotent(
        size in terminal_size(),
        rel_a in pct_rect(),
        rel_b in pct_rect(),
    ) {
        let mut store = Store::new();
        let layout = store.new_layout();
        add_root(&mut store, layout);
        let a = add_child(&mut store, layout, "a", "root", rel_a);
        let b = add_child(&mut store, layout, "b", "root", rel_b);

        prop_assert!(resolve_layout(&mut store, layout, size).is_ok());
        let first = (
            store.get_cells(a, keys::ABS_RECT),
            store.get_cells(b, keys::ABS_RECT),
        );
        prop_assert!(resolve_layout(&mut store, layout, size).is_ok());
        let second = (
            store.get_cells(a, keys::ABS_RECT),
            store.get_cells(b, keys::ABS_RECT),
        );
        prop_assert_eq!(first, second);
    }

    /// Property: a full-size child fills its parent exactly.
    #[test]
    fn full_child_fills_parent(size in terminal_size(), rel in pct_rect()) {
        let mut store = Store::new();
        let layout = store.new_layout();
        add_root(&mut store, layout);
        let mid = add_child(&mut store, layout, "mid", "root", rel);
        let full = add_child(&mut store, layout, "full", "mid", PctRect::FULL);

        prop_assert!(resolve_layout(&mut store, layout, size).is_ok());
        prop_assert_eq!(
            store.get_cells(full, keys::ABS_RECT),
            store.get_cells(mid, keys::ABS_RECT)
        );
    }
}
