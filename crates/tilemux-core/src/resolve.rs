//! Geometry resolution — percentage rectangles to absolute cells.
//!
//! Resolution walks the box tree pre-order so every child sees its
//! parent's already-resolved rectangle. It runs on load, on every
//! resize, and whenever a caller asks; re-running it is idempotent.

use crate::error::{CoreError, Result};
use crate::geometry::{Rect, Size};
use crate::store::{keys, Entity, Store};

/// Resolve absolute rectangles for every box of a layout.
///
/// The root box spans the whole terminal; each descendant's absolute
/// rectangle is computed from its percentage rectangle against its
/// parent's absolute one, with truncating integer math.
pub fn resolve_layout(store: &mut Store, layout: Entity, size: Size) -> Result<()> {
    let root = root_box(store, layout)?;
    let root_abs = Rect::from_size(size);
    store.set_prop(root, keys::ABS_RECT, root_abs);
    resolve_children(store, layout, root, root_abs)
}

/// The root box of a layout.
pub fn root_box(store: &Store, layout: Entity) -> Result<Entity> {
    store
        .list_by_props(
            crate::store::EntityKind::Box,
            (keys::LAYOUT, &layout.into()),
            (keys::IS_ROOT, &true.into()),
        )
        .into_iter()
        .next()
        .ok_or_else(|| CoreError::Geometry("layout has no root box".into()))
}

/// The layout's boxes in paint order: pre-order, children after parents,
/// siblings in declaration order.
pub fn paint_order(store: &Store, layout: Entity) -> Result<Vec<Entity>> {
    let root = root_box(store, layout)?;
    let mut order = Vec::new();
    push_subtree(store, layout, root, &mut order);
    Ok(order)
}

fn push_subtree(store: &Store, layout: Entity, bx: Entity, order: &mut Vec<Entity>) {
    order.push(bx);
    let Some(id) = store.get_str(bx, keys::ID).map(String::from) else {
        return;
    };
    for child in store.children_of(layout, &id) {
        push_subtree(store, layout, child, order);
    }
}

fn resolve_children(store: &mut Store, layout: Entity, parent: Entity, parent_abs: Rect) -> Result<()> {
    let Some(parent_id) = store.get_str(parent, keys::ID).map(String::from) else {
        return Ok(());
    };
    for child in store.children_of(layout, &parent_id) {
        let rel = store.get_pct(child, keys::REL_RECT).ok_or_else(|| {
            CoreError::Geometry(format!("box '{parent_id}' child has no relative rectangle"))
        })?;
        let abs = rel.resolve_within(parent_abs);
        store.set_prop(child, keys::ABS_RECT, abs);
        resolve_children(store, layout, child, abs)?;
    }
    Ok(())
}
