//! Focus traversal over selectable boxes.
//!
//! Selectable boxes are the leaves of the tree (boxes with no children).
//! Focus starts at the first selectable box in declaration order and
//! wraps in both directions. With no selectable boxes, focus is null and
//! traversal is a no-op.

use crate::store::{keys, Entity, Store};

/// A focus movement: the box losing focus and the box gaining it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FocusChange {
    /// The previously focused box.
    pub from: Entity,
    /// The newly focused box.
    pub to: Entity,
}

/// Cyclic focus order over a layout's selectable boxes.
#[derive(Clone, Debug, Default)]
pub struct FocusRing {
    order: Vec<Entity>,
    current: Option<usize>,
}

impl FocusRing {
    /// Create an empty ring.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the ring from a layout's current boxes.
    ///
    /// The previously focused box keeps focus if it is still selectable;
    /// otherwise focus falls back to the first selectable box.
    pub fn rebuild(&mut self, store: &Store, layout: Entity) {
        let focused = self.current();
        let boxes = store.boxes_in(layout);

        let parent_ids: Vec<String> = boxes
            .iter()
            .filter_map(|bx| store.get_str(*bx, keys::PARENT).map(String::from))
            .collect();

        self.order = boxes
            .into_iter()
            .filter(|bx| {
                store
                    .get_str(*bx, keys::ID)
                    .is_some_and(|id| !parent_ids.iter().any(|p| p == id))
            })
            .collect();

        self.current = match focused.and_then(|f| self.order.iter().position(|bx| *bx == f)) {
            Some(i) => Some(i),
            None if self.order.is_empty() => None,
            None => Some(0),
        };
    }

    /// The focused box, if any.
    pub fn current(&self) -> Option<Entity> {
        self.current.and_then(|i| self.order.get(i).copied())
    }

    /// All selectable boxes in traversal order.
    pub fn order(&self) -> &[Entity] {
        &self.order
    }

    /// Advance focus to the next selectable box, wrapping at the end.
    pub fn next(&mut self) -> Option<FocusChange> {
        self.advance(1)
    }

    /// Move focus to the previous selectable box, wrapping at the start.
    pub fn prev(&mut self) -> Option<FocusChange> {
        self.advance(self.order.len().saturating_sub(1))
    }

    fn advance(&mut self, step: usize) -> Option<FocusChange> {
        let len = self.order.len();
        if len == 0 {
            return None;
        }
        let from_idx = self.current.unwrap_or(0);
        let to_idx = (from_idx + step) % len;
        self.current = Some(to_idx);
        Some(FocusChange {
            from: self.order[from_idx],
            to: self.order[to_idx],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout_with_leaves(ids: &[&str]) -> (Store, Entity, Vec<Entity>) {
        let mut store = Store::new();
        let layout = store.new_layout();
        let root = store.new_box(layout);
        store.set_prop(root, keys::ID, "root");
        store.set_prop(root, keys::IS_ROOT, true);
        let mut leaves = Vec::new();
        for id in ids {
            let bx = store.new_box(layout);
            store.set_prop(bx, keys::ID, *id);
            store.set_prop(bx, keys::PARENT, "root");
            leaves.push(bx);
        }
        (store, layout, leaves)
    }

    #[test]
    fn root_with_children_is_not_selectable() {
        let (store, layout, leaves) = layout_with_leaves(&["left", "right"]);
        let mut ring = FocusRing::new();
        ring.rebuild(&store, layout);
        assert_eq!(ring.order(), leaves.as_slice());
    }

    #[test]
    fn childless_root_is_selectable() {
        let (store, layout, _) = layout_with_leaves(&[]);
        let mut ring = FocusRing::new();
        ring.rebuild(&store, layout);
        assert_eq!(ring.order().len(), 1);
        assert!(ring.current().is_some());
    }

    #[test]
    fn focus_starts_at_first_leaf() {
        let (store, layout, leaves) = layout_with_leaves(&["left", "right"]);
        let mut ring = FocusRing::new();
        ring.rebuild(&store, layout);
        assert_eq!(ring.current(), Some(leaves[0]));
    }

    #[test]
    fn next_wraps_around() {
        let (store, layout, leaves) = layout_with_leaves(&["left", "right"]);
        let mut ring = FocusRing::new();
        ring.rebuild(&store, layout);

        let step = ring.next();
        assert_eq!(
            step,
            Some(FocusChange {
                from: leaves[0],
                to: leaves[1]
            })
        );
        let step = ring.next();
        assert_eq!(
            step,
            Some(FocusChange {
                from: leaves[1],
                to: leaves[0]
            })
        );
    }

    #[test]
    fn prev_is_inverse_of_next() {
        let (store, layout, leaves) = layout_with_leaves(&["a", "b", "c"]);
        let mut ring = FocusRing::new();
        ring.rebuild(&store, layout);

        ring.next();
        ring.prev();
        assert_eq!(ring.current(), Some(leaves[0]));
        // Wrap backwards from index 0.
        let step = ring.prev();
        assert_eq!(
            step,
            Some(FocusChange {
                from: leaves[0],
                to: leaves[2]
            })
        );
    }

    #[test]
    fn repeated_next_cycles_all_leaves() {
        let (store, layout, leaves) = layout_with_leaves(&["a", "b", "c"]);
        let mut ring = FocusRing::new();
        ring.rebuild(&store, layout);

        let mut seen = Vec::new();
        for _ in 0..leaves.len() {
            if let Some(change) = ring.next() {
                seen.push(change.to);
            }
        }
        seen.sort_by_key(|e| leaves.iter().position(|l| l == e));
        assert_eq!(seen, leaves);
    }

    #[test]
    fn empty_ring_is_a_noop() {
        let mut store = Store::new();
        let layout = store.new_layout();
        let mut ring = FocusRing::new();
        ring.rebuild(&store, layout);
        assert_eq!(ring.current(), None);
        assert_eq!(ring.next(), None);
        assert_eq!(ring.prev(), None);
    }

    #[test]
    fn rebuild_keeps_surviving_focus() {
        let (store, layout, leaves) = layout_with_leaves(&["a", "b"]);
        let mut ring = FocusRing::new();
        ring.rebuild(&store, layout);
        ring.next();
        assert_eq!(ring.current(), Some(leaves[1]));
        ring.rebuild(&store, layout);
        assert_eq!(ring.current(), Some(leaves[1]));
    }
}
