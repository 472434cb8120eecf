//! Layout store — the in-memory entity model for layouts, boxes, and
//! box events.
//!
//! Every other component reads and writes through this store: entities
//! are identified by opaque [`Entity`] handles, carry untyped key/value
//! properties, and are enumerated in creation order. The store is owned
//! by the event loop and never shared across threads.

use std::collections::BTreeMap;

use crate::color::Color;
use crate::geometry::{PctRect, Rect};

/// The kind of an entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// A layout: the named root of a box tree.
    Layout,
    /// A box: one rectangular region.
    Box,
    /// A box event: a named script attached to a box.
    Event,
}

/// An opaque handle to a store entity.
///
/// Handles are cheap to copy and are never reused within a process run;
/// a deleted entity's handle simply stops resolving.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Entity {
    kind: EntityKind,
    index: u32,
}

impl Entity {
    /// The kind of entity this handle refers to.
    pub fn kind(&self) -> EntityKind {
        self.kind
    }
}

/// An untyped property value.
#[derive(Clone, Debug, PartialEq)]
pub enum PropValue {
    /// A string.
    Str(String),
    /// An integer.
    Int(i64),
    /// A boolean.
    Bool(bool),
    /// A single character.
    Char(char),
    /// A color.
    Color(Color),
    /// A percentage rectangle.
    Pct(PctRect),
    /// An absolute cell rectangle.
    Cells(Rect),
    /// A reference to another entity.
    Entity(Entity),
}

impl From<&str> for PropValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for PropValue {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<i64> for PropValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<bool> for PropValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<char> for PropValue {
    fn from(v: char) -> Self {
        Self::Char(v)
    }
}

impl From<Color> for PropValue {
    fn from(v: Color) -> Self {
        Self::Color(v)
    }
}

impl From<PctRect> for PropValue {
    fn from(v: PctRect) -> Self {
        Self::Pct(v)
    }
}

impl From<Rect> for PropValue {
    fn from(v: Rect) -> Self {
        Self::Cells(v)
    }
}

impl From<Entity> for PropValue {
    fn from(v: Entity) -> Self {
        Self::Entity(v)
    }
}

/// Well-known property keys.
pub mod keys {
    /// User-supplied id of a layout or box.
    pub const ID: &str = "id";
    /// Source file path of a layout.
    pub const SOURCE: &str = "source";
    /// Default refresh interval of a layout, in seconds.
    pub const DEFAULT_INTERVAL: &str = "refresh_interval";
    /// Owning layout of a box.
    pub const LAYOUT: &str = "layout";
    /// Parent box id of a non-root box.
    pub const PARENT: &str = "parent_id";
    /// Marks the root box of a layout.
    pub const IS_ROOT: &str = "is_root";
    /// Relative rectangle of a box, in percentages of the parent.
    pub const REL_RECT: &str = "rel_rect";
    /// Absolute rectangle of a box, in cells.
    pub const ABS_RECT: &str = "abs_rect";
    /// Border color of a box.
    pub const BORDER_COLOR: &str = "border_color";
    /// Whether the box interior is filled with a glyph.
    pub const FILL: &str = "fill";
    /// Fill color of a box.
    pub const FILL_COLOR: &str = "fill_color";
    /// Fill glyph of a box.
    pub const FILL_CHAR: &str = "fill_char";
    /// Title string of a box.
    pub const TITLE: &str = "title";
    /// Title color of a box.
    pub const TITLE_COLOR: &str = "title_color";
    /// Body text color of a box.
    pub const TEXT_COLOR: &str = "text_color";
    /// Refresh interval of a box, in seconds.
    pub const INTERVAL: &str = "refresh_interval";
    /// Current body text of a box.
    pub const BODY: &str = "body";
    /// Owning box of an event.
    pub const OWNER: &str = "box";
    /// Event name (`enter`, `leave`, `refresh`, ...).
    pub const NAME: &str = "name";
    /// Event script: commands joined with the internal separator.
    pub const SCRIPT: &str = "script";
}

/// Internal storage for one entity.
#[derive(Clone, Debug)]
struct Slot {
    kind: EntityKind,
    alive: bool,
    props: BTreeMap<String, PropValue>,
}

/// The entity store. See the module docs.
#[derive(Clone, Debug, Default)]
pub struct Store {
    slots: Vec<Slot>,
}

impl Store {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn create(&mut self, kind: EntityKind) -> Entity {
        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            kind,
            alive: true,
            props: BTreeMap::new(),
        });
        Entity { kind, index }
    }

    /// Create a new layout entity.
    pub fn new_layout(&mut self) -> Entity {
        self.create(EntityKind::Layout)
    }

    /// Create a new box entity owned by `layout`.
    pub fn new_box(&mut self, layout: Entity) -> Entity {
        debug_assert_eq!(layout.kind(), EntityKind::Layout);
        let bx = self.create(EntityKind::Box);
        self.set_prop(bx, keys::LAYOUT, layout);
        bx
    }

    /// Create a new event entity owned by `owner` (a box).
    pub fn new_event(&mut self, owner: Entity) -> Entity {
        debug_assert_eq!(owner.kind(), EntityKind::Box);
        let ev = self.create(EntityKind::Event);
        self.set_prop(ev, keys::OWNER, owner);
        ev
    }

    /// Returns true if the entity is still live.
    pub fn exists(&self, entity: Entity) -> bool {
        self.slot(entity).is_some()
    }

    /// Number of live entities of a kind.
    pub fn count(&self, kind: EntityKind) -> usize {
        self.slots
            .iter()
            .filter(|s| s.alive && s.kind == kind)
            .count()
    }

    /// Set a property on an entity. No-op if the entity is dead.
    pub fn set_prop(&mut self, entity: Entity, key: impl Into<String>, value: impl Into<PropValue>) {
        if let Some(slot) = self.slot_mut(entity) {
            slot.props.insert(key.into(), value.into());
        }
    }

    /// Get a property of an entity.
    pub fn get_prop(&self, entity: Entity, key: &str) -> Option<&PropValue> {
        self.slot(entity)?.props.get(key)
    }

    /// Get a string property.
    pub fn get_str(&self, entity: Entity, key: &str) -> Option<&str> {
        match self.get_prop(entity, key)? {
            PropValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Get an integer property.
    pub fn get_int(&self, entity: Entity, key: &str) -> Option<i64> {
        match self.get_prop(entity, key)? {
            PropValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Get a boolean property.
    pub fn get_bool(&self, entity: Entity, key: &str) -> Option<bool> {
        match self.get_prop(entity, key)? {
            PropValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Get a char property.
    pub fn get_char(&self, entity: Entity, key: &str) -> Option<char> {
        match self.get_prop(entity, key)? {
            PropValue::Char(v) => Some(*v),
            _ => None,
        }
    }

    /// Get a color property.
    pub fn get_color(&self, entity: Entity, key: &str) -> Option<&Color> {
        match self.get_prop(entity, key)? {
            PropValue::Color(v) => Some(v),
            _ => None,
        }
    }

    /// Get a percentage-rectangle property.
    pub fn get_pct(&self, entity: Entity, key: &str) -> Option<PctRect> {
        match self.get_prop(entity, key)? {
            PropValue::Pct(v) => Some(*v),
            _ => None,
        }
    }

    /// Get a cell-rectangle property.
    pub fn get_cells(&self, entity: Entity, key: &str) -> Option<Rect> {
        match self.get_prop(entity, key)? {
            PropValue::Cells(v) => Some(*v),
            _ => None,
        }
    }

    /// Get an entity-reference property.
    pub fn get_entity(&self, entity: Entity, key: &str) -> Option<Entity> {
        match self.get_prop(entity, key)? {
            PropValue::Entity(v) => Some(*v),
            _ => None,
        }
    }

    /// All live entities of `kind` whose property `key` equals `value`,
    /// in creation order.
    pub fn list_by_prop(&self, kind: EntityKind, key: &str, value: &PropValue) -> Vec<Entity> {
        self.iter_kind(kind)
            .filter(|(_, slot)| slot.props.get(key) == Some(value))
            .map(|(e, _)| e)
            .collect()
    }

    /// All live entities of `kind` matching both property constraints,
    /// in creation order.
    pub fn list_by_props(
        &self,
        kind: EntityKind,
        first: (&str, &PropValue),
        second: (&str, &PropValue),
    ) -> Vec<Entity> {
        self.iter_kind(kind)
            .filter(|(_, slot)| {
                slot.props.get(first.0) == Some(first.1) && slot.props.get(second.0) == Some(second.1)
            })
            .map(|(e, _)| e)
            .collect()
    }

    /// Delete an entity.
    ///
    /// Deleting a layout deletes its boxes; deleting a box deletes its
    /// events.
    pub fn delete(&mut self, entity: Entity) {
        let Some(kind) = self.slot(entity).map(|s| s.kind) else {
            return;
        };
        match kind {
            EntityKind::Layout => {
                for bx in self.list_by_prop(EntityKind::Box, keys::LAYOUT, &entity.into()) {
                    self.delete(bx);
                }
            }
            EntityKind::Box => {
                for ev in self.list_by_prop(EntityKind::Event, keys::OWNER, &entity.into()) {
                    self.kill(ev);
                }
            }
            EntityKind::Event => {}
        }
        self.kill(entity);
    }

    /// Delete every live entity of `kind` whose property `key` equals
    /// `value` (with the same cascades as [`Store::delete`]).
    pub fn delete_by_prop(&mut self, kind: EntityKind, key: &str, value: &PropValue) {
        for entity in self.list_by_prop(kind, key, value) {
            self.delete(entity);
        }
    }

    /// All live boxes of a layout, in creation order.
    pub fn boxes_in(&self, layout: Entity) -> Vec<Entity> {
        self.list_by_prop(EntityKind::Box, keys::LAYOUT, &layout.into())
    }

    /// All live child boxes of the box with id `parent_id` in `layout`,
    /// in creation order.
    pub fn children_of(&self, layout: Entity, parent_id: &str) -> Vec<Entity> {
        self.list_by_props(
            EntityKind::Box,
            (keys::LAYOUT, &layout.into()),
            (keys::PARENT, &parent_id.into()),
        )
    }

    /// All live events of a box, in creation order.
    pub fn events_of(&self, owner: Entity) -> Vec<Entity> {
        self.list_by_prop(EntityKind::Event, keys::OWNER, &owner.into())
    }

    /// The event of `owner` with the given name, if declared.
    pub fn event_named(&self, owner: Entity, name: &str) -> Option<Entity> {
        self.list_by_props(
            EntityKind::Event,
            (keys::OWNER, &owner.into()),
            (keys::NAME, &name.into()),
        )
        .into_iter()
        .next()
    }

    fn kill(&mut self, entity: Entity) {
        if let Some(slot) = self.slot_mut(entity) {
            slot.alive = false;
            slot.props.clear();
        }
    }

    fn slot(&self, entity: Entity) -> Option<&Slot> {
        self.slots
            .get(entity.index as usize)
            .filter(|s| s.alive && s.kind == entity.kind)
    }

    fn slot_mut(&mut self, entity: Entity) -> Option<&mut Slot> {
        self.slots
            .get_mut(entity.index as usize)
            .filter(|s| s.alive && s.kind == entity.kind)
    }

    fn iter_kind(&self, kind: EntityKind) -> impl Iterator<Item = (Entity, &Slot)> {
        self.slots
            .iter()
            .enumerate()
            .filter(move |(_, slot)| slot.alive && slot.kind == kind)
            .map(move |(index, slot)| {
                (
                    Entity {
                        kind,
                        index: index as u32,
                    },
                    slot,
                )
            })
    }
}
