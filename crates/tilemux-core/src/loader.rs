//! Config loader — materializes a layout tree from a flat dotted-path
//! mapping.
//!
//! The configuration-file parser itself is an external collaborator: it
//! hands the loader a [`FlatDoc`], a flat mapping whose keys are
//! `___`-separated dotted paths carrying a per-parse random prefix. The
//! loader walks the `layout` tree inside it and populates the store.

use std::collections::BTreeMap;

use tracing::debug;

use crate::color::Color;
use crate::error::{CoreError, Result};
use crate::geometry::PctRect;
use crate::script;
use crate::store::{keys, Entity, EntityKind, Store};

/// Separator between path segments in flat keys.
pub const PATH_SEPARATOR: &str = "___";

/// Default fill glyph.
pub const DEFAULT_FILL_CHAR: char = '█';

/// A parsed configuration document in flat form.
///
/// Keys are dotted paths joined with [`PATH_SEPARATOR`], each carrying
/// the document's random prefix. The prefix isolates repeated loads of
/// the same document from each other in the flat namespace.
#[derive(Clone, Debug)]
pub struct FlatDoc {
    prefix: String,
    source: String,
    map: BTreeMap<String, String>,
}

impl FlatDoc {
    /// Build a flat document from prefixed key/value pairs.
    pub fn new(
        prefix: impl Into<String>,
        source: impl Into<String>,
        pairs: impl IntoIterator<Item = (String, String)>,
    ) -> Self {
        Self {
            prefix: prefix.into(),
            source: source.into(),
            map: pairs.into_iter().collect(),
        }
    }

    /// Path of the file this document was parsed from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Look up a value by unprefixed path.
    pub fn get(&self, path: &str) -> Option<&str> {
        self.map.get(&format!("{}{path}", self.prefix)).map(String::as_str)
    }

    /// Unprefixed keys that start with the given path prefix.
    fn keys_under<'a>(&'a self, path_prefix: &'a str) -> impl Iterator<Item = &'a str> {
        let full = format!("{}{path_prefix}", self.prefix);
        let strip = self.prefix.len();
        self.map
            .keys()
            .filter(move |k| k.starts_with(&full))
            .map(move |k| &k[strip..])
    }
}

/// Load one document into the store, returning the layout handle.
///
/// Reloading a document whose layout id already exists replaces the
/// previous layout entirely (delete then create).
pub fn load_document(store: &mut Store, doc: &FlatDoc) -> Result<Entity> {
    let root_path = "layout";
    let layout_id = doc
        .get(&format!("{root_path}{PATH_SEPARATOR}id"))
        .ok_or_else(|| {
            CoreError::Config(format!("{}: document has no layout id", doc.source()))
        })?
        .to_string();

    let default_interval = parse_interval(
        doc.get(&format!("{root_path}{PATH_SEPARATOR}refresh_interval")),
        1,
    )
    .map_err(|e| CoreError::Config(format!("layout '{layout_id}': {e}")))?;

    // Reload semantics: delete then create.
    if !store
        .list_by_prop(EntityKind::Layout, keys::ID, &layout_id.as_str().into())
        .is_empty()
    {
        debug!(layout = %layout_id, "reloading layout");
    }
    store.delete_by_prop(EntityKind::Layout, keys::ID, &layout_id.as_str().into());

    let layout = store.new_layout();
    store.set_prop(layout, keys::ID, layout_id.as_str());
    store.set_prop(layout, keys::SOURCE, doc.source());
    store.set_prop(layout, keys::DEFAULT_INTERVAL, default_interval);

    load_box(store, doc, layout, root_path, None, default_interval)?;
    Ok(layout)
}

/// Materialize the box at `path` and recurse into its children.
fn load_box(
    store: &mut Store,
    doc: &FlatDoc,
    layout: Entity,
    path: &str,
    parent_id: Option<&str>,
    default_interval: i64,
) -> Result<()> {
    let id = doc
        .get(&format!("{path}{PATH_SEPARATOR}id"))
        .ok_or_else(|| CoreError::Config(format!("box at '{path}' has no id")))?
        .to_string();

    let rel = match parent_id {
        // The root box always spans its layout.
        None => PctRect::FULL,
        Some(_) => read_position(doc, path)
            .map_err(|e| CoreError::Config(format!("box '{id}': {e}")))?,
    };

    let interval = parse_interval(
        doc.get(&format!("{path}{PATH_SEPARATOR}refresh_interval")),
        default_interval,
    )
    .map_err(|e| CoreError::Config(format!("box '{id}': {e}")))?;

    let fill = match doc.get(&format!("{path}{PATH_SEPARATOR}fill")) {
        None => false,
        Some("true") => true,
        Some("false") => false,
        Some(other) => {
            return Err(CoreError::Config(format!(
                "box '{id}': fill must be a boolean, got '{other}'"
            )));
        }
    };

    let fill_char = match doc.get(&format!("{path}{PATH_SEPARATOR}fill_char")) {
        None => DEFAULT_FILL_CHAR,
        Some(s) => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => c,
                _ => {
                    return Err(CoreError::Config(format!(
                        "box '{id}': fill_char must be a single character, got '{s}'"
                    )));
                }
            }
        }
    };

    let style_color = |key: &str, default: &str| {
        Color::parse(doc.get(&format!("{path}{PATH_SEPARATOR}{key}")).unwrap_or(default))
    };

    let title = doc
        .get(&format!("{path}{PATH_SEPARATOR}title"))
        .unwrap_or(&id)
        .to_string();

    // A later definition of the same box id replaces the earlier one.
    let duplicates = store.list_by_props(
        EntityKind::Box,
        (keys::LAYOUT, &layout.into()),
        (keys::ID, &id.as_str().into()),
    );
    for dup in duplicates {
        debug!(box_id = %id, "later definition replaces duplicate box id");
        store.delete(dup);
    }

    let bx = store.new_box(layout);
    store.set_prop(bx, keys::ID, id.as_str());
    store.set_prop(bx, keys::IS_ROOT, parent_id.is_none());
    if let Some(parent) = parent_id {
        store.set_prop(bx, keys::PARENT, parent);
    }
    store.set_prop(bx, keys::REL_RECT, rel);
    store.set_prop(bx, keys::INTERVAL, interval);
    store.set_prop(bx, keys::FILL, fill);
    store.set_prop(bx, keys::FILL_CHAR, fill_char);
    store.set_prop(bx, keys::FILL_COLOR, style_color("fill_color", "black"));
    store.set_prop(bx, keys::BORDER_COLOR, style_color("border_color", "white"));
    store.set_prop(bx, keys::TITLE, title);
    store.set_prop(bx, keys::TITLE_COLOR, style_color("title_color", "yellow"));
    store.set_prop(bx, keys::TEXT_COLOR, style_color("text_color", "white"));
    store.set_prop(bx, keys::BODY, "");

    load_events(store, doc, bx, path);

    // Children are enumerated 1-based; the walk stops at the first
    // missing id.
    let mut n = 1u32;
    loop {
        let child_path = format!("{path}{PATH_SEPARATOR}children{PATH_SEPARATOR}{n}");
        if doc.get(&format!("{child_path}{PATH_SEPARATOR}id")).is_none() {
            break;
        }
        load_box(store, doc, layout, &child_path, Some(&id), default_interval)?;
        n += 1;
    }

    Ok(())
}

/// Collect the box's `on_<name>` scripts and store them as events.
///
/// Event names form an open set: anything declared under `on_*` is
/// stored, though only `enter`, `leave`, and `refresh` are ever fired.
fn load_events(store: &mut Store, doc: &FlatDoc, bx: Entity, path: &str) {
    let on_prefix = format!("{path}{PATH_SEPARATOR}on_");
    let mut names: Vec<String> = vec!["enter".into(), "leave".into(), "refresh".into()];
    for key in doc.keys_under(&on_prefix) {
        let rest = &key[on_prefix.len()..];
        if let Some(name) = rest.split(PATH_SEPARATOR).next()
            && !name.is_empty()
            && !names.iter().any(|n| n == name)
        {
            names.push(name.to_string());
        }
    }

    for name in names {
        let mut commands = Vec::new();
        let mut k = 1u32;
        while let Some(cmd) =
            doc.get(&format!("{path}{PATH_SEPARATOR}on_{name}{PATH_SEPARATOR}{k}"))
        {
            commands.push(cmd.to_string());
            k += 1;
        }
        if commands.is_empty() {
            continue;
        }
        let ev = store.new_event(bx);
        store.set_prop(ev, keys::NAME, name.as_str());
        store.set_prop(ev, keys::SCRIPT, script::join_commands(&commands));
    }
}

/// Read and validate the four position percentages of a box.
fn read_position(doc: &FlatDoc, path: &str) -> Result<PctRect> {
    let coord = |name: &str| {
        doc.get(&format!(
            "{path}{PATH_SEPARATOR}position{PATH_SEPARATOR}{name}"
        ))
        .ok_or_else(|| CoreError::Config(format!("missing position {name}")))
    };
    PctRect::parse(coord("x1")?, coord("y1")?, coord("x2")?, coord("y2")?)
}

/// Parse a refresh interval: a positive integer number of seconds.
fn parse_interval(value: Option<&str>, default: i64) -> Result<i64> {
    let Some(raw) = value else {
        return Ok(default);
    };
    match raw.trim().parse::<i64>() {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(CoreError::Config(format!(
            "refresh_interval must be a positive integer, got '{raw}'"
        ))),
    }
}
