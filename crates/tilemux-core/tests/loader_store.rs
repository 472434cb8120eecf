//! Loader + store integration: reload semantics and observational
//! equality.

use tilemux_core::loader::{load_document, FlatDoc};
use tilemux_core::store::{keys, Entity, EntityKind, Store};

/// A two-box dashboard document, flattened the way the parser would,
/// under the given prefix.
fn dashboard(prefix: &str) -> FlatDoc {
    let pairs = [
        ("layout___id", "dash"),
        ("layout___refresh_interval", "2"),
        ("layout___children___1___id", "cpu"),
        ("layout___children___1___position___x1", "0%"),
        ("layout___children___1___position___y1", "0%"),
        ("layout___children___1___position___x2", "50%"),
        ("layout___children___1___position___y2", "100%"),
        ("layout___children___1___title", "CPU"),
        ("layout___children___1___on_refresh___1", "uptime"),
        ("layout___children___2___id", "disk"),
        ("layout___children___2___position___x1", "50%"),
        ("layout___children___2___position___y1", "0%"),
        ("layout___children___2___position___x2", "100%"),
        ("layout___children___2___position___y2", "100%"),
        ("layout___children___2___on_refresh___1", "df -h"),
        ("layout___children___2___on_refresh___2", "date"),
        ("layout___children___2___on_leave___1", "echo bye"),
    ];
    FlatDoc::new(
        prefix,
        "dash.yaml",
        pairs
            .iter()
            .map(|(k, v)| (format!("{prefix}{k}"), (*v).to_string())),
    )
}

/// Observable shape of a loaded layout: ids, parents, scripts, titles.
fn observe(store: &Store, layout: Entity) -> Vec<(String, Option<String>, Vec<(String, String)>)> {
    store
        .boxes_in(layout)
        .into_iter()
        .map(|bx| {
            let id = store.get_str(bx, keys::ID).unwrap_or_default().to_string();
            let parent = store.get_str(bx, keys::PARENT).map(String::from);
            let events = store
                .events_of(bx)
                .into_iter()
                .map(|ev| {
                    (
                        store.get_str(ev, keys::NAME).unwrap_or_default().to_string(),
                        store.get_str(ev, keys::SCRIPT).unwrap_or_default().to_string(),
                    )
                })
                .collect();
            (id, parent, events)
        })
        .collect()
}

#[test]
fn single_load_shape() {
    let mut store = Store::new();
    let layout = load_document(&mut store, &dashboard("a1_")).ok();
    assert!(layout.is_some());
    let Some(layout) = layout else {
        return;
    };

    assert_eq!(store.count(EntityKind::Layout), 1);
    assert_eq!(store.count(EntityKind::Box), 3);
    assert_eq!(store.count(EntityKind::Event), 3);
    assert_eq!(store.get_str(layout, keys::ID), Some("dash"));

    let shape = observe(&store, layout);
    assert_eq!(shape[0].0, "dash");
    assert_eq!(shape[1].0, "cpu");
    assert_eq!(shape[1].1.as_deref(), Some("dash"));
    // Events materialize in enter/leave/refresh order.
    assert_eq!(
        shape[2].2,
        vec![
            ("leave".into(), "echo bye".into()),
            ("refresh".into(), "df -h____date".into()),
        ]
    );
}

#[test]
fn reload_is_observationally_equal() {
    let mut store = Store::new();
    let first = load_document(&mut store, &dashboard("a1_")).ok();
    let Some(first) = first else {
        return;
    };
    let first_shape = observe(&store, first);

    // Loading the same document again, under a different parse prefix,
    // replaces the layout but leaves the store looking the same.
    let second = load_document(&mut store, &dashboard("b2_")).ok();
    let Some(second) = second else {
        return;
    };

    assert!(!store.exists(first));
    assert_ne!(first, second);
    assert_eq!(store.count(EntityKind::Layout), 1);
    assert_eq!(store.count(EntityKind::Box), 3);
    assert_eq!(store.count(EntityKind::Event), 3);
    assert_eq!(observe(&store, second), first_shape);
}

#[test]
fn distinct_layouts_coexist() {
    let mut store = Store::new();
    let dash = load_document(&mut store, &dashboard("a1_")).ok();

    let other = FlatDoc::new(
        "c3_",
        "other.yaml",
        [("c3_layout___id".to_string(), "other".to_string())],
    );
    let other = load_document(&mut store, &other).ok();

    assert!(dash.is_some());
    assert!(other.is_some());
    assert_eq!(store.count(EntityKind::Layout), 2);
    // Reloading one must not disturb the other.
    let dash2 = load_document(&mut store, &dashboard("d4_")).ok();
    assert!(dash2.is_some());
    assert_eq!(store.count(EntityKind::Layout), 2);
    assert!(other.is_some_and(|o| store.exists(o)));
}

#[test]
fn defaults_fill_absent_style_fields() {
    let mut store = Store::new();
    let layout = load_document(&mut store, &dashboard("a1_")).ok();
    let Some(layout) = layout else {
        return;
    };
    let cpu = store.children_of(layout, "dash")[0];

    use tilemux_core::color::Color;
    assert_eq!(store.get_bool(cpu, keys::FILL), Some(false));
    assert_eq!(store.get_char(cpu, keys::FILL_CHAR), Some('█'));
    assert_eq!(
        store.get_color(cpu, keys::BORDER_COLOR),
        Some(&Color::parse("white"))
    );
    assert_eq!(
        store.get_color(cpu, keys::TITLE_COLOR),
        Some(&Color::parse("yellow"))
    );
    assert_eq!(
        store.get_color(cpu, keys::TEXT_COLOR),
        Some(&Color::parse("white"))
    );
    assert_eq!(
        store.get_color(cpu, keys::FILL_COLOR),
        Some(&Color::parse("black"))
    );
    // Declared title wins over the id default.
    assert_eq!(store.get_str(cpu, keys::TITLE), Some("CPU"));
    // The layout default interval propagates.
    assert_eq!(store.get_int(cpu, keys::INTERVAL), Some(2));
}
