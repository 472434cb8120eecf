//! The supervisor: startup, the cooperative event loop, and guaranteed
//! teardown.
//!
//! One thread owns everything. Each loop iteration polls input with a
//! short timeout, dispatches at most one key fully (including both
//! redraws of a focus change), then evaluates the scheduler for the
//! current wall-clock second and runs due refresh scripts in
//! declaration order. Shutdown is cooperative: `q` or SIGINT is
//! observed at the top of the next iteration.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tracing::debug;

use tilemux_core::color::Color;
use tilemux_core::draw::{draw_box, BoxSkin};
use tilemux_core::error::{CoreError, Result};
use tilemux_core::event::InputEvent;
use tilemux_core::focus::{FocusChange, FocusRing};
use tilemux_core::frame::Frame;
use tilemux_core::geometry::Size;
use tilemux_core::loader::load_document;
use tilemux_core::resolve::{paint_order, resolve_layout};
use tilemux_core::runner::ProcessRunner;
use tilemux_core::schedule::Scheduler;
use tilemux_core::script::run_script;
use tilemux_core::store::{keys, Entity, Store};
use tilemux_core::terminal::{AnsiBackend, Terminal};

use crate::flatten::flatten_file;
use crate::input::{action_for, InputAction};
use crate::runner::ShellRunner;

/// Input poll timeout; also the cadence of scheduler evaluation.
const POLL_TIMEOUT: Duration = Duration::from_millis(50);

/// Load every configured document and return the layout to run.
pub fn load_layouts(store: &mut Store, configs: &[PathBuf], layout_id: &str) -> Result<Entity> {
    let mut target = None;
    for path in configs {
        let doc = flatten_file(path)?;
        let layout = load_document(store, &doc)?;
        if store.get_str(layout, keys::ID) == Some(layout_id) {
            target = Some(layout);
        }
    }
    target.ok_or_else(|| {
        CoreError::Config(format!(
            "layout '{layout_id}' not found in the loaded documents"
        ))
    })
}

/// The `start-layout` subcommand: load, take the terminal, loop.
pub fn run_start_layout(layout_id: &str, configs: &[PathBuf], focus_color: &str) -> Result<()> {
    // Configuration errors are fatal before the terminal is touched.
    let mut store = Store::new();
    let layout = load_layouts(&mut store, configs, layout_id)?;

    let shutdown = Arc::new(AtomicBool::new(false));
    signal_hook::flag::register(signal_hook::consts::SIGINT, Arc::clone(&shutdown))?;

    let runner = ShellRunner::new();
    let mut backend = AnsiBackend::new();
    run_layout(
        &mut store,
        layout,
        &mut backend,
        &runner,
        &Color::parse(focus_color),
        &shutdown,
    )
}

/// Run the event loop for one layout on the given backend.
///
/// The terminal is entered on the way in and left on the way out, on
/// success and on error alike (the backend's `Drop` backstops panics).
pub fn run_layout(
    store: &mut Store,
    layout: Entity,
    backend: &mut dyn Terminal,
    runner: &dyn ProcessRunner,
    focus_color: &Color,
    shutdown: &AtomicBool,
) -> Result<()> {
    backend.enter()?;
    let result = event_loop(store, layout, backend, runner, focus_color, shutdown);
    let left = backend.leave();
    result.and(left)
}

fn event_loop(
    store: &mut Store,
    layout: Entity,
    backend: &mut dyn Terminal,
    runner: &dyn ProcessRunner,
    focus_color: &Color,
    shutdown: &AtomicBool,
) -> Result<()> {
    let size = backend.size()?;
    let mut frame = Frame::new(size);
    resolve_layout(store, layout, size)?;

    let mut scheduler = Scheduler::new();
    scheduler.rebuild(store, layout);
    let mut focus = FocusRing::new();
    focus.rebuild(store, layout);

    redraw_all(store, layout, &mut frame, backend, focus.current(), focus_color)?;

    loop {
        if shutdown.load(Ordering::Relaxed) {
            return Ok(());
        }

        match backend.poll_event(POLL_TIMEOUT)? {
            Some(InputEvent::Key(key)) => match action_for(key) {
                InputAction::Quit => return Ok(()),
                InputAction::FocusNext => {
                    if let Some(change) = focus.next() {
                        apply_focus_change(store, runner, &mut frame, backend, change, focus_color)?;
                    }
                }
                InputAction::FocusPrev => {
                    if let Some(change) = focus.prev() {
                        apply_focus_change(store, runner, &mut frame, backend, change, focus_color)?;
                    }
                }
                InputAction::None => {}
            },
            Some(InputEvent::Resize(cols, rows)) => {
                let size = Size::new(cols, rows);
                frame.handle_resize(size);
                resolve_layout(store, layout, size)?;
                redraw_all(store, layout, &mut frame, backend, focus.current(), focus_color)?;
            }
            None => {}
        }

        let now = epoch_seconds();
        for bx in scheduler.due(now) {
            fire_event(store, runner, bx, "refresh");
            redraw_box(store, bx, &mut frame, backend, focus.current(), focus_color)?;
        }
    }
}

/// Leave the old box, enter the new one, redraw exactly the two.
fn apply_focus_change(
    store: &mut Store,
    runner: &dyn ProcessRunner,
    frame: &mut Frame,
    backend: &mut dyn Terminal,
    change: FocusChange,
    focus_color: &Color,
) -> Result<()> {
    fire_event(store, runner, change.from, "leave");
    fire_event(store, runner, change.to, "enter");
    redraw_box(store, change.from, frame, backend, Some(change.to), focus_color)?;
    redraw_box(store, change.to, frame, backend, Some(change.to), focus_color)
}

/// Run a box's named event script, if declared, and assign its output.
///
/// Script failures are non-fatal: the box keeps its previous body and
/// the failure goes to the debug log. Empty output leaves the body
/// unchanged as well.
fn fire_event(store: &mut Store, runner: &dyn ProcessRunner, bx: Entity, name: &str) {
    let Some(script) = store
        .event_named(bx, name)
        .and_then(|ev| store.get_str(ev, keys::SCRIPT).map(String::from))
    else {
        return;
    };
    match run_script(runner, &script) {
        Ok(output) if !output.is_empty() => store.set_prop(bx, keys::BODY, output),
        Ok(_) => {}
        Err(e) => {
            let id = store.get_str(bx, keys::ID).unwrap_or_default();
            debug!(box_id = id, event = name, error = %e, "event script failed");
        }
    }
}

/// Repaint one box and flush the delta.
fn redraw_box(
    store: &Store,
    bx: Entity,
    frame: &mut Frame,
    backend: &mut dyn Terminal,
    focused: Option<Entity>,
    focus_color: &Color,
) -> Result<()> {
    let skin = BoxSkin::from_store(store, bx)?;
    draw_box(frame.buffer_mut(), &skin, focused == Some(bx), focus_color);
    frame.flush(backend)
}

/// Clear and repaint the whole tree in declaration order.
fn redraw_all(
    store: &Store,
    layout: Entity,
    frame: &mut Frame,
    backend: &mut dyn Terminal,
    focused: Option<Entity>,
    focus_color: &Color,
) -> Result<()> {
    frame.full_clear(backend)?;
    for bx in paint_order(store, layout)? {
        let skin = BoxSkin::from_store(store, bx)?;
        draw_box(frame.buffer_mut(), &skin, focused == Some(bx), focus_color);
    }
    frame.flush(backend)
}

/// Wall-clock seconds since the epoch.
fn epoch_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
