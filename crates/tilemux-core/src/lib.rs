//! tilemux-core: a declarative box-tree terminal UI engine.
//!
//! This crate provides the engine behind tilemux: the layout store, the
//! percentage-based geometry resolver, the cell-buffer render pipeline,
//! the refresh scheduler, and focus traversal. The binary crate supplies
//! the collaborators (config parsing, shell execution, signals) and the
//! event loop that ties them together.

pub mod buffer;
pub mod cell;
pub mod color;
pub mod draw;
pub mod error;
pub mod event;
pub mod focus;
pub mod frame;
pub mod geometry;
pub mod loader;
pub mod renderer;
pub mod resolve;
pub mod runner;
pub mod schedule;
pub mod script;
pub mod store;
pub mod terminal;

pub use buffer::{CellChange, ScreenBuffer};
pub use cell::Cell;
pub use color::{Color, NamedColor, Style};
pub use draw::{draw_body, draw_border, draw_box, draw_fill, draw_title, BoxSkin};
pub use error::{CoreError, Result};
pub use event::{InputEvent, Key};
pub use focus::{FocusChange, FocusRing};
pub use frame::Frame;
pub use geometry::{PctRect, Rect, Size};
pub use loader::{load_document, FlatDoc, PATH_SEPARATOR};
pub use renderer::Renderer;
pub use resolve::{paint_order, resolve_layout, root_box};
pub use runner::{ProcessRunner, RunOutput};
pub use schedule::{ScheduleEntry, Scheduler};
pub use script::{join_commands, run_script, split_script, SCRIPT_SEPARATOR};
pub use store::{keys, Entity, EntityKind, PropValue, Store};
pub use terminal::{AnsiBackend, Terminal, TestBackend};
