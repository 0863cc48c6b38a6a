//! Framework-independent view layer: state container plus the controller that runs
//! its effects.

mod controller;
pub mod state;

pub use controller::{ClipboardSink, ViewController};
pub use state::{Action, DraftEdit, RequestStatus};
