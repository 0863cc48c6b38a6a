//! Application-level orchestration.
//!
//! `request` owns the lifecycle of one generation call; `controller` runs those calls
//! on the runtime on behalf of presentation layers.

mod controller;
mod request;

pub(crate) use controller::{run_controller, UiCommand};
pub(crate) use request::RequestOrchestrator;
