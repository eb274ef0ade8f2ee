//! Action Dispatch
//!
//! Maps the overall severity onto a fixed operator action and emits it.

mod action;
mod dispatcher;

pub use action::Action;
pub use dispatcher::{ActionDispatcher, ActionLog, ActionSink, DispatchConfig};
