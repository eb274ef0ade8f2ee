//! Drone State Store
//!
//! Holds the current classification facts (latest reading, component state
//! per sensor kind, overall state) and derives the overall severity.

mod state;
mod store;

pub use state::{ComponentState, OverallState, StoreSnapshot};
pub use store::{FactId, StateStore};
