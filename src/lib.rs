// Public API for integration tests and potential library usage

pub mod api;
pub mod llm;
pub mod questions;
pub mod roster;
pub mod spin;
pub mod state;
pub mod store;
pub mod types;
