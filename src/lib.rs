//! Bagtris (workspace facade crate).
//!
//! Re-exports the workspace crates as `bagtris::{core,input,term,types}` so the
//! binary, integration tests and benches share one import path.

pub use bagtris_core as core;
pub use bagtris_input as input;
pub use bagtris_term as term;
pub use bagtris_types as types;
