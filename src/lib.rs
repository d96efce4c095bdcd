//! FlowCrush match-3 engine (workspace facade crate).
//!
//! This package exposes `flow_crush::{core,types}` while the implementation
//! lives in dedicated crates under `crates/`.

pub use flow_crush_core as core;
pub use flow_crush_types as types;
