//! Extracted API metadata
//!
//! The registry is produced by an upstream extraction step and is read-only
//! here. [`ApiContext`] wraps it with precomputed per-entity views.

mod context;
mod graph;
mod types;

pub use context::{ApiContext, EntityView, ParameterView, TypeParameterView};
pub use graph::Registry;
pub use types::{ApiKind, Declaration, Entity, EntityId, Location, TypeRef, VariableKind};
