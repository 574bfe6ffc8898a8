//! apidoc Core - cross-linked API documentation from extracted metadata
//!
//! This crate provides the core functionality:
//! - Registry: the read-only metadata graph and its precomputed entity views
//! - Render: the entity render contract and the reference Markdown renderer
//! - Assemble: document assignment, reference resolution, broken-link removal
//!   and tables of contents
//! - Generator: the end-to-end pipeline from registry to written files

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Metadata graph - entities, declarations and type references
pub mod registry;

/// Entity render contract and Markdown rendering
pub mod render;

/// Multi-document assembly and reference resolution
pub mod assemble;

/// Diagnostics reported during generation
pub mod diagnostics;

/// Generator configuration
pub mod config;

/// Generation pipeline
pub mod generator;

mod error;

pub use assemble::{remove_broken_links, FileManager, FileResult};
pub use config::GeneratorOptions;
pub use diagnostics::{CollectingSink, Diagnostic, DiagnosticSink, Severity, TracingSink};
pub use error::{Error, Result};
pub use generator::{write_files, Generator};
pub use registry::{ApiContext, ApiKind, Declaration, Entity, EntityId, Location, Registry, TypeRef};
pub use render::{Heading, MarkdownRenderer, ReferenceContext, Render, RenderResult};
