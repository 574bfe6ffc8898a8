//! Errors that abort a generation run.
//!
//! Unresolvable references are not errors; they are reported through a
//! [`DiagnosticSink`](crate::DiagnosticSink) and the run continues.

use std::path::PathBuf;

use thiserror::Error;

use crate::registry::EntityId;

/// Errors that can occur while loading metadata or assembling documents.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse metadata: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to parse configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("invalid configuration value for '{field}': {reason}")]
    InvalidOption { field: &'static str, reason: String },

    #[error("entity '{0}' is defined more than once")]
    DuplicateEntity(EntityId),

    #[error("entity '{0}' is not present in the registry")]
    UnknownEntity(EntityId),

    #[error("entry point '{0}' is not present in the registry")]
    UnknownEntryPoint(EntityId),

    #[error("entity '{from}' references unknown entity '{to}'")]
    UnknownReference { from: EntityId, to: EntityId },

    #[error("parent chain of '{0}' is cyclic")]
    CyclicParentChain(EntityId),

    #[error("entity '{0}' is its own member through a chain of containers")]
    CyclicMembership(EntityId),

    #[error("cannot compute a document path for '{id}' from '{source_name}'")]
    InvalidDocumentPath { id: EntityId, source_name: String },

    #[error("failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
