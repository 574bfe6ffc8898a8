//! Diagnostics reported while generating documentation
//!
//! Recoverable problems (an unresolvable reference, for example) never abort
//! a run. They are handed to a [`DiagnosticSink`] together with the offending
//! entity and its source position.

use std::fmt;

use tracing::{error, info, warn};

use crate::registry::{Entity, EntityId, Location};

/// How serious a diagnostic is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        })
    }
}

/// A message about one entity
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub entity: EntityId,
    /// Source position, when the entity is registered
    pub location: Option<Location>,
    pub message: String,
}

impl Diagnostic {
    pub fn new(severity: Severity, entity: EntityId, message: impl Into<String>) -> Self {
        Self {
            severity,
            entity,
            location: None,
            message: message.into(),
        }
    }

    /// A warning positioned at `entity`'s location when it is known
    pub fn warning(id: &EntityId, entity: Option<&Entity>, message: impl Into<String>) -> Self {
        Self {
            location: entity.map(|e| e.location.clone()),
            ..Self::new(Severity::Warning, id.clone(), message)
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(location) => write!(f, "{}: {} [{}]", location, self.message, self.entity),
            None => write!(f, "{} [{}]", self.message, self.entity),
        }
    }
}

/// Receiver for diagnostics
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn report(&mut self, diagnostic: Diagnostic) {
        (**self).report(diagnostic);
    }
}

/// Forwards diagnostics to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        let entity = &diagnostic.entity;
        match diagnostic.severity {
            Severity::Info => info!(%entity, "{}", diagnostic),
            Severity::Warning => warn!(%entity, "{}", diagnostic),
            Severity::Error => error!(%entity, "{}", diagnostic),
        }
    }
}

/// Keeps every diagnostic in memory
#[derive(Debug, Clone, Default)]
pub struct CollectingSink {
    diagnostics: Vec<Diagnostic>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Diagnostics with [`Severity::Warning`]
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn into_inner(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}
