//! The metadata graph: entities indexed by reference ID plus entry points

use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

use super::types::{Entity, EntityId};
use crate::error::{Error, Result};

/// Read-only mapping from reference ID to entity, with ordered entry points
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entities: IndexMap<EntityId, Entity>,
    entry_points: Vec<EntityId>,
}

/// On-disk shape of extracted metadata
#[derive(Deserialize)]
struct RegistryFile {
    #[serde(default)]
    entry_points: Vec<EntityId>,
    entities: Vec<Entity>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a registry from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid metadata.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse a registry from a JSON document.
    pub fn from_json(content: &str) -> Result<Self> {
        let file: RegistryFile = serde_json::from_str(content)?;
        Self::from_entities(file.entities, file.entry_points)
    }

    /// Build a registry from entities and the IDs of its entry points
    pub fn from_entities(
        entities: impl IntoIterator<Item = Entity>,
        entry_points: impl IntoIterator<Item = EntityId>,
    ) -> Result<Self> {
        let mut registry = Self::new();
        for entity in entities {
            registry.insert(entity)?;
        }
        for id in entry_points {
            registry.add_entry_point(id)?;
        }
        Ok(registry)
    }

    /// Add an entity. IDs must be unique.
    pub fn insert(&mut self, entity: Entity) -> Result<()> {
        if self.entities.contains_key(&entity.id) {
            return Err(Error::DuplicateEntity(entity.id));
        }
        self.entities.insert(entity.id.clone(), entity);
        Ok(())
    }

    /// Mark an already registered entity as an entry point
    pub fn add_entry_point(&mut self, id: EntityId) -> Result<()> {
        if !self.entities.contains_key(&id) {
            return Err(Error::UnknownEntryPoint(id));
        }
        self.entry_points.push(id);
        Ok(())
    }

    /// Look up an entity by reference ID
    pub fn get(&self, id: &str) -> Option<&Entity> {
        self.entities.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entities.contains_key(id)
    }

    /// All entities in insertion order
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    /// Entry points in the order they were registered
    pub fn entry_points(&self) -> &[EntityId] {
        &self.entry_points
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
