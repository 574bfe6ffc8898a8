//! Read-only generation context
//!
//! [`ApiContext`] owns the registry together with an [`EntityView`] for every
//! entity. Views are derived once, up front, so renderers and the assembler
//! only ever read immutable data.

use std::collections::{HashMap, HashSet};

use super::graph::Registry;
use super::types::{ApiKind, Declaration, Entity, EntityId, TypeRef};
use crate::error::{Error, Result};

/// A parameter of a callable, resolved from its registry entity
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterView {
    pub id: EntityId,
    pub name: String,
    pub ty: Option<TypeRef>,
    pub is_optional: bool,
    pub is_spread: bool,
    pub initializer: Option<String>,
}

/// A type parameter, resolved from its registry entity
#[derive(Debug, Clone, PartialEq)]
pub struct TypeParameterView {
    pub id: EntityId,
    pub name: String,
    pub constraint: Option<TypeRef>,
    pub default: Option<TypeRef>,
}

/// Derived, immutable view of one entity
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityView {
    pub parameters: Vec<ParameterView>,
    pub type_parameters: Vec<TypeParameterView>,
    pub return_type: Option<TypeRef>,
    /// Explicit parent, or the container listing this entity as a member
    pub parent_item: Option<EntityId>,
}

/// The metadata registry plus precomputed views, threaded through every
/// rendering and assembly operation
#[derive(Debug, Clone)]
pub struct ApiContext {
    registry: Registry,
    views: HashMap<EntityId, EntityView>,
}

impl ApiContext {
    /// Validate the registry's structure and derive all entity views.
    ///
    /// # Errors
    ///
    /// Fails when a declaration names a member, parameter or type parameter
    /// that is not registered, or when a parent chain is cyclic.
    pub fn new(registry: Registry) -> Result<Self> {
        for entity in registry.entities() {
            for referenced in entity.declaration.structural_references() {
                if !registry.contains(referenced.as_str()) {
                    return Err(Error::UnknownReference {
                        from: entity.id.clone(),
                        to: referenced.clone(),
                    });
                }
            }
        }

        let mut containers: HashMap<&EntityId, &EntityId> = HashMap::new();
        for entity in registry.entities() {
            for member in entity.declaration.members() {
                containers.entry(member).or_insert(&entity.id);
            }
        }

        let mut views = HashMap::with_capacity(registry.len());
        for entity in registry.entities() {
            let parent_item = entity
                .parent
                .clone()
                .or_else(|| containers.get(&entity.id).map(|c| (*c).clone()));
            let view = EntityView {
                parameters: parameter_views(&registry, &entity.declaration),
                type_parameters: type_parameter_views(&registry, &entity.declaration),
                return_type: entity.declaration.return_type().cloned(),
                parent_item,
            };
            views.insert(entity.id.clone(), view);
        }

        check_parent_chains(&registry, &views)?;
        check_membership(&registry)?;

        Ok(Self { registry, views })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Look up an entity by reference ID
    pub fn entity(&self, id: &str) -> Option<&Entity> {
        self.registry.get(id)
    }

    /// Look up the derived view of an entity
    pub fn view(&self, id: &str) -> Option<&EntityView> {
        self.views.get(id)
    }

    /// The entity's lexical container, if any
    pub fn parent_of(&self, id: &str) -> Option<&EntityId> {
        self.views.get(id).and_then(|v| v.parent_item.as_ref())
    }

    pub fn kind_of(&self, id: &str) -> Option<ApiKind> {
        self.registry.get(id).map(Entity::kind)
    }
}

fn parameter_views(registry: &Registry, declaration: &Declaration) -> Vec<ParameterView> {
    declaration
        .parameters()
        .iter()
        .filter_map(|id| registry.get(id.as_str()))
        .filter_map(|entity| match &entity.declaration {
            Declaration::Parameter {
                ty,
                is_optional,
                is_spread,
                initializer,
            } => Some(ParameterView {
                id: entity.id.clone(),
                name: entity.name.clone(),
                ty: ty.clone(),
                is_optional: *is_optional,
                is_spread: *is_spread,
                initializer: initializer.clone(),
            }),
            _ => None,
        })
        .collect()
}

fn type_parameter_views(registry: &Registry, declaration: &Declaration) -> Vec<TypeParameterView> {
    declaration
        .type_parameters()
        .iter()
        .filter_map(|id| registry.get(id.as_str()))
        .filter_map(|entity| match &entity.declaration {
            Declaration::TypeParameter {
                constraint,
                default,
            } => Some(TypeParameterView {
                id: entity.id.clone(),
                name: entity.name.clone(),
                constraint: constraint.clone(),
                default: default.clone(),
            }),
            _ => None,
        })
        .collect()
}

/// Reject any parent chain that revisits an entity.
///
/// Parents that are not registered simply end the chain. Chains are walked
/// in registry order so the reported entity is stable.
fn check_parent_chains(registry: &Registry, views: &HashMap<EntityId, EntityView>) -> Result<()> {
    let mut acyclic: HashSet<&EntityId> = HashSet::new();

    for start in registry.entities().map(|e| &e.id) {
        let mut chain: Vec<&EntityId> = Vec::new();
        let mut seen: HashSet<&EntityId> = HashSet::new();
        let mut current = Some(start);

        while let Some(id) = current {
            if acyclic.contains(id) {
                break;
            }
            if !seen.insert(id) {
                return Err(Error::CyclicParentChain(start.clone()));
            }
            chain.push(id);
            current = views.get(id).and_then(|v| v.parent_item.as_ref());
        }

        acyclic.extend(chain);
    }

    Ok(())
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Visit {
    InProgress,
    Done,
}

/// Reject containers that reach themselves through `members`.
///
/// Depth-first over the member graph, in registry order. An explicit stack
/// keeps deep but valid nesting from exhausting the call stack.
fn check_membership(registry: &Registry) -> Result<()> {
    let mut state: HashMap<&EntityId, Visit> = HashMap::with_capacity(registry.len());

    for root in registry.entities() {
        if state.contains_key(&root.id) {
            continue;
        }

        state.insert(&root.id, Visit::InProgress);
        let mut stack = vec![(&root.id, root.declaration.members().iter())];

        while let Some((_, members)) = stack.last_mut() {
            let Some(member) = members.next() else {
                if let Some((id, _)) = stack.pop() {
                    state.insert(id, Visit::Done);
                }
                continue;
            };

            match state.get(member) {
                Some(Visit::InProgress) => return Err(Error::CyclicMembership(member.clone())),
                Some(Visit::Done) => {}
                None => {
                    state.insert(member, Visit::InProgress);
                    let children = registry
                        .get(member.as_str())
                        .map_or(&[][..], |e| e.declaration.members());
                    stack.push((member, children.iter()));
                }
            }
        }
    }

    Ok(())
}
