//! Entity render contract
//!
//! A renderer turns one entity into a [`RenderResult`]: Markdown lines, the
//! heading tree used for anchors and tables of contents, the set of entity IDs
//! linked from the content, and nested members that need documents of their
//! own. Rendering is a pure function of the entity and the [`ApiContext`]; it
//! never sees document assignment.

mod comment;
mod groups;
pub mod markdown;
mod renderer;
pub mod type_text;

use indexmap::IndexSet;

use crate::registry::{ApiContext, Entity, EntityId};

pub use comment::DocComment;
pub use groups::{member_kind_groups, KindGroup};
pub use markdown::{heading_to_anchor, ListItem, MarkdownBuilder};
pub use renderer::MarkdownRenderer;

/// Identity under which an entity is rendered
///
/// The alias differs from the entity's name when it is re-exported under
/// another name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceContext {
    pub alias: String,
    pub id: EntityId,
}

impl ReferenceContext {
    pub fn new(alias: impl Into<String>, id: EntityId) -> Self {
        Self {
            alias: alias.into(),
            id,
        }
    }

    /// Render an entity under its own name
    pub fn of(entity: &Entity) -> Self {
        Self::new(entity.name.clone(), entity.id.clone())
    }
}

/// One node of a document's heading tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    /// Display title; the anchor is derived from it
    pub title: String,
    /// Entity documented under this heading
    pub id: EntityId,
    pub members: Option<Vec<Heading>>,
}

impl Heading {
    pub fn new(title: impl Into<String>, id: EntityId) -> Self {
        Self {
            title: title.into(),
            id,
            members: None,
        }
    }

    /// Attach child headings; an empty list leaves the heading childless
    pub fn with_members(mut self, members: Vec<Heading>) -> Self {
        self.members = if members.is_empty() {
            None
        } else {
            Some(members)
        };
        self
    }

    /// Child headings, empty when there are none
    pub fn members(&self) -> &[Heading] {
        self.members.as_deref().unwrap_or_default()
    }
}

/// Output of rendering one entity
#[derive(Debug, Clone, PartialEq)]
pub struct RenderResult {
    /// Reference ID of the rendered entity
    pub id: EntityId,
    /// Markdown lines
    pub content: Vec<String>,
    pub headings: Vec<Heading>,
    /// Entity IDs linked from `content` as `[text][id]`, in first-use order
    pub used_references: IndexSet<EntityId>,
    /// Nested entities assembled into child documents
    pub members: Vec<RenderResult>,
}

impl RenderResult {
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            content: Vec::new(),
            headings: Vec::new(),
            used_references: IndexSet::new(),
            members: Vec::new(),
        }
    }

    pub fn with_content<I, S>(mut self, content: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.content = content.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_heading(mut self, heading: Heading) -> Self {
        self.headings.push(heading);
        self
    }

    pub fn with_reference(mut self, id: impl Into<EntityId>) -> Self {
        self.used_references.insert(id.into());
        self
    }

    pub fn with_member(mut self, member: RenderResult) -> Self {
        self.members.push(member);
        self
    }
}

/// Renders entities into Markdown fragments
pub trait Render {
    fn render(&self, ctx: &ApiContext, entity: &Entity, reference: &ReferenceContext) -> RenderResult;
}
