//! Document assignment and reference resolution

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use super::paths;
use super::sanitize::remove_broken_links;
use super::toc::{linked_ids, render_table_of_contents};
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::error::{Error, Result};
use crate::registry::{ApiContext, EntityId};
use crate::render::markdown::{heading_to_anchor, link_definition};
use crate::render::{Heading, RenderResult};

const UNRESOLVED_MESSAGE: &str =
    "declaration is used as a type but is not exported from any entry file";

/// One output document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileResult {
    /// `/`-separated path relative to the output directory
    pub file_location: String,
    pub content: Vec<String>,
}

impl FileResult {
    /// Document text with a trailing newline
    pub fn to_text(&self) -> String {
        let mut text = self.content.join("\n");
        text.push('\n');
        text
    }
}

/// Assigns rendered results to document paths and resolves cross-document
/// links between them
#[derive(Debug)]
pub struct FileManager<'a> {
    ctx: &'a ApiContext,
    extension: String,
    /// Document path to its rendered content; later writes replace earlier ones
    documents: IndexMap<String, RenderResult>,
    /// Entity ID to `path#anchor`; the first write wins
    anchor_index: HashMap<EntityId, String>,
}

impl<'a> FileManager<'a> {
    pub fn new(ctx: &'a ApiContext, extension: impl Into<String>) -> Self {
        Self {
            ctx,
            extension: extension.into(),
            documents: IndexMap::new(),
            anchor_index: HashMap::new(),
        }
    }

    /// Add an entry point's rendered result at a path derived from its
    /// source file name.
    ///
    /// # Errors
    ///
    /// Fails when the result's entity is not registered or its source file
    /// name has no usable stem.
    pub fn add_entry_document(&mut self, result: RenderResult) -> Result<()> {
        let entity = self
            .ctx
            .entity(result.id.as_str())
            .ok_or_else(|| Error::UnknownEntity(result.id.clone()))?;
        let path = paths::entry_document_path(&entity.location.file_name, &self.extension)
            .ok_or_else(|| Error::InvalidDocumentPath {
                id: result.id.clone(),
                source_name: entity.location.file_name.clone(),
            })?;

        self.add_item(result, &path)
    }

    /// Bind a rendered result to `path`, index its headings and place its
    /// members in child documents.
    ///
    /// # Errors
    ///
    /// Fails when a member's entity is not registered.
    pub fn add_item(&mut self, mut result: RenderResult, path: &str) -> Result<()> {
        let members = std::mem::take(&mut result.members);

        self.index_headings(&result.headings, path);
        if self.documents.insert(path.to_string(), result).is_some() {
            debug!(path, "replacing document content");
        }

        for member in members {
            let name = self
                .ctx
                .entity(member.id.as_str())
                .map(|e| e.name.clone())
                .ok_or_else(|| Error::UnknownEntity(member.id.clone()))?;
            let child = paths::member_document_path(path, &name, &self.extension);
            self.add_item(member, &child)?;
        }

        Ok(())
    }

    fn index_headings(&mut self, headings: &[Heading], path: &str) {
        for heading in headings {
            self.anchor_index
                .entry(heading.id.clone())
                .or_insert_with(|| format!("{}#{}", path, heading_to_anchor(&heading.title)));
            self.index_headings(heading.members(), path);
        }
    }

    /// Indexed `path#anchor` of an entity, without walking parents
    pub fn anchor(&self, id: &str) -> Option<&str> {
        self.anchor_index.get(id).map(String::as_str)
    }

    /// Document paths in insertion order
    pub fn document_paths(&self) -> impl Iterator<Item = &str> {
        self.documents.keys().map(String::as_str)
    }

    /// Find the `path#anchor` documenting `id`, falling back to the nearest
    /// indexed ancestor
    pub fn resolve_reference_document(&self, id: &str) -> Option<String> {
        let mut current = id;
        loop {
            if let Some(anchor) = self.anchor_index.get(current) {
                return Some(anchor.clone());
            }
            current = self.ctx.parent_of(current)?.as_str();
        }
    }

    /// Produce the final documents in insertion order.
    ///
    /// Every used reference either becomes a link definition appended to the
    /// content, or is stripped from the content and reported as a warning.
    pub fn to_files_output(
        &self,
        skip_table_of_contents: bool,
        sink: &mut dyn DiagnosticSink,
    ) -> Vec<FileResult> {
        let mut files = Vec::with_capacity(self.documents.len());

        for (location, result) in &self.documents {
            let toc = if skip_table_of_contents {
                Vec::new()
            } else {
                render_table_of_contents(self.ctx, result)
            };

            let mut references: Vec<&EntityId> = result.used_references.iter().collect();
            let toc_ids = if toc.is_empty() {
                Vec::new()
            } else {
                linked_ids(self.ctx, result)
            };
            for id in &toc_ids {
                if !result.used_references.contains(id) && !references.contains(&id) {
                    references.push(id);
                }
            }

            let directory = paths::dirname(location);
            let mut content = result.content.clone();
            let mut definitions = Vec::new();
            for id in references {
                match self.resolve_reference_document(id.as_str()) {
                    Some(target) => {
                        definitions.push(link_definition(id, &paths::relative(directory, &target)));
                    }
                    None => {
                        content = remove_broken_links(&content, id);
                        sink.report(Diagnostic::warning(
                            id,
                            self.ctx.entity(id.as_str()),
                            UNRESOLVED_MESSAGE,
                        ));
                    }
                }
            }

            debug!(
                location = location.as_str(),
                links = definitions.len(),
                "assembled document"
            );

            let mut lines = toc;
            lines.extend(content);
            lines.extend(definitions);
            files.push(FileResult {
                file_location: paths::standardize(location),
                content: lines,
            });
        }

        files
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::CollectingSink;
    use crate::registry::{Declaration, Entity, Location, Registry};

    fn method(id: &str, name: &str) -> Entity {
        Entity::new(
            id,
            name,
            Declaration::Method {
                type_parameters: Vec::new(),
                parameters: Vec::new(),
                return_type: None,
                is_static: false,
                is_abstract: false,
                is_optional: false,
                is_async: false,
            },
        )
    }

    fn context() -> ApiContext {
        let file = Entity::new(
            "file:baz",
            "baz",
            Declaration::SourceFile {
                members: vec!["func:foo".into(), "class:Baz".into()],
            },
        )
        .with_location(Location::new("src/baz.ts", 1, 1));
        let foo = Entity::new(
            "func:foo",
            "foo",
            Declaration::Function {
                type_parameters: Vec::new(),
                parameters: Vec::new(),
                return_type: None,
                is_async: false,
            },
        )
        .with_location(Location::new("src/baz.ts", 3, 1));
        let class = Entity::new(
            "class:Baz",
            "Baz",
            Declaration::Class {
                type_parameters: Vec::new(),
                extends: None,
                implements: Vec::new(),
                members: vec!["method:qux".into()],
                is_abstract: false,
            },
        )
        .with_location(Location::new("src/baz.ts", 10, 1));
        let bar = Entity::new(
            "type:Bar",
            "Bar",
            Declaration::TypeAlias {
                type_parameters: Vec::new(),
                ty: None,
            },
        )
        .with_location(Location::new("src/internal.ts", 7, 3));
        let orphan = Entity::new("prop:orphan", "orphan", Declaration::EnumMember { value: None })
            .with_parent("type:Bar");

        let registry = Registry::from_entities(
            vec![file, foo, class, method("method:qux", "qux"), bar, orphan],
            vec!["file:baz".into()],
        )
        .unwrap();
        ApiContext::new(registry).unwrap()
    }

    fn foo_result() -> RenderResult {
        RenderResult::new("func:foo".into())
            .with_content(["# foo", "", "**Returns**: [Bar][type:Bar]"])
            .with_heading(Heading::new("foo", "func:foo".into()))
            .with_reference("func:foo")
            .with_reference("type:Bar")
    }

    fn baz_result() -> RenderResult {
        RenderResult::new("class:Baz".into())
            .with_content(["# Baz", "", "### qux"])
            .with_heading(
                Heading::new("Baz", "class:Baz".into())
                    .with_members(vec![Heading::new("qux", "method:qux".into())]),
            )
            .with_reference("class:Baz")
    }

    fn output(manager: &FileManager<'_>, skip_toc: bool) -> (Vec<FileResult>, CollectingSink) {
        let mut sink = CollectingSink::new();
        let files = manager.to_files_output(skip_toc, &mut sink);
        (files, sink)
    }

    #[test]
    fn test_member_document_path_and_anchor() {
        let ctx = context();
        let mut manager = FileManager::new(&ctx, "md");
        let baz = RenderResult::new("class:Baz".into())
            .with_heading(Heading::new("Baz", "class:Baz".into()))
            .with_member(
                RenderResult::new("method:qux".into())
                    .with_heading(Heading::new("qux", "method:qux".into())),
            );

        manager.add_item(baz, "baz.md").unwrap();

        let paths: Vec<_> = manager.document_paths().collect();
        assert_eq!(paths, vec!["baz.md", "baz/qux.md"]);
        assert_eq!(
            manager.resolve_reference_document("method:qux").as_deref(),
            Some("baz/qux.md#qux")
        );
        assert_eq!(manager.anchor("class:Baz"), Some("baz.md#baz"));
    }

    #[test]
    fn test_entry_document_uses_source_stem() {
        let ctx = context();
        let mut manager = FileManager::new(&ctx, "md");
        let file = RenderResult::new("file:baz".into())
            .with_content(["# baz"])
            .with_heading(Heading::new("baz", "file:baz".into()));

        manager.add_entry_document(file).unwrap();
        assert_eq!(manager.document_paths().collect::<Vec<_>>(), vec!["baz.md"]);
    }

    #[test]
    fn test_entry_document_errors() {
        let ctx = context();
        let mut manager = FileManager::new(&ctx, "md");

        let unknown = manager.add_entry_document(RenderResult::new("file:missing".into()));
        assert!(matches!(unknown, Err(Error::UnknownEntity(_))));

        // method:qux has no location, so there is no stem to derive a path from
        let no_path = manager.add_entry_document(RenderResult::new("method:qux".into()));
        assert!(matches!(no_path, Err(Error::InvalidDocumentPath { .. })));
    }

    #[test]
    fn test_unresolved_reference_is_stripped_and_reported() {
        let ctx = context();
        let mut manager = FileManager::new(&ctx, "md");
        manager.add_item(foo_result(), "index.md").unwrap();

        let (files, sink) = output(&manager, true);
        assert_eq!(files.len(), 1);
        assert_eq!(
            files[0].content,
            vec!["# foo", "", "**Returns**: Bar", "[func:foo]: index.md#foo"]
        );

        let warnings: Vec<_> = sink.warnings().collect();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].entity.as_str(), "type:Bar");
        assert_eq!(warnings[0].message, UNRESOLVED_MESSAGE);
        assert!(warnings[0].location.is_some());
    }

    #[test]
    fn test_one_warning_per_document() {
        let ctx = context();
        let mut manager = FileManager::new(&ctx, "md");
        manager.add_item(foo_result(), "a.md").unwrap();
        manager.add_item(foo_result().with_content(["[Bar][type:Bar]"]), "b.md").unwrap();

        let (files, sink) = output(&manager, true);
        assert_eq!(files[1].content[0], "Bar");
        assert_eq!(sink.warnings().count(), 2);
    }

    #[test]
    fn test_overwrite_keeps_first_anchors() {
        let ctx = context();
        let mut manager = FileManager::new(&ctx, "md");
        manager.add_item(foo_result(), "index.md").unwrap();
        manager.add_item(baz_result(), "other.md").unwrap();
        manager.add_item(baz_result().with_content(["# Replaced"]), "index.md").unwrap();

        // Position of the first insertion is kept
        let paths: Vec<_> = manager.document_paths().collect();
        assert_eq!(paths, vec!["index.md", "other.md"]);

        let (files, _) = output(&manager, true);
        assert_eq!(files[0].content[0], "# Replaced");

        // func:foo keeps its first anchor; class:Baz was first indexed in other.md
        assert_eq!(manager.anchor("func:foo"), Some("index.md#foo"));
        assert_eq!(manager.anchor("class:Baz"), Some("other.md#baz"));
    }

    #[test]
    fn test_resolution_walks_parents() {
        let ctx = context();
        let mut manager = FileManager::new(&ctx, "md");
        manager.add_item(baz_result(), "baz.md").unwrap();

        assert_eq!(manager.resolve_reference_document("class:Baz").as_deref(), Some("baz.md#baz"));
        // Container of class:Baz is file:baz, which has no anchor and no parent
        assert_eq!(manager.resolve_reference_document("file:baz"), None);
        assert_eq!(manager.resolve_reference_document("prop:orphan"), None);
        assert_eq!(manager.resolve_reference_document("not:registered"), None);

        let bar = RenderResult::new("type:Bar".into())
            .with_heading(Heading::new("Bar", "type:Bar".into()));
        manager.add_item(bar, "types/bar.md").unwrap();
        assert_eq!(
            manager.resolve_reference_document("prop:orphan").as_deref(),
            Some("types/bar.md#bar")
        );
    }

    #[test]
    fn test_relative_link_definitions() {
        let ctx = context();
        let mut manager = FileManager::new(&ctx, "md");
        let baz = RenderResult::new("class:Baz".into())
            .with_content(["# Baz"])
            .with_heading(Heading::new("Baz", "class:Baz".into()))
            .with_member(
                RenderResult::new("method:qux".into())
                    .with_content(["# qux", "Back to [Baz][class:Baz]"])
                    .with_heading(Heading::new("qux", "method:qux".into()))
                    .with_reference("class:Baz")
                    .with_reference("method:qux"),
            )
            .with_reference("method:qux");
        manager.add_item(baz, "baz.md").unwrap();

        let (files, sink) = output(&manager, true);
        assert!(sink.is_empty());
        assert_eq!(files[0].content.last().unwrap(), "[method:qux]: baz/qux.md#qux");
        assert_eq!(files[1].file_location, "baz/qux.md");
        assert_eq!(
            &files[1].content[2..],
            &["[class:Baz]: ../baz.md#baz".to_string(), "[method:qux]: qux.md#qux".to_string()]
        );
    }

    #[test]
    fn test_table_of_contents_prepended_and_linked() {
        let ctx = context();
        let mut manager = FileManager::new(&ctx, "md");
        manager.add_item(baz_result(), "baz.md").unwrap();

        let (files, _) = output(&manager, false);
        let content = &files[0].content;
        assert_eq!(content[0], "# Table of contents");
        assert!(content.contains(&"        - [qux][method:qux]".to_string()));
        assert!(content.contains(&"[method:qux]: baz.md#qux".to_string()));

        let (skipped, _) = output(&manager, true);
        assert_eq!(skipped[0].content[0], "# Baz");
    }

    #[test]
    fn test_output_is_idempotent() {
        let ctx = context();
        let mut manager = FileManager::new(&ctx, "md");
        manager.add_item(foo_result(), "index.md").unwrap();
        manager.add_item(baz_result(), "baz.md").unwrap();

        let (first, first_sink) = output(&manager, false);
        let (second, second_sink) = output(&manager, false);
        assert_eq!(first, second);
        assert_eq!(first_sink.diagnostics(), second_sink.diagnostics());
    }

    #[test]
    fn test_file_text() {
        let file = FileResult {
            file_location: "index.md".to_string(),
            content: vec!["# index".to_string(), String::new()],
        };
        assert_eq!(file.to_text(), "# index\n\n");
    }
}
