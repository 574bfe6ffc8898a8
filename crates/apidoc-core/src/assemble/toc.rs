//! Table of contents for container documents

use crate::registry::{ApiContext, EntityId};
use crate::render::markdown::link;
use crate::render::{member_kind_groups, Heading, ListItem, MarkdownBuilder, RenderResult};

const TITLE: &str = "Table of contents";

/// A top-level heading and its members, split by kind group
struct TocEntry<'r> {
    heading: &'r Heading,
    groups: Vec<(&'static str, Vec<&'r Heading>)>,
}

/// Headings that contribute to the table of contents
///
/// A heading qualifies only when at least one kind group of the document's
/// entity has members under it.
fn toc_entries<'r>(ctx: &ApiContext, result: &'r RenderResult) -> Vec<TocEntry<'r>> {
    let Some(groups) = ctx
        .kind_of(result.id.as_str())
        .and_then(member_kind_groups)
    else {
        return Vec::new();
    };

    result
        .headings
        .iter()
        .filter_map(|heading| {
            let grouped: Vec<(&'static str, Vec<&Heading>)> = groups
                .iter()
                .filter_map(|group| {
                    let members: Vec<&Heading> = heading
                        .members()
                        .iter()
                        .filter(|m| ctx.kind_of(m.id.as_str()).is_some_and(|k| group.contains(k)))
                        .collect();
                    (!members.is_empty()).then_some((group.heading, members))
                })
                .collect();
            (!grouped.is_empty()).then_some(TocEntry {
                heading,
                groups: grouped,
            })
        })
        .collect()
}

/// Table of contents of a rendered container, or nothing
///
/// Each top-level heading with grouped members contributes a link to itself
/// and one nested entry per kind group listing its members of that group.
pub fn render_table_of_contents(ctx: &ApiContext, result: &RenderResult) -> Vec<String> {
    let items: Vec<ListItem> = toc_entries(ctx, result)
        .into_iter()
        .map(|entry| {
            let groups = entry
                .groups
                .into_iter()
                .map(|(label, members)| {
                    let links = members
                        .into_iter()
                        .map(|m| ListItem::Text(link(&m.title, &m.id)))
                        .collect();
                    ListItem::Nested(label.to_string(), links)
                })
                .collect();
            ListItem::Nested(link(&entry.heading.title, &entry.heading.id), groups)
        })
        .collect();

    if items.is_empty() {
        return Vec::new();
    }

    let mut md = MarkdownBuilder::new();
    md.header(TITLE, 1)
        .empty_line()
        .unordered_list(&items)
        .empty_line();
    md.finish()
}

/// IDs linked from the table of contents, in order of appearance
pub(crate) fn linked_ids(ctx: &ApiContext, result: &RenderResult) -> Vec<EntityId> {
    let mut ids = Vec::new();
    for entry in toc_entries(ctx, result) {
        ids.push(entry.heading.id.clone());
        for (_, members) in entry.groups {
            ids.extend(members.into_iter().map(|m| m.id.clone()));
        }
    }
    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{Declaration, Entity, Registry};

    fn context() -> ApiContext {
        let class = Entity::new(
            "class:Baz",
            "Baz",
            Declaration::Class {
                type_parameters: Vec::new(),
                extends: None,
                implements: Vec::new(),
                members: vec!["method:qux".into(), "prop:size".into()],
                is_abstract: false,
            },
        );
        let qux = Entity::new(
            "method:qux",
            "qux",
            Declaration::Method {
                type_parameters: Vec::new(),
                parameters: Vec::new(),
                return_type: None,
                is_static: false,
                is_abstract: false,
                is_optional: false,
                is_async: false,
            },
        );
        let size = Entity::new(
            "prop:size",
            "size",
            Declaration::Property {
                ty: None,
                is_optional: false,
                is_readonly: false,
                is_static: false,
            },
        );
        let alias = Entity::new(
            "type:Bar",
            "Bar",
            Declaration::TypeAlias {
                type_parameters: Vec::new(),
                ty: None,
            },
        );
        let registry = Registry::from_entities(vec![class, qux, size, alias], Vec::new()).unwrap();
        ApiContext::new(registry).unwrap()
    }

    fn class_result() -> RenderResult {
        RenderResult::new("class:Baz".into()).with_heading(
            Heading::new("Baz", "class:Baz".into()).with_members(vec![
                Heading::new("qux", "method:qux".into()),
                Heading::new("size", "prop:size".into()),
            ]),
        )
    }

    #[test]
    fn test_groups_follow_declared_order() {
        let ctx = context();
        let toc = render_table_of_contents(&ctx, &class_result());

        assert_eq!(
            toc,
            vec![
                "# Table of contents",
                "",
                "- [Baz][class:Baz]",
                "    - Properties",
                "        - [size][prop:size]",
                "    - Methods",
                "        - [qux][method:qux]",
                "",
            ]
        );

        let ids: Vec<_> = linked_ids(&ctx, &class_result())
            .into_iter()
            .map(|id| id.as_str().to_string())
            .collect();
        assert_eq!(ids, vec!["class:Baz", "prop:size", "method:qux"]);
    }

    #[test]
    fn test_empty_without_members() {
        let ctx = context();
        let bare = RenderResult::new("class:Baz".into())
            .with_heading(Heading::new("Baz", "class:Baz".into()));
        assert!(render_table_of_contents(&ctx, &bare).is_empty());
        assert!(linked_ids(&ctx, &bare).is_empty());
    }

    #[test]
    fn test_empty_when_no_member_matches_a_group() {
        let ctx = context();
        // type:Bar is a type alias, which no class group lists
        let result = RenderResult::new("class:Baz".into()).with_heading(
            Heading::new("Baz", "class:Baz".into())
                .with_members(vec![Heading::new("Bar", "type:Bar".into())]),
        );

        assert!(render_table_of_contents(&ctx, &result).is_empty());
        assert!(linked_ids(&ctx, &result).is_empty());
    }

    #[test]
    fn test_empty_for_non_container() {
        let ctx = context();
        let alias = RenderResult::new("type:Bar".into()).with_heading(
            Heading::new("Bar", "type:Bar".into())
                .with_members(vec![Heading::new("qux", "method:qux".into())]),
        );
        assert!(render_table_of_contents(&ctx, &alias).is_empty());
    }
}
