//! Markdown renderer for every entity kind
//!
//! Source files and namespaces become documents that render their simple
//! members inline and hand classes, interfaces and namespaces back as nested
//! members. Classes and interfaces render all of their members inline.

use indexmap::IndexSet;
use tracing::debug;

use super::comment::DocComment;
use super::groups::member_kind_groups;
use super::markdown::{inline_code, link, ListItem, MarkdownBuilder};
use super::type_text::{linked, plain, plain_or_unknown, type_parameters_plain};
use super::{Heading, ReferenceContext, Render, RenderResult};
use crate::config::GeneratorOptions;
use crate::registry::{ApiContext, Declaration, Entity, EntityId, EntityView, ParameterView};

/// Heading level of a document's own title
const TITLE_LEVEL: usize = 1;
const GROUP_LEVEL: usize = TITLE_LEVEL + 1;
const MEMBER_LEVEL: usize = TITLE_LEVEL + 2;

const CODE_INDENT: &str = "    ";

/// Renders entities as Markdown with reference-style cross links
#[derive(Debug, Clone)]
pub struct MarkdownRenderer {
    code_language: String,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new(GeneratorOptions::default().code_language)
    }
}

impl Render for MarkdownRenderer {
    fn render(&self, ctx: &ApiContext, entity: &Entity, reference: &ReferenceContext) -> RenderResult {
        match &entity.declaration {
            Declaration::SourceFile { members } | Declaration::Namespace { members } => {
                self.render_module(ctx, entity, reference, members)
            }
            Declaration::Class { .. } | Declaration::Interface { .. } => {
                self.render_container(ctx, entity, reference)
            }
            _ => {
                let mut result = self.render_item(ctx, entity, &reference.alias, TITLE_LEVEL);
                result.id = reference.id.clone();
                result
            }
        }
    }
}

impl MarkdownRenderer {
    pub fn new(code_language: impl Into<String>) -> Self {
        Self {
            code_language: code_language.into(),
        }
    }

    pub fn from_options(options: &GeneratorOptions) -> Self {
        Self::new(options.code_language.clone())
    }

    /// Source file or namespace
    fn render_module(
        &self,
        ctx: &ApiContext,
        entity: &Entity,
        reference: &ReferenceContext,
        members: &[EntityId],
    ) -> RenderResult {
        let mut result = RenderResult::new(reference.id.clone());
        result.used_references.insert(entity.id.clone());
        let doc = parse_doc(entity);

        let mut md = MarkdownBuilder::new();
        md.header(&reference.alias, TITLE_LEVEL).empty_line();
        write_metadata(&mut md, &doc);

        log_ungrouped(ctx, entity, members);
        let mut member_headings = Vec::new();
        for group in member_kind_groups(entity.kind()).unwrap_or_default() {
            let group_members: Vec<&Entity> = members
                .iter()
                .filter_map(|id| ctx.entity(id.as_str()))
                .filter(|m| group.contains(m.kind()))
                .collect();
            if group_members.is_empty() {
                continue;
            }

            md.header(group.heading, GROUP_LEVEL).empty_line();

            let mut nested = Vec::new();
            for member in group_members {
                if member.kind().has_own_document() {
                    let summary = parse_doc(member).summary;
                    let entry = link(&member.name, &member.id);
                    nested.push(ListItem::Text(if summary.is_empty() {
                        entry
                    } else {
                        format!("{} - {}", entry, summary)
                    }));
                    result.used_references.insert(member.id.clone());
                    result
                        .members
                        .push(self.render(ctx, member, &ReferenceContext::of(member)));
                } else {
                    let item = self.render_item(ctx, member, &member.name, MEMBER_LEVEL);
                    md.lines(item.content);
                    member_headings.extend(item.headings);
                    result.used_references.extend(item.used_references);
                }
            }

            if !nested.is_empty() {
                md.unordered_list(&nested).empty_line();
            }
        }

        result.content = md.finish();
        result
            .headings
            .push(Heading::new(reference.alias.clone(), reference.id.clone()).with_members(member_headings));
        result
    }

    /// Class or interface: one document with every member inline
    fn render_container(
        &self,
        ctx: &ApiContext,
        entity: &Entity,
        reference: &ReferenceContext,
    ) -> RenderResult {
        let mut result = RenderResult::new(reference.id.clone());
        result.used_references.insert(entity.id.clone());
        let doc = parse_doc(entity);
        let empty = EntityView::default();
        let view = ctx.view(entity.id.as_str()).unwrap_or(&empty);

        let mut md = MarkdownBuilder::new();
        md.header(&reference.alias, TITLE_LEVEL).empty_line();
        write_metadata(&mut md, &doc);
        md.code(
            &signature(ctx, entity, &reference.alias, view),
            &self.code_language,
        );
        write_details(&mut md, entity, view, &doc, &mut result.used_references);

        log_ungrouped(ctx, entity, entity.declaration.members());
        let mut member_headings = Vec::new();
        for group in member_kind_groups(entity.kind()).unwrap_or_default() {
            let group_members: Vec<&Entity> = entity
                .declaration
                .members()
                .iter()
                .filter_map(|id| ctx.entity(id.as_str()))
                .filter(|m| group.contains(m.kind()))
                .collect();
            if group_members.is_empty() {
                continue;
            }

            md.header(group.heading, GROUP_LEVEL).empty_line();
            for member in group_members {
                let item = self.render_item(ctx, member, &member.name, MEMBER_LEVEL);
                md.lines(item.content);
                member_headings.extend(item.headings);
                result.used_references.extend(item.used_references);
            }
        }

        result.content = md.finish();
        result
            .headings
            .push(Heading::new(reference.alias.clone(), reference.id.clone()).with_members(member_headings));
        result
    }

    /// Any non-container entity under a heading of the given level
    fn render_item(&self, ctx: &ApiContext, entity: &Entity, title: &str, level: usize) -> RenderResult {
        let mut result = RenderResult::new(entity.id.clone());
        result.used_references.insert(entity.id.clone());
        let doc = parse_doc(entity);
        let empty = EntityView::default();
        let view = ctx.view(entity.id.as_str()).unwrap_or(&empty);

        let mut md = MarkdownBuilder::new();
        md.header(title, level).empty_line();
        write_metadata(&mut md, &doc);
        let code = signature(ctx, entity, title, view);
        if !code.is_empty() {
            md.code(&code, &self.code_language);
        }
        write_details(&mut md, entity, view, &doc, &mut result.used_references);

        result.content = md.finish();
        result.headings.push(Heading::new(title, entity.id.clone()));
        result
    }
}

/// Members of `container` whose kind is listed in none of its groups
fn ungrouped_members<'c>(ctx: &'c ApiContext, container: &Entity, members: &[EntityId]) -> Vec<&'c Entity> {
    let groups = member_kind_groups(container.kind()).unwrap_or_default();
    members
        .iter()
        .filter_map(|id| ctx.entity(id.as_str()))
        .filter(|m| !groups.iter().any(|g| g.contains(m.kind())))
        .collect()
}

fn log_ungrouped(ctx: &ApiContext, container: &Entity, members: &[EntityId]) {
    for member in ungrouped_members(ctx, container, members) {
        debug!(
            container = %container.id,
            member = %member.id,
            kind = member.kind().display_name(),
            "member kind is not listed by its container; skipped"
        );
    }
}

fn parse_doc(entity: &Entity) -> DocComment {
    entity
        .doc
        .as_deref()
        .map(DocComment::parse)
        .unwrap_or_default()
}

/// Release markers and the free-text part of the doc comment
fn write_metadata(md: &mut MarkdownBuilder, doc: &DocComment) {
    if let Some(reason) = &doc.deprecated {
        let text = if reason.is_empty() {
            "Warning: Deprecated.".to_string()
        } else {
            format!("Warning: Deprecated. {}", reason)
        };
        md.blockquote(&text).empty_line();
    }
    if doc.beta {
        md.blockquote("Warning: Beta.").empty_line();
    }
    if doc.internal {
        md.blockquote("Warning: Internal.").empty_line();
    }
    if !doc.summary.is_empty() {
        md.text(&doc.summary).empty_line();
    }
    if let Some(description) = &doc.description {
        md.text(description).empty_line();
    }
}

/// Prose sections with linked types
fn write_details(
    md: &mut MarkdownBuilder,
    entity: &Entity,
    view: &EntityView,
    doc: &DocComment,
    used: &mut IndexSet<EntityId>,
) {
    match &entity.declaration {
        Declaration::Class {
            extends,
            implements,
            ..
        } => {
            if let Some(base) = extends {
                md.text(&format!("**Extends**: {}", linked(base, used)))
                    .empty_line();
            }
            if !implements.is_empty() {
                let list: Vec<String> = implements.iter().map(|t| linked(t, used)).collect();
                md.text(&format!("**Implements**: {}", list.join(", ")))
                    .empty_line();
            }
        }
        Declaration::Interface { extends, .. } if !extends.is_empty() => {
            let list: Vec<String> = extends.iter().map(|t| linked(t, used)).collect();
            md.text(&format!("**Extends**: {}", list.join(", ")))
                .empty_line();
        }
        _ => {}
    }

    if !view.type_parameters.is_empty() {
        let items: Vec<ListItem> = view
            .type_parameters
            .iter()
            .map(|tp| {
                let mut text = inline_code(&tp.name);
                if let Some(constraint) = &tp.constraint {
                    text.push_str(&format!(" extends {}", linked(constraint, used)));
                }
                if let Some(default) = &tp.default {
                    text.push_str(&format!(" = {}", linked(default, used)));
                }
                ListItem::Text(text)
            })
            .collect();
        md.text("**Type parameters**")
            .empty_line()
            .unordered_list(&items)
            .empty_line();
    }

    if !view.parameters.is_empty() {
        let items: Vec<ListItem> = view
            .parameters
            .iter()
            .map(|param| {
                let ty = param
                    .ty
                    .as_ref()
                    .map_or_else(|| plain_or_unknown(None), |t| linked(t, used));
                let mut text = format!("{}: {}", inline_code(&param.name), ty);
                if param.is_optional {
                    text.push_str(" (optional)");
                }
                if let Some(description) = doc.param(&param.name) {
                    text.push_str(&format!(" - {}", description));
                }
                ListItem::Text(text)
            })
            .collect();
        md.text("**Parameters**")
            .empty_line()
            .unordered_list(&items)
            .empty_line();
    }

    if let Some(return_type) = &view.return_type {
        let mut text = format!("**Returns**: {}", linked(return_type, used));
        if let Some(description) = doc.returns.as_deref().filter(|d| !d.is_empty()) {
            text.push_str(&format!(" - {}", description));
        }
        md.text(&text).empty_line();
    }

    let value_type = match &entity.declaration {
        Declaration::Property { ty, .. }
        | Declaration::Index { ty, .. }
        | Declaration::TypeAlias { ty, .. }
        | Declaration::Variable { ty, .. }
        | Declaration::Parameter { ty, .. } => ty.as_ref(),
        _ => None,
    };
    if let Some(ty) = value_type {
        md.text(&format!("**Type**: {}", linked(ty, used)))
            .empty_line();
    }

    if !doc.examples.is_empty() {
        md.text("**Examples**").empty_line();
        for example in &doc.examples {
            let lines: Vec<String> = example.lines().map(str::to_string).collect();
            md.code(&lines, "");
        }
    }

    if !doc.see_also.is_empty() {
        let items: Vec<ListItem> = doc
            .see_also
            .iter()
            .map(|s| ListItem::Text(s.clone()))
            .collect();
        md.text("**See also**")
            .empty_line()
            .unordered_list(&items)
            .empty_line();
    }
}

/// Plain-text declaration for the fenced code block
fn signature(ctx: &ApiContext, entity: &Entity, name: &str, view: &EntityView) -> Vec<String> {
    let flag = |set: bool, text: &'static str| if set { text } else { "" };

    let line = match &entity.declaration {
        Declaration::SourceFile { .. } | Declaration::Namespace { .. } => return Vec::new(),
        Declaration::Function { is_async, .. } => format!(
            "{}function {}{}",
            flag(*is_async, "async "),
            name,
            callable(view)
        ),
        Declaration::Method {
            is_static,
            is_abstract,
            is_optional,
            is_async,
            ..
        } => format!(
            "{}{}{}{}{}{}",
            flag(*is_static, "static "),
            flag(*is_abstract, "abstract "),
            flag(*is_async, "async "),
            name,
            flag(*is_optional, "?"),
            callable(view)
        ),
        Declaration::Constructor { .. } => format!("constructor({})", parameters_plain(&view.parameters)),
        Declaration::CallSignature { .. } => callable(view),
        Declaration::Property {
            ty,
            is_optional,
            is_readonly,
            is_static,
        } => format!(
            "{}{}{}{}: {}",
            flag(*is_static, "static "),
            flag(*is_readonly, "readonly "),
            name,
            flag(*is_optional, "?"),
            plain_or_unknown(ty.as_ref())
        ),
        Declaration::Index {
            ty, is_readonly, ..
        } => format!(
            "{}[{}]: {}",
            flag(*is_readonly, "readonly "),
            parameters_plain(&view.parameters),
            plain_or_unknown(ty.as_ref())
        ),
        Declaration::TypeAlias { ty, .. } => format!(
            "type {}{} = {}",
            name,
            type_parameters_plain(&view.type_parameters),
            plain_or_unknown(ty.as_ref())
        ),
        Declaration::Enum { members, is_const } => {
            let mut lines = vec![format!("{}enum {} {{", flag(*is_const, "const "), name)];
            for member in members.iter().filter_map(|id| ctx.entity(id.as_str())) {
                let value = match &member.declaration {
                    Declaration::EnumMember { value: Some(v) } => format!(" = {}", v),
                    _ => String::new(),
                };
                lines.push(format!("{}{}{},", CODE_INDENT, member.name, value));
            }
            lines.push("}".to_string());
            return lines;
        }
        Declaration::EnumMember { value } => match value {
            Some(v) => format!("{} = {}", name, v),
            None => name.to_string(),
        },
        Declaration::Variable { ty, variable_kind } => format!(
            "{} {}: {}",
            variable_kind.keyword(),
            name,
            plain_or_unknown(ty.as_ref())
        ),
        Declaration::Parameter {
            ty,
            is_optional,
            is_spread,
            initializer,
        } => {
            let mut text = format!(
                "{}{}{}: {}",
                flag(*is_spread, "..."),
                name,
                flag(*is_optional, "?"),
                plain_or_unknown(ty.as_ref())
            );
            if let Some(init) = initializer {
                text.push_str(&format!(" = {}", init));
            }
            text
        }
        Declaration::TypeParameter {
            constraint,
            default,
        } => {
            let mut text = name.to_string();
            if let Some(c) = constraint {
                text.push_str(&format!(" extends {}", plain(c)));
            }
            if let Some(d) = default {
                text.push_str(&format!(" = {}", plain(d)));
            }
            text
        }
        Declaration::Class {
            extends,
            implements,
            is_abstract,
            ..
        } => {
            let mut text = format!(
                "{}class {}{}",
                flag(*is_abstract, "abstract "),
                name,
                type_parameters_plain(&view.type_parameters)
            );
            if let Some(base) = extends {
                text.push_str(&format!(" extends {}", plain(base)));
            }
            if !implements.is_empty() {
                let list: Vec<String> = implements.iter().map(plain).collect();
                text.push_str(&format!(" implements {}", list.join(", ")));
            }
            text
        }
        Declaration::Interface { extends, .. } => {
            let mut text = format!(
                "interface {}{}",
                name,
                type_parameters_plain(&view.type_parameters)
            );
            if !extends.is_empty() {
                let list: Vec<String> = extends.iter().map(plain).collect();
                text.push_str(&format!(" extends {}", list.join(", ")));
            }
            text
        }
    };

    vec![line]
}

/// `<T>(a: A, b?: B): R`
fn callable(view: &EntityView) -> String {
    let mut text = format!(
        "{}({})",
        type_parameters_plain(&view.type_parameters),
        parameters_plain(&view.parameters)
    );
    if let Some(ret) = &view.return_type {
        text.push_str(": ");
        text.push_str(&plain(ret));
    }
    text
}

fn parameters_plain(params: &[ParameterView]) -> String {
    params
        .iter()
        .map(|p| {
            format!(
                "{}{}{}: {}",
                if p.is_spread { "..." } else { "" },
                p.name,
                if p.is_optional { "?" } else { "" },
                plain_or_unknown(p.ty.as_ref())
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}
