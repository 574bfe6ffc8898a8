//! Text forms of type expressions
//!
//! Plain text goes into fenced signatures. Linked text goes into prose and
//! turns every reference with a known target into `[Name][target]`, recording
//! the target as a used reference.

use indexmap::IndexSet;

use super::markdown::link;
use crate::registry::{EntityId, TypeParameterView, TypeRef};

/// Placeholder for a type the metadata does not provide
pub const UNKNOWN_TYPE: &str = "unknown";

/// Format a type for a code block
pub fn plain(ty: &TypeRef) -> String {
    TypeFormatter { used: None }.format(ty)
}

/// Format a type for Markdown prose, collecting link targets into `used`
pub fn linked(ty: &TypeRef, used: &mut IndexSet<EntityId>) -> String {
    TypeFormatter { used: Some(used) }.format(ty)
}

/// Plain text of an optional type, falling back to [`UNKNOWN_TYPE`]
pub fn plain_or_unknown(ty: Option<&TypeRef>) -> String {
    ty.map_or_else(|| UNKNOWN_TYPE.to_string(), plain)
}

/// `<T extends U = D, K>` for code blocks; empty when there are none
pub fn type_parameters_plain(params: &[TypeParameterView]) -> String {
    if params.is_empty() {
        return String::new();
    }

    let parts: Vec<String> = params
        .iter()
        .map(|tp| {
            let mut text = tp.name.clone();
            if let Some(constraint) = &tp.constraint {
                text.push_str(" extends ");
                text.push_str(&plain(constraint));
            }
            if let Some(default) = &tp.default {
                text.push_str(" = ");
                text.push_str(&plain(default));
            }
            text
        })
        .collect();

    format!("<{}>", parts.join(", "))
}

struct TypeFormatter<'a> {
    used: Option<&'a mut IndexSet<EntityId>>,
}

impl TypeFormatter<'_> {
    fn is_linked(&self) -> bool {
        self.used.is_some()
    }

    fn format(&mut self, ty: &TypeRef) -> String {
        match ty {
            TypeRef::Keyword { name } => name.clone(),
            TypeRef::Literal { text } => text.clone(),
            TypeRef::Reference {
                name,
                target,
                type_arguments,
            } => {
                let mut text = match (target, self.used.as_deref_mut()) {
                    (Some(target), Some(used)) => {
                        used.insert(target.clone());
                        link(name, target)
                    }
                    _ => name.clone(),
                };
                if !type_arguments.is_empty() {
                    let args: Vec<String> = type_arguments.iter().map(|a| self.format(a)).collect();
                    let (open, close) = if self.is_linked() {
                        ("&lt;", "&gt;")
                    } else {
                        ("<", ">")
                    };
                    text.push_str(open);
                    text.push_str(&args.join(", "));
                    text.push_str(close);
                }
                text
            }
            TypeRef::Array { element } => {
                let inner = self.format(element);
                if matches!(
                    element.as_ref(),
                    TypeRef::Union { .. } | TypeRef::Intersection { .. }
                ) {
                    format!("({})[]", inner)
                } else {
                    format!("{}[]", inner)
                }
            }
            TypeRef::Union { types } => self.join(types, " | "),
            TypeRef::Intersection { types } => self.join(types, " & "),
            TypeRef::Tuple { types } => format!("[{}]", self.join(types, ", ")),
        }
    }

    fn join(&mut self, types: &[TypeRef], separator: &str) -> String {
        let parts: Vec<String> = types.iter().map(|t| self.format(t)).collect();
        parts.join(separator)
    }
}
