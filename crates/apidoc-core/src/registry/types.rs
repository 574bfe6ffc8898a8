//! Types for representing extracted API metadata

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier of an entity in the metadata graph
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Create an identifier from any string-like value
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for EntityId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for EntityId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Originating source position of an entity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Path of the source file the entity was declared in
    pub file_name: String,
    #[serde(default)]
    pub line: u32,
    #[serde(default)]
    pub column: u32,
}

impl Location {
    pub fn new(file_name: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            file_name: file_name.into(),
            line,
            column,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file_name, self.line, self.column)
    }
}

/// One documented API-surface element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub name: String,
    /// Lexical container, used only as a location fallback
    #[serde(default)]
    pub parent: Option<EntityId>,
    #[serde(default)]
    pub location: Location,
    /// Raw documentation comment
    #[serde(default)]
    pub doc: Option<String>,
    #[serde(flatten)]
    pub declaration: Declaration,
}

impl Entity {
    /// Create an entity without parent, location or documentation
    pub fn new(id: impl Into<EntityId>, name: impl Into<String>, declaration: Declaration) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parent: None,
            location: Location::default(),
            doc: None,
            declaration,
        }
    }

    /// Set the source location
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    /// Set the lexical parent
    pub fn with_parent(mut self, parent: impl Into<EntityId>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Set the documentation comment
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// The entity's kind discriminant
    pub fn kind(&self) -> ApiKind {
        self.declaration.kind()
    }
}

/// How a variable was declared
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableKind {
    #[default]
    Const,
    Let,
    Var,
}

impl VariableKind {
    pub fn keyword(self) -> &'static str {
        match self {
            VariableKind::Const => "const",
            VariableKind::Let => "let",
            VariableKind::Var => "var",
        }
    }
}

/// Variant-specific data of an entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Declaration {
    SourceFile {
        #[serde(default)]
        members: Vec<EntityId>,
    },
    Namespace {
        #[serde(default)]
        members: Vec<EntityId>,
    },
    Class {
        #[serde(default)]
        type_parameters: Vec<EntityId>,
        #[serde(default)]
        extends: Option<TypeRef>,
        #[serde(default)]
        implements: Vec<TypeRef>,
        #[serde(default)]
        members: Vec<EntityId>,
        #[serde(default)]
        is_abstract: bool,
    },
    Interface {
        #[serde(default)]
        type_parameters: Vec<EntityId>,
        #[serde(default)]
        extends: Vec<TypeRef>,
        #[serde(default)]
        members: Vec<EntityId>,
    },
    Function {
        #[serde(default)]
        type_parameters: Vec<EntityId>,
        #[serde(default)]
        parameters: Vec<EntityId>,
        #[serde(default)]
        return_type: Option<TypeRef>,
        #[serde(default)]
        is_async: bool,
    },
    Method {
        #[serde(default)]
        type_parameters: Vec<EntityId>,
        #[serde(default)]
        parameters: Vec<EntityId>,
        #[serde(default)]
        return_type: Option<TypeRef>,
        #[serde(default)]
        is_static: bool,
        #[serde(default)]
        is_abstract: bool,
        #[serde(default)]
        is_optional: bool,
        #[serde(default)]
        is_async: bool,
    },
    Constructor {
        #[serde(default)]
        parameters: Vec<EntityId>,
    },
    CallSignature {
        #[serde(default)]
        type_parameters: Vec<EntityId>,
        #[serde(default)]
        parameters: Vec<EntityId>,
        #[serde(default)]
        return_type: Option<TypeRef>,
    },
    Property {
        #[serde(default, rename = "type")]
        ty: Option<TypeRef>,
        #[serde(default)]
        is_optional: bool,
        #[serde(default)]
        is_readonly: bool,
        #[serde(default)]
        is_static: bool,
    },
    Index {
        parameter: EntityId,
        #[serde(default, rename = "type")]
        ty: Option<TypeRef>,
        #[serde(default)]
        is_readonly: bool,
    },
    TypeAlias {
        #[serde(default)]
        type_parameters: Vec<EntityId>,
        #[serde(default, rename = "type")]
        ty: Option<TypeRef>,
    },
    Enum {
        #[serde(default)]
        members: Vec<EntityId>,
        #[serde(default)]
        is_const: bool,
    },
    EnumMember {
        #[serde(default)]
        value: Option<String>,
    },
    Variable {
        #[serde(default, rename = "type")]
        ty: Option<TypeRef>,
        #[serde(default)]
        variable_kind: VariableKind,
    },
    Parameter {
        #[serde(default, rename = "type")]
        ty: Option<TypeRef>,
        #[serde(default)]
        is_optional: bool,
        #[serde(default)]
        is_spread: bool,
        #[serde(default)]
        initializer: Option<String>,
    },
    TypeParameter {
        #[serde(default)]
        constraint: Option<TypeRef>,
        #[serde(default)]
        default: Option<TypeRef>,
    },
}

impl Declaration {
    /// The kind discriminant of this declaration
    pub fn kind(&self) -> ApiKind {
        match self {
            Declaration::SourceFile { .. } => ApiKind::SourceFile,
            Declaration::Namespace { .. } => ApiKind::Namespace,
            Declaration::Class { .. } => ApiKind::Class,
            Declaration::Interface { .. } => ApiKind::Interface,
            Declaration::Function { .. } => ApiKind::Function,
            Declaration::Method { .. } => ApiKind::Method,
            Declaration::Constructor { .. } => ApiKind::Constructor,
            Declaration::CallSignature { .. } => ApiKind::CallSignature,
            Declaration::Property { .. } => ApiKind::Property,
            Declaration::Index { .. } => ApiKind::Index,
            Declaration::TypeAlias { .. } => ApiKind::TypeAlias,
            Declaration::Enum { .. } => ApiKind::Enum,
            Declaration::EnumMember { .. } => ApiKind::EnumMember,
            Declaration::Variable { .. } => ApiKind::Variable,
            Declaration::Parameter { .. } => ApiKind::Parameter,
            Declaration::TypeParameter { .. } => ApiKind::TypeParameter,
        }
    }

    /// Contained member entities, in declaration order
    pub fn members(&self) -> &[EntityId] {
        match self {
            Declaration::SourceFile { members }
            | Declaration::Namespace { members }
            | Declaration::Class { members, .. }
            | Declaration::Interface { members, .. }
            | Declaration::Enum { members, .. } => members.as_slice(),
            _ => &[],
        }
    }

    /// Parameter entities of a callable declaration
    pub fn parameters(&self) -> &[EntityId] {
        match self {
            Declaration::Function { parameters, .. }
            | Declaration::Method { parameters, .. }
            | Declaration::Constructor { parameters }
            | Declaration::CallSignature { parameters, .. } => parameters.as_slice(),
            Declaration::Index { parameter, .. } => std::slice::from_ref(parameter),
            _ => &[],
        }
    }

    /// Type parameter entities of a generic declaration
    pub fn type_parameters(&self) -> &[EntityId] {
        match self {
            Declaration::Class {
                type_parameters, ..
            }
            | Declaration::Interface {
                type_parameters, ..
            }
            | Declaration::Function {
                type_parameters, ..
            }
            | Declaration::Method {
                type_parameters, ..
            }
            | Declaration::CallSignature {
                type_parameters, ..
            }
            | Declaration::TypeAlias {
                type_parameters, ..
            } => type_parameters.as_slice(),
            _ => &[],
        }
    }

    /// Declared return type of a callable declaration
    pub fn return_type(&self) -> Option<&TypeRef> {
        match self {
            Declaration::Function { return_type, .. }
            | Declaration::Method { return_type, .. }
            | Declaration::CallSignature { return_type, .. } => return_type.as_ref(),
            _ => None,
        }
    }

    /// Every entity this declaration structurally depends on
    pub fn structural_references(&self) -> impl Iterator<Item = &EntityId> {
        self.members()
            .iter()
            .chain(self.parameters())
            .chain(self.type_parameters())
    }
}

/// Kind discriminant of an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiKind {
    SourceFile,
    Namespace,
    Class,
    Interface,
    Function,
    Method,
    Constructor,
    CallSignature,
    Property,
    Index,
    TypeAlias,
    Enum,
    EnumMember,
    Variable,
    Parameter,
    TypeParameter,
}

impl ApiKind {
    /// Get the display name for the kind
    pub fn display_name(&self) -> &'static str {
        match self {
            ApiKind::SourceFile => "Source file",
            ApiKind::Namespace => "Namespace",
            ApiKind::Class => "Class",
            ApiKind::Interface => "Interface",
            ApiKind::Function => "Function",
            ApiKind::Method => "Method",
            ApiKind::Constructor => "Constructor",
            ApiKind::CallSignature => "Call signature",
            ApiKind::Property => "Property",
            ApiKind::Index => "Index signature",
            ApiKind::TypeAlias => "Type alias",
            ApiKind::Enum => "Enum",
            ApiKind::EnumMember => "Enum member",
            ApiKind::Variable => "Variable",
            ApiKind::Parameter => "Parameter",
            ApiKind::TypeParameter => "Type parameter",
        }
    }

    /// Whether entities of this kind are assembled into their own document
    /// when they appear as members of a source file or namespace
    pub fn has_own_document(&self) -> bool {
        matches!(self, ApiKind::Class | ApiKind::Interface | ApiKind::Namespace)
    }
}

/// A serialized type expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TypeRef {
    /// Built-in keyword type such as `string` or `void`
    Keyword { name: String },
    /// Named type, linked when `target` is known
    Reference {
        name: String,
        #[serde(default)]
        target: Option<EntityId>,
        #[serde(default)]
        type_arguments: Vec<TypeRef>,
    },
    Array { element: Box<TypeRef> },
    Union { types: Vec<TypeRef> },
    Intersection { types: Vec<TypeRef> },
    Tuple { types: Vec<TypeRef> },
    /// Anything else, kept verbatim
    Literal { text: String },
}

impl TypeRef {
    pub fn keyword(name: impl Into<String>) -> Self {
        TypeRef::Keyword { name: name.into() }
    }

    /// A named reference to a registry entity
    pub fn reference(name: impl Into<String>, target: impl Into<EntityId>) -> Self {
        TypeRef::Reference {
            name: name.into(),
            target: Some(target.into()),
            type_arguments: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declaration_kind_tag() {
        let json = r#"{
            "id": "fn:greet",
            "name": "greet",
            "kind": "function",
            "location": { "file_name": "src/greet.ts", "line": 3, "column": 1 },
            "parameters": ["param:greet.name"],
            "return_type": { "type": "keyword", "name": "string" }
        }"#;

        let entity: Entity = serde_json::from_str(json).unwrap();
        assert_eq!(entity.kind(), ApiKind::Function);
        assert_eq!(entity.declaration.parameters(), &[EntityId::from("param:greet.name")]);
        assert_eq!(
            entity.declaration.return_type(),
            Some(&TypeRef::keyword("string"))
        );
        assert_eq!(entity.location.to_string(), "src/greet.ts:3:1");
    }

    #[test]
    fn test_property_type_field() {
        let json = r#"{
            "id": "prop:User.name",
            "name": "name",
            "kind": "property",
            "type": { "type": "reference", "name": "Name", "target": "type:Name" },
            "is_readonly": true
        }"#;

        let entity: Entity = serde_json::from_str(json).unwrap();
        match entity.declaration {
            Declaration::Property { ty, is_readonly, .. } => {
                assert!(is_readonly);
                assert_eq!(ty, Some(TypeRef::reference("Name", "type:Name")));
            }
            other => panic!("unexpected declaration: {other:?}"),
        }
    }

    #[test]
    fn test_structural_references() {
        let decl = Declaration::Index {
            parameter: EntityId::from("param:key"),
            ty: None,
            is_readonly: false,
        };
        let refs: Vec<_> = decl.structural_references().collect();
        assert_eq!(refs, vec![&EntityId::from("param:key")]);
    }

    #[test]
    fn test_own_document_kinds() {
        assert!(ApiKind::Class.has_own_document());
        assert!(ApiKind::Namespace.has_own_document());
        assert!(!ApiKind::Function.has_own_document());
        assert!(!ApiKind::Enum.has_own_document());
    }
}
