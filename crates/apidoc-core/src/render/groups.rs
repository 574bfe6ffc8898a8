//! Member kind groups of container entities
//!
//! Each container kind declares which member kinds it lists, under which
//! label and in which order. Renderers use the groups to lay out member
//! sections; the table of contents uses them to group heading links.

use crate::registry::ApiKind;

/// A labeled set of member kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindGroup {
    pub heading: &'static str,
    pub kinds: &'static [ApiKind],
}

impl KindGroup {
    pub fn contains(&self, kind: ApiKind) -> bool {
        self.kinds.contains(&kind)
    }
}

const MODULE_MEMBER_GROUPS: &[KindGroup] = &[
    KindGroup {
        heading: "Namespaces",
        kinds: &[ApiKind::Namespace],
    },
    KindGroup {
        heading: "Classes",
        kinds: &[ApiKind::Class],
    },
    KindGroup {
        heading: "Interfaces",
        kinds: &[ApiKind::Interface],
    },
    KindGroup {
        heading: "Functions",
        kinds: &[ApiKind::Function],
    },
    KindGroup {
        heading: "Types",
        kinds: &[ApiKind::TypeAlias],
    },
    KindGroup {
        heading: "Enums",
        kinds: &[ApiKind::Enum],
    },
    KindGroup {
        heading: "Variables",
        kinds: &[ApiKind::Variable],
    },
];

const CLASS_MEMBER_GROUPS: &[KindGroup] = &[
    KindGroup {
        heading: "Constructor",
        kinds: &[ApiKind::Constructor],
    },
    KindGroup {
        heading: "Index signatures",
        kinds: &[ApiKind::Index],
    },
    KindGroup {
        heading: "Properties",
        kinds: &[ApiKind::Property],
    },
    KindGroup {
        heading: "Methods",
        kinds: &[ApiKind::Method],
    },
];

const INTERFACE_MEMBER_GROUPS: &[KindGroup] = &[
    KindGroup {
        heading: "Construct and call signatures",
        kinds: &[ApiKind::Constructor, ApiKind::CallSignature],
    },
    KindGroup {
        heading: "Index signatures",
        kinds: &[ApiKind::Index],
    },
    KindGroup {
        heading: "Properties",
        kinds: &[ApiKind::Property],
    },
    KindGroup {
        heading: "Methods",
        kinds: &[ApiKind::Method],
    },
];

/// Member groups declared for a container kind; `None` for non-containers
pub fn member_kind_groups(kind: ApiKind) -> Option<&'static [KindGroup]> {
    match kind {
        ApiKind::SourceFile | ApiKind::Namespace => Some(MODULE_MEMBER_GROUPS),
        ApiKind::Class => Some(CLASS_MEMBER_GROUPS),
        ApiKind::Interface => Some(INTERFACE_MEMBER_GROUPS),
        _ => None,
    }
}
