use std::sync::Arc;

use smol_str::SmolStr;
use thiserror::Error;

use crate::base::FileId;

/// Stable identifier of a declared entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub u32);

impl EntityId {
    pub fn new(index: u32) -> Self {
        Self(index)
    }
}

/// Errors raised while deriving an entity's members.
///
/// These never cross the resolver boundary; the entity is skipped instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntityError {
    /// The declaration could not be analysed.
    #[error("Malformed declaration of '{entity}': {message}")]
    Malformed { entity: SmolStr, message: String },

    /// A member list references a declaration that does not exist.
    #[error("Unresolved member '{member}' in '{entity}'")]
    UnresolvedMember { entity: SmolStr, member: SmolStr },

    /// The entity's source is gone (deleted file, stale registration).
    #[error("Source of '{0}' is no longer available")]
    SourceUnavailable(SmolStr),
}

impl EntityError {
    pub fn malformed(entity: impl Into<SmolStr>, message: impl Into<String>) -> Self {
        Self::Malformed {
            entity: entity.into(),
            message: message.into(),
        }
    }
}

/// Directive classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DirectiveKind {
    /// Applies to ordinary elements.
    pub regular: bool,
    /// Applies to template markers (`<ng-template>`, `*foo`).
    pub structural: bool,
}

impl DirectiveKind {
    pub const REGULAR: DirectiveKind = DirectiveKind {
        regular: true,
        structural: false,
    };
    pub const STRUCTURAL: DirectiveKind = DirectiveKind {
        regular: false,
        structural: true,
    };
    pub const BOTH: DirectiveKind = DirectiveKind {
        regular: true,
        structural: true,
    };

    pub fn is_regular(&self) -> bool {
        self.regular
    }

    pub fn is_structural(&self) -> bool {
        self.structural
    }
}

impl Default for DirectiveKind {
    fn default() -> Self {
        Self::REGULAR
    }
}

/// What kind of construct an entity is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EntityKind {
    Directive(DirectiveKind),
    Component,
    Module,
}

impl EntityKind {
    pub fn display(&self) -> &'static str {
        match self {
            EntityKind::Directive(_) => "directive",
            EntityKind::Component => "component",
            EntityKind::Module => "module",
        }
    }
}

/// A declared member (property, event, slot, alias).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Member {
    pub name: SmolStr,
    pub ty: Option<SmolStr>,
    pub documentation: Option<Arc<str>>,
    pub required: bool,
}

impl Member {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            ty: None,
            documentation: None,
            required: false,
        }
    }

    pub fn with_type(mut self, ty: impl Into<SmolStr>) -> Self {
        self.ty = Some(ty.into());
        self
    }

    pub fn with_documentation(mut self, doc: impl Into<Arc<str>>) -> Self {
        self.documentation = Some(doc.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

impl From<&str> for Member {
    fn from(name: &str) -> Self {
        Member::new(name)
    }
}

/// Everything an entity contributes, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityMembers {
    pub inputs: Vec<Member>,
    pub outputs: Vec<Member>,
    pub in_outs: Vec<Member>,
    pub attributes: Vec<Member>,
    pub exports_as: Vec<Member>,
    pub events: Vec<Member>,
    pub slots: Vec<Member>,
    /// Extra attribute names the entity answers to besides its declared inputs.
    pub alias_attributes: Vec<Member>,
}

impl EntityMembers {
    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
            && self.outputs.is_empty()
            && self.in_outs.is_empty()
            && self.attributes.is_empty()
            && self.exports_as.is_empty()
            && self.events.is_empty()
            && self.slots.is_empty()
            && self.alias_attributes.is_empty()
    }
}

/// A declared directive, component or module.
///
/// Immutable once built; the structural model provider rebuilds entities
/// when their source changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub id: EntityId,
    /// Name from the declaration itself, if it has one.
    pub default_name: Option<SmolStr>,
    pub kind: EntityKind,
    /// Selector the entity matches on (directives).
    pub selector: Option<SmolStr>,
    pub source_file: Option<FileId>,
    pub documentation: Option<Arc<str>>,
    members: Result<EntityMembers, EntityError>,
}

impl Entity {
    fn new(id: EntityId, kind: EntityKind) -> Self {
        Self {
            id,
            default_name: None,
            kind,
            selector: None,
            source_file: None,
            documentation: None,
            members: Ok(EntityMembers::default()),
        }
    }

    pub fn directive(id: EntityId, selector: impl Into<SmolStr>, kind: DirectiveKind) -> Self {
        let mut entity = Self::new(id, EntityKind::Directive(kind));
        entity.selector = Some(selector.into());
        entity
    }

    pub fn component(id: EntityId, name: impl Into<SmolStr>) -> Self {
        let mut entity = Self::new(id, EntityKind::Component);
        entity.default_name = Some(name.into());
        entity
    }

    /// A component with no name of its own; it is only reachable through registrations.
    pub fn anonymous_component(id: EntityId) -> Self {
        Self::new(id, EntityKind::Component)
    }

    pub fn module(id: EntityId, name: impl Into<SmolStr>) -> Self {
        let mut entity = Self::new(id, EntityKind::Module);
        entity.default_name = Some(name.into());
        entity
    }

    pub fn with_name(mut self, name: impl Into<SmolStr>) -> Self {
        self.default_name = Some(name.into());
        self
    }

    pub fn with_selector(mut self, selector: impl Into<SmolStr>) -> Self {
        self.selector = Some(selector.into());
        self
    }

    pub fn with_source_file(mut self, file: FileId) -> Self {
        self.source_file = Some(file);
        self
    }

    pub fn with_documentation(mut self, doc: impl Into<Arc<str>>) -> Self {
        self.documentation = Some(doc.into());
        self
    }

    pub fn with_members(mut self, members: EntityMembers) -> Self {
        self.members = Ok(members);
        self
    }

    /// Mark the entity as malformed; its members can no longer be read.
    pub fn with_error(mut self, error: EntityError) -> Self {
        self.members = Err(error);
        self
    }

    /// The entity's members, or the error that prevented deriving them.
    pub fn members(&self) -> Result<&EntityMembers, EntityError> {
        self.members.as_ref().map_err(Clone::clone)
    }

    /// Best name for display: the declared name, else the selector.
    pub fn display_name(&self) -> SmolStr {
        self.default_name
            .clone()
            .or_else(|| self.selector.clone())
            .unwrap_or_else(|| SmolStr::new_static("<anonymous>"))
    }

    pub fn is_directive(&self) -> bool {
        matches!(self.kind, EntityKind::Directive(_))
    }

    pub fn is_component(&self) -> bool {
        self.kind == EntityKind::Component
    }

    /// An unnamed component declared in `file` cannot be used from `file`:
    /// it would resolve to itself.
    pub fn is_self_reference(&self, file: Option<FileId>) -> bool {
        self.is_component()
            && self.default_name.is_none()
            && self.source_file.is_some()
            && self.source_file == file
    }
}
