//! Entity and symbol model.
//!
//! Entities are declared directives, components and modules. Each carries
//! the symbols it contributes to a template. An [`EntityContainer`] groups
//! entities by [`Proximity`] for one template, and a [`Document`] holds the
//! template's [`Anchor`] tree.
//!
//! Entities are immutable; whoever derives them from source rebuilds them on
//! change. This module only consumes them.

mod anchor;
mod container;
mod document;
mod entity;
mod symbol;
mod visitor;

pub use anchor::{Anchor, AnchorKey, Attribute, AttributeBinding};
pub use container::{ContainerQuery, EntityContainer, QueryKind, Registration};
pub use document::Document;
pub use entity::{DirectiveKind, Entity, EntityError, EntityId, EntityKind, EntityMembers, Member};
pub use symbol::{Priority, Proximity, Symbol, SymbolKind};
pub use visitor::{EntityVisitor, ProximityVisitor, VisitedEntity, visit};
