//! Entity containers: everything a template can see, grouped by proximity.

use std::sync::Arc;

use smol_str::SmolStr;

use crate::base::{FileId, NameMatch};

use super::entity::Entity;
use super::symbol::Proximity;
use super::visitor::{EntityVisitor, ProximityVisitor, VisitedEntity};

/// An entity registered under a name at some tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub name: SmolStr,
    pub entity: Arc<Entity>,
}

/// Declared and registered entities visible from one template.
#[derive(Debug, Clone, Default)]
pub struct EntityContainer {
    /// One list per [`Proximity`], in declaration order.
    tiers: [Vec<Registration>; 4],
}

impl EntityContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `entity` under `name` at `proximity`.
    pub fn register(
        &mut self,
        proximity: Proximity,
        name: impl Into<SmolStr>,
        entity: Arc<Entity>,
    ) -> &mut Self {
        self.tiers[proximity as usize].push(Registration {
            name: name.into(),
            entity,
        });
        self
    }

    /// Register `entity` under its own display name.
    pub fn register_entity(&mut self, proximity: Proximity, entity: Arc<Entity>) -> &mut Self {
        let name = entity.display_name();
        self.register(proximity, name, entity)
    }

    /// Registrations of a single tier.
    pub fn registrations(&self, proximity: Proximity) -> &[Registration] {
        &self.tiers[proximity as usize]
    }

    pub fn len(&self) -> usize {
        self.tiers.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.iter().all(Vec::is_empty)
    }

    /// Find entities of one kind, optionally by name.
    ///
    /// Only matches at the nearest tier that has any match are returned.
    /// Returns an empty vec when nothing matches.
    pub fn query(&self, query: &ContainerQuery<'_>) -> Vec<VisitedEntity> {
        let mut visitor = QueryVisitor {
            query,
            normalized: query.name.map(|n| query.name_match.normalize(n)),
            proximity: ProximityVisitor::new(),
            result: Vec::new(),
        };
        self.accept_entities(&mut visitor, query.limit);
        visitor.result
    }
}

/// Which registrations a [`ContainerQuery`] looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    /// Components, matched by element name.
    Elements,
    /// Template directives.
    Directives,
}

/// Parameters of [`EntityContainer::query`].
#[derive(Debug, Clone)]
pub struct ContainerQuery<'a> {
    pub kind: QueryKind,
    pub name: Option<&'a str>,
    pub name_match: NameMatch,
    /// File the query originates from; used to stop a component resolving to itself.
    pub requesting_file: Option<FileId>,
    pub limit: Proximity,
}

impl<'a> ContainerQuery<'a> {
    pub fn new(kind: QueryKind) -> Self {
        Self {
            kind,
            name: None,
            name_match: NameMatch::Asset,
            requesting_file: None,
            limit: Proximity::Global,
        }
    }

    pub fn named(mut self, name: &'a str) -> Self {
        self.name = Some(name);
        self
    }

    pub fn with_name_match(mut self, name_match: NameMatch) -> Self {
        self.name_match = name_match;
        self
    }

    pub fn from_file(mut self, file: FileId) -> Self {
        self.requesting_file = Some(file);
        self
    }

    pub fn with_limit(mut self, limit: Proximity) -> Self {
        self.limit = limit;
        self
    }
}

struct QueryVisitor<'q, 'a> {
    query: &'q ContainerQuery<'a>,
    normalized: Option<SmolStr>,
    proximity: ProximityVisitor,
    result: Vec<VisitedEntity>,
}

impl QueryVisitor<'_, '_> {
    fn name_matches(&self, name: &str) -> bool {
        match &self.normalized {
            None => true,
            Some(wanted) => self.query.name_match.normalize(name) == *wanted,
        }
    }

    fn accept(&mut self, name: &SmolStr, entity: &Arc<Entity>, proximity: Proximity) -> bool {
        let matched = self.name_matches(name);
        let self_reference = entity.is_self_reference(self.query.requesting_file);
        let result = &mut self.result;
        self.proximity.accept_same_proximity(proximity, matched, || {
            if !self_reference {
                result.push(VisitedEntity::new(name.clone(), Arc::clone(entity), proximity));
            }
        })
    }
}

impl EntityVisitor for QueryVisitor<'_, '_> {
    fn visit_component(
        &mut self,
        name: &SmolStr,
        entity: &Arc<Entity>,
        proximity: Proximity,
    ) -> bool {
        if self.query.kind != QueryKind::Elements {
            return true;
        }
        self.accept(name, entity, proximity)
    }

    fn visit_directive(
        &mut self,
        name: &SmolStr,
        entity: &Arc<Entity>,
        proximity: Proximity,
    ) -> bool {
        if self.query.kind != QueryKind::Directives {
            return true;
        }
        self.accept(name, entity, proximity)
    }
}
