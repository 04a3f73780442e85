//! Proximity-ordered traversal of entity containers.
//!
//! Containers are walked from the nearest tier (local declarations) to the
//! farthest (global registrations). Within a tier, declaration order is kept.
//! An entity already visited at a nearer tier is not visited again.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use super::container::EntityContainer;
use super::entity::{Entity, EntityId, EntityKind};
use super::symbol::Proximity;

/// Callbacks invoked for each registration, nearest tier first.
///
/// Returning `false` stops the traversal.
pub trait EntityVisitor {
    fn visit_component(
        &mut self,
        _name: &SmolStr,
        _entity: &Arc<Entity>,
        _proximity: Proximity,
    ) -> bool {
        true
    }

    fn visit_directive(
        &mut self,
        _name: &SmolStr,
        _entity: &Arc<Entity>,
        _proximity: Proximity,
    ) -> bool {
        true
    }

    fn visit_module(
        &mut self,
        _name: &SmolStr,
        _entity: &Arc<Entity>,
        _proximity: Proximity,
    ) -> bool {
        true
    }
}

/// An entity together with the name it was registered under and its tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitedEntity {
    pub name: SmolStr,
    pub entity: Arc<Entity>,
    pub proximity: Proximity,
}

impl VisitedEntity {
    pub fn new(name: impl Into<SmolStr>, entity: Arc<Entity>, proximity: Proximity) -> Self {
        Self {
            name: name.into(),
            entity,
            proximity,
        }
    }

    pub fn id(&self) -> EntityId {
        self.entity.id
    }
}

impl EntityContainer {
    /// Walk registrations up to and including `limit`.
    ///
    /// Returns `false` if the visitor stopped the walk early.
    pub fn accept_entities(&self, visitor: &mut dyn EntityVisitor, limit: Proximity) -> bool {
        // First tier each entity was seen at.
        let mut seen: FxHashMap<EntityId, Proximity> = FxHashMap::default();

        for proximity in Proximity::ALL.into_iter().filter(|p| *p <= limit) {
            for registration in self.registrations(proximity) {
                let first = *seen.entry(registration.entity.id).or_insert(proximity);
                if first < proximity {
                    continue;
                }

                let name = &registration.name;
                let entity = &registration.entity;
                let keep_going = match entity.kind {
                    EntityKind::Component => visitor.visit_component(name, entity, proximity),
                    EntityKind::Directive(_) => visitor.visit_directive(name, entity, proximity),
                    EntityKind::Module => visitor.visit_module(name, entity, proximity),
                };
                if !keep_going {
                    return false;
                }
            }
        }
        true
    }
}

/// Flatten a container into `(entity, proximity)` pairs in visiting order.
pub fn visit(container: &EntityContainer, limit: Proximity) -> Vec<VisitedEntity> {
    struct Collect(Vec<VisitedEntity>);

    impl Collect {
        fn push(&mut self, name: &SmolStr, entity: &Arc<Entity>, proximity: Proximity) -> bool {
            self.0
                .push(VisitedEntity::new(name.clone(), Arc::clone(entity), proximity));
            true
        }
    }

    impl EntityVisitor for Collect {
        fn visit_component(
            &mut self,
            name: &SmolStr,
            entity: &Arc<Entity>,
            proximity: Proximity,
        ) -> bool {
            self.push(name, entity, proximity)
        }

        fn visit_directive(
            &mut self,
            name: &SmolStr,
            entity: &Arc<Entity>,
            proximity: Proximity,
        ) -> bool {
            self.push(name, entity, proximity)
        }

        fn visit_module(
            &mut self,
            name: &SmolStr,
            entity: &Arc<Entity>,
            proximity: Proximity,
        ) -> bool {
            self.push(name, entity, proximity)
        }
    }

    let mut collect = Collect(Vec::new());
    container.accept_entities(&mut collect, limit);
    collect.0
}

/// Helper for "nearest match wins" searches.
///
/// Once something is accepted at a proximity, only further matches at that
/// same proximity are accepted and the walk stops at the next tier.
#[derive(Debug, Default)]
pub struct ProximityVisitor {
    closest: Option<Proximity>,
}

impl ProximityVisitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Proximity of the first accepted match, if any.
    pub fn closest(&self) -> Option<Proximity> {
        self.closest
    }

    /// Run `action` if `matched` and we are still at the nearest matching tier.
    ///
    /// Returns whether the traversal should continue.
    pub fn accept_same_proximity(
        &mut self,
        proximity: Proximity,
        matched: bool,
        action: impl FnOnce(),
    ) -> bool {
        if self.closest.is_some_and(|closest| closest != proximity) {
            return false;
        }
        if matched {
            self.closest = Some(proximity);
            action();
        }
        true
    }
}
