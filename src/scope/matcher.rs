//! Entity matching: which visible entities apply to an anchor.

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::{FxHashMap, FxHashSet};
use smol_str::SmolStr;

use crate::base::NameMatch;
use crate::model::{Anchor, Entity, EntityKind, VisitedEntity};
use crate::parser::SelectorList;

/// Decides which candidate entities apply to an anchor.
///
/// Candidates arrive in visit order (nearest tier first, declaration order
/// within a tier). Implementations return the matching subset, ranked; the
/// rank decides collisions between entities at the same proximity.
pub trait EntityMatcher: Send + Sync {
    fn match_entities(&self, anchor: &Anchor, candidates: &[VisitedEntity]) -> Vec<VisitedEntity>;
}

impl<M: EntityMatcher + ?Sized> EntityMatcher for Arc<M> {
    fn match_entities(&self, anchor: &Anchor, candidates: &[VisitedEntity]) -> Vec<VisitedEntity> {
        (**self).match_entities(anchor, candidates)
    }
}

/// Structural matcher.
///
/// Directives match on their selector. Components match on their selector
/// when they have one, otherwise on the element name under [`NameMatch`].
/// Modules never match. Ranking keeps visit order and drops repeated ids.
#[derive(Debug, Default)]
pub struct SelectorMatcher {
    name_match: NameMatch,
    /// Parsed selectors; `None` for selectors that failed to parse.
    selectors: RwLock<FxHashMap<SmolStr, Option<Arc<SelectorList>>>>,
}

impl SelectorMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name_match(mut self, name_match: NameMatch) -> Self {
        self.name_match = name_match;
        self
    }

    fn selector(&self, source: &SmolStr) -> Option<Arc<SelectorList>> {
        if let Some(parsed) = self.selectors.read().get(source) {
            return parsed.clone();
        }
        let parsed = match SelectorList::parse(source) {
            Ok(list) => Some(Arc::new(list)),
            Err(err) => {
                tracing::warn!("[MATCHER] ignoring unparsable selector: {}", err);
                None
            }
        };
        self.selectors
            .write()
            .entry(source.clone())
            .or_insert(parsed)
            .clone()
    }

    fn selector_matches(&self, entity: &Entity, anchor: &Anchor) -> Option<bool> {
        let source = entity.selector.as_ref()?;
        Some(
            self.selector(source)
                .is_some_and(|list| list.matches(anchor)),
        )
    }

    fn matches(&self, candidate: &VisitedEntity, anchor: &Anchor) -> bool {
        let entity = &candidate.entity;
        match entity.kind {
            EntityKind::Directive(_) => self.selector_matches(entity, anchor).unwrap_or(false),
            EntityKind::Component => match self.selector_matches(entity, anchor) {
                Some(matched) => matched,
                None => self.name_match.matches(&candidate.name, &anchor.tag_name),
            },
            EntityKind::Module => false,
        }
    }
}

impl EntityMatcher for SelectorMatcher {
    fn match_entities(&self, anchor: &Anchor, candidates: &[VisitedEntity]) -> Vec<VisitedEntity> {
        let mut seen = FxHashSet::default();
        candidates
            .iter()
            .filter(|candidate| self.matches(candidate, anchor))
            .filter(|candidate| seen.insert(candidate.id()))
            .cloned()
            .collect()
    }
}
