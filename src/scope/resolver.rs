//! The resolver facade: cached scope resolution for template anchors.

use std::sync::Arc;

use rayon::prelude::*;
use smol_str::SmolStr;

use crate::base::{Generation, NameMatch};
use crate::model::{AnchorKey, Document, EntityContainer, Symbol, SymbolKind, visit};

use super::cache::ScopeCache;
use super::config::ScopeConfig;
use super::matched::MatchedScope;
use super::matcher::{EntityMatcher, SelectorMatcher};

/// Which symbol kinds a [`SymbolQuery`] accepts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum KindFilter {
    #[default]
    Any,
    Only(Vec<SymbolKind>),
}

impl KindFilter {
    pub fn accepts(&self, kind: SymbolKind) -> bool {
        match self {
            KindFilter::Any => true,
            KindFilter::Only(kinds) => kinds.contains(&kind),
        }
    }
}

/// Filter applied to a resolved scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolQuery {
    pub kinds: KindFilter,
    pub name: Option<SmolStr>,
    pub name_match: NameMatch,
}

impl SymbolQuery {
    /// Everything in scope.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn of_kind(kind: SymbolKind) -> Self {
        Self::of_kinds([kind])
    }

    pub fn of_kinds(kinds: impl IntoIterator<Item = SymbolKind>) -> Self {
        Self {
            kinds: KindFilter::Only(kinds.into_iter().collect()),
            ..Self::default()
        }
    }

    pub fn named(mut self, name: impl Into<SmolStr>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_name_match(mut self, name_match: NameMatch) -> Self {
        self.name_match = name_match;
        self
    }

    pub fn accepts(&self, symbol: &Symbol) -> bool {
        self.kinds.accepts(symbol.kind)
            && self
                .name
                .as_deref()
                .is_none_or(|name| self.name_match.matches(&symbol.name, name))
    }

    /// Whether any kind this query asks for can come out of a matched scope.
    fn can_match(&self) -> bool {
        match &self.kinds {
            KindFilter::Any => true,
            KindFilter::Only(kinds) => kinds.iter().copied().any(MatchedScope::provides),
        }
    }
}

/// Resolves the symbols visible at template anchors.
///
/// Results are cached per `(anchor, generation)`. Callers must pass a new
/// generation whenever documents or entity containers change.
#[derive(Debug)]
pub struct ScopeResolver<M = SelectorMatcher> {
    matcher: M,
    cache: ScopeCache,
    config: ScopeConfig,
}

impl Default for ScopeResolver {
    fn default() -> Self {
        Self::new(SelectorMatcher::new(), ScopeConfig::default())
    }
}

impl<M: EntityMatcher> ScopeResolver<M> {
    pub fn new(matcher: M, config: ScopeConfig) -> Self {
        Self {
            matcher,
            cache: ScopeCache::new(config.cache_capacity),
            config,
        }
    }

    pub fn config(&self) -> &ScopeConfig {
        &self.config
    }

    pub fn cache(&self) -> &ScopeCache {
        &self.cache
    }

    pub fn matcher(&self) -> &M {
        &self.matcher
    }

    /// All symbols visible at `key`.
    ///
    /// Never fails. A key that no longer dereferences in `document` yields an
    /// empty set and drops its cache slot.
    pub fn resolve(
        &self,
        document: &Document,
        container: &EntityContainer,
        key: &AnchorKey,
        generation: Generation,
    ) -> Arc<[Symbol]> {
        let Some(anchor) = document.anchor(key) else {
            tracing::debug!("[RESOLVE] stale anchor {}", key);
            self.cache.invalidate(key);
            return Arc::from([]);
        };

        self.cache.get_or_compute(key, generation, || {
            let candidates: Vec<_> = visit(container, self.config.max_proximity)
                .into_iter()
                .filter(|candidate| !candidate.entity.is_self_reference(document.file()))
                .collect();
            let matched = self.matcher.match_entities(anchor, &candidates);
            tracing::trace!(
                "[RESOLVE] {} <{}>: {} of {} entities matched",
                key,
                anchor.tag_name,
                matched.len(),
                candidates.len()
            );
            MatchedScope::compute(anchor, &matched, &self.config)
        })
    }

    /// Symbols visible at `key` that pass `query`, in scope order.
    pub fn query(
        &self,
        document: &Document,
        container: &EntityContainer,
        key: &AnchorKey,
        generation: Generation,
        query: &SymbolQuery,
    ) -> Vec<Symbol> {
        if !query.can_match() {
            return Vec::new();
        }
        self.resolve(document, container, key, generation)
            .iter()
            .filter(|symbol| query.accepts(symbol))
            .cloned()
            .collect()
    }

    /// Resolve every anchor of `document` in parallel, warming the cache.
    ///
    /// Returns the number of anchors resolved.
    pub fn prefetch(
        &self,
        document: &Document,
        container: &EntityContainer,
        generation: Generation,
    ) -> usize {
        let keys: Vec<&AnchorKey> = document.anchors().map(|anchor| &anchor.key).collect();
        keys.par_iter()
            .for_each(|key| {
                self.resolve(document, container, key, generation);
            });
        keys.len()
    }
}
