//! Composition of matched entities into one symbol set.

use indexmap::IndexMap;
use indexmap::map::Entry;
use smol_str::SmolStr;

use crate::base::NameMatch;
use crate::model::{Anchor, EntityError, Member, Symbol, SymbolKind, VisitedEntity};

use super::config::ScopeConfig;
use super::contribute::{contribute, to_symbol};

/// Symbol kinds a matched scope can contain.
const PROVIDED_KINDS: &[SymbolKind] = &[
    SymbolKind::Input,
    SymbolKind::Output,
    SymbolKind::InOut,
    SymbolKind::DirectiveAttribute,
    SymbolKind::ExportAs,
    SymbolKind::HtmlAttribute,
    SymbolKind::Event,
    SymbolKind::Slot,
];

/// The symbols of all entities matched at one anchor.
pub struct MatchedScope;

impl MatchedScope {
    pub fn provides(kind: SymbolKind) -> bool {
        PROVIDED_KINDS.contains(&kind)
    }

    /// Merge the contributions of `matched` (in rank order) into one set.
    ///
    /// For colliding `(kind, name)` pairs the nearer proximity wins, then the
    /// earlier rank. Entities whose members cannot be read are skipped.
    pub fn compute(
        anchor: &Anchor,
        matched: &[VisitedEntity],
        config: &ScopeConfig,
    ) -> Vec<Symbol> {
        let mut merged: IndexMap<(SymbolKind, SmolStr), Symbol> = IndexMap::new();

        for visited in matched {
            let symbols = match contribute(visited, anchor, config) {
                Ok(symbols) => symbols,
                Err(err) => {
                    tracing::warn!(
                        "[SCOPE] skipping '{}' at {}: {}",
                        visited.name,
                        anchor.key,
                        err
                    );
                    continue;
                }
            };

            for symbol in symbols {
                match merged.entry((symbol.kind, symbol.name.clone())) {
                    Entry::Vacant(slot) => {
                        slot.insert(symbol);
                    }
                    Entry::Occupied(mut slot) => {
                        if symbol.proximity < slot.get().proximity {
                            tracing::trace!(
                                "[SCOPE] {} '{}' from {:?} shadows {:?}",
                                symbol.kind.display(),
                                symbol.name,
                                symbol.proximity,
                                slot.get().proximity
                            );
                            slot.insert(symbol);
                        }
                    }
                }
            }
        }

        merged.into_values().collect()
    }
}

/// Symbols of one component, filtered by kind and optionally by name.
///
/// Props answer both [`SymbolKind::Input`] and [`SymbolKind::HtmlAttribute`]
/// queries, since they can be written as plain attributes. Names compare
/// under `name_match`.
pub fn component_contributions(
    visited: &VisitedEntity,
    kind: SymbolKind,
    name: Option<&str>,
    name_match: NameMatch,
) -> Result<Vec<Symbol>, EntityError> {
    let members = visited.entity.members()?;
    let lists: Vec<&[Member]> = match kind {
        SymbolKind::Input => vec![members.inputs.as_slice()],
        SymbolKind::HtmlAttribute => vec![
            members.inputs.as_slice(),
            members.alias_attributes.as_slice(),
        ],
        SymbolKind::Event => vec![members.events.as_slice()],
        SymbolKind::Slot => vec![members.slots.as_slice()],
        _ => return Ok(Vec::new()),
    };

    Ok(lists
        .into_iter()
        .flatten()
        .filter(|member| name.is_none_or(|n| name_match.matches(&member.name, n)))
        .map(|member| to_symbol(kind, member, visited))
        .collect())
}
