//! Symbols an entity contributes to one anchor.
//!
//! One adapter per [`EntityKind`]; [`contribute`] dispatches on the kind.

use crate::model::{
    Anchor, DirectiveKind, Entity, EntityError, EntityKind, EntityMembers, Member, Priority,
    Symbol, SymbolKind, VisitedEntity,
};

use super::config::ScopeConfig;

/// Symbols `visited` contributes at `anchor`, in declaration order.
///
/// Fails only when the entity's members could not be derived.
pub fn contribute(
    visited: &VisitedEntity,
    anchor: &Anchor,
    config: &ScopeConfig,
) -> Result<Vec<Symbol>, EntityError> {
    let entity = &*visited.entity;
    let members = entity.members()?;
    let mut out = SymbolSink::new(visited);

    match entity.kind {
        EntityKind::Directive(kind) => {
            directive_symbols(&mut out, members, kind, config.is_template_marker(anchor))
        }
        EntityKind::Component => component_symbols(&mut out, members),
        EntityKind::Module => {}
    }
    Ok(out.symbols)
}

/// Exported names are always visible. Bound members of a template-only
/// directive are visible on template markers only.
fn directive_symbols(
    out: &mut SymbolSink<'_>,
    members: &EntityMembers,
    kind: DirectiveKind,
    template_marker: bool,
) {
    out.extend(SymbolKind::ExportAs, &members.exports_as);
    if !kind.is_regular() && !template_marker {
        return;
    }
    out.extend(SymbolKind::InOut, &members.in_outs);
    out.extend(SymbolKind::Input, &members.inputs);
    out.extend(SymbolKind::Output, &members.outputs);
    out.extend(SymbolKind::DirectiveAttribute, &members.attributes);
    out.extend(SymbolKind::HtmlAttribute, &members.alias_attributes);
}

fn component_symbols(out: &mut SymbolSink<'_>, members: &EntityMembers) {
    out.extend(SymbolKind::ExportAs, &members.exports_as);
    out.extend(SymbolKind::InOut, &members.in_outs);
    out.extend(SymbolKind::Input, &members.inputs);
    out.extend(SymbolKind::Output, &members.outputs);
    out.extend(SymbolKind::DirectiveAttribute, &members.attributes);
    out.extend(SymbolKind::Event, &members.events);
    out.extend(SymbolKind::Slot, &members.slots);
    out.extend(SymbolKind::HtmlAttribute, &members.alias_attributes);
}

struct SymbolSink<'a> {
    visited: &'a VisitedEntity,
    symbols: Vec<Symbol>,
}

impl<'a> SymbolSink<'a> {
    fn new(visited: &'a VisitedEntity) -> Self {
        Self {
            visited,
            symbols: Vec::new(),
        }
    }

    fn extend(&mut self, kind: SymbolKind, members: &[Member]) {
        let visited = self.visited;
        self.symbols
            .extend(members.iter().map(|member| to_symbol(kind, member, visited)));
    }
}

/// Contributed symbols always outrank framework defaults of the same name.
pub(super) fn to_symbol(kind: SymbolKind, member: &Member, visited: &VisitedEntity) -> Symbol {
    let entity: &Entity = &visited.entity;
    Symbol {
        kind,
        name: member.name.clone(),
        ty: member.ty.clone(),
        documentation: member.documentation.clone(),
        required: member.required,
        origin: entity.id,
        origin_name: Some(visited.name.clone()),
        priority: Priority::Highest,
        proximity: visited.proximity,
    }
}
