use std::sync::Arc;

use smol_str::SmolStr;

use super::entity::EntityId;

/// Qualified kind of a web symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SymbolKind {
    /// Directive or component input (`[value]`, Vue props).
    Input,
    /// Directive output (`(change)`).
    Output,
    /// Two-way binding (`[(value)]`).
    InOut,
    /// Static attribute injected by a directive.
    DirectiveAttribute,
    /// `exportAs` name, usable in template references.
    ExportAs,
    /// Plain HTML attribute contributed by an entity.
    HtmlAttribute,
    /// Element (component tag).
    Element,
    /// Template directive (`v-foo`).
    Directive,
    /// Component event (Vue emits).
    Event,
    /// Component slot.
    Slot,
}

impl SymbolKind {
    /// Get a display string for this kind.
    pub fn display(&self) -> &'static str {
        match self {
            SymbolKind::Input => "input",
            SymbolKind::Output => "output",
            SymbolKind::InOut => "in-out",
            SymbolKind::DirectiveAttribute => "directive attribute",
            SymbolKind::ExportAs => "export",
            SymbolKind::HtmlAttribute => "attribute",
            SymbolKind::Element => "element",
            SymbolKind::Directive => "directive",
            SymbolKind::Event => "event",
            SymbolKind::Slot => "slot",
        }
    }
}

/// Symbol priority. Higher priorities shadow framework defaults of the same name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Priority {
    Lowest,
    Low,
    #[default]
    Normal,
    High,
    Highest,
}

/// How close an entity is to the anchor being resolved.
///
/// Ordered nearest-first: a lower tier shadows a higher one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Proximity {
    /// Declared by the enclosing component or template.
    Local,
    /// Registered on the application.
    App,
    /// Provided by a plugin or imported module.
    Plugin,
    /// Globally registered.
    Global,
}

impl Proximity {
    pub const ALL: [Proximity; 4] = [
        Proximity::Local,
        Proximity::App,
        Proximity::Plugin,
        Proximity::Global,
    ];
}

/// A named, kinded contribution visible at an anchor.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Symbol {
    pub kind: SymbolKind,
    pub name: SmolStr,
    /// Declared type, opaque to the resolver.
    pub ty: Option<SmolStr>,
    pub documentation: Option<Arc<str>>,
    pub required: bool,
    /// Entity that contributed this symbol.
    pub origin: EntityId,
    pub origin_name: Option<SmolStr>,
    pub priority: Priority,
    pub proximity: Proximity,
}

impl Symbol {
    /// Uniqueness key within one resolved scope.
    pub fn key(&self) -> (SymbolKind, &str) {
        (self.kind, self.name.as_str())
    }
}
