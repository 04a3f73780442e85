//! Completion suggestions from resolved scopes.

use std::sync::Arc;

use crate::base::from_asset;
use crate::model::{Symbol, SymbolKind};

/// Kind of completion item. Declaration order breaks ties between equal labels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum CompletionKind {
    Property,
    Event,
    Attribute,
    Reference,
    Element,
    Slot,
}

impl CompletionKind {
    /// Convert to LSP completion item kind number.
    pub fn to_lsp(&self) -> u32 {
        match self {
            CompletionKind::Property => 10,  // Property
            CompletionKind::Event => 23,     // Event
            CompletionKind::Attribute => 5,  // Field
            CompletionKind::Reference => 18, // Reference
            CompletionKind::Element => 7,    // Class
            CompletionKind::Slot => 12,      // Value
        }
    }

    fn of(kind: SymbolKind) -> Self {
        match kind {
            SymbolKind::Input | SymbolKind::InOut => CompletionKind::Property,
            SymbolKind::Output | SymbolKind::Event => CompletionKind::Event,
            SymbolKind::DirectiveAttribute
            | SymbolKind::HtmlAttribute
            | SymbolKind::Directive => CompletionKind::Attribute,
            SymbolKind::ExportAs => CompletionKind::Reference,
            SymbolKind::Element => CompletionKind::Element,
            SymbolKind::Slot => CompletionKind::Slot,
        }
    }
}

/// A completion suggestion.
#[derive(Clone, Debug)]
pub struct CompletionItem {
    /// The text to insert.
    pub label: Arc<str>,
    /// The kind of completion.
    pub kind: CompletionKind,
    /// Detail text (shown after label).
    pub detail: Option<Arc<str>>,
    /// Documentation (shown in popup).
    pub documentation: Option<Arc<str>>,
    /// Text to insert (if different from label).
    pub insert_text: Option<Arc<str>>,
    /// Sort priority (lower = higher priority).
    pub sort_priority: u32,
}

impl CompletionItem {
    /// Create a new completion item.
    pub fn new(label: impl Into<Arc<str>>, kind: CompletionKind) -> Self {
        Self {
            label: label.into(),
            kind,
            detail: None,
            documentation: None,
            insert_text: None,
            sort_priority: 100,
        }
    }

    /// Set the detail text.
    pub fn with_detail(mut self, detail: impl Into<Arc<str>>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Set the documentation.
    pub fn with_documentation(mut self, doc: impl Into<Arc<str>>) -> Self {
        self.documentation = Some(doc.into());
        self
    }

    /// Set the insert text.
    pub fn with_insert_text(mut self, text: impl Into<Arc<str>>) -> Self {
        self.insert_text = Some(text.into());
        self
    }

    /// Set the sort priority.
    pub fn with_priority(mut self, priority: u32) -> Self {
        self.sort_priority = priority;
        self
    }

    /// Create from a resolved symbol.
    ///
    /// Bound kinds insert their binding syntax; higher symbol priority and
    /// nearer proximity sort first.
    pub fn from_symbol(symbol: &Symbol) -> Self {
        let name = symbol.name.as_str();
        let mut item = Self::new(name, CompletionKind::of(symbol.kind));

        let insert = match symbol.kind {
            SymbolKind::Input => Some(format!("[{name}]")),
            SymbolKind::Output => Some(format!("({name})")),
            SymbolKind::InOut => Some(format!("[({name})]")),
            SymbolKind::Event => Some(format!("@{}", from_asset(name))),
            SymbolKind::ExportAs => Some(format!("#{name}")),
            _ => None,
        };
        if let Some(insert) = insert {
            item = item.with_insert_text(insert);
        }

        item = item.with_detail(match (&symbol.ty, &symbol.origin_name) {
            (Some(ty), _) => format!("{}: {}", symbol.kind.display(), ty),
            (None, Some(origin)) => format!("{} from {}", symbol.kind.display(), origin),
            (None, None) => symbol.kind.display().to_string(),
        });
        if let Some(doc) = &symbol.documentation {
            item = item.with_documentation(Arc::clone(doc));
        }

        let priority_rank = 4 - symbol.priority as u32;
        item.with_priority(priority_rank * 10 + symbol.proximity as u32)
    }
}

/// Build completion items from the symbols in scope.
///
/// Only labels starting with `prefix` are kept (ASCII case-insensitive).
/// Items are sorted by priority, label and kind, then de-duplicated by label.
pub fn completions(symbols: &[Symbol], prefix: &str) -> Vec<CompletionItem> {
    let prefix = prefix.to_ascii_lowercase();
    let mut items: Vec<CompletionItem> = symbols
        .iter()
        .filter(|symbol| symbol.name.to_ascii_lowercase().starts_with(&prefix))
        .map(CompletionItem::from_symbol)
        .collect();

    items.sort_by(|a, b| {
        a.sort_priority
            .cmp(&b.sort_priority)
            .then_with(|| a.label.cmp(&b.label))
            .then_with(|| a.kind.cmp(&b.kind))
    });

    // Deduplicate by label, keeping the best-sorted item
    let mut seen = rustc_hash::FxHashSet::default();
    items.retain(|item| seen.insert(Arc::clone(&item.label)));

    items
}
