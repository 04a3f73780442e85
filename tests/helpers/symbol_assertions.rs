//! Symbol assertion helpers for scope tests.

use webscope::model::{EntityId, Symbol, SymbolKind};

/// `(kind, name)` pairs in scope order.
pub fn kinds_and_names(symbols: &[Symbol]) -> Vec<(SymbolKind, &str)> {
    symbols.iter().map(|s| (s.kind, s.name.as_str())).collect()
}

/// Assert a symbol of the given kind and name is in scope and return it.
pub fn get_symbol<'a>(symbols: &'a [Symbol], kind: SymbolKind, name: &str) -> &'a Symbol {
    symbols
        .iter()
        .find(|s| s.kind == kind && s.name == name)
        .unwrap_or_else(|| {
            panic!(
                "Expected {} '{}' in scope, got {:?}",
                kind.display(),
                name,
                kinds_and_names(symbols)
            )
        })
}

/// Assert no symbol of the given kind and name is in scope.
pub fn assert_absent(symbols: &[Symbol], kind: SymbolKind, name: &str) {
    assert!(
        !symbols.iter().any(|s| s.kind == kind && s.name == name),
        "Expected no {} '{}' in scope, got {:?}",
        kind.display(),
        name,
        kinds_and_names(symbols)
    );
}

/// Assert a symbol came from the given entity.
pub fn assert_origin(symbol: &Symbol, expected: EntityId) {
    assert_eq!(
        symbol.origin, expected,
        "Expected {} '{}' to come from {:?}, got {:?}",
        symbol.kind.display(),
        symbol.name,
        expected,
        symbol.origin
    );
}

/// Assert no two symbols share a `(kind, name)` key.
pub fn assert_no_duplicate_symbols(symbols: &[Symbol]) {
    let mut seen = std::collections::HashSet::new();
    for symbol in symbols {
        if !seen.insert(symbol.key()) {
            panic!(
                "Duplicate symbol found: {} '{}'",
                symbol.kind.display(),
                symbol.name
            );
        }
    }
}
