//! Name normalization for symbol and entity lookups.

use heck::ToKebabCase;
use smol_str::SmolStr;

/// How candidate names are compared against a query name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NameMatch {
    /// Byte-for-byte comparison.
    Exact,
    /// Framework asset names: `MyComp`, `myComp` and `my-comp` are the same name.
    #[default]
    Asset,
}

impl NameMatch {
    /// Normalize a name according to this mode.
    pub fn normalize(self, name: &str) -> SmolStr {
        match self {
            NameMatch::Exact => SmolStr::new(name),
            NameMatch::Asset => from_asset(name),
        }
    }

    /// Check whether `candidate` matches `query` under this mode.
    pub fn matches(self, candidate: &str, query: &str) -> bool {
        match self {
            NameMatch::Exact => candidate == query,
            NameMatch::Asset => candidate == query || from_asset(candidate) == from_asset(query),
        }
    }
}

/// Convert an asset name to its kebab-case template form (`MyComp` -> `my-comp`).
pub fn from_asset(name: &str) -> SmolStr {
    SmolStr::new(name.to_kebab_case())
}
