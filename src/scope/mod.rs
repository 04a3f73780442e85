//! Scope resolution for template anchors.
//!
//! ```text
//! anchor key + generation
//!     ↓
//! ScopeCache  → hit: cached symbols
//!     ↓ miss
//! visit(container)         nearest tier first, declaration order
//!     ↓
//! EntityMatcher            which entities apply to the anchor
//!     ↓
//! MatchedScope::compute    contributions merged, nearer proximity wins
//!     ↓
//! published for (anchor, generation)
//! ```

mod cache;
mod config;
mod contribute;
mod matched;
mod matcher;
mod resolver;

pub use cache::{CacheStats, ScopeCache};
pub use config::ScopeConfig;
pub use contribute::contribute;
pub use matched::{MatchedScope, component_contributions};
pub use matcher::{EntityMatcher, SelectorMatcher};
pub use resolver::{KindFilter, ScopeResolver, SymbolQuery};
