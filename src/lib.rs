//! # webscope-base
//!
//! Scope resolution for web-framework template languages: which directive
//! inputs, outputs, attributes, component props, events and slots are
//! visible at a template element.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide       → AnalysisHost/Analysis snapshots, completions
//!   ↓
//! scope     → Matching, symbol composition, generation-keyed cache
//!   ↓
//! parser    → Logos lexers, template tree builder, selector grammar
//!   ↓
//! model     → Entities, symbols, anchors, proximity-tiered containers
//!   ↓
//! base      → Primitives (FileId, Generation, name normalization, TextRange)
//! ```

// ============================================================================
// MODULES (dependency order: base → model → parser → scope → ide)
// ============================================================================

/// Foundation types: FileId, Generation, name normalization, TextRange
pub mod base;

/// Entity and symbol model, containers and proximity traversal
pub mod model;

/// Parser: template anchors and directive selectors
pub mod parser;

/// Scope resolution: matching, composition, caching
pub mod scope;

/// IDE features: analysis snapshots and completion
pub mod ide;

// Re-export foundation types
pub use base::{FileId, Generation, ModificationTracker, NameMatch, TextRange, TextSize};

// Re-export the resolver surface
pub use model::{
    Anchor, AnchorKey, Document, Entity, EntityContainer, Proximity, Symbol, SymbolKind,
};
pub use scope::{ScopeConfig, ScopeResolver, SymbolQuery};
