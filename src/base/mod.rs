//! Foundation types for the scope resolver.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`FileId`] - Compact file identifiers
//! - [`Generation`], [`ModificationTracker`] - Mutation counter and the tokens it hands out
//! - [`NameMatch`] - Exact vs. asset-name normalization
//! - [`TextRange`], [`TextSize`] - Source positions (byte offsets)
//!
//! This module has NO dependencies on other crate modules.

mod file_id;
mod generation;
mod names;

pub use file_id::FileId;
pub use generation::{Generation, ModificationTracker};
pub use names::{NameMatch, from_asset};

// Re-export text-size types for convenience
pub use text_size::{TextRange, TextSize};
