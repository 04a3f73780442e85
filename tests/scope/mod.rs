//! Scope resolution tests
//!
//! Tests for:
//! - Proximity shadowing across tiers
//! - Template-only directive gating
//! - Partial-failure tolerance
//! - Generation-keyed caching and concurrent first access

pub mod tests_caching;
pub mod tests_resolution;
#[cfg(feature = "serde")]
pub mod tests_serde;
