//! Shared fixtures and assertions for integration tests.

pub mod entity_fixtures;
pub mod symbol_assertions;
