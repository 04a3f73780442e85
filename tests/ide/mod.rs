//! IDE feature tests
//!
//! Tests for:
//! - Analysis snapshots over edited templates
//! - Code completion
//! - Component element queries

pub mod tests_completion;
