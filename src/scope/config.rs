//! Resolver configuration.

use smol_str::SmolStr;

use crate::base::NameMatch;
use crate::model::{Anchor, AttributeBinding, Proximity};

/// Options controlling scope resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeConfig {
    /// Tag names treated as template markers (case-insensitive).
    pub template_tags: Vec<SmolStr>,
    /// Name comparison used when matching components by element name.
    pub name_match: NameMatch,
    /// Farthest proximity tier that takes part in resolution.
    pub max_proximity: Proximity,
    /// Number of cached anchors above which stale slots are swept on insert.
    pub cache_capacity: usize,
}

impl Default for ScopeConfig {
    fn default() -> Self {
        Self {
            template_tags: vec![SmolStr::new_static("ng-template")],
            name_match: NameMatch::Asset,
            max_proximity: Proximity::Global,
            cache_capacity: 4096,
        }
    }
}

impl ScopeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_template_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        self.template_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_name_match(mut self, name_match: NameMatch) -> Self {
        self.name_match = name_match;
        self
    }

    pub fn with_max_proximity(mut self, proximity: Proximity) -> Self {
        self.max_proximity = proximity;
        self
    }

    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    /// Whether `anchor` is a template marker: a configured template tag, or
    /// an element carrying a `*` template binding.
    pub fn is_template_marker(&self, anchor: &Anchor) -> bool {
        anchor.is_template_tag(&self.template_tags)
            || anchor
                .attributes
                .iter()
                .any(|attr| attr.binding().0 == AttributeBinding::Template)
    }
}
