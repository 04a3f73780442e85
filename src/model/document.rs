//! Anchor tree of a single template file.

use rustc_hash::FxHashMap;

use crate::base::{FileId, TextSize};

use super::anchor::{Anchor, AnchorKey};

/// All anchors of one template, addressable by structural key.
#[derive(Debug, Clone, Default)]
pub struct Document {
    file: Option<FileId>,
    /// Anchors in document (pre-)order.
    anchors: Vec<Anchor>,
    by_key: FxHashMap<AnchorKey, usize>,
    roots: Vec<AnchorKey>,
}

impl Document {
    pub fn new(file: FileId) -> Self {
        Self {
            file: Some(file),
            ..Self::default()
        }
    }

    pub fn file(&self) -> Option<FileId> {
        self.file
    }

    /// Add an anchor. Its key must be unique within the document.
    pub fn insert(&mut self, anchor: Anchor) {
        if anchor.key.depth() == 1 {
            self.roots.push(anchor.key.clone());
        } else if let Some(parent) = anchor.key.parent().and_then(|p| self.by_key.get(&p)) {
            let parent = *parent;
            self.anchors[parent].children.push(anchor.key.clone());
        }
        self.by_key.insert(anchor.key.clone(), self.anchors.len());
        self.anchors.push(anchor);
    }

    /// Dereference a structural key. `None` means the anchor is stale.
    pub fn anchor(&self, key: &AnchorKey) -> Option<&Anchor> {
        if self.file.is_some_and(|file| file != key.file) {
            return None;
        }
        self.by_key.get(key).map(|&idx| &self.anchors[idx])
    }

    pub fn contains(&self, key: &AnchorKey) -> bool {
        self.anchor(key).is_some()
    }

    /// Innermost anchor whose range contains `offset`.
    pub fn anchor_at(&self, offset: TextSize) -> Option<&Anchor> {
        self.anchors
            .iter()
            .filter(|a| a.range.contains_inclusive(offset))
            .max_by_key(|a| a.key.depth())
    }

    pub fn roots(&self) -> &[AnchorKey] {
        &self.roots
    }

    pub fn anchors(&self) -> impl Iterator<Item = &Anchor> {
        self.anchors.iter()
    }

    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }
}
