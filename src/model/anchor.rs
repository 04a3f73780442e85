use std::sync::Arc;

use smol_str::SmolStr;

use crate::base::{FileId, TextRange, TextSize};

/// Structural identity of an anchor: its file plus the child-index path from
/// the document root.
///
/// Reparsing the same logical tree yields equal keys, so cache entries survive
/// re-creation of the anchor objects themselves.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AnchorKey {
    pub file: FileId,
    pub path: Arc<[u32]>,
}

impl AnchorKey {
    pub fn new(file: FileId, path: impl Into<Arc<[u32]>>) -> Self {
        Self {
            file,
            path: path.into(),
        }
    }

    /// Key of the `index`-th child of this anchor.
    pub fn child(&self, index: u32) -> Self {
        let mut path = Vec::with_capacity(self.path.len() + 1);
        path.extend_from_slice(&self.path);
        path.push(index);
        Self::new(self.file, path)
    }

    pub fn parent(&self) -> Option<Self> {
        let (_, rest) = self.path.split_last()?;
        Some(Self::new(self.file, rest))
    }

    pub fn depth(&self) -> usize {
        self.path.len()
    }
}

impl std::fmt::Display for AnchorKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:/", self.file)?;
        let mut first = true;
        for index in self.path.iter() {
            if !first {
                write!(f, "/")?;
            }
            write!(f, "{index}")?;
            first = false;
        }
        Ok(())
    }
}

/// How an attribute binds, derived from its written name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeBinding {
    /// `name="value"`
    Plain,
    /// `[name]`, `bind-name`, `:name`, `v-bind:name`
    Property,
    /// `(name)`, `on-name`, `@name`, `v-on:name`
    Event,
    /// `[(name)]`, `bindon-name`
    TwoWay,
    /// `*name`
    Template,
    /// `#name`, `ref-name`
    Reference,
}

/// An attribute as written on an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: SmolStr,
    pub value: Option<SmolStr>,
    pub range: TextRange,
}

impl Attribute {
    pub fn new(name: impl Into<SmolStr>, value: Option<SmolStr>, range: TextRange) -> Self {
        Self {
            name: name.into(),
            value,
            range,
        }
    }

    /// Split the written name into its binding form and bare name.
    pub fn binding(&self) -> (AttributeBinding, &str) {
        classify_attribute_name(&self.name)
    }

    /// Attribute name with binding syntax stripped (`[(ngModel)]` -> `ngModel`).
    pub fn bare_name(&self) -> &str {
        self.binding().1
    }
}

fn classify_attribute_name(name: &str) -> (AttributeBinding, &str) {
    if let Some(inner) = name.strip_prefix("[(").and_then(|n| n.strip_suffix(")]")) {
        return (AttributeBinding::TwoWay, inner);
    }
    if let Some(inner) = name.strip_prefix('[').and_then(|n| n.strip_suffix(']')) {
        return (AttributeBinding::Property, inner);
    }
    if let Some(inner) = name.strip_prefix('(').and_then(|n| n.strip_suffix(')')) {
        return (AttributeBinding::Event, inner);
    }
    if let Some(inner) = name.strip_prefix('*') {
        return (AttributeBinding::Template, inner);
    }
    if let Some(inner) = name.strip_prefix('#') {
        return (AttributeBinding::Reference, inner);
    }
    if let Some(inner) = name.strip_prefix("bindon-") {
        return (AttributeBinding::TwoWay, inner);
    }
    if let Some(inner) = name
        .strip_prefix("bind-")
        .or_else(|| name.strip_prefix("v-bind:"))
        .or_else(|| name.strip_prefix(':'))
    {
        return (AttributeBinding::Property, inner);
    }
    if let Some(inner) = name
        .strip_prefix("on-")
        .or_else(|| name.strip_prefix("v-on:"))
        .or_else(|| name.strip_prefix('@'))
    {
        return (AttributeBinding::Event, inner);
    }
    if let Some(inner) = name.strip_prefix("ref-") {
        return (AttributeBinding::Reference, inner);
    }
    (AttributeBinding::Plain, name)
}

/// A template location (element) for which a scope is resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    pub key: AnchorKey,
    pub tag_name: SmolStr,
    pub attributes: Vec<Attribute>,
    pub range: TextRange,
    /// From `<` up to, not including, the `>` or `/>` ending the start tag.
    pub start_tag: TextRange,
    pub children: Vec<AnchorKey>,
}

impl Anchor {
    pub fn new(key: AnchorKey, tag_name: impl Into<SmolStr>, range: TextRange) -> Self {
        Self {
            key,
            tag_name: tag_name.into(),
            attributes: Vec::new(),
            range,
            start_tag: range,
            children: Vec::new(),
        }
    }

    pub fn with_start_tag(mut self, start_tag: TextRange) -> Self {
        self.start_tag = start_tag;
        self
    }

    /// Whether `offset` is past the `<` and before the end of the start tag,
    /// where attributes are written.
    pub fn in_start_tag(&self, offset: TextSize) -> bool {
        offset > self.start_tag.start() && offset <= self.start_tag.end()
    }

    pub fn with_attribute(mut self, name: &str, value: Option<&str>) -> Self {
        self.attributes
            .push(Attribute::new(name, value.map(SmolStr::new), self.range));
        self
    }

    pub fn attribute(&self, bare_name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.bare_name() == bare_name)
    }

    /// Attribute names visible to selector matching, binding syntax stripped.
    /// References (`#ref`) never take part in matching.
    pub fn matchable_attributes(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.attributes.iter().filter_map(|attr| match attr.binding() {
            (AttributeBinding::Reference, _) => None,
            (AttributeBinding::Plain, name) => Some((name, attr.value.as_deref())),
            (_, name) => Some((name, None)),
        })
    }

    /// Class names from the `class` attribute.
    pub fn class_names(&self) -> impl Iterator<Item = &str> {
        self.attributes
            .iter()
            .filter(|a| a.name == "class")
            .filter_map(|a| a.value.as_deref())
            .flat_map(str::split_whitespace)
    }

    /// Whether this anchor is a template marker under the given tag names.
    pub fn is_template_tag(&self, template_tags: &[SmolStr]) -> bool {
        template_tags
            .iter()
            .any(|tag| tag.eq_ignore_ascii_case(&self.tag_name))
    }
}
