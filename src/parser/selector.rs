//! Directive selectors: parsing and structural matching.
//!
//! Supports element names, `.class`, `#id`, `[attr]`, `[attr=value]`,
//! `:not(...)` and comma-separated alternatives.

use logos::Logos;
use smol_str::SmolStr;
use thiserror::Error;

use crate::model::Anchor;

/// Errors from [`parse_selector`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    #[error("Nesting :not in a selector is not allowed: {0}")]
    NestedNot(SmolStr),

    #[error("Multiple selectors in :not are not supported: {0}")]
    MultipleInNot(SmolStr),

    #[error("Unterminated :not in selector: {0}")]
    UnterminatedNot(SmolStr),

    #[error("Unterminated attribute selector in: {0}")]
    UnterminatedAttribute(SmolStr),

    #[error("Unexpected '{token}' in selector: {selector}")]
    Unexpected { token: SmolStr, selector: SmolStr },
}

#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
enum SelectorToken {
    #[token(":not(")]
    NotStart,

    #[token(")")]
    NotEnd,

    #[token(",")]
    Separator,

    /// The attribute body up to `]` is consumed by [`parse_attribute`].
    #[token("[")]
    AttrStart,

    #[token("*")]
    Universal,

    #[regex(r"\.[-\w]+")]
    Class,

    #[regex(r"#[-\w]+")]
    Id,

    #[regex(r"[-\w]+")]
    Name,
}

/// One compound selector (no combinators).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CssSelector {
    pub element: Option<SmolStr>,
    /// Lower-cased class names.
    pub class_names: Vec<SmolStr>,
    /// `(name, lower-cased value)`; an empty value matches any value.
    pub attrs: Vec<(SmolStr, SmolStr)>,
    pub not_selectors: Vec<CssSelector>,
}

impl CssSelector {
    pub fn new() -> Self {
        Self::default()
    }

    fn is_empty(&self) -> bool {
        self.element.is_none() && self.class_names.is_empty() && self.attrs.is_empty()
    }

    pub fn has_element_selector(&self) -> bool {
        self.element.as_deref().is_some_and(|e| e != "*")
    }

    /// Check the selector against an anchor's tag name, attributes and classes.
    pub fn matches(&self, anchor: &Anchor) -> bool {
        if self.is_empty() {
            return false;
        }
        self.matches_compound(anchor)
            && !self
                .not_selectors
                .iter()
                .any(|n| n.matches_compound(anchor))
    }

    fn matches_compound(&self, anchor: &Anchor) -> bool {
        if self.has_element_selector()
            && !self
                .element
                .as_deref()
                .is_some_and(|e| e.eq_ignore_ascii_case(&anchor.tag_name))
        {
            return false;
        }

        let classes_match = self.class_names.iter().all(|class| {
            anchor
                .class_names()
                .any(|c| c.eq_ignore_ascii_case(class))
        });
        if !classes_match {
            return false;
        }

        self.attrs.iter().all(|(name, value)| {
            anchor.matchable_attributes().any(|(attr, attr_value)| {
                attr == name.as_str()
                    && (value.is_empty()
                        || attr_value.is_some_and(|v| v.eq_ignore_ascii_case(value)))
            })
        })
    }
}

impl std::fmt::Display for CssSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(element) = &self.element {
            write!(f, "{element}")?;
        }
        for class_name in &self.class_names {
            write!(f, ".{class_name}")?;
        }
        for (name, value) in &self.attrs {
            if value.is_empty() {
                write!(f, "[{name}]")?;
            } else {
                write!(f, "[{name}={value}]")?;
            }
        }
        for not_selector in &self.not_selectors {
            write!(f, ":not({not_selector})")?;
        }
        Ok(())
    }
}

/// A comma-separated list of selectors; matches if any alternative matches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectorList(pub Vec<CssSelector>);

impl SelectorList {
    pub fn parse(selector: &str) -> Result<Self, SelectorError> {
        parse_selector(selector).map(SelectorList)
    }

    pub fn matches(&self, anchor: &Anchor) -> bool {
        self.0.iter().any(|s| s.matches(anchor))
    }
}

/// Parse a selector string into its comma-separated alternatives.
pub fn parse_selector(selector: &str) -> Result<Vec<CssSelector>, SelectorError> {
    let source = || SmolStr::new(selector);
    let mut results = Vec::new();
    let mut current = CssSelector::new();
    let mut in_not = false;
    let mut lexer = SelectorToken::lexer(selector);

    while let Some(token) = lexer.next() {
        let text = lexer.slice();
        let Ok(token) = token else {
            return Err(SelectorError::Unexpected {
                token: SmolStr::new(text),
                selector: source(),
            });
        };

        match token {
            SelectorToken::NotStart => {
                if in_not {
                    return Err(SelectorError::NestedNot(source()));
                }
                in_not = true;
                current.not_selectors.push(CssSelector::new());
            }
            SelectorToken::NotEnd => {
                if !in_not {
                    return Err(SelectorError::Unexpected {
                        token: SmolStr::new(text),
                        selector: source(),
                    });
                }
                in_not = false;
            }
            SelectorToken::Separator => {
                if in_not {
                    return Err(SelectorError::MultipleInNot(source()));
                }
                push_result(&mut results, std::mem::take(&mut current));
            }
            SelectorToken::Universal | SelectorToken::Name => {
                target(&mut current, in_not).element = Some(SmolStr::new(text));
            }
            SelectorToken::Class => {
                target(&mut current, in_not)
                    .class_names
                    .push(SmolStr::new(text[1..].to_lowercase()));
            }
            SelectorToken::Id => {
                target(&mut current, in_not)
                    .attrs
                    .push((SmolStr::new_static("id"), SmolStr::new(text[1..].to_lowercase())));
            }
            SelectorToken::AttrStart => {
                let attr = parse_attribute(&mut lexer)
                    .ok_or_else(|| SelectorError::UnterminatedAttribute(source()))?;
                target(&mut current, in_not).attrs.push(attr);
            }
        }
    }

    if in_not {
        return Err(SelectorError::UnterminatedNot(source()));
    }
    push_result(&mut results, current);
    Ok(results)
}

fn target(current: &mut CssSelector, in_not: bool) -> &mut CssSelector {
    if in_not {
        if current.not_selectors.is_empty() {
            current.not_selectors.push(CssSelector::new());
        }
        let last = current.not_selectors.len() - 1;
        &mut current.not_selectors[last]
    } else {
        current
    }
}

/// Parse `name]` or `name=value]` after a `[`, consuming it from the lexer.
fn parse_attribute(lexer: &mut logos::Lexer<'_, SelectorToken>) -> Option<(SmolStr, SmolStr)> {
    let rest = lexer.remainder();
    let mut quote = None;
    let end = rest.char_indices().find_map(|(i, c)| {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, ']') => return Some(i),
            (None, _) => {}
        }
        None
    })?;
    let body = &rest[..end];
    lexer.bump(end + 1);

    let (name, value) = match body.split_once('=') {
        Some((name, value)) => {
            let value = value.trim();
            let value = value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
                .unwrap_or(value);
            (name.trim(), value.to_lowercase())
        }
        None => (body.trim(), String::new()),
    };
    if name.is_empty() {
        return None;
    }
    Some((SmolStr::new(name.replace("\\$", "$")), SmolStr::new(value)))
}

fn push_result(results: &mut Vec<CssSelector>, mut selector: CssSelector) {
    if !selector.not_selectors.is_empty() && selector.is_empty() {
        selector.element = Some(SmolStr::new_static("*"));
    }
    results.push(selector);
}
