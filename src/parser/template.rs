//! Tolerant template tree builder.
//!
//! Produces a [`Document`] of anchors from template markup. Never fails:
//! unclosed elements run to the end of input, stray close tags are dropped,
//! and text content is skipped.

use std::iter::Peekable;

use smol_str::SmolStr;
use text_size::{TextRange, TextSize};

use crate::base::FileId;
use crate::model::{Anchor, AnchorKey, Attribute, Document};

use super::lexer::{Lexer, Token, TokenKind};

/// Elements that never have children or a close tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

fn is_void_element(tag: &str) -> bool {
    VOID_ELEMENTS.iter().any(|v| v.eq_ignore_ascii_case(tag))
}

/// An element still waiting for its close tag.
struct OpenElement {
    /// Index into `TreeBuilder::anchors`.
    index: usize,
    next_child: u32,
}

struct TreeBuilder {
    file: FileId,
    /// Anchors in pre-order; ranges are patched when elements close.
    anchors: Vec<Anchor>,
    stack: Vec<OpenElement>,
    next_root: u32,
}

impl TreeBuilder {
    fn new(file: FileId) -> Self {
        Self {
            file,
            anchors: Vec::new(),
            stack: Vec::new(),
            next_root: 0,
        }
    }

    fn next_key(&mut self) -> AnchorKey {
        match self.stack.last_mut() {
            Some(parent) => {
                let index = parent.next_child;
                parent.next_child += 1;
                self.anchors[parent.index].key.child(index)
            }
            None => {
                let index = self.next_root;
                self.next_root += 1;
                AnchorKey::new(self.file, vec![index])
            }
        }
    }

    fn open(
        &mut self,
        tag: &str,
        attributes: Vec<Attribute>,
        range: TextRange,
        start_tag: TextRange,
        closed: bool,
    ) {
        let key = self.next_key();
        let mut anchor = Anchor::new(key, tag, range).with_start_tag(start_tag);
        anchor.attributes = attributes;
        let index = self.anchors.len();
        self.anchors.push(anchor);
        if !closed {
            self.stack.push(OpenElement {
                index,
                next_child: 0,
            });
        }
    }

    /// Close the innermost open element named `tag`. Elements opened inside it
    /// are closed implicitly at `implicit_end`.
    fn close(&mut self, tag: &str, implicit_end: TextSize, end: TextSize) {
        let Some(depth) = self
            .stack
            .iter()
            .rposition(|open| self.anchors[open.index].tag_name.eq_ignore_ascii_case(tag))
        else {
            tracing::trace!("[TEMPLATE] dropping stray close tag </{}>", tag);
            return;
        };

        while self.stack.len() > depth + 1 {
            if let Some(open) = self.stack.pop() {
                self.finish(open.index, implicit_end);
            }
        }
        if let Some(open) = self.stack.pop() {
            self.finish(open.index, end);
        }
    }

    fn finish(&mut self, index: usize, end: TextSize) {
        let anchor = &mut self.anchors[index];
        anchor.range = TextRange::new(anchor.range.start(), end.max(anchor.range.start()));
    }

    fn build(mut self, end: TextSize) -> Document {
        while let Some(open) = self.stack.pop() {
            self.finish(open.index, end);
        }
        let mut document = Document::new(self.file);
        for anchor in self.anchors {
            document.insert(anchor);
        }
        document
    }
}

/// A tag name must follow its `<` or `</` directly (`a < b` in text is not a tag).
fn is_tag_name(candidate: &Token<'_>, open: &Token<'_>) -> bool {
    candidate.kind == TokenKind::Name && candidate.range.start() == open.range.end()
}

/// Parse template markup into an anchor tree.
pub fn parse_template(file: FileId, text: &str) -> Document {
    let mut builder = TreeBuilder::new(file);
    let mut tokens = Lexer::new(text).peekable();

    while let Some(token) = tokens.next() {
        match token.kind {
            TokenKind::TagOpen => {
                let Some(name) = tokens.next_if(|t| is_tag_name(t, &token)) else {
                    continue;
                };
                let (attributes, terminator, self_closed) = parse_attributes(&mut tokens);
                let eof = TextSize::of(text);
                let start = token.range.start();
                let range = TextRange::new(start, terminator.map_or(eof, |t| t.end()));
                let start_tag = TextRange::new(start, terminator.map_or(eof, |t| t.start()));
                let closed = self_closed || is_void_element(name.text);
                builder.open(name.text, attributes, range, start_tag, closed);
            }
            TokenKind::CloseTagOpen => {
                let Some(name) = tokens.next_if(|t| is_tag_name(t, &token)) else {
                    continue;
                };
                let end = match tokens.next_if(|t| t.kind == TokenKind::TagEnd) {
                    Some(gt) => gt.range.end(),
                    None => name.range.end(),
                };
                builder.close(name.text, token.range.start(), end);
            }
            _ => {}
        }
    }

    builder.build(TextSize::of(text))
}

/// Parse attributes up to the end of the start tag.
///
/// Returns the attributes, the range of the token terminating the tag (empty
/// when the next tag cuts it short, `None` at end of input) and whether it was
/// self-closing.
fn parse_attributes<'a, I>(tokens: &mut Peekable<I>) -> (Vec<Attribute>, Option<TextRange>, bool)
where
    I: Iterator<Item = Token<'a>>,
{
    let mut attributes = Vec::new();

    loop {
        let Some(token) = tokens.peek() else {
            return (attributes, None, false);
        };
        match token.kind {
            TokenKind::TagEnd | TokenKind::SelfClose => {
                let self_closed = token.kind == TokenKind::SelfClose;
                let terminator = token.range;
                tokens.next();
                return (attributes, Some(terminator), self_closed);
            }
            // A new tag starts before this one was terminated.
            TokenKind::TagOpen | TokenKind::CloseTagOpen => {
                let cut = TextRange::empty(token.range.start());
                return (attributes, Some(cut), false);
            }
            TokenKind::Name => {
                let Some(name) = tokens.next() else {
                    break;
                };
                let mut range = name.range;
                let mut value = None;
                if tokens.next_if(|t| t.kind == TokenKind::Eq).is_some() {
                    if let Some(v) = tokens
                        .next_if(|t| matches!(t.kind, TokenKind::Quoted | TokenKind::Name))
                    {
                        range = range.cover(v.range);
                        value = Some(SmolStr::new(v.unquoted()));
                    }
                }
                attributes.push(Attribute::new(name.text, value, range));
            }
            _ => {
                tokens.next();
            }
        }
    }

    (attributes, None, false)
}
