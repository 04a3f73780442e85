//! Logos-based lexer for template markup
//!
//! Only the structure matters here: tag delimiters, names, `=`, quoted
//! values. Text content comes out as names or error tokens and is ignored by
//! the tree builder.

use logos::Logos;
use text_size::{TextRange, TextSize};

/// Kind of a markup token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `<`
    TagOpen,
    /// `</`
    CloseTagOpen,
    /// `>`
    TagEnd,
    /// `/>`
    SelfClose,
    /// `=`
    Eq,
    /// Tag or attribute name, unquoted value, or a word of text content.
    Name,
    /// `"..."` or `'...'`
    Quoted,
    /// `<!-- ... -->`
    Comment,
    /// Anything else (stray `/`, unterminated quotes).
    Error,
}

/// A token with its kind, text, and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub range: TextRange,
}

impl Token<'_> {
    /// Text of a quoted token without its quotes; other tokens unchanged.
    pub fn unquoted(&self) -> &str {
        match self.kind {
            TokenKind::Quoted if self.text.len() >= 2 => &self.text[1..self.text.len() - 1],
            _ => self.text,
        }
    }
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.inner.next()?;
        let text = self.inner.slice();
        let span = self.inner.span();
        let range = TextRange::new(
            TextSize::new(span.start as u32),
            TextSize::new(span.end as u32),
        );

        let kind = match logos_token {
            Ok(t) => t.into(),
            Err(()) => TokenKind::Error,
        };

        Some(Token { kind, text, range })
    }
}

/// Tokenize an entire string into a Vec
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

fn comment(lex: &mut logos::Lexer<LogosToken>) {
    let rest = lex.remainder();
    let len = rest.find("-->").map_or(rest.len(), |end| end + 3);
    lex.bump(len);
}

fn is_name_char(c: char) -> bool {
    !c.is_whitespace() && !matches!(c, '<' | '>' | '/' | '=' | '"' | '\'')
}

/// Extend a name over `/segment` runs (`/a/b`, `https://x`), never over `/>`.
fn path_segments(lex: &mut logos::Lexer<LogosToken>) {
    let rest = lex.remainder();
    let mut len = 0;
    loop {
        let tail = &rest[len..];
        let slashes = tail.len() - tail.trim_start_matches('/').len();
        if slashes == 0 {
            break;
        }
        let segment: usize = tail[slashes..]
            .chars()
            .take_while(|c| is_name_char(*c))
            .map(char::len_utf8)
            .sum();
        if segment == 0 {
            break;
        }
        len += slashes + segment;
    }
    lex.bump(len);
}

/// Logos token enum - maps to TokenKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
enum LogosToken {
    #[token("<!--", comment)]
    Comment,

    #[token("</")]
    CloseTagOpen,

    #[token("<")]
    TagOpen,

    #[token("/>")]
    SelfClose,

    #[token(">")]
    TagEnd,

    #[token("=")]
    Eq,

    // Single-quoted values stop at tag delimiters so apostrophes in text
    // content cannot swallow markup.
    #[regex(r#""[^"]*""#)]
    #[regex(r"'[^'<>]*'")]
    Quoted,

    #[regex(r#"/?[^\s<>/="']+"#, path_segments)]
    Name,
}

impl From<LogosToken> for TokenKind {
    fn from(token: LogosToken) -> Self {
        match token {
            LogosToken::Comment => TokenKind::Comment,
            LogosToken::CloseTagOpen => TokenKind::CloseTagOpen,
            LogosToken::TagOpen => TokenKind::TagOpen,
            LogosToken::SelfClose => TokenKind::SelfClose,
            LogosToken::TagEnd => TokenKind::TagEnd,
            LogosToken::Eq => TokenKind::Eq,
            LogosToken::Quoted => TokenKind::Quoted,
            LogosToken::Name => TokenKind::Name,
        }
    }
}
