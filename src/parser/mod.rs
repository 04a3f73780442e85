//! Structural parsing for templates and directive selectors
//!
//! - **logos** drives both lexers
//! - [`parse_template`] builds the anchor tree of a template file
//! - [`parse_selector`] parses directive selectors for matching against anchors
//!
//! ```text
//! Template text
//!     ↓
//! Lexer (logos) → tag delimiters, names, values
//!     ↓
//! Tree builder → Document of Anchors with structural AnchorKeys
//! ```
//!
//! Parsing a template never fails. Malformed markup still yields the
//! elements that can be recovered.

mod lexer;
mod selector;
mod template;

pub use lexer::{Lexer, Token, TokenKind, tokenize};
pub use selector::{CssSelector, SelectorError, SelectorList, parse_selector};
pub use template::parse_template;
