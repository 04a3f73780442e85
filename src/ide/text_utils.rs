//! Text helpers for cursor positions in template source.

use text_size::TextSize;

/// Check if a character can be part of a template name.
///
/// Uses Unicode Standard Annex #31 identifier characters, plus `-` for
/// custom element and attribute names.
#[inline]
pub fn is_word_character(c: char) -> bool {
    unicode_ident::is_xid_continue(c) || c == '-'
}

/// The part of the word ending at `offset` (what the user has typed so far).
///
/// Returns an empty string when `offset` is out of bounds or not on a char
/// boundary.
pub fn word_prefix_at(text: &str, offset: TextSize) -> &str {
    let end = usize::from(offset);
    let Some(before) = text.get(..end) else {
        return "";
    };
    let start = before
        .char_indices()
        .rev()
        .take_while(|(_, c)| is_word_character(*c))
        .last()
        .map_or(end, |(i, _)| i);
    &before[start..]
}

/// Extract the whole word around `offset`.
///
/// # Example
/// ```
/// use webscope::ide::text_utils::extract_word_at;
///
/// let line = "<todo-item done>";
/// assert_eq!(extract_word_at(line, 3.into()), Some("todo-item"));
/// assert_eq!(extract_word_at(line, 0.into()), None);
/// ```
pub fn extract_word_at(text: &str, offset: TextSize) -> Option<&str> {
    let position = usize::from(offset);
    let current = text.get(position..)?.chars().next()?;
    if !is_word_character(current) {
        return None;
    }
    let start = position - word_prefix_at(text, offset).len();
    let end = text[position..]
        .char_indices()
        .find(|(_, c)| !is_word_character(*c))
        .map_or(text.len(), |(i, _)| position + i);
    Some(&text[start..end])
}
