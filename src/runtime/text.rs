//! Text payload helpers
//!
//! Escape-aware rendering and boundary-checked byte slicing, shared by the
//! printing and parsing paths.

use crate::error::{Error, Result};

/// Render `text` into `out` as a quoted literal.
///
/// Every escape emitted here is in the set the literal parser accepts, so
/// printing and re-parsing a text value reproduces it byte for byte.
/// Characters outside the escape set are written raw, including controls.
pub(crate) fn escape_into<W: std::fmt::Write>(out: &mut W, text: &str) -> std::fmt::Result {
    out.write_char('"')?;
    for c in text.chars() {
        match c {
            '"' => out.write_str("\\\"")?,
            '\\' => out.write_str("\\\\")?,
            '\x07' => out.write_str("\\a")?,
            '\x08' => out.write_str("\\b")?,
            '\x0C' => out.write_str("\\f")?,
            '\n' => out.write_str("\\n")?,
            '\r' => out.write_str("\\r")?,
            '\t' => out.write_str("\\t")?,
            '\x0B' => out.write_str("\\v")?,
            _ => out.write_char(c)?,
        }
    }
    out.write_char('"')
}

/// Map the character after a backslash to the character it denotes.
///
/// Returns `None` for characters outside the escape set.
pub(crate) fn unescape_char(c: char) -> Option<char> {
    match c {
        '"' => Some('"'),
        '\'' => Some('\''),
        '\\' => Some('\\'),
        '/' => Some('/'),
        'a' => Some('\x07'),
        'b' => Some('\x08'),
        'f' => Some('\x0C'),
        'n' => Some('\n'),
        'r' => Some('\r'),
        't' => Some('\t'),
        'v' => Some('\x0B'),
        _ => None,
    }
}

/// Slice `text` by byte offsets, half-open.
///
/// Requires `start <= end <= text.len()`, with both offsets on character
/// boundaries. Slicing an empty range at the very end is legal.
pub(crate) fn slice(text: &str, start: usize, end: usize) -> Result<&str> {
    if start > end {
        return Err(Error::InvalidArgument("slice start exceeds end"));
    }
    if end > text.len() {
        return Err(Error::OutOfBounds {
            index: end,
            len: text.len(),
        });
    }
    if !text.is_char_boundary(start) || !text.is_char_boundary(end) {
        return Err(Error::InvalidArgument("slice offset splits a character"));
    }
    Ok(&text[start..end])
}
