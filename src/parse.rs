//! Literal scanners
//!
//! One scanner per parseable kind. Each reads the longest valid prefix of
//! its grammar and reports the byte count consumed; on failure nothing is
//! consumed and nothing is constructed.

use crate::error::{Error, Result};
use crate::runtime::text::unescape_char;
use crate::value::{Kind, Value};

pub(crate) fn nothing(input: &str) -> Result<(Value, usize)> {
    if input.starts_with("null") {
        Ok((Value::Nothing, 4))
    } else {
        Err(Error::ParseFailure {
            kind: Kind::Nothing,
            reason: "expected `null`",
        })
    }
}

pub(crate) fn boolean(input: &str) -> Result<(Value, usize)> {
    if input.starts_with("true") {
        Ok((Value::Boolean(true), 4))
    } else if input.starts_with("false") {
        Ok((Value::Boolean(false), 5))
    } else {
        Err(Error::ParseFailure {
            kind: Kind::Boolean,
            reason: "expected `true` or `false`",
        })
    }
}

pub(crate) fn number(input: &str) -> Result<(Value, usize)> {
    let consumed = scan_number(input.as_bytes());
    if consumed == 0 {
        return Err(Error::ParseFailure {
            kind: Kind::Number,
            reason: "no number at input",
        });
    }
    // the scanned prefix is ASCII, so slicing at `consumed` is safe
    match input[..consumed].parse::<f64>() {
        Ok(n) => Ok((Value::Number(n), consumed)),
        Err(_) => Err(Error::ParseFailure {
            kind: Kind::Number,
            reason: "malformed number",
        }),
    }
}

pub(crate) fn text(input: &str) -> Result<(Value, usize)> {
    let mut chars = input.char_indices();
    match chars.next() {
        Some((_, '"')) => {}
        _ => {
            return Err(Error::ParseFailure {
                kind: Kind::Text,
                reason: "expected opening `\"`",
            });
        }
    }
    let mut content = String::new();
    while let Some((pos, c)) = chars.next() {
        match c {
            '"' => return Ok((Value::Text(content), pos + 1)),
            '\\' => match chars.next() {
                Some((_, escape)) => match unescape_char(escape) {
                    Some(unescaped) => content.push(unescaped),
                    None => {
                        return Err(Error::ParseFailure {
                            kind: Kind::Text,
                            reason: "unknown escape",
                        });
                    }
                },
                None => {
                    return Err(Error::ParseFailure {
                        kind: Kind::Text,
                        reason: "unterminated text literal",
                    });
                }
            },
            _ => content.push(c),
        }
    }
    Err(Error::ParseFailure {
        kind: Kind::Text,
        reason: "unterminated text literal",
    })
}

/// Length in bytes of the longest float prefix, 0 if there is none.
///
/// Grammar: optional sign, then `inf`/`infinity`/`nan` (any case) or digits
/// with optional fraction and exponent. A lone sign or dot scans as 0; an
/// exponent marker without digits after it is left unconsumed.
fn scan_number(bytes: &[u8]) -> usize {
    let mut pos = 0;
    if pos < bytes.len() && (bytes[pos] == b'+' || bytes[pos] == b'-') {
        pos += 1;
    }
    if let Some(n) = scan_special(&bytes[pos..]) {
        return pos + n;
    }
    let digits_start = pos;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    let int_digits = pos - digits_start;
    let mut frac_digits = 0;
    if pos < bytes.len() && bytes[pos] == b'.' {
        let frac_start = pos + 1;
        let mut cursor = frac_start;
        while cursor < bytes.len() && bytes[cursor].is_ascii_digit() {
            cursor += 1;
        }
        frac_digits = cursor - frac_start;
        if int_digits > 0 || frac_digits > 0 {
            pos = cursor;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return 0;
    }
    if pos < bytes.len() && (bytes[pos] == b'e' || bytes[pos] == b'E') {
        let mut cursor = pos + 1;
        if cursor < bytes.len() && (bytes[cursor] == b'+' || bytes[cursor] == b'-') {
            cursor += 1;
        }
        let exp_start = cursor;
        while cursor < bytes.len() && bytes[cursor].is_ascii_digit() {
            cursor += 1;
        }
        if cursor > exp_start {
            pos = cursor;
        }
    }
    pos
}

fn scan_special(bytes: &[u8]) -> Option<usize> {
    // longest first, so "infinity" wins over its "inf" prefix
    const SPECIALS: [&[u8]; 3] = [b"infinity", b"inf", b"nan"];
    SPECIALS
        .iter()
        .find(|word| bytes.len() >= word.len() && bytes[..word.len()].eq_ignore_ascii_case(word))
        .map(|word| word.len())
}
