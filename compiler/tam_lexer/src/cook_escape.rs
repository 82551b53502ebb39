//! Escape processing for double-quoted string literals.
//!
//! Valid escapes: `\"` `\\` `\n` `\t` `\r` `\0` and `\u{XXXX}`.

use crate::lex_error::{LexError, LexErrorKind};
use tam_ir::Span;

#[inline]
fn resolve_simple_escape(c: char) -> Option<char> {
    match c {
        '"' => Some('"'),
        '\\' => Some('\\'),
        'n' => Some('\n'),
        't' => Some('\t'),
        'r' => Some('\r'),
        '0' => Some('\0'),
        _ => None,
    }
}

fn offset(base: u32, i: usize) -> u32 {
    base.saturating_add(u32::try_from(i).unwrap_or(u32::MAX))
}

/// Unescape the content between the quotes of a string literal.
///
/// `base_offset` is the byte offset of the content in the source and is
/// used to point errors at the offending escape.
pub(crate) fn unescape_string(content: &str, base_offset: u32) -> Result<String, LexError> {
    if !content.contains('\\') {
        return Ok(content.to_string());
    }

    let mut result = String::with_capacity(content.len());
    let mut chars = content.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some((_, 'u')) => {
                let start = offset(base_offset, i);
                if chars.next().map(|(_, c)| c) != Some('{') {
                    return Err(LexError::new(
                        LexErrorKind::InvalidUnicodeEscape,
                        Span::new(start, start + 2),
                    ));
                }
                let mut digits = String::new();
                let mut closed = false;
                for (_, d) in chars.by_ref() {
                    if d == '}' {
                        closed = true;
                        break;
                    }
                    digits.push(d);
                }
                let decoded = u32::from_str_radix(&digits, 16)
                    .ok()
                    .filter(|_| closed && !digits.is_empty() && digits.len() <= 6)
                    .and_then(char::from_u32);
                match decoded {
                    Some(ch) => result.push(ch),
                    None => {
                        return Err(LexError::new(
                            LexErrorKind::InvalidUnicodeEscape,
                            Span::new(start, offset(base_offset, i + digits.len() + 3)),
                        ))
                    }
                }
            }
            Some((j, esc)) => match resolve_simple_escape(esc) {
                Some(resolved) => result.push(resolved),
                None => {
                    return Err(LexError::new(
                        LexErrorKind::InvalidEscape(esc),
                        Span::new(offset(base_offset, i), offset(base_offset, j + esc.len_utf8())),
                    ))
                }
            },
            None => {
                return Err(LexError::new(
                    LexErrorKind::UnterminatedString,
                    Span::new(offset(base_offset, i), offset(base_offset, i + 1)),
                ))
            }
        }
    }

    Ok(result)
}
