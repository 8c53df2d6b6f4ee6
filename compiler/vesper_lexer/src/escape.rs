//! String literal escape decoding.
//!
//! Valid escapes: `\n` `\t` `\r` `\0` `\\` `\'` `\"`, `\uXXXX` (exactly four
//! hex digits) and `\u{X..}` (one to six hex digits naming a scalar value).

/// An escape that could not be decoded: its text and byte offset in `content`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BadEscape {
    pub offset: usize,
    pub text: String,
}

#[inline]
fn resolve_simple_escape(c: char) -> Option<char> {
    match c {
        'n' => Some('\n'),
        't' => Some('\t'),
        'r' => Some('\r'),
        '0' => Some('\0'),
        '\\' => Some('\\'),
        '\'' => Some('\''),
        '"' => Some('"'),
        _ => None,
    }
}

/// Decode the content between a string literal's quotes.
pub(crate) fn unescape(content: &str) -> Result<String, BadEscape> {
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
        let bad = |end: usize| BadEscape {
            offset: i,
            text: content[i..end].to_string(),
        };
        match chars.next() {
            Some((_, 'u')) => {
                let rest = &content[i + 2..];
                let (hex, consumed) = if let Some(braced) = rest.strip_prefix('{') {
                    let Some(close) = braced.find('}') else {
                        return Err(bad(content.len()));
                    };
                    let hex = &braced[..close];
                    if hex.is_empty() || hex.len() > 6 {
                        return Err(bad(i + 2 + close + 2));
                    }
                    (hex, close + 2)
                } else {
                    let hex = rest.get(..4).ok_or_else(|| bad(content.len()))?;
                    (hex, 4)
                };
                let end = i + 2 + consumed;
                let decoded = u32::from_str_radix(hex, 16)
                    .ok()
                    .filter(|_| hex.chars().all(|h| h.is_ascii_hexdigit()))
                    .and_then(char::from_u32)
                    .ok_or_else(|| bad(end))?;
                result.push(decoded);
                // Skip the digits (and braces) consumed above.
                while chars.peek().is_some_and(|&(j, _)| j < end) {
                    chars.next();
                }
            }
            Some((j, esc)) => {
                let resolved =
                    resolve_simple_escape(esc).ok_or_else(|| bad(j + esc.len_utf8()))?;
                result.push(resolved);
            }
            None => return Err(bad(content.len())),
        }
    }

    Ok(result)
}
