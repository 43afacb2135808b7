//! String literal decoding and encoding.
//!
//! Two source forms exist:
//! - `"..."` with backslash escapes
//! - `"""..."""` spanning several lines. Each line may start with a margin
//!   (spaces or tabs followed by `|`) which is removed, then one leading and
//!   one trailing newline are trimmed, then escapes are decoded.
//!
//! ```text
//! let $doc = """
//!     |first line
//!     |second line
//! """
//! ```
//!
//! decodes to `"first line\nsecond line"`.

use std::fmt::Write;

/// Error produced by an undecodable string literal.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LiteralError {
    #[error("string literal is not quoted: {0}")]
    Unquoted(String),
    #[error("invalid escape sequence '\\{0}'")]
    InvalidEscape(String),
    #[error("string literal ends with a lone backslash")]
    TrailingBackslash,
}

/// Decode the raw text of a string token (quotes included).
pub fn decode_string(raw: &str) -> Result<String, LiteralError> {
    if raw.len() >= 6 && raw.starts_with("\"\"\"") && raw.ends_with("\"\"\"") {
        let stripped = strip_margins(&raw[3..raw.len() - 3]);
        let inner = stripped.strip_prefix('\n').unwrap_or(stripped.as_str());
        let inner = inner.strip_suffix('\n').unwrap_or(inner);
        unescape(inner)
    } else if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
        unescape(&raw[1..raw.len() - 1])
    } else {
        Err(LiteralError::Unquoted(raw.to_owned()))
    }
}

/// Remove a `[ \t]+|` prefix from every line that has one.
fn strip_margins(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let indent = line.len() - line.trim_start_matches([' ', '\t']).len();
        let margin = line[indent..].strip_prefix('|').filter(|_| indent > 0);
        out.push_str(margin.unwrap_or(line));
    }
    out
}

fn unescape(text: &str) -> Result<String, LiteralError> {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('b') => out.push('\u{8}'),
            Some('f') => out.push('\u{c}'),
            Some('0') => out.push('\0'),
            Some('"') => out.push('"'),
            Some('\'') => out.push('\''),
            Some('\\') => out.push('\\'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                let decoded = u32::from_str_radix(&hex, 16)
                    .ok()
                    .filter(|_| hex.len() == 4)
                    .and_then(char::from_u32)
                    .ok_or_else(|| LiteralError::InvalidEscape(format!("u{hex}")))?;
                out.push(decoded);
            }
            Some(other) => return Err(LiteralError::InvalidEscape(other.to_string())),
            None => return Err(LiteralError::TrailingBackslash),
        }
    }
    Ok(out)
}

/// Encode a string as a single-line `"..."` literal that decodes back to it.
pub fn escape_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", u32::from(c));
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
