//! Placeholder substitution.
//!
//! Replaces `{identifier}` tokens with values from a variable map. No
//! recursion and no escape syntax; a `{` that does not open a well-formed
//! token is literal text.
//!
//! Two entry points share one scanner but differ on unresolved tokens:
//! [`substitute`] leaves them verbatim (file contents), [`substitute_path`]
//! fails with `MissingProperty` (destination names).

use std::collections::HashMap;

use crate::error::{Result, StencilError};

/// A segment of a scanned template string.
#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Literal(String),
    Token(String),
}

fn is_token_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.'
}

/// Split `text` into literal runs and `{identifier}` tokens.
fn scan(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut chars = text.char_indices();

    while let Some((start, c)) = chars.next() {
        if c != '{' {
            literal.push(c);
            continue;
        }

        // Look ahead for a well-formed token.
        let rest = &text[start + 1..];
        let end = rest.find(|ch: char| !is_token_char(ch));
        match end {
            Some(token_len) if token_len > 0 && rest[token_len..].starts_with('}') => {
                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(Segment::Token(rest[..token_len].to_string()));
                // Skip past the token body and the closing brace.
                for _ in 0..=token_len {
                    chars.next();
                }
            }
            _ => literal.push(c),
        }
    }

    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }

    segments
}

/// Substitute placeholders in file content. Unknown tokens are left verbatim.
pub fn substitute(text: &str, vars: &HashMap<String, String>) -> String {
    let mut result = String::with_capacity(text.len());
    for segment in scan(text) {
        match segment {
            Segment::Literal(lit) => result.push_str(&lit),
            Segment::Token(name) => match vars.get(&name) {
                Some(value) => result.push_str(value),
                None => {
                    result.push('{');
                    result.push_str(&name);
                    result.push('}');
                }
            },
        }
    }
    result
}

/// Substitute placeholders in a destination name pattern. An unresolved token
/// is a hard error.
pub fn substitute_path(pattern: &str, vars: &HashMap<String, String>) -> Result<String> {
    let mut result = String::with_capacity(pattern.len());
    for segment in scan(pattern) {
        match segment {
            Segment::Literal(lit) => result.push_str(&lit),
            Segment::Token(name) => match vars.get(&name) {
                Some(value) => result.push_str(value),
                None => {
                    return Err(StencilError::MissingProperty {
                        name,
                        pattern: pattern.to_string(),
                    })
                }
            },
        }
    }
    Ok(result)
}
