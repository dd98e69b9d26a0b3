//! # JSONC Lexer — Comment and Trailing-Comma Removal
//!
//! A single forward pass over the source with one character of lookahead.
//! Four scanner states: outside any region, inside a string literal, inside
//! a `//` line comment, inside a `/*...*/` block comment.
//!
//! ## Invariants
//!
//! - The cursor only moves forward; the source is never re-scanned.
//! - Every character emitted came either from inside a string literal or
//!   from outside any comment region.
//! - Escape sequences are passed through uninterpreted: a `\` copies itself
//!   and the following character verbatim, whatever it is.
//! - Comment markers are recognized only in the `Normal` state. Strings
//!   containing literal `//` or `/*` are copied unchanged.
//!
//! Trailing-comma removal is a second linear scan over the comment-free
//! text, with the same string-skip discipline so commas inside string
//! literals are never touched.

use serde_json::Value;
use thiserror::Error;

/// Error produced while stripping JSONC input.
#[derive(Error, Debug)]
pub enum JsoncError {
    /// A string literal was still open at end of input.
    #[error("unterminated string literal starting at byte {offset}")]
    UnterminatedString {
        /// Byte offset of the opening `"`.
        offset: usize,
    },

    /// A block comment was still open at end of input.
    #[error("unterminated block comment starting at byte {offset}")]
    UnterminatedBlockComment {
        /// Byte offset of the opening `/*`.
        offset: usize,
    },

    /// The text left after stripping does not parse as JSON.
    #[error("stripped text is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Scanner state for the stripping pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Outside any string or comment.
    Normal,
    /// Inside a string literal; everything is copied verbatim.
    InString,
    /// Inside a `//` comment; everything through the newline is dropped.
    InLineComment,
    /// Inside a `/*...*/` comment; everything through `*/` is dropped.
    InBlockComment,
}

/// Remove `//` and `/*...*/` comments from JSONC text.
///
/// String literals are copied verbatim, including any comment-looking
/// substrings they contain. The newline terminating a line comment is
/// dropped along with the comment; output is recompacted downstream, so
/// this is not observable in the final JSON.
///
/// # Errors
///
/// Returns [`JsoncError::UnterminatedString`] or
/// [`JsoncError::UnterminatedBlockComment`] when end of input is reached
/// with the region still open. A `\` as the very last character of input
/// counts as an unterminated string. End of input inside a line comment is
/// fine — the comment is terminated by EOF.
pub fn strip_comments(source: &str) -> Result<String, JsoncError> {
    let mut out = String::with_capacity(source.len());
    let mut state = ScanState::Normal;
    // Byte offset of the opening delimiter of the current string or block
    // comment, reported on unterminated input.
    let mut region_start = 0;
    let mut chars = source.char_indices().peekable();

    while let Some((offset, ch)) = chars.next() {
        match state {
            ScanState::Normal => match ch {
                '"' => {
                    out.push('"');
                    state = ScanState::InString;
                    region_start = offset;
                }
                '/' if matches!(chars.peek(), Some(&(_, '/'))) => {
                    chars.next();
                    state = ScanState::InLineComment;
                }
                '/' if matches!(chars.peek(), Some(&(_, '*'))) => {
                    chars.next();
                    state = ScanState::InBlockComment;
                    region_start = offset;
                }
                _ => out.push(ch),
            },
            ScanState::InString => match ch {
                '\\' => {
                    out.push('\\');
                    match chars.next() {
                        Some((_, escaped)) => out.push(escaped),
                        None => {
                            return Err(JsoncError::UnterminatedString {
                                offset: region_start,
                            })
                        }
                    }
                }
                '"' => {
                    out.push('"');
                    state = ScanState::Normal;
                }
                _ => out.push(ch),
            },
            ScanState::InLineComment => {
                if ch == '\n' {
                    state = ScanState::Normal;
                }
            }
            ScanState::InBlockComment => {
                if ch == '*' && matches!(chars.peek(), Some(&(_, '/'))) {
                    chars.next();
                    state = ScanState::Normal;
                }
            }
        }
    }

    match state {
        ScanState::Normal | ScanState::InLineComment => Ok(out),
        ScanState::InString => Err(JsoncError::UnterminatedString {
            offset: region_start,
        }),
        ScanState::InBlockComment => Err(JsoncError::UnterminatedBlockComment {
            offset: region_start,
        }),
    }
}

/// Remove commas that are followed, ignoring whitespace, by a closing `]`
/// or `}`.
///
/// Operates on already-comment-free text. Commas inside string literals
/// are never removed; the scan skips over strings with the same escape
/// pass-through as [`strip_comments`].
pub fn strip_trailing_commas(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut chars = source.char_indices().peekable();
    let mut in_string = false;

    while let Some((offset, ch)) = chars.next() {
        if in_string {
            out.push(ch);
            match ch {
                '\\' => {
                    if let Some((_, escaped)) = chars.next() {
                        out.push(escaped);
                    }
                }
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => {
                in_string = true;
                out.push(ch);
            }
            ',' => {
                // One-byte char, so offset + 1 lands on the next character.
                let next = source[offset + 1..].trim_start().chars().next();
                if !matches!(next, Some(']' | '}')) {
                    out.push(ch);
                }
            }
            _ => out.push(ch),
        }
    }
    out
}

/// Strip comments and trailing commas, then validate and recompact.
///
/// The fully processed text is parsed once to prove it is valid JSON and
/// re-serialized in compact form (no extra whitespace).
///
/// # Errors
///
/// Any lexical error from [`strip_comments`], or
/// [`JsoncError::InvalidJson`] when the stripped text does not parse.
pub fn to_compact_json(source: &str) -> Result<String, JsoncError> {
    let stripped = strip_comments(source)?;
    let cleaned = strip_trailing_commas(&stripped);
    let value: Value = serde_json::from_str(&cleaned)?;
    Ok(serde_json::to_string(&value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse_compact(source: &str) -> Value {
        let compact = to_compact_json(source).expect("should strip to valid JSON");
        serde_json::from_str(&compact).expect("compact output should reparse")
    }

    #[test]
    fn test_line_comment_and_trailing_comma() {
        let input = "{\"a\": 1, // comment\n \"b\": 2,}";
        assert_eq!(parse_compact(input), json!({"a": 1, "b": 2}));
    }

    #[test]
    fn test_block_comment_removed() {
        let input = "{\"a\": /* the answer */ 42}";
        assert_eq!(parse_compact(input), json!({"a": 42}));
    }

    #[test]
    fn test_block_comment_spanning_lines() {
        let input = "{/* line one\n   line two\n   line three */\"a\": 1}";
        assert_eq!(parse_compact(input), json!({"a": 1}));
    }

    #[test]
    fn test_block_comment_with_stars_inside() {
        let input = "{\"a\": /** doc ** style **/ 1}";
        assert_eq!(parse_compact(input), json!({"a": 1}));
    }

    #[test]
    fn test_double_slash_inside_string_preserved() {
        let input = r#"{"url": "http://example.com//path"}"#;
        let value = parse_compact(input);
        assert_eq!(value["url"], "http://example.com//path");
    }

    #[test]
    fn test_block_marker_inside_string_preserved() {
        let input = r#"{"glob": "/*.json"}"#;
        let value = parse_compact(input);
        assert_eq!(value["glob"], "/*.json");
    }

    #[test]
    fn test_comma_before_quote_inside_string_preserved() {
        // The `,"` sequence inside the literal must not look like a
        // trailing comma to the second pass.
        let input = r#"{"csv": "a,b,","t": 1}"#;
        let value = parse_compact(input);
        assert_eq!(value["csv"], "a,b,");
    }

    #[test]
    fn test_escaped_quote_inside_string() {
        let input = r#"{"s": "he said \"hi\" // not a comment"}"#;
        let value = parse_compact(input);
        assert_eq!(value["s"], r#"he said "hi" // not a comment"#);
    }

    #[test]
    fn test_escaped_backslash_then_quote_closes_string() {
        // "x\\" is a complete string; the comment after it must be stripped.
        let input = "{\"s\": \"x\\\\\" // tail\n}";
        let value = parse_compact(input);
        assert_eq!(value["s"], "x\\");
    }

    #[test]
    fn test_trailing_comma_in_array() {
        let input = "[1, 2, 3,]";
        assert_eq!(parse_compact(input), json!([1, 2, 3]));
    }

    #[test]
    fn test_trailing_comma_left_by_comment_removal() {
        let input = "{\"a\": 1, // last entry\n}";
        assert_eq!(parse_compact(input), json!({"a": 1}));
    }

    #[test]
    fn test_trailing_comma_with_whitespace_before_bracket() {
        let input = "[1, 2,   \n\t ]";
        assert_eq!(parse_compact(input), json!([1, 2]));
    }

    #[test]
    fn test_nested_structures() {
        let input = r#"
        {
            // agents
            "agent": {
                "names": ["a", "b", /* disabled: "c" */],
            },
            "count": 2, // total
        }
        "#;
        assert_eq!(
            parse_compact(input),
            json!({"agent": {"names": ["a", "b"]}, "count": 2})
        );
    }

    #[test]
    fn test_line_comment_at_eof_without_newline() {
        let input = "{\"a\": 1} // trailing note";
        assert_eq!(parse_compact(input), json!({"a": 1}));
    }

    #[test]
    fn test_clean_json_is_unchanged_structurally() {
        let input = r#"{"a":1,"b":[true,null,"s"]}"#;
        assert_eq!(to_compact_json(input).unwrap(), input);
    }

    #[test]
    fn test_unicode_passthrough() {
        let input = "{\"name\": \"caf\u{00e9}\"} // r\u{00e9}sum\u{00e9}\n";
        let value = parse_compact(input);
        assert_eq!(value["name"], "caf\u{00e9}");
    }

    #[test]
    fn test_unterminated_string_is_error() {
        let err = strip_comments("{\"a\": \"oops").unwrap_err();
        match err {
            JsoncError::UnterminatedString { offset } => assert_eq!(offset, 6),
            other => panic!("expected UnterminatedString, got: {other}"),
        }
    }

    #[test]
    fn test_trailing_backslash_is_unterminated_string() {
        let err = strip_comments("{\"a\": \"x\\").unwrap_err();
        assert!(matches!(err, JsoncError::UnterminatedString { .. }));
    }

    #[test]
    fn test_unterminated_block_comment_is_error() {
        let err = strip_comments("{\"a\": 1} /* never closed").unwrap_err();
        match err {
            JsoncError::UnterminatedBlockComment { offset } => assert_eq!(offset, 9),
            other => panic!("expected UnterminatedBlockComment, got: {other}"),
        }
    }

    #[test]
    fn test_block_comment_closed_at_last_chars() {
        assert_eq!(parse_compact("{\"a\":1}/*x*/"), json!({"a": 1}));
    }

    #[test]
    fn test_comment_only_input_is_invalid_json() {
        let err = to_compact_json("// nothing here\n").unwrap_err();
        assert!(matches!(err, JsoncError::InvalidJson(_)));
    }

    #[test]
    fn test_empty_input_is_invalid_json() {
        let err = to_compact_json("").unwrap_err();
        assert!(matches!(err, JsoncError::InvalidJson(_)));
    }

    #[test]
    fn test_slash_not_followed_by_marker_is_copied() {
        // A lone `/` outside a string is not a comment; it is copied through
        // and rejected by the JSON parse, not by the lexer.
        let stripped = strip_comments("[1 / 2]").unwrap();
        assert_eq!(stripped, "[1 / 2]");
        assert!(to_compact_json("[1 / 2]").is_err());
    }

    #[test]
    fn test_strip_trailing_commas_ignores_strings() {
        let input = r#"{"a": ",}", "b": ",]"}"#;
        assert_eq!(strip_trailing_commas(input), input);
    }

    #[test]
    fn test_strip_trailing_commas_multiple_sites() {
        let input = "{\"a\": [1,], \"b\": {\"c\": 2,},}";
        assert_eq!(
            strip_trailing_commas(input),
            "{\"a\": [1], \"b\": {\"c\": 2}}"
        );
    }
}
