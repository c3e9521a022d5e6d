//! Line classification and key/value parsing.
//!
//! Every line of an edited document is classified exactly once into a
//! [`Line`]. Downstream code matches on the variant and never re-inspects the
//! raw text.

use crate::error::{ResolveError, ResolveResult};

/// Separator between a key and its value.
pub const KV_SEPARATOR: char = '=';

/// Separator between lines of a document.
pub const LINE_SEPARATOR: char = '\n';

/// Prefixes that mark a comment line.
pub const COMMENT_PREFIXES: &[char] = &['#', '!'];

/// The shape of a raw line before any key/value parsing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineClass<'a> {
    /// Empty after trimming.
    Blank,
    /// Starts with `#` or `!` after trimming. Holds the trimmed text.
    Comment(&'a str),
    /// Anything else. Holds the trimmed text, still unparsed.
    Data(&'a str),
}

/// A fully parsed line of an edited document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Line {
    Blank,
    Comment(String),
    Data { key: String, value: String },
}

impl Line {
    /// Classify and parse one raw line. `line_num` is 1-based and only used
    /// to report a missing separator.
    pub fn parse(raw: &str, line_num: u32) -> ResolveResult<Self> {
        match classify(raw) {
            LineClass::Blank => Ok(Line::Blank),
            LineClass::Comment(text) => Ok(Line::Comment(text.to_string())),
            LineClass::Data(text) => {
                let (key, value) = parse_key_value(text, line_num)?;
                Ok(Line::Data { key, value })
            }
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Line::Blank)
    }

    /// The comment text, if this is a comment line.
    pub fn comment_text(&self) -> Option<&str> {
        match self {
            Line::Comment(text) => Some(text),
            _ => None,
        }
    }
}

/// Classify a raw line. Never fails.
pub fn classify(raw: &str) -> LineClass<'_> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        LineClass::Blank
    } else if trimmed.starts_with(COMMENT_PREFIXES) {
        LineClass::Comment(trimmed)
    } else {
        LineClass::Data(trimmed)
    }
}

/// Split a data line on the first `=`, trim both halves, and unescape the
/// value.
///
/// A line whose key trims to nothing is malformed: an item with an empty key
/// would read back as a blank line.
pub fn parse_key_value(text: &str, line_num: u32) -> ResolveResult<(String, String)> {
    let (key, value) = text
        .split_once(KV_SEPARATOR)
        .ok_or(ResolveError::MalformedLine { line_num })?;
    let key = key.trim();
    if key.is_empty() {
        return Err(ResolveError::MalformedLine { line_num });
    }
    Ok((key.to_string(), unescape_value(value.trim())))
}

/// Replace each literal two-character `\n` with a newline. Single pass: the
/// output is never rescanned.
pub fn unescape_value(value: &str) -> String {
    value.replace("\\n", "\n")
}

/// Inverse of [`unescape_value`], used when rendering items back to text.
pub fn escape_value(value: &str) -> String {
    value.replace('\n', "\\n")
}

/// Split a document into raw lines. No line is dropped, including an empty
/// trailing one, so `"a=1\n"` has two lines.
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split(LINE_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_blank_lines() {
        assert_eq!(classify(""), LineClass::Blank);
        assert_eq!(classify("   \t"), LineClass::Blank);
        assert_eq!(classify("\r"), LineClass::Blank);
    }

    #[test]
    fn classify_comments_with_either_prefix() {
        assert_eq!(classify("# note"), LineClass::Comment("# note"));
        assert_eq!(classify("  !bang  "), LineClass::Comment("!bang"));
    }

    #[test]
    fn classify_everything_else_as_data() {
        assert_eq!(classify(" a = 1 "), LineClass::Data("a = 1"));
        assert_eq!(classify("justtext"), LineClass::Data("justtext"));
    }

    #[test]
    fn empty_key_is_malformed() {
        assert_eq!(
            parse_key_value("=v", 3),
            Err(ResolveError::MalformedLine { line_num: 3 })
        );
        assert_eq!(
            parse_key_value("  = v", 1),
            Err(ResolveError::MalformedLine { line_num: 1 })
        );
    }

    #[test]
    fn split_on_first_separator_only() {
        let (k, v) = parse_key_value("url = jdbc:x?a=b", 1).unwrap();
        assert_eq!(k, "url");
        assert_eq!(v, "jdbc:x?a=b");
    }

    #[test]
    fn empty_value_is_allowed() {
        let (k, v) = parse_key_value("k =", 1).unwrap();
        assert_eq!(k, "k");
        assert_eq!(v, "");
    }

    #[test]
    fn missing_separator_reports_line() {
        assert_eq!(
            parse_key_value("justtext", 7),
            Err(ResolveError::MalformedLine { line_num: 7 })
        );
    }

    #[test]
    fn escaped_newline_becomes_real_newline() {
        let (_, v) = parse_key_value(r"msg=a\nb", 1).unwrap();
        assert_eq!(v, "a\nb");
    }

    #[test]
    fn unescape_is_not_recursive() {
        // `\\n` is a backslash followed by `\n`; only the latter is replaced.
        assert_eq!(unescape_value(r"a\\nb"), "a\\\nb");
    }

    #[test]
    fn escape_inverts_unescape() {
        assert_eq!(escape_value("a\nb\nc"), r"a\nb\nc");
        assert_eq!(unescape_value(&escape_value("x\ny")), "x\ny");
    }

    #[test]
    fn split_keeps_trailing_empty_line() {
        let lines: Vec<_> = split_lines("a=1\n").collect();
        assert_eq!(lines, vec!["a=1", ""]);
        assert_eq!(split_lines("").count(), 1);
    }

    #[test]
    fn parse_produces_closed_variants() {
        assert_eq!(Line::parse("", 1).unwrap(), Line::Blank);
        assert_eq!(
            Line::parse("#c", 1).unwrap(),
            Line::Comment("#c".to_string())
        );
        assert_eq!(
            Line::parse("k=v", 1).unwrap(),
            Line::Data {
                key: "k".into(),
                value: "v".into()
            }
        );
    }
}
