//! Human-readable preview of a text edit.
//!
//! Uses the `similar` crate (Myers diff algorithm) to compare the rendered
//! baseline with the proposed document and group the result into hunks with
//! context lines. Purely informational: the change set, not the preview,
//! decides what is written.

use std::fmt;

use similar::{ChangeTag, TextDiff};

/// Lines of unchanged context kept around each change.
const CONTEXT_LINES: usize = 3;

/// A line-level comparison of two documents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextPreview {
    pub hunks: Vec<PreviewHunk>,
    /// Number of lines in the old document.
    pub old_lines: usize,
    /// Number of lines in the new document.
    pub new_lines: usize,
}

impl TextPreview {
    /// Returns `true` if the documents are identical.
    pub fn is_empty(&self) -> bool {
        self.hunks.is_empty()
    }

    pub fn additions(&self) -> usize {
        self.lines()
            .filter(|l| matches!(l, PreviewLine::Added(_)))
            .count()
    }

    pub fn deletions(&self) -> usize {
        self.lines()
            .filter(|l| matches!(l, PreviewLine::Removed(_)))
            .count()
    }

    fn lines(&self) -> impl Iterator<Item = &PreviewLine> {
        self.hunks.iter().flat_map(|h| &h.lines)
    }
}

/// A contiguous region of changes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreviewHunk {
    /// 1-based start line in the old document.
    pub old_start: usize,
    pub old_count: usize,
    /// 1-based start line in the new document.
    pub new_start: usize,
    pub new_count: usize,
    pub lines: Vec<PreviewLine>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PreviewLine {
    Context(String),
    Added(String),
    Removed(String),
}

impl fmt::Display for TextPreview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for hunk in &self.hunks {
            writeln!(
                f,
                "@@ -{},{} +{},{} @@",
                hunk.old_start, hunk.old_count, hunk.new_start, hunk.new_count
            )?;
            for line in &hunk.lines {
                match line {
                    PreviewLine::Context(text) => writeln!(f, " {text}")?,
                    PreviewLine::Added(text) => writeln!(f, "+{text}")?,
                    PreviewLine::Removed(text) => writeln!(f, "-{text}")?,
                }
            }
        }
        Ok(())
    }
}

/// Compare two documents line by line.
pub fn preview(old: &str, new: &str) -> TextPreview {
    let old_lines = old.lines().count();
    let new_lines = new.lines().count();

    if old == new {
        return TextPreview {
            hunks: Vec::new(),
            old_lines,
            new_lines,
        };
    }

    let diff = TextDiff::from_lines(old, new);
    let mut hunks = Vec::new();

    for group in diff.grouped_ops(CONTEXT_LINES) {
        let (Some(first), Some(last)) = (group.first(), group.last()) else {
            continue;
        };
        let old_range = first.old_range().start..last.old_range().end;
        let new_range = first.new_range().start..last.new_range().end;

        let mut lines = Vec::new();
        for op in &group {
            for change in diff.iter_changes(op) {
                let text = change.value().trim_end_matches('\n').to_string();
                lines.push(match change.tag() {
                    ChangeTag::Equal => PreviewLine::Context(text),
                    ChangeTag::Delete => PreviewLine::Removed(text),
                    ChangeTag::Insert => PreviewLine::Added(text),
                });
            }
        }

        hunks.push(PreviewHunk {
            old_start: old_range.start + 1,
            old_count: old_range.len(),
            new_start: new_range.start + 1,
            new_count: new_range.len(),
            lines,
        });
    }

    TextPreview {
        hunks,
        old_lines,
        new_lines,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_documents_have_no_hunks() {
        let p = preview("a = 1\nb = 2", "a = 1\nb = 2");
        assert!(p.is_empty());
        assert_eq!(p.old_lines, 2);
    }

    #[test]
    fn value_edit_shows_remove_and_add() {
        let p = preview("a = 1\nb = 2\n", "a = 1\nb = 3\n");
        assert_eq!(p.additions(), 1);
        assert_eq!(p.deletions(), 1);
        assert_eq!(p.hunks.len(), 1);
    }

    #[test]
    fn appended_line_is_an_addition() {
        let p = preview("a = 1\n", "a = 1\n# tail\n");
        assert_eq!(p.additions(), 1);
        assert_eq!(p.deletions(), 0);
    }

    #[test]
    fn hunk_counts_cover_context() {
        let old = "a\nb\nc\nd\ne\nf\ng\nh\n";
        let new = "a\nb\nc\nd\nX\nf\ng\nh\n";
        let p = preview(old, new);
        let hunk = &p.hunks[0];
        assert_eq!(hunk.old_start, 2);
        assert_eq!(hunk.old_count, 7);
        assert_eq!(hunk.new_count, 7);
        assert!(hunk
            .lines
            .iter()
            .any(|l| matches!(l, PreviewLine::Context(_))));
    }

    #[test]
    fn display_uses_unified_markers() {
        let out = preview("k = 1\n", "k = 2\n").to_string();
        assert!(out.starts_with("@@ -1,1 +1,1 @@"));
        assert!(out.contains("-k = 1"));
        assert!(out.contains("+k = 2"));
    }
}
