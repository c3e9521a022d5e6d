//! Whole-document validation pass.
//!
//! Runs before any reconciliation state exists. A document either parses
//! completely into a [`Document`] or is rejected outright.

use std::collections::{BTreeSet, HashSet};

use crate::error::{ResolveError, ResolveResult};
use crate::line::{split_lines, Line};

/// A validated, fully parsed document: one [`Line`] per input line, in order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Document {
    lines: Vec<Line>,
}

impl Document {
    /// Parse and validate raw text.
    ///
    /// The first line without a separator aborts the scan with
    /// [`ResolveError::MalformedLine`]. Otherwise, once every line is parsed,
    /// any key seen twice (ignoring case) fails the whole document with
    /// [`ResolveError::DuplicateKey`] listing all offenders.
    pub fn parse(text: &str) -> ResolveResult<Self> {
        let mut lines = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        let mut repeated: BTreeSet<String> = BTreeSet::new();

        for (idx, raw) in split_lines(text).enumerate() {
            let line = Line::parse(raw, line_number(idx))?;
            if let Line::Data { key, .. } = &line {
                let folded = key.to_lowercase();
                if !seen.insert(folded.clone()) {
                    repeated.insert(folded);
                }
            }
            lines.push(line);
        }

        if !repeated.is_empty() {
            return Err(ResolveError::DuplicateKey {
                keys: repeated.into_iter().collect(),
            });
        }

        Ok(Self { lines })
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// The line at a 1-based position, if the document is that long.
    pub fn line_at(&self, line_num: u32) -> Option<&Line> {
        let idx = usize::try_from(line_num).ok()?.checked_sub(1)?;
        self.lines.get(idx)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Iterate `(line_num, line)` pairs, 1-based.
    pub fn numbered(&self) -> impl Iterator<Item = (u32, &Line)> {
        self.lines
            .iter()
            .enumerate()
            .map(|(idx, line)| (line_number(idx), line))
    }
}

/// Convert a 0-based index to a 1-based line number.
fn line_number(idx: usize) -> u32 {
    u32::try_from(idx + 1).unwrap_or(u32::MAX)
}
