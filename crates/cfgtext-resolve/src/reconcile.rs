//! Reconcile a baseline of persisted items against an edited document.
//!
//! Identity is asymmetric. Data items are matched by key, so a moved or edited
//! entry keeps its id and its annotation. Comments and blank lines are matched
//! by line position only; when the content at a position changes, the old
//! item is deleted and a new one created. Comments are never updated in place.

use std::collections::{BTreeSet, HashMap};

use cfgtext_types::{Item, NamespaceId};

use crate::change_set::ChangeSet;
use crate::error::ResolveResult;
use crate::line::Line;
use crate::validate::Document;

/// Turns edited text into a change set against a baseline.
///
/// Implementations must be pure: no I/O, no mutation of the baseline, and no
/// state carried between calls.
pub trait TextResolver: Send + Sync {
    fn resolve(
        &self,
        namespace_id: NamespaceId,
        text: &str,
        baseline: &[Item],
    ) -> ResolveResult<ChangeSet>;
}

/// Resolver for `.properties`-style documents: `key = value` lines, `#`/`!`
/// comments, and blank lines.
#[derive(Clone, Copy, Debug, Default)]
pub struct PropertiesResolver;

impl TextResolver for PropertiesResolver {
    fn resolve(
        &self,
        namespace_id: NamespaceId,
        text: &str,
        baseline: &[Item],
    ) -> ResolveResult<ChangeSet> {
        resolve(namespace_id, text, baseline)
    }
}

/// Compute the change set that makes `baseline` match `text`.
///
/// The document is validated in full first; on a duplicate key or a line
/// without a separator nothing else happens. Creates and updates come out in
/// document order. Deletes of replaced comments and blanks come first in
/// baseline order, followed by deletes of removed keys, also in baseline
/// order.
pub fn resolve(namespace_id: NamespaceId, text: &str, baseline: &[Item]) -> ResolveResult<ChangeSet> {
    let document = Document::parse(text)?;
    Ok(reconcile(namespace_id, &document, baseline))
}

/// Reconcile an already validated document. Infallible.
///
/// A blank baseline item whose line number is past the end of the document
/// is deleted, not kept as if the missing line were blank. Keeping it would
/// leave a trailing blank line that rendering then adds back to the text.
pub fn reconcile(namespace_id: NamespaceId, document: &Document, baseline: &[Item]) -> ChangeSet {
    let mut index = WorkingIndex::build(baseline);
    let mut changes = ChangeSet::new();

    for (line_num, line) in document.numbered() {
        let at_line = index.by_line.get(&line_num).copied();
        match line {
            Line::Comment(text) => {
                let unchanged = at_line.is_some_and(|b| b.is_comment() && b.comment == *text);
                if !unchanged {
                    changes.add_create(Item::comment(namespace_id, text.clone(), line_num));
                }
            }
            Line::Blank => {
                if !at_line.is_some_and(Item::is_blank) {
                    changes.add_create(Item::blank(namespace_id, line_num));
                }
            }
            Line::Data { key, value } => match index.take_by_key(key) {
                None => {
                    changes.add_create(Item::data(namespace_id, key.clone(), value.clone(), line_num));
                }
                Some(base) => {
                    if base.value != *value || base.line_num != line_num {
                        changes.add_update(Item {
                            id: base.id,
                            namespace_id,
                            key: key.clone(),
                            value: value.clone(),
                            comment: base.comment.clone(),
                            line_num,
                        });
                    }
                }
            },
        }
    }

    // Replaced or vanished comments and blanks.
    for base in baseline {
        let current = document.line_at(base.line_num);
        let stale = if base.is_blank() {
            !current.is_some_and(Line::is_blank)
        } else if base.is_comment() {
            current.and_then(Line::comment_text) != Some(base.comment.as_str())
        } else {
            false
        };
        if stale {
            changes.add_delete(base.clone());
        }
    }

    // Keys no longer present in the document.
    for base in index.unmatched() {
        changes.add_delete(base.clone());
    }

    changes
}

/// Per-call lookup state over the baseline. Never outlives one reconciliation.
struct WorkingIndex<'a> {
    baseline: &'a [Item],
    /// Baseline items by line number. A later item wins a shared line number.
    by_line: HashMap<u32, &'a Item>,
    /// Baseline data items by exact key, as positions into `baseline`.
    /// Entries are removed as keys are matched.
    by_key: HashMap<&'a str, usize>,
    /// Positions of baseline data items not yet matched by key.
    unmatched: BTreeSet<usize>,
}

impl<'a> WorkingIndex<'a> {
    fn build(baseline: &'a [Item]) -> Self {
        let mut by_line = HashMap::with_capacity(baseline.len());
        let mut by_key = HashMap::new();
        let mut unmatched = BTreeSet::new();

        for (pos, item) in baseline.iter().enumerate() {
            by_line.insert(item.line_num, item);
            if item.is_data() {
                // A key repeated in the baseline leaves the earlier copy
                // unmatchable, so it is deleted as a removed key.
                by_key.insert(item.key.as_str(), pos);
                unmatched.insert(pos);
            }
        }

        Self {
            baseline,
            by_line,
            by_key,
            unmatched,
        }
    }

    /// Match a key, consuming its baseline entry.
    fn take_by_key(&mut self, key: &str) -> Option<&'a Item> {
        let baseline = self.baseline;
        let pos = self.by_key.remove(key)?;
        self.unmatched.remove(&pos);
        Some(&baseline[pos])
    }

    /// Baseline data items never matched, in baseline order.
    fn unmatched(&self) -> impl Iterator<Item = &'a Item> + '_ {
        let baseline = self.baseline;
        self.unmatched.iter().map(move |&pos| &baseline[pos])
    }
}
