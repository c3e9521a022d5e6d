//! Render persisted items back into document text.

use cfgtext_types::{Item, ItemKind};

use crate::line::{escape_value, LINE_SEPARATOR};

/// Render items as a document, ordered by line number.
///
/// Data items become `key = value` with embedded newlines written as `\n`,
/// comments are written verbatim, and blanks become empty lines. Items
/// sharing a line number keep their relative order. Gaps in the numbering are
/// not filled, so only a baseline numbered `1..=N` renders to a document whose
/// positions match its items.
pub fn render(items: &[Item]) -> String {
    let mut ordered: Vec<&Item> = items.iter().collect();
    ordered.sort_by_key(|item| item.line_num);

    let mut out = String::new();
    for (idx, item) in ordered.into_iter().enumerate() {
        if idx > 0 {
            out.push(LINE_SEPARATOR);
        }
        out.push_str(&render_line(item));
    }
    out
}

/// Render a single item as one line of text.
pub fn render_line(item: &Item) -> String {
    match item.kind() {
        ItemKind::Data => format!("{} = {}", item.key, escape_value(&item.value)),
        ItemKind::Comment => item.comment.clone(),
        ItemKind::Blank => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cfgtext_types::NamespaceId;

    const NS: NamespaceId = NamespaceId::new(1);

    #[test]
    fn renders_in_line_order() {
        let items = vec![
            Item::data(NS, "b", "2", 3),
            Item::comment(NS, "# head", 1),
            Item::blank(NS, 2),
        ];
        assert_eq!(render(&items), "# head\n\nb = 2");
    }

    #[test]
    fn escapes_newlines_in_values() {
        let items = vec![Item::data(NS, "msg", "a\nb", 1)];
        assert_eq!(render(&items), r"msg = a\nb");
    }

    #[test]
    fn annotation_on_data_item_is_not_rendered() {
        let items = vec![Item::data(NS, "k", "v", 1).with_comment("note")];
        assert_eq!(render(&items), "k = v");
    }

    #[test]
    fn empty_baseline_renders_empty_text() {
        assert_eq!(render(&[]), "");
    }

    #[test]
    fn single_blank_renders_empty_text() {
        assert_eq!(render(&[Item::blank(NS, 1)]), "");
    }
}
