use serde::{Deserialize, Serialize};

use crate::identity::{ItemId, NamespaceId};

/// The three shapes a persisted line can take.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// A `key = value` entry.
    Data,
    /// A comment line; the text lives in [`Item::comment`].
    Comment,
    /// An empty line.
    Blank,
}

/// One persisted line of a configuration document.
///
/// The key is empty exactly when the item is a comment or a blank line.
/// Comments and blanks are told apart by the comment text alone: a comment
/// item carries its full line (starting with `#` or `!`), a blank item carries
/// nothing. Data items may carry a comment as an annotation; it survives edits
/// to the key's value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Store-assigned identity; null until the item is persisted.
    #[serde(default, skip_serializing_if = "ItemId::is_null")]
    pub id: ItemId,
    /// Owning namespace.
    pub namespace_id: NamespaceId,
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub comment: String,
    /// 1-based position in the document when the item was last written.
    pub line_num: u32,
}

impl Item {
    /// A new, unsaved data item.
    pub fn data(
        namespace_id: NamespaceId,
        key: impl Into<String>,
        value: impl Into<String>,
        line_num: u32,
    ) -> Self {
        Self {
            id: ItemId::null(),
            namespace_id,
            key: key.into(),
            value: value.into(),
            comment: String::new(),
            line_num,
        }
    }

    /// A new, unsaved comment item.
    pub fn comment(namespace_id: NamespaceId, text: impl Into<String>, line_num: u32) -> Self {
        Self {
            id: ItemId::null(),
            namespace_id,
            key: String::new(),
            value: String::new(),
            comment: text.into(),
            line_num,
        }
    }

    /// A new, unsaved blank item.
    pub fn blank(namespace_id: NamespaceId, line_num: u32) -> Self {
        Self {
            id: ItemId::null(),
            namespace_id,
            key: String::new(),
            value: String::new(),
            comment: String::new(),
            line_num,
        }
    }

    /// Builder-style id assignment.
    pub fn with_id(mut self, id: impl Into<ItemId>) -> Self {
        self.id = id.into();
        self
    }

    /// Builder-style comment annotation.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    /// Classify this item from its fields.
    pub fn kind(&self) -> ItemKind {
        if !self.key.is_empty() {
            ItemKind::Data
        } else if !self.comment.is_empty() {
            ItemKind::Comment
        } else {
            ItemKind::Blank
        }
    }

    pub fn is_data(&self) -> bool {
        self.kind() == ItemKind::Data
    }

    pub fn is_comment(&self) -> bool {
        self.kind() == ItemKind::Comment
    }

    pub fn is_blank(&self) -> bool {
        self.kind() == ItemKind::Blank
    }

    /// Returns `true` once the store has assigned an id.
    pub fn is_persisted(&self) -> bool {
        !self.id.is_null()
    }
}
