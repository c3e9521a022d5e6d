use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Persisted identity of a single configuration item.
///
/// Ids are assigned by the item store when a created item is first written.
/// The null id (zero) marks an item that has not been persisted yet, which is
/// how the resolver emits every item it schedules for creation.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(i64);

impl ItemId {
    /// Wrap a raw id. Zero is the null id.
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// The null item id. Represents "not yet persisted".
    pub const fn null() -> Self {
        Self(0)
    }

    /// Returns `true` if this is the null item id.
    pub fn is_null(&self) -> bool {
        self.0 == 0
    }

    /// The raw integer value.
    pub fn get(&self) -> i64 {
        self.0
    }
}

impl fmt::Debug for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            write!(f, "ItemId(null)")
        } else {
            write!(f, "ItemId({})", self.0)
        }
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ItemId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

/// Identity of a namespace, the document scope that owns a baseline.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NamespaceId(i64);

impl NamespaceId {
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    pub fn get(&self) -> i64 {
        self.0
    }
}

impl fmt::Debug for NamespaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NamespaceId({})", self.0)
    }
}

impl fmt::Display for NamespaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ns:{}", self.0)
    }
}

impl FromStr for NamespaceId {
    type Err = TypeError;

    /// Parse `"42"` or `"ns:42"`. Namespace ids are always positive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("ns:").unwrap_or(s);
        let raw: i64 = digits
            .trim()
            .parse()
            .map_err(|_| TypeError::InvalidId(s.to_string()))?;
        if raw <= 0 {
            return Err(TypeError::NonPositiveId(raw));
        }
        Ok(Self(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_item_id() {
        assert!(ItemId::null().is_null());
        assert!(ItemId::default().is_null());
        assert!(!ItemId::new(7).is_null());
    }

    #[test]
    fn item_id_debug_marks_null() {
        assert_eq!(format!("{:?}", ItemId::null()), "ItemId(null)");
        assert_eq!(format!("{:?}", ItemId::new(3)), "ItemId(3)");
    }

    #[test]
    fn item_id_serializes_as_plain_integer() {
        let json = serde_json::to_string(&ItemId::new(42)).unwrap();
        assert_eq!(json, "42");
        let parsed: ItemId = serde_json::from_str("42").unwrap();
        assert_eq!(parsed, ItemId::new(42));
    }

    #[test]
    fn namespace_id_parses_with_and_without_prefix() {
        assert_eq!("12".parse::<NamespaceId>().unwrap(), NamespaceId::new(12));
        assert_eq!("ns:12".parse::<NamespaceId>().unwrap(), NamespaceId::new(12));
    }

    #[test]
    fn namespace_id_rejects_garbage_and_non_positive() {
        assert_eq!(
            "abc".parse::<NamespaceId>(),
            Err(TypeError::InvalidId("abc".into()))
        );
        assert_eq!("0".parse::<NamespaceId>(), Err(TypeError::NonPositiveId(0)));
        assert_eq!("-4".parse::<NamespaceId>(), Err(TypeError::NonPositiveId(-4)));
    }

    #[test]
    fn namespace_display() {
        assert_eq!(NamespaceId::new(5).to_string(), "ns:5");
    }

    #[test]
    fn ordering_is_numeric() {
        assert!(ItemId::new(2) < ItemId::new(10));
        assert!(NamespaceId::new(2) < NamespaceId::new(10));
    }
}
