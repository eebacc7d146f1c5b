//! Classification of mutations reported by change notifications.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What happened to an object or collection element.
///
/// The set is closed: exactly these three values exist. Serialises by name;
/// deserialisation goes through [`FromStr`], so it accepts the same
/// case-insensitive spellings as `str::parse`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String")]
#[repr(u8)]
pub enum ChangeKind {
    /// The object was added.
    Inserted = 0,
    /// The object was modified in place.
    Updated = 1,
    /// The object was removed.
    Deleted = 2,
}

impl ChangeKind {
    /// Every change kind in declaration order.
    pub const ALL: [Self; 3] = [Self::Inserted, Self::Updated, Self::Deleted];

    /// Stable name used in logs and serialised payloads.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Inserted => "Inserted",
            Self::Updated => "Updated",
            Self::Deleted => "Deleted",
        }
    }

    /// Numeric discriminant.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a [`ChangeKind`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown change kind: {value}")]
pub struct ParseChangeKindError {
    value: String,
}

impl ParseChangeKindError {
    /// The rejected input.
    #[must_use]
    pub fn value(&self) -> &str {
        self.value.as_str()
    }
}

impl FromStr for ChangeKind {
    type Err = ParseChangeKindError;

    /// Parse a change kind name, ignoring ASCII case and surrounding
    /// whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let candidate = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(candidate))
            .ok_or_else(|| ParseChangeKindError {
                value: s.to_owned(),
            })
    }
}

impl TryFrom<String> for ChangeKind {
    type Error = ParseChangeKindError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Notification pairing a [`ChangeKind`] with the affected item.
///
/// # Examples
/// ```
/// use persistence_contracts::{ChangeKind, ObjectChange};
///
/// let change = ObjectChange::deleted(42_i64);
/// assert_eq!(change.kind(), ChangeKind::Deleted);
/// assert_eq!(*change.item(), 42);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectChange<T> {
    kind: ChangeKind,
    item: T,
}

impl<T> ObjectChange<T> {
    /// Pair `item` with `kind`.
    pub const fn new(kind: ChangeKind, item: T) -> Self {
        Self { kind, item }
    }

    /// Notification for an inserted item.
    pub const fn inserted(item: T) -> Self {
        Self::new(ChangeKind::Inserted, item)
    }

    /// Notification for an updated item.
    pub const fn updated(item: T) -> Self {
        Self::new(ChangeKind::Updated, item)
    }

    /// Notification for a deleted item.
    pub const fn deleted(item: T) -> Self {
        Self::new(ChangeKind::Deleted, item)
    }

    /// Kind of mutation.
    #[must_use]
    pub const fn kind(&self) -> ChangeKind {
        self.kind
    }

    /// Affected item.
    #[must_use]
    pub const fn item(&self) -> &T {
        &self.item
    }

    /// Consume the notification and return the affected item.
    #[must_use]
    pub fn into_item(self) -> T {
        self.item
    }

    /// Transform the item while keeping the kind.
    #[must_use]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ObjectChange<U> {
        ObjectChange::new(self.kind, f(self.item))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use std::collections::HashSet;

    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn exactly_three_distinct_kinds() {
        let kinds: HashSet<ChangeKind> = ChangeKind::ALL.into_iter().collect();
        let codes: HashSet<u8> = ChangeKind::ALL.into_iter().map(ChangeKind::code).collect();
        let names: HashSet<&str> = ChangeKind::ALL.into_iter().map(ChangeKind::as_str).collect();

        assert_eq!(kinds.len(), 3);
        assert_eq!(codes.len(), 3);
        assert_eq!(names.len(), 3);
    }

    #[rstest]
    #[case(ChangeKind::Inserted, 0, "Inserted")]
    #[case(ChangeKind::Updated, 1, "Updated")]
    #[case(ChangeKind::Deleted, 2, "Deleted")]
    fn kinds_have_stable_codes_and_names(
        #[case] kind: ChangeKind,
        #[case] code: u8,
        #[case] name: &str,
    ) {
        assert_eq!(kind.code(), code);
        assert_eq!(kind.to_string(), name);
        assert_eq!(serde_json::to_value(kind).expect("serialise"), json!(name));
    }

    #[rstest]
    #[case("Inserted", ChangeKind::Inserted)]
    #[case("updated", ChangeKind::Updated)]
    #[case("  DELETED ", ChangeKind::Deleted)]
    fn parses_names_case_insensitively(#[case] input: &str, #[case] expected: ChangeKind) {
        assert_eq!(input.parse::<ChangeKind>(), Ok(expected));
    }

    #[rstest]
    #[case("")]
    #[case("Upserted")]
    #[case("0")]
    fn rejects_unknown_names(#[case] input: &str) {
        let err = input
            .parse::<ChangeKind>()
            .expect_err("unknown names must fail");
        assert_eq!(err.value(), input);
        assert_eq!(err.to_string(), format!("unknown change kind: {input}"));
    }

    #[rstest]
    #[case(json!("Deleted"), ChangeKind::Deleted)]
    #[case(json!("deleted"), ChangeKind::Deleted)]
    #[case(json!(" UPDATED "), ChangeKind::Updated)]
    fn json_accepts_the_same_spellings_as_parse(
        #[case] value: serde_json::Value,
        #[case] expected: ChangeKind,
    ) {
        let parsed: ChangeKind = serde_json::from_value(value).expect("deserialise");
        assert_eq!(parsed, expected);
    }

    #[rstest]
    fn json_rejects_unknown_names() {
        let err = serde_json::from_value::<ChangeKind>(json!("Upserted"))
            .expect_err("unknown names must fail");
        assert!(err.to_string().contains("unknown change kind: Upserted"));
    }

    #[rstest]
    fn object_change_constructors_set_kind() {
        assert_eq!(ObjectChange::inserted("a").kind(), ChangeKind::Inserted);
        assert_eq!(ObjectChange::updated("a").kind(), ChangeKind::Updated);
        assert_eq!(ObjectChange::deleted("a").kind(), ChangeKind::Deleted);
    }

    #[rstest]
    fn map_keeps_kind() {
        let change = ObjectChange::updated(21_i64).map(|value| value * 2);

        assert_eq!(change.kind(), ChangeKind::Updated);
        assert_eq!(change.into_item(), 42);
    }

    #[rstest]
    fn object_change_serialises_kind_by_name() {
        let change = ObjectChange::deleted(7_i64);

        let value = serde_json::to_value(&change).expect("serialise");
        assert_eq!(value, json!({ "kind": "Deleted", "item": 7 }));
    }
}
