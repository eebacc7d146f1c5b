//! Argument record for the entity deletion workflow.
//!
//! The record is a plain carrier. Whether the object exists, and whether the
//! as-of timestamp is consistent with the entity's history, is decided by the
//! workflow that consumes it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Request to delete an entity as of a point in time.
///
/// Serialises with explicit field names: `ObjectId`, `AsOf` (RFC 3339,
/// UTC), and `SetValidFrom`. Unknown fields are rejected. `AsOf` must carry
/// an offset (`Z` or `+hh:mm`); offset-less timestamps are rejected rather
/// than guessed at.
///
/// `set_valid_from` is forwarded to the workflow untouched; it asks the
/// workflow to also record `as_of` as the entity's valid-from marker.
///
/// # Examples
/// ```
/// use chrono::{TimeZone, Utc};
/// use persistence_contracts::EntityDeleteInput;
///
/// let as_of = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
/// let input = EntityDeleteInput::new(42, as_of, true);
///
/// assert_eq!(
///     input.to_json().unwrap(),
///     r#"{"ObjectId":42,"AsOf":"2024-01-15T00:00:00Z","SetValidFrom":true}"#
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EntityDeleteInput {
    #[serde(rename = "ObjectId")]
    object_id: i64,
    #[serde(rename = "AsOf")]
    as_of: DateTime<Utc>,
    #[serde(rename = "SetValidFrom")]
    set_valid_from: bool,
}

impl EntityDeleteInput {
    /// Build a delete request for `object_id` effective at `as_of`.
    #[must_use]
    pub const fn new(object_id: i64, as_of: DateTime<Utc>, set_valid_from: bool) -> Self {
        Self {
            object_id,
            as_of,
            set_valid_from,
        }
    }

    /// Identifier of the entity to delete.
    #[must_use]
    pub const fn object_id(&self) -> i64 {
        self.object_id
    }

    /// Timestamp at which the deletion takes effect.
    #[must_use]
    pub const fn as_of(&self) -> DateTime<Utc> {
        self.as_of
    }

    /// Whether `as_of` should also be written as the valid-from marker.
    #[must_use]
    pub const fn set_valid_from(&self) -> bool {
        self.set_valid_from
    }

    /// Replace the target entity identifier.
    pub const fn set_object_id(&mut self, object_id: i64) {
        self.object_id = object_id;
    }

    /// Replace the effective timestamp.
    pub const fn set_as_of(&mut self, as_of: DateTime<Utc>) {
        self.as_of = as_of;
    }

    /// Replace the valid-from flag.
    pub const fn set_set_valid_from(&mut self, set_valid_from: bool) {
        self.set_valid_from = set_valid_from;
    }

    /// Parse a request from its JSON representation.
    ///
    /// # Errors
    ///
    /// Returns [`serde_json::Error`] when the payload is malformed, misses a
    /// field, or carries an unknown one.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Render the request as compact JSON.
    ///
    /// # Errors
    ///
    /// Returns [`serde_json::Error`] if serialisation fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
