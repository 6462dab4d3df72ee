//! Accumulation helpers shared by the builders.
//!
//! Map fields are insert-only: a key may be added once and a second insert
//! fails without touching the stored value. List fields append. Both create
//! the underlying collection on first use so that "never set" stays `None`.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::attribute_value::AttributeValue;
use crate::error::{ModelError, ModelResult};
use crate::types::Key;

/// A single named key attribute, e.g. `("pk".to_owned(), AttributeValue::S(..))`.
pub type KeyEntry = (String, AttributeValue);

/// Generates the `set_*`, `add_*_entry` and `clear_*_entries` builder methods
/// for one map field of the builder's `inner` value.
macro_rules! map_field_methods {
    (
        $(#[$doc:meta])*
        $field:ident: $value:ty => $wire:literal, $set:ident, $add:ident, $clear:ident
    ) => {
        $(#[$doc])*
        ///
        /// Replaces the whole map; `None` leaves the field absent.
        #[must_use]
        pub fn $set(mut self, map: Option<std::collections::HashMap<String, $value>>) -> Self {
            self.inner.$field = map;
            self
        }

        #[doc = concat!("Insert one `", $wire, "` entry.")]
        ///
        /// A key that is already present is refused with
        /// [`ModelError::DuplicateKey`](crate::ModelError::DuplicateKey); the
        /// returned [`Rejected`](crate::error::Rejected) hands back the builder
        /// with the first value still in place.
        pub fn $add(
            mut self,
            key: impl Into<String>,
            value: $value,
        ) -> $crate::error::BuildResult<Self> {
            match $crate::entries::insert_entry(&mut self.inner.$field, $wire, key.into(), value) {
                Ok(()) => Ok(self),
                Err(error) => Err($crate::error::Rejected::new(self, error)),
            }
        }

        #[doc = concat!("Reset `", $wire, "` to absent.")]
        #[must_use]
        pub fn $clear(mut self) -> Self {
            self.inner.$field = None;
            self
        }
    };
}

pub(crate) use map_field_methods;

/// Insert `key` into the lazily created map, rejecting duplicates.
pub(crate) fn insert_entry<V>(
    map: &mut Option<HashMap<String, V>>,
    field: &'static str,
    key: String,
    value: V,
) -> ModelResult<()> {
    match map.get_or_insert_with(HashMap::new).entry(key) {
        Entry::Occupied(existing) => Err(ModelError::DuplicateKey {
            field,
            key: existing.key().clone(),
        }),
        Entry::Vacant(slot) => {
            slot.insert(value);
            Ok(())
        }
    }
}

/// Append `items` to the lazily created list.
pub(crate) fn append_items<T>(list: &mut Option<Vec<T>>, items: impl IntoIterator<Item = T>) {
    list.get_or_insert_with(Vec::new).extend(items);
}

/// Build a primary key map from a hash key entry and an optional range key
/// entry.
///
/// `field` names the key being built and only shows up in errors. The range
/// key may be omitted for hash-only tables. A range entry named like the hash
/// entry replaces it.
///
/// # Examples
///
/// ```
/// use dynawire_model::{AttributeValue, ModelError, key_from_entries};
///
/// let key = key_from_entries(
///     "ExclusiveStartKey",
///     Some(("pk".to_owned(), AttributeValue::S("user-1".to_owned()))),
///     None,
/// )
/// .unwrap();
/// assert_eq!(key.len(), 1);
///
/// let err = key_from_entries("ExclusiveStartKey", None, None).unwrap_err();
/// assert!(matches!(err, ModelError::MissingHashKey { .. }));
/// ```
pub fn key_from_entries(
    field: &'static str,
    hash_key: Option<KeyEntry>,
    range_key: Option<KeyEntry>,
) -> ModelResult<Key> {
    let (hash_name, hash_value) = hash_key.ok_or(ModelError::MissingHashKey { field })?;
    let mut key = Key::from([(hash_name, hash_value)]);
    if let Some((range_name, range_value)) = range_key {
        key.insert(range_name, range_value);
    }
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_keep_first_value_on_duplicate_insert() {
        let mut map = None;
        insert_entry(&mut map, "Key", "pk".to_owned(), 1).unwrap();
        let err = insert_entry(&mut map, "Key", "pk".to_owned(), 2).unwrap_err();
        assert_eq!(
            err,
            ModelError::DuplicateKey {
                field: "Key",
                key: "pk".to_owned(),
            }
        );
        let map = map.unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map["pk"], 1);
    }

    #[test]
    fn test_should_create_list_lazily_and_append() {
        let mut list: Option<Vec<&str>> = None;
        append_items(&mut list, ["a", "b"]);
        append_items(&mut list, ["c"]);
        assert_eq!(list, Some(vec!["a", "b", "c"]));
    }

    #[test]
    fn test_should_mark_list_present_even_when_appending_nothing() {
        let mut list: Option<Vec<&str>> = None;
        append_items(&mut list, []);
        assert_eq!(list, Some(vec![]));
    }

    #[test]
    fn test_should_build_hash_and_range_key() {
        let key = key_from_entries(
            "Key",
            Some(("pk".to_owned(), AttributeValue::S("a".to_owned()))),
            Some(("sk".to_owned(), AttributeValue::N("1".to_owned()))),
        )
        .unwrap();
        assert_eq!(key.len(), 2);
        assert_eq!(key["sk"], AttributeValue::N("1".to_owned()));
    }

    #[test]
    fn test_should_require_hash_key_even_with_range_key() {
        let err = key_from_entries(
            "ExclusiveStartKey",
            None,
            Some(("sk".to_owned(), AttributeValue::N("1".to_owned()))),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ModelError::MissingHashKey {
                field: "ExclusiveStartKey"
            }
        );
    }

    #[test]
    fn test_should_let_same_named_range_key_replace_hash_key() {
        let key = key_from_entries(
            "ExclusiveStartKey",
            Some(("pk".to_owned(), AttributeValue::S("a".to_owned()))),
            Some(("pk".to_owned(), AttributeValue::S("b".to_owned()))),
        )
        .unwrap();
        assert_eq!(key.len(), 1);
        assert_eq!(key["pk"], AttributeValue::S("b".to_owned()));
    }
}
