//! Result models.
//!
//! Every field is optional: what the service returns depends on what the
//! originating request asked for. No validation happens here.

use serde::{Deserialize, Serialize};

use crate::attribute_value::AttributeValue;
use crate::entries::map_field_methods;
use crate::types::{ConsumedCapacity, Item, ItemCollectionMetrics, Key};

/// Result of the `UpdateItem` operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateItemResult {
    /// The item attributes before or after the update. Only present when the
    /// request set `ReturnValues` to something other than `NONE`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Item>,

    /// The capacity units consumed by the operation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consumed_capacity: Option<ConsumedCapacity>,

    /// Information about item collections modified by the operation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_collection_metrics: Option<ItemCollectionMetrics>,
}

impl UpdateItemResult {
    /// Start building an empty result.
    #[must_use]
    pub fn builder() -> UpdateItemResultBuilder {
        UpdateItemResultBuilder::default()
    }
}

/// Builder for [`UpdateItemResult`].
#[derive(Debug, Clone, Default)]
pub struct UpdateItemResultBuilder {
    inner: UpdateItemResult,
}

impl UpdateItemResultBuilder {
    map_field_methods! {
        /// Set the returned attributes.
        attributes: AttributeValue => "Attributes",
        set_attributes, add_attributes_entry, clear_attributes_entries
    }

    /// Set the consumed capacity.
    #[must_use]
    pub fn consumed_capacity(mut self, capacity: ConsumedCapacity) -> Self {
        self.inner.consumed_capacity = Some(capacity);
        self
    }

    /// Set the item collection metrics.
    #[must_use]
    pub fn item_collection_metrics(mut self, metrics: ItemCollectionMetrics) -> Self {
        self.inner.item_collection_metrics = Some(metrics);
        self
    }

    /// Finish building.
    #[must_use]
    pub fn build(self) -> UpdateItemResult {
        self.inner
    }
}

/// Result of the `Query` operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct QueryResult {
    /// Matching items. Absent when `Select` is `COUNT`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<Item>>,

    /// The number of items in the response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<i32>,

    /// The number of items evaluated before any filter was applied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scanned_count: Option<i32>,

    /// The primary key of the item where the operation stopped. Pass it as
    /// `ExclusiveStartKey` to fetch the next page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_evaluated_key: Option<Key>,

    /// The capacity units consumed by the operation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consumed_capacity: Option<ConsumedCapacity>,
}

impl QueryResult {
    /// Returns `true` when the service reported no further pages.
    #[must_use]
    pub fn is_last_page(&self) -> bool {
        self.last_evaluated_key.as_ref().is_none_or(Key::is_empty)
    }
}

/// Result of the `Scan` operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ScanResult {
    /// Matching items. Absent when `Select` is `COUNT`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<Item>>,

    /// The number of items in the response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<i32>,

    /// The number of items evaluated before any filter was applied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scanned_count: Option<i32>,

    /// The primary key of the item where the operation stopped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_evaluated_key: Option<Key>,

    /// The capacity units consumed by the operation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consumed_capacity: Option<ConsumedCapacity>,
}

impl ScanResult {
    /// Returns `true` when the service reported no further pages.
    #[must_use]
    pub fn is_last_page(&self) -> bool {
        self.last_evaluated_key.as_ref().is_none_or(Key::is_empty)
    }
}
