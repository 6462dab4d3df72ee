//! `UpdateItem` request.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::attribute_value::AttributeValue;
use crate::entries::{KeyEntry, key_from_entries, map_field_methods};
use crate::error::{BuildResult, Rejected};
use crate::operations::{Operation, Request};
use crate::output::UpdateItemResult;
use crate::types::{
    AttributeValueUpdate, ConditionalOperator, ExpectedAttributeValue, ExpressionAttributeNames,
    ExpressionAttributeValues, Key, ReturnConsumedCapacity, ReturnItemCollectionMetrics,
    ReturnValue,
};

/// Input for the `UpdateItem` operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateItemRequest {
    /// The name of the table containing the item.
    pub table_name: String,

    /// The primary key of the item to update.
    #[serde(default)]
    pub key: Key,

    /// Legacy: per-attribute update actions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute_updates: Option<HashMap<String, AttributeValueUpdate>>,

    /// Legacy: per-attribute preconditions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected: Option<HashMap<String, ExpectedAttributeValue>>,

    /// Legacy: how `Expected` conditions combine.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditional_operator: Option<ConditionalOperator>,

    /// Which item attributes to return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_values: Option<ReturnValue>,

    /// Level of detail about consumed capacity to return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_consumed_capacity: Option<ReturnConsumedCapacity>,

    /// Whether to return item collection metrics.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_item_collection_metrics: Option<ReturnItemCollectionMetrics>,

    /// The update expression.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_expression: Option<String>,

    /// A condition that must hold for the update to succeed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition_expression: Option<String>,

    /// Substitution tokens for attribute names in an expression.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expression_attribute_names: Option<ExpressionAttributeNames>,

    /// Substitution tokens for attribute values in an expression.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expression_attribute_values: Option<ExpressionAttributeValues>,
}

impl UpdateItemRequest {
    /// Start building an update against `table_name`.
    #[must_use]
    pub fn builder(table_name: impl Into<String>) -> UpdateItemRequestBuilder {
        UpdateItemRequestBuilder {
            inner: UpdateItemRequestDraft {
                table_name: table_name.into(),
                ..UpdateItemRequestDraft::default()
            },
        }
    }
}

impl Request for UpdateItemRequest {
    const OPERATION: Operation = Operation::UpdateItem;
    type Output = UpdateItemResult;
}

/// Builder state. `key` stays optional until `build`, so the map helpers work
/// the same way as on the other builders.
#[derive(Debug, Clone, Default)]
struct UpdateItemRequestDraft {
    table_name: String,
    key: Option<Key>,
    attribute_updates: Option<HashMap<String, AttributeValueUpdate>>,
    expected: Option<HashMap<String, ExpectedAttributeValue>>,
    conditional_operator: Option<ConditionalOperator>,
    return_values: Option<ReturnValue>,
    return_consumed_capacity: Option<ReturnConsumedCapacity>,
    return_item_collection_metrics: Option<ReturnItemCollectionMetrics>,
    update_expression: Option<String>,
    condition_expression: Option<String>,
    expression_attribute_names: Option<ExpressionAttributeNames>,
    expression_attribute_values: Option<ExpressionAttributeValues>,
}

/// Builder for [`UpdateItemRequest`].
#[derive(Debug, Clone)]
pub struct UpdateItemRequestBuilder {
    inner: UpdateItemRequestDraft,
}

impl UpdateItemRequestBuilder {
    map_field_methods! {
        /// Set the primary key.
        key: AttributeValue => "Key",
        set_key, add_key_entry, clear_key_entries
    }

    /// Replace the primary key with one built from a hash key entry and an
    /// optional range key entry.
    pub fn key_entries(
        mut self,
        hash_key: Option<KeyEntry>,
        range_key: Option<KeyEntry>,
    ) -> BuildResult<Self> {
        match key_from_entries("Key", hash_key, range_key) {
            Ok(key) => {
                self.inner.key = Some(key);
                Ok(self)
            }
            Err(error) => Err(Rejected::new(self, error)),
        }
    }

    map_field_methods! {
        /// Set the legacy attribute updates.
        attribute_updates: AttributeValueUpdate => "AttributeUpdates",
        set_attribute_updates, add_attribute_updates_entry, clear_attribute_updates_entries
    }

    map_field_methods! {
        /// Set the legacy expectations.
        expected: ExpectedAttributeValue => "Expected",
        set_expected, add_expected_entry, clear_expected_entries
    }

    /// Set how legacy expectations combine.
    #[must_use]
    pub fn conditional_operator(mut self, op: impl Into<ConditionalOperator>) -> Self {
        self.inner.conditional_operator = Some(op.into());
        self
    }

    /// Set which attributes the result carries.
    #[must_use]
    pub fn return_values(mut self, rv: impl Into<ReturnValue>) -> Self {
        self.inner.return_values = Some(rv.into());
        self
    }

    /// Set the consumed capacity verbosity.
    #[must_use]
    pub fn return_consumed_capacity(mut self, rcc: impl Into<ReturnConsumedCapacity>) -> Self {
        self.inner.return_consumed_capacity = Some(rcc.into());
        self
    }

    /// Set whether item collection metrics are returned.
    #[must_use]
    pub fn return_item_collection_metrics(
        mut self,
        ricm: impl Into<ReturnItemCollectionMetrics>,
    ) -> Self {
        self.inner.return_item_collection_metrics = Some(ricm.into());
        self
    }

    /// Set the update expression.
    #[must_use]
    pub fn update_expression(mut self, expr: impl Into<String>) -> Self {
        self.inner.update_expression = Some(expr.into());
        self
    }

    /// Set the condition expression.
    #[must_use]
    pub fn condition_expression(mut self, expr: impl Into<String>) -> Self {
        self.inner.condition_expression = Some(expr.into());
        self
    }

    map_field_methods! {
        /// Set the expression attribute names.
        expression_attribute_names: String => "ExpressionAttributeNames",
        set_expression_attribute_names,
        add_expression_attribute_names_entry,
        clear_expression_attribute_names_entries
    }

    map_field_methods! {
        /// Set the expression attribute values.
        expression_attribute_values: AttributeValue => "ExpressionAttributeValues",
        set_expression_attribute_values,
        add_expression_attribute_values_entry,
        clear_expression_attribute_values_entries
    }

    /// Finish building. A key that was never set serializes as `{}`.
    #[must_use]
    pub fn build(self) -> UpdateItemRequest {
        let d = self.inner;
        UpdateItemRequest {
            table_name: d.table_name,
            key: d.key.unwrap_or_default(),
            attribute_updates: d.attribute_updates,
            expected: d.expected,
            conditional_operator: d.conditional_operator,
            return_values: d.return_values,
            return_consumed_capacity: d.return_consumed_capacity,
            return_item_collection_metrics: d.return_item_collection_metrics,
            update_expression: d.update_expression,
            condition_expression: d.condition_expression,
            expression_attribute_names: d.expression_attribute_names,
            expression_attribute_values: d.expression_attribute_values,
        }
    }
}
