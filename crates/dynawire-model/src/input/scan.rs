//! `Scan` request.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::attribute_value::AttributeValue;
use crate::entries::{KeyEntry, append_items, key_from_entries, map_field_methods};
use crate::error::{BuildResult, Rejected};
use crate::operations::{Operation, Request};
use crate::output::ScanResult;
use crate::types::{
    Condition, ConditionalOperator, ExpressionAttributeNames, ExpressionAttributeValues, Key,
    ReturnConsumedCapacity, Select,
};

/// Input for the `Scan` operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ScanRequest {
    /// The name of the table to scan.
    pub table_name: String,

    /// The name of a secondary index to scan.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_name: Option<String>,

    /// Legacy: attribute names to retrieve.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes_to_get: Option<Vec<String>>,

    /// The maximum number of items to evaluate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i32>,

    /// The attributes to be returned in the result.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub select: Option<Select>,

    /// Legacy: attribute name to a post-read filter condition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scan_filter: Option<HashMap<String, Condition>>,

    /// Legacy: how `ScanFilter` conditions combine.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditional_operator: Option<ConditionalOperator>,

    /// The primary key of the first item to evaluate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclusive_start_key: Option<Key>,

    /// Level of detail about consumed capacity to return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_consumed_capacity: Option<ReturnConsumedCapacity>,

    /// For a parallel scan, the total number of segments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_segments: Option<i32>,

    /// For a parallel scan, the segment this request reads.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segment: Option<i32>,

    /// The attributes to retrieve, as an expression.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projection_expression: Option<String>,

    /// Conditions applied to the items after they are read.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_expression: Option<String>,

    /// Substitution tokens for attribute names in an expression.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expression_attribute_names: Option<ExpressionAttributeNames>,

    /// Substitution tokens for attribute values in an expression.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expression_attribute_values: Option<ExpressionAttributeValues>,

    /// If `true`, a strongly consistent read is used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consistent_read: Option<bool>,
}

impl ScanRequest {
    /// Start building a scan of `table_name`.
    #[must_use]
    pub fn builder(table_name: impl Into<String>) -> ScanRequestBuilder {
        ScanRequestBuilder {
            inner: Self {
                table_name: table_name.into(),
                ..Self::default()
            },
        }
    }

    /// Continue building from this request.
    #[must_use]
    pub fn into_builder(self) -> ScanRequestBuilder {
        ScanRequestBuilder { inner: self }
    }

    /// The request for the page following `result`, or `None` on the last
    /// page. Segment settings carry over.
    #[must_use]
    pub fn next_page(&self, result: &ScanResult) -> Option<Self> {
        let key = result.last_evaluated_key.as_ref().filter(|k| !k.is_empty())?;
        Some(Self {
            exclusive_start_key: Some(key.clone()),
            ..self.clone()
        })
    }
}

impl Request for ScanRequest {
    const OPERATION: Operation = Operation::Scan;
    type Output = ScanResult;
}

/// Builder for [`ScanRequest`].
#[derive(Debug, Clone)]
pub struct ScanRequestBuilder {
    inner: ScanRequest,
}

impl ScanRequestBuilder {
    /// Replace the table name.
    #[must_use]
    pub fn table_name(mut self, table_name: impl Into<String>) -> Self {
        self.inner.table_name = table_name.into();
        self
    }

    /// Scan a secondary index instead of the table.
    #[must_use]
    pub fn index_name(mut self, index_name: impl Into<String>) -> Self {
        self.inner.index_name = Some(index_name.into());
        self
    }

    /// Append attribute names to `AttributesToGet`.
    #[must_use]
    pub fn attributes_to_get<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        append_items(
            &mut self.inner.attributes_to_get,
            names.into_iter().map(Into::into),
        );
        self
    }

    /// Replace `AttributesToGet` entirely.
    #[must_use]
    pub fn set_attributes_to_get(mut self, names: Option<Vec<String>>) -> Self {
        self.inner.attributes_to_get = names;
        self
    }

    /// Set the evaluation limit.
    #[must_use]
    pub fn limit(mut self, limit: i32) -> Self {
        self.inner.limit = Some(limit);
        self
    }

    /// Set the select mode.
    #[must_use]
    pub fn select(mut self, select: impl Into<Select>) -> Self {
        self.inner.select = Some(select.into());
        self
    }

    map_field_methods! {
        /// Set the legacy scan filter.
        scan_filter: Condition => "ScanFilter",
        set_scan_filter, add_scan_filter_entry, clear_scan_filter_entries
    }

    /// Set how legacy filter conditions combine.
    #[must_use]
    pub fn conditional_operator(mut self, op: impl Into<ConditionalOperator>) -> Self {
        self.inner.conditional_operator = Some(op.into());
        self
    }

    map_field_methods! {
        /// Set the pagination cursor.
        exclusive_start_key: AttributeValue => "ExclusiveStartKey",
        set_exclusive_start_key, add_exclusive_start_key_entry, clear_exclusive_start_key_entries
    }

    /// Replace the pagination cursor with one built from key entries.
    pub fn exclusive_start_key_entries(
        mut self,
        hash_key: Option<KeyEntry>,
        range_key: Option<KeyEntry>,
    ) -> BuildResult<Self> {
        match key_from_entries("ExclusiveStartKey", hash_key, range_key) {
            Ok(key) => {
                self.inner.exclusive_start_key = Some(key);
                Ok(self)
            }
            Err(error) => Err(Rejected::new(self, error)),
        }
    }

    /// Set the consumed capacity verbosity.
    #[must_use]
    pub fn return_consumed_capacity(mut self, rcc: impl Into<ReturnConsumedCapacity>) -> Self {
        self.inner.return_consumed_capacity = Some(rcc.into());
        self
    }

    /// Set the total number of parallel scan segments.
    #[must_use]
    pub fn total_segments(mut self, total_segments: i32) -> Self {
        self.inner.total_segments = Some(total_segments);
        self
    }

    /// Set the parallel scan segment to read.
    #[must_use]
    pub fn segment(mut self, segment: i32) -> Self {
        self.inner.segment = Some(segment);
        self
    }

    /// Read `segment` out of `total_segments`. The service rejects a segment
    /// outside `0..total_segments`.
    #[must_use]
    pub fn parallel_segment(self, segment: i32, total_segments: i32) -> Self {
        self.segment(segment).total_segments(total_segments)
    }

    /// Set the projection expression.
    #[must_use]
    pub fn projection_expression(mut self, expr: impl Into<String>) -> Self {
        self.inner.projection_expression = Some(expr.into());
        self
    }

    /// Set the filter expression.
    #[must_use]
    pub fn filter_expression(mut self, expr: impl Into<String>) -> Self {
        self.inner.filter_expression = Some(expr.into());
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

    /// Request a strongly consistent read.
    #[must_use]
    pub fn consistent_read(mut self, consistent_read: bool) -> Self {
        self.inner.consistent_read = Some(consistent_read);
        self
    }

    /// Finish building.
    #[must_use]
    pub fn build(self) -> ScanRequest {
        self.inner
    }
}
