//! `Query` request.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::attribute_value::AttributeValue;
use crate::entries::{KeyEntry, append_items, key_from_entries, map_field_methods};
use crate::error::{BuildResult, Rejected};
use crate::operations::{Operation, Request};
use crate::output::QueryResult;
use crate::types::{
    Condition, ConditionalOperator, ExpressionAttributeNames, ExpressionAttributeValues, Key,
    ReturnConsumedCapacity, Select,
};

/// Input for the `Query` operation.
///
/// Either the legacy `KeyConditions`/`QueryFilter` maps or the expression
/// fields are expected to be used, not both; the service decides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct QueryRequest {
    /// The name of the table to query.
    pub table_name: String,

    /// The name of a secondary index to query.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_name: Option<String>,

    /// The attributes to be returned in the result.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub select: Option<Select>,

    /// Legacy: attribute names to retrieve.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes_to_get: Option<Vec<String>>,

    /// The maximum number of items to evaluate (not necessarily the number of
    /// matching items).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i32>,

    /// If `true`, a strongly consistent read is used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consistent_read: Option<bool>,

    /// Legacy: key attribute name to the condition its value must meet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_conditions: Option<HashMap<String, Condition>>,

    /// Legacy: non-key attribute name to a post-read filter condition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_filter: Option<HashMap<String, Condition>>,

    /// Legacy: how `QueryFilter` conditions combine.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditional_operator: Option<ConditionalOperator>,

    /// Order of index traversal. The service defaults to `true` (ascending
    /// sort key order).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scan_index_forward: Option<bool>,

    /// The primary key of the first item to evaluate. Used for pagination.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclusive_start_key: Option<Key>,

    /// Level of detail about consumed capacity to return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_consumed_capacity: Option<ReturnConsumedCapacity>,

    /// The attributes to retrieve, as an expression.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projection_expression: Option<String>,

    /// Conditions applied to the items after they are read.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_expression: Option<String>,

    /// The condition on the key attributes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_condition_expression: Option<String>,

    /// Substitution tokens for attribute names in an expression.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expression_attribute_names: Option<ExpressionAttributeNames>,

    /// Substitution tokens for attribute values in an expression.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expression_attribute_values: Option<ExpressionAttributeValues>,
}

impl QueryRequest {
    /// Start building a query against `table_name`.
    ///
    /// ```
    /// use dynawire_model::AttributeValue;
    /// use dynawire_model::input::QueryRequest;
    ///
    /// let req = QueryRequest::builder("Orders")
    ///     .key_condition_expression("pk = :v")
    ///     .add_expression_attribute_values_entry(":v", AttributeValue::S("123".to_owned()))?
    ///     .limit(50)
    ///     .scan_index_forward(false)
    ///     .build();
    /// assert_eq!(req.table_name, "Orders");
    /// # Ok::<(), dynawire_model::ModelError>(())
    /// ```
    #[must_use]
    pub fn builder(table_name: impl Into<String>) -> QueryRequestBuilder {
        QueryRequestBuilder {
            inner: Self {
                table_name: table_name.into(),
                ..Self::default()
            },
        }
    }

    /// Continue building from this request.
    #[must_use]
    pub fn into_builder(self) -> QueryRequestBuilder {
        QueryRequestBuilder { inner: self }
    }

    /// The request for the page following `result`, or `None` if `result`
    /// was the last page.
    #[must_use]
    pub fn next_page(&self, result: &QueryResult) -> Option<Self> {
        let key = result.last_evaluated_key.as_ref().filter(|k| !k.is_empty())?;
        Some(Self {
            exclusive_start_key: Some(key.clone()),
            ..self.clone()
        })
    }
}

impl Request for QueryRequest {
    const OPERATION: Operation = Operation::Query;
    type Output = QueryResult;
}

/// Builder for [`QueryRequest`].
///
/// Consumes itself on every call; map insertions return `Result` so that
/// duplicate keys surface at the call that introduced them.
#[derive(Debug, Clone)]
pub struct QueryRequestBuilder {
    inner: QueryRequest,
}

impl QueryRequestBuilder {
    /// Replace the table name.
    #[must_use]
    pub fn table_name(mut self, table_name: impl Into<String>) -> Self {
        self.inner.table_name = table_name.into();
        self
    }

    /// Query a secondary index instead of the table.
    #[must_use]
    pub fn index_name(mut self, index_name: impl Into<String>) -> Self {
        self.inner.index_name = Some(index_name.into());
        self
    }

    /// Set the select mode; accepts a typed value or a raw literal.
    #[must_use]
    pub fn select(mut self, select: impl Into<Select>) -> Self {
        self.inner.select = Some(select.into());
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

    /// Request a strongly consistent read.
    #[must_use]
    pub fn consistent_read(mut self, consistent_read: bool) -> Self {
        self.inner.consistent_read = Some(consistent_read);
        self
    }

    map_field_methods! {
        /// Set the legacy key conditions.
        key_conditions: Condition => "KeyConditions",
        set_key_conditions, add_key_conditions_entry, clear_key_conditions_entries
    }

    map_field_methods! {
        /// Set the legacy query filter.
        query_filter: Condition => "QueryFilter",
        set_query_filter, add_query_filter_entry, clear_query_filter_entries
    }

    /// Set how legacy filter conditions combine.
    #[must_use]
    pub fn conditional_operator(mut self, op: impl Into<ConditionalOperator>) -> Self {
        self.inner.conditional_operator = Some(op.into());
        self
    }

    /// Set the index traversal order.
    #[must_use]
    pub fn scan_index_forward(mut self, forward: bool) -> Self {
        self.inner.scan_index_forward = Some(forward);
        self
    }

    map_field_methods! {
        /// Set the pagination cursor.
        exclusive_start_key: AttributeValue => "ExclusiveStartKey",
        set_exclusive_start_key, add_exclusive_start_key_entry, clear_exclusive_start_key_entries
    }

    /// Replace the pagination cursor with one built from a hash key entry and
    /// an optional range key entry.
    ///
    /// Fails with [`ModelError::MissingHashKey`](crate::ModelError::MissingHashKey)
    /// when `hash_key` is `None`.
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

    /// Set the consumed capacity verbosity; accepts a typed value or a raw
    /// literal.
    #[must_use]
    pub fn return_consumed_capacity(mut self, rcc: impl Into<ReturnConsumedCapacity>) -> Self {
        self.inner.return_consumed_capacity = Some(rcc.into());
        self
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

    /// Set the key condition expression.
    #[must_use]
    pub fn key_condition_expression(mut self, expr: impl Into<String>) -> Self {
        self.inner.key_condition_expression = Some(expr.into());
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

    /// Finish building.
    #[must_use]
    pub fn build(self) -> QueryRequest {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ModelError;
    use crate::types::ComparisonOperator;

    fn orders_query() -> QueryRequest {
        QueryRequest::builder("Orders")
            .key_condition_expression("pk = :v")
            .add_expression_attribute_values_entry(":v", AttributeValue::S("123".to_owned()))
            .unwrap()
            .limit(50)
            .scan_index_forward(false)
            .build()
    }

    #[test]
    fn test_should_roundtrip_orders_query() {
        let req = orders_query();
        let json = serde_json::to_string(&req).unwrap();
        let parsed: QueryRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, req);
    }

    #[test]
    fn test_should_serialize_pascal_case_minimal_body() {
        let json: serde_json::Value = serde_json::to_value(orders_query()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "TableName": "Orders",
                "Limit": 50,
                "ScanIndexForward": false,
                "KeyConditionExpression": "pk = :v",
                "ExpressionAttributeValues": {":v": {"S": "123"}},
            })
        );
    }

    #[test]
    fn test_should_keep_building_after_rejected_entry() {
        let rejected = QueryRequest::builder("Orders")
            .limit(50)
            .add_expression_attribute_values_entry(":v", AttributeValue::from("a"))
            .unwrap()
            .add_expression_attribute_values_entry(":v", AttributeValue::from("b"))
            .unwrap_err();
        assert_eq!(
            rejected.error(),
            &ModelError::DuplicateKey {
                field: "ExpressionAttributeValues",
                key: ":v".to_owned(),
            }
        );
        let req = rejected
            .into_builder()
            .key_condition_expression("pk = :v")
            .build();
        assert_eq!(req.table_name, "Orders");
        assert_eq!(req.limit, Some(50));
        let values = req.expression_attribute_values.unwrap();
        assert_eq!(values.len(), 1);
        assert_eq!(values[":v"], AttributeValue::from("a"));
    }

    #[test]
    fn test_should_reject_duplicate_entries_in_every_map() {
        let cond = Condition::builder(ComparisonOperator::Eq).build();
        let b = QueryRequest::builder("t")
            .add_key_conditions_entry("pk", cond.clone())
            .unwrap();
        assert!(b.clone().add_key_conditions_entry("pk", cond.clone()).is_err());
        let b = b.add_query_filter_entry("status", cond.clone()).unwrap();
        assert!(b.clone().add_query_filter_entry("status", cond).is_err());
        let b = b
            .add_exclusive_start_key_entry("pk", AttributeValue::from("a"))
            .unwrap();
        assert!(b
            .clone()
            .add_exclusive_start_key_entry("pk", AttributeValue::from("a"))
            .is_err());
        let b = b
            .add_expression_attribute_names_entry("#s", "status".to_owned())
            .unwrap();
        let (b, err) = b
            .add_expression_attribute_names_entry("#s", "state".to_owned())
            .unwrap_err()
            .into_parts();
        assert!(matches!(
            err,
            ModelError::DuplicateKey { field: "ExpressionAttributeNames", .. }
        ));
        assert_eq!(b.build().expression_attribute_names.unwrap()["#s"], "status");
    }

    #[test]
    fn test_should_clear_map_to_absent() {
        let req = QueryRequest::builder("t")
            .add_expression_attribute_names_entry("#s", "status".to_owned())
            .unwrap()
            .clear_expression_attribute_names_entries()
            .build();
        assert!(req.expression_attribute_names.is_none());
        let json = serde_json::to_string(&req).unwrap();
        assert!(!json.contains("ExpressionAttributeNames"));
    }

    #[test]
    fn test_should_distinguish_empty_map_from_absent() {
        let req = QueryRequest::builder("t")
            .set_exclusive_start_key(Some(HashMap::new()))
            .build();
        let json = serde_json::to_string(&req).unwrap();
        assert_eq!(json, r#"{"TableName":"t","ExclusiveStartKey":{}}"#);
        let parsed: QueryRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.exclusive_start_key, Some(HashMap::new()));
    }

    #[test]
    fn test_should_append_attributes_to_get() {
        let builder = QueryRequest::builder("t")
            .attributes_to_get(["a", "b"])
            .attributes_to_get(["c"]);
        assert_eq!(
            builder.clone().build().attributes_to_get,
            Some(vec!["a".to_owned(), "b".to_owned(), "c".to_owned()])
        );
        let replaced = builder
            .set_attributes_to_get(Some(vec!["z".to_owned()]))
            .build();
        assert_eq!(replaced.attributes_to_get, Some(vec!["z".to_owned()]));
    }

    #[test]
    fn test_should_build_cursor_from_hash_key_only() {
        let req = QueryRequest::builder("t")
            .exclusive_start_key_entries(Some(("pk".to_owned(), AttributeValue::from("a"))), None)
            .unwrap()
            .build();
        let key = req.exclusive_start_key.unwrap();
        assert_eq!(key.len(), 1);
        assert_eq!(key["pk"], AttributeValue::from("a"));
    }

    #[test]
    fn test_should_require_hash_key_for_cursor() {
        let (builder, err) = QueryRequest::builder("t")
            .limit(10)
            .exclusive_start_key_entries(None, Some(("sk".to_owned(), AttributeValue::number(1))))
            .unwrap_err()
            .into_parts();
        assert_eq!(
            err,
            ModelError::MissingHashKey {
                field: "ExclusiveStartKey"
            }
        );
        let req = builder.build();
        assert_eq!(req.limit, Some(10));
        assert!(req.exclusive_start_key.is_none());
    }

    #[test]
    fn test_should_accept_typed_and_raw_vocabulary() {
        let typed = QueryRequest::builder("t")
            .select(Select::Count)
            .return_consumed_capacity(ReturnConsumedCapacity::Total)
            .build();
        let raw = QueryRequest::builder("t")
            .select("COUNT")
            .return_consumed_capacity("TOTAL")
            .build();
        assert_eq!(typed, raw);

        let future = QueryRequest::builder("t").select("SOMETHING_NEW").build();
        let json = serde_json::to_string(&future).unwrap();
        assert!(json.contains(r#""Select":"SOMETHING_NEW""#));
    }

    #[test]
    fn test_should_serialize_legacy_key_conditions() {
        let req = QueryRequest::builder("Orders")
            .add_key_conditions_entry(
                "pk",
                Condition::builder(ComparisonOperator::Eq)
                    .attribute_value_list([AttributeValue::from("user-1")])
                    .build(),
            )
            .unwrap()
            .conditional_operator("OR")
            .build();
        let json: serde_json::Value = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json["KeyConditions"]["pk"],
            serde_json::json!({
                "ComparisonOperator": "EQ",
                "AttributeValueList": [{"S": "user-1"}],
            })
        );
        assert_eq!(json["ConditionalOperator"], "OR");
    }

    #[test]
    fn test_should_build_next_page_from_last_evaluated_key() {
        let req = orders_query();
        let last = QueryResult {
            last_evaluated_key: Some(HashMap::from([(
                "pk".to_owned(),
                AttributeValue::from("123"),
            )])),
            ..Default::default()
        };
        let next = req.next_page(&last).unwrap();
        assert_eq!(next.exclusive_start_key, last.last_evaluated_key);
        assert_eq!(next.limit, Some(50));
        assert!(req.exclusive_start_key.is_none());
        assert!(req.next_page(&QueryResult::default()).is_none());
    }

    #[test]
    fn test_should_resume_building_from_request() {
        let req = orders_query().into_builder().index_name("gsi-status").build();
        assert_eq!(req.index_name.as_deref(), Some("gsi-status"));
        assert_eq!(req.limit, Some(50));
    }
}
