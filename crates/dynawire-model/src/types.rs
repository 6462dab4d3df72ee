//! Shared types: closed vocabularies, legacy condition clauses and metrics.
//!
//! Structs use `#[serde(rename_all = "PascalCase")]` to match the wire format.
//! Collection fields are `Option` so that an absent field and an explicitly
//! empty one serialize differently.
//!
//! Vocabulary enums carry an `Unknown(String)` variant. The service may ship
//! new literals before this crate knows them, so raw strings are accepted
//! everywhere a vocabulary is (via `From<&str>`), while `from_value` stays a
//! strict lookup over the known set.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::attribute_value::AttributeValue;
use crate::entries::append_items;
use crate::error::ModelError;

/// An item represented as a map of attribute names to values.
pub type Item = HashMap<String, AttributeValue>;

/// A primary key represented as a map of key attribute names to values.
pub type Key = HashMap<String, AttributeValue>;

/// Expression attribute names mapping (`#name` placeholders to attribute names).
pub type ExpressionAttributeNames = HashMap<String, String>;

/// Expression attribute values mapping (`:value` placeholders to attribute values).
pub type ExpressionAttributeValues = HashMap<String, AttributeValue>;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Declares a string-backed vocabulary with strict and lenient entry points.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $lit:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
            /// A literal unknown to this client, passed through verbatim.
            Unknown(String),
        }

        impl $name {
            /// Returns the wire-format string representation.
            #[must_use]
            pub fn as_str(&self) -> &str {
                match self {
                    $( Self::$variant => $lit, )+
                    Self::Unknown(s) => s.as_str(),
                }
            }

            /// Strict lookup of a wire literal.
            ///
            /// Fails for an absent or empty input and for any literal outside
            /// the known set. Never returns `Unknown`.
            pub fn from_value<'a>(value: impl Into<Option<&'a str>>) -> Result<Self, ModelError> {
                let value = value.into();
                match value {
                    $( Some($lit) => Ok(Self::$variant), )+
                    _ => Err(ModelError::unrecognized(stringify!($name), value)),
                }
            }

            /// All known variants, in declaration order.
            #[must_use]
            pub fn values() -> Vec<Self> {
                vec![$( Self::$variant ),+]
            }

            /// Returns `false` for literals outside the known set.
            #[must_use]
            pub fn is_known(&self) -> bool {
                !matches!(self, Self::Unknown(_))
            }
        }

        impl std::str::FromStr for $name {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_value(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::from_value(s).unwrap_or_else(|_| Self::Unknown(s.to_owned()))
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                match Self::from_value(s.as_str()) {
                    Ok(known) => known,
                    Err(_) => Self::Unknown(s),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                String::deserialize(deserializer).map(Self::from)
            }
        }
    };
}

wire_enum! {
    /// Action to perform on an attribute during a legacy `AttributeUpdates`
    /// update.
    pub enum AttributeAction {
        /// Add to a number or set attribute.
        Add => "ADD",
        /// Set the attribute value.
        Put => "PUT",
        /// Delete the attribute (for scalars) or remove elements from a set.
        Delete => "DELETE",
    }
}

wire_enum! {
    /// Controls whether consumed capacity information is returned.
    pub enum ReturnConsumedCapacity {
        /// Return consumed capacity for the table and any indexes involved.
        Indexes => "INDEXES",
        /// Return only the total consumed capacity.
        Total => "TOTAL",
        /// Do not return consumed capacity.
        None => "NONE",
    }
}

wire_enum! {
    /// Attributes to retrieve in a `Query` or `Scan` operation.
    pub enum Select {
        /// All attributes of the item.
        AllAttributes => "ALL_ATTRIBUTES",
        /// All projected attributes (for index queries).
        AllProjectedAttributes => "ALL_PROJECTED_ATTRIBUTES",
        /// Only the count of matching items (no item data).
        Count => "COUNT",
        /// Only the attributes listed in `AttributesToGet` or
        /// `ProjectionExpression`.
        SpecificAttributes => "SPECIFIC_ATTRIBUTES",
    }
}

wire_enum! {
    /// Comparison operator for legacy `Condition` and `Expected` clauses.
    ///
    /// The number of operands each operator takes is enforced by the service,
    /// not here: none for `NOT_NULL`/`NULL`, two for `BETWEEN`, one or more
    /// for `IN`, exactly one otherwise.
    pub enum ComparisonOperator {
        /// Equal to.
        Eq => "EQ",
        /// Not equal to.
        Ne => "NE",
        /// Member of the operand list.
        In => "IN",
        /// Less than or equal to.
        Le => "LE",
        /// Less than.
        Lt => "LT",
        /// Greater than or equal to.
        Ge => "GE",
        /// Greater than.
        Gt => "GT",
        /// Between two operands, inclusive.
        Between => "BETWEEN",
        /// Attribute exists.
        NotNull => "NOT_NULL",
        /// Attribute does not exist.
        Null => "NULL",
        /// Contains a substring or set member.
        Contains => "CONTAINS",
        /// Does not contain a substring or set member.
        NotContains => "NOT_CONTAINS",
        /// Begins with a prefix.
        BeginsWith => "BEGINS_WITH",
    }
}

wire_enum! {
    /// Logical operator joining multiple legacy conditions.
    pub enum ConditionalOperator {
        /// All conditions must hold.
        And => "AND",
        /// At least one condition must hold.
        Or => "OR",
    }
}

wire_enum! {
    /// Determines what values a write operation returns.
    pub enum ReturnValue {
        /// Nothing is returned.
        None => "NONE",
        /// All attributes as they appeared before the operation.
        AllOld => "ALL_OLD",
        /// Only the updated attributes as they appeared before the operation.
        UpdatedOld => "UPDATED_OLD",
        /// All attributes as they appear after the operation.
        AllNew => "ALL_NEW",
        /// Only the updated attributes as they appear after the operation.
        UpdatedNew => "UPDATED_NEW",
    }
}

wire_enum! {
    /// Controls whether item collection metrics are returned for writes.
    pub enum ReturnItemCollectionMetrics {
        /// Return item collection size estimates.
        Size => "SIZE",
        /// Do not return item collection metrics.
        None => "NONE",
    }
}

// ---------------------------------------------------------------------------
// Structs - Legacy Condition (for ScanFilter / QueryFilter / KeyConditions)
// ---------------------------------------------------------------------------

/// A per-attribute comparison for legacy `KeyConditions`, `QueryFilter` and
/// `ScanFilter` maps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Condition {
    /// The comparison operator.
    pub comparison_operator: ComparisonOperator,
    /// The operands, in order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute_value_list: Option<Vec<AttributeValue>>,
}

impl Condition {
    /// Start building a condition for `comparison_operator`.
    ///
    /// ```
    /// use dynawire_model::AttributeValue;
    /// use dynawire_model::types::{ComparisonOperator, Condition};
    ///
    /// let cond = Condition::builder(ComparisonOperator::BeginsWith)
    ///     .attribute_value_list([AttributeValue::S("2024-".to_owned())])
    ///     .build();
    /// assert_eq!(cond.attribute_value_list.map(|l| l.len()), Some(1));
    /// ```
    #[must_use]
    pub fn builder(comparison_operator: impl Into<ComparisonOperator>) -> ConditionBuilder {
        ConditionBuilder {
            inner: Self {
                comparison_operator: comparison_operator.into(),
                attribute_value_list: None,
            },
        }
    }
}

/// Builder for [`Condition`].
#[derive(Debug, Clone)]
pub struct ConditionBuilder {
    inner: Condition,
}

impl ConditionBuilder {
    /// Replace the comparison operator.
    #[must_use]
    pub fn comparison_operator(mut self, op: impl Into<ComparisonOperator>) -> Self {
        self.inner.comparison_operator = op.into();
        self
    }

    /// Append operands to the list.
    #[must_use]
    pub fn attribute_value_list(mut self, values: impl IntoIterator<Item = AttributeValue>) -> Self {
        append_items(&mut self.inner.attribute_value_list, values);
        self
    }

    /// Replace the operand list.
    #[must_use]
    pub fn set_attribute_value_list(mut self, values: Option<Vec<AttributeValue>>) -> Self {
        self.inner.attribute_value_list = values;
        self
    }

    /// Finish building.
    #[must_use]
    pub fn build(self) -> Condition {
        self.inner
    }
}

// ---------------------------------------------------------------------------
// Structs - Legacy Conditional Writes
// ---------------------------------------------------------------------------

/// A per-attribute precondition for legacy conditional writes (`Expected`).
///
/// Two usage modes exist: `value` with `exists`, or `comparison_operator`
/// with `attribute_value_list`. Mixing them is accepted here and rejected by
/// the service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExpectedAttributeValue {
    /// The value the attribute must equal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<AttributeValue>,
    /// Whether the attribute must exist (`true`) or must not exist (`false`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exists: Option<bool>,
    /// The comparison operator (extended form).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison_operator: Option<ComparisonOperator>,
    /// The operands for `comparison_operator`, in order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute_value_list: Option<Vec<AttributeValue>>,
}

impl ExpectedAttributeValue {
    /// Start building an empty expectation.
    #[must_use]
    pub fn builder() -> ExpectedAttributeValueBuilder {
        ExpectedAttributeValueBuilder::default()
    }

    /// An expectation that the attribute exists (or not) without comparing
    /// its value.
    #[must_use]
    pub fn existence(exists: bool) -> Self {
        Self {
            exists: Some(exists),
            ..Self::default()
        }
    }

    /// The existence requirement the service applies: `exists` when set,
    /// otherwise `true` when a `value` is given.
    #[must_use]
    pub fn effective_exists(&self) -> Option<bool> {
        self.exists.or(self.value.as_ref().map(|_| true))
    }
}

impl From<AttributeValue> for ExpectedAttributeValue {
    fn from(value: AttributeValue) -> Self {
        Self {
            value: Some(value),
            ..Self::default()
        }
    }
}

/// Builder for [`ExpectedAttributeValue`].
#[derive(Debug, Clone, Default)]
pub struct ExpectedAttributeValueBuilder {
    inner: ExpectedAttributeValue,
}

impl ExpectedAttributeValueBuilder {
    /// Set the value the attribute must equal.
    #[must_use]
    pub fn value(mut self, value: AttributeValue) -> Self {
        self.inner.value = Some(value);
        self
    }

    /// Set the existence requirement.
    #[must_use]
    pub fn exists(mut self, exists: bool) -> Self {
        self.inner.exists = Some(exists);
        self
    }

    /// Set the comparison operator; accepts a typed operator or a raw literal.
    #[must_use]
    pub fn comparison_operator(mut self, op: impl Into<ComparisonOperator>) -> Self {
        self.inner.comparison_operator = Some(op.into());
        self
    }

    /// Append operands to the list.
    #[must_use]
    pub fn attribute_value_list(mut self, values: impl IntoIterator<Item = AttributeValue>) -> Self {
        append_items(&mut self.inner.attribute_value_list, values);
        self
    }

    /// Replace the operand list.
    #[must_use]
    pub fn set_attribute_value_list(mut self, values: Option<Vec<AttributeValue>>) -> Self {
        self.inner.attribute_value_list = values;
        self
    }

    /// Finish building.
    #[must_use]
    pub fn build(self) -> ExpectedAttributeValue {
        self.inner
    }
}

/// An attribute update for the legacy `AttributeUpdates` parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AttributeValueUpdate {
    /// The new value, or the value to add/remove.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<AttributeValue>,
    /// The action to perform on the attribute.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<AttributeAction>,
}

impl AttributeValueUpdate {
    /// An update applying `action` with an optional `value`.
    #[must_use]
    pub fn new(action: impl Into<AttributeAction>, value: Option<AttributeValue>) -> Self {
        Self {
            value,
            action: Some(action.into()),
        }
    }
}

// ---------------------------------------------------------------------------
// Structs - Consumed Capacity
// ---------------------------------------------------------------------------

/// Capacity units consumed by an individual table or index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Capacity {
    /// The total read capacity units consumed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_capacity_units: Option<f64>,
    /// The total write capacity units consumed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub write_capacity_units: Option<f64>,
    /// The total capacity units consumed (read + write).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity_units: Option<f64>,
}

/// Capacity consumed by an operation across the table and its indexes.
///
/// Returned when `ReturnConsumedCapacity` is `TOTAL` or `INDEXES`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ConsumedCapacity {
    /// The name of the table that was affected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_name: Option<String>,
    /// The total capacity units consumed by the operation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity_units: Option<f64>,
    /// The total read capacity units consumed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_capacity_units: Option<f64>,
    /// The total write capacity units consumed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub write_capacity_units: Option<f64>,
    /// The capacity consumed by the table (excluding indexes).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<Capacity>,
    /// The capacity consumed by each local secondary index.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_secondary_indexes: Option<HashMap<String, Capacity>>,
    /// The capacity consumed by each global secondary index.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_secondary_indexes: Option<HashMap<String, Capacity>>,
}

// ---------------------------------------------------------------------------
// Structs - Item Collection Metrics
// ---------------------------------------------------------------------------

/// Size diagnostics for the items sharing one partition key.
///
/// Only returned for tables with local secondary indexes, when
/// `ReturnItemCollectionMetrics` is `SIZE`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ItemCollectionMetrics {
    /// The partition key value of the item collection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_collection_key: Option<Key>,
    /// Lower and upper bound of the collection size estimate, in gigabytes.
    #[serde(
        rename = "SizeEstimateRangeGB",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub size_estimate_range_gb: Option<Vec<f64>>,
}

impl ItemCollectionMetrics {
    /// The `(lower, upper)` size estimate. `None` unless exactly two points
    /// are present.
    #[must_use]
    pub fn size_estimate_range(&self) -> Option<(f64, f64)> {
        match self.size_estimate_range_gb.as_deref() {
            Some(&[lower, upper]) => Some((lower, upper)),
            _ => None,
        }
    }
}
