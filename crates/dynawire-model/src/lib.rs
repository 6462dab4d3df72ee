//! Typed request and result model for the DynamoDB JSON API.
//!
//! The types here serialize to exactly the bodies the service exchanges over
//! `application/x-amz-json-1.0`: PascalCase field names, attribute values as
//! single-key tagged objects, absent fields omitted. Nothing is validated
//! beyond what the builders need to keep maps free of duplicate keys; the
//! service remains the authority on semantic correctness.
// "DynamoDB" appears in virtually every doc comment in this crate.
#![allow(clippy::doc_markdown)]

pub mod attribute_value;
pub mod entries;
pub mod error;
pub mod input;
pub mod operations;
pub mod output;
pub mod types;

pub use attribute_value::AttributeValue;
pub use entries::{KeyEntry, key_from_entries};
pub use error::{BuildResult, ModelError, ModelResult, Rejected};
pub use input::{QueryRequest, ScanRequest, UpdateItemRequest};
pub use operations::{Operation, Request};
pub use output::{QueryResult, ScanResult, UpdateItemResult};
