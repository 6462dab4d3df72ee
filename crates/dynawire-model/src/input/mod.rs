//! Request models and their builders.

mod query;
mod scan;
mod update_item;

pub use query::{QueryRequest, QueryRequestBuilder};
pub use scan::{ScanRequest, ScanRequestBuilder};
pub use update_item::{UpdateItemRequest, UpdateItemRequestBuilder};
