//! JSON 1.0 protocol codec and client seam for the dynawire model.
//!
//! [`codec`] turns model requests into `X-Amz-Target`-addressed JSON bodies and
//! decodes responses, verifying `x-amz-crc32` and mapping error objects to
//! [`ServiceError`]. [`Client`] drives a pluggable [`Transport`]; no transport
//! is bundled.
// "DynamoDB" appears in doc comments throughout.
#![allow(clippy::doc_markdown)]

pub mod client;
pub mod codec;
pub mod config;
pub mod error;

pub use client::{Client, Transport, TransportFuture};
pub use codec::{EncodedRequest, TransportResponse, decode_response, encode_request};
pub use config::ClientConfig;
pub use error::{CodecError, ServiceError, ServiceErrorCode};
