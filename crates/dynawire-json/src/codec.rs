//! JSON 1.0 protocol framing.
//!
//! Requests are `POST`ed with the operation named in `X-Amz-Target`; the body
//! is the request model serialized as JSON. Responses carry the result model,
//! or an error object on a non-2xx status, and optionally an `x-amz-crc32`
//! header over the raw body.

use bytes::Bytes;
use dynawire_model::{Operation, Request};
use tracing::{debug, trace, warn};

use crate::config::ClientConfig;
use crate::error::{CodecError, ServiceError};

/// Header naming the operation.
pub const TARGET_HEADER: &str = "x-amz-target";

/// Header carrying the CRC32 of the response body.
pub const CRC32_HEADER: &str = "x-amz-crc32";

/// A serialized request ready to hand to a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedRequest {
    /// The operation being invoked.
    pub operation: Operation,
    /// The `X-Amz-Target` header value.
    pub target: String,
    /// The `Content-Type` header value.
    pub content_type: String,
    /// The JSON body.
    pub body: Bytes,
}

impl EncodedRequest {
    /// Build a `POST` request to `uri` with the protocol headers set.
    pub fn into_http_request<U>(self, uri: U) -> Result<http::Request<Bytes>, CodecError>
    where
        http::Uri: TryFrom<U>,
        <http::Uri as TryFrom<U>>::Error: Into<http::Error>,
    {
        let request = http::Request::builder()
            .method(http::Method::POST)
            .uri(uri)
            .header(TARGET_HEADER, self.target)
            .header(http::header::CONTENT_TYPE, self.content_type)
            .body(self.body)?;
        Ok(request)
    }
}

/// A raw response as returned by a transport.
#[derive(Debug, Clone, Default)]
pub struct TransportResponse {
    /// The HTTP status.
    pub status: http::StatusCode,
    /// The response headers.
    pub headers: http::HeaderMap,
    /// The raw body.
    pub body: Bytes,
}

impl From<http::Response<Bytes>> for TransportResponse {
    fn from(response: http::Response<Bytes>) -> Self {
        let (parts, body) = response.into_parts();
        Self {
            status: parts.status,
            headers: parts.headers,
            body,
        }
    }
}

/// Serialize `request` into its wire form.
pub fn encode_request<R: Request>(
    config: &ClientConfig,
    request: &R,
) -> Result<EncodedRequest, CodecError> {
    let operation = R::OPERATION;
    let body = serde_json::to_vec(request).map_err(CodecError::Serialize)?;
    let target = config.target_for(operation.as_str());

    debug!(operation = %operation, target = %target, body_len = body.len(), "encoded request");
    if config.log_payloads {
        trace!(operation = %operation, body = %String::from_utf8_lossy(&body), "request body");
    }

    Ok(EncodedRequest {
        operation,
        target,
        content_type: config.content_type.clone(),
        body: Bytes::from(body),
    })
}

/// Decode a response to `R`'s result type.
///
/// The checksum is verified first when enabled and present. A non-2xx status
/// becomes [`CodecError::Service`].
pub fn decode_response<R: Request>(
    config: &ClientConfig,
    response: &TransportResponse,
) -> Result<R::Output, CodecError> {
    let operation = R::OPERATION;

    if config.log_payloads {
        trace!(
            operation = %operation,
            status = %response.status,
            body = %String::from_utf8_lossy(&response.body),
            "response body"
        );
    }

    if config.verify_checksum {
        verify_crc32(operation, response)?;
    }

    if !response.status.is_success() {
        let err = ServiceError::from_response(response.status, &response.body);
        debug!(
            operation = %operation,
            status = %err.status_code,
            code = %err.code,
            message = %err.message,
            "service returned an error"
        );
        return Err(CodecError::Service(err));
    }

    serde_json::from_slice(&response.body).map_err(CodecError::Deserialize)
}

fn verify_crc32(operation: Operation, response: &TransportResponse) -> Result<(), CodecError> {
    let Some(header) = response.headers.get(CRC32_HEADER) else {
        return Ok(());
    };
    let Some(expected) = header.to_str().ok().and_then(|v| v.trim().parse::<u32>().ok()) else {
        warn!(operation = %operation, header = ?header, "ignoring unparsable crc32 header");
        return Ok(());
    };
    let actual = crc32fast::hash(&response.body);
    if actual != expected {
        warn!(operation = %operation, expected, actual, "response checksum mismatch");
        return Err(CodecError::ChecksumMismatch { expected, actual });
    }
    Ok(())
}
