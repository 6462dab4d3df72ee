//! Codec and service error types.
//!
//! Service errors arrive as JSON with a `__type` field holding the
//! fully-qualified error type name, e.g.
//! `com.amazonaws.dynamodb.v20120810#ResourceNotFoundException`.

use std::fmt;

use serde::Deserialize;

/// Well-known service error codes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ServiceErrorCode {
    /// Table already exists or is being modified.
    ResourceInUseException,
    /// Table or index not found.
    ResourceNotFoundException,
    /// Condition check failed.
    ConditionalCheckFailedException,
    /// Transaction conflict.
    TransactionConflictException,
    /// Item collection size limit exceeded.
    ItemCollectionSizeLimitExceededException,
    /// Provisioned throughput exceeded.
    ProvisionedThroughputExceededException,
    /// Request limit exceeded.
    RequestLimitExceeded,
    /// Throttled by the service.
    ThrottlingException,
    /// Validation error.
    ValidationException,
    /// Serialization error.
    SerializationException,
    /// Internal server error.
    InternalServerError,
    /// Missing action.
    MissingAction,
    /// Access denied.
    AccessDeniedException,
    /// Unrecognized client or credentials.
    UnrecognizedClientException,
    /// A code this client does not know, kept verbatim.
    Unknown(String),
}

impl ServiceErrorCode {
    /// Returns the short error code string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::ResourceInUseException => "ResourceInUseException",
            Self::ResourceNotFoundException => "ResourceNotFoundException",
            Self::ConditionalCheckFailedException => "ConditionalCheckFailedException",
            Self::TransactionConflictException => "TransactionConflictException",
            Self::ItemCollectionSizeLimitExceededException => {
                "ItemCollectionSizeLimitExceededException"
            }
            Self::ProvisionedThroughputExceededException => {
                "ProvisionedThroughputExceededException"
            }
            Self::RequestLimitExceeded => "RequestLimitExceeded",
            Self::ThrottlingException => "ThrottlingException",
            Self::ValidationException => "ValidationException",
            Self::SerializationException => "SerializationException",
            Self::InternalServerError => "InternalServerError",
            Self::MissingAction => "MissingAction",
            Self::AccessDeniedException => "AccessDeniedException",
            Self::UnrecognizedClientException => "UnrecognizedClientException",
            Self::Unknown(code) => code,
        }
    }

    /// Parse a `__type` value. Anything up to and including the last `#` is
    /// a namespace and is ignored.
    #[must_use]
    pub fn from_type(error_type: &str) -> Self {
        let short = error_type
            .rsplit_once('#')
            .map_or(error_type, |(_, code)| code);
        match short {
            "ResourceInUseException" => Self::ResourceInUseException,
            "ResourceNotFoundException" => Self::ResourceNotFoundException,
            "ConditionalCheckFailedException" => Self::ConditionalCheckFailedException,
            "TransactionConflictException" => Self::TransactionConflictException,
            "ItemCollectionSizeLimitExceededException" => {
                Self::ItemCollectionSizeLimitExceededException
            }
            "ProvisionedThroughputExceededException" => {
                Self::ProvisionedThroughputExceededException
            }
            "RequestLimitExceeded" => Self::RequestLimitExceeded,
            "ThrottlingException" => Self::ThrottlingException,
            "ValidationException" => Self::ValidationException,
            "SerializationException" => Self::SerializationException,
            "InternalServerError" => Self::InternalServerError,
            "MissingAction" => Self::MissingAction,
            "AccessDeniedException" => Self::AccessDeniedException,
            "UnrecognizedClientException" => Self::UnrecognizedClientException,
            other => Self::Unknown(other.to_owned()),
        }
    }

    /// Returns `true` for throttling-class errors a caller may choose to
    /// retry.
    #[must_use]
    pub fn is_throttling(&self) -> bool {
        matches!(
            self,
            Self::ProvisionedThroughputExceededException
                | Self::RequestLimitExceeded
                | Self::ThrottlingException
        )
    }
}

impl fmt::Display for ServiceErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An error reported by the service in a non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{code} ({status_code}): {message}")]
pub struct ServiceError {
    /// The error code.
    pub code: ServiceErrorCode,
    /// A human-readable error message. Empty if the body carried none.
    pub message: String,
    /// The HTTP status code of the response.
    pub status_code: http::StatusCode,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(rename = "__type")]
    error_type: Option<String>,
    #[serde(alias = "Message")]
    message: Option<String>,
}

impl ServiceError {
    /// Build a service error from a response status and body.
    ///
    /// A body that is not a JSON error object still yields an error: the code
    /// falls back to `Unknown` with the status reason and the raw body becomes
    /// the message.
    #[must_use]
    pub fn from_response(status_code: http::StatusCode, body: &[u8]) -> Self {
        match serde_json::from_slice::<ErrorBody>(body) {
            Ok(parsed) => Self {
                code: parsed.error_type.as_deref().map_or_else(
                    || Self::fallback_code(status_code),
                    ServiceErrorCode::from_type,
                ),
                message: parsed.message.unwrap_or_default(),
                status_code,
            },
            Err(_) => Self {
                code: Self::fallback_code(status_code),
                message: String::from_utf8_lossy(body).into_owned(),
                status_code,
            },
        }
    }

    fn fallback_code(status_code: http::StatusCode) -> ServiceErrorCode {
        ServiceErrorCode::Unknown(
            status_code
                .canonical_reason()
                .unwrap_or("UnknownError")
                .to_owned(),
        )
    }
}

/// Errors produced while encoding a request or decoding a response.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The request body could not be serialized.
    #[error("failed to serialize request: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The response body could not be deserialized.
    #[error("failed to deserialize response: {0}")]
    Deserialize(#[source] serde_json::Error),

    /// The `x-amz-crc32` header did not match the body.
    #[error("response checksum mismatch: header {expected}, body {actual}")]
    ChecksumMismatch {
        /// The checksum announced by the header.
        expected: u32,
        /// The checksum computed over the body.
        actual: u32,
    },

    /// The service answered with an error.
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// The transport failed to deliver the request.
    #[error("transport error: {0}")]
    Transport(#[source] anyhow::Error),

    /// An HTTP request could not be assembled.
    #[error(transparent)]
    Http(#[from] http::Error),
}

impl CodecError {
    /// The service error, if the failure came from the service.
    #[must_use]
    pub fn service_error(&self) -> Option<&ServiceError> {
        match self {
            Self::Service(err) => Some(err),
            _ => None,
        }
    }
}
