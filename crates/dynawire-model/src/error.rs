//! Model error types.
//!
//! Every error here is raised synchronously while a request or result value
//! is being constructed. None of them are retryable.

use std::fmt;

/// Errors raised while constructing model values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// A strict vocabulary lookup received a literal outside the closed set.
    #[error("unrecognized {kind} value: {value:?}")]
    UnrecognizedValue {
        /// The vocabulary name (e.g. `Select`).
        kind: &'static str,
        /// The rejected literal. Empty when the input was absent.
        value: String,
    },

    /// An insert-only map accumulation received a key that is already present.
    #[error("duplicated key ({key}) for {field}")]
    DuplicateKey {
        /// The wire name of the map field.
        field: &'static str,
        /// The rejected key.
        key: String,
    },

    /// A primary key cursor was built without its hash key entry.
    #[error("hash key entry is required to build {field}")]
    MissingHashKey {
        /// The wire name of the key field being built.
        field: &'static str,
    },
}

impl ModelError {
    /// Create an [`ModelError::UnrecognizedValue`] for the given vocabulary.
    #[must_use]
    pub fn unrecognized(kind: &'static str, value: Option<&str>) -> Self {
        Self::UnrecognizedValue {
            kind,
            value: value.unwrap_or_default().to_owned(),
        }
    }
}

/// Convenience result type for model construction.
pub type ModelResult<T> = Result<T, ModelError>;

/// A builder call that was refused, handing the builder back untouched.
///
/// Converts into [`ModelError`], so `?` works in functions returning
/// [`ModelResult`].
pub struct Rejected<B> {
    builder: B,
    error: ModelError,
}

impl<B> Rejected<B> {
    pub(crate) fn new(builder: B, error: ModelError) -> Self {
        Self { builder, error }
    }

    /// The reason the call was refused.
    #[must_use]
    pub fn error(&self) -> &ModelError {
        &self.error
    }

    /// Recover the builder as it was before the refused call.
    #[must_use]
    pub fn into_builder(self) -> B {
        self.builder
    }

    /// Split into the builder and the error.
    #[must_use]
    pub fn into_parts(self) -> (B, ModelError) {
        (self.builder, self.error)
    }
}

impl<B> fmt::Debug for Rejected<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rejected").field("error", &self.error).finish_non_exhaustive()
    }
}

impl<B> fmt::Display for Rejected<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.error, f)
    }
}

impl<B> std::error::Error for Rejected<B> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

impl<B> From<Rejected<B>> for ModelError {
    fn from(rejected: Rejected<B>) -> Self {
        rejected.error
    }
}

/// Result of a builder call that may be refused.
pub type BuildResult<B> = Result<B, Rejected<B>>;
