//! Operation enum and the request/result pairing.

use std::fmt;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Operations modeled by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Query items by key condition.
    Query,
    /// Scan all items in a table or index.
    Scan,
    /// Update (or create) a single item.
    UpdateItem,
}

impl Operation {
    /// Returns the API operation name string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Query => "Query",
            Self::Scan => "Scan",
            Self::UpdateItem => "UpdateItem",
        }
    }

    /// Parse an operation name string into an `Operation`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Query" => Some(Self::Query),
            "Scan" => Some(Self::Scan),
            "UpdateItem" => Some(Self::UpdateItem),
            _ => None,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request body together with the operation it targets and the result it
/// produces.
pub trait Request: Serialize {
    /// The operation this request is sent as.
    const OPERATION: Operation;
    /// The result body the service answers with.
    type Output: DeserializeOwned;
}
