//! Client configuration.
//!
//! Provides [`ClientConfig`] for the codec and [`Client`](crate::client::Client).
//! Values can be loaded from `DYNAWIRE_*` environment variables.

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// Default `X-Amz-Target` prefix of the 2012-08-10 API version.
pub const DEFAULT_TARGET_PREFIX: &str = "DynamoDB_20120810";

/// Content type of the JSON 1.0 protocol.
pub const DEFAULT_CONTENT_TYPE: &str = "application/x-amz-json-1.0";

/// Codec and client configuration.
///
/// # Examples
///
/// ```
/// use dynawire_json::config::ClientConfig;
///
/// let config = ClientConfig::default();
/// assert_eq!(config.target_prefix, "DynamoDB_20120810");
/// assert!(config.verify_checksum);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    /// Prefix of the `X-Amz-Target` header; the operation name is appended
    /// after a `.`.
    #[builder(default = String::from(DEFAULT_TARGET_PREFIX))]
    pub target_prefix: String,

    /// Value of the `Content-Type` header on outgoing requests.
    #[builder(default = String::from(DEFAULT_CONTENT_TYPE))]
    pub content_type: String,

    /// Whether to check the `x-amz-crc32` response header against the body.
    #[builder(default = true)]
    pub verify_checksum: bool,

    /// Whether to emit request and response bodies at `trace` level.
    #[builder(default = false)]
    pub log_payloads: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            target_prefix: String::from(DEFAULT_TARGET_PREFIX),
            content_type: String::from(DEFAULT_CONTENT_TYPE),
            verify_checksum: true,
            log_payloads: false,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `DYNAWIRE_TARGET_PREFIX` | `DynamoDB_20120810` |
    /// | `DYNAWIRE_CONTENT_TYPE` | `application/x-amz-json-1.0` |
    /// | `DYNAWIRE_VERIFY_CHECKSUM` | `true` |
    /// | `DYNAWIRE_LOG_PAYLOADS` | `false` |
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(v) = lookup("DYNAWIRE_TARGET_PREFIX") {
            config.target_prefix = v;
        }
        if let Some(v) = lookup("DYNAWIRE_CONTENT_TYPE") {
            config.content_type = v;
        }
        if let Some(v) = lookup("DYNAWIRE_VERIFY_CHECKSUM") {
            config.verify_checksum = parse_bool(&v);
        }
        if let Some(v) = lookup("DYNAWIRE_LOG_PAYLOADS") {
            config.log_payloads = parse_bool(&v);
        }

        config
    }

    /// The `X-Amz-Target` value for `operation`.
    #[must_use]
    pub fn target_for(&self, operation: &str) -> String {
        format!("{}.{operation}", self.target_prefix)
    }
}

/// Parse a string as a boolean, accepting `"1"` and `"true"` (case-insensitive).
fn parse_bool(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_should_create_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.target_prefix, DEFAULT_TARGET_PREFIX);
        assert_eq!(config.content_type, DEFAULT_CONTENT_TYPE);
        assert!(config.verify_checksum);
        assert!(!config.log_payloads);
        assert_eq!(ClientConfig::builder().build(), config);
    }

    #[test]
    fn test_should_load_from_env() {
        let config = ClientConfig::from_env();
        assert!(!config.target_prefix.is_empty());
    }

    #[test]
    fn test_should_override_from_lookup() {
        let vars = HashMap::from([
            ("DYNAWIRE_TARGET_PREFIX", "DynamoDBStreams_20120810"),
            ("DYNAWIRE_VERIFY_CHECKSUM", "0"),
            ("DYNAWIRE_LOG_PAYLOADS", "TRUE"),
        ]);
        let config = ClientConfig::from_lookup(|name| vars.get(name).map(|v| (*v).to_owned()));
        assert_eq!(config.target_prefix, "DynamoDBStreams_20120810");
        assert_eq!(config.content_type, DEFAULT_CONTENT_TYPE);
        assert!(!config.verify_checksum);
        assert!(config.log_payloads);
    }

    #[test]
    fn test_should_build_with_typed_builder() {
        let config = ClientConfig::builder()
            .target_prefix("Custom_1".into())
            .verify_checksum(false)
            .build();
        assert_eq!(config.target_prefix, "Custom_1");
        assert!(!config.verify_checksum);
        assert_eq!(config.target_for("Query"), "Custom_1.Query");
    }

    #[test]
    fn test_should_serialize_to_camel_case_json() {
        let json = serde_json::to_string(&ClientConfig::default()).unwrap();
        assert!(json.contains("targetPrefix"));
        assert!(json.contains("verifyChecksum"));
    }

    #[test]
    fn test_should_parse_bool_values() {
        assert!(parse_bool("1"));
        assert!(parse_bool("True"));
        assert!(!parse_bool("yes"));
        assert!(!parse_bool(""));
    }
}
