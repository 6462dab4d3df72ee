//! Client and the transport seam it sends through.

use std::future::Future;
use std::pin::Pin;

use dynawire_model::{
    QueryRequest, QueryResult, Request, ScanRequest, ScanResult, UpdateItemRequest,
    UpdateItemResult,
};

use crate::codec::{self, EncodedRequest, TransportResponse};
use crate::config::ClientConfig;
use crate::error::CodecError;

/// Boxed future returned by [`Transport::send`].
pub type TransportFuture =
    Pin<Box<dyn Future<Output = Result<TransportResponse, anyhow::Error>> + Send>>;

/// Delivers an encoded request and hands back the raw response.
///
/// Implementations own connection handling, signing and endpoint selection.
/// A non-2xx response is still `Ok`; only delivery failures are errors.
pub trait Transport: Send + Sync + 'static {
    /// Send one request.
    fn send(&self, request: EncodedRequest) -> TransportFuture;
}

/// Typed client over a [`Transport`].
///
/// Each call encodes the request, sends it once and decodes the response.
#[derive(Debug, Clone)]
pub struct Client<T> {
    transport: T,
    config: ClientConfig,
}

impl<T: Transport> Client<T> {
    /// Create a client.
    #[must_use]
    pub fn new(transport: T, config: ClientConfig) -> Self {
        Self { transport, config }
    }

    /// The client configuration.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The underlying transport.
    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Run a `Query`.
    pub async fn query(&self, request: &QueryRequest) -> Result<QueryResult, CodecError> {
        self.execute(request).await
    }

    /// Run a `Scan`.
    pub async fn scan(&self, request: &ScanRequest) -> Result<ScanResult, CodecError> {
        self.execute(request).await
    }

    /// Run an `UpdateItem`.
    pub async fn update_item(
        &self,
        request: &UpdateItemRequest,
    ) -> Result<UpdateItemResult, CodecError> {
        self.execute(request).await
    }

    /// Run any modeled request.
    pub async fn execute<R: Request>(&self, request: &R) -> Result<R::Output, CodecError> {
        let encoded = codec::encode_request(&self.config, request)?;
        tracing::debug!(
            operation = %encoded.operation,
            target = %encoded.target,
            "dispatching request"
        );
        let response = self
            .transport
            .send(encoded)
            .await
            .map_err(CodecError::Transport)?;
        codec::decode_response::<R>(&self.config, &response)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, VecDeque};
    use std::sync::{Arc, Mutex};

    use bytes::Bytes;
    use dynawire_model::{AttributeValue, Operation};

    use super::*;
    use crate::codec::CRC32_HEADER;
    use crate::error::ServiceErrorCode;

    #[derive(Debug, Clone, Default)]
    struct MockTransport {
        responses: Arc<Mutex<VecDeque<TransportResponse>>>,
        sent: Arc<Mutex<Vec<EncodedRequest>>>,
    }

    impl MockTransport {
        fn reply(self, status: http::StatusCode, body: &'static str) -> Self {
            let mut headers = http::HeaderMap::new();
            headers.insert(
                CRC32_HEADER,
                http::HeaderValue::from(crc32fast::hash(body.as_bytes())),
            );
            self.responses.lock().unwrap().push_back(TransportResponse {
                status,
                headers,
                body: Bytes::from_static(body.as_bytes()),
            });
            self
        }

        fn sent(&self) -> Vec<EncodedRequest> {
            self.sent.lock().unwrap().clone()
        }
    }

    impl Transport for MockTransport {
        fn send(&self, request: EncodedRequest) -> TransportFuture {
            self.sent.lock().unwrap().push(request);
            let next = self.responses.lock().unwrap().pop_front();
            Box::pin(async move { next.ok_or_else(|| anyhow::anyhow!("connection refused")) })
        }
    }

    #[tokio::test]
    async fn test_should_page_through_query() {
        let transport = MockTransport::default()
            .reply(
                http::StatusCode::OK,
                r#"{"Items":[{"pk":{"S":"123"},"sk":{"N":"1"}}],"Count":1,"ScannedCount":1,"LastEvaluatedKey":{"pk":{"S":"123"},"sk":{"N":"1"}}}"#,
            )
            .reply(
                http::StatusCode::OK,
                r#"{"Items":[{"pk":{"S":"123"},"sk":{"N":"2"}}],"Count":1,"ScannedCount":1}"#,
            );
        let client = Client::new(transport.clone(), ClientConfig::default());

        let mut request = QueryRequest::builder("Orders")
            .key_condition_expression("pk = :v")
            .add_expression_attribute_values_entry(":v", AttributeValue::from("123"))
            .unwrap()
            .limit(1)
            .build();
        let mut items = Vec::new();
        loop {
            let page = client.query(&request).await.unwrap();
            items.extend(page.items.clone().unwrap_or_default());
            match request.next_page(&page) {
                Some(next) => request = next,
                None => break,
            }
        }

        assert_eq!(items.len(), 2);
        let sent = transport.sent();
        assert_eq!(sent.len(), 2);
        assert!(sent.iter().all(|r| r.target == "DynamoDB_20120810.Query"));
        let second: serde_json::Value = serde_json::from_slice(&sent[1].body).unwrap();
        assert_eq!(second["ExclusiveStartKey"]["sk"]["N"], "1");
    }

    #[tokio::test]
    async fn test_should_surface_conditional_check_failure() {
        let transport = MockTransport::default().reply(
            http::StatusCode::BAD_REQUEST,
            r#"{"__type":"com.amazonaws.dynamodb.v20120810#ConditionalCheckFailedException","message":"The conditional request failed"}"#,
        );
        let client = Client::new(transport, ClientConfig::default());
        let request = UpdateItemRequest::builder("Users")
            .add_key_entry("pk", AttributeValue::from("user-1"))
            .unwrap()
            .update_expression("SET visits = :one")
            .condition_expression("attribute_not_exists(pk)")
            .add_expression_attribute_values_entry(":one", AttributeValue::number(1))
            .unwrap()
            .build();

        let err = client.update_item(&request).await.unwrap_err();
        assert_eq!(
            err.service_error().map(|e| &e.code),
            Some(&ServiceErrorCode::ConditionalCheckFailedException)
        );
    }

    #[tokio::test]
    async fn test_should_return_updated_attributes() {
        let transport = MockTransport::default().reply(
            http::StatusCode::OK,
            r#"{"Attributes":{"visits":{"N":"5"}}}"#,
        );
        let client = Client::new(transport.clone(), ClientConfig::default());
        let request = UpdateItemRequest::builder("Users")
            .add_key_entry("pk", AttributeValue::from("user-1"))
            .unwrap()
            .return_values("UPDATED_NEW")
            .build();

        let result = client.update_item(&request).await.unwrap();
        assert_eq!(
            result.attributes,
            Some(HashMap::from([(
                "visits".to_owned(),
                AttributeValue::N("5".to_owned())
            )]))
        );
        assert_eq!(transport.sent()[0].operation, Operation::UpdateItem);
    }

    #[tokio::test]
    async fn test_should_wrap_transport_failure() {
        let client = Client::new(MockTransport::default(), ClientConfig::default());
        let err = client
            .scan(&ScanRequest::builder("Events").build())
            .await
            .unwrap_err();
        assert!(matches!(err, CodecError::Transport(_)));
        assert!(err.to_string().contains("connection refused"));
    }

    #[tokio::test]
    async fn test_should_execute_generic_request() {
        let transport =
            MockTransport::default().reply(http::StatusCode::OK, r#"{"Count":3,"ScannedCount":10}"#);
        let client = Client::new(transport, ClientConfig::default());
        let result = client
            .execute(&ScanRequest::builder("Events").select("COUNT").build())
            .await
            .unwrap();
        assert_eq!(result.count, Some(3));
        assert_eq!(result.scanned_count, Some(10));
        assert!(client.config().verify_checksum);
    }
}
