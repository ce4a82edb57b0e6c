//! Invocation entry point.
//!
//! Takes the first record of an edge event, runs the promoter over its request,
//! and hands back only the request. That return value is what continues
//! toward the origin.

use std::time::Instant;

use thiserror::Error;

use crate::event::{CfRequest, ViewerRequestEvent};
use crate::mapping::MappingTable;
use crate::observability::metrics;
use crate::transform::promote_query_params;

/// Failures that abort an invocation. The edge does not forward the request.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("event contains no records")]
    MissingRecord,

    #[error("invalid event payload: {0}")]
    InvalidEvent(#[from] serde_json::Error),
}

impl HandlerError {
    /// Short error type name reported back to the runtime.
    pub fn error_type(&self) -> &'static str {
        match self {
            HandlerError::MissingRecord => "MissingRecord",
            HandlerError::InvalidEvent(_) => "InvalidEvent",
        }
    }
}

/// Run the promoter over `Records[0].cf.request` and return that request.
pub fn handle_event(
    mapping: &MappingTable,
    event: ViewerRequestEvent,
) -> Result<CfRequest, HandlerError> {
    let start = Instant::now();
    let Some(record) = event.records.into_iter().next() else {
        metrics::record_failure("MissingRecord");
        return Err(HandlerError::MissingRecord);
    };
    let mut request = record.cf.request;

    tracing::debug!(
        headers = ?request.headers,
        querystring = ?request.querystring,
        "Before processing"
    );

    let promotion = promote_query_params(mapping, &mut request);

    tracing::debug!(
        headers = ?request.headers,
        querystring = ?request.querystring,
        promoted = promotion.promoted(),
        "After processing"
    );

    metrics::record_invocation(promotion, start);
    Ok(request)
}

/// Decode a raw JSON event and handle it.
pub fn handle_json(mapping: &MappingTable, payload: &[u8]) -> Result<CfRequest, HandlerError> {
    let event = serde_json::from_slice::<ViewerRequestEvent>(payload).inspect_err(|_| {
        metrics::record_failure("InvalidEvent");
    })?;
    handle_event(mapping, event)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn mapping() -> MappingTable {
        MappingTable::from_pairs([("auth", "X-Auth-Token")])
    }

    #[test]
    fn test_returns_request_only() {
        let payload = json!({
            "Records": [{
                "cf": {
                    "config": { "eventType": "viewer-request" },
                    "request": {
                        "clientIp": "203.0.113.178",
                        "method": "GET",
                        "uri": "/index.html",
                        "querystring": "auth=abc123&foo=bar",
                        "headers": {
                            "host": [{ "key": "Host", "value": "example.org" }]
                        }
                    }
                }
            }]
        });

        let request = handle_json(&mapping(), payload.to_string().as_bytes()).unwrap();
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "clientIp": "203.0.113.178",
                "method": "GET",
                "uri": "/index.html",
                "querystring": "foo=bar",
                "headers": {
                    "host": [{ "key": "Host", "value": "example.org" }],
                    "x-auth-token": [{ "key": "X-Auth-Token", "value": "abc123" }]
                }
            })
        );
    }

    #[test]
    fn test_only_first_record_is_handled() {
        let mut event = ViewerRequestEvent::from_request(CfRequest::with_querystring("auth=one"));
        event
            .records
            .extend(ViewerRequestEvent::from_request(CfRequest::with_querystring("auth=two")).records);

        let request = handle_event(&mapping(), event).unwrap();
        assert_eq!(request.header("x-auth-token"), Some("one"));
    }

    #[test]
    fn test_empty_records_fail() {
        let err = handle_json(&mapping(), br#"{"Records": []}"#).unwrap_err();
        assert!(matches!(err, HandlerError::MissingRecord));
        assert_eq!(err.error_type(), "MissingRecord");
    }

    #[test]
    fn test_invalid_json_fails() {
        let err = handle_json(&mapping(), b"not json").unwrap_err();
        assert_eq!(err.error_type(), "InvalidEvent");
    }

    #[test]
    fn test_record_without_request_fails() {
        let err = handle_json(&mapping(), br#"{"Records": [{"cf": {}}]}"#).unwrap_err();
        assert!(matches!(err, HandlerError::InvalidEvent(_)));
    }
}
