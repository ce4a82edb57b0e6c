//! Serde types for the viewer-request event and the request descriptor.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Header map: lower-cased header name → header records.
///
/// The edge protocol allows several records per name; the promoter always writes one.
pub type Headers = BTreeMap<String, Vec<HeaderRecord>>;

/// A single header record as carried by the edge protocol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderRecord {
    /// Header name in its original case.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    pub value: String,
}

impl HeaderRecord {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            value: value.into(),
        }
    }
}

/// The event delivered to the hook at the viewer-request stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewerRequestEvent {
    #[serde(rename = "Records", default)]
    pub records: Vec<EventRecord>,
}

impl ViewerRequestEvent {
    /// Wrap a single request in an event envelope.
    pub fn from_request(request: CfRequest) -> Self {
        Self {
            records: vec![EventRecord {
                cf: CfPayload {
                    config: None,
                    request,
                },
            }],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub cf: CfPayload,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CfPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<CfConfig>,

    pub request: CfRequest,
}

/// Distribution metadata attached to every record.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CfConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distribution_domain_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distribution_id: Option<String>,

    /// `viewer-request` or `origin-request`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

/// Request descriptor handed to the hook and returned to the edge.
///
/// Only `headers` and `querystring` are rewritten. Every other field, typed or
/// not, is serialized back exactly as received.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CfRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_ip: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,

    /// URL-encoded query string without the leading `?`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub querystring: Option<String>,

    #[serde(default)]
    pub headers: Headers,

    /// Remaining protocol fields (`origin`, `body`, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CfRequest {
    /// Build a bare request with only a query string, mostly useful in tests and the CLI.
    pub fn with_querystring(querystring: impl Into<String>) -> Self {
        Self {
            querystring: Some(querystring.into()),
            ..Self::default()
        }
    }

    /// Replace any records stored for `name` with a single record.
    ///
    /// The map entry is indexed by the lower-cased name while the record keeps
    /// `name` as given.
    pub fn set_header(&mut self, name: &str, value: impl Into<String>) {
        self.headers
            .insert(name.to_ascii_lowercase(), vec![HeaderRecord::new(name, value)]);
    }

    /// First value stored for `name` (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .and_then(|records| records.first())
            .map(|record| record.value.as_str())
    }
}
