//! Inbound invocation envelopes.
//!
//! The gateway delivers one of two JSON shapes:
//!
//! - **v1**: method and path at the top level (`httpMethod`, `path`), query
//!   parameters as a flat `queryStringParameters` object.
//! - **v2**: `"version": "2.0"`, method nested under `requestContext.http`,
//!   pre-encoded `rawPath`/`rawQueryString`, cookies in a separate list.
//!
//! Both shapes are read through a single flat wire struct and then split into
//! [`InvocationEvent::V1`] or [`InvocationEvent::V2`] on the `version` field.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Discriminator value selecting the v2 shape.
pub const VERSION_2: &str = "2.0";

/// Envelope schema version.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EventVersion {
    /// Top-level method/path, flat query parameters.
    #[default]
    V1,
    /// Nested request context, raw path and query, cookie list.
    V2,
}

impl EventVersion {
    /// Classify a `version` discriminator.
    ///
    /// Only the literal `"2.0"` selects v2. Absence or any other value is v1.
    pub fn from_discriminator(version: Option<&str>) -> Self {
        match version {
            Some(VERSION_2) => EventVersion::V2,
            _ => EventVersion::V1,
        }
    }

    /// Get the string representation of this version.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventVersion::V1 => "1.0",
            EventVersion::V2 => VERSION_2,
        }
    }
}

/// `requestContext.http` of a v2 event.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HttpDescription {
    #[serde(deserialize_with = "null_default")]
    pub method: String,
    #[serde(deserialize_with = "null_default")]
    pub path: String,
    #[serde(deserialize_with = "null_default")]
    pub protocol: String,
    #[serde(deserialize_with = "null_default")]
    pub source_ip: String,
    #[serde(deserialize_with = "null_default")]
    pub user_agent: String,
}

/// Request context metadata attached to an event.
///
/// v1 events carry a differently shaped context; fields that do not apply are
/// left empty and unknown fields are ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RequestContext {
    #[serde(deserialize_with = "null_default")]
    pub account_id: String,
    #[serde(deserialize_with = "null_default")]
    pub api_id: String,
    #[serde(deserialize_with = "null_default")]
    pub domain_name: String,
    #[serde(deserialize_with = "null_default")]
    pub domain_prefix: String,
    #[serde(deserialize_with = "null_default")]
    pub http: HttpDescription,
    #[serde(
        deserialize_with = "null_default",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub query_string_parameters: BTreeMap<String, String>,
    #[serde(deserialize_with = "null_default")]
    pub request_id: String,
    #[serde(deserialize_with = "null_default")]
    pub route_key: String,
    #[serde(deserialize_with = "null_default")]
    pub stage: String,
    #[serde(deserialize_with = "null_default")]
    pub time: String,
    #[serde(deserialize_with = "null_default")]
    pub time_epoch: i64,
}

/// A v1 invocation event.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventV1 {
    /// Discriminator as received (anything except `"2.0"`).
    pub version: Option<String>,
    pub http_method: String,
    pub path: String,
    pub query_string_parameters: BTreeMap<String, String>,
    pub headers: BTreeMap<String, String>,
    pub request_context: RequestContext,
    pub stage_variables: BTreeMap<String, String>,
    pub body: String,
    pub is_base64_encoded: bool,
}

/// A v2 invocation event.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventV2 {
    pub route_key: String,
    pub raw_path: String,
    pub raw_query_string: String,
    pub cookies: Vec<String>,
    pub headers: BTreeMap<String, String>,
    pub request_context: RequestContext,
    pub stage_variables: BTreeMap<String, String>,
    pub body: String,
    pub is_base64_encoded: bool,
}

/// One gateway invocation, in either envelope shape.
///
/// Deserializes from (and serializes back to) the gateway's JSON field names.
///
/// # Example
///
/// ```
/// use gateway_bridge_core::{EventVersion, InvocationEvent};
///
/// let event: InvocationEvent =
///     serde_json::from_str(r#"{"version":"2.0","rawPath":"/abc"}"#).unwrap();
/// assert_eq!(event.version(), EventVersion::V2);
///
/// let event: InvocationEvent =
///     serde_json::from_str(r#"{"httpMethod":"GET","path":"/abc"}"#).unwrap();
/// assert_eq!(event.version(), EventVersion::V1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "WireEvent", into = "WireEvent")]
pub enum InvocationEvent {
    V1(EventV1),
    V2(EventV2),
}

impl InvocationEvent {
    /// Get the envelope schema version of this event.
    pub fn version(&self) -> EventVersion {
        match self {
            InvocationEvent::V1(_) => EventVersion::V1,
            InvocationEvent::V2(_) => EventVersion::V2,
        }
    }

    /// Get the flat header map of this event.
    pub fn headers(&self) -> &BTreeMap<String, String> {
        match self {
            InvocationEvent::V1(event) => &event.headers,
            InvocationEvent::V2(event) => &event.headers,
        }
    }

    /// Get the request context of this event.
    pub fn request_context(&self) -> &RequestContext {
        match self {
            InvocationEvent::V1(event) => &event.request_context,
            InvocationEvent::V2(event) => &event.request_context,
        }
    }
}

impl From<EventV1> for InvocationEvent {
    fn from(event: EventV1) -> Self {
        InvocationEvent::V1(event)
    }
}

impl From<EventV2> for InvocationEvent {
    fn from(event: EventV2) -> Self {
        InvocationEvent::V2(event)
    }
}

// ============================================================================
// Wire representation
// ============================================================================

/// Union of both shapes, exactly as the gateway spells the fields.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct WireEvent {
    #[serde(deserialize_with = "null_default", skip_serializing_if = "Vec::is_empty")]
    cookies: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<String>,
    #[serde(deserialize_with = "null_default", skip_serializing_if = "String::is_empty")]
    route_key: String,
    #[serde(deserialize_with = "null_default", skip_serializing_if = "String::is_empty")]
    raw_path: String,
    #[serde(deserialize_with = "null_default", skip_serializing_if = "String::is_empty")]
    raw_query_string: String,
    #[serde(
        deserialize_with = "null_default",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    headers: BTreeMap<String, String>,
    #[serde(deserialize_with = "null_default")]
    request_context: RequestContext,
    #[serde(
        deserialize_with = "null_default",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    stage_variables: BTreeMap<String, String>,
    #[serde(deserialize_with = "null_default", skip_serializing_if = "String::is_empty")]
    body: String,
    #[serde(deserialize_with = "null_default", skip_serializing_if = "is_false")]
    is_base64_encoded: bool,

    // v1 fields
    #[serde(deserialize_with = "null_default", skip_serializing_if = "String::is_empty")]
    http_method: String,
    #[serde(deserialize_with = "null_default", skip_serializing_if = "String::is_empty")]
    path: String,
    #[serde(
        deserialize_with = "null_default",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    query_string_parameters: BTreeMap<String, String>,
}

impl From<WireEvent> for InvocationEvent {
    fn from(wire: WireEvent) -> Self {
        match EventVersion::from_discriminator(wire.version.as_deref()) {
            EventVersion::V2 => InvocationEvent::V2(EventV2 {
                route_key: wire.route_key,
                raw_path: wire.raw_path,
                raw_query_string: wire.raw_query_string,
                cookies: wire.cookies,
                headers: wire.headers,
                request_context: wire.request_context,
                stage_variables: wire.stage_variables,
                body: wire.body,
                is_base64_encoded: wire.is_base64_encoded,
            }),
            EventVersion::V1 => InvocationEvent::V1(EventV1 {
                version: wire.version,
                http_method: wire.http_method,
                path: wire.path,
                query_string_parameters: wire.query_string_parameters,
                headers: wire.headers,
                request_context: wire.request_context,
                stage_variables: wire.stage_variables,
                body: wire.body,
                is_base64_encoded: wire.is_base64_encoded,
            }),
        }
    }
}

impl From<InvocationEvent> for WireEvent {
    fn from(event: InvocationEvent) -> Self {
        match event {
            InvocationEvent::V1(event) => WireEvent {
                version: event.version,
                http_method: event.http_method,
                path: event.path,
                query_string_parameters: event.query_string_parameters,
                headers: event.headers,
                request_context: event.request_context,
                stage_variables: event.stage_variables,
                body: event.body,
                is_base64_encoded: event.is_base64_encoded,
                ..Default::default()
            },
            InvocationEvent::V2(event) => WireEvent {
                version: Some(VERSION_2.to_string()),
                route_key: event.route_key,
                raw_path: event.raw_path,
                raw_query_string: event.raw_query_string,
                cookies: event.cookies,
                headers: event.headers,
                request_context: event.request_context,
                stage_variables: event.stage_variables,
                body: event.body,
                is_base64_encoded: event.is_base64_encoded,
                ..Default::default()
            },
        }
    }
}

/// Treat an explicit JSON `null` the same as a missing field.
fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

pub(crate) fn is_false(value: &bool) -> bool {
    !*value
}
