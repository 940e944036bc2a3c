//! OTLP/JSON encoding of exported spans.
//!
//! Each exported batch becomes one `ExportTraceServiceRequest` document, so a
//! trace file is a sequence of JSON lines any OTLP/JSON reader can ingest.
//! IDs are lowercase hex and timestamps are decimal strings of nanoseconds,
//! as the OTLP/JSON mapping requires.

use std::time::{SystemTime, UNIX_EPOCH};

use opentelemetry::trace::{SpanId, SpanKind, Status};
use opentelemetry::{Array, KeyValue, Value};
use opentelemetry_sdk::export::trace::SpanData;
use opentelemetry_sdk::resource::Resource;
use serde::Serialize;

/// Instrumentation scope name written for every span.
pub const SCOPE_NAME: &str = "bookdesk";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportTraceRequest {
    pub resource_spans: Vec<ResourceSpans>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceSpans {
    pub resource: OtlpResource,
    pub scope_spans: Vec<ScopeSpans>,
}

#[derive(Debug, Serialize)]
pub struct OtlpResource {
    pub attributes: Vec<Attribute>,
}

#[derive(Debug, Serialize)]
pub struct ScopeSpans {
    pub scope: Scope,
    pub spans: Vec<OtlpSpan>,
}

#[derive(Debug, Serialize)]
pub struct Scope {
    pub name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OtlpSpan {
    pub trace_id: String,
    pub span_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub parent_span_id: String,
    pub name: String,
    pub kind: u8,
    pub start_time_unix_nano: String,
    pub end_time_unix_nano: String,
    pub attributes: Vec<Attribute>,
    pub events: Vec<OtlpEvent>,
    pub links: Vec<OtlpLink>,
    pub status: OtlpStatus,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OtlpEvent {
    pub time_unix_nano: String,
    pub name: String,
    pub attributes: Vec<Attribute>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OtlpLink {
    pub trace_id: String,
    pub span_id: String,
    pub attributes: Vec<Attribute>,
}

/// Status code: 0 unset, 1 ok, 2 error.
#[derive(Debug, Serialize)]
pub struct OtlpStatus {
    pub code: u8,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attribute {
    pub key: String,
    pub value: AnyValue,
}

/// OTLP `AnyValue`. 64-bit integers travel as strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AnyValue {
    BoolValue(bool),
    IntValue(String),
    DoubleValue(f64),
    StringValue(String),
    ArrayValue(ArrayValue),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrayValue {
    pub values: Vec<AnyValue>,
}

impl From<&Value> for AnyValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Bool(b) => Self::BoolValue(*b),
            Value::I64(i) => Self::IntValue(i.to_string()),
            Value::F64(f) => Self::DoubleValue(*f),
            Value::String(s) => Self::StringValue(s.to_string()),
            Value::Array(array) => Self::ArrayValue(ArrayValue::from(array)),
        }
    }
}

impl From<&Array> for ArrayValue {
    #[allow(unreachable_patterns)]
    fn from(array: &Array) -> Self {
        let values = match array {
            Array::Bool(v) => v.iter().map(|b| AnyValue::BoolValue(*b)).collect(),
            Array::I64(v) => v.iter().map(|i| AnyValue::IntValue(i.to_string())).collect(),
            Array::F64(v) => v.iter().map(|f| AnyValue::DoubleValue(*f)).collect(),
            Array::String(v) => v.iter().map(|s| AnyValue::StringValue(s.to_string())).collect(),
            other => vec![AnyValue::StringValue(format!("{other:?}"))],
        };
        Self { values }
    }
}

fn attributes<'a>(pairs: impl IntoIterator<Item = &'a KeyValue>) -> Vec<Attribute> {
    pairs
        .into_iter()
        .map(|kv| Attribute {
            key: kv.key.to_string(),
            value: AnyValue::from(&kv.value),
        })
        .collect()
}

/// Nanoseconds since the Unix epoch as a decimal string; pre-epoch is `"0"`.
#[must_use]
pub fn unix_nanos(time: SystemTime) -> String {
    time.duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0)
        .to_string()
}

/// OTLP span kind codes (`SPAN_KIND_INTERNAL` = 1 .. `SPAN_KIND_CONSUMER` = 5).
#[must_use]
pub const fn span_kind_code(kind: &SpanKind) -> u8 {
    match kind {
        SpanKind::Internal => 1,
        SpanKind::Server => 2,
        SpanKind::Client => 3,
        SpanKind::Producer => 4,
        SpanKind::Consumer => 5,
    }
}

fn status(status: &Status) -> OtlpStatus {
    match status {
        Status::Unset => OtlpStatus {
            code: 0,
            message: String::new(),
        },
        Status::Ok => OtlpStatus {
            code: 1,
            message: String::new(),
        },
        Status::Error { description } => OtlpStatus {
            code: 2,
            message: description.to_string(),
        },
    }
}

impl From<&SpanData> for OtlpSpan {
    fn from(span: &SpanData) -> Self {
        let parent_span_id = if span.parent_span_id == SpanId::INVALID {
            String::new()
        } else {
            format!("{:016x}", span.parent_span_id)
        };

        Self {
            trace_id: format!("{:032x}", span.span_context.trace_id()),
            span_id: format!("{:016x}", span.span_context.span_id()),
            parent_span_id,
            name: span.name.to_string(),
            kind: span_kind_code(&span.span_kind),
            start_time_unix_nano: unix_nanos(span.start_time),
            end_time_unix_nano: unix_nanos(span.end_time),
            attributes: attributes(&span.attributes),
            events: span
                .events
                .iter()
                .map(|event| OtlpEvent {
                    time_unix_nano: unix_nanos(event.timestamp),
                    name: event.name.to_string(),
                    attributes: attributes(&event.attributes),
                })
                .collect(),
            links: span
                .links
                .iter()
                .map(|link| OtlpLink {
                    trace_id: format!("{:032x}", link.span_context.trace_id()),
                    span_id: format!("{:016x}", link.span_context.span_id()),
                    attributes: attributes(&link.attributes),
                })
                .collect(),
            status: status(&span.status),
        }
    }
}

/// Builds the request document for one exported batch.
#[must_use]
pub fn export_request(resource: &Resource, batch: &[SpanData]) -> ExportTraceRequest {
    let resource_attributes = resource
        .iter()
        .map(|(key, value)| Attribute {
            key: key.to_string(),
            value: AnyValue::from(value),
        })
        .collect();

    ExportTraceRequest {
        resource_spans: vec![ResourceSpans {
            resource: OtlpResource {
                attributes: resource_attributes,
            },
            scope_spans: vec![ScopeSpans {
                scope: Scope {
                    name: SCOPE_NAME.to_string(),
                },
                spans: batch.iter().map(OtlpSpan::from).collect(),
            }],
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;

    #[test]
    fn values_use_otlp_json_mapping() {
        let encoded = serde_json::to_value(AnyValue::from(&Value::I64(42))).unwrap();
        assert_eq!(encoded, json!({ "intValue": "42" }));

        let encoded = serde_json::to_value(AnyValue::from(&Value::from("GET"))).unwrap();
        assert_eq!(encoded, json!({ "stringValue": "GET" }));

        let array = Value::Array(Array::Bool(vec![true, false]));
        let encoded = serde_json::to_value(AnyValue::from(&array)).unwrap();
        assert_eq!(
            encoded,
            json!({ "arrayValue": { "values": [{ "boolValue": true }, { "boolValue": false }] } })
        );
    }

    #[test]
    fn empty_batch_keeps_resource_and_scope() {
        let resource = Resource::new(vec![KeyValue::new("service.name", "bookdesk")]);
        let encoded = serde_json::to_value(export_request(&resource, &[])).unwrap();

        let resource_spans = &encoded["resourceSpans"][0];
        assert_eq!(
            resource_spans["resource"]["attributes"],
            json!([{ "key": "service.name", "value": { "stringValue": "bookdesk" } }])
        );
        assert_eq!(resource_spans["scopeSpans"][0]["scope"]["name"], SCOPE_NAME);
        assert_eq!(resource_spans["scopeSpans"][0]["spans"], json!([]));
    }

    #[test]
    fn timestamps_are_decimal_nanos() {
        let time = UNIX_EPOCH + Duration::from_millis(1_500);
        assert_eq!(unix_nanos(time), "1500000000");
        assert_eq!(unix_nanos(UNIX_EPOCH - Duration::from_secs(1)), "0");
    }

    #[test]
    fn client_spans_have_kind_three() {
        assert_eq!(span_kind_code(&SpanKind::Client), 3);
    }
}
