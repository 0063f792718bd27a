//! Decoder for the Firestore REST value encoding.
//!
//! Every field value on the wire is a single-key object naming its type,
//! e.g. `{"integerValue": "42"}` or `{"mapValue": {"fields": {...}}}`.
//! [`decode_value`] turns that into a plain `serde_json::Value`.

use crate::utils::error::{EtlError, Result};
use serde_json::{Map, Number, Value};

/// Tag keys in lookup order. The first one present on an object wins.
pub const TAG_KEYS: [&str; 9] = [
    "nullValue",
    "booleanValue",
    "integerValue",
    "doubleValue",
    "stringValue",
    "timestampValue",
    "mapValue",
    "arrayValue",
    "geoPointValue",
];

/// A recognised wire value, borrowing its payload from the document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WireValue<'a> {
    Null,
    Boolean(&'a Value),
    Integer(&'a Value),
    Double(&'a Value),
    String(&'a Value),
    Timestamp(&'a Value),
    Map(&'a Value),
    Array(&'a Value),
    GeoPoint(&'a Value),
}

impl<'a> WireValue<'a> {
    fn from_tag(key: &str, payload: &'a Value) -> Option<Self> {
        let value = match key {
            "nullValue" => WireValue::Null,
            "booleanValue" => WireValue::Boolean(payload),
            "integerValue" => WireValue::Integer(payload),
            "doubleValue" => WireValue::Double(payload),
            "stringValue" => WireValue::String(payload),
            "timestampValue" => WireValue::Timestamp(payload),
            "mapValue" => WireValue::Map(payload),
            "arrayValue" => WireValue::Array(payload),
            "geoPointValue" => WireValue::GeoPoint(payload),
            _ => return None,
        };
        Some(value)
    }

    /// Finds the wire tag of an object. `None` means the object is not a
    /// recognised encoding (bytesValue, referenceValue, or plain data).
    pub fn classify(object: &'a Map<String, Value>) -> Option<Self> {
        TAG_KEYS.iter().find_map(|key| {
            object
                .get(*key)
                .and_then(|payload| Self::from_tag(key, payload))
        })
    }

    pub fn tag(&self) -> &'static str {
        match self {
            WireValue::Null => "nullValue",
            WireValue::Boolean(_) => "booleanValue",
            WireValue::Integer(_) => "integerValue",
            WireValue::Double(_) => "doubleValue",
            WireValue::String(_) => "stringValue",
            WireValue::Timestamp(_) => "timestampValue",
            WireValue::Map(_) => "mapValue",
            WireValue::Array(_) => "arrayValue",
            WireValue::GeoPoint(_) => "geoPointValue",
        }
    }

    pub fn decode(self) -> Result<Value> {
        match self {
            WireValue::Null => Ok(Value::Null),
            WireValue::Boolean(payload) => payload
                .as_bool()
                .map(Value::Bool)
                .ok_or_else(|| self.invalid(payload)),
            WireValue::Integer(payload) => decode_integer(payload)
                .map(Value::from)
                .ok_or_else(|| self.invalid(payload)),
            WireValue::Double(payload) => {
                decode_double(payload).ok_or_else(|| self.invalid(payload))
            }
            WireValue::String(payload) | WireValue::Timestamp(payload) => payload
                .as_str()
                .map(|s| Value::String(s.to_string()))
                .ok_or_else(|| self.invalid(payload)),
            WireValue::Map(payload) => match payload.get("fields") {
                None => Ok(Value::Object(Map::new())),
                Some(Value::Object(fields)) => decode_fields(fields).map(Value::Object),
                Some(_) => Err(self.invalid(payload)),
            },
            WireValue::Array(payload) => match payload.get("values") {
                None => Ok(Value::Array(Vec::new())),
                Some(Value::Array(values)) => values
                    .iter()
                    .map(decode_value)
                    .collect::<Result<Vec<_>>>()
                    .map(Value::Array),
                Some(_) => Err(self.invalid(payload)),
            },
            WireValue::GeoPoint(payload) => {
                let Value::Object(point) = payload else {
                    return Err(self.invalid(payload));
                };
                // proto3 JSON 會省略預設值 0.0
                let coordinate = |key: &str| point.get(key).cloned().unwrap_or(Value::from(0.0));
                let mut projected = Map::new();
                projected.insert("latitude".to_string(), coordinate("latitude"));
                projected.insert("longitude".to_string(), coordinate("longitude"));
                Ok(Value::Object(projected))
            }
        }
    }

    fn invalid(&self, payload: &Value) -> EtlError {
        EtlError::InvalidWireValueError {
            tag: self.tag().to_string(),
            value: payload.to_string(),
        }
    }
}

fn decode_integer(payload: &Value) -> Option<i64> {
    match payload {
        Value::String(s) => s.trim().parse().ok(),
        Value::Number(n) => n.as_i64(),
        _ => None,
    }
}

/// Doubles arrive as JSON numbers, or as strings for `NaN`/`Infinity`.
/// Non-finite values have no JSON form and decode to null.
fn decode_double(payload: &Value) -> Option<Value> {
    let parsed = match payload {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    Some(Number::from_f64(parsed).map_or(Value::Null, Value::Number))
}

/// Decodes a wire value recursively. Values that are not tagged objects are
/// returned unchanged, so decoding already-plain data is a no-op.
pub fn decode_value(value: &Value) -> Result<Value> {
    let Value::Object(object) = value else {
        return Ok(value.clone());
    };

    match WireValue::classify(object) {
        Some(wire) => wire.decode(),
        None => Ok(value.clone()),
    }
}

pub fn decode_fields(fields: &Map<String, Value>) -> Result<Map<String, Value>> {
    fields
        .iter()
        .map(|(key, value)| Ok((key.clone(), decode_value(value)?)))
        .collect()
}

/// Looks up one top-level field of a REST document and decodes it.
/// A missing field decodes to `None`.
pub fn decode_document_field(document: &Value, field: &str) -> Result<Option<Value>> {
    document
        .get("fields")
        .and_then(|fields| fields.get(field))
        .map(decode_value)
        .transpose()
}

/// REST URL of a single document.
pub fn document_url(base_url: &str, project_id: &str, document_path: &str) -> String {
    format!(
        "{}/projects/{}/databases/(default)/documents/{}",
        base_url.trim_end_matches('/'),
        project_id,
        document_path.trim_matches('/')
    )
}
