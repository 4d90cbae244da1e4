//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting DynamoDB AttributeValue maps into the plain
//! JSON items handed to the dashboard. These are testable in isolation
//! without DynamoDB access.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use qred_core::storage::{Item, RepositoryError};
use serde_json::{Number, Value};

/// Convert a DynamoDB item to a JSON item.
pub fn item_to_json(item: &HashMap<String, AttributeValue>) -> Result<Item, RepositoryError> {
    item.iter()
        .map(|(key, value)| Ok::<_, RepositoryError>((key.clone(), attribute_to_json(value)?)))
        .collect()
}

/// Convert a single attribute value to JSON.
///
/// Sets become arrays and binary values become base64 strings.
pub fn attribute_to_json(value: &AttributeValue) -> Result<Value, RepositoryError> {
    match value {
        AttributeValue::S(s) => Ok(Value::String(s.clone())),
        AttributeValue::N(n) => parse_number(n),
        AttributeValue::Bool(b) => Ok(Value::Bool(*b)),
        AttributeValue::Null(_) => Ok(Value::Null),
        AttributeValue::M(map) => item_to_json(map).map(Value::Object),
        AttributeValue::L(list) => list
            .iter()
            .map(attribute_to_json)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        AttributeValue::Ss(set) => Ok(Value::Array(
            set.iter().cloned().map(Value::String).collect(),
        )),
        AttributeValue::Ns(set) => set
            .iter()
            .map(|n| parse_number(n))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        AttributeValue::B(blob) => Ok(Value::String(STANDARD.encode(blob.as_ref()))),
        AttributeValue::Bs(blobs) => Ok(Value::Array(
            blobs
                .iter()
                .map(|blob| Value::String(STANDARD.encode(blob.as_ref())))
                .collect(),
        )),
        other => Err(RepositoryError::InvalidData(format!(
            "Unsupported attribute value: {:?}",
            other
        ))),
    }
}

/// Parse a DynamoDB number, preferring integers over floats.
fn parse_number(raw: &str) -> Result<Value, RepositoryError> {
    if let Ok(i) = raw.parse::<i64>() {
        return Ok(Value::Number(i.into()));
    }
    if let Ok(u) = raw.parse::<u64>() {
        return Ok(Value::Number(u.into()));
    }
    raw.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .ok_or_else(|| RepositoryError::Serialization(format!("Invalid number: {}", raw)))
}
