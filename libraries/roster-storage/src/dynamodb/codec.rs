//! JSON <-> DynamoDB attribute conversion

use aws_sdk_dynamodb::types::AttributeValue;
use roster_core::{Item, StoreError, StoreResult};
use serde_json::{Number, Value};
use std::collections::HashMap;

/// Native DynamoDB item
pub type Attributes = HashMap<String, AttributeValue>;

/// Convert a JSON item into DynamoDB attributes. Infallible: every JSON
/// value has an attribute form.
pub fn to_attributes(item: Item) -> Attributes {
    item.into_iter()
        .map(|(name, value)| (name, to_attribute(value)))
        .collect()
}

/// Convert DynamoDB attributes back into a JSON item
pub fn from_attributes(attributes: Attributes) -> StoreResult<Item> {
    attributes
        .into_iter()
        .map(|(name, value)| from_attribute(value).map(|value| (name, value)))
        .collect()
}

fn to_attribute(value: Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(b),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s),
        Value::Array(values) => AttributeValue::L(values.into_iter().map(to_attribute).collect()),
        Value::Object(map) => AttributeValue::M(to_attributes(map)),
    }
}

fn from_attribute(attribute: AttributeValue) -> StoreResult<Value> {
    let value = match attribute {
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::Bool(b) => Value::Bool(b),
        AttributeValue::N(n) => Value::Number(parse_number(&n)?),
        AttributeValue::S(s) => Value::String(s),
        AttributeValue::L(values) => Value::Array(
            values
                .into_iter()
                .map(from_attribute)
                .collect::<StoreResult<_>>()?,
        ),
        AttributeValue::M(map) => Value::Object(from_attributes(map)?),
        AttributeValue::Ss(values) => Value::Array(values.into_iter().map(Value::String).collect()),
        AttributeValue::Ns(values) => Value::Array(
            values
                .iter()
                .map(|n| parse_number(n).map(Value::Number))
                .collect::<StoreResult<_>>()?,
        ),
        AttributeValue::B(_) | AttributeValue::Bs(_) => {
            return Err(StoreError::codec("binary attributes are not supported"));
        }
        _ => return Err(StoreError::codec("unknown attribute type")),
    };
    Ok(value)
}

// DynamoDB numbers are decimal strings; prefer the integer forms so whole
// numbers come back exactly as they went in.
fn parse_number(text: &str) -> StoreResult<Number> {
    if let Ok(i) = text.parse::<i64>() {
        return Ok(i.into());
    }
    if let Ok(u) = text.parse::<u64>() {
        return Ok(u.into());
    }
    text.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .ok_or_else(|| StoreError::codec(format!("invalid number `{text}`")))
}
