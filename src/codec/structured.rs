// Structured Text Format
// Brace-delimited JSON objects; big integers travel as decimal strings so no
// precision is lost, plain JSON numbers are accepted on input

use num_bigint::BigUint;
use serde_json::{Map, Value};

use crate::error::{FormatError, Result};
use crate::rsa::bigint::parse_decimal;

pub type Object = Map<String, Value>;

/// Parse `text` and require the top level to be an object
pub fn parse_object(text: &str) -> Result<Object> {
    let value: Value = serde_json::from_str(text.trim()).map_err(|err| {
        log::debug!("structured import failed: {}", err);
        FormatError::from(err)
    })?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(FormatError::NotAnObject.into()),
    }
}

pub fn uint_value(value: &BigUint) -> Value {
    Value::String(value.to_str_radix(10))
}

/// Read a non-negative integer from a decimal string or a JSON number
pub fn parse_uint(value: &Value, field: &'static str) -> Result<BigUint> {
    let parsed = match value {
        Value::String(s) => parse_decimal(s),
        Value::Number(n) => n.as_u64().map(BigUint::from),
        _ => None,
    };
    parsed.ok_or_else(|| FormatError::InvalidNumber(field).into())
}

fn field<'a>(object: &'a Object, name: &'static str) -> Result<&'a Value> {
    object
        .get(name)
        .ok_or_else(|| FormatError::MissingField(name).into())
}

pub fn uint_field(object: &Object, name: &'static str) -> Result<BigUint> {
    parse_uint(field(object, name)?, name)
}

pub fn text_field(object: &Object, name: &'static str) -> Result<String> {
    match field(object, name)? {
        Value::String(s) => Ok(s.clone()),
        _ => Err(FormatError::InvalidText(name).into()),
    }
}

pub fn object_field<'a>(object: &'a Object, name: &'static str) -> Result<&'a Object> {
    match field(object, name)? {
        Value::Object(map) => Ok(map),
        _ => Err(FormatError::NotAnObject.into()),
    }
}

/// Read an array of integers, each a decimal string or a JSON number
pub fn uint_array_field(object: &Object, name: &'static str) -> Result<Vec<BigUint>> {
    match field(object, name)? {
        Value::Array(items) => items.iter().map(|item| parse_uint(item, name)).collect(),
        _ => Err(FormatError::InvalidNumber(name).into()),
    }
}

/// Serialize an object; keys come out sorted, so equal inputs give equal text
pub fn to_text(object: Object) -> String {
    Value::Object(object).to_string()
}
