//! Generic descriptor-driven validator

use serde_json::{Map, Value};
use std::collections::BTreeMap;
use validator::ValidateEmail;

use super::{ErrorCode, FieldError, FieldErrors, FieldKind, FieldSpec};

/// A value that passed its field's constraints
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
}

/// Validated values keyed by field name
///
/// Optional fields that were absent have no entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidFields {
    values: BTreeMap<&'static str, FieldValue>,
}

impl ValidFields {
    pub fn integer(&self, name: &str) -> Option<i64> {
        match self.values.get(name) {
            Some(FieldValue::Integer(n)) => Some(*n),
            _ => None,
        }
    }

    /// Remove and return a text value
    pub fn take_text(&mut self, name: &str) -> Option<String> {
        if !matches!(self.values.get(name), Some(FieldValue::Text(_))) {
            return None;
        }
        match self.values.remove(name) {
            Some(FieldValue::Text(s)) => Some(s),
            _ => None,
        }
    }
}

/// Validate `raw` against a descriptor table
///
/// Every field is checked; the error list holds at most one entry per field,
/// in descriptor order. Input that is not a JSON object yields a single
/// `body` error.
pub fn validate_fields(specs: &[FieldSpec], raw: &Value) -> Result<ValidFields, FieldErrors> {
    let Some(object) = raw.as_object() else {
        return Err(FieldErrors::single(FieldError::new(
            "body",
            ErrorCode::InvalidType,
            format!("Expected object, received {}", type_name(raw)),
        )));
    };

    let mut values = ValidFields::default();
    let mut errors = FieldErrors::new();

    for spec in specs {
        match check_field(spec, object) {
            Ok(Some(value)) => {
                values.values.insert(spec.name, value);
            }
            Ok(None) => {}
            Err(error) => errors.push(error),
        }
    }

    if errors.is_empty() {
        Ok(values)
    } else {
        Err(errors)
    }
}

fn check_field(spec: &FieldSpec, object: &Map<String, Value>) -> Result<Option<FieldValue>, FieldError> {
    let value = match object.get(spec.name) {
        None | Some(Value::Null) if spec.required => {
            return Err(FieldError::new(spec.name, ErrorCode::InvalidType, "Required"));
        }
        None | Some(Value::Null) => return Ok(None),
        Some(value) => value,
    };

    match spec.kind {
        FieldKind::Text { min_len, message } => {
            let s = expect_string(spec.name, value)?;
            if s.chars().count() < min_len {
                return Err(FieldError::new(spec.name, ErrorCode::TooSmall, message));
            }
            Ok(Some(FieldValue::Text(s.to_string())))
        }
        FieldKind::FreeText => {
            let s = expect_string(spec.name, value)?;
            Ok(Some(FieldValue::Text(s.to_string())))
        }
        FieldKind::Integer {
            min,
            max,
            min_message,
            max_message,
        } => {
            // Bounds are checked before narrowing, so 1e20 is too big, not a type error
            let n = coerce_integer(spec.name, value)?;
            if n < min as f64 {
                return Err(FieldError::new(spec.name, ErrorCode::TooSmall, min_message));
            }
            if n > max as f64 {
                return Err(FieldError::new(spec.name, ErrorCode::TooBig, max_message));
            }
            Ok(Some(FieldValue::Integer(n as i64)))
        }
        FieldKind::Choice {
            options,
            empty_message,
        } => {
            let s = expect_string(spec.name, value)?;
            if s.is_empty() {
                return Err(FieldError::new(spec.name, ErrorCode::TooSmall, empty_message));
            }
            if !options.contains(&s) {
                let expected = options
                    .iter()
                    .map(|o| format!("'{}'", o))
                    .collect::<Vec<_>>()
                    .join(" | ");
                return Err(FieldError::new(
                    spec.name,
                    ErrorCode::InvalidEnumValue,
                    format!("Invalid enum value. Expected {}, received '{}'", expected, s),
                ));
            }
            Ok(Some(FieldValue::Text(s.to_string())))
        }
        FieldKind::Email { message } => {
            let s = expect_string(spec.name, value)?.to_string();
            if !s.validate_email() {
                return Err(FieldError::new(spec.name, ErrorCode::InvalidString, message));
            }
            Ok(Some(FieldValue::Text(s)))
        }
    }
}

fn expect_string<'a>(field: &str, value: &'a Value) -> Result<&'a str, FieldError> {
    value.as_str().ok_or_else(|| {
        FieldError::new(
            field,
            ErrorCode::InvalidType,
            format!("Expected string, received {}", type_name(value)),
        )
    })
}

/// Coerce a JSON value to an integral number
///
/// Numbers pass through, numeric strings are parsed after trimming (an empty
/// string is 0), booleans are 1/0. Fractional values are rejected. The result
/// is finite and integral but may lie outside the `i64` range.
fn coerce_integer(field: &str, value: &Value) -> Result<f64, FieldError> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Some(0.0)
            } else {
                trimmed.parse::<f64>().ok()
            }
        }
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    };

    let number = number.filter(|n| n.is_finite()).ok_or_else(|| {
        FieldError::new(
            field,
            ErrorCode::InvalidType,
            "Expected number, received nan",
        )
    })?;
    if number.fract() != 0.0 {
        return Err(FieldError::new(
            field,
            ErrorCode::InvalidType,
            "Expected integer, received float",
        ));
    }
    Ok(number)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
