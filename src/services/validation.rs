/*
 * Responsibility
 * - リクエスト形状の schema 記述 (body / headers)
 * - handler 実行前の明示的な validation step
 * - 認証エラーとは別の ValidationError を返す (HTTP 422)
 */
use std::fmt;

use axum::http::HeaderMap;
use serde_json::{Map, Value, json};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Body,
    Headers,
}

impl Location {
    pub fn as_str(&self) -> &'static str {
        match self {
            Location::Body => "body",
            Location::Headers => "headers",
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
}

impl FieldKind {
    fn matches(&self, value: &Value) -> bool {
        match self {
            FieldKind::String => value.is_string(),
        }
    }

    pub fn json_type(&self) -> &'static str {
        match self {
            FieldKind::String => "string",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldSpec {
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: true,
        }
    }
}

/// Shape descriptor for one request part.
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    pub location: Location,
    pub fields: &'static [FieldSpec],
}

impl Schema {
    /// JSON-Schema fragment used by the API document.
    pub fn to_json_schema(&self) -> Value {
        let mut properties = Map::new();
        for field in self.fields {
            properties.insert(field.name.to_string(), json!({ "type": field.kind.json_type() }));
        }
        let required: Vec<&str> = self
            .fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.name)
            .collect();

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }
}

/// Implemented by request types that carry a schema descriptor.
pub trait HasSchema {
    const SCHEMA: Schema;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{location} validation failed at '{field}': {reason}")]
pub struct ValidationError {
    pub location: Location,
    pub field: String,
    pub reason: String,
}

impl ValidationError {
    pub fn new(location: Location, field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            location,
            field: field.into(),
            reason: reason.into(),
        }
    }
}

pub fn validate_json(schema: &Schema, value: &Value) -> Result<(), ValidationError> {
    let Some(obj) = value.as_object() else {
        return Err(ValidationError::new(
            schema.location,
            "",
            "expected an object",
        ));
    };

    for field in schema.fields {
        match obj.get(field.name) {
            None | Some(Value::Null) if field.required => {
                return Err(ValidationError::new(
                    schema.location,
                    field.name,
                    "required",
                ));
            }
            Some(v) if !v.is_null() && !field.kind.matches(v) => {
                return Err(ValidationError::new(
                    schema.location,
                    field.name,
                    format!("expected {}", field.kind.json_type()),
                ));
            }
            _ => {}
        }
    }

    Ok(())
}

/// Header values are always strings; only presence and UTF-8 are checked.
pub fn validate_headers(schema: &Schema, headers: &HeaderMap) -> Result<(), ValidationError> {
    for field in schema.fields {
        match headers.get(field.name) {
            None if field.required => {
                return Err(ValidationError::new(
                    schema.location,
                    field.name,
                    "required",
                ));
            }
            Some(v) if v.to_str().is_err() => {
                return Err(ValidationError::new(
                    schema.location,
                    field.name,
                    "expected string",
                ));
            }
            _ => {}
        }
    }

    Ok(())
}
