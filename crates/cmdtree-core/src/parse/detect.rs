use std::fmt;

use serde_json::{Map, Value};

use crate::error::ParseError;

/// The closed set of supported input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceFormat {
    OpenApi,
    Postman,
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceFormat::OpenApi => f.write_str("OpenAPI"),
            SourceFormat::Postman => f.write_str("Postman"),
        }
    }
}

/// OpenAPI-shaped: a top-level `openapi` or `swagger` marker, or a `paths` map.
pub fn is_openapi(doc: &Map<String, Value>) -> bool {
    doc.contains_key("openapi") || doc.contains_key("swagger") || doc.contains_key("paths")
}

/// Postman-shaped: a top-level `item` list and an `info.schema` mentioning postman.
pub fn is_postman(doc: &Map<String, Value>) -> bool {
    let schema = doc
        .get("info")
        .and_then(|info| info.get("schema"))
        .and_then(Value::as_str)
        .unwrap_or_default();
    doc.contains_key("item") && schema.contains("postman")
}

/// Classify a document. OpenAPI markers take precedence.
pub fn detect(value: &Value) -> Result<SourceFormat, ParseError> {
    let Some(doc) = value.as_object() else {
        return Err(ParseError::NotAnObject);
    };
    if is_openapi(doc) {
        Ok(SourceFormat::OpenApi)
    } else if is_postman(doc) {
        Ok(SourceFormat::Postman)
    } else {
        Err(ParseError::UnsupportedFormat)
    }
}
