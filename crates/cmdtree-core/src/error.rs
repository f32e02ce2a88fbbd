use std::path::PathBuf;

use thiserror::Error;

use crate::parse::detect::SourceFormat;
use crate::tree::HttpMethod;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("document is not a JSON object")]
    NotAnObject,

    #[error("unsupported spec format: expected an OpenAPI document or a Postman collection")]
    UnsupportedFormat,

    #[error("malformed {format} document: {source}")]
    InvalidDocument {
        format: SourceFormat,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("unreadable {method} operation at {path}: {source}")]
    InvalidOperation {
        method: HttpMethod,
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unreadable path item {path}: {source}")]
    InvalidPathItem {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },
}
