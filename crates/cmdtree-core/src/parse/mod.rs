pub mod detect;
pub mod openapi;
pub mod postman;

use serde_json::Value;

use crate::error::ParseError;
use detect::SourceFormat;
use openapi::OpenApiSpec;
use postman::PostmanCollection;

/// An input document, classified once by the format detectors.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceDocument {
    OpenApi(OpenApiSpec),
    Postman(PostmanCollection),
}

impl SourceDocument {
    pub fn format(&self) -> SourceFormat {
        match self {
            SourceDocument::OpenApi(_) => SourceFormat::OpenApi,
            SourceDocument::Postman(_) => SourceFormat::Postman,
        }
    }
}

/// Parse a source document from JSON.
pub fn from_json(input: &str) -> Result<SourceDocument, ParseError> {
    let probe: Value = serde_json::from_str(input)?;
    match detect::detect(&probe)? {
        SourceFormat::OpenApi => {
            let spec: OpenApiSpec =
                serde_json::from_str(input).map_err(|e| invalid(SourceFormat::OpenApi, e))?;
            spec.validate()?;
            Ok(SourceDocument::OpenApi(spec))
        }
        SourceFormat::Postman => serde_json::from_str(input)
            .map(SourceDocument::Postman)
            .map_err(|e| invalid(SourceFormat::Postman, e)),
    }
}

/// Parse a source document from YAML.
pub fn from_yaml(input: &str) -> Result<SourceDocument, ParseError> {
    // YAML allows non-string keys (e.g. unquoted status codes); converting
    // through the serializer stringifies them.
    let probe: serde_yaml_ng::Value = serde_yaml_ng::from_str(input)?;
    let probe = serde_json::to_value(probe)?;
    match detect::detect(&probe)? {
        SourceFormat::OpenApi => {
            let spec: OpenApiSpec =
                serde_yaml_ng::from_str(input).map_err(|e| invalid(SourceFormat::OpenApi, e))?;
            spec.validate()?;
            Ok(SourceDocument::OpenApi(spec))
        }
        SourceFormat::Postman => serde_yaml_ng::from_str(input)
            .map(SourceDocument::Postman)
            .map_err(|e| invalid(SourceFormat::Postman, e)),
    }
}

// The typed models are read straight from the input text rather than from the
// probe `Value`, which would lose the document's key order.
fn invalid<E>(format: SourceFormat, source: E) -> ParseError
where
    E: std::error::Error + Send + Sync + 'static,
{
    ParseError::InvalidDocument {
        format,
        source: Box::new(source),
    }
}
