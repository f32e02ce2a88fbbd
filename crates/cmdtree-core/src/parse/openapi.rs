use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::ParseError;
use crate::tree::HttpMethod;

/// The slice of an OpenAPI 3.x / Swagger 2.0 document the importer reads.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OpenApiSpec {
    /// Version marker. Kept loose since YAML may read `3.0` as a number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub openapi: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub swagger: Option<Value>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub servers: Vec<Server>,

    /// Swagger 2.0 host, e.g. `api.example.com`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    #[serde(rename = "basePath", skip_serializing_if = "Option::is_none")]
    pub base_path: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub schemes: Vec<String>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub paths: IndexMap<String, PathEntry>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<Components>,

    /// Swagger 2.0 shared parameter definitions.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub parameters: IndexMap<String, ParameterOrRef>,
}

impl OpenApiSpec {
    /// The base URL the document declares, if any.
    ///
    /// OpenAPI 3 uses the first server URL; Swagger 2.0 assembles one from
    /// `schemes`, `host` and `basePath`.
    pub fn declared_base_url(&self) -> Option<String> {
        if let Some(url) = self
            .servers
            .first()
            .and_then(|s| s.url.as_deref())
            .filter(|url| !url.is_empty())
        {
            return Some(url.to_string());
        }

        let host = self.host.as_deref().filter(|h| !h.is_empty())?;
        let scheme = self.schemes.first().map(String::as_str).unwrap_or("https");
        let base_path = self.base_path.as_deref().unwrap_or("");
        Some(format!(
            "{scheme}://{host}{}",
            base_path.trim_end_matches('/')
        ))
    }

    /// Follow a parameter through any `$ref` chain to its definition.
    ///
    /// Returns `None` for references that point outside the document's shared
    /// parameters, dangle, or loop.
    pub fn resolve_parameter<'a>(&'a self, param: &'a ParameterOrRef) -> Option<&'a Parameter> {
        let mut visited = HashSet::new();
        let mut current = param;
        loop {
            match current {
                ParameterOrRef::Parameter(p) => return Some(p),
                ParameterOrRef::Ref { ref_path } => {
                    if !visited.insert(ref_path.as_str()) {
                        log::debug!("circular parameter reference: {ref_path}");
                        return None;
                    }
                    current = self.lookup_parameter(ref_path)?;
                }
            }
        }
    }

    fn lookup_parameter(&self, ref_path: &str) -> Option<&ParameterOrRef> {
        let found = if let Some(name) = ref_path.strip_prefix("#/components/parameters/") {
            self.components
                .as_ref()
                .and_then(|c| c.parameters.get(name))
        } else if let Some(name) = ref_path.strip_prefix("#/parameters/") {
            self.parameters.get(name)
        } else {
            None
        };
        if found.is_none() {
            log::debug!("unresolved parameter reference: {ref_path}");
        }
        found
    }

    /// Reject path items and operations the model could not read.
    ///
    /// Non-object path entries are left for the importer to skip; anything
    /// object-shaped that failed to deserialize is an error.
    pub fn validate(&self) -> Result<(), ParseError> {
        for (path, entry) in &self.paths {
            match entry {
                PathEntry::Item(item) => {
                    for (key, entry) in &item.entries {
                        let OperationEntry::Other(value) = entry else {
                            continue;
                        };
                        let Ok(method) = key.parse::<HttpMethod>() else {
                            continue;
                        };
                        return Err(ParseError::InvalidOperation {
                            method,
                            path: path.clone(),
                            source: shape_error::<Operation>(value),
                        });
                    }
                }
                PathEntry::Other(value @ Value::Object(_)) => {
                    return Err(ParseError::InvalidPathItem {
                        path: path.clone(),
                        source: shape_error::<PathItem>(value),
                    });
                }
                PathEntry::Other(_) => {}
            }
        }
        Ok(())
    }
}

/// Re-read an opaque value as `T` to recover why it failed.
fn shape_error<'de, T: Deserialize<'de>>(value: &'de Value) -> serde_json::Error {
    match T::deserialize(value) {
        Err(e) => e,
        Ok(_) => serde::de::Error::custom("value does not have the expected shape"),
    }
}

/// `null` reads as the type's default, the same as an absent key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A server URL definition.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Server {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Reusable component definitions. Only parameters matter here.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Components {
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub parameters: IndexMap<String, ParameterOrRef>,
}

/// A `paths` value. Anything that isn't a readable path item is kept opaque and
/// skipped by the importer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathEntry {
    Item(PathItem),
    Other(Value),
}

/// A path item: shared parameters plus operations keyed by HTTP method.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PathItem {
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub parameters: Vec<ParameterOrRef>,

    /// Every other key in document order: verbs, `summary`, `servers`,
    /// extensions.
    #[serde(flatten)]
    pub entries: IndexMap<String, OperationEntry>,
}

impl PathItem {
    /// Operations under recognized verbs, in document order. Other keys are
    /// skipped; unreadable operations are rejected by
    /// [`OpenApiSpec::validate`].
    pub fn operations(&self) -> impl Iterator<Item = (HttpMethod, &Operation)> {
        self.entries.iter().filter_map(|(key, entry)| {
            let method = key.parse::<HttpMethod>().ok()?;
            match entry {
                OperationEntry::Operation(op) => Some((method, op)),
                OperationEntry::Other(_) => None,
            }
        })
    }
}

/// A value under a path item key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OperationEntry {
    Operation(Operation),
    Other(Value),
}

/// An API operation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Operation {
    #[serde(rename = "operationId", skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub tags: Vec<String>,

    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub parameters: Vec<ParameterOrRef>,

    /// Kept opaque: only its presence and emptiness matter.
    #[serde(rename = "requestBody", skip_serializing_if = "Option::is_none")]
    pub request_body: Option<Value>,
}

impl Operation {
    /// True when a non-empty request body object is declared.
    pub fn declares_body(&self) -> bool {
        matches!(&self.request_body, Some(Value::Object(body)) if !body.is_empty())
    }
}

/// Parameter location. Swagger 2.0 `body` and `formData` land in `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Query,
    Header,
    Path,
    Cookie,
    #[serde(other)]
    Other,
}

/// An API parameter.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Parameter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(rename = "in", skip_serializing_if = "Option::is_none")]
    pub location: Option<ParameterLocation>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// `null` (an empty YAML `required:`) reads as `false`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub required: bool,
}

/// A reference or inline parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterOrRef {
    Ref {
        #[serde(rename = "$ref")]
        ref_path: String,
    },
    Parameter(Parameter),
}
