use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Variable keys that name the collection's base URL, compared case-insensitively.
const BASE_URL_KEYS: [&str; 4] = ["base_url", "baseurl", "api_url", "apiurl"];

/// The slice of a Postman v2.x collection the importer reads.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PostmanCollection {
    #[serde(default)]
    pub info: CollectionInfo,

    #[serde(default)]
    pub item: Vec<Item>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variable: Vec<Variable>,
}

impl PostmanCollection {
    /// The first collection variable that names a base URL and has a value.
    pub fn declared_base_url(&self) -> Option<String> {
        self.variable.iter().find_map(|var| {
            let key = var.key.as_deref()?.to_ascii_lowercase();
            if !BASE_URL_KEYS.contains(&key.as_str()) {
                return None;
            }
            var.value_text()
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CollectionInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
}

/// A folder (has a nested `item` list) or a concrete request.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Item {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Description>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<Vec<Item>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<RequestEntry>,
}

impl Item {
    pub fn children(&self) -> Option<&[Item]> {
        self.item.as_deref()
    }
}

/// Postman accepts a bare URL string in place of a request object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestEntry {
    Url(String),
    Request(Request),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Request {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<Url>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Body>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Description>,
}

/// A request URL: raw template string or structured object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Url {
    Raw(String),
    Structured(UrlObject),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UrlObject {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<UrlPath>,

    /// Declared path variables.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variable: Vec<Variable>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub query: Vec<QueryParam>,
}

/// A URL's `path`. Only the list form is read; anything else is kept opaque
/// and the raw template is used instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UrlPath {
    Segments(Vec<PathSegment>),
    Other(Value),
}

impl UrlPath {
    pub fn segments(&self) -> Vec<&str> {
        match self {
            UrlPath::Segments(segments) => segments.iter().map(PathSegment::as_str).collect(),
            UrlPath::Other(_) => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    Text(String),
    Object { value: String },
}

impl PathSegment {
    pub fn as_str(&self) -> &str {
        match self {
            PathSegment::Text(s) => s,
            PathSegment::Object { value } => value,
        }
    }
}

/// A collection or path variable.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Variable {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl Variable {
    /// The value as text: strings verbatim, other scalars as JSON. Empty or
    /// null values yield `None`.
    pub fn value_text(&self) -> Option<String> {
        match self.value.as_ref()? {
            Value::Null => None,
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QueryParam {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,

    #[serde(default)]
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Body {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
}

impl Body {
    /// A body counts when its mode is declared and isn't `none`.
    pub fn is_present(&self) -> bool {
        self.mode.as_deref().is_some_and(|mode| mode != "none")
    }
}

/// Postman descriptions are either plain text or `{ "content": ..., "type": ... }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Description {
    Text(String),
    Rich {
        #[serde(default)]
        content: Option<String>,
    },
}

impl Description {
    /// Non-empty text, if any.
    pub fn text(&self) -> Option<&str> {
        let text = match self {
            Description::Text(s) => s.as_str(),
            Description::Rich { content } => content.as_deref()?,
        };
        (!text.is_empty()).then_some(text)
    }
}
