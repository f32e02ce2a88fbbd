use std::sync::LazyLock;

use regex::Regex;

use crate::parse::postman::Url;

use super::name_normalizer::to_kebab;

/// `{{name}}`, `{name}`, or a segment starting with `:name`. The double-brace
/// form must come first so it isn't read as `{` + `{name}`.
static PATH_PARAM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{([^}]+)\}\}|\{([^}]+)\}|(?:^|/):([A-Za-z0-9_]+)").expect("Invalid regex")
});

/// Resolve a URL representation to a canonical absolute path.
///
/// A structured URL with path segments wins; otherwise its raw template is
/// used. Anything unresolvable becomes `/`.
pub fn resolve_path(url: Option<&Url>) -> String {
    match url {
        Some(Url::Raw(raw)) => path_from_raw(raw),
        Some(Url::Structured(obj)) => {
            let segments = obj
                .path
                .as_ref()
                .map(|p| p.segments())
                .unwrap_or_default();
            if !segments.is_empty() {
                return format!("/{}", segments.join("/"));
            }
            match obj.raw.as_deref() {
                Some(raw) if !raw.is_empty() => path_from_raw(raw),
                _ => "/".to_string(),
            }
        }
        None => "/".to_string(),
    }
}

/// Resolve a raw URL template string to a path.
///
/// Examples:
/// - `https://api.example.com/v2/invoices?limit=10` → `/v2/invoices`
/// - `{{baseUrl}}/v2/invoices/:id` → `/v2/invoices/:id`
/// - `v2/invoices` → `/v2/invoices`
pub fn path_from_raw(raw: &str) -> String {
    let raw = raw.split('?').next().unwrap_or_default();

    if let Some((_, rest)) = raw.split_once("://") {
        return absolute_url_path(rest);
    }
    if raw.starts_with('/') {
        return raw.to_string();
    }
    if let Some(after_open) = raw.strip_prefix("{{") {
        if let Some((_, tail)) = after_open.split_once("}}") {
            return match tail {
                "" => "/".to_string(),
                t if t.starts_with('/') => t.to_string(),
                t => format!("/{t}"),
            };
        }
    }
    format!("/{raw}")
}

/// Path component of whatever follows `scheme://`.
fn absolute_url_path(authority_and_path: &str) -> String {
    let without_fragment = authority_and_path
        .split('#')
        .next()
        .unwrap_or_default();
    match without_fragment.find('/') {
        Some(idx) => without_fragment[idx..].to_string(),
        None => "/".to_string(),
    }
}

/// Names of every path placeholder, each once, in order of first appearance.
pub fn extract_path_params(path: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for caps in PATH_PARAM.captures_iter(path) {
        let Some(name) = caps.iter().skip(1).flatten().next() else {
            continue;
        };
        let name = name.as_str();
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}

/// Resource name from the first non-empty path segment, or `root`.
/// Prefix `/` onto a path template that lacks one.
pub fn with_leading_slash(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

pub fn resource_from_path(path: &str) -> String {
    path.split('/')
        .find(|segment| !segment.is_empty())
        .map(to_kebab)
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "root".to_string())
}
