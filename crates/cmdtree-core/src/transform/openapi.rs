use crate::parse::openapi::{
    OpenApiSpec, Operation, ParameterLocation as SourceLocation, PathEntry, PathItem,
};
use crate::tree::{self, CommandTree, HttpMethod, ParameterLocation};

use super::ImportOptions;
use super::name_normalizer::{normalize_op_name, to_kebab};
use super::params::ParamSet;
use super::path_resolver::{resource_from_path, with_leading_slash};
use super::registry::TreeBuilder;

/// Build a command tree from an OpenAPI / Swagger document.
pub fn import_openapi(spec: &OpenApiSpec, options: &ImportOptions) -> CommandTree {
    let mut builder = TreeBuilder::new();

    for (path, entry) in &spec.paths {
        let PathEntry::Item(item) = entry else {
            log::warn!("skipping non-object path entry {path}");
            continue;
        };
        let path = with_leading_slash(path);
        for (method, op) in item.operations() {
            let resource = resource_name(op, &path);
            let operation = build_operation(spec, &path, item, method, op);
            builder.insert(&resource, operation);
        }
    }

    let base_url = spec
        .declared_base_url()
        .unwrap_or_else(|| options.default_base_url.clone());
    builder.finish(base_url)
}

/// First tag, else the first path segment.
fn resource_name(op: &Operation, path: &str) -> String {
    op.tags
        .first()
        .map(|tag| to_kebab(tag))
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| resource_from_path(path))
}

fn build_operation(
    spec: &OpenApiSpec,
    path: &str,
    item: &PathItem,
    method: HttpMethod,
    op: &Operation,
) -> tree::Operation {
    let raw_name = op
        .operation_id
        .clone()
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| format!("{}-{path}", method.as_lower()));

    let mut params = ParamSet::from_path_template(path);
    for param in item.parameters.iter().chain(&op.parameters) {
        let Some(param) = spec.resolve_parameter(param) else {
            continue;
        };
        let Some(name) = param.name.as_deref().filter(|n| !n.is_empty()) else {
            continue;
        };
        let location = match param.location {
            Some(SourceLocation::Path) => ParameterLocation::Path,
            Some(SourceLocation::Query) => ParameterLocation::Query,
            other => {
                log::debug!("dropping parameter {name} ({other:?}) on {method} {path}");
                continue;
            }
        };
        params.insert(name, location, param.required);
    }

    let description = [&op.summary, &op.description]
        .into_iter()
        .flatten()
        .find(|text| !text.is_empty())
        .cloned();

    tree::Operation {
        name: normalize_op_name(&raw_name),
        method,
        path: path.to_string(),
        description,
        params: params.into_vec(),
        has_body: op.declares_body(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_BASE_URL;

    fn import(json: &str) -> CommandTree {
        let spec: OpenApiSpec = serde_json::from_str(json).unwrap();
        import_openapi(&spec, &ImportOptions::default())
    }

    #[test]
    fn test_tag_and_operation_id() {
        let tree = import(
            r#"{"openapi": "3.0.0", "paths": {"/v2/invoices/{invoice_id}": {"get": {
                "operationId": "getInvoiceById",
                "tags": ["Invoices"],
                "summary": "Get an invoice"
            }}}}"#,
        );
        let op = tree.resource("invoices").unwrap().op("get-invoice-by-id").unwrap();
        assert_eq!(op.method, HttpMethod::Get);
        assert_eq!(op.path, "/v2/invoices/{invoice_id}");
        assert_eq!(op.description.as_deref(), Some("Get an invoice"));
        let id = op.param(ParameterLocation::Path, "invoice_id").unwrap();
        assert_eq!(id.flag, "invoice-id");
        assert!(id.required);
        assert_eq!(tree.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_untagged_uses_first_segment_and_synthesized_name() {
        let tree = import(r#"{"paths": {"/balance": {"get": {}}, "/": {"get": {}}}}"#);
        assert!(tree.resource("balance").unwrap().op("get-balance").is_some());
        assert!(tree.resource("root").unwrap().op("get").is_some());
    }

    #[test]
    fn test_parameter_filtering() {
        let tree = import(
            r#"{"openapi": "3.0.0", "paths": {"/items/{id}": {
                "parameters": [{"name": "for-user-id", "in": "header"}],
                "get": {"operationId": "getItem", "parameters": [
                    {"name": "id", "in": "path", "required": false},
                    {"name": "expand", "in": "query"},
                    {"name": "limit", "in": "query", "required": true},
                    {"name": "session", "in": "cookie"},
                    {"in": "query"}
                ]}
            }}}"#,
        );
        let op = tree.resource("items").unwrap().op("get-item").unwrap();
        let names: Vec<_> = op.params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["id", "expand", "limit"]);
        assert!(op.param(ParameterLocation::Path, "id").unwrap().required);
        assert!(!op.param(ParameterLocation::Query, "expand").unwrap().required);
        assert!(op.param(ParameterLocation::Query, "limit").unwrap().required);
    }

    #[test]
    fn test_path_level_params_and_refs() {
        let tree = import(
            r##"{"openapi": "3.0.0",
                "components": {"parameters": {"Limit": {"name": "limit", "in": "query"}}},
                "paths": {"/customers": {
                    "parameters": [{"name": "page", "in": "query"}],
                    "get": {"operationId": "listCustomers", "parameters": [
                        {"$ref": "#/components/parameters/Limit"},
                        {"$ref": "#/components/parameters/Missing"},
                        {"name": "page", "in": "query", "required": true}
                    ]}
                }}}"##,
        );
        let op = tree.resource("customers").unwrap().op("list-customers").unwrap();
        let names: Vec<_> = op.params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["page", "limit"]);
        assert!(op.param(ParameterLocation::Query, "page").unwrap().required);
    }

    #[test]
    fn test_has_body_follows_request_body() {
        let tree = import(
            r#"{"paths": {"/invoices": {
                "post": {"operationId": "create", "requestBody": {"content": {}}},
                "put": {"operationId": "replace", "requestBody": {}},
                "delete": {"operationId": "purge", "requestBody": {"content": {}}}
            }}}"#,
        );
        let res = tree.resource("invoices").unwrap();
        assert!(res.op("create").unwrap().has_body);
        assert!(!res.op("replace").unwrap().has_body);
        assert!(res.op("purge").unwrap().has_body);
    }

    #[test]
    fn test_operation_name_collisions() {
        let tree = import(
            r#"{"paths": {
                "/invoices": {"get": {"operationId": "invoices", "tags": ["Invoices"]}},
                "/invoices/search": {
                    "get": {"operationId": "invoices", "tags": ["Invoices"]},
                    "post": {"operationId": "invoices", "tags": ["Invoices"]}
                },
                "/invoices/export": {"get": {"operationId": "invoices", "tags": ["Invoices"]}}
            }}"#,
        );
        let names: Vec<_> = tree.resource("invoices").unwrap().ops.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["invoices", "invoices-get", "invoices-post", "invoices-2"]
        );
    }

    #[test]
    fn test_description_falls_back() {
        let tree = import(
            r#"{"paths": {"/a": {"get": {"operationId": "a", "summary": "", "description": "Long form"}}}}"#,
        );
        let op = tree.resource("a").unwrap().op("a").unwrap();
        assert_eq!(op.description.as_deref(), Some("Long form"));
    }

    #[test]
    fn test_server_url_and_skipped_entries() {
        let tree = import(
            r#"{"openapi": "3.0.0",
                "servers": [{"url": "https://sandbox.example.com"}],
                "paths": {"/broken": "nope", "/ok": {"trace": {}, "get": {"operationId": "ok"}}}}"#,
        );
        assert_eq!(tree.base_url, "https://sandbox.example.com");
        assert_eq!(tree.operation_count(), 1);
    }

    #[test]
    fn test_null_required_keeps_operation() {
        let tree = import(
            r#"{"openapi": "3.0.0", "paths": {"/v2/invoices/{id}": {
                "get": {"operationId": "getInvoice", "tags": ["Invoices"],
                        "parameters": [{"name": "expand", "in": "query", "required": null}]},
                "delete": {"operationId": "deleteInvoice", "tags": ["Invoices"]}
            }}}"#,
        );
        let invoices = tree.resource("invoices").unwrap();
        let names: Vec<_> = invoices.ops.iter().map(|op| op.name.as_str()).collect();
        assert_eq!(names, vec!["get-invoice", "delete-invoice"]);
        let get = invoices.op("get-invoice").unwrap();
        assert!(get.param(ParameterLocation::Path, "id").unwrap().required);
        assert!(!get.param(ParameterLocation::Query, "expand").unwrap().required);
    }

    #[test]
    fn test_relative_path_key_gets_leading_slash() {
        let tree = import(r#"{"paths": {"v2/items/{id}": {"get": {}}}}"#);
        let op = tree.resource("v2").unwrap().op("get-v2-items-id").unwrap();
        assert_eq!(op.path, "/v2/items/{id}");
        assert!(op.param(ParameterLocation::Path, "id").is_some());
    }
}
