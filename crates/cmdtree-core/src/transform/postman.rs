use crate::parse::postman::{Item, PostmanCollection, Request, RequestEntry, Url};
use crate::tree::{CommandTree, HttpMethod, Operation, Parameter, ParameterLocation};

use super::ImportOptions;
use super::name_normalizer::{normalize_op_name, to_kebab};
use super::params::ParamSet;
use super::path_resolver::{resolve_path, resource_from_path};
use super::registry::TreeBuilder;

/// Build a command tree from a Postman collection.
pub fn import_postman(collection: &PostmanCollection, options: &ImportOptions) -> CommandTree {
    let mut walker = Walker::default();
    walker.walk(&collection.item);

    let base_url = collection
        .declared_base_url()
        .unwrap_or_else(|| options.default_base_url.clone());
    walker.builder.finish(base_url)
}

/// Depth-first traversal state. `ancestors` holds folder names, outermost first.
#[derive(Default)]
struct Walker<'a> {
    builder: TreeBuilder,
    ancestors: Vec<&'a str>,
}

impl<'a> Walker<'a> {
    fn walk(&mut self, items: &'a [Item]) {
        for item in items {
            match item.children() {
                Some(children) => {
                    self.ancestors.push(item.name.as_deref().unwrap_or_default());
                    self.walk(children);
                    self.ancestors.pop();
                }
                None => self.add_request(item),
            }
        }
    }

    fn add_request(&mut self, item: &Item) {
        let shorthand;
        let (request, url): (Option<&Request>, Option<&Url>) = match &item.request {
            Some(RequestEntry::Request(request)) => (Some(request), request.url.as_ref()),
            Some(RequestEntry::Url(raw)) => {
                shorthand = Url::Raw(raw.clone());
                (None, Some(&shorthand))
            }
            None => (None, None),
        };

        let raw_method = request
            .and_then(|r| r.method.as_deref())
            .filter(|m| !m.is_empty())
            .unwrap_or("GET");
        let method = match raw_method.parse::<HttpMethod>() {
            Ok(method) => method,
            Err(err) => {
                log::warn!(
                    "skipping request {:?}: {err}",
                    item.name.as_deref().unwrap_or_default()
                );
                return;
            }
        };

        let path = resolve_path(url);
        let resource = self.resource_name(&path);

        let raw_name = item
            .name
            .clone()
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| format!("{method}-{path}"));

        let has_body = method.carries_body()
            && request
                .and_then(|r| r.body.as_ref())
                .is_some_and(|body| body.is_present());

        let description = item
            .description
            .as_ref()
            .and_then(|d| d.text())
            .or_else(|| request.and_then(|r| r.description.as_ref()).and_then(|d| d.text()))
            .map(str::to_string);

        let op = Operation {
            name: normalize_op_name(&raw_name),
            method,
            params: collect_params(url, &path),
            path,
            description,
            has_body,
        };
        self.builder.insert(&resource, op);
    }

    /// Outermost folder name, else the first path segment.
    fn resource_name(&self, path: &str) -> String {
        self.ancestors
            .first()
            .filter(|name| !name.is_empty())
            .map(|name| to_kebab(name))
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| resource_from_path(path))
    }
}

/// Template placeholders, declared path variables, then enabled query keys.
fn collect_params(url: Option<&Url>, path: &str) -> Vec<Parameter> {
    let mut params = ParamSet::from_path_template(path);

    if let Some(Url::Structured(obj)) = url {
        for var in &obj.variable {
            if let Some(key) = var.key.as_deref().filter(|k| !k.is_empty()) {
                params.insert(key, ParameterLocation::Path, true);
            }
        }
        for query in obj.query.iter().filter(|q| !q.disabled) {
            if let Some(key) = query.key.as_deref().filter(|k| !k.is_empty()) {
                params.insert(key, ParameterLocation::Query, false);
            }
        }
    }

    params.into_vec()
}
