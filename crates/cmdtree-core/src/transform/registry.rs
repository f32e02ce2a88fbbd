use std::collections::HashSet;

use indexmap::IndexMap;

use crate::tree::{CommandTree, HttpMethod, Operation, Resource, TREE_VERSION};

use super::name_normalizer::normalize_op_name;

/// Pick a name not yet in `used`.
///
/// Tries `name`, then `name-{verb}`, then `name-2`, `name-3`, ...
pub fn unique_name(used: &HashSet<String>, name: &str, method: HttpMethod) -> String {
    if !used.contains(name) {
        return name.to_string();
    }
    let with_verb = normalize_op_name(&format!("{name}-{}", method.as_lower()));
    if !used.contains(&with_verb) {
        return with_verb;
    }
    let mut idx = 2;
    loop {
        let candidate = normalize_op_name(&format!("{name}-{idx}"));
        if !used.contains(&candidate) {
            return candidate;
        }
        idx += 1;
    }
}

#[derive(Debug, Default)]
struct ResourceSlot {
    ops: Vec<Operation>,
    used_names: HashSet<String>,
    routes: HashSet<(HttpMethod, String)>,
}

impl ResourceSlot {
    fn accept(&mut self, mut op: Operation) -> String {
        let name = unique_name(&self.used_names, &op.name, op.method);
        if name != op.name {
            log::debug!("renamed colliding operation {} -> {name}", op.name);
            op.name = name.clone();
        }
        self.used_names.insert(name.clone());
        self.routes.insert((op.method, op.path.clone()));
        self.ops.push(op);
        name
    }
}

/// Name registry and resource accumulator for a single import or merge pass.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    resources: IndexMap<String, ResourceSlot>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make sure `resource` exists, even if nothing is ever added to it.
    pub fn ensure_resource(&mut self, resource: &str) {
        self.slot(resource);
    }

    /// Add an operation, renaming it if its name is taken. Returns the final name.
    pub fn insert(&mut self, resource: &str, op: Operation) -> String {
        self.slot(resource).accept(op)
    }

    /// Add an operation unless its `(method, path)` is already present in the
    /// resource. Returns the final name when accepted.
    pub fn insert_new_route(&mut self, resource: &str, op: Operation) -> Option<String> {
        let slot = self.slot(resource);
        if slot.routes.contains(&(op.method, op.path.clone())) {
            log::debug!(
                "dropping duplicate route {} {} in {resource}",
                op.method,
                op.path
            );
            return None;
        }
        Some(slot.accept(op))
    }

    fn slot(&mut self, resource: &str) -> &mut ResourceSlot {
        self.resources.entry(resource.to_string()).or_default()
    }

    /// Produce the tree with resources sorted by name.
    pub fn finish(self, base_url: String) -> CommandTree {
        let mut resources: Vec<Resource> = self
            .resources
            .into_iter()
            .map(|(name, slot)| Resource { name, ops: slot.ops })
            .collect();
        resources.sort_by(|a, b| a.name.cmp(&b.name));
        CommandTree {
            version: TREE_VERSION,
            base_url,
            resources,
        }
    }
}
