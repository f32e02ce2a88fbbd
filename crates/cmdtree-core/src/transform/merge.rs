use std::fmt;

use crate::tree::CommandTree;

use super::registry::TreeBuilder;

/// A recoverable conflict resolved during merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeWarning {
    MultipleBaseUrls {
        candidates: Vec<String>,
        chosen: String,
    },
}

impl fmt::Display for MergeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergeWarning::MultipleBaseUrls { candidates, chosen } => write!(
                f,
                "multiple base URLs detected ({}), using {chosen}",
                candidates.join(", ")
            ),
        }
    }
}

/// The merged tree plus any conflicts that were resolved along the way.
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    pub tree: CommandTree,
    pub warnings: Vec<MergeWarning>,
}

/// Merge trees in precedence order.
///
/// Resources merge by name. Within a resource the first tree to contribute a
/// `(method, path)` keeps it; later duplicates are dropped. Operations whose
/// name is already taken are renamed with the verb/numeric suffix scheme.
pub fn merge_trees(trees: &[CommandTree], default_base_url: &str) -> MergeOutcome {
    let mut warnings = Vec::new();
    let base_url = reconcile_base_urls(trees, default_base_url, &mut warnings);

    let mut builder = TreeBuilder::new();
    for tree in trees {
        for resource in &tree.resources {
            builder.ensure_resource(&resource.name);
            for op in &resource.ops {
                builder.insert_new_route(&resource.name, op.clone());
            }
        }
    }

    MergeOutcome {
        tree: builder.finish(base_url),
        warnings,
    }
}

fn reconcile_base_urls(
    trees: &[CommandTree],
    default_base_url: &str,
    warnings: &mut Vec<MergeWarning>,
) -> String {
    let mut candidates: Vec<String> = Vec::new();
    for url in trees.iter().map(|t| t.base_url.as_str()) {
        if !url.is_empty() && !candidates.iter().any(|c| c == url) {
            candidates.push(url.to_string());
        }
    }

    match candidates.as_slice() {
        [] => default_base_url.to_string(),
        [only] => only.clone(),
        [first, ..] => {
            let chosen = if candidates.iter().any(|c| c == default_base_url) {
                default_base_url.to_string()
            } else {
                first.clone()
            };
            let warning = MergeWarning::MultipleBaseUrls {
                candidates: candidates.clone(),
                chosen: chosen.clone(),
            };
            log::debug!("{warning}");
            warnings.push(warning);
            chosen
        }
    }
}
