pub mod merge;
pub mod name_normalizer;
pub mod openapi;
pub mod params;
pub mod path_resolver;
pub mod postman;
pub mod registry;

pub use merge::{MergeOutcome, MergeWarning, merge_trees};

use crate::config::DEFAULT_BASE_URL;
use crate::parse::SourceDocument;
use crate::tree::CommandTree;

/// Options shared by the importers and the merger.
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Used when a source declares no base URL, and preferred on conflicts.
    pub default_base_url: String,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            default_base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// Import one classified document.
pub fn import_document(doc: &SourceDocument, options: &ImportOptions) -> CommandTree {
    let tree = match doc {
        SourceDocument::OpenApi(spec) => openapi::import_openapi(spec, options),
        SourceDocument::Postman(collection) => postman::import_postman(collection, options),
    };
    log::debug!(
        "imported {} document: {} resources, {} operations",
        doc.format(),
        tree.resources.len(),
        tree.operation_count()
    );
    tree
}

/// Import every document and merge the results, earlier documents taking
/// precedence.
pub fn build_command_tree(docs: &[SourceDocument], options: &ImportOptions) -> MergeOutcome {
    let trees: Vec<CommandTree> = docs
        .iter()
        .map(|doc| import_document(doc, options))
        .collect();
    merge_trees(&trees, &options.default_base_url)
}
