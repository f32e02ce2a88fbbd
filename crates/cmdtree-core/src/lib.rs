pub mod config;
pub mod error;
pub mod parse;
pub mod transform;
pub mod tree;

pub use parse::SourceDocument;
pub use transform::{ImportOptions, MergeOutcome, MergeWarning, build_command_tree};
pub use tree::CommandTree;
