pub mod types;

pub use types::{
    CommandTree, HttpMethod, Operation, Parameter, ParameterLocation, Resource, TREE_VERSION,
};
