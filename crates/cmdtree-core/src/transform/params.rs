use indexmap::IndexMap;

use crate::tree::{Parameter, ParameterLocation};

use super::name_normalizer::to_kebab;
use super::path_resolver::extract_path_params;

/// Parameters keyed by `(location, name)`.
///
/// A repeated key overwrites the earlier entry's attributes but keeps its
/// position, so output order is first-declaration order.
#[derive(Debug, Default)]
pub struct ParamSet {
    entries: IndexMap<(ParameterLocation, String), Parameter>,
}

impl ParamSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with every placeholder in `path` as a required path parameter.
    pub fn from_path_template(path: &str) -> Self {
        let mut set = Self::new();
        for name in extract_path_params(path) {
            set.insert(&name, ParameterLocation::Path, true);
        }
        set
    }

    /// Path parameters are always required regardless of `required`.
    pub fn insert(&mut self, name: &str, location: ParameterLocation, required: bool) {
        let param = Parameter {
            name: name.to_string(),
            flag: to_kebab(name),
            location,
            required: required || location == ParameterLocation::Path,
        };
        self.entries.insert((location, name.to_string()), param);
    }

    pub fn into_vec(self) -> Vec<Parameter> {
        self.entries.into_values().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_seed() {
        let params = ParamSet::from_path_template("/v2/customers/{customerId}/items/:item_id").into_vec();
        assert_eq!(params.len(), 2);
        assert_eq!(params[0].name, "customerId");
        assert_eq!(params[0].flag, "customer-id");
        assert_eq!(params[0].location, ParameterLocation::Path);
        assert!(params[0].required);
        assert_eq!(params[1].flag, "item-id");
    }

    #[test]
    fn test_last_write_wins_in_place() {
        let mut set = ParamSet::new();
        set.insert("limit", ParameterLocation::Query, false);
        set.insert("id", ParameterLocation::Path, false);
        set.insert("limit", ParameterLocation::Query, true);
        let params = set.into_vec();
        assert_eq!(params.len(), 2);
        assert_eq!(params[0].name, "limit");
        assert!(params[0].required);
        assert!(params[1].required, "path parameters are always required");
    }

    #[test]
    fn test_same_name_different_location_kept_apart() {
        let mut set = ParamSet::new();
        set.insert("id", ParameterLocation::Path, true);
        set.insert("id", ParameterLocation::Query, false);
        assert_eq!(set.into_vec().len(), 2);
    }
}
