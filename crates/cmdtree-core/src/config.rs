use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Host used when no source declares a base URL, and preferred when several do.
pub const DEFAULT_BASE_URL: &str = "https://api.xendit.co";

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".cmdtree.yaml";

/// Top-level project configuration loaded from `.cmdtree.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CmdtreeConfig {
    /// Spec files to import, in merge precedence order.
    pub inputs: Vec<String>,
    pub output: String,
    pub default_base_url: String,
}

impl Default for CmdtreeConfig {
    fn default() -> Self {
        Self {
            inputs: vec![
                "schemas/xendit.postman_collection.json".to_string(),
                "schemas/xendit.openapi.json".to_string(),
            ],
            output: "schemas/command_tree.json".to_string(),
            default_base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<CmdtreeConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config: CmdtreeConfig =
        serde_yaml_ng::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# cmdtree configuration
# Specs are merged in the order listed; earlier entries win on duplicate method + path.
inputs:
  - schemas/xendit.postman_collection.json
  - schemas/xendit.openapi.json

output: schemas/command_tree.json

# Used when no spec declares a base URL, and preferred when specs disagree.
default_base_url: https://api.xendit.co
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CmdtreeConfig::default();
        assert_eq!(config.inputs.len(), 2);
        assert_eq!(config.inputs[0], "schemas/xendit.postman_collection.json");
        assert_eq!(config.output, "schemas/command_tree.json");
        assert_eq!(config.default_base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_parse_config_yaml() {
        let yaml = r#"
inputs:
  - specs/openapi.yaml
  - specs/collection.json
output: out/tree.json
default_base_url: https://api.example.com
"#;
        let config: CmdtreeConfig = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(
            config.inputs,
            vec!["specs/openapi.yaml", "specs/collection.json"]
        );
        assert_eq!(config.output, "out/tree.json");
        assert_eq!(config.default_base_url, "https://api.example.com");
    }

    #[test]
    fn test_parse_minimal_config() {
        let yaml = "output: tree.json\n";
        let config: CmdtreeConfig = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(config.output, "tree.json");
        // Defaults applied
        assert_eq!(config.inputs.len(), 2);
        assert_eq!(config.default_base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_default_content_parses_to_defaults() {
        let config: CmdtreeConfig = serde_yaml_ng::from_str(default_config_content()).unwrap();
        let defaults = CmdtreeConfig::default();
        assert_eq!(config.inputs, defaults.inputs);
        assert_eq!(config.output, defaults.output);
        assert_eq!(config.default_base_url, defaults.default_base_url);
    }

    #[test]
    fn test_missing_config_is_none() {
        let loaded = load_config(Path::new("definitely/not/here/.cmdtree.yaml")).unwrap();
        assert!(loaded.is_none());
    }
}
