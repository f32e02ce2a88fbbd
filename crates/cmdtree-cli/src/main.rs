use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use cmdtree_core::config::{self, CONFIG_FILE_NAME, CmdtreeConfig};
use cmdtree_core::parse::{self, SourceDocument};
use cmdtree_core::transform::{self, ImportOptions, MergeOutcome};

#[derive(Parser)]
#[command(
    name = "cmdtree",
    about = "Build a CLI command tree from OpenAPI specs and Postman collections",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import and merge specs, then write the command tree
    Generate {
        /// Spec file (JSON or YAML); repeat to merge, earlier files win
        #[arg(short, long = "spec")]
        specs: Vec<PathBuf>,

        /// Where to write the command tree JSON
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Check that a single spec can be imported
    Validate {
        /// Path to the spec file
        #[arg(short, long)]
        spec: PathBuf,
    },

    /// Print the merged command tree without writing it
    Inspect {
        /// Spec file; repeat to merge
        #[arg(short, long = "spec")]
        specs: Vec<PathBuf>,

        /// Output format
        #[arg(long, default_value = "json")]
        format: InspectFormat,
    },

    /// Initialize a new cmdtree configuration
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Clone, ValueEnum)]
enum InspectFormat {
    Yaml,
    Json,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { specs, out } => cmd_generate(specs, out),

        Commands::Validate { spec } => cmd_validate(spec),

        Commands::Inspect { specs, format } => cmd_inspect(specs, format),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "cmdtree", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Try to load the project config file from the current directory.
fn try_load_config() -> Result<Option<CmdtreeConfig>> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    Ok(config::load_config(&config_path)?)
}

/// Explicit `--spec` flags replace the configured inputs.
fn resolve_inputs(specs: Vec<PathBuf>, cfg: &CmdtreeConfig) -> Vec<PathBuf> {
    if specs.is_empty() {
        cfg.inputs.iter().map(PathBuf::from).collect()
    } else {
        specs
    }
}

fn load_document(path: &Path) -> Result<SourceDocument> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    let parsed = match ext {
        "yaml" | "yml" => parse::from_yaml(&content),
        _ => parse::from_json(&content),
    };
    parsed.with_context(|| format!("failed to load {}", path.display()))
}

/// Parse every input before importing any, so a bad file stops the run
/// before anything is produced.
fn build(specs: &[PathBuf], options: &ImportOptions) -> Result<MergeOutcome> {
    let docs = specs
        .iter()
        .map(|path| load_document(path))
        .collect::<Result<Vec<_>>>()?;

    let outcome = transform::build_command_tree(&docs, options);
    for warning in &outcome.warnings {
        eprintln!("warning: {warning}");
    }
    Ok(outcome)
}

fn generate(specs: &[PathBuf], out: &Path, options: &ImportOptions) -> Result<MergeOutcome> {
    let outcome = build(specs, options)?;
    let json = outcome.tree.to_json_pretty()?;

    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    fs::write(out, json).with_context(|| format!("failed to write {}", out.display()))?;
    log::info!(
        "wrote {} resources, {} operations",
        outcome.tree.resources.len(),
        outcome.tree.operation_count()
    );
    Ok(outcome)
}

fn cmd_generate(specs: Vec<PathBuf>, out: Option<PathBuf>) -> Result<()> {
    let cfg = try_load_config()?.unwrap_or_default();
    let specs = resolve_inputs(specs, &cfg);
    let out = out.unwrap_or_else(|| PathBuf::from(&cfg.output));
    let options = ImportOptions {
        default_base_url: cfg.default_base_url.clone(),
    };

    generate(&specs, &out, &options)?;
    println!("{}", out.display());
    Ok(())
}

fn cmd_validate(spec: PathBuf) -> Result<()> {
    let cfg = try_load_config()?.unwrap_or_default();
    let doc = load_document(&spec)?;
    let options = ImportOptions {
        default_base_url: cfg.default_base_url,
    };
    let tree = transform::import_document(&doc, &options);

    eprintln!("Valid {} document: {}", doc.format(), spec.display());
    eprintln!("  Base URL: {}", tree.base_url);
    eprintln!("  Resources: {}", tree.resources.len());
    eprintln!("  Operations: {}", tree.operation_count());
    eprintln!("Validation successful.");
    Ok(())
}

fn cmd_inspect(specs: Vec<PathBuf>, format: InspectFormat) -> Result<()> {
    let cfg = try_load_config()?.unwrap_or_default();
    let specs = resolve_inputs(specs, &cfg);
    let options = ImportOptions {
        default_base_url: cfg.default_base_url.clone(),
    };
    let outcome = build(&specs, &options)?;

    match format {
        InspectFormat::Yaml => {
            let yaml = serde_yaml_ng::to_string(&outcome.tree)?;
            print!("{}", yaml);
        }
        InspectFormat::Json => {
            print!("{}", outcome.tree.to_json_pretty()?);
        }
    }

    Ok(())
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const OPENAPI: &str = r#"{
        "openapi": "3.0.0",
        "servers": [{"url": "https://api.xendit.co"}],
        "paths": {"/v2/invoices/{id}": {"get": {"operationId": "getInvoice", "tags": ["Invoices"]}}}
    }"#;

    const POSTMAN_YAML: &str = r#"
info:
  name: Sandbox
  schema: https://schema.getpostman.com/json/collection/v2.1.0/collection.json
variable:
  - key: baseUrl
    value: https://sandbox.xendit.co
item:
  - name: Invoices
    item:
      - name: Get Invoice
        request:
          method: GET
          url: "{{baseUrl}}/v2/invoices/{id}"
"#;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_generate_writes_sorted_tree() {
        let dir = tempfile::tempdir().unwrap();
        let openapi = write(dir.path(), "openapi.json", OPENAPI);
        let postman = write(dir.path(), "collection.yaml", POSTMAN_YAML);
        let out = dir.path().join("schemas/command_tree.json");

        let outcome = generate(&[openapi, postman], &out, &ImportOptions::default()).unwrap();
        assert_eq!(outcome.warnings.len(), 1);
        assert_eq!(outcome.tree.operation_count(), 1, "same route dropped");

        let written = fs::read_to_string(&out).unwrap();
        assert_eq!(written, outcome.tree.to_json_pretty().unwrap());
        assert!(written.contains("\"base_url\": \"https://api.xendit.co\""));
    }

    #[test]
    fn test_unsupported_input_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let good = write(dir.path(), "openapi.json", OPENAPI);
        let bad = write(dir.path(), "notes.json", r#"{"title": "not a spec"}"#);
        let out = dir.path().join("tree.json");

        let err = generate(&[good, bad], &out, &ImportOptions::default()).unwrap_err();
        assert!(format!("{err:#}").contains("unsupported spec format"));
        assert!(!out.exists());
    }

    #[test]
    fn test_missing_input_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(load_document(&missing).is_err());
    }

    #[test]
    fn test_resolve_inputs_prefers_flags() {
        let cfg = CmdtreeConfig::default();
        assert_eq!(resolve_inputs(Vec::new(), &cfg).len(), cfg.inputs.len());
        let flags = vec![PathBuf::from("a.json")];
        assert_eq!(resolve_inputs(flags.clone(), &cfg), flags);
    }

    #[test]
    fn test_cli_parses_repeated_specs() {
        let cli = Cli::try_parse_from([
            "cmdtree", "generate", "-s", "a.json", "--spec", "b.yaml", "-o", "out.json",
        ])
        .unwrap();
        match cli.command {
            Commands::Generate { specs, out } => {
                assert_eq!(specs, vec![PathBuf::from("a.json"), PathBuf::from("b.yaml")]);
                assert_eq!(out, Some(PathBuf::from("out.json")));
            }
            _ => panic!("expected generate"),
        }
    }
}
