//! Config command handlers.

use crate::config::{
    CONFIG_FILE_NAMES, config_search_dirs, discover_config_file, generate_full_example_config,
    generate_json_schema, load_or_default,
};
use crate::pipeline::exit_codes;
use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};

/// Default file name written by `config init`.
const INIT_FILE_NAME: &str = ".readiness-engine.yaml";

/// Print the effective configuration as YAML.
pub fn run_config_show(config_path: Option<&Path>) -> Result<i32> {
    let (config, loaded_from) = load_or_default(config_path);
    match &loaded_from {
        Some(path) => eprintln!("# Loaded from: {}", path.display()),
        None => eprintln!("# No config file found; showing defaults"),
    }
    let yaml = serde_yaml::to_string(&config).context("failed to serialize config")?;
    print!("{yaml}");
    Ok(exit_codes::SUCCESS)
}

/// Print the config search paths and the active config file.
pub fn run_config_path(config_path: Option<&Path>) -> Result<i32> {
    eprintln!("Config file search paths (in order):");
    for dir in config_search_dirs() {
        eprintln!("  {}", dir.display());
    }
    eprintln!();
    eprintln!("Recognized file names:");
    for name in CONFIG_FILE_NAMES {
        eprintln!("  {name}");
    }
    eprintln!();
    match discover_config_file(config_path) {
        Some(path) => eprintln!("Active config file: {}", path.display()),
        None => eprintln!("No config file found."),
    }
    Ok(exit_codes::SUCCESS)
}

/// Write the JSON schema to a file or stdout.
pub fn run_config_schema(output: Option<PathBuf>) -> Result<i32> {
    let schema = generate_json_schema();
    match output {
        Some(path) => {
            std::fs::write(&path, &schema)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("Schema written to {}", path.display());
        }
        None => println!("{schema}"),
    }
    Ok(exit_codes::SUCCESS)
}

/// Write a commented example config into `dir`.
pub fn run_config_init(dir: &Path) -> Result<i32> {
    let target = dir.join(INIT_FILE_NAME);
    if target.exists() {
        bail!(
            "{} already exists. Remove it first to re-initialize.",
            target.display()
        );
    }
    std::fs::write(&target, generate_full_example_config())
        .with_context(|| format!("failed to write {}", target.display()))?;
    eprintln!("Created {}", target.display());
    Ok(exit_codes::SUCCESS)
}
